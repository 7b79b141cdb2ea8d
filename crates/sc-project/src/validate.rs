//! Station validation logic.

use sc_core::interval_from_secs;

use crate::schema::{ActuatorDef, StationConfig};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_station(station: &StationConfig) -> Result<(), ValidationError> {
    if station.version == 0 || station.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: station.version,
        });
    }

    if station.name.trim().is_empty() {
        return Err(invalid("name", &station.name, "must not be empty"));
    }

    let signal = &station.signal;
    if let Err(err) = interval_from_secs(signal.ping_interval_s) {
        return Err(invalid(
            "signal.ping_interval_s",
            signal.ping_interval_s,
            &err.to_string(),
        ));
    }
    if signal.on_code == signal.off_code {
        return Err(invalid(
            "signal.off_code",
            signal.off_code,
            "must differ from on_code",
        ));
    }

    match &station.actuator {
        ActuatorDef::Trace { .. } => {}
        ActuatorDef::File { path } => {
            if path.as_os_str().is_empty() {
                return Err(invalid("actuator.path", "", "must not be empty"));
            }
        }
        ActuatorDef::Line { path, hold_s, gap_s } => {
            if path.as_os_str().is_empty() {
                return Err(invalid("actuator.path", "", "must not be empty"));
            }
            if let Err(err) = interval_from_secs(*hold_s) {
                return Err(invalid("actuator.hold_s", hold_s, &err.to_string()));
            }
            if !gap_s.is_finite() || *gap_s < 0.0 {
                return Err(invalid("actuator.gap_s", gap_s, "must be finite and >= 0"));
            }
            if *hold_s + *gap_s >= signal.ping_interval_s {
                return Err(ValidationError::Unsupported {
                    feature: "actuator.hold_s".to_string(),
                    reason: "pulse shape must fit inside ping_interval_s".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SignalDef;

    fn station() -> StationConfig {
        StationConfig {
            version: LATEST_VERSION,
            name: "gate".to_string(),
            signal: SignalDef::default(),
            actuator: ActuatorDef::default(),
        }
    }

    #[test]
    fn default_station_is_valid() {
        validate_station(&station()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut s = station();
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_station(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_interval() {
        let mut s = station();
        s.signal.ping_interval_s = 0.0;
        assert!(validate_station(&s).is_err());
        s.signal.ping_interval_s = -2.0;
        assert!(validate_station(&s).is_err());
        s.signal.ping_interval_s = f64::NAN;
        assert!(validate_station(&s).is_err());
    }

    #[test]
    fn rejects_identical_codes() {
        let mut s = station();
        s.signal.off_code = s.signal.on_code;
        let err = validate_station(&s).unwrap_err();
        assert!(err.to_string().contains("signal.off_code"));
    }

    #[test]
    fn line_pulse_must_fit_interval() {
        let mut s = station();
        s.actuator = ActuatorDef::Line {
            path: "/sys/class/gpio/gpio17/value".into(),
            hold_s: 0.8,
            gap_s: 0.3,
        };
        assert!(matches!(
            validate_station(&s),
            Err(ValidationError::Unsupported { .. })
        ));
    }
}
