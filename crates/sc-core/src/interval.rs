use std::time::Duration;

use crate::error::{CoreError, CoreResult};

pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Convert a configured number of seconds into a strictly positive `Duration`.
pub fn interval_from_secs(secs: f64) -> CoreResult<Duration> {
    let secs = ensure_finite(secs, "interval")?;
    if secs <= 0.0 {
        return Err(CoreError::InvalidArg {
            what: "interval must be positive",
        });
    }
    let interval = Duration::try_from_secs_f64(secs).map_err(|_| CoreError::InvalidArg {
        what: "interval out of range",
    })?;
    // Sub-nanosecond values round down to zero.
    if interval.is_zero() {
        return Err(CoreError::InvalidArg {
            what: "interval must be positive",
        });
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_fractional_seconds() {
        assert_eq!(interval_from_secs(0.1).unwrap(), Duration::from_millis(100));
        assert_eq!(interval_from_secs(1.0).unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_non_positive() {
        assert!(matches!(
            interval_from_secs(0.0),
            Err(CoreError::InvalidArg { .. })
        ));
        assert!(matches!(
            interval_from_secs(-1.0),
            Err(CoreError::InvalidArg { .. })
        ));
        assert!(matches!(
            interval_from_secs(1e-12),
            Err(CoreError::InvalidArg { .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let err = interval_from_secs(f64::NAN).unwrap_err();
        assert!(format!("{err}").contains("Non-finite"));
    }
}
