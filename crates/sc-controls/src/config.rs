//! Immutable controller configuration.

use std::time::Duration;

use sc_core::{Mode, PulseCode};

use crate::error::{ControlError, ControlResult};

/// Pulse codes and keep-alive cadence for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Code emitted repeatedly while ON.
    pub on_code: PulseCode,
    /// Code emitted once on every entry into OFF.
    pub off_code: PulseCode,
    /// Time between successive ON pulses, measured from the start of each pulse.
    pub ping_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            on_code: PulseCode::new(1234),
            off_code: PulseCode::new(5678),
            ping_interval: Duration::from_secs(1),
        }
    }
}

impl ControllerConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidConfiguration`] if `ping_interval` is zero.
    pub fn new(
        on_code: impl Into<PulseCode>,
        off_code: impl Into<PulseCode>,
        ping_interval: Duration,
    ) -> ControlResult<Self> {
        let config = Self {
            on_code: on_code.into(),
            off_code: off_code.into(),
            ping_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants enforced by [`new`](Self::new).
    pub fn validate(&self) -> ControlResult<()> {
        if self.ping_interval.is_zero() {
            return Err(ControlError::InvalidConfiguration {
                what: "ping_interval must be positive",
            });
        }
        Ok(())
    }

    /// Code to emit for one iteration in `mode`.
    pub fn code_for(&self, mode: Mode) -> PulseCode {
        match mode {
            Mode::On => self.on_code,
            Mode::Off => self.off_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_transmitter() {
        let config = ControllerConfig::default();
        assert_eq!(config.on_code.value(), 1234);
        assert_eq!(config.off_code.value(), 5678);
        assert_eq!(config.ping_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let err = ControllerConfig::new(1_u64, 2_u64, Duration::ZERO).unwrap_err();
        assert!(matches!(err, ControlError::InvalidConfiguration { .. }));
    }

    #[test]
    fn code_selection() {
        let config = ControllerConfig::new(10_u64, 20_u64, Duration::from_millis(5)).unwrap();
        assert_eq!(config.code_for(Mode::On).value(), 10);
        assert_eq!(config.code_for(Mode::Off).value(), 20);
    }
}
