use core::fmt;
use core::str::FromStr;

use crate::error::CoreError;

/// Target steady state of the controller.
///
/// `On` is a continuous keep-alive, `Off` is quiescent and only confirmed once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    #[default]
    Off,
    On,
}

impl Mode {
    pub fn from_bool(on: bool) -> Self {
        if on { Mode::On } else { Mode::Off }
    }

    pub fn is_on(self) -> bool {
        self == Mode::On
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Off => Mode::On,
            Mode::On => Mode::Off,
        }
    }
}

impl From<bool> for Mode {
    fn from(on: bool) -> Self {
        Self::from_bool(on)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Off => f.write_str("off"),
            Mode::On => f.write_str("on"),
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Ok(Mode::On),
            "off" | "false" | "0" => Ok(Mode::Off),
            _ => Err(CoreError::Parse {
                what: "mode",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_off() {
        assert_eq!(Mode::default(), Mode::Off);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Mode::Off.toggled(), Mode::On);
        assert_eq!(Mode::On.toggled().toggled(), Mode::On);
        assert!(Mode::from_bool(true).is_on());
        assert!(!Mode::Off.is_on());
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("ON".parse::<Mode>().unwrap(), Mode::On);
        assert_eq!(" off ".parse::<Mode>().unwrap(), Mode::Off);
        assert_eq!("1".parse::<Mode>().unwrap(), Mode::On);
        assert_eq!("false".parse::<Mode>().unwrap(), Mode::Off);
        assert!("maybe".parse::<Mode>().is_err());
    }
}
