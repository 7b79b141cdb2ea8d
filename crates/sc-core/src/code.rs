use core::fmt;

/// Opaque identifier of one pulse emitted on the line.
///
/// The controller never interprets the value; it is handed to the actuator as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PulseCode(u64);

impl PulseCode {
    pub const fn new(code: u64) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for PulseCode {
    fn from(code: u64) -> Self {
        Self(code)
    }
}

impl From<PulseCode> for u64 {
    fn from(code: PulseCode) -> Self {
        code.0
    }
}

impl fmt::Display for PulseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_value() {
        let code = PulseCode::new(1234);
        assert_eq!(code.value(), 1234);
        assert_eq!(u64::from(code), 1234);
        assert_eq!(code.to_string(), "1234");
    }
}
