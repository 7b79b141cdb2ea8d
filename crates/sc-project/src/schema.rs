//! Station file schema.

use std::path::PathBuf;

use sc_core::PulseCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationConfig {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub signal: SignalDef,
    #[serde(default)]
    pub actuator: ActuatorDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalDef {
    #[serde(default = "default_on_code")]
    pub on_code: PulseCode,
    #[serde(default = "default_off_code")]
    pub off_code: PulseCode,
    #[serde(default = "default_ping_interval_s")]
    pub ping_interval_s: f64,
}

impl Default for SignalDef {
    fn default() -> Self {
        Self {
            on_code: default_on_code(),
            off_code: default_off_code(),
            ping_interval_s: default_ping_interval_s(),
        }
    }
}

fn default_on_code() -> PulseCode {
    PulseCode::new(1234)
}

fn default_off_code() -> PulseCode {
    PulseCode::new(5678)
}

fn default_ping_interval_s() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ActuatorDef {
    /// Log pulses only.
    Trace {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Write codes to a file or FIFO.
    File { path: PathBuf },
    /// Hold a level line high for `hold_s` per pulse.
    Line {
        path: PathBuf,
        hold_s: f64,
        #[serde(default)]
        gap_s: f64,
    },
}

impl Default for ActuatorDef {
    fn default() -> Self {
        ActuatorDef::Trace { label: None }
    }
}
