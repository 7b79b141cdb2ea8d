//! sc-project: station configuration file format and validation.

pub mod schema;
pub mod validate;

use std::time::Duration;

use sc_controls::{
    ControlError, ControllerConfig, FileActuator, FileLine, HeldLevelActuator, LineActuator,
    TraceActuator,
};
use sc_core::{CoreError, interval_from_secs};

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_station};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value: {0}")]
    Core(#[from] CoreError),

    #[error("Controller error: {0}")]
    Control(#[from] ControlError),
}

pub fn parse_yaml(content: &str) -> ProjectResult<StationConfig> {
    let station: StationConfig = serde_yaml::from_str(content)?;
    validate_station(&station)?;
    Ok(station)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<StationConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &std::path::Path, station: &StationConfig) -> ProjectResult<()> {
    validate_station(station)?;
    let content = serde_yaml::to_string(station)?;
    std::fs::write(path, content)?;
    Ok(())
}

impl StationConfig {
    /// Controller settings for the `signal` section.
    pub fn controller_config(&self) -> ProjectResult<ControllerConfig> {
        let interval = interval_from_secs(self.signal.ping_interval_s)?;
        Ok(ControllerConfig::new(
            self.signal.on_code,
            self.signal.off_code,
            interval,
        )?)
    }

    /// Open the configured line.
    pub fn build_actuator(&self) -> ProjectResult<Box<dyn LineActuator>> {
        let actuator: Box<dyn LineActuator> = match &self.actuator {
            ActuatorDef::Trace { label } => Box::new(TraceActuator::new(
                label.clone().unwrap_or_else(|| self.name.clone()),
            )),
            ActuatorDef::File { path } => Box::new(FileActuator::open(path)?),
            ActuatorDef::Line { path, hold_s, gap_s } => {
                let hold = interval_from_secs(*hold_s)?;
                let gap = if *gap_s > 0.0 {
                    interval_from_secs(*gap_s)?
                } else {
                    Duration::ZERO
                };
                Box::new(HeldLevelActuator::new(FileLine::new(path), hold, gap)?)
            }
        };
        Ok(actuator)
    }
}
