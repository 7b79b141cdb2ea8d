//! Error types for signal controller operations.

use sc_core::CoreError;
use thiserror::Error;

/// Result type for signal controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while configuring or running a controller.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Rejected at construction; the controller never starts.
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: &'static str },

    /// Operation attempted after `stop()`.
    #[error("Controller closed")]
    ControllerClosed,

    /// Actuator write failed.
    #[error("Actuator I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Actuator reported a failure that is not an OS error.
    #[error("Actuator error: {what}")]
    Actuator { what: String },

    /// The worker thread could not be started.
    #[error("Failed to spawn worker: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// The worker thread panicked before it could be joined.
    #[error("Worker thread panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Core(#[from] CoreError),
}
