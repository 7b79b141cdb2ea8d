//! Continuous signal controller for a binary transmitter line.
//!
//! A [`SignalController`] owns one background worker that drives a [`LineActuator`]
//! in one of two modes:
//! - **Off**: a single confirmation pulse per entry, then idle
//! - **On**: a keep-alive pulse repeated every `ping_interval` while the mode is held
//!
//! Foreground callers change the mode with [`SignalController::request_mode`] at any time.
//! The request only flips shared state under the controller's monitor and wakes the
//! worker; it never touches the actuator.
//!
//! # Architecture
//!
//! - `monitor`: the mode/stop state behind a mutex with two condition variables
//! - `worker`: the background loop (pulse outside the lock, check-then-wait inside it)
//! - `controller`: the public handle with an explicit, idempotent `stop()`
//! - `actuator`: the actuator seam and the stock line drivers
//!
//! # Semantics
//!
//! The mode is level-triggered. Toggles faster than the worker can observe them collapse
//! to the last requested mode, and intermediate pulses are not guaranteed.

pub mod actuator;
pub mod config;
pub mod controller;
pub mod error;
mod monitor;
mod worker;

pub use actuator::{FileActuator, FileLine, HeldLevelActuator, LineActuator, LineLevel, TraceActuator};
pub use config::ControllerConfig;
pub use controller::{ControllerBuilder, ErrorHook, SignalController};
pub use error::{ControlError, ControlResult};
pub use monitor::WorkerPhase;

pub use sc_core::{Mode, PulseCode, PulseCounts};
