//! sc-core: shared foundation for the signal controller workspace.
//!
//! Contains:
//! - code (opaque pulse identifiers)
//! - mode (the two controller operating modes)
//! - interval (checked conversion of configured seconds into `Duration`)
//! - stats (lock-free pulse counters)
//! - error (shared error types)

pub mod code;
pub mod error;
pub mod interval;
pub mod mode;
pub mod stats;

pub use code::PulseCode;
pub use error::{CoreError, CoreResult};
pub use interval::{ensure_finite, interval_from_secs};
pub use mode::Mode;
pub use stats::{PulseCounts, PulseStats};
