//! Lock-free pulse counters.
//!
//! The worker increments these outside the controller lock so that readers never
//! contend with the monitor.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::mode::Mode;

/// Point-in-time copy of [`PulseStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PulseCounts {
    pub on_pulses: u64,
    pub off_pulses: u64,
    pub failures: u64,
}

impl PulseCounts {
    pub fn total(&self) -> u64 {
        self.on_pulses + self.off_pulses
    }
}

/// Accumulating counters for pulses emitted by one controller.
#[derive(Debug, Default)]
pub struct PulseStats {
    on_pulses: AtomicU64,
    off_pulses: AtomicU64,
    failures: AtomicU64,
}

impl PulseStats {
    pub const fn new() -> Self {
        Self {
            on_pulses: AtomicU64::new(0),
            off_pulses: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Record one successful pulse for `mode`.
    pub fn record(&self, mode: Mode) {
        let counter = match mode {
            Mode::On => &self.on_pulses,
            Mode::Off => &self.off_pulses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one failed actuator write.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PulseCounts {
        PulseCounts {
            on_pulses: self.on_pulses.load(Ordering::Relaxed),
            off_pulses: self.off_pulses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
