//! Background worker loop.
//!
//! ```text
//! loop:
//!   lock; if stopped -> exit; snapshot mode; unlock
//!   pulse(code_for(mode))                    (outside the lock)
//!   ON:  wait until mode/stop change or ping_interval after pulse start
//!   OFF: wait until mode/stop change
//! ```

use std::sync::Arc;
use std::time::Instant;

use sc_core::{Mode, PulseStats};
use tracing::{debug, warn};

use crate::actuator::LineActuator;
use crate::config::ControllerConfig;
use crate::controller::ErrorHook;
use crate::monitor::Monitor;

pub(crate) struct Worker<A: LineActuator> {
    pub actuator: A,
    pub monitor: Arc<Monitor>,
    pub stats: Arc<PulseStats>,
    pub config: ControllerConfig,
    pub error_hook: Option<ErrorHook>,
}

impl<A: LineActuator> Worker<A> {
    /// Run until stopped, handing the actuator back for release.
    pub fn run(mut self) -> A {
        debug!(
            on_code = %self.config.on_code,
            off_code = %self.config.off_code,
            interval_ms = self.config.ping_interval.as_millis() as u64,
            "signal worker started"
        );

        while let Some(mode) = self.monitor.begin_iteration() {
            let started = Instant::now();
            self.emit(mode);

            // An interval past the clock's range never elapses.
            let deadline = match mode {
                Mode::On => started.checked_add(self.config.ping_interval),
                Mode::Off => None,
            };
            self.monitor.wait_for_change(mode, deadline);
        }

        debug!(counts = ?self.stats.snapshot(), "signal worker stopped");
        self.actuator
    }

    /// One pulse. Failures are reported and never end the loop.
    fn emit(&mut self, mode: Mode) {
        let code = self.config.code_for(mode);
        match self.actuator.pulse(code) {
            Ok(()) => self.stats.record(mode),
            Err(err) => {
                self.stats.record_failure();
                warn!(%mode, %code, error = %err, "pulse failed");
                if let Some(hook) = &self.error_hook {
                    hook(&err);
                }
            }
        }
    }
}
