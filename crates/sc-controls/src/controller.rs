//! Public controller handle.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use sc_core::{Mode, PulseCode, PulseCounts, PulseStats};
use tracing::{debug, warn};

use crate::actuator::LineActuator;
use crate::config::ControllerConfig;
use crate::error::{ControlError, ControlResult};
use crate::monitor::{Monitor, WorkerPhase};
use crate::worker::Worker;

/// Side channel for actuator failures, invoked on the worker thread.
pub type ErrorHook = Arc<dyn Fn(&ControlError) + Send + Sync>;

/// Drives a [`LineActuator`] from one background worker.
///
/// Dropping the controller stops it, so the worker is always joined and the actuator
/// released on every exit path of the owner.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sc_controls::{Mode, SignalController, TraceActuator};
///
/// let controller =
///     SignalController::spawn(TraceActuator::new("demo"), 1234_u64, 5678_u64, Duration::from_millis(20))
///         .unwrap();
/// controller.request_mode(Mode::On).unwrap();
/// controller.stop().unwrap();
/// assert!(controller.request_mode(Mode::Off).is_err());
/// ```
pub struct SignalController<A: LineActuator> {
    monitor: Arc<Monitor>,
    stats: Arc<PulseStats>,
    config: ControllerConfig,
    worker: Mutex<Option<JoinHandle<A>>>,
}

impl<A: LineActuator> SignalController<A> {
    /// Start a controller with the given codes and keep-alive interval.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidConfiguration`] if `ping_interval` is zero.
    pub fn spawn(
        actuator: A,
        on_code: impl Into<PulseCode>,
        off_code: impl Into<PulseCode>,
        ping_interval: Duration,
    ) -> ControlResult<Self> {
        Self::new(
            actuator,
            ControllerConfig::new(on_code, off_code, ping_interval)?,
        )
    }

    /// Start a controller. The worker begins in OFF mode.
    pub fn new(actuator: A, config: ControllerConfig) -> ControlResult<Self> {
        ControllerBuilder::new(config).spawn(actuator)
    }

    /// Request a target mode.
    ///
    /// Never blocks on the actuator. Requests are level-triggered: if the mode is
    /// toggled several times before the worker wakes, only the last value is acted on
    /// and the intermediate pulses are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::ControllerClosed`] once `stop()` has been called.
    pub fn request_mode(&self, mode: Mode) -> ControlResult<()> {
        match self.monitor.set_mode(mode) {
            None => Err(ControlError::ControllerClosed),
            Some(changed) => {
                if changed {
                    debug!(%mode, "mode requested");
                }
                Ok(())
            }
        }
    }

    /// Shorthand for [`request_mode`](Self::request_mode) with `true` = ON.
    pub fn set_on(&self, on: bool) -> ControlResult<()> {
        self.request_mode(Mode::from_bool(on))
    }

    /// Stop the worker and wait for it to exit, then release the actuator.
    ///
    /// Idempotent. A concurrent second caller blocks until the first caller's join has
    /// finished; later callers return immediately.
    pub fn stop(&self) -> ControlResult<()> {
        if self.monitor.request_stop() {
            debug!("stop requested");
        }

        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(handle) = worker.take() else {
            return Ok(());
        };

        let joined = handle.join();
        self.monitor.mark_stopped();

        let mut actuator = joined.map_err(|_| ControlError::WorkerPanicked)?;
        actuator.release().inspect_err(|err| {
            warn!(error = %err, "actuator release failed");
        })
    }

    /// The most recently requested mode.
    pub fn mode(&self) -> Mode {
        self.monitor.lock().mode
    }

    /// What the worker is currently acting on.
    pub fn phase(&self) -> WorkerPhase {
        self.monitor.lock().phase
    }

    /// `true` once `stop()` has been called, even if the join is still in progress.
    pub fn is_stopped(&self) -> bool {
        self.monitor.lock().stopped
    }

    /// Block until the worker reports `phase`, or `timeout` elapses.
    pub fn wait_for_phase(&self, phase: WorkerPhase, timeout: Duration) -> bool {
        self.monitor.wait_for_phase(phase, timeout)
    }

    /// Pulses emitted and failed so far.
    pub fn stats(&self) -> PulseCounts {
        self.stats.snapshot()
    }

    /// Configuration the worker was started with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl<A: LineActuator> Drop for SignalController<A> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "controller stop failed during drop");
        }
    }
}

/// Configures optional hooks before the worker is started.
pub struct ControllerBuilder {
    config: ControllerConfig,
    error_hook: Option<ErrorHook>,
    thread_name: String,
}

impl ControllerBuilder {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            error_hook: None,
            thread_name: "signal-worker".to_string(),
        }
    }

    /// Forward actuator failures to `hook` in addition to logging them.
    pub fn error_hook(mut self, hook: impl Fn(&ControlError) + Send + Sync + 'static) -> Self {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    /// Name of the worker thread, shown in panics and profilers.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Validate the configuration and start exactly one worker.
    pub fn spawn<A: LineActuator>(self, actuator: A) -> ControlResult<SignalController<A>> {
        self.config.validate()?;

        let monitor = Arc::new(Monitor::new());
        let stats = Arc::new(PulseStats::new());
        let worker = Worker {
            actuator,
            monitor: Arc::clone(&monitor),
            stats: Arc::clone(&stats),
            config: self.config,
            error_hook: self.error_hook,
        };

        let handle = thread::Builder::new()
            .name(self.thread_name)
            .spawn(move || worker.run())
            .map_err(|source| ControlError::Spawn { source })?;

        Ok(SignalController {
            monitor,
            stats,
            config: self.config,
            worker: Mutex::new(Some(handle)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing;

    impl LineActuator for Failing {
        fn pulse(&mut self, _code: PulseCode) -> ControlResult<()> {
            Err(ControlError::Actuator {
                what: "line unplugged".to_string(),
            })
        }
    }

    struct Quiet;

    impl LineActuator for Quiet {
        fn pulse(&mut self, _code: PulseCode) -> ControlResult<()> {
            Ok(())
        }
    }

    #[test]
    fn zero_interval_fails_fast() {
        let result = SignalController::spawn(Quiet, 1_u64, 2_u64, Duration::ZERO);
        assert!(matches!(
            result,
            Err(ControlError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn worker_starts_in_off() {
        let controller =
            SignalController::spawn(Quiet, 1_u64, 2_u64, Duration::from_millis(10)).unwrap();
        assert_eq!(controller.mode(), Mode::Off);
        assert!(controller.wait_for_phase(WorkerPhase::RunningOff, Duration::from_secs(2)));
        controller.stop().unwrap();
        assert_eq!(controller.phase(), WorkerPhase::Stopped);
    }

    #[test]
    fn failures_reach_hook_and_loop_continues() {
        let seen = Arc::new(AtomicUsize::new(0));
        let hook_seen = Arc::clone(&seen);
        let config = ControllerConfig::new(1_u64, 2_u64, Duration::from_millis(5)).unwrap();
        let controller = ControllerBuilder::new(config)
            .error_hook(move |_| {
                hook_seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn(Failing)
            .unwrap();

        controller.request_mode(Mode::On).unwrap();
        thread::sleep(Duration::from_millis(60));
        controller.stop().unwrap();

        let failures = controller.stats().failures;
        assert!(failures >= 3, "failures = {failures}");
        assert_eq!(seen.load(Ordering::SeqCst) as u64, failures);
        assert_eq!(controller.stats().total(), 0);
    }

    #[test]
    fn request_after_stop_is_closed() {
        let controller =
            SignalController::spawn(Quiet, 1_u64, 2_u64, Duration::from_millis(10)).unwrap();
        assert!(!controller.is_stopped());
        controller.stop().unwrap();
        assert!(controller.is_stopped());
        assert!(matches!(
            controller.request_mode(Mode::On),
            Err(ControlError::ControllerClosed)
        ));
        assert_eq!(controller.mode(), Mode::Off);
        assert!(controller.stop().is_ok());
    }
}
