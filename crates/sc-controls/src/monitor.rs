//! Shared controller state and its monitor.
//!
//! All reads and writes of the mode and stop flag happen under one mutex. The worker's
//! check-then-wait runs under that same mutex, so a request that races with the worker
//! going to sleep is either seen before the wait starts or wakes the wait.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use sc_core::Mode;

/// Observable state of the background worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Worker has not yet taken its first snapshot.
    Starting,
    /// Acting on OFF: confirmation sent or pending, then idle.
    RunningOff,
    /// Acting on ON: keep-alive pulses every interval.
    RunningOn,
    /// Terminal.
    Stopped,
}

impl WorkerPhase {
    fn running(mode: Mode) -> Self {
        match mode {
            Mode::Off => WorkerPhase::RunningOff,
            Mode::On => WorkerPhase::RunningOn,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ControllerState {
    /// Written only by `request_mode`.
    pub mode: Mode,
    /// Monotonic: never reverts once set.
    pub stopped: bool,
    /// Written only by the worker (and by `stop()` once the worker is joined).
    pub phase: WorkerPhase,
}

#[derive(Debug)]
pub(crate) struct Monitor {
    state: Mutex<ControllerState>,
    /// Signals mode/stop changes to the worker.
    changed: Condvar,
    /// Signals phase changes to observers.
    phase_changed: Condvar,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ControllerState {
                mode: Mode::Off,
                stopped: false,
                phase: WorkerPhase::Starting,
            }),
            changed: Condvar::new(),
            phase_changed: Condvar::new(),
        }
    }

    // Poisoning is ignored: the state has no multi-step invariants.
    pub fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the target mode. Returns `None` if the controller is stopped, otherwise
    /// whether the mode actually changed.
    pub fn set_mode(&self, mode: Mode) -> Option<bool> {
        let mut state = self.lock();
        if state.stopped {
            return None;
        }
        if state.mode == mode {
            return Some(false);
        }
        state.mode = mode;
        self.changed.notify_all();
        Some(true)
    }

    /// Raise the stop flag. Returns `true` for the call that actually raised it.
    pub fn request_stop(&self) -> bool {
        let mut state = self.lock();
        if state.stopped {
            return false;
        }
        state.stopped = true;
        self.changed.notify_all();
        true
    }

    /// Start of one worker iteration: the mode to act on, or `None` once stopped.
    pub fn begin_iteration(&self) -> Option<Mode> {
        let mut state = self.lock();
        let (next, phase) = if state.stopped {
            (None, WorkerPhase::Stopped)
        } else {
            (Some(state.mode), WorkerPhase::running(state.mode))
        };
        if state.phase != phase {
            state.phase = phase;
            self.phase_changed.notify_all();
        }
        next
    }

    /// Sleep until the mode differs from `acted_on`, the controller is stopped, or
    /// `deadline` passes. `None` waits without a timeout.
    pub fn wait_for_change(&self, acted_on: Mode, deadline: Option<Instant>) {
        let guard = self.lock();
        let unchanged = |s: &mut ControllerState| !s.stopped && s.mode == acted_on;
        match deadline {
            Some(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                drop(
                    self.changed
                        .wait_timeout_while(guard, timeout, unchanged)
                        .unwrap_or_else(PoisonError::into_inner),
                );
            }
            None => {
                drop(
                    self.changed
                        .wait_while(guard, unchanged)
                        .unwrap_or_else(PoisonError::into_inner),
                );
            }
        }
    }

    pub fn mark_stopped(&self) {
        let mut state = self.lock();
        state.stopped = true;
        if state.phase != WorkerPhase::Stopped {
            state.phase = WorkerPhase::Stopped;
            self.phase_changed.notify_all();
        }
    }

    /// Block until the worker reports `phase` or `timeout` elapses.
    pub fn wait_for_phase(&self, phase: WorkerPhase, timeout: Duration) -> bool {
        let guard = self.lock();
        let (state, _) = self
            .phase_changed
            .wait_timeout_while(guard, timeout, |s| s.phase != phase)
            .unwrap_or_else(PoisonError::into_inner);
        state.phase == phase
    }
}
