//! Line actuators driven by the signal worker.
//!
//! An actuator turns one opaque [`PulseCode`] into a signal on the physical line. The
//! controller only ever calls it from its worker thread, so implementations may block
//! for the duration of the emission and need not be `Sync`.
//!
//! Stock implementations:
//! - [`TraceActuator`]: dry run, logs each pulse
//! - [`FileActuator`]: writes each code as a decimal line (FIFO to a transmitter daemon)
//! - [`HeldLevelActuator`]: raises a [`LineLevel`] for a fixed hold per pulse

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use sc_core::PulseCode;
use tracing::{debug, info};

use crate::error::{ControlError, ControlResult};

/// Emits pulses on an external line.
pub trait LineActuator: Send + 'static {
    /// Emit one protocol-defined signal. Best effort: the controller logs failures and
    /// retries on its next iteration.
    fn pulse(&mut self, code: PulseCode) -> ControlResult<()>;

    /// Return the line to a safe idle state. Called once after the worker exits.
    fn release(&mut self) -> ControlResult<()> {
        Ok(())
    }
}

impl LineActuator for Box<dyn LineActuator> {
    fn pulse(&mut self, code: PulseCode) -> ControlResult<()> {
        (**self).pulse(code)
    }

    fn release(&mut self) -> ControlResult<()> {
        (**self).release()
    }
}

/// A line that is driven by explicit level changes.
pub trait LineLevel: Send + 'static {
    fn set_active(&mut self, active: bool) -> ControlResult<()>;
}

/// Dry-run actuator that only logs.
#[derive(Debug, Clone, Default)]
pub struct TraceActuator {
    label: String,
    emitted: u64,
}

impl TraceActuator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            emitted: 0,
        }
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl LineActuator for TraceActuator {
    fn pulse(&mut self, code: PulseCode) -> ControlResult<()> {
        self.emitted += 1;
        info!(line = %self.label, %code, seq = self.emitted, "pulse");
        Ok(())
    }

    fn release(&mut self) -> ControlResult<()> {
        info!(line = %self.label, total = self.emitted, "line released");
        Ok(())
    }
}

/// Writes every code as a decimal line to a file or FIFO.
#[derive(Debug)]
pub struct FileActuator {
    path: PathBuf,
    file: File,
}

impl FileActuator {
    /// Open `path` for appending, creating it if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> ControlResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "opened pulse sink");
        Ok(Self { path, file })
    }
}

impl LineActuator for FileActuator {
    fn pulse(&mut self, code: PulseCode) -> ControlResult<()> {
        writeln!(self.file, "{code}")?;
        self.file.flush()?;
        Ok(())
    }

    fn release(&mut self) -> ControlResult<()> {
        self.file.flush()?;
        Ok(())
    }
}

/// Level line backed by a value file that accepts `1` and `0` (sysfs GPIO style).
#[derive(Debug, Clone)]
pub struct FileLine {
    path: PathBuf,
}

impl FileLine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineLevel for FileLine {
    fn set_active(&mut self, active: bool) -> ControlResult<()> {
        std::fs::write(&self.path, if active { b"1" } else { b"0" })?;
        Ok(())
    }
}

/// Models a pulse as raise, hold, lower, gap on a level line.
///
/// The code only identifies the pulse in logs; every pulse has the same shape.
#[derive(Debug)]
pub struct HeldLevelActuator<L: LineLevel> {
    line: L,
    hold: Duration,
    gap: Duration,
}

impl<L: LineLevel> HeldLevelActuator<L> {
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidConfiguration`] if `hold` is zero.
    pub fn new(line: L, hold: Duration, gap: Duration) -> ControlResult<Self> {
        if hold.is_zero() {
            return Err(ControlError::InvalidConfiguration {
                what: "hold must be positive",
            });
        }
        Ok(Self { line, hold, gap })
    }
}

impl<L: LineLevel> LineActuator for HeldLevelActuator<L> {
    fn pulse(&mut self, code: PulseCode) -> ControlResult<()> {
        debug!(%code, hold_ms = self.hold.as_millis() as u64, "holding line");
        self.line.set_active(true)?;
        thread::sleep(self.hold);
        self.line.set_active(false)?;
        if !self.gap.is_zero() {
            thread::sleep(self.gap);
        }
        Ok(())
    }

    fn release(&mut self) -> ControlResult<()> {
        self.line.set_active(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct ScriptedLine {
        levels: Arc<Mutex<Vec<bool>>>,
    }

    impl LineLevel for ScriptedLine {
        fn set_active(&mut self, active: bool) -> ControlResult<()> {
            self.levels.lock().unwrap().push(active);
            Ok(())
        }
    }

    #[test]
    fn held_level_raises_then_lowers() {
        let line = ScriptedLine::default();
        let levels = line.levels.clone();
        let mut act =
            HeldLevelActuator::new(line, Duration::from_millis(1), Duration::ZERO).unwrap();

        act.pulse(PulseCode::new(7)).unwrap();
        act.pulse(PulseCode::new(7)).unwrap();
        act.release().unwrap();

        assert_eq!(*levels.lock().unwrap(), vec![true, false, true, false, false]);
    }

    #[test]
    fn held_level_rejects_zero_hold() {
        let err = HeldLevelActuator::new(ScriptedLine::default(), Duration::ZERO, Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, ControlError::InvalidConfiguration { .. }));
    }

    #[test]
    fn file_actuator_appends_codes() {
        let path = std::env::temp_dir().join(format!("sc_file_actuator_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut act = FileActuator::open(&path).unwrap();
        act.pulse(PulseCode::new(1234)).unwrap();
        act.pulse(PulseCode::new(5678)).unwrap();
        act.release().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1234\n5678\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_line_writes_levels() {
        let path = std::env::temp_dir().join(format!("sc_file_line_{}.value", std::process::id()));
        let mut line = FileLine::new(&path);

        line.set_active(true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
        line.set_active(false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn trace_actuator_counts_pulses() {
        let mut act = TraceActuator::new("dry");
        act.pulse(PulseCode::new(1)).unwrap();
        act.pulse(PulseCode::new(2)).unwrap();
        assert_eq!(act.emitted(), 2);
    }

    #[test]
    fn boxed_actuator_delegates() {
        let mut act: Box<dyn LineActuator> = Box::new(TraceActuator::new("dry"));
        act.pulse(PulseCode::new(1)).unwrap();
        act.release().unwrap();
    }
}
