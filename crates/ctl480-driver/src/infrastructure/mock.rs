//! Recording event sink for tests.
//!
//! Records every emitted `(type, code, value)` triple in order, sync
//! markers included, so tests can assert on exact event sequences. Can
//! be armed to fail after a set number of writes to exercise error
//! paths.

use std::io;

use ctl480_core::wire::{EV_SYN, SYN_REPORT};

use crate::application::translate::{EventSink, SinkError};

/// In-memory [`EventSink`] used by unit and integration tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<(u16, u16, i32)>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that succeeds for `writes` emissions and fails afterwards.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            events: Vec::new(),
            fail_after: Some(writes),
        }
    }

    /// All recorded events in emission order, sync markers included.
    pub fn events(&self) -> &[(u16, u16, i32)] {
        &self.events
    }

    /// Number of recorded events matching the triple exactly.
    pub fn count(&self, kind: u16, code: u16, value: i32) -> usize {
        self.events
            .iter()
            .filter(|event| **event == (kind, code, value))
            .count()
    }

    /// Number of committed batches.
    pub fn commits(&self) -> usize {
        self.count(EV_SYN, SYN_REPORT, 0)
    }

    fn check_failure(&self) -> Result<(), SinkError> {
        if let Some(limit) = self.fail_after {
            if self.events.len() >= limit {
                return Err(SinkError::Write(io::Error::new(
                    io::ErrorKind::Other,
                    "injected failure",
                )));
            }
        }
        Ok(())
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, kind: u16, code: u16, value: i32) -> Result<(), SinkError> {
        self.check_failure()?;
        self.events.push((kind, code, value));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.emit(EV_SYN, SYN_REPORT, 0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ctl480_core::wire::{ABS_X, EV_ABS};

    #[test]
    fn test_records_events_and_commits_in_order() {
        let mut sink = RecordingSink::new();

        sink.emit(EV_ABS, ABS_X, 10).unwrap();
        sink.commit().unwrap();

        assert_eq!(sink.events(), &[(EV_ABS, ABS_X, 10), (EV_SYN, SYN_REPORT, 0)]);
        assert_eq!(sink.commits(), 1);
    }

    #[test]
    fn test_failing_sink_rejects_writes_past_the_limit() {
        let mut sink = RecordingSink::failing_after(1);

        assert!(sink.emit(EV_ABS, ABS_X, 1).is_ok());
        assert!(sink.emit(EV_ABS, ABS_X, 2).is_err());
    }
}
