//! Hotkey injection: one modifier+key chord through the event sink.
//!
//! Consumers (IMEs, editors) debounce key input and miss a chord whose
//! press and release land in the same sync window, so the sequence is
//! two committed batches with a short hold between them:
//! modifier-down, key-down, sync — hold — key-up, modifier-up, sync.

use std::thread;
use std::time::Duration;

use ctl480_core::wire::EV_KEY;

use super::translate::{EventSink, SinkError};

/// How long the chord stays held between its two batches.
pub const HOTKEY_HOLD: Duration = Duration::from_millis(10);

/// Sends a modifier+key press/release pair.
///
/// # Errors
///
/// Returns [`SinkError`] if any of the underlying event writes fail.
pub fn send_combo(sink: &mut dyn EventSink, modifier: u16, key: u16) -> Result<(), SinkError> {
    sink.emit(EV_KEY, modifier, 1)?;
    sink.emit(EV_KEY, key, 1)?;
    sink.commit()?;

    thread::sleep(HOTKEY_HOLD);

    sink.emit(EV_KEY, key, 0)?;
    sink.emit(EV_KEY, modifier, 0)?;
    sink.commit()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
