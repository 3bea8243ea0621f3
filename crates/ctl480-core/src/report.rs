//! Parser for the CTL-480 stylus interrupt report.
//!
//! Report layout (little-endian multi-byte fields):
//! ```text
//! [0]    report id   – 0x10 or 0x02 for stylus reports
//! [1]    status      – bit 0 tip switch, bit 1 lower button,
//!                      bit 2 upper button, bit 5 in range
//! [2..4] X           – u16 LE
//! [4..6] Y           – u16 LE
//! [6..8] pressure    – u16 LE
//! ```
//! Reports shorter than 10 bytes or with an unrecognized id are not
//! errors: the tablet interleaves other report kinds on the same
//! endpoint, so the parser drops them silently and the loop moves on.

/// Minimum byte length of a usable stylus report.
pub const MIN_REPORT_LEN: usize = 10;

/// Primary stylus report id.
pub const REPORT_ID_STYLUS: u8 = 0x10;
/// Alternate stylus report id seen on some firmware revisions.
pub const REPORT_ID_STYLUS_ALT: u8 = 0x02;

const STATUS_TIP: u8 = 0x01;
const STATUS_BUTTON1: u8 = 0x02;
const STATUS_BUTTON2: u8 = 0x04;
const STATUS_IN_RANGE: u8 = 0x20;

/// One decoded stylus sample.
///
/// Ephemeral: produced per report, consumed by the state machine, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylusReport {
    /// Pen detected near the sensor surface (hovering or touching).
    pub in_range: bool,
    /// Nib contact switch.
    pub tip_switch: bool,
    /// Lower barrel button.
    pub button1: bool,
    /// Upper barrel button.
    pub button2: bool,
    pub x: u16,
    pub y: u16,
    pub pressure: u16,
}

/// Decodes one raw interrupt buffer into a [`StylusReport`].
///
/// Returns `None` for buffers that are too short or carry a non-stylus
/// report id; this is the silent-drop path, not a failure.
pub fn parse_report(data: &[u8]) -> Option<StylusReport> {
    if data.len() < MIN_REPORT_LEN {
        return None;
    }
    if data[0] != REPORT_ID_STYLUS && data[0] != REPORT_ID_STYLUS_ALT {
        return None;
    }

    let status = data[1];
    Some(StylusReport {
        in_range: status & STATUS_IN_RANGE != 0,
        tip_switch: status & STATUS_TIP != 0,
        button1: status & STATUS_BUTTON1 != 0,
        button2: status & STATUS_BUTTON2 != 0,
        x: u16::from_le_bytes([data[2], data[3]]),
        y: u16::from_le_bytes([data[4], data[5]]),
        pressure: u16::from_le_bytes([data[6], data[7]]),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
