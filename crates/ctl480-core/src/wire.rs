//! Binary codec for the legacy Linux uinput ABI.
//!
//! Two kernel structures are serialized by hand so the write sites stay
//! trivial and the layout is testable without a device:
//!
//! `input_event` (24 bytes on 64-bit Linux, all fields little-endian):
//! ```text
//! [tv_sec:8][tv_usec:8][type:2][code:2][value:4]
//! ```
//!
//! `uinput_user_dev` (1116 bytes, the pre-4.5 registration interface):
//! ```text
//! [name:80][id:4×2][ff_effects_max:4][absmax:64×4][absmin:64×4][absfuzz:64×4][absflat:64×4]
//! ```
//! `id` is `(bustype, vendor, product, version)`; the four abs tables are
//! indexed by axis code up to `ABS_CNT`.
//!
//! Timestamps use the C `long` pair of `struct timeval`; this codec fixes
//! them at 8 bytes each and therefore assumes a 64-bit kernel, which is
//! the only target the driver supports.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::config::DriverConfig;

// ── Event types and codes ─────────────────────────────────────────────────────

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;

pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_STYLUS: u16 = 0x14b;
pub const BTN_STYLUS2: u16 = 0x14c;

pub const KEY_LEFTCTRL: u16 = 0x1d;
pub const KEY_Z: u16 = 0x2c;
pub const KEY_Y: u16 = 0x15;

pub const BUS_USB: u16 = 0x03;

/// Number of entries in each per-axis table (`ABS_MAX + 1`).
pub const ABS_CNT: usize = 0x40;

// ── ioctl request numbers ─────────────────────────────────────────────────────

pub const UI_SET_EVBIT: u64 = 0x4004_5564;
pub const UI_SET_KEYBIT: u64 = 0x4004_5565;
pub const UI_SET_ABSBIT: u64 = 0x4004_5567;
pub const UI_DEV_CREATE: u64 = 0x5501;
pub const UI_DEV_DESTROY: u64 = 0x5502;

// ── Sizes and offsets ─────────────────────────────────────────────────────────

/// Encoded size of one `input_event` record.
pub const INPUT_EVENT_SIZE: usize = 24;

/// Fixed width of the device name field, terminating NUL included.
pub const DEVICE_NAME_LEN: usize = 80;

/// Encoded size of the full `uinput_user_dev` descriptor.
pub const UINPUT_USER_DEV_SIZE: usize = DEVICE_NAME_LEN + 4 * 2 + 4 + 4 * 4 * ABS_CNT;

const ID_OFFSET: usize = DEVICE_NAME_LEN;
const ABSMAX_OFFSET: usize = ID_OFFSET + 4 * 2 + 4;
const ABSMIN_OFFSET: usize = ABSMAX_OFFSET + 4 * ABS_CNT;
const ABSFUZZ_OFFSET: usize = ABSMIN_OFFSET + 4 * ABS_CNT;
const ABSFLAT_OFFSET: usize = ABSFUZZ_OFFSET + 4 * ABS_CNT;

/// Errors that can occur while encoding or decoding uinput records.
#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    /// The byte slice is shorter than one full record.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The device name does not fit the fixed 80-byte field.
    #[error("device name too long: {len} bytes, limit is {limit}")]
    NameTooLong { len: usize, limit: usize },
}

// ── input_event ───────────────────────────────────────────────────────────────

/// One timestamped `(type, code, value)` record for the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEventRecord {
    pub tv_sec: i64,
    pub tv_usec: i64,
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEventRecord {
    /// Builds a record stamped with the current system time.
    pub fn now(kind: u16, code: u16, value: i32) -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            tv_sec: elapsed.as_secs() as i64,
            tv_usec: i64::from(elapsed.subsec_micros()),
            kind,
            code,
            value,
        }
    }

    /// Encodes the record into the kernel's `input_event` layout.
    pub fn encode(&self) -> [u8; INPUT_EVENT_SIZE] {
        let mut buf = [0u8; INPUT_EVENT_SIZE];
        buf[0..8].copy_from_slice(&self.tv_sec.to_le_bytes());
        buf[8..16].copy_from_slice(&self.tv_usec.to_le_bytes());
        buf[16..18].copy_from_slice(&self.kind.to_le_bytes());
        buf[18..20].copy_from_slice(&self.code.to_le_bytes());
        buf[20..24].copy_from_slice(&self.value.to_le_bytes());
        buf
    }

    /// Decodes one record from the beginning of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InsufficientData`] if fewer than
    /// [`INPUT_EVENT_SIZE`] bytes are available.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < INPUT_EVENT_SIZE {
            return Err(WireError::InsufficientData {
                needed: INPUT_EVENT_SIZE,
                available: bytes.len(),
            });
        }
        Ok(Self {
            tv_sec: i64::from_le_bytes(bytes[0..8].try_into().unwrap()),
            tv_usec: i64::from_le_bytes(bytes[8..16].try_into().unwrap()),
            kind: u16::from_le_bytes([bytes[16], bytes[17]]),
            code: u16::from_le_bytes([bytes[18], bytes[19]]),
            value: i32::from_le_bytes(bytes[20..24].try_into().unwrap()),
        })
    }
}

// ── uinput_user_dev ───────────────────────────────────────────────────────────

/// Range declaration for one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSetup {
    pub min: i32,
    pub max: i32,
    pub fuzz: i32,
    pub flat: i32,
}

impl AxisSetup {
    /// A plain `0..=max` axis with no fuzz or flat zone.
    pub fn range(max: i32) -> Self {
        Self {
            min: 0,
            max,
            fuzz: 0,
            flat: 0,
        }
    }
}

/// The virtual pen's capability descriptor, submitted to the kernel once
/// before `UI_DEV_CREATE`.
#[derive(Debug, Clone, PartialEq)]
pub struct PenDescriptor {
    pub name: String,
    pub bus: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
    pub abs_x: AxisSetup,
    pub abs_y: AxisSetup,
    pub abs_pressure: AxisSetup,
}

impl PenDescriptor {
    /// Builds the descriptor for the configured tablet/screen pairing.
    ///
    /// X and Y are declared in *screen* range because the driver maps
    /// coordinates before emission; pressure stays in hardware range.
    pub fn from_config(config: &DriverConfig) -> Self {
        Self {
            name: config.identity.name.clone(),
            bus: config.identity.bus,
            vendor: config.identity.vendor,
            product: config.identity.product,
            version: config.identity.version,
            abs_x: AxisSetup::range(config.screen.width),
            abs_y: AxisSetup::range(config.screen.height),
            abs_pressure: AxisSetup::range(i32::from(config.tablet.max_pressure)),
        }
    }

    /// Encodes the descriptor into the `uinput_user_dev` layout.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::NameTooLong`] if the device name cannot fit
    /// the 80-byte field with its terminating NUL.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let name = self.name.as_bytes();
        if name.len() >= DEVICE_NAME_LEN {
            return Err(WireError::NameTooLong {
                len: name.len(),
                limit: DEVICE_NAME_LEN - 1,
            });
        }

        let mut buf = vec![0u8; UINPUT_USER_DEV_SIZE];
        buf[..name.len()].copy_from_slice(name);

        buf[ID_OFFSET..ID_OFFSET + 2].copy_from_slice(&self.bus.to_le_bytes());
        buf[ID_OFFSET + 2..ID_OFFSET + 4].copy_from_slice(&self.vendor.to_le_bytes());
        buf[ID_OFFSET + 4..ID_OFFSET + 6].copy_from_slice(&self.product.to_le_bytes());
        buf[ID_OFFSET + 6..ID_OFFSET + 8].copy_from_slice(&self.version.to_le_bytes());
        // ff_effects_max stays zero: the pen has no force feedback.

        for (axis, setup) in [
            (ABS_X, self.abs_x),
            (ABS_Y, self.abs_y),
            (ABS_PRESSURE, self.abs_pressure),
        ] {
            write_axis_entry(&mut buf, ABSMAX_OFFSET, axis, setup.max);
            write_axis_entry(&mut buf, ABSMIN_OFFSET, axis, setup.min);
            write_axis_entry(&mut buf, ABSFUZZ_OFFSET, axis, setup.fuzz);
            write_axis_entry(&mut buf, ABSFLAT_OFFSET, axis, setup.flat);
        }

        Ok(buf)
    }
}

fn write_axis_entry(buf: &mut [u8], table_offset: usize, axis: u16, value: i32) {
    let at = table_offset + 4 * usize::from(axis);
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

// ── Tests ─────────────────────────────────────────────────────────────────────
