//! Virtual pen over `/dev/uinput`.
//!
//! Implements the legacy two-phase uinput protocol:
//!
//! 1. **Registration** – declare the event types, key codes, and
//!    absolute axes the pen will produce, write the encoded
//!    `uinput_user_dev` descriptor, then `UI_DEV_CREATE`. Consumers need
//!    a moment to pick the new node up, so creation ends with a short
//!    settle delay. Any failure here aborts startup.
//!
//! 2. **Runtime** – each [`EventSink::emit`] writes one encoded
//!    `input_event`; [`EventSink::commit`] writes the `SYN_REPORT`
//!    marker.
//!
//! Teardown is best-effort in `Drop`: `UI_DEV_DESTROY` is attempted and
//! a failure is logged, never escalated, so the rest of cleanup still
//! runs.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::thread;
use std::time::Duration;

use ctl480_core::wire::{
    InputEventRecord, PenDescriptor, WireError, ABS_PRESSURE, ABS_X, ABS_Y, BTN_STYLUS,
    BTN_STYLUS2, BTN_TOOL_PEN, BTN_TOUCH, EV_ABS, EV_KEY, EV_SYN, KEY_LEFTCTRL, KEY_Y, KEY_Z,
    SYN_REPORT, UI_DEV_CREATE, UI_DEV_DESTROY, UI_SET_ABSBIT, UI_SET_EVBIT, UI_SET_KEYBIT,
};
use ctl480_core::DriverConfig;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::translate::{EventSink, SinkError};

const UINPUT_PATH: &str = "/dev/uinput";

/// Grace period after `UI_DEV_CREATE` before consumers see the node.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Errors raised while creating or driving the virtual device.
#[derive(Debug, Error)]
pub enum UinputError {
    /// `/dev/uinput` could not be opened; missing privilege or missing
    /// kernel support.
    #[error("failed to open {path}: {source}")]
    Open {
        path: &'static str,
        source: io::Error,
    },

    /// A registration ioctl was rejected.
    #[error("ioctl {name} failed: {source}")]
    Ioctl {
        name: &'static str,
        source: io::Error,
    },

    /// The capability descriptor could not be written.
    #[error("descriptor write failed: {0}")]
    DescriptorWrite(#[source] io::Error),

    /// The descriptor could not be encoded.
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// The virtual stylus device handle.
pub struct UinputPen {
    file: File,
}

impl UinputPen {
    /// Runs the full registration phase and returns the live device.
    ///
    /// # Errors
    ///
    /// Returns [`UinputError`] on any registration step failure; all are
    /// fatal startup errors.
    pub fn create(config: &DriverConfig) -> Result<Self, UinputError> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(UINPUT_PATH)
            .map_err(|source| UinputError::Open {
                path: UINPUT_PATH,
                source,
            })?;

        let pen = Self { file };

        // Event type support.
        for kind in [EV_SYN, EV_KEY, EV_ABS] {
            pen.ioctl("UI_SET_EVBIT", UI_SET_EVBIT, u64::from(kind))?;
        }

        // Stylus keys plus the hotkey codes the injector produces.
        for key in [
            BTN_TOUCH,
            BTN_STYLUS,
            BTN_STYLUS2,
            BTN_TOOL_PEN,
            KEY_LEFTCTRL,
            KEY_Z,
            KEY_Y,
        ] {
            pen.ioctl("UI_SET_KEYBIT", UI_SET_KEYBIT, u64::from(key))?;
        }

        // Absolute axes.
        for axis in [ABS_X, ABS_Y, ABS_PRESSURE] {
            pen.ioctl("UI_SET_ABSBIT", UI_SET_ABSBIT, u64::from(axis))?;
        }

        // One structured descriptor write, then activation.
        let descriptor = PenDescriptor::from_config(config).encode()?;
        (&pen.file)
            .write_all(&descriptor)
            .map_err(UinputError::DescriptorWrite)?;

        pen.ioctl("UI_DEV_CREATE", UI_DEV_CREATE, 0)?;
        thread::sleep(SETTLE_DELAY);
        info!(name = %config.identity.name, "virtual stylus device created");

        Ok(pen)
    }

    fn ioctl(&self, name: &'static str, request: u64, value: u64) -> Result<(), UinputError> {
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                request as libc::c_ulong,
                value as libc::c_ulong,
            )
        };
        if rc < 0 {
            return Err(UinputError::Ioctl {
                name,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    fn write_record(&mut self, record: InputEventRecord) -> Result<(), SinkError> {
        self.file.write_all(&record.encode())?;
        Ok(())
    }
}

impl EventSink for UinputPen {
    fn emit(&mut self, kind: u16, code: u16, value: i32) -> Result<(), SinkError> {
        self.write_record(InputEventRecord::now(kind, code, value))
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.write_record(InputEventRecord::now(EV_SYN, SYN_REPORT, 0))
    }
}

impl Drop for UinputPen {
    fn drop(&mut self) {
        match self.ioctl("UI_DEV_DESTROY", UI_DEV_DESTROY, 0) {
            Ok(()) => info!("virtual stylus device destroyed"),
            Err(error) => warn!(%error, "failed to destroy virtual device"),
        }
        // The fd itself closes when `file` drops.
    }
}
