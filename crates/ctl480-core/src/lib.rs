//! # ctl480-core
//!
//! Pure library underneath the Wacom CTL-480 userspace driver: everything
//! that can be computed without touching a file descriptor.
//!
//! - **`report`** – decodes the tablet's fixed-layout stylus reports into
//!   typed [`StylusReport`] samples, silently dropping anything that is
//!   not a stylus report.
//!
//! - **`mapping`** – the linear tablet-to-screen coordinate transform.
//!
//! - **`pressure`** – the inverse-power pressure curve that makes full
//!   pressure easier to reach on the short-travel CTL-480 nib.
//!
//! - **`wire`** – binary codec for the legacy Linux uinput ABI: the
//!   24-byte `input_event` record and the 1116-byte `uinput_user_dev`
//!   descriptor, plus the event/axis/key constants and ioctl request
//!   numbers the driver registers with.
//!
//! - **`config`** – the immutable [`DriverConfig`] built once at startup
//!   and passed by reference into every component.
//!
//! This crate has zero dependencies on OS APIs; the driver binary wires
//! it to USB and `/dev/uinput` in its infrastructure layer.

pub mod config;
pub mod mapping;
pub mod pressure;
pub mod report;
pub mod wire;

pub use config::{ConfigError, DeviceIdentity, DriverConfig, PressureCurve, ScreenGeometry, TabletGeometry};
pub use mapping::map_axis;
pub use pressure::shape;
pub use report::{parse_report, StylusReport};
pub use wire::{InputEventRecord, PenDescriptor, WireError};
