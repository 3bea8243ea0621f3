//! # ctl480-driver
//!
//! Userspace driver binary for the Wacom CTL-480, split the usual way:
//!
//! - **`application`** – the translate-report state machine and the
//!   hotkey injector. Depends only on the [`application::translate::EventSink`]
//!   trait and `ctl480-core`, so it is fully unit-testable.
//!
//! - **`infrastructure`** – the seams to the outside world: the USB
//!   transport (`rusb`), the `/dev/uinput` virtual pen, and a recording
//!   sink for tests.
//!
//! The binary entry point (`main.rs`) wires the two together and runs
//! the single-threaded polling loop.

pub mod application;
pub mod infrastructure;
