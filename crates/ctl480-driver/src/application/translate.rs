//! TranslateReportUseCase: turns decoded stylus reports into virtual
//! device events.
//!
//! This is the edge-triggered state machine at the centre of the driver.
//! It remembers the previous proximity and barrel-button states and, per
//! incoming sample, decides in fixed order:
//!
//! 1. proximity changed → emit the tool-pen transition and commit;
//! 2. in range → emit mapped X/Y, shaped pressure, tip switch, fire a
//!    hotkey on each button press *edge*, mirror both raw button states,
//!    commit;
//! 3. out of range → force pressure and every key to released, commit,
//!    so no stuck state survives a proximity loss even when the release
//!    sample never arrived.
//!
//! The use case depends only on the [`EventSink`] trait; the uinput
//! implementation and the recording test sink both live in the
//! infrastructure layer.

use ctl480_core::wire::{
    ABS_PRESSURE, ABS_X, ABS_Y, BTN_STYLUS, BTN_STYLUS2, BTN_TOOL_PEN, BTN_TOUCH, EV_ABS, EV_KEY,
    KEY_LEFTCTRL, KEY_Y, KEY_Z,
};
use ctl480_core::{map_axis, shape, DriverConfig, StylusReport};
use thiserror::Error;
use tracing::{info, trace};

use super::hotkey;

/// Error type for event sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the virtual device failed.
    #[error("event write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Destination for synthesized events.
///
/// The infrastructure layer implements this over `/dev/uinput`; tests
/// implement it with an in-memory recorder.
pub trait EventSink {
    /// Appends one `(type, code, value)` event to the device stream.
    fn emit(&mut self, kind: u16, code: u16, value: i32) -> Result<(), SinkError>;

    /// Emits the sync marker that commits all events since the last one.
    fn commit(&mut self) -> Result<(), SinkError>;
}

/// Session state carried between samples. Owned exclusively by the use
/// case; reset only by process restart.
#[derive(Debug, Default, Clone, Copy)]
struct TranslateState {
    in_range: bool,
    button1: bool,
    button2: bool,
}

/// The Translate Report use case.
pub struct TranslateReportUseCase<S: EventSink> {
    config: DriverConfig,
    sink: S,
    state: TranslateState,
}

impl<S: EventSink> TranslateReportUseCase<S> {
    /// Creates a new use case writing into `sink`.
    ///
    /// `config` must have been validated; the shaper divides by
    /// `max_pressure - offset`.
    pub fn new(config: DriverConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            state: TranslateState::default(),
        }
    }

    /// Read access to the sink, for tests and teardown logging.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Processes one decoded sample, emitting and committing all events
    /// for it before returning.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the virtual device rejects a write; the
    /// caller treats that as fatal.
    pub fn handle_report(&mut self, report: &StylusReport) -> Result<(), SinkError> {
        if report.in_range != self.state.in_range {
            self.sink
                .emit(EV_KEY, BTN_TOOL_PEN, i32::from(report.in_range))?;
            self.state.in_range = report.in_range;
            info!(
                in_range = report.in_range,
                "stylus {}",
                if report.in_range { "in range" } else { "out of range" }
            );
            self.sink.commit()?;
        }

        if self.state.in_range {
            self.handle_in_range(report)
        } else {
            self.release_all()
        }
    }

    fn handle_in_range(&mut self, report: &StylusReport) -> Result<(), SinkError> {
        let screen_x = map_axis(report.x, self.config.tablet.max_x, self.config.screen.width);
        let screen_y = map_axis(report.y, self.config.tablet.max_y, self.config.screen.height);
        self.sink.emit(EV_ABS, ABS_X, screen_x)?;
        self.sink.emit(EV_ABS, ABS_Y, screen_y)?;

        let pressure = shape(
            report.pressure,
            &self.config.curve,
            self.config.tablet.max_pressure,
        );
        self.sink.emit(EV_ABS, ABS_PRESSURE, pressure)?;

        self.sink
            .emit(EV_KEY, BTN_TOUCH, i32::from(report.tip_switch))?;

        // Lower button: undo. Upper button: redo. Press edges only.
        if report.button1 && !self.state.button1 {
            trace!("button1 press edge: sending undo chord");
            hotkey::send_combo(&mut self.sink, KEY_LEFTCTRL, KEY_Z)?;
        }
        if report.button2 && !self.state.button2 {
            trace!("button2 press edge: sending redo chord");
            hotkey::send_combo(&mut self.sink, KEY_LEFTCTRL, KEY_Y)?;
        }
        self.state.button1 = report.button1;
        self.state.button2 = report.button2;

        // The raw button states are mirrored every sample regardless of
        // edges, for consumers that read the stylus buttons directly.
        self.sink
            .emit(EV_KEY, BTN_STYLUS, i32::from(report.button1))?;
        self.sink
            .emit(EV_KEY, BTN_STYLUS2, i32::from(report.button2))?;

        self.sink.commit()
    }

    fn release_all(&mut self) -> Result<(), SinkError> {
        self.sink.emit(EV_ABS, ABS_PRESSURE, 0)?;
        self.sink.emit(EV_KEY, BTN_TOUCH, 0)?;
        self.sink.emit(EV_KEY, BTN_STYLUS, 0)?;
        self.sink.emit(EV_KEY, BTN_STYLUS2, 0)?;
        self.sink.commit()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
