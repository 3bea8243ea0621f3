pub mod hotkey;
pub mod translate;

pub use translate::{EventSink, SinkError, TranslateReportUseCase};
