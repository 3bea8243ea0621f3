//! Integration tests for the full translation pipeline.
//!
//! These tests exercise the driver end-to-end short of the kernel: raw
//! report bytes through `parse_report` into `TranslateReportUseCase`
//! with the recording sink standing in for `/dev/uinput`.

use ctl480_core::wire::{
    ABS_PRESSURE, ABS_X, ABS_Y, BTN_STYLUS, BTN_STYLUS2, BTN_TOOL_PEN, BTN_TOUCH, EV_ABS, EV_KEY,
    EV_SYN, KEY_Y, KEY_Z, SYN_REPORT,
};
use ctl480_core::{parse_report, DriverConfig};
use ctl480_driver::application::translate::TranslateReportUseCase;
use ctl480_driver::infrastructure::mock::RecordingSink;

/// Builds a stylus report buffer from semantic fields.
fn raw_report(in_range: bool, tip: bool, btn1: bool, btn2: bool, x: u16, y: u16, p: u16) -> [u8; 10] {
    let mut status = 0u8;
    if tip {
        status |= 0x01;
    }
    if btn1 {
        status |= 0x02;
    }
    if btn2 {
        status |= 0x04;
    }
    if in_range {
        status |= 0x20;
    }

    let mut buf = [0u8; 10];
    buf[0] = 0x10;
    buf[1] = status;
    buf[2..4].copy_from_slice(&x.to_le_bytes());
    buf[4..6].copy_from_slice(&y.to_le_bytes());
    buf[6..8].copy_from_slice(&p.to_le_bytes());
    buf
}

fn make_use_case() -> TranslateReportUseCase<RecordingSink> {
    TranslateReportUseCase::new(DriverConfig::default(), RecordingSink::new())
}

fn feed(uc: &mut TranslateReportUseCase<RecordingSink>, bytes: &[u8]) {
    if let Some(report) = parse_report(bytes) {
        uc.handle_report(&report).expect("sink must accept events");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_stroke_from_raw_bytes_lands_on_screen() {
    let mut uc = make_use_case();

    // Pen approaches, touches at the centre, lifts, leaves.
    feed(&mut uc, &raw_report(true, false, false, false, 7600, 4750, 0));
    feed(&mut uc, &raw_report(true, true, false, false, 7600, 4750, 1100));
    feed(&mut uc, &raw_report(true, false, false, false, 7600, 4750, 0));
    feed(&mut uc, &raw_report(false, false, false, false, 0, 0, 0));

    let sink = uc.sink();
    assert_eq!(sink.count(EV_KEY, BTN_TOOL_PEN, 1), 1);
    assert_eq!(sink.count(EV_KEY, BTN_TOOL_PEN, 0), 1);
    assert_eq!(sink.count(EV_ABS, ABS_X, 1024), 3);
    assert_eq!(sink.count(EV_ABS, ABS_Y, 768), 3);
    assert_eq!(sink.count(EV_KEY, BTN_TOUCH, 1), 1);

    // Touch sample carries shaped pressure inside the open interval.
    let touch_pressure = sink
        .events()
        .iter()
        .find(|&&(kind, code, value)| kind == EV_ABS && code == ABS_PRESSURE && value > 0)
        .map(|&(_, _, value)| value)
        .expect("touch sample must emit nonzero pressure");
    assert!(touch_pressure > 100 && touch_pressure < 2047);
}

#[test]
fn test_unrecognized_reports_leave_no_trace() {
    let mut uc = make_use_case();

    feed(&mut uc, &[0x07; 16]); // wrong report id
    feed(&mut uc, &[0x10, 0x20]); // too short

    assert!(uc.sink().events().is_empty());
}

#[test]
fn test_hotkey_edges_from_raw_byte_sequence() {
    let mut uc = make_use_case();
    feed(&mut uc, &raw_report(true, false, false, false, 100, 100, 0));

    // button1: false, true, true, false, true → exactly two undo chords
    for btn1 in [false, true, true, false, true] {
        feed(&mut uc, &raw_report(true, false, btn1, false, 100, 100, 0));
    }

    assert_eq!(uc.sink().count(EV_KEY, KEY_Z, 1), 2);
    assert_eq!(uc.sink().count(EV_KEY, KEY_Y, 1), 0);
}

#[test]
fn test_proximity_loss_with_stuck_buttons_releases_everything() {
    let mut uc = make_use_case();

    // Engaged with both buttons held.
    feed(&mut uc, &raw_report(true, true, true, true, 5000, 5000, 800));
    // The vanishing sample still reports the buttons as held.
    feed(&mut uc, &raw_report(false, true, true, true, 5000, 5000, 800));

    let events = uc.sink().events();
    let tail = &events[events.len() - 7..];
    assert_eq!(
        tail,
        &[
            (EV_KEY, BTN_TOOL_PEN, 0),
            (EV_SYN, SYN_REPORT, 0),
            (EV_ABS, ABS_PRESSURE, 0),
            (EV_KEY, BTN_TOUCH, 0),
            (EV_KEY, BTN_STYLUS, 0),
            (EV_KEY, BTN_STYLUS2, 0),
            (EV_SYN, SYN_REPORT, 0),
        ]
    );
}

#[test]
fn test_every_processed_sample_ends_with_a_commit() {
    let mut uc = make_use_case();

    feed(&mut uc, &raw_report(true, false, false, false, 0, 0, 0));
    feed(&mut uc, &raw_report(true, true, false, false, 200, 300, 500));
    feed(&mut uc, &raw_report(false, false, false, false, 0, 0, 0));

    let events = uc.sink().events();
    assert_eq!(*events.last().unwrap(), (EV_SYN, SYN_REPORT, 0));
    // Three samples: two carry a proximity transition (extra commit each).
    assert_eq!(uc.sink().commits(), 5);
}
