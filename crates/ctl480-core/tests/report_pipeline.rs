//! Integration tests for the pure signal path: raw report bytes through
//! the parser, coordinate mapper, and pressure shaper together, using the
//! default CTL-480 configuration.

use ctl480_core::{map_axis, parse_report, shape, DriverConfig};

/// Builds a stylus report with the given status byte and axis values.
fn raw_report(status: u8, x: u16, y: u16, pressure: u16) -> [u8; 10] {
    let mut buf = [0u8; 10];
    buf[0] = 0x10;
    buf[1] = status;
    buf[2..4].copy_from_slice(&x.to_le_bytes());
    buf[4..6].copy_from_slice(&y.to_le_bytes());
    buf[6..8].copy_from_slice(&pressure.to_le_bytes());
    buf
}

#[test]
fn test_known_sample_maps_to_expected_screen_position() {
    let config = DriverConfig::default();
    config.validate().expect("default config must validate");

    // In range, tip down, centre of the tablet, medium pressure.
    let report = parse_report(&raw_report(0x21, 7600, 4750, 1100)).unwrap();
    assert!(report.in_range);
    assert!(report.tip_switch);

    let screen_x = map_axis(report.x, config.tablet.max_x, config.screen.width);
    let screen_y = map_axis(report.y, config.tablet.max_y, config.screen.height);
    assert_eq!((screen_x, screen_y), (1024, 768));

    let pressure = shape(report.pressure, &config.curve, config.tablet.max_pressure);
    assert!(
        pressure > config.curve.clamp_min && pressure < i32::from(config.tablet.max_pressure),
        "shaped pressure {pressure} must land strictly inside the range"
    );
}

#[test]
fn test_corner_samples_stay_inside_the_declared_axes() {
    let config = DriverConfig::default();

    for (x, y) in [(0, 0), (u16::MAX, u16::MAX), (15200, 9500)] {
        let report = parse_report(&raw_report(0x20, x, y, 0)).unwrap();
        let screen_x = map_axis(report.x, config.tablet.max_x, config.screen.width);
        let screen_y = map_axis(report.y, config.tablet.max_y, config.screen.height);

        assert!((0..=config.screen.width).contains(&screen_x));
        assert!((0..=config.screen.height).contains(&screen_y));
    }
}

#[test]
fn test_hover_sample_shapes_to_zero_pressure() {
    let config = DriverConfig::default();

    // Hovering in range: pressure inside the dead zone.
    let report = parse_report(&raw_report(0x20, 100, 100, 30)).unwrap();
    assert!(!report.tip_switch);
    assert_eq!(
        shape(report.pressure, &config.curve, config.tablet.max_pressure),
        0
    );
}
