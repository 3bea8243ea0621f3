//! Inverse-power pressure shaping.
//!
//! The CTL-480 nib needs a firm push to report full pressure; painting
//! apps feel better when the top of the range arrives earlier. The curve
//! is concave for easing exponents above 1: normalize the raw value over
//! the post-dead-zone range, raise it to `1/easing`, and scale back to
//! hardware range. Two policy edges are deliberate:
//!
//! - raw values at or below `offset` output 0 (no touch), and
//! - any value past the offset outputs at least `clamp_min`, so the
//!   first registered touch never paints with near-zero pressure.

use crate::config::PressureCurve;

/// Shapes one raw pressure value into the output range `[0, max]`.
///
/// The curve must come from a validated [`crate::DriverConfig`]:
/// `offset < max` is checked at startup, not here.
pub fn shape(raw: u16, curve: &PressureCurve, max: u16) -> i32 {
    if raw <= curve.offset {
        return 0;
    }

    // Raw beyond the hardware max (malformed report) saturates to full scale.
    let span = f64::from(max - curve.offset);
    let normalized = (f64::from(raw - curve.offset) / span).min(1.0);
    let shaped = normalized.powf(1.0 / curve.easing);
    let output = (shaped * f64::from(max)) as i32;
    output.max(curve.clamp_min)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u16 = 2047;

    fn curve() -> PressureCurve {
        PressureCurve {
            easing: 1.8,
            offset: 50,
            clamp_min: 100,
        }
    }

    #[test]
    fn test_zero_and_dead_zone_output_zero() {
        assert_eq!(shape(0, &curve(), MAX), 0);
        assert_eq!(shape(49, &curve(), MAX), 0);
        assert_eq!(shape(50, &curve(), MAX), 0);
    }

    #[test]
    fn test_first_value_past_offset_clamps_up_to_floor() {
        assert_eq!(shape(51, &curve(), MAX), 100);
    }

    #[test]
    fn test_full_raw_pressure_reaches_hardware_max() {
        assert_eq!(shape(MAX, &curve(), MAX), i32::from(MAX));
    }

    #[test]
    fn test_shaping_is_monotone_past_the_offset() {
        let c = curve();
        let mut previous = 0;
        for raw in 51..=MAX {
            let output = shape(raw, &c, MAX);
            assert!(output >= previous, "raw {raw} shaped below its predecessor");
            previous = output;
        }
    }

    #[test]
    fn test_every_touch_meets_the_clamp_floor() {
        let c = curve();
        for raw in 51..=MAX {
            assert!(shape(raw, &c, MAX) >= c.clamp_min, "raw {raw} fell below the floor");
        }
    }

    #[test]
    fn test_concave_curve_outpaces_the_linear_ramp() {
        // With easing > 1 the shaped output is at least the linear value
        // n * max for every raw past the offset.
        let c = curve();
        for raw in (51..=MAX).step_by(61) {
            let n = f64::from(raw - c.offset) / f64::from(MAX - c.offset);
            let linear = (n * f64::from(MAX)) as i32;
            assert!(shape(raw, &c, MAX) >= linear, "raw {raw} below linear ramp");
        }
    }

    #[test]
    fn test_raw_above_hardware_max_saturates() {
        assert_eq!(shape(u16::MAX, &curve(), MAX), i32::from(MAX));
    }

    #[test]
    fn test_mid_pressure_lands_strictly_inside_the_range() {
        let output = shape(1100, &curve(), MAX);
        assert!(output > 100 && output < i32::from(MAX), "got {output}");
    }
}
