//! Tablet-to-screen coordinate mapping.
//!
//! One linear transform per axis, truncating toward zero. The clamp's
//! upper bound is `target_max` itself, one past the last pixel; known
//! consumers tolerate it and the driver reproduces the observed behavior
//! bit for bit rather than quietly "fixing" it.

/// Maps one raw tablet axis value onto the target screen axis.
///
/// `screen = clamp(0, target_max, floor(raw / tablet_max * target_max))`.
/// Raw values beyond `tablet_max` clamp to `target_max`.
pub fn map_axis(raw: u16, tablet_max: u16, target_max: i32) -> i32 {
    let scaled = (f64::from(raw) / f64::from(tablet_max)) * f64::from(target_max);
    (scaled as i32).clamp(0, target_max)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
