//! Prints the shaped pressure curve as a table, for eyeballing easing
//! parameter changes before plugging the tablet in.
//!
//! ```text
//! cargo run -p ctl480-core --example pressure_curve
//! ```

use ctl480_core::{shape, DriverConfig};

fn main() {
    let config = DriverConfig::default();
    let max = config.tablet.max_pressure;

    println!(
        "easing {} | offset {} | clamp floor {}",
        config.curve.easing, config.curve.offset, config.curve.clamp_min
    );
    println!("{:>6} {:>6} {:>7}", "raw", "out", "linear");

    for raw in (0..=max).step_by(128).chain(std::iter::once(max)) {
        let out = shape(raw, &config.curve, max);
        let linear = i32::from(raw);
        println!("{raw:>6} {out:>6} {linear:>7}");
    }
}
