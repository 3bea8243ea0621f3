//! Immutable driver configuration.
//!
//! The driver has no config file and no CLI surface: the CTL-480 geometry,
//! the target screen size, the pressure curve, and the virtual device
//! identity are fixed at startup. They still live in one explicit value
//! rather than scattered constants so every component receives the same
//! validated numbers by reference.

use thiserror::Error;

/// Error type for configuration validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The pressure dead-zone offset leaves no usable input range.
    /// Shaping divides by `max_pressure - offset`, so this is fatal.
    #[error("pressure offset {offset} must be below the hardware max {max}")]
    PressureOffsetTooHigh { offset: u16, max: u16 },

    /// The easing exponent must be positive; the shaper raises to `1/easing`.
    #[error("pressure easing exponent must be positive, got {0}")]
    NonPositiveEasing(f64),

    /// A tablet axis with zero extent cannot be mapped.
    #[error("tablet geometry has a zero-extent axis")]
    ZeroTabletAxis,
}

/// Coordinate and pressure ranges reported by the tablet hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabletGeometry {
    /// Maximum raw X coordinate (CTL-480: 15200).
    pub max_x: u16,
    /// Maximum raw Y coordinate (CTL-480: 9500).
    pub max_y: u16,
    /// Maximum raw pressure (CTL-480: 2047).
    pub max_pressure: u16,
}

/// Target display dimensions the virtual stylus maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: i32,
    pub height: i32,
}

/// Parameters of the inverse-power pressure curve (see [`crate::pressure`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureCurve {
    /// Easing exponent; above 1.0 makes maximum pressure easier to reach.
    pub easing: f64,
    /// Raw values at or below this are treated as no touch.
    pub offset: u16,
    /// Minimum output once a touch registers, so light strokes still paint.
    pub clamp_min: i32,
}

/// Identity the virtual device announces to the input subsystem.
///
/// Vendor and product double as the USB ids the transport searches for:
/// the virtual pen deliberately presents itself as the physical tablet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: String,
    pub bus: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Top-level driver configuration, constructed once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub tablet: TabletGeometry,
    pub screen: ScreenGeometry,
    pub curve: PressureCurve,
    pub identity: DeviceIdentity,
}

impl Default for DriverConfig {
    /// CTL-480 tablet feeding a 2048×1536 display.
    fn default() -> Self {
        Self {
            tablet: TabletGeometry {
                max_x: 15200,
                max_y: 9500,
                max_pressure: 2047,
            },
            screen: ScreenGeometry {
                width: 2048,
                height: 1536,
            },
            curve: PressureCurve {
                easing: 1.8,
                offset: 50,
                clamp_min: 100,
            },
            identity: DeviceIdentity {
                name: "Wacom CTL-480 Userspace".to_string(),
                bus: crate::wire::BUS_USB,
                vendor: 0x056a,
                product: 0x030e,
                version: 1,
            },
        }
    }
}

impl DriverConfig {
    /// Checks the invariants the pipeline relies on.
    ///
    /// Called once before the polling loop starts; any error here is a
    /// fatal startup error, not something to skip at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the pressure curve would divide by zero
    /// or a tablet axis has no extent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tablet.max_x == 0 || self.tablet.max_y == 0 {
            return Err(ConfigError::ZeroTabletAxis);
        }
        if self.curve.offset >= self.tablet.max_pressure {
            return Err(ConfigError::PressureOffsetTooHigh {
                offset: self.curve.offset,
                max: self.tablet.max_pressure,
            });
        }
        if self.curve.easing <= 0.0 {
            return Err(ConfigError::NonPositiveEasing(self.curve.easing));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
