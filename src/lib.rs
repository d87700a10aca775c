//! Buffon's Needle - estimating π by dropping sticks on ruled paper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stick geometry, crossing test, estimator)
//! - `report`: Read-only snapshots for whatever displays the simulation
//! - `settings`: Drop area, stick/line dimensions and drop presets

pub mod error;
pub mod report;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use report::{LengthStats, Report};
pub use settings::{DropPreset, Settings, SettingsError};
pub use sim::{EstimateSample, NeedleSimulation, SimulationParameters, SimulationState, Stick};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Distance between adjacent ruled lines
    pub const DEFAULT_LINE_SPACING: f64 = 1.0;
    /// Length of every dropped stick
    pub const DEFAULT_STICK_LENGTH: f64 = 1.0;

    /// Drop area for stick centers
    pub const DEFAULT_X_RANGE: (f64, f64) = (0.0, 10.0);
    pub const DEFAULT_Y_RANGE: (f64, f64) = (0.0, 4.0);

    /// Allowed deviation of a realized stick length from the configured one
    pub const LENGTH_TOLERANCE: f64 = 1e-9;
}

/// Unit vector pointing along angle `theta`
#[inline]
pub fn unit_direction(theta: f64) -> DVec2 {
    DVec2::new(theta.cos(), theta.sin())
}

/// Index of the unit-width vertical band containing `x`
///
/// Lines sit at every integer x, so two points lie on opposite sides of some
/// line exactly when their band indices differ.
#[inline]
pub fn band_index(x: f64) -> i64 {
    x.floor() as i64
}
