//! Deterministic simulation module
//!
//! All needle-dropping logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Drop order is insertion order
//! - No rendering or platform dependencies

pub mod engine;
pub mod state;
pub mod stick;

pub use engine::NeedleSimulation;
pub use state::{EstimateSample, SimulationParameters, SimulationState};
pub use stick::Stick;
