//! Errors surfaced by the simulation engine

use std::fmt;

/// Axis a drop range applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Invalid input to the engine. Nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("stick count must be non-negative, got {count}")]
    InvalidCount { count: i64 },

    #[error("{axis} range must satisfy finite min < max, got ({min}, {max})")]
    InvalidRange { axis: Axis, min: f64, max: f64 },

    #[error("{name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
