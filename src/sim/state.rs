//! Simulation state and core data types
//!
//! Everything the engine accumulates between resets lives here.

use serde::Serialize;

use super::stick::Stick;
use crate::consts::*;
use crate::error::SimError;

/// Stick and line dimensions, fixed for the lifetime of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    /// Distance between adjacent ruled lines
    line_spacing: f64,
    /// Length of every dropped stick
    stick_length: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            stick_length: DEFAULT_STICK_LENGTH,
        }
    }
}

impl SimulationParameters {
    pub fn new(line_spacing: f64, stick_length: f64) -> Result<Self, SimError> {
        check_positive("line_spacing", line_spacing)?;
        check_positive("stick_length", stick_length)?;
        Ok(Self {
            line_spacing,
            stick_length,
        })
    }

    #[inline]
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    #[inline]
    pub fn stick_length(&self) -> f64 {
        self.stick_length
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// One point on the convergence curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimateSample {
    /// Total sticks dropped when the sample was taken
    pub stick_count: u64,
    pub pi_estimate: f64,
}

/// Accumulated results since construction or the last reset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationState {
    /// Dropped sticks in drop order
    pub(crate) sticks: Vec<Stick>,
    pub(crate) total_stick_count: u64,
    pub(crate) total_cross_count: u64,
    /// One sample per drop call that left a usable estimate
    pub(crate) pi_estimate_history: Vec<EstimateSample>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn total_stick_count(&self) -> u64 {
        self.total_stick_count
    }

    pub fn total_cross_count(&self) -> u64 {
        self.total_cross_count
    }

    pub fn pi_estimate_history(&self) -> &[EstimateSample] {
        &self.pi_estimate_history
    }

    /// True when nothing has been dropped since the last reset
    pub fn is_empty(&self) -> bool {
        self.total_stick_count == 0
    }

    /// Append a stick and update the counters
    pub(crate) fn record(&mut self, stick: Stick) {
        if stick.crosses_line() {
            self.total_cross_count += 1;
        }
        self.total_stick_count += 1;
        self.sticks.push(stick);
    }

    /// Buffon estimator `2·L·n / (d·c)`; `None` until a stick has crossed
    pub fn estimate_pi(&self, params: &SimulationParameters) -> Option<f64> {
        if self.total_cross_count == 0 {
            return None;
        }
        let estimate = (2.0 * params.stick_length() * self.total_stick_count as f64)
            / (params.line_spacing() * self.total_cross_count as f64);
        estimate.is_finite().then_some(estimate)
    }

    /// Push the current estimate onto the convergence history, if there is one
    pub(crate) fn sample_estimate(&mut self, params: &SimulationParameters) {
        if let Some(pi_estimate) = self.estimate_pi(params) {
            self.pi_estimate_history.push(EstimateSample {
                stick_count: self.total_stick_count,
                pi_estimate,
            });
        }
    }

    pub(crate) fn clear(&mut self) {
        self.sticks.clear();
        self.total_stick_count = 0;
        self.total_cross_count = 0;
        self.pi_estimate_history.clear();
    }
}
