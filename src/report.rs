//! Read-only snapshots of a simulation for display
//!
//! Nothing here mutates the engine; a front-end builds a [`Report`] after
//! each drop and renders it however it likes.

use std::f64::consts::PI;

use serde::Serialize;

use crate::sim::{EstimateSample, NeedleSimulation, Stick};

/// Spread of realized stick lengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthStats {
    pub min: f64,
    pub max: f64,
    /// `max - min`
    pub spread: f64,
}

impl LengthStats {
    /// `None` for an empty slice
    pub fn from_sticks(sticks: &[Stick]) -> Option<Self> {
        let mut lengths = sticks.iter().map(Stick::length);
        let first = lengths.next()?;
        let (min, max) = lengths.fold((first, first), |(lo, hi), len| (lo.min(len), hi.max(len)));
        Some(Self {
            min,
            max,
            spread: max - min,
        })
    }
}

/// Live counters of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_sticks: u64,
    pub total_crosses: u64,
    pub pi_estimate: Option<f64>,
    /// Absolute distance from π
    pub abs_error: Option<f64>,
    pub length_stats: Option<LengthStats>,
    /// Number of convergence samples recorded so far
    pub history_len: usize,
}

impl Report {
    pub fn from_simulation(sim: &NeedleSimulation) -> Self {
        let pi_estimate = sim.estimate_pi();
        Self {
            total_sticks: sim.total_stick_count(),
            total_crosses: sim.total_cross_count(),
            pi_estimate,
            abs_error: pi_estimate.map(|est| (est - PI).abs()),
            length_stats: LengthStats::from_sticks(sim.sticks()),
            history_len: sim.pi_estimate_history().len(),
        }
    }

    /// Counters as a single line of text
    pub fn status_line(&self) -> String {
        let estimate = match (self.total_sticks, self.pi_estimate, self.abs_error) {
            (0, _, _) => "Estimated π: ---".to_string(),
            (_, Some(est), Some(err)) => format!("Estimated π: {est:.6} (error {err:.6})"),
            _ => "Estimated π: No crosses yet".to_string(),
        };
        format!(
            "Total Sticks: {} | Line Crosses: {} | {}",
            self.total_sticks, self.total_crosses, estimate
        )
    }
}

/// Upper x-axis bound for plotting convergence after `max_sticks` drops
pub fn convergence_x_limit(max_sticks: u64) -> f64 {
    match max_sticks {
        0..=100 => 100.0,
        101..=1000 => 1000.0,
        n => n as f64 * 1.1,
    }
}

/// Y-axis bounds for the convergence plot: the estimate range widened to
/// include at least π ± 0.5. `None` until the history has a sample.
pub fn convergence_y_limits(history: &[EstimateSample]) -> Option<(f64, f64)> {
    let first = history.first()?.pi_estimate;
    let (lo, hi) = history
        .iter()
        .map(|s| s.pi_estimate)
        .fold((first, first), |(lo, hi), est| (lo.min(est), hi.max(est)));
    Some((lo.min(PI - 0.5), hi.max(PI + 0.5)))
}
