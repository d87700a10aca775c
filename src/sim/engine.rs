//! Needle-dropping engine
//!
//! Owns the parameters, the seeded random stream and the accumulated state.
//! Every drop call either fully applies or leaves the state untouched.

use std::f64::consts::PI;

use glam::DVec2;
use rand::distr::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{EstimateSample, SimulationParameters, SimulationState};
use super::stick::Stick;
use crate::error::{Axis, SimError};

/// Buffon's Needle simulation
#[derive(Debug, Clone)]
pub struct NeedleSimulation {
    params: SimulationParameters,
    seed: u64,
    rng: Pcg32,
    state: SimulationState,
}

impl NeedleSimulation {
    /// Create an empty simulation whose random stream is derived from `seed`
    pub fn new(params: SimulationParameters, seed: u64) -> Self {
        Self {
            params,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: SimulationState::new(),
        }
    }

    /// Unit spacing and unit-length sticks
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(SimulationParameters::default(), seed)
    }

    /// Drop `count` sticks with centers uniform over `x_range` × `y_range`.
    ///
    /// At most one convergence sample is recorded per call, after the whole
    /// batch lands.
    pub fn drop_sticks(
        &mut self,
        count: i64,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<(), SimError> {
        let count = u64::try_from(count).map_err(|_| SimError::InvalidCount { count })?;
        let x_dist = center_distribution(Axis::X, x_range)?;
        let y_dist = center_distribution(Axis::Y, y_range)?;

        let crosses_before = self.state.total_cross_count;
        let length = self.params.stick_length();
        for _ in 0..count {
            let center = DVec2::new(x_dist.sample(&mut self.rng), y_dist.sample(&mut self.rng));
            let theta = self.rng.random_range(0.0..PI);
            self.state.record(Stick::from_center(center, theta, length));
        }

        if self.state.total_cross_count > 0 {
            self.state.sample_estimate(&self.params);
        }

        log::debug!(
            "Dropped {} sticks ({} crossed), totals {}/{}",
            count,
            self.state.total_cross_count - crosses_before,
            self.state.total_cross_count,
            self.state.total_stick_count
        );
        Ok(())
    }

    /// Current π estimate, or `None` while no stick has crossed a line
    pub fn estimate_pi(&self) -> Option<f64> {
        self.state.estimate_pi(&self.params)
    }

    /// Discard all dropped sticks and history. Parameters and the random
    /// stream carry on unchanged.
    pub fn reset(&mut self) {
        if !self.state.is_empty() {
            log::info!("Reset after {} sticks", self.state.total_stick_count);
        }
        self.state.clear();
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Seed the random stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sticks(&self) -> &[Stick] {
        self.state.sticks()
    }

    pub fn total_stick_count(&self) -> u64 {
        self.state.total_stick_count()
    }

    pub fn total_cross_count(&self) -> u64 {
        self.state.total_cross_count()
    }

    pub fn pi_estimate_history(&self) -> &[EstimateSample] {
        self.state.pi_estimate_history()
    }
}

/// Uniform sampler over `[min, max)` for stick centers along one axis
fn center_distribution(axis: Axis, range: (f64, f64)) -> Result<Uniform<f64>, SimError> {
    check_range(axis, range)?;
    let (min, max) = range;
    Uniform::new(min, max).map_err(|_| SimError::InvalidRange { axis, min, max })
}

/// A drop range needs finite bounds with `min < max`
pub(crate) fn check_range(axis: Axis, (min, max): (f64, f64)) -> Result<(), SimError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(SimError::InvalidRange { axis, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use approx::assert_abs_diff_eq;

    fn drop_default(sim: &mut NeedleSimulation, count: i64) {
        sim.drop_sticks(count, DEFAULT_X_RANGE, DEFAULT_Y_RANGE).expect("valid drop");
    }

    #[test]
    fn test_fresh_simulation_has_no_estimate() {
        let sim = NeedleSimulation::with_defaults(1);
        assert_eq!(sim.estimate_pi(), None);
        assert_eq!(sim.total_stick_count(), 0);
        assert!(sim.sticks().is_empty());
        assert!(sim.pi_estimate_history().is_empty());
    }

    #[test]
    fn test_counts_track_drop_arguments() {
        let mut sim = NeedleSimulation::with_defaults(7);
        for count in [1, 5, 10, 0, 50] {
            drop_default(&mut sim, count);
        }
        assert_eq!(sim.total_stick_count(), 66);
        assert_eq!(sim.sticks().len(), 66);
        assert!(sim.total_cross_count() <= sim.total_stick_count());
        let crossed = sim.sticks().iter().filter(|s| s.crosses_line()).count() as u64;
        assert_eq!(crossed, sim.total_cross_count());
    }

    #[test]
    fn test_sticks_have_configured_length() {
        let params = SimulationParameters::new(1.0, 0.75).unwrap();
        let mut sim = NeedleSimulation::new(params, 3);
        drop_default(&mut sim, 500);
        for stick in sim.sticks() {
            assert_abs_diff_eq!(stick.length(), 0.75, epsilon = LENGTH_TOLERANCE);
        }
    }

    #[test]
    fn test_centers_stay_in_drop_area() {
        let mut sim = NeedleSimulation::with_defaults(11);
        sim.drop_sticks(200, (2.0, 3.0), (-1.0, 1.0)).unwrap();
        for stick in sim.sticks() {
            let c = stick.center();
            assert!(c.x >= 2.0 - 1e-9 && c.x < 3.0 + 1e-9);
            assert!(c.y >= -1.0 - 1e-9 && c.y < 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_one_history_sample_per_call() {
        let mut sim = NeedleSimulation::with_defaults(42);
        drop_default(&mut sim, 5);
        let history = sim.pi_estimate_history();
        assert!(history.len() <= 1);
        if sim.total_cross_count() > 0 {
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].stick_count, 5);
        }
    }

    #[test]
    fn test_history_counts_increase_across_calls() {
        let mut sim = NeedleSimulation::with_defaults(42);
        for _ in 0..5 {
            drop_default(&mut sim, 1);
        }
        let history = sim.pi_estimate_history();
        assert!(history.len() <= 5);
        assert!(history.windows(2).all(|w| w[0].stick_count < w[1].stick_count));
        if let Some(last) = history.last() {
            assert_eq!(last.stick_count, 5);
            assert_eq!(Some(last.pi_estimate), sim.estimate_pi());
        }
    }

    #[test]
    fn test_large_run_converges_near_pi() {
        let mut sim = NeedleSimulation::with_defaults(2024);
        drop_default(&mut sim, 200_000);
        let estimate = sim.estimate_pi().expect("crossings after many drops");
        assert!((estimate - PI).abs() < 0.05, "estimate {estimate}");
    }

    #[test]
    fn test_determinism() {
        let mut a = NeedleSimulation::with_defaults(99999);
        let mut b = NeedleSimulation::with_defaults(99999);
        for count in [1, 5, 100] {
            drop_default(&mut a, count);
            drop_default(&mut b, count);
        }
        assert_eq!(a.sticks(), b.sticks());
        assert_eq!(a.total_cross_count(), b.total_cross_count());
        assert_eq!(a.pi_estimate_history(), b.pi_estimate_history());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = NeedleSimulation::with_defaults(1);
        let mut b = NeedleSimulation::with_defaults(2);
        drop_default(&mut a, 10);
        drop_default(&mut b, 10);
        assert_ne!(a.sticks(), b.sticks());
    }

    #[test]
    fn test_negative_count_rejected_without_mutation() {
        let mut sim = NeedleSimulation::with_defaults(5);
        drop_default(&mut sim, 20);
        let before = sim.state().clone();

        let err = sim.drop_sticks(-1, DEFAULT_X_RANGE, DEFAULT_Y_RANGE);
        assert_eq!(err, Err(SimError::InvalidCount { count: -1 }));
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_degenerate_ranges_rejected_without_mutation() {
        let mut sim = NeedleSimulation::with_defaults(5);
        drop_default(&mut sim, 20);
        let before = sim.state().clone();

        assert_eq!(
            sim.drop_sticks(5, (3.0, 3.0), (0.0, 1.0)),
            Err(SimError::InvalidRange {
                axis: Axis::X,
                min: 3.0,
                max: 3.0
            })
        );
        assert!(matches!(
            sim.drop_sticks(5, (0.0, 1.0), (2.0, -2.0)),
            Err(SimError::InvalidRange { axis: Axis::Y, .. })
        ));
        assert!(sim.drop_sticks(5, (0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        assert!(sim.drop_sticks(5, (f64::NAN, 1.0), (0.0, 1.0)).is_err());
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let params = SimulationParameters::new(2.0, 1.5).unwrap();
        let mut sim = NeedleSimulation::new(params, 8);
        drop_default(&mut sim, 100);
        sim.reset();
        sim.reset();
        assert_eq!(sim.state(), NeedleSimulation::new(params, 8).state());
        assert_eq!(sim.parameters(), &params);
        assert_eq!(sim.estimate_pi(), None);
    }

    #[test]
    fn test_crossings_ignore_line_spacing() {
        let wide = SimulationParameters::new(2.0, 1.0).unwrap();
        let mut sim = NeedleSimulation::new(wide, 77);
        let mut unit = NeedleSimulation::with_defaults(77);
        drop_default(&mut sim, 1000);
        drop_default(&mut unit, 1000);

        let floor_crossings = sim
            .sticks()
            .iter()
            .filter(|s| s.start().x.floor() != s.end().x.floor())
            .count() as u64;
        assert!(floor_crossings > 0);
        assert_eq!(sim.total_cross_count(), floor_crossings);

        assert_eq!(sim.sticks(), unit.sticks());
        assert_eq!(sim.total_cross_count(), unit.total_cross_count());
        let wide_est = sim.estimate_pi().unwrap();
        let unit_est = unit.estimate_pi().unwrap();
        assert_eq!(wide_est * 2.0, unit_est);
    }

    #[test]
    fn test_zero_drop_after_crossings_resamples() {
        let mut sim = NeedleSimulation::with_defaults(42);
        drop_default(&mut sim, 1000);
        let len = sim.pi_estimate_history().len();
        drop_default(&mut sim, 0);
        assert_eq!(sim.pi_estimate_history().len(), len + 1);
        assert_eq!(sim.total_stick_count(), 1000);
    }
}
