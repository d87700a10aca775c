//! Stick geometry for dropped needles
//!
//! A stick is a fixed-length segment defined by:
//! - center: where it landed in the drop plane
//! - theta: orientation in [0, π) (a half turn covers every line direction)
//! - length: the configured stick length
//!
//! Ruled lines are vertical and sit at every integer x.

use glam::DVec2;
use serde::Serialize;

use crate::{band_index, unit_direction};

/// A dropped stick, stored by its two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stick {
    start: DVec2,
    end: DVec2,
}

impl Stick {
    /// Build a stick of exactly `length` centered on `center` at angle `theta`.
    ///
    /// The trig-derived endpoints are rescaled along their own direction and
    /// re-centered so the realized length matches `length` regardless of
    /// rounding in `cos`/`sin`.
    pub fn from_center(center: DVec2, theta: f64, length: f64) -> Self {
        let half = unit_direction(theta) * (length / 2.0);
        let mut start = center - half;
        let mut end = center + half;

        let actual = end - start;
        let actual_length = actual.length();
        if actual_length > 0.0 {
            let scaled = actual * (length / actual_length);
            start = center - scaled / 2.0;
            end = center + scaled / 2.0;
        }

        Self { start, end }
    }

    /// First endpoint (x1, y1)
    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    /// Second endpoint (x2, y2)
    #[inline]
    pub fn end(&self) -> DVec2 {
        self.end
    }

    /// Endpoints flattened as (x1, y1, x2, y2) for plotting
    pub fn endpoints(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    /// Realized Euclidean length
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the stick
    pub fn center(&self) -> DVec2 {
        (self.start + self.end) / 2.0
    }

    /// True if the endpoints fall in different unit-width bands, i.e. the
    /// stick crosses a line drawn at some integer x.
    pub fn crosses_line(&self) -> bool {
        band_index(self.start.x) != band_index(self.end.x)
    }
}
