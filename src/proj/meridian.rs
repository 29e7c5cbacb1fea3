//! Meridian arc length and its inverse (foot-point latitude).

use tracing::{trace, warn};

use crate::config::IterationLimit;
use crate::ellipsoid::Ellipsoid;
use crate::error::GeodesyError;

/// Converts latitude to distance along the meridian and back.
///
/// The forward direction uses the series in the third flattening `n`
/// (through n³). The inverse is a fixed-point iteration over the classical
/// series in e² (through e⁸), started at the equator.
#[derive(Clone, Copy, Debug)]
pub struct MeridianArcSolver {
    ellipsoid: Ellipsoid,
    // b·(1 + n + 5/4 n² + 5/4 n³) and the sin(2B), sin(4B), sin(6B) terms
    forward: [f64; 4],
    // A0..A8 of the e² expansion
    inverse: [f64; 5],
    limit: IterationLimit,
}

impl MeridianArcSolver {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_limit(ellipsoid, IterationLimit::MERIDIAN_ARC)
    }

    pub fn with_limit(ellipsoid: Ellipsoid, limit: IterationLimit) -> Self {
        Self {
            ellipsoid,
            forward: Self::forward_coefficients(&ellipsoid),
            inverse: Self::inverse_coefficients(&ellipsoid),
            limit,
        }
    }

    fn forward_coefficients(ell: &Ellipsoid) -> [f64; 4] {
        let b = ell.b();
        let n = ell.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        [
            b * (1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3),
            -b * (3.0 / 2.0 * n + 3.0 / 2.0 * n2 + 21.0 / 16.0 * n3),
            b * (15.0 / 16.0 * n2 + 15.0 / 16.0 * n3),
            -b * (35.0 / 48.0 * n3),
        ]
    }

    fn inverse_coefficients(ell: &Ellipsoid) -> [f64; 5] {
        let e2 = ell.e1_sq();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let e8 = e6 * e2;
        [
            1.0 + 3.0 / 4.0 * e2 + 45.0 / 64.0 * e4 + 175.0 / 256.0 * e6 + 11025.0 / 16384.0 * e8,
            3.0 / 4.0 * e2 + 15.0 / 16.0 * e4 + 525.0 / 512.0 * e6 + 2205.0 / 2048.0 * e8,
            15.0 / 64.0 * e4 + 105.0 / 256.0 * e6 + 2205.0 / 4096.0 * e8,
            35.0 / 512.0 * e6 + 315.0 / 2048.0 * e8,
            315.0 / 16384.0 * e8,
        ]
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Signed distance along the meridian from the equator to `lat` (radians).
    ///
    /// Negative in the southern hemisphere.
    pub fn meridian_distance(&self, lat: f64) -> f64 {
        let [a0, a2, a4, a6] = self.forward;
        a0 * lat + a2 * (2.0 * lat).sin() + a4 * (4.0 * lat).sin() + a6 * (6.0 * lat).sin()
    }

    /// Length of the meridian arc between `lat1` and `lat2`. Always non-negative.
    pub fn arc_length(&self, lat1: f64, lat2: f64) -> f64 {
        (self.meridian_distance(lat2) - self.meridian_distance(lat1)).abs()
    }

    /// Latitude (radians) whose meridian distance from the equator is `x` metres.
    pub fn latitude_from_arc(&self, x: f64) -> Result<f64, GeodesyError> {
        if !x.is_finite() {
            return Ok(f64::NAN);
        }

        let [c0, c2, c4, c6, c8] = self.inverse;
        let scaled = x / (self.ellipsoid.a() * (1.0 - self.ellipsoid.e1_sq()));

        let mut lat = 0.0_f64;
        for iteration in 1..=self.limit.max_iterations {
            let next = (scaled + c2 / 2.0 * (2.0 * lat).sin() - c4 / 4.0 * (4.0 * lat).sin()
                + c6 / 6.0 * (6.0 * lat).sin()
                - c8 / 8.0 * (8.0 * lat).sin())
                / c0;
            let delta = (next - lat).abs();
            lat = next;
            if delta < self.limit.tolerance {
                trace!(iterations = iteration, "foot-point latitude converged");
                return Ok(lat);
            }
        }

        warn!(
            arc = x,
            max_iterations = self.limit.max_iterations,
            "foot-point latitude did not converge"
        );
        Err(GeodesyError::NonConvergence {
            solver: "meridian arc inverse",
            iterations: self.limit.max_iterations,
        })
    }
}
