//! Direct and inverse geodesic problems.
//!
//! The direct problem integrates the geodesic equations with a single
//! fourth-order Runge-Kutta step; accuracy falls off with distance, so long
//! lines should be split by the caller. The inverse problem is Vincenty's
//! iteration on the auxiliary sphere. Both report back-azimuths through
//! [`crate::angle::back_azimuth`].

mod direct;
mod inverse;

use serde::{Deserialize, Serialize};

use crate::config::IterationLimit;
use crate::ellipsoid::Ellipsoid;

/// End point of the direct problem. Angles in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodesicDirect {
    pub latitude: f64,
    pub longitude: f64,
    /// Azimuth from the end point back to the start, in [0, 2π).
    pub back_azimuth: f64,
}

/// Solution of the inverse problem.
///
/// For coincident points the distance is zero and both azimuths are NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodesicInverse {
    /// Metres along the ellipsoid.
    pub distance: f64,
    /// Azimuth at the first point, in [0, 2π).
    pub forward_azimuth: f64,
    /// Azimuth from the second point back to the first, in [0, 2π).
    pub back_azimuth: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct GeodesicSolver {
    ellipsoid: Ellipsoid,
    limit: IterationLimit,
}

impl GeodesicSolver {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_limit(ellipsoid, IterationLimit::VINCENTY)
    }

    /// `limit` only affects the inverse problem.
    pub fn with_limit(ellipsoid: Ellipsoid, limit: IterationLimit) -> Self {
        Self { ellipsoid, limit }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
