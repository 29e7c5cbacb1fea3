//! Gauss-Krüger projection as classical power series in the longitude difference.
//!
//! Northing is an even series in `l = L - L0` through l⁸ anchored at the
//! meridian distance; easting is an odd series through l⁷. The inverse
//! solves the foot-point latitude from the northing and applies three-term
//! series in the easting.

use crate::config::IterationLimit;
use crate::ellipsoid::Ellipsoid;
use crate::error::GeodesyError;
use crate::point::{GeodeticPoint, PlanePoint};
use crate::proj::meridian::MeridianArcSolver;
use crate::proj::Projection;

/// Forward/inverse Gauss-Krüger projection on a given ellipsoid.
///
/// The central meridian is an argument of each call; use
/// [`GaussKrugerProjector::zone`] to fix it and obtain a [`Projection`].
#[derive(Clone, Copy, Debug)]
pub struct GaussKrugerProjector {
    ellipsoid: Ellipsoid,
    meridian: MeridianArcSolver,
}

impl GaussKrugerProjector {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_limit(ellipsoid, IterationLimit::MERIDIAN_ARC)
    }

    pub fn with_limit(ellipsoid: Ellipsoid, limit: IterationLimit) -> Self {
        Self {
            ellipsoid,
            meridian: MeridianArcSolver::with_limit(ellipsoid, limit),
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn meridian(&self) -> &MeridianArcSolver {
        &self.meridian
    }

    /// Bind the projector to a central meridian (radians).
    pub fn zone(self, central_meridian: f64) -> GaussKruger {
        GaussKruger {
            projector: self,
            central_meridian,
        }
    }

    /// Project a geodetic point onto the plane of central meridian `lon0`.
    pub fn geodetic_to_plane(&self, point: GeodeticPoint, lon0: f64) -> PlanePoint {
        let lat = point.latitude;
        let l = point.longitude - lon0;

        let (sin_b, cos_b) = lat.sin_cos();
        let t = lat.tan();
        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t4 * t2;
        let eta2 = self.ellipsoid.e2_sq() * cos_b * cos_b;
        let eta4 = eta2 * eta2;
        let n = self.ellipsoid.radius_n(lat);

        let cos3 = cos_b.powi(3);
        let cos5 = cos_b.powi(5);
        let cos7 = cos_b.powi(7);

        let a0 = self.meridian.meridian_distance(lat);
        let a2 = n * sin_b * cos_b / 2.0;
        let a4 = n * sin_b * cos3 * (5.0 - t2 + 9.0 * eta2 + 4.0 * eta4) / 24.0;
        let a6 = n * sin_b * cos5 * (61.0 - 58.0 * t2 + t4 + 270.0 * eta2 - 330.0 * eta2 * t2)
            / 720.0;
        let a8 = n * sin_b * cos7 * (1385.0 - 3111.0 * t2 + 543.0 * t4 - t6) / 40320.0;

        let b1 = n * cos_b;
        let b3 = n * cos3 * (1.0 - t2 + eta2) / 6.0;
        let b5 = n * cos5 * (5.0 - 18.0 * t2 + t4 + 14.0 * eta2 - 58.0 * eta2 * t2) / 120.0;
        let b7 = n * cos7 * (61.0 - 479.0 * t2 + 179.0 * t4 - t6) / 5040.0;

        let l2 = l * l;
        let northing = a0 + l2 * (a2 + l2 * (a4 + l2 * (a6 + l2 * a8)));
        let easting = l * (b1 + l2 * (b3 + l2 * (b5 + l2 * b7)));

        PlanePoint::new(northing, easting)
    }

    /// Recover the geodetic point from plane coordinates about central meridian `lon0`.
    pub fn plane_to_geodetic(
        &self,
        point: PlanePoint,
        lon0: f64,
    ) -> Result<GeodeticPoint, GeodesyError> {
        let y = point.easting;
        let foot = self.meridian.latitude_from_arc(point.northing)?;

        let nx = self.ellipsoid.radius_n(foot);
        let nx2 = nx * nx;
        let nx4 = nx2 * nx2;
        let cos_bx = foot.cos();
        let t = foot.tan();
        let t2 = t * t;
        let t4 = t2 * t2;
        let eta2 = self.ellipsoid.e2_sq() * cos_bx * cos_bx;
        let eta4 = eta2 * eta2;
        let v2 = 1.0 + eta2;

        let c2 = -t * v2 / (2.0 * nx2);
        let c4 = -c2 / (12.0 * nx2) * (5.0 + 3.0 * t2 + eta2 - 9.0 * eta2 * t2 - 4.0 * eta4);
        let c6 = c2 / (360.0 * nx4)
            * (61.0 + 90.0 * t2 + 45.0 * t4 + 46.0 * eta2 - 252.0 * eta2 * t2 - 90.0 * eta2 * t4);

        let p1 = 1.0 / (nx * cos_bx);
        let p3 = -p1 / (6.0 * nx2) * (1.0 + 2.0 * t2 + eta2);
        let p5 = p1 / (120.0 * nx4) * (5.0 + 28.0 * t2 + 24.0 * t4 + 6.0 * eta2 + 8.0 * eta2 * t2);

        let y2 = y * y;
        let lat = foot + y2 * (c2 + y2 * (c4 + y2 * c6));
        let dlon = y * (p1 + y2 * (p3 + y2 * p5));

        Ok(GeodeticPoint::new(lat, dlon + lon0))
    }
}

/// A [`GaussKrugerProjector`] bound to one central meridian.
#[derive(Clone, Copy, Debug)]
pub struct GaussKruger {
    projector: GaussKrugerProjector,
    central_meridian: f64,
}

impl GaussKruger {
    pub fn new(ellipsoid: Ellipsoid, central_meridian: f64) -> Self {
        GaussKrugerProjector::new(ellipsoid).zone(central_meridian)
    }

    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }
}

impl Projection for GaussKruger {
    fn forward(&self, point: GeodeticPoint) -> Result<PlanePoint, GeodesyError> {
        Ok(self.projector.geodetic_to_plane(point, self.central_meridian))
    }

    fn inverse(&self, point: PlanePoint) -> Result<GeodeticPoint, GeodesyError> {
        self.projector.plane_to_geodetic(point, self.central_meridian)
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        self.projector.ellipsoid()
    }
}
