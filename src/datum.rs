//! Seven-parameter (Helmert) similarity transform between Cartesian frames.

use serde::{Deserialize, Serialize};

use crate::angle::arcsec_to_rad;
use crate::point::CartesianPoint;

/// Translation (m), rotation (arc-seconds) and scale (ppm) between two datums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatumTransformParameters {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub m: f64,
}

impl DatumTransformParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(dx: f64, dy: f64, dz: f64, rx: f64, ry: f64, rz: f64, m: f64) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
            m,
        }
    }

    /// Negated parameter set. Undoes `self` to first order only, which holds
    /// for the small rotations and scale of real datum shifts.
    pub fn inverse(&self) -> Self {
        Self::new(
            -self.dx, -self.dy, -self.dz, -self.rx, -self.ry, -self.rz, -self.m,
        )
    }
}

/// Applies [`DatumTransformParameters`] to Cartesian points.
#[derive(Clone, Copy, Debug, Default)]
pub struct DatumTransformer;

impl DatumTransformer {
    /// Non-finite coordinates propagate to the result.
    pub fn transform(point: CartesianPoint, params: &DatumTransformParameters) -> CartesianPoint {
        let CartesianPoint { x, y, z } = point;
        let rx = arcsec_to_rad(params.rx);
        let ry = arcsec_to_rad(params.ry);
        let rz = arcsec_to_rad(params.rz);
        let s = 1.0 + params.m * 1e-6;

        CartesianPoint::new(
            s * (x + rz * y - ry * z) + params.dx,
            s * (-rz * x + y + rx * z) + params.dy,
            s * (ry * x - rx * y + z) + params.dz,
        )
    }
}
