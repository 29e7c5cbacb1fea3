use crate::angle::back_azimuth;

use super::{GeodesicDirect, GeodesicSolver};

impl GeodesicSolver {
    /// Derivatives of (B, L, A) scaled by the full step `distance`.
    fn rates(&self, lat: f64, azimuth: f64, distance: f64) -> [f64; 3] {
        let m = self.ellipsoid.radius_m(lat);
        let n = self.ellipsoid.radius_n(lat);
        let (sin_a, cos_a) = azimuth.sin_cos();
        [
            distance * cos_a / m,
            distance * sin_a / (n * lat.cos()),
            distance * sin_a * lat.tan() / n,
        ]
    }

    /// Point reached from `(lat1, lon1)` after `distance` metres along `azimuth`.
    ///
    /// Angles are radians. The equations are integrated in a single RK4 step,
    /// so error grows with distance; split long lines into shorter legs.
    pub fn direct(&self, lat1: f64, lon1: f64, azimuth: f64, distance: f64) -> GeodesicDirect {
        let k1 = self.rates(lat1, azimuth, distance);
        let k2 = self.rates(lat1 + k1[0] / 2.0, azimuth + k1[2] / 2.0, distance);
        let k3 = self.rates(lat1 + k2[0] / 2.0, azimuth + k2[2] / 2.0, distance);
        let k4 = self.rates(lat1 + k3[0], azimuth + k3[2], distance);

        let step = |i: usize| (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;

        GeodesicDirect {
            latitude: lat1 + step(0),
            longitude: lon1 + step(1),
            back_azimuth: back_azimuth(azimuth + step(2)),
        }
    }
}
