use tracing::{trace, warn};

use crate::angle::{back_azimuth, normalize_azimuth};
use crate::error::GeodesyError;

use super::{GeodesicInverse, GeodesicSolver};

impl GeodesicSolver {
    /// Distance and azimuths between two points (Vincenty).
    ///
    /// Nearly antipodal points may not converge within the iteration limit
    /// and yield [`GeodesyError::NonConvergence`].
    pub fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<GeodesicInverse, GeodesyError> {
        if ![lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
            return Ok(GeodesicInverse {
                distance: f64::NAN,
                forward_azimuth: f64::NAN,
                back_azimuth: f64::NAN,
            });
        }

        let f = self.ellipsoid.f();
        let a = self.ellipsoid.a();
        let b = self.ellipsoid.b();

        let u1 = ((1.0 - f) * lat1.tan()).atan();
        let u2 = ((1.0 - f) * lat2.tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let l = lon2 - lon1;
        let mut lambda = l;
        let mut converged = false;

        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut sigma = 0.0;
        let mut cos_sq_alpha = 0.0;
        let mut cos_2sigma_m = 0.0;

        for iteration in 1..=self.limit.max_iterations {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            sin_sigma = (cos_u2 * sin_lambda)
                .hypot(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
            if sin_sigma == 0.0 {
                trace!("coincident points");
                return Ok(GeodesicInverse {
                    distance: 0.0,
                    forward_azimuth: f64::NAN,
                    back_azimuth: f64::NAN,
                });
            }
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);

            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // Equatorial line
            cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - previous).abs() < self.limit.tolerance {
                trace!(iterations = iteration, "vincenty converged");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                lat1,
                lon1,
                lat2,
                lon2,
                max_iterations = self.limit.max_iterations,
                "vincenty inverse did not converge"
            );
            return Err(GeodesyError::NonConvergence {
                solver: "vincenty inverse",
                iterations: self.limit.max_iterations,
            });
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let cos2 = cos_2sigma_m * cos_2sigma_m;
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos2)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos2)));
        let distance = b * big_a * (sigma - delta_sigma);

        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let alpha1 = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
        let alpha2 = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

        Ok(GeodesicInverse {
            distance,
            forward_azimuth: normalize_azimuth(alpha1),
            back_azimuth: back_azimuth(alpha2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Dms;
    use crate::config::IterationLimit;
    use crate::ellipsoid::{KRASOVSKIY, WGS84};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_flinders_peak_buninyong() {
        let solver = GeodesicSolver::new(WGS84);
        let inv = solver
            .inverse(
                (-37.951_033_42_f64).to_radians(),
                144.424_867_89_f64.to_radians(),
                (-37.652_821_14_f64).to_radians(),
                143.926_495_54_f64.to_radians(),
            )
            .unwrap();
        assert_abs_diff_eq!(inv.distance, 54_972.271, epsilon = 1e-3);
        assert_abs_diff_eq!(
            inv.forward_azimuth,
            Dms::new(false, 306, 52, 5.37).to_degrees().to_radians(),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            inv.back_azimuth,
            Dms::new(false, 127, 10, 25.07).to_degrees().to_radians(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_coincident_points() {
        let solver = GeodesicSolver::new(KRASOVSKIY);
        let inv = solver.inverse(0.9, 0.7, 0.9, 0.7).unwrap();
        assert_eq!(inv.distance, 0.0);
        assert!(inv.forward_azimuth.is_nan());
        assert!(inv.back_azimuth.is_nan());
    }

    #[test]
    fn test_equator_line() {
        let solver = GeodesicSolver::new(WGS84);
        let inv = solver.inverse(0.0, 0.0, 0.0, 10.0_f64.to_radians()).unwrap();
        assert_abs_diff_eq!(inv.distance, 1_113_194.907_932_734, epsilon = 1e-6);
        assert_abs_diff_eq!(inv.forward_azimuth, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(inv.back_azimuth, 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let solver = GeodesicSolver::new(KRASOVSKIY);
        let there = solver.inverse(0.8, 0.5, 0.95, 0.62).unwrap();
        let back = solver.inverse(0.95, 0.62, 0.8, 0.5).unwrap();
        assert_abs_diff_eq!(there.distance, back.distance, epsilon = 1e-6);
        assert_abs_diff_eq!(there.forward_azimuth, back.back_azimuth, epsilon = 1e-9);
        assert_abs_diff_eq!(there.back_azimuth, back.forward_azimuth, epsilon = 1e-9);
    }

    #[test]
    fn test_near_antipodal_fails() {
        let solver = GeodesicSolver::new(WGS84);
        let err = solver.inverse(0.0, 0.0, 0.5e-5, PI - 1e-5).unwrap_err();
        assert!(matches!(
            err,
            GeodesyError::NonConvergence {
                solver: "vincenty inverse",
                iterations: 200
            }
        ));
    }

    #[test]
    fn test_custom_limit() {
        let solver = GeodesicSolver::with_limit(WGS84, IterationLimit::new(1e-14, 1));
        assert!(solver
            .inverse(0.1, 0.2, 0.9, 1.4)
            .unwrap_err()
            .is_non_convergence());
    }

    #[test]
    fn test_non_finite_input() {
        let solver = GeodesicSolver::new(WGS84);
        let inv = solver.inverse(f64::NAN, 0.0, 0.1, 0.1).unwrap();
        assert!(inv.distance.is_nan());
    }
}
