//! Reference ellipsoid model and its radii of curvature.

use std::fmt;
use std::str::FromStr;

use crate::error::GeodesyError;

/// Reference ellipsoid parameters.
///
/// All derived quantities are computed once on construction; the fields are
/// private.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
    b: f64,
    e1_sq: f64,
    e2_sq: f64,
    n: f64,
}

impl Ellipsoid {
    /// Build an ellipsoid from its semi-major axis (metres) and inverse flattening.
    ///
    /// An inverse flattening of `f64::INFINITY` yields a sphere.
    pub fn new(a: f64, inverse_flattening: f64) -> Result<Self, GeodesyError> {
        if inverse_flattening == f64::INFINITY {
            return Self::from_flattening(a, 0.0);
        }
        if !inverse_flattening.is_finite() || inverse_flattening <= 1.0 {
            return Err(GeodesyError::InvalidParameter(format!(
                "inverse flattening must be finite and greater than 1, got {inverse_flattening}"
            )));
        }
        Self::from_flattening(a, 1.0 / inverse_flattening)
    }

    /// Build an ellipsoid from its semi-major axis (metres) and flattening.
    ///
    /// A flattening of exactly 0 yields a sphere.
    pub fn from_flattening(a: f64, f: f64) -> Result<Self, GeodesyError> {
        if !a.is_finite() || a <= 0.0 {
            return Err(GeodesyError::InvalidParameter(format!(
                "semi-major axis must be positive, got {a}"
            )));
        }
        if !f.is_finite() || !(0.0..1.0).contains(&f) {
            return Err(GeodesyError::InvalidParameter(format!(
                "flattening must lie in [0, 1), got {f}"
            )));
        }
        Ok(Self::derive(a, f))
    }

    /// Look up a named preset (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, GeodesyError> {
        name.parse::<EllipsoidPreset>().map(EllipsoidPreset::ellipsoid)
    }

    const fn derive(a: f64, f: f64) -> Self {
        let b = a * (1.0 - f);
        let e1_sq = 1.0 - (b * b) / (a * a);
        let e2_sq = (a * a) / (b * b) - 1.0;
        let n = (a - b) / (a + b);
        Self {
            a,
            f,
            b,
            e1_sq,
            e2_sq,
            n,
        }
    }

    /// Semi-major (equatorial) axis, metres.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Semi-minor (polar) axis, metres.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Flattening.
    pub fn f(&self) -> f64 {
        self.f
    }

    pub fn inverse_flattening(&self) -> f64 {
        1.0 / self.f
    }

    /// First eccentricity squared: 1 - b²/a².
    pub fn e1_sq(&self) -> f64 {
        self.e1_sq
    }

    /// Second eccentricity squared: a²/b² - 1.
    pub fn e2_sq(&self) -> f64 {
        self.e2_sq
    }

    /// Third flattening: (a - b) / (a + b).
    pub fn third_flattening(&self) -> f64 {
        self.n
    }

    fn w_sq(&self, lat: f64) -> f64 {
        let s = lat.sin();
        1.0 - self.e1_sq * s * s
    }

    fn w(&self, lat: f64) -> f64 {
        self.w_sq(lat).sqrt()
    }

    /// Radius of curvature of the meridian section at latitude `lat` (radians).
    pub fn radius_m(&self, lat: f64) -> f64 {
        self.a * (1.0 - self.e1_sq) / self.w(lat).powi(3)
    }

    /// Radius of curvature of the prime vertical at latitude `lat`.
    pub fn radius_n(&self, lat: f64) -> f64 {
        self.a / self.w(lat)
    }

    /// Gaussian mean radius of curvature, sqrt(M·N).
    pub fn radius_mean(&self, lat: f64) -> f64 {
        self.b / self.w_sq(lat)
    }

    /// Radius of the parallel circle at latitude `lat`.
    pub fn radius_parallel(&self, lat: f64) -> f64 {
        self.radius_n(lat) * lat.cos()
    }

    /// Euler radius of curvature of the normal section with azimuth `azimuth`.
    pub fn radius_azimuth(&self, lat: f64, azimuth: f64) -> f64 {
        let m = self.radius_m(lat);
        let n = self.radius_n(lat);
        let (sin_a, cos_a) = azimuth.sin_cos();
        m * n / (n * cos_a * cos_a + m * sin_a * sin_a)
    }

    /// Length of the parallel arc at `lat` between longitudes `lon1` and `lon2`.
    pub fn parallel_arc(&self, lat: f64, lon1: f64, lon2: f64) -> f64 {
        self.radius_parallel(lat) * (lon2 - lon1).abs()
    }

    /// Area (m²) of the trapezoid bounded by parallels `lat1`, `lat2` and
    /// meridians `lon1`, `lon2`.
    pub fn trapezoid_area(&self, lat1: f64, lat2: f64, lon1: f64, lon2: f64) -> f64 {
        let e2 = self.e1_sq;
        let odd = |k: i32| lat2.sin().powi(k) - lat1.sin().powi(k);
        let series = odd(1)
            + 2.0 / 3.0 * e2 * odd(3)
            + 3.0 / 5.0 * e2 * e2 * odd(5)
            + 4.0 / 7.0 * e2 * e2 * e2 * odd(7);
        (self.b * self.b * (lon2 - lon1) * series).abs()
    }
}

impl fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={} 1/f={}", self.a, self.inverse_flattening())
    }
}

pub const KRASOVSKIY: Ellipsoid = Ellipsoid::derive(6_378_245.0, 1.0 / 298.3);
pub const WGS84: Ellipsoid = Ellipsoid::derive(6_378_137.0, 1.0 / 298.257_223_563);
pub const PZ90: Ellipsoid = Ellipsoid::derive(6_378_136.0, 1.0 / 298.257_84);
pub const GRS80: Ellipsoid = Ellipsoid::derive(6_378_137.0, 1.0 / 298.257_222_101);

/// Named reference ellipsoids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EllipsoidPreset {
    Krasovskiy,
    Wgs84,
    /// PZ-90 (also PZ-90.02 and PZ-90.11).
    Pz90,
    Grs80,
}

impl EllipsoidPreset {
    pub fn ellipsoid(self) -> Ellipsoid {
        match self {
            Self::Krasovskiy => KRASOVSKIY,
            Self::Wgs84 => WGS84,
            Self::Pz90 => PZ90,
            Self::Grs80 => GRS80,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Krasovskiy => "krasovskiy",
            Self::Wgs84 => "wgs84",
            Self::Pz90 => "pz90",
            Self::Grs80 => "grs80",
        }
    }
}

impl FromStr for EllipsoidPreset {
    type Err = GeodesyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '.'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "krasovskiy" | "krasovsky" | "krassowsky" | "krass" => Ok(Self::Krasovskiy),
            "wgs84" => Ok(Self::Wgs84),
            "pz90" | "pz9002" | "pz9011" => Ok(Self::Pz90),
            "grs80" => Ok(Self::Grs80),
            _ => Err(GeodesyError::UnknownEllipsoid(s.to_string())),
        }
    }
}

impl From<EllipsoidPreset> for Ellipsoid {
    fn from(preset: EllipsoidPreset) -> Self {
        preset.ellipsoid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_wgs84_published_eccentricities() {
        // NIMA TR8350.2, table 3.3
        assert_relative_eq!(WGS84.e1_sq(), 0.006_694_379_990_14, epsilon = 1e-14);
        assert_relative_eq!(WGS84.e2_sq(), 0.006_739_496_742_28, epsilon = 1e-14);
        assert_relative_eq!(WGS84.inverse_flattening(), 298.257_223_563, epsilon = 1e-9);
        // Meridian radius of curvature at the pole is a / sqrt(1 - e²)
        assert_relative_eq!(
            WGS84.radius_m(FRAC_PI_2),
            WGS84.a() / (1.0 - WGS84.e1_sq()).sqrt(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_infinite_inverse_flattening_is_sphere() {
        let sphere = Ellipsoid::new(6_371_000.0, f64::INFINITY).unwrap();
        assert_eq!(sphere.f(), 0.0);
        assert_eq!(sphere.b(), 6_371_000.0);
        assert_eq!(sphere.e1_sq(), 0.0);
        assert_relative_eq!(sphere.radius_n(0.7), 6_371_000.0, epsilon = 1e-9);
        assert!(Ellipsoid::new(6_371_000.0, f64::NEG_INFINITY).is_err());
        assert!(Ellipsoid::new(6_371_000.0, f64::NAN).is_err());
    }

    #[test]
    fn test_krasovskiy_constants() {
        assert_relative_eq!(KRASOVSKIY.b(), 6_356_863.018_773_047, epsilon = 1e-6);
        assert_relative_eq!(KRASOVSKIY.e1_sq(), 0.006_693_421_622_965_823, epsilon = 1e-15);
        assert_relative_eq!(KRASOVSKIY.e2_sq(), 0.006_738_525_414_683_449, epsilon = 1e-15);
    }

    #[test]
    fn test_new_matches_preset() {
        let ell = Ellipsoid::new(6_378_245.0, 298.3).unwrap();
        assert_relative_eq!(ell.b(), KRASOVSKIY.b(), epsilon = 1e-9);
        assert_relative_eq!(ell.e1_sq(), KRASOVSKIY.e1_sq(), epsilon = 1e-15);
        assert_relative_eq!(ell.inverse_flattening(), 298.3, epsilon = 1e-9);
    }

    #[test]
    fn test_eccentricities_are_consistent() {
        for ell in [KRASOVSKIY, WGS84, PZ90, GRS80] {
            // e'² = e² / (1 - e²)
            assert_relative_eq!(
                ell.e2_sq(),
                ell.e1_sq() / (1.0 - ell.e1_sq()),
                epsilon = 1e-15
            );
            assert!(ell.a() > ell.b() && ell.b() > 0.0);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Ellipsoid::new(-1.0, 298.3),
            Err(GeodesyError::InvalidParameter(_))
        ));
        assert!(Ellipsoid::new(0.0, 298.3).is_err());
        assert!(Ellipsoid::new(f64::NAN, 298.3).is_err());
        assert!(Ellipsoid::new(6_378_137.0, 1.0).is_err());
        assert!(Ellipsoid::new(6_378_137.0, f64::INFINITY).is_err());
        assert!(Ellipsoid::from_flattening(6_378_137.0, 1.0).is_err());
        assert!(Ellipsoid::from_flattening(6_378_137.0, -0.1).is_err());
    }

    #[test]
    fn test_sphere() {
        let sphere = Ellipsoid::from_flattening(6_371_000.0, 0.0).unwrap();
        assert_relative_eq!(sphere.e1_sq(), 0.0);
        assert_relative_eq!(sphere.radius_m(0.7), 6_371_000.0, epsilon = 1e-6);
        assert_relative_eq!(sphere.radius_n(0.7), 6_371_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_radii_at_equator_and_pole() {
        let ell = WGS84;
        // Equator: N = a, M = b²/a
        assert_relative_eq!(ell.radius_n(0.0), ell.a(), epsilon = 1e-6);
        assert_relative_eq!(ell.radius_m(0.0), ell.b() * ell.b() / ell.a(), epsilon = 1e-6);
        // Pole: M = N = a²/b
        let polar = ell.a() * ell.a() / ell.b();
        assert_relative_eq!(ell.radius_n(FRAC_PI_2), polar, epsilon = 1e-6);
        assert_relative_eq!(ell.radius_m(FRAC_PI_2), polar, epsilon = 1e-6);
        assert!(ell.radius_parallel(FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_radius_azimuth_limits() {
        let ell = KRASOVSKIY;
        let lat = 54.0_f64.to_radians();
        assert_relative_eq!(ell.radius_azimuth(lat, 0.0), ell.radius_m(lat), epsilon = 1e-6);
        assert_relative_eq!(
            ell.radius_azimuth(lat, FRAC_PI_2),
            ell.radius_n(lat),
            epsilon = 1e-6
        );
        let r45 = ell.radius_azimuth(lat, FRAC_PI_4);
        assert!(r45 > ell.radius_m(lat) && r45 < ell.radius_n(lat));
    }

    #[test]
    fn test_radius_mean_is_geometric_mean() {
        let lat = 0.9;
        let m = WGS84.radius_m(lat);
        let n = WGS84.radius_n(lat);
        assert_relative_eq!(WGS84.radius_mean(lat), (m * n).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_arc() {
        let arc = WGS84.parallel_arc(0.0, 0.0, 1.0_f64.to_radians());
        assert_relative_eq!(arc, 111_319.490_793, epsilon = 1e-3);
        assert_relative_eq!(arc, WGS84.parallel_arc(0.0, 1.0_f64.to_radians(), 0.0));
    }

    #[test]
    fn test_trapezoid_area_of_whole_ellipsoid() {
        // Whole surface of WGS84 is ≈ 510 065 622 km²
        let area = WGS84.trapezoid_area(-FRAC_PI_2, FRAC_PI_2, 0.0, std::f64::consts::TAU);
        assert_relative_eq!(area / 1e6, 510_065_622.0, max_relative = 1e-6);
        // Swapping bounds gives the same value
        let a1 = WGS84.trapezoid_area(0.1, 0.2, 0.3, 0.4);
        let a2 = WGS84.trapezoid_area(0.2, 0.1, 0.4, 0.3);
        assert_relative_eq!(a1, a2, max_relative = 1e-12);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Ellipsoid::from_name("WGS84").unwrap(), WGS84);
        assert_eq!(Ellipsoid::from_name("wgs-84").unwrap(), WGS84);
        assert_eq!(Ellipsoid::from_name("krass").unwrap(), KRASOVSKIY);
        assert_eq!(Ellipsoid::from_name("PZ-90.11").unwrap(), PZ90);
        assert!(matches!(
            Ellipsoid::from_name("bessel"),
            Err(GeodesyError::UnknownEllipsoid(_))
        ));
        for preset in [
            EllipsoidPreset::Krasovskiy,
            EllipsoidPreset::Wgs84,
            EllipsoidPreset::Pz90,
            EllipsoidPreset::Grs80,
        ] {
            assert_eq!(preset.name().parse::<EllipsoidPreset>().unwrap(), preset);
        }
    }
}
