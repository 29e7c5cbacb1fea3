//! Coordinate value types exchanged with the converters.

use serde::{Deserialize, Serialize};

use crate::angle::Dms;

/// Point in geodetic coordinates. Angles in radians, height in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub height: f64,
}

impl GeodeticPoint {
    /// Point on the ellipsoid surface (height 0).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self::with_height(latitude, longitude, 0.0)
    }

    pub fn with_height(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Create from latitude/longitude in degrees.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }

    /// (latitude, longitude) in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }

    /// `"48.04163555, 38.44109773"` style output.
    pub fn to_decimal_degree_string(&self, digits: usize) -> String {
        let (lat, lon) = self.to_degrees();
        format!("{lat:.digits$}, {lon:.digits$}")
    }

    /// `48°02'29.888"N  38°26'27.952"E` style output.
    pub fn to_dms_string(&self, seconds_digits: usize) -> String {
        let (lat, lon) = self.to_degrees();
        let lat = Dms::from_degrees(lat);
        let lon = Dms::from_degrees(lon);
        format!(
            "{}{}  {}{}",
            lat.format(seconds_digits),
            if lat.negative { 'S' } else { 'N' },
            lon.format(seconds_digits),
            if lon.negative { 'W' } else { 'E' },
        )
    }
}

/// Plane coordinates in metres relative to a projection origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub northing: f64,
    pub easting: f64,
}

impl PlanePoint {
    pub fn new(northing: f64, easting: f64) -> Self {
        Self { northing, easting }
    }

    /// Shift by a false origin.
    pub fn offset(self, d_northing: f64, d_easting: f64) -> Self {
        Self::new(self.northing + d_northing, self.easting + d_easting)
    }
}

/// Earth-centred, earth-fixed Cartesian coordinates in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &CartesianPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod approx_impls {
    use super::*;
    use approx::{AbsDiffEq, RelativeEq};

    impl AbsDiffEq for GeodeticPoint {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::default_epsilon()
        }

        // The epsilon applies to the angles; height is compared in metres
        // with a thousand-fold looser bound.
        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            self.latitude.abs_diff_eq(&other.latitude, epsilon)
                && self.longitude.abs_diff_eq(&other.longitude, epsilon)
                && self.height.abs_diff_eq(&other.height, epsilon * 1e3)
        }
    }

    impl RelativeEq for GeodeticPoint {
        fn default_max_relative() -> f64 {
            f64::default_max_relative()
        }

        fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
            self.latitude.relative_eq(&other.latitude, epsilon, max_relative)
                && self.longitude.relative_eq(&other.longitude, epsilon, max_relative)
                && self.height.relative_eq(&other.height, epsilon * 1e3, max_relative)
        }
    }

    impl AbsDiffEq for PlanePoint {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::default_epsilon()
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            self.northing.abs_diff_eq(&other.northing, epsilon)
                && self.easting.abs_diff_eq(&other.easting, epsilon)
        }
    }

    impl RelativeEq for PlanePoint {
        fn default_max_relative() -> f64 {
            f64::default_max_relative()
        }

        fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
            self.northing.relative_eq(&other.northing, epsilon, max_relative)
                && self.easting.relative_eq(&other.easting, epsilon, max_relative)
        }
    }

    impl AbsDiffEq for CartesianPoint {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::default_epsilon()
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            self.x.abs_diff_eq(&other.x, epsilon)
                && self.y.abs_diff_eq(&other.y, epsilon)
                && self.z.abs_diff_eq(&other.z, epsilon)
        }
    }

    impl RelativeEq for CartesianPoint {
        fn default_max_relative() -> f64 {
            f64::default_max_relative()
        }

        fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
            self.x.relative_eq(&other.x, epsilon, max_relative)
                && self.y.relative_eq(&other.y, epsilon, max_relative)
                && self.z.relative_eq(&other.z, epsilon, max_relative)
        }
    }
}
