//! Regional zoned plane systems (SK-63 style) built on Gauss-Krüger.
//!
//! Zone `k` of a region uses the central meridian `base + 3°·(k - 1)` and
//! shifts the easting by `false_easting + 1 000 000·k`.

use tracing::debug;

use crate::config::{RegionParameters, RegionTable};
use crate::ellipsoid::{Ellipsoid, KRASOVSKIY};
use crate::error::GeodesyError;
use crate::point::{GeodeticPoint, PlanePoint};
use crate::proj::gauss_kruger::GaussKrugerProjector;
use crate::proj::Projection;

/// Width of a zone, degrees.
const ZONE_WIDTH_DEG: f64 = 3.0;
/// Easting added per zone number, metres.
const ZONE_EASTING_PREFIX: f64 = 1_000_000.0;

/// Gauss-Krüger projection for one zone of a regional system.
#[derive(Clone, Debug)]
pub struct ZonedProjector {
    projector: GaussKrugerProjector,
    region: RegionParameters,
    zone: u32,
    central_meridian: f64,
}

impl ZonedProjector {
    pub fn new(
        ellipsoid: Ellipsoid,
        region: RegionParameters,
        zone: u32,
    ) -> Result<Self, GeodesyError> {
        if zone == 0 {
            return Err(GeodesyError::InvalidParameter(
                "zone numbers start at 1".into(),
            ));
        }
        let central_meridian =
            (region.central_meridian + ZONE_WIDTH_DEG * (zone as f64 - 1.0)).to_radians();
        debug!(
            region = %region.region,
            zone,
            central_meridian_deg = central_meridian.to_degrees(),
            "zoned projector"
        );
        Ok(Self {
            projector: GaussKrugerProjector::new(ellipsoid),
            region,
            zone,
            central_meridian,
        })
    }

    /// Look up `region` in `table` and build the projector on the Krasovskiy ellipsoid.
    pub fn from_table(table: &RegionTable, region: &str, zone: u32) -> Result<Self, GeodesyError> {
        let params = table.get(region)?.clone();
        Self::new(KRASOVSKIY, params, zone)
    }

    pub fn zone(&self) -> u32 {
        self.zone
    }

    pub fn region(&self) -> &RegionParameters {
        &self.region
    }

    /// Central meridian of this zone, radians.
    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    fn false_easting(&self) -> f64 {
        self.region.false_easting + ZONE_EASTING_PREFIX * self.zone as f64
    }

    pub fn geodetic_to_plane(&self, point: GeodeticPoint) -> PlanePoint {
        self.projector
            .geodetic_to_plane(point, self.central_meridian)
            .offset(self.region.false_northing, self.false_easting())
    }

    pub fn plane_to_geodetic(&self, point: PlanePoint) -> Result<GeodeticPoint, GeodesyError> {
        let local = point.offset(-self.region.false_northing, -self.false_easting());
        self.projector.plane_to_geodetic(local, self.central_meridian)
    }
}

impl Projection for ZonedProjector {
    fn forward(&self, point: GeodeticPoint) -> Result<PlanePoint, GeodesyError> {
        Ok(self.geodetic_to_plane(point))
    }

    fn inverse(&self, point: PlanePoint) -> Result<GeodeticPoint, GeodesyError> {
        self.plane_to_geodetic(point)
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        self.projector.ellipsoid()
    }
}
