//! Solver iteration limits and the regional projection parameter table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeodesyError;

/// Convergence criterion for an iterative solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationLimit {
    /// Stop when successive iterates differ by less than this (radians).
    pub tolerance: f64,
    /// Fail with `NonConvergence` after this many iterations.
    pub max_iterations: usize,
}

impl IterationLimit {
    pub const fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Foot-point latitude from meridian arc length.
    pub const MERIDIAN_ARC: Self = Self::new(1e-12, 100);
    /// Latitude from Cartesian coordinates.
    pub const SPATIAL: Self = Self::new(1e-12, 256);
    /// Longitude difference on the auxiliary sphere (Vincenty).
    pub const VINCENTY: Self = Self::new(1e-14, 200);
}

impl Default for IterationLimit {
    fn default() -> Self {
        Self::MERIDIAN_ARC
    }
}

/// False origin and base central meridian of a regional zoned system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionParameters {
    pub region: String,
    /// Central meridian of zone 1, degrees.
    pub central_meridian: f64,
    /// Metres added to the northing.
    pub false_northing: f64,
    /// Metres added to the easting, before the per-zone million.
    pub false_easting: f64,
}

/// Lookup table of regional parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTable {
    pub regions: Vec<RegionParameters>,
}

impl RegionTable {
    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GeodesyError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeodesyError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Table shipped with the crate.
    pub fn embedded() -> Result<Self, GeodesyError> {
        Self::from_json(include_str!("presets/sk63.json"))
    }

    pub fn from_json(json: &str) -> Result<Self, GeodesyError> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| GeodesyError::Config(format!("invalid region table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), GeodesyError> {
        for r in &self.regions {
            if !(r.central_meridian.is_finite()
                && r.false_northing.is_finite()
                && r.false_easting.is_finite())
            {
                return Err(GeodesyError::Config(format!(
                    "region {} has non-finite parameters",
                    r.region
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, region: &str) -> Result<&RegionParameters, GeodesyError> {
        self.regions
            .iter()
            .find(|r| r.region == region)
            .ok_or_else(|| GeodesyError::UnknownRegion(region.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.region.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_table() {
        let table = RegionTable::embedded().unwrap();
        let x = table.get("X").unwrap();
        assert_eq!(x.central_meridian, 23.5);
        assert_eq!(x.false_northing, -9214.69);
        assert_eq!(x.false_easting, 300_000.0);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["X"]);
    }

    #[test]
    fn test_unknown_region() {
        let table = RegionTable::embedded().unwrap();
        assert!(matches!(
            table.get("Q"),
            Err(GeodesyError::UnknownRegion(r)) if r == "Q"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"region":"A","central_meridian":30.5,"false_northing":0.0,"false_easting":250000.0}}]"#
        )
        .unwrap();
        let table = RegionTable::load(file.path()).unwrap();
        assert_eq!(table.get("A").unwrap().central_meridian, 30.5);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RegionTable::from_json("{not json"),
            Err(GeodesyError::Config(_))
        ));
        assert!(RegionTable::load(Path::new("/nonexistent/regions.json")).is_err());
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(IterationLimit::default(), IterationLimit::MERIDIAN_ARC);
        assert_eq!(IterationLimit::SPATIAL.max_iterations, 256);
        assert_eq!(IterationLimit::VINCENTY.tolerance, 1e-14);
    }
}
