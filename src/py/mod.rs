use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::error::GeodesyError;
use crate::{
    CartesianPoint, Ellipsoid, GaussKrugerProjector, GeodesicSolver, GeodeticPoint, PlanePoint,
    SpatialConverter,
};

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(geodetic_to_plane, m)?)?;
    m.add_function(wrap_pyfunction!(plane_to_geodetic, m)?)?;
    m.add_function(wrap_pyfunction!(geodetic_to_spatial, m)?)?;
    m.add_function(wrap_pyfunction!(spatial_to_geodetic, m)?)?;
    m.add_function(wrap_pyfunction!(direct_problem, m)?)?;
    m.add_function(wrap_pyfunction!(inverse_problem, m)?)?;
    Ok(())
}

fn to_py_err(err: GeodesyError) -> PyErr {
    if err.is_non_convergence() {
        PyRuntimeError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

fn ellipsoid(name: &str) -> PyResult<Ellipsoid> {
    Ellipsoid::from_name(name).map_err(to_py_err)
}

/// Project latitude/longitude (degrees) to Gauss-Krüger plane coordinates.
///
/// Returns:
///     Tuple of (northing, easting) in metres.
#[pyfunction]
#[pyo3(signature = (lat, lon, central_meridian, ellipsoid_name = "krasovskiy"))]
fn geodetic_to_plane(
    lat: f64,
    lon: f64,
    central_meridian: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64)> {
    let projector = GaussKrugerProjector::new(ellipsoid(ellipsoid_name)?);
    let p = projector.geodetic_to_plane(
        GeodeticPoint::from_degrees(lat, lon),
        deg_to_rad(central_meridian),
    );
    Ok((p.northing, p.easting))
}

/// Inverse Gauss-Krüger projection.
///
/// Returns:
///     Tuple of (lat, lon) in degrees.
#[pyfunction]
#[pyo3(signature = (northing, easting, central_meridian, ellipsoid_name = "krasovskiy"))]
fn plane_to_geodetic(
    py: Python<'_>,
    northing: f64,
    easting: f64,
    central_meridian: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64)> {
    let projector = GaussKrugerProjector::new(ellipsoid(ellipsoid_name)?);
    let geo = py
        .allow_threads(|| {
            projector.plane_to_geodetic(
                PlanePoint::new(northing, easting),
                deg_to_rad(central_meridian),
            )
        })
        .map_err(to_py_err)?;
    Ok(geo.to_degrees())
}

/// Latitude/longitude (degrees) and height (m) to Cartesian (x, y, z).
#[pyfunction]
#[pyo3(signature = (lat, lon, height = 0.0, ellipsoid_name = "wgs84"))]
fn geodetic_to_spatial(
    lat: f64,
    lon: f64,
    height: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64, f64)> {
    let conv = SpatialConverter::new(ellipsoid(ellipsoid_name)?);
    let c = conv.geodetic_to_spatial(GeodeticPoint::with_height(
        deg_to_rad(lat),
        deg_to_rad(lon),
        height,
    ));
    Ok((c.x, c.y, c.z))
}

/// Cartesian (x, y, z) to (lat, lon, height); angles in degrees.
#[pyfunction]
#[pyo3(signature = (x, y, z, ellipsoid_name = "wgs84"))]
fn spatial_to_geodetic(
    py: Python<'_>,
    x: f64,
    y: f64,
    z: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64, f64)> {
    let conv = SpatialConverter::new(ellipsoid(ellipsoid_name)?);
    let g = py
        .allow_threads(|| conv.spatial_to_geodetic(CartesianPoint::new(x, y, z)))
        .map_err(to_py_err)?;
    let (lat, lon) = g.to_degrees();
    Ok((lat, lon, g.height))
}

/// Direct geodesic problem.
///
/// Returns:
///     Tuple of (lat, lon, back_azimuth) in degrees.
#[pyfunction]
#[pyo3(signature = (lat, lon, azimuth, distance, ellipsoid_name = "wgs84"))]
fn direct_problem(
    lat: f64,
    lon: f64,
    azimuth: f64,
    distance: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64, f64)> {
    let solver = GeodesicSolver::new(ellipsoid(ellipsoid_name)?);
    let end = solver.direct(
        deg_to_rad(lat),
        deg_to_rad(lon),
        deg_to_rad(azimuth),
        distance,
    );
    Ok((
        rad_to_deg(end.latitude),
        rad_to_deg(end.longitude),
        rad_to_deg(end.back_azimuth),
    ))
}

/// Inverse geodesic problem (Vincenty).
///
/// Returns:
///     Tuple of (distance_m, forward_azimuth, back_azimuth), azimuths in degrees.
///
/// Raises:
///     RuntimeError: if the iteration does not converge (nearly antipodal points).
#[pyfunction]
#[pyo3(signature = (lat1, lon1, lat2, lon2, ellipsoid_name = "wgs84"))]
fn inverse_problem(
    py: Python<'_>,
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    ellipsoid_name: &str,
) -> PyResult<(f64, f64, f64)> {
    let solver = GeodesicSolver::new(ellipsoid(ellipsoid_name)?);
    let inv = py
        .allow_threads(|| {
            solver.inverse(
                deg_to_rad(lat1),
                deg_to_rad(lon1),
                deg_to_rad(lat2),
                deg_to_rad(lon2),
            )
        })
        .map_err(to_py_err)?;
    Ok((
        inv.distance,
        rad_to_deg(inv.forward_azimuth),
        rad_to_deg(inv.back_azimuth),
    ))
}
