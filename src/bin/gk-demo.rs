//! Command-line front end for the gk-geodesy library.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use gk_geodesy::config::RegionTable;
use gk_geodesy::{
    Ellipsoid, EllipsoidPreset, GaussKrugerProjector, GeodesicSolver, GeodeticPoint, PlanePoint,
    Projection, ZonedProjector,
};

/// Gauss-Krüger projections and geodesic problems on a reference ellipsoid.
///
/// All angles on the command line are decimal degrees.
#[derive(Parser)]
#[command(name = "gk-demo")]
#[command(author, version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Reference ellipsoid (krasovskiy, wgs84, pz90, grs80)
    #[arg(long, global = true, default_value = "krasovskiy")]
    ellipsoid: EllipsoidPreset,

    /// Region table (JSON) replacing the embedded one
    #[arg(long, global = true)]
    regions: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Central meridian given directly or through a regional zone.
#[derive(clap::Args)]
struct ZoneArgs {
    /// Central meridian, degrees
    #[arg(long, required_unless_present = "zone", conflicts_with = "zone")]
    lon0: Option<f64>,

    /// Zone number of a regional system (adds the region's false origin)
    #[arg(long)]
    zone: Option<u32>,

    /// Region name in the region table
    #[arg(long, default_value = "X", requires = "zone")]
    region: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the worked example: region X, zone 6 on Krasovskiy
    Demo,
    /// Geodetic to plane coordinates
    Forward {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        #[command(flatten)]
        zone: ZoneArgs,
    },
    /// Plane to geodetic coordinates
    Inverse {
        #[arg(long)]
        northing: f64,
        #[arg(long)]
        easting: f64,
        #[command(flatten)]
        zone: ZoneArgs,
    },
    /// Point at a given azimuth and distance
    Direct {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Azimuth, degrees clockwise from north
        #[arg(long)]
        azimuth: f64,
        /// Distance, metres
        #[arg(long)]
        distance: f64,
    },
    /// Distance and azimuths between two points
    Distance {
        #[arg(long)]
        lat1: f64,
        #[arg(long)]
        lon1: f64,
        #[arg(long)]
        lat2: f64,
        #[arg(long)]
        lon2: f64,
    },
}

#[derive(Serialize)]
struct GeodeticOutput {
    latitude: f64,
    longitude: f64,
    dms: String,
}

impl From<GeodeticPoint> for GeodeticOutput {
    fn from(point: GeodeticPoint) -> Self {
        let (latitude, longitude) = point.to_degrees();
        Self {
            latitude,
            longitude,
            dms: point.to_dms_string(3),
        }
    }
}

#[derive(Serialize)]
struct DemoOutput {
    plane: PlanePoint,
    geodetic: GeodeticOutput,
    reprojection_error_m: f64,
}

#[derive(Serialize)]
struct DirectOutput {
    latitude: f64,
    longitude: f64,
    back_azimuth: f64,
}

#[derive(Serialize)]
struct DistanceOutput {
    distance: f64,
    forward_azimuth: f64,
    back_azimuth: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let ellipsoid = cli.ellipsoid.ellipsoid();
    debug!(ellipsoid = cli.ellipsoid.name(), %ellipsoid, "using ellipsoid");

    match &cli.command {
        Commands::Demo => cmd_demo(&cli),
        Commands::Forward { lat, lon, zone } => {
            let proj = projection(&cli, ellipsoid, zone)?;
            let plane = proj
                .forward(GeodeticPoint::from_degrees(*lat, *lon))
                .context("forward projection failed")?;
            emit(cli.json, &plane, || {
                format!("N = {:.3}  E = {:.3}", plane.northing, plane.easting)
            })
        }
        Commands::Inverse {
            northing,
            easting,
            zone,
        } => {
            let proj = projection(&cli, ellipsoid, zone)?;
            let geo = proj
                .inverse(PlanePoint::new(*northing, *easting))
                .context("inverse projection failed")?;
            let out = GeodeticOutput::from(geo);
            emit(cli.json, &out, || {
                format!("{:.9}  {:.9}  ({})", out.latitude, out.longitude, out.dms)
            })
        }
        Commands::Direct {
            lat,
            lon,
            azimuth,
            distance,
        } => {
            let end = GeodesicSolver::new(ellipsoid).direct(
                lat.to_radians(),
                lon.to_radians(),
                azimuth.to_radians(),
                *distance,
            );
            let out = DirectOutput {
                latitude: end.latitude.to_degrees(),
                longitude: end.longitude.to_degrees(),
                back_azimuth: end.back_azimuth.to_degrees(),
            };
            emit(cli.json, &out, || {
                format!(
                    "{:.9}  {:.9}  back azimuth {:.6}",
                    out.latitude, out.longitude, out.back_azimuth
                )
            })
        }
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let inv = GeodesicSolver::new(ellipsoid)
                .inverse(
                    lat1.to_radians(),
                    lon1.to_radians(),
                    lat2.to_radians(),
                    lon2.to_radians(),
                )
                .context("inverse geodesic problem failed")?;
            let out = DistanceOutput {
                distance: inv.distance,
                forward_azimuth: inv.forward_azimuth.to_degrees(),
                back_azimuth: inv.back_azimuth.to_degrees(),
            };
            emit(cli.json, &out, || {
                format!(
                    "{:.4} m  azimuth {:.6}  back azimuth {:.6}",
                    out.distance, out.forward_azimuth, out.back_azimuth
                )
            })
        }
    }
}

fn region_table(cli: &Cli) -> Result<RegionTable> {
    match &cli.regions {
        Some(path) => RegionTable::load(path)
            .with_context(|| format!("loading region table {}", path.display())),
        None => RegionTable::embedded().context("embedded region table"),
    }
}

fn projection(cli: &Cli, ellipsoid: Ellipsoid, args: &ZoneArgs) -> Result<Box<dyn Projection>> {
    match (args.zone, args.lon0) {
        (Some(zone), _) => {
            let table = region_table(cli)?;
            let region = table.get(&args.region)?.clone();
            Ok(Box::new(ZonedProjector::new(ellipsoid, region, zone)?))
        }
        (None, Some(lon0)) => {
            let zone = GaussKrugerProjector::new(ellipsoid).zone(lon0.to_radians());
            Ok(Box::new(zone))
        }
        (None, None) => anyhow::bail!("either --lon0 or --zone is required"),
    }
}

fn cmd_demo(cli: &Cli) -> Result<()> {
    let table = region_table(cli)?;
    let zoned = ZonedProjector::from_table(&table, "X", 6)?;
    info!(
        region = "X",
        zone = zoned.zone(),
        central_meridian = zoned.central_meridian().to_degrees(),
        "worked example"
    );

    let plane = PlanePoint::new(5_313_937.778, 6_295_607.862);
    let geo = zoned.plane_to_geodetic(plane)?;
    let again = zoned.geodetic_to_plane(geo);
    let error = (again.northing - plane.northing).hypot(again.easting - plane.easting);

    let out = DemoOutput {
        plane,
        geodetic: GeodeticOutput::from(geo),
        reprojection_error_m: error,
    };
    emit(cli.json, &out, || {
        format!(
            "N = {:.3}  E = {:.3}\n{:.9}  {:.9}\n{}\nround-trip error {:.2e} m",
            plane.northing,
            plane.easting,
            out.geodetic.latitude,
            out.geodetic.longitude,
            out.geodetic.dms,
            error
        )
    })
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
