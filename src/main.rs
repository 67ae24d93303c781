use std::future::ready;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use geo::Point;
use lockroute_core::loading::overpass::{FETCH_TIMEOUT, OVERPASS_URL};
use lockroute_core::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Margin in degrees around the route when querying for locks
const FETCH_MARGIN_DEG: f64 = 0.05;

#[derive(Parser, Debug)]
#[command(version, about = "Plan river routes through navigation locks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute route length, locks on route and travel time
    Plan(PlanArgs),
    /// Fetch and print the locks inside an area
    Locks(LocksArgs),
}

#[derive(Args, Debug)]
struct OverpassArgs {
    /// Overpass API endpoint
    #[arg(long, default_value = OVERPASS_URL)]
    overpass_url: String,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl OverpassArgs {
    fn client(&self) -> Result<OverpassClient, lockroute_core::Error> {
        OverpassClient::new(
            self.overpass_url.clone(),
            Duration::from_secs(self.timeout_secs),
        )
    }
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Waypoint as LON,LAT; repeat in travel order
    #[arg(
        short,
        long = "waypoint",
        value_name = "LON,LAT",
        value_parser = parse_lon_lat,
        allow_hyphen_values = true
    )]
    waypoints: Vec<Point<f64>>,

    /// Cruising speed in km/h (3-20)
    #[arg(long)]
    speed: Option<f64>,

    /// Average minutes per lock (10-60)
    #[arg(long)]
    lock_minutes: Option<f64>,

    /// Query Overpass for locks around the route instead of the built-in set
    #[arg(long)]
    fetch: bool,

    /// Print a GeoJSON FeatureCollection instead of a summary
    #[arg(long)]
    geojson: bool,

    #[command(flatten)]
    overpass: OverpassArgs,
}

#[derive(Args, Debug)]
struct LocksArgs {
    /// Area to query as S,W,N,E
    #[arg(long, value_name = "S,W,N,E", allow_hyphen_values = true)]
    bbox: BoundingBox,

    #[command(flatten)]
    overpass: OverpassArgs,
}

fn parse_lon_lat(s: &str) -> Result<Point<f64>, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{s}'"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinates out of range: {lon},{lat}"));
    }
    Ok(Point::new(lon, lat))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse().command {
        Command::Plan(args) => plan(args).await,
        Command::Locks(args) => locks(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn plan(args: PlanArgs) -> Result<(), lockroute_core::Error> {
    let patch = SettingsPatch {
        boat_speed_kmh: args.speed,
        lock_transit_min: args.lock_minutes,
    };
    patch.validate()?;

    let mut planner = RoutePlanner::new(Settings::default().merged(&patch));
    for point in &args.waypoints {
        planner.add_waypoint(*point);
    }

    let Some(route) = planner.route() else {
        return Err(lockroute_core::Error::InvalidData(format!(
            "{}: at least two waypoints are needed",
            planner.guidance().unwrap_or_default()
        )));
    };

    let locks = if args.fetch {
        let area = BoundingBox::around(&route.geometry, FETCH_MARGIN_DEG);
        let loader = LockLoader::new(args.overpass.client()?);
        loader
            .load_when_ready(ready(area))
            .await
            .unwrap_or_else(builtin_locks)
    } else {
        builtin_locks()
    };
    info!("Matching route against {} lock candidates", locks.len());
    planner.replace_locks(locks);

    if args.geojson {
        println!("{}", planner.to_geojson_string()?);
    } else {
        print_summary(&planner);
    }
    Ok(())
}

fn print_summary(planner: &RoutePlanner) {
    let Some(eta) = planner.eta() else {
        return;
    };

    println!("Distance:       {} km", eta.distance_km);
    println!("Locks on route: {}", eta.lock_count);
    for lock in planner.locks_on_route() {
        let details: Vec<&str> = [lock.lock_ref.as_deref(), lock.operator.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if details.is_empty() {
            println!("  - {}", lock.name);
        } else {
            println!("  - {} ({})", lock.name, details.join(", "));
        }
    }
    println!("On the water:   {}", format_duration(eta.water_time_min));
    println!("In locks:       {}", format_duration(eta.lock_time_min));
    println!("Total:          {}", eta.total_formatted);
}

async fn locks(args: LocksArgs) -> Result<(), lockroute_core::Error> {
    args.bbox.validate()?;
    let locks = args.overpass.client()?.fetch_locks(&args.bbox).await?;
    info!("{} locks in {}", locks.len(), args.bbox);

    let json = serde_json::to_string_pretty(&locks)
        .map_err(|e| lockroute_core::Error::InvalidData(e.to_string()))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_waypoints() {
        assert_eq!(parse_lon_lat("2.35,48.85").unwrap().x_y(), (2.35, 48.85));
        assert_eq!(parse_lon_lat(" -1.5 , 47.2 ").unwrap().x_y(), (-1.5, 47.2));
        assert!(parse_lon_lat("2.35").is_err());
        assert!(parse_lon_lat("2.35,north").is_err());
        assert!(parse_lon_lat("48.85,200").is_err());
    }

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from([
            "lockroute",
            "plan",
            "-w",
            "2.35,48.85",
            "--waypoint",
            "-0.5,45.0",
            "--speed",
            "10",
        ])
        .unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.waypoints.len(), 2);
        assert_eq!(args.speed, Some(10.0));
        assert_eq!(args.overpass.timeout_secs, 15);
        assert!(!args.fetch);

        let cli =
            Cli::try_parse_from(["lockroute", "locks", "--bbox", "48.8,1.1,49.5,2.4"]).unwrap();
        let Command::Locks(args) = cli.command else {
            panic!("expected locks");
        };
        assert_eq!(args.bbox.east, 2.4);
    }

    #[tokio::test]
    async fn plan_rejects_out_of_range_speed() {
        let cli = Cli::try_parse_from([
            "lockroute",
            "plan",
            "-w",
            "2.35,48.85",
            "-w",
            "2.45,48.85",
            "--speed",
            "50",
        ])
        .unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert!(plan(args).await.is_err());
    }

    #[tokio::test]
    async fn plan_needs_two_waypoints() {
        let cli = Cli::try_parse_from(["lockroute", "plan", "-w", "2.35,48.85"]).unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert!(plan(args).await.is_err());
    }
}
