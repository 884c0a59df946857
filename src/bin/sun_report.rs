//! Sun report binary — prints the sub-solar point and day/night state.
//!
//! Usage: cargo run --bin sun_report -- [OPTIONS]
//!
//! Options:
//!   --at <RFC3339>      Instant to evaluate (default: now)
//!   --config <PATH>     Globe config JSON (default: built-in defaults)
//!   --markers <PATH>    JSON array of device markers to classify
//!   --point <LAT,LNG>   Extra coordinate to classify (repeatable)
//!   --step <DEG>        Grid step for the daylit fraction (default: config grid)

use std::path::Path;
use std::process::ExitCode;

use chrono::{DateTime, Utc};

use terminus::core::{Error, Result, Timestamp};
use terminus::geo::GeoCoordinate;
use terminus::globe::{GlobeConfig, TerminatorSystem};
use terminus::illumination::DaySideGrid;
use terminus::markers::DeviceMarker;

fn main() -> ExitCode {
    terminus::core::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let now = match parse_str_arg(&args, "--at") {
        Some(s) => parse_timestamp(&s)?,
        None => Utc::now(),
    };
    let config = match parse_str_arg(&args, "--config") {
        Some(path) => GlobeConfig::load(Path::new(&path))?,
        None => GlobeConfig::default(),
    };
    let step = parse_f64_arg(&args, "--step")?;

    let mut markers = match parse_str_arg(&args, "--markers") {
        Some(path) => load_markers(Path::new(&path))?,
        None => Vec::new(),
    };
    for raw in parse_all_str_args(&args, "--point") {
        markers.push(DeviceMarker::new(parse_point(&raw)?, Default::default()));
    }

    let marker_altitude = config.marker_altitude;
    let (lat_step, lng_step) = match step {
        Some(s) => (s, s),
        None => (config.grid.lat_step, config.grid.lng_step),
    };
    let mut system = TerminatorSystem::new(config)?;
    let frame = system.refresh(now);
    let sub = frame.sub_solar;
    let grid = DaySideGrid::new(sub, lat_step, lng_step)?;

    println!("=== Terminus Sun Report ===");
    println!("Instant:     {}", now.to_rfc3339());
    println!("Declination: {:+.3}°", sub.declination());
    println!("Longitude:   {:+.3}°", sub.longitude());
    let d = frame.sun_direction;
    println!("Sun dir:     ({:+.4}, {:+.4}, {:+.4})", d.x(), d.y(), d.z());
    println!(
        "Daylit:      {:.1}% of {} grid points ({}° x {}°)",
        grid.daylit_fraction() * 100.0,
        grid.point_count(),
        lat_step,
        lng_step
    );

    if !markers.is_empty() {
        println!();
        println!("{:>10} {:>11}  {:<8} {:<6} {:>8}  position", "lat", "lng", "status", "side", "zenith");
        for m in &markers {
            let p = m.position(marker_altitude);
            println!(
                "{:>10.4} {:>11.4}  {:<8} {:<6} {:>7.2}°  ({:+.3}, {:+.3}, {:+.3})",
                m.coord.lat(),
                m.coord.lng(),
                m.status,
                if m.is_daylit(sub) { "day" } else { "night" },
                sub.zenith_angle(&m.coord),
                p.x,
                p.y,
                p.z
            );
        }
    }

    Ok(())
}

fn parse_timestamp(s: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Timestamp(format!("{s}: {e}")))
}

fn parse_point(s: &str) -> Result<GeoCoordinate> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| Error::Config(format!("--point expects LAT,LNG, got {s:?}")))?;
    let lat: f64 = lat.trim().parse().map_err(|_| Error::Config(format!("bad latitude in {s:?}")))?;
    let lng: f64 = lng.trim().parse().map_err(|_| Error::Config(format!("bad longitude in {s:?}")))?;
    GeoCoordinate::try_from((lat, lng))
}

fn load_markers(path: &Path) -> Result<Vec<DeviceMarker>> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

fn parse_f64_arg(args: &[String], flag: &str) -> Result<Option<f64>> {
    parse_str_arg(args, flag)
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| Error::Config(format!("{flag} expects a number, got {s:?}")))
        })
        .transpose()
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_all_str_args(args: &[String], flag: &str) -> Vec<String> {
    args.windows(2)
        .filter(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .collect()
}
