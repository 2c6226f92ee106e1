// radar_probe: places one car on a track and prints what its radar sees as JSON.
use ai_car_sim::config::SimConfig;
use ai_car_sim::global_variables::{DEFAULT_CONFIG_PATH, DEFAULT_TRACK_PATH};
use ai_car_sim::simulation_engine::movement::Point;
use ai_car_sim::simulation_engine::radar::RadarReading;
use ai_car_sim::simulation_engine::track::RasterTrack;
use ai_car_sim::simulation_engine::vehicles::Vehicle;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radar_probe")]
#[command(about = "Print a single radar sweep for a car placed on a track image")]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(short, long, default_value = DEFAULT_TRACK_PATH)]
    track: PathBuf,

    /// Top-left x of the car, overrides the configured start
    #[arg(long)]
    x: Option<f64>,

    /// Top-left y of the car, overrides the configured start
    #[arg(long)]
    y: Option<f64>,

    /// Heading in degrees, overrides the configured start
    #[arg(long, allow_negative_numbers = true)]
    heading: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Probe {
    position: Point,
    heading: f64,
    center: Point,
    corners: [Point; 4],
    collided: bool,
    readings: Vec<RadarReading>,
    observation: Vec<f64>,
}

fn run(args: Args) -> ai_car_sim::Result<()> {
    let config = SimConfig::load_or_default(&args.config)?;
    let mut spec = config.vehicle;
    if let Some(x) = args.x {
        spec.start_x = x;
    }
    if let Some(y) = args.y {
        spec.start_y = y;
    }
    if let Some(heading) = args.heading {
        spec.heading = heading;
    }

    let track = RasterTrack::from_image(&args.track)?;
    let mut vehicle = Vehicle::new(0, &spec)?;
    let collided = vehicle.check_collision(&track)?;
    if !collided {
        vehicle.sense(&track)?;
    }

    let probe = Probe {
        position: vehicle.position(),
        heading: vehicle.heading(),
        center: vehicle.center(),
        corners: *vehicle.corners(),
        collided,
        readings: vehicle.radars().to_vec(),
        observation: vehicle.observation(),
    };
    println!("{}", serde_json::to_string_pretty(&probe)?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("Probe error: {}", e);
        std::process::exit(1);
    }
}
