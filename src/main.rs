// carsim: evolves radar-driven cars on a track image, one episode per generation.
use ai_car_sim::config::SimConfig;
use ai_car_sim::evolution::Population;
use ai_car_sim::global_variables::{
    DEFAULT_CONFIG_PATH, DEFAULT_GENERATION_LOG, DEFAULT_MAX_GENERATIONS, DEFAULT_TRACK_PATH,
};
use ai_car_sim::monitoring::{FrameRenderer, GenerationLog, RenderOptions};
use ai_car_sim::simulation_engine::simulation::Observer;
use ai_car_sim::simulation_engine::track::RasterTrack;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carsim")]
#[command(about = "AI car simulation: evolve radar-driven cars on a track image")]
struct Args {
    /// Simulation configuration file (TOML). Defaults are used when it is missing.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Track image; the pixel at (0, 0) defines the wall color
    #[arg(short, long, default_value = DEFAULT_TRACK_PATH)]
    track: PathBuf,

    /// Maximum generations to iterate
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_GENERATIONS)]
    max_generations: u32,

    /// Draw the car radars in rendered frames
    #[arg(long)]
    draw_radar: bool,

    /// Draw car rewards in rendered frames
    #[arg(long)]
    draw_reward: bool,

    /// Random seed, overrides the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Update cars in parallel within each tick
    #[arg(long)]
    parallel: bool,

    /// CSV file receiving one row per generation
    #[arg(long, default_value = DEFAULT_GENERATION_LOG)]
    log_csv: PathBuf,

    /// Directory receiving one PNG per generation with its last live frame
    #[arg(long)]
    frames: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("carsim error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> ai_car_sim::Result<()> {
    let mut config = SimConfig::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.evolution.seed = seed;
    }
    if args.parallel {
        config.episode.parallel = true;
    }
    config.validate()?;

    let track = RasterTrack::from_image(&args.track)?;
    let generation_log = GenerationLog::create(&args.log_csv)?;
    if let Some(dir) = &args.frames {
        std::fs::create_dir_all(dir)?;
    }

    let mut population = Population::new(
        config.evolution.clone(),
        config.vehicle.radar.sensor_count(),
    )?;
    let budget = config.episode.budget();
    let options = RenderOptions {
        draw_radar: args.draw_radar,
        draw_reward: args.draw_reward,
    };

    println!(
        "Evolving {} cars for {} generations on {}",
        config.evolution.population,
        args.max_generations,
        args.track.display()
    );

    for _ in 0..args.max_generations {
        let mut renderer = FrameRenderer::new(options);
        let observer: Option<&mut dyn Observer> = if args.frames.is_some() {
            Some(&mut renderer)
        } else {
            None
        };
        let stats = population.run_generation(
            &track,
            &config.vehicle,
            &budget,
            config.episode.parallel,
            observer,
        )?;
        generation_log.append(&stats)?;
        println!(
            "Generation {:>3} | best {:>9.1} | mean {:>9.1} | alive {:>3}/{} | ticks {}",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.survivors,
            stats.population,
            stats.ticks
        );

        if let Some(dir) = &args.frames {
            let hud = vec![
                "AI Car Simulation".to_string(),
                format!("Generation: {}", stats.generation),
                format!("Cars Alive: {}", renderer.num_alive()),
                format!("Tick: {}", renderer.tick()),
            ];
            let frame = dir.join(format!("generation_{:03}.png", stats.generation));
            renderer.render_png(&track, &frame, &hud)?;
        }
    }

    let history = GenerationLog::read_all(generation_log.path())?;
    let best = history
        .iter()
        .max_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness));
    match best {
        Some(stats) => println!(
            "Best generation: {} with fitness {:.1} (log: {})",
            stats.generation,
            stats.best_fitness,
            generation_log.path().display()
        ),
        None => println!("No generations were run."),
    }
    Ok(())
}
