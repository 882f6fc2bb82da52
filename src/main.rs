//! Headless particle morph driver: replays recorded landmarks or a synthetic
//! hand through the full pipeline and logs the resulting cloud.

use anyhow::{Context, Result};
use clap::Parser;
use hand_particle_morph::{
    color::Rgb,
    config::{Config, EXAMPLE_CONFIG},
    constants::TEST_PULSE_DURATION,
    render::LogSink,
    session::Session,
    source::{LandmarkSource, ReplaySource, SyntheticHand},
    templates::Template,
};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Initial template (sphere, flower)
    #[arg(short, long)]
    template: Option<Template>,

    /// Particle tint as hex (e.g. "#ff0055")
    #[arg(short, long)]
    color: Option<Rgb>,

    /// Number of particles
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Stop after this many ticks
    #[arg(short, long)]
    frames: Option<u64>,

    /// Tick rate
    #[arg(long)]
    fps: Option<u32>,

    /// Replay landmarks from a JSON-lines recording instead of the synthetic hand
    #[arg(short, long)]
    replay: Option<String>,

    /// Detector cadence in milliseconds
    #[arg(long, default_value = "33")]
    detector_interval: u64,

    /// Synthetic hand open/close cycle length in detector frames
    #[arg(long, default_value = "90")]
    period: u64,

    /// Seed template sampling and jitter for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log a summary line every this many ticks
    #[arg(long, default_value = "60")]
    report_every: u64,

    /// Fire a test pulse (full expansion, then release) on startup
    #[arg(long)]
    pulse: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Hand Particle Morph");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(template) = args.template {
        config.particles.template = template;
    }
    if let Some(color) = args.color {
        config.particles.color = color;
    }
    if let Some(points) = args.points {
        config.particles.point_count = points;
    }
    if let Some(fps) = args.fps {
        config.session.target_fps = fps;
    }
    if args.frames.is_some() {
        config.session.max_frames = args.frames;
    }
    config.validate().context("Invalid configuration")?;

    let interval = Duration::from_millis(args.detector_interval);
    let source: Box<dyn LandmarkSource> = match &args.replay {
        Some(path) => Box::new(ReplaySource::open(path, interval)?),
        None => Box::new(SyntheticHand::new(args.period, interval)),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let sink = LogSink::new(args.report_every);
    let mut session = Session::start_with_rng(&config, source, sink, rng)
        .context("Failed to start particle session")?;

    if args.pulse {
        session.controls().pulse(TEST_PULSE_DURATION)?;
    }

    let result = session.run();
    let stats = session.stop();
    let ticks = result.context("Tick loop failed")?;

    if stats.gave_up {
        warn!("Landmark source kept failing and was abandoned");
    }
    info!(
        "Done: {} ticks, {} detector frames ({} skipped, {} rejected)",
        ticks, stats.frames, stats.faults, stats.dropped
    );
    Ok(())
}
