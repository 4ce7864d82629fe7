//! Headless `skylift` session driven by the scripted autopilot.
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use skylift::{
    init_logging, Autopilot, Clock, FrameDriver, ManualClock, MonotonicClock, ProceduralTerrain,
    Simulation, SimulationConfig,
};

/// A tractor-beam creature collection game, run without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// World seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level to start on
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Milliseconds per tick
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Pace ticks against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run<C: Clock>(
    mut driver: FrameDriver<C, ProceduralTerrain>,
    args: &Args,
    mut pace: impl FnMut(&C),
) -> Simulation<ProceduralTerrain> {
    let mut pilot = Autopilot::default();
    let start = driver.now();
    driver.simulation_mut().start_level(args.level, start);

    for _ in 0..args.ticks {
        pace(driver.clock());
        let input = pilot.next_input(driver.simulation(), driver.now());
        let report = driver.frame(&input);
        if report.cleared_level() {
            let now = driver.now();
            let sim = driver.simulation_mut();
            info!("level {} cleared, score {}", sim.level(), sim.score());
            sim.advance_level(now);
        }
    }
    driver.into_simulation()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    info!("starting session with seed {}", config.seed);
    let simulation = Simulation::new(config);

    let finished = if args.realtime {
        let frame = Duration::from_millis(args.frame_ms);
        let driver = FrameDriver::new(MonotonicClock::new(), simulation);
        run(driver, &args, |_| thread::sleep(frame))
    } else {
        let driver = FrameDriver::new(ManualClock::default(), simulation);
        run(driver, &args, |clock: &ManualClock| clock.advance(args.frame_ms))
    };

    info!(
        "session over after {} ticks: level {}, score {}, {} creatures left",
        finished.ticks(),
        finished.level(),
        finished.score(),
        finished.creatures().len()
    );
    Ok(())
}
