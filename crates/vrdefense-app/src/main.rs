use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;

use vrdefense_app::game_loop::{self, LoopOutcome};
use vrdefense_app::orbit::OrbitDriver;
use vrdefense_app::state::{AppState, GameLoopCommand};
use vrdefense_app::{link, logging};
use vrdefense_core::config::SimConfig;
use vrdefense_core::enums::GameStatus;
use vrdefense_core::state::GameSnapshot;
use vrdefense_core::types::Vec3;
use vrdefense_sim::audio::SilentAudio;
use vrdefense_sim::clock::SystemClock;
use vrdefense_sim::render::{HeadlessScene, Scene};
use vrdefense_sim::SimulationEngine;

/// Headless VR Defense session
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session length in seconds
    #[arg(short, long, default_value_t = 60)]
    seconds: u64,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Aim at the nearest fighter and fire every N ms (0 disables)
    #[arg(long, default_value_t = 0)]
    autofire_ms: u64,

    /// Read controller packets from stdin
    #[arg(long)]
    stdin_link: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SimConfig, vrdefense_core::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Direction from the mothership's deck to the nearest live fighter.
fn nearest_fighter_direction(snapshot: &GameSnapshot) -> Option<Vec3> {
    let eye = snapshot.mothership.position;
    snapshot
        .fighters
        .iter()
        .filter(|f| f.active && f.mode.is_alive())
        .map(|f| f.position - eye)
        .min_by(|a, b| a.length().total_cmp(&b.length()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let scene: Arc<dyn Scene> = Arc::new(HeadlessScene::new());
    let engine = match SimulationEngine::new(
        config,
        Arc::clone(&scene),
        Box::new(SilentAudio::new()),
        Arc::new(SystemClock::new()),
    ) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("session setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let status = engine.status_reader();

    let app = AppState::new();
    let handle = match game_loop::spawn_game_loop(
        engine,
        Arc::clone(&scene),
        OrbitDriver::default(),
        Arc::clone(&app.latest_snapshot),
    ) {
        Ok(handle) => handle,
        Err(err) => {
            log::error!("failed to start game loop: {err}");
            return ExitCode::FAILURE;
        }
    };
    app.attach(handle.commands.clone());

    if args.stdin_link {
        let commands = handle.commands.clone();
        std::thread::spawn(move || {
            if let Err(err) = link::pump(std::io::stdin().lock(), &commands) {
                log::warn!("{err}");
            }
        });
    }

    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let poll = if args.autofire_ms > 0 {
        Duration::from_millis(args.autofire_ms)
    } else {
        Duration::from_millis(250)
    };
    while app.is_running() && Instant::now() < deadline && status.status() != GameStatus::Ended {
        std::thread::sleep(poll);
        if args.autofire_ms == 0 {
            continue;
        }
        if let Some(forward) = app.snapshot().as_ref().and_then(nearest_fighter_direction) {
            app.aim_and_fire(forward, Vec3::Y);
        }
    }

    app.send(GameLoopCommand::Shutdown);
    app.detach();
    let outcome = match handle.thread.join() {
        Ok(outcome) => outcome,
        Err(_) => {
            log::error!("game loop thread panicked");
            return ExitCode::FAILURE;
        }
    };

    let LoopOutcome { frames, score, status } = outcome;
    println!("frames={frames} score={score} status={status:?}");
    ExitCode::SUCCESS
}
