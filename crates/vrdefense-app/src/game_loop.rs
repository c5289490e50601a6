//! Game loop thread. Runs the simulation engine at the frame rate and
//! publishes snapshots.
//!
//! The engine is built by the caller (so setup errors surface there) and
//! moved into the thread. Commands arrive via an `mpsc` channel and are
//! applied at frame boundaries. Snapshots are stored in shared state for
//! polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use vrdefense_core::constants::FRAME_RATE;
use vrdefense_core::enums::GameStatus;
use vrdefense_core::state::GameSnapshot;
use vrdefense_core::types::Vec3;
use vrdefense_sim::render::Scene;
use vrdefense_sim::SimulationEngine;

use crate::orbit::OrbitDriver;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// How a session ended. `status` is the status before teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub frames: u64,
    pub score: i32,
    pub status: GameStatus,
}

/// Running game loop: the command sender plus the thread to join.
pub struct LoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<LoopOutcome>,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    scene: Arc<dyn Scene>,
    orbit: OrbitDriver,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
) -> std::io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("vrdefense-game-loop".into())
        .spawn(move || run_game_loop(engine, scene.as_ref(), &orbit, cmd_rx, &latest_snapshot))?;

    Ok(LoopHandle {
        commands: cmd_tx,
        thread,
    })
}

/// Apply every queued command. Returns false if the loop should stop.
fn drain_commands(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    aim: &mut (Vec3, Vec3),
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Signal(signal)) => engine.apply_signal(signal),
            Ok(GameLoopCommand::Aim { forward, up }) => *aim = (forward, up),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// One frame: move the scripted ships, advance, publish.
fn step(
    engine: &mut SimulationEngine,
    scene: &dyn Scene,
    orbit: &OrbitDriver,
    aim: (Vec3, Vec3),
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
) {
    if engine.game_status() == GameStatus::Playing {
        orbit.apply(
            scene,
            engine.mothership().object.handle(),
            engine.viewpoint(),
            engine.playing_ms(),
        );
    }
    let snapshot = engine.tick(aim.0, aim.1);
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
}

/// The game loop. Runs until the session ends, a Shutdown command
/// arrives, or every sender is dropped.
fn run_game_loop(
    mut engine: SimulationEngine,
    scene: &dyn Scene,
    orbit: &OrbitDriver,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
) -> LoopOutcome {
    let mut aim = (Vec3::NEG_Z, Vec3::Y);
    let mut next_frame_time = Instant::now();

    loop {
        // 1. Apply pending commands at the frame boundary
        if !drain_commands(&mut engine, &cmd_rx, &mut aim) {
            break;
        }

        // 2. Advance and publish
        step(&mut engine, scene, orbit, aim, latest_snapshot);
        if engine.game_status() == GameStatus::Ended {
            break;
        }

        // 3. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }

    let outcome = LoopOutcome {
        frames: engine.time().frame,
        score: engine.score(),
        status: engine.game_status(),
    };
    engine.teardown();
    log::info!(
        "game loop stopped after {} frames, score {}",
        outcome.frames,
        outcome.score
    );
    outcome
}
