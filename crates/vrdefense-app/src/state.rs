//! Application state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use vrdefense_core::commands::ControlSignal;
use vrdefense_core::state::GameSnapshot;
use vrdefense_core::types::Vec3;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy)]
pub enum GameLoopCommand {
    /// A control signal to apply at the next frame boundary.
    Signal(ControlSignal),
    /// New head-tracked view vectors.
    Aim { forward: Vec3, up: Vec3 },
    /// Tear the session down and stop the loop.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` so the state can be shared
///   between threads.
/// - The latest snapshot lives in an `Arc<Mutex<...>>` shared with the
///   game loop thread.
/// - A session is running while a command sender is installed.
pub struct AppState {
    /// `None` before the game loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the state a live game loop's command sender.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = Some(tx);
        }
    }

    /// Drop the sender. The loop stops once every other sender is gone.
    pub fn detach(&self) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = None;
        }
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().is_ok_and(|tx| tx.is_some())
    }

    /// Forward a command to the game loop. False if no loop is listening.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(tx) = self.command_tx.lock() else {
            return false;
        };
        tx.as_ref().is_some_and(|tx| tx.send(command).is_ok())
    }

    /// Queue a new aim followed by a fire signal. The loop applies both at
    /// the same frame boundary, so the missile leaves along `forward`.
    pub fn aim_and_fire(&self, forward: Vec3, up: Vec3) -> bool {
        self.send(GameLoopCommand::Aim { forward, up })
            && self.send(GameLoopCommand::Signal(ControlSignal::Fire))
    }

    /// Copy of the most recent snapshot, if a frame has run.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }
}
