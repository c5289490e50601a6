//! Control signals delivered to the simulation from outside the frame loop.
//!
//! Signals are queued and applied at the next frame boundary so a frame
//! never observes a half-applied pause.

use serde::{Deserialize, Serialize};

/// Discrete control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlSignal {
    /// Launch a player missile (rate limited).
    Fire,
    /// Tear the session down.
    EndSession,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Pause audio playback only.
    PauseAudio,
    /// Resume audio playback only.
    ResumeAudio,
}
