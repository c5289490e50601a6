//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::Faction;

/// Something worth reacting to that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A missile entered the scene.
    MissileLaunched { faction: Faction },
    /// A player missile hit a fighter.
    FighterHit { fighter: usize, health: i32 },
    /// A fighter's health dropped below zero.
    FighterDown { fighter: usize },
    /// A recycled fighter re-entered the fight.
    FighterRespawned { fighter: usize },
    /// The mothership took damage.
    MothershipHit { health: i32 },
    /// The destroyer took damage.
    DestroyerHit { health: i32 },
    /// The mothership was destroyed or the session was torn down.
    GameOver { score: i32 },
}
