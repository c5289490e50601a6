//! Game state snapshot: the visible state handed to the embedding after a frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{SimTime, Vec3};

/// Complete visible state of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub status: GameStatus,
    pub score: i32,
    pub mothership: CapitalView,
    pub destroyer: CapitalView,
    pub fighters: Vec<FighterView>,
    pub missiles: MissileCounts,
    pub events: Vec<GameEvent>,
}

/// Mothership or destroyer status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalView {
    pub position: Vec3,
    pub health: i32,
    pub mode: EntityMode,
}

/// One fighter of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub index: usize,
    pub kind: FighterKind,
    pub mode: EntityMode,
    pub health: i32,
    pub position: Vec3,
    /// False until the fighter's spawn delay has elapsed.
    pub active: bool,
}

/// Live missiles grouped by faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileCounts {
    pub player: u32,
    pub enemy: u32,
    pub destroyer: u32,
    pub mothership: u32,
}

impl MissileCounts {
    pub fn record(&mut self, faction: Faction) {
        match faction {
            Faction::Player => self.player += 1,
            Faction::Enemy => self.enemy += 1,
            Faction::Destroyer => self.destroyer += 1,
            Faction::Mothership => self.mothership += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.player + self.enemy + self.destroyer + self.mothership
    }
}
