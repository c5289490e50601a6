//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle mode shared by every entity.
///
/// Variant order matters: everything from `Dying` onward is no longer
/// alive and is eligible for removal or respawn handling.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EntityMode {
    /// Fighter closing on its waypoint.
    Attack,
    /// Fighter coasting past its waypoint before the next pass.
    Turn,
    /// Generic initial mode (missiles, mothership, destroyer).
    #[default]
    Moving,
    /// Fighter shot down, falling toward its sink point.
    Dying,
    /// Terminal for missiles, mothership and destroyer; recycle state for fighters.
    Destroyed,
}

impl EntityMode {
    pub fn is_alive(self) -> bool {
        self < EntityMode::Dying
    }
}

/// Who launched a missile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The player's head-tracked launcher.
    Player,
    /// An enemy fighter.
    Enemy,
    /// The destroyer's counter-attack (visual only).
    Destroyer,
    /// The mothership's counter-attack (visual only).
    Mothership,
}

impl Faction {
    /// Whether missiles from this faction take part in the collision pass.
    pub fn is_collidable(self) -> bool {
        matches!(self, Faction::Player | Faction::Enemy)
    }
}

/// Session status (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Paused,
    /// Terminal. Nothing transitions out of it.
    Ended,
}

impl GameStatus {
    pub fn to_u8(self) -> u8 {
        match self {
            GameStatus::Playing => 0,
            GameStatus::Paused => 1,
            GameStatus::Ended => 2,
        }
    }

    /// Inverse of [`GameStatus::to_u8`]. Unknown values read as `Ended`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => GameStatus::Playing,
            1 => GameStatus::Paused,
            _ => GameStatus::Ended,
        }
    }
}

/// Enemy fighter hull. Selects the render prototype and flight profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterKind {
    #[default]
    DarkFighter,
    Spaceship1,
    Spaceship2,
    Spaceship3,
    Spaceship4,
    Spaceship5,
    Spaceship6,
}

/// How the engine reads time for cooldowns while paused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockPolicy {
    /// Cooldowns follow the wall clock and keep running while paused.
    #[default]
    WallClock,
    /// Paused time is subtracted, so cooldowns freeze while paused.
    Pausable,
}
