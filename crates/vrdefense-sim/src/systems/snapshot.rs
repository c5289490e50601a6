//! Snapshot system: reads the entities and builds a complete GameSnapshot.
//!
//! This system is read-only. It never modifies the entities.

use vrdefense_core::enums::GameStatus;
use vrdefense_core::events::GameEvent;
use vrdefense_core::state::*;
use vrdefense_core::types::SimTime;

use crate::entities::{Destroyer, Fighter, Missile, Mothership};

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: SimTime,
    status: GameStatus,
    score: i32,
    mothership: &Mothership,
    destroyer: &Destroyer,
    fighters: &[Fighter],
    missiles: &[Missile],
    events: Vec<GameEvent>,
) -> GameSnapshot {
    GameSnapshot {
        time,
        status,
        score,
        mothership: CapitalView {
            position: mothership.position(),
            health: mothership.health(),
            mode: mothership.object.mode(),
        },
        destroyer: CapitalView {
            position: destroyer.position(),
            health: destroyer.health(),
            mode: destroyer.object.mode(),
        },
        fighters: build_fighters(fighters, time.now_ms),
        missiles: count_missiles(missiles),
        events,
    }
}

fn build_fighters(fighters: &[Fighter], now: u64) -> Vec<FighterView> {
    fighters
        .iter()
        .enumerate()
        .map(|(index, fighter)| FighterView {
            index,
            kind: fighter.kind(),
            mode: fighter.object.mode(),
            health: fighter.health(),
            position: fighter.position(),
            active: fighter.is_active(now),
        })
        .collect()
}

fn count_missiles(missiles: &[Missile]) -> MissileCounts {
    let mut counts = MissileCounts::default();
    for missile in missiles {
        counts.record(missile.faction());
    }
    counts
}
