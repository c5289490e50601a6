//! Missile pass: advance, reap, and resolve hits.
//!
//! Holds the missile lock for the whole pass so a concurrent player shot
//! lands either before or after it, never in the middle. Iterates in
//! reverse so removals do not disturb the indices still to visit.

use vrdefense_core::enums::{EntityMode, Faction};
use vrdefense_core::events::GameEvent;

use crate::entities::{Fighter, Mothership};
use crate::systems::{Flow, FrameContext};

pub fn run(
    ctx: &mut FrameContext<'_>,
    mothership: &mut Mothership,
    fighters: &mut [Fighter],
) -> Flow {
    let scene = ctx.scene;
    let shared = ctx.shared;
    let tuning = ctx.tuning;
    let now = ctx.now;
    let mut missiles = shared.missiles();

    let mut i = missiles.len();
    while i > 0 {
        i -= 1;
        if missiles[i].update(scene, now) == EntityMode::Destroyed {
            let spent = missiles.remove(i);
            scene.remove(spent.object.handle());
            continue;
        }
        let faction = missiles[i].faction();
        if !faction.is_collidable() {
            continue;
        }
        missiles[i].object.refresh_bounds(scene);

        let missile = &missiles[i];
        let hit = match faction {
            Faction::Enemy => {
                if missile.object.intersects(&mothership.object) {
                    let destroyed = mothership.attacked(tuning.missile_damage, scene, now);
                    shared.add_score(tuning.score_mothership_hit);
                    shared.push_event(GameEvent::MothershipHit {
                        health: mothership.health(),
                    });
                    if destroyed {
                        let spent = missiles.remove(i);
                        scene.remove(spent.object.handle());
                        return Flow::GameOver;
                    }
                    true
                } else {
                    false
                }
            }
            Faction::Player => {
                let mut hit = false;
                for (index, fighter) in fighters.iter_mut().enumerate() {
                    if !fighter.object.is_alive()
                        || !fighter.is_active(now)
                        || !missile.object.intersects(&fighter.object)
                    {
                        continue;
                    }
                    hit = true;
                    let went_down = fighter.attacked(tuning.missile_damage, scene, now);
                    fighter.set_attack_vector(missile.facing());
                    shared.add_score(tuning.score_enemy_hit);
                    shared.push_event(GameEvent::FighterHit {
                        fighter: index,
                        health: fighter.health(),
                    });
                    if went_down {
                        log::debug!("fighter {index} shot down");
                        shared.add_score(tuning.score_enemy_destroyed);
                        shared.push_event(GameEvent::FighterDown { fighter: index });
                    }
                }
                hit
            }
            Faction::Destroyer | Faction::Mothership => false,
        };

        if hit {
            let spent = missiles.remove(i);
            scene.remove(spent.object.handle());
        }
    }
    Flow::Continue
}
