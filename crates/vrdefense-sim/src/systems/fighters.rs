//! Fighter pool update: retarget, fly, and launch at the mothership.

use vrdefense_core::enums::Faction;
use vrdefense_core::events::GameEvent;

use crate::entities::{Fighter, Mothership};
use crate::systems::launch;
use crate::systems::FrameContext;

pub fn run(ctx: &mut FrameContext<'_>, fighters: &mut [Fighter], mothership: &Mothership) {
    let knockback = ctx.tuning.fighter_knockback;
    for (index, fighter) in fighters.iter_mut().enumerate() {
        fighter.set_target(mothership.position());
        let tick = fighter.update(ctx.scene, &mut *ctx.rng, ctx.now, knockback);
        if tick.respawned {
            log::debug!("fighter {index} respawned");
            ctx.shared.push_event(GameEvent::FighterRespawned { fighter: index });
        }

        if fighter.is_ready_to_attack(ctx.now) {
            launch::attack_mothership(
                ctx.scene,
                ctx.shared,
                Faction::Enemy,
                fighter.position(),
                mothership.position(),
                ctx.now,
            );
            fighter.set_attack_time(ctx.now);
        }
    }
}
