//! Mothership and destroyer updates plus their counter-attacks.
//!
//! Counter-attack missiles are visual only: the damage is applied here,
//! when the shot is scheduled, and the missiles skip the collision pass.

use vrdefense_core::enums::Faction;
use vrdefense_core::events::GameEvent;

use crate::entities::{Destroyer, Mothership};
use crate::systems::launch;
use crate::systems::{Flow, FrameContext};

/// Update the mothership and fire at the destroyer when its timer is up.
pub fn run_mothership(
    ctx: &mut FrameContext<'_>,
    mothership: &mut Mothership,
    destroyer: &mut Destroyer,
) {
    mothership.update(ctx.scene, ctx.now);
    if !mothership.is_attacking_time(ctx.now) {
        return;
    }
    launch::attack_destroyer(
        ctx.scene,
        ctx.shared,
        &mut *ctx.rng,
        mothership.position(),
        destroyer.position(),
        ctx.now,
    );
    mothership.set_attack_time(ctx.now);

    destroyer.attacked(ctx.tuning.counter_attack_damage, ctx.scene, ctx.now);
    ctx.shared.add_score(ctx.tuning.score_destroyer_hit);
    ctx.shared.push_event(GameEvent::DestroyerHit {
        health: destroyer.health(),
    });
}

/// Update the destroyer and fire at the mothership when its timer is up.
pub fn run_destroyer(
    ctx: &mut FrameContext<'_>,
    destroyer: &mut Destroyer,
    mothership: &mut Mothership,
) -> Flow {
    destroyer.update(ctx.scene, ctx.now);
    if !destroyer.is_attacking_time(ctx.now) {
        return Flow::Continue;
    }
    launch::attack_mothership(
        ctx.scene,
        ctx.shared,
        Faction::Destroyer,
        destroyer.launch_point(),
        mothership.position(),
        ctx.now,
    );
    destroyer.set_attack_time(ctx.now);

    let destroyed = mothership.attacked(ctx.tuning.counter_attack_damage, ctx.scene, ctx.now);
    ctx.shared.add_score(ctx.tuning.score_mothership_hit);
    ctx.shared.push_event(GameEvent::MothershipHit {
        health: mothership.health(),
    });
    if destroyed {
        Flow::GameOver
    } else {
        Flow::Continue
    }
}
