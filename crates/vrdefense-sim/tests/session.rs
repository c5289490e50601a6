//! End-to-end session runs through the public API only.

use std::sync::Arc;

use vrdefense_sim::audio::SilentAudio;
use vrdefense_sim::clock::ManualClock;
use vrdefense_sim::core::config::SimConfig;
use vrdefense_sim::core::enums::{Faction, GameStatus};
use vrdefense_sim::core::events::GameEvent;
use vrdefense_sim::core::types::Vec3;
use vrdefense_sim::render::{HeadlessScene, Prototype, Scene};
use vrdefense_sim::SimulationEngine;

const FRAME_MS: u64 = 16;

fn start(config: SimConfig) -> (SimulationEngine, Arc<HeadlessScene>, Arc<ManualClock>) {
    let scene = Arc::new(HeadlessScene::new());
    let clock = ManualClock::new(0);
    let engine = SimulationEngine::new(
        config,
        scene.clone(),
        Box::new(SilentAudio::new()),
        clock.clone(),
    )
    .expect("headless setup cannot fail");
    (engine, scene, clock)
}

/// Aim from the viewpoint at the nearest active fighter, if any.
fn aim_at_nearest(engine: &SimulationEngine, scene: &HeadlessScene, now: u64) -> Vec3 {
    let eye = scene.position(engine.viewpoint()).unwrap_or_default();
    engine
        .fighters()
        .iter()
        .filter(|f| f.is_active(now) && f.object.is_alive())
        .map(|f| f.position() - eye)
        .min_by(|a, b| a.length().total_cmp(&b.length()))
        .unwrap_or(Vec3::NEG_Z)
}

#[test]
fn minute_long_session_keeps_scene_and_state_consistent() {
    let (mut engine, scene, clock) = start(SimConfig::default());
    let mut last_mothership = engine.mothership().health();
    let mut last_destroyer = engine.destroyer().health();
    let mut enemy_launches = 0;

    for frame in 0..(60_000 / FRAME_MS) {
        let now = frame * FRAME_MS;
        clock.set(now);
        let forward = aim_at_nearest(&engine, &scene, now);
        engine.advance_frame(forward, Vec3::Y);
        if frame % 25 == 0 {
            engine.fire();
        }
        let snap = engine.snapshot();

        assert_eq!(snap.status, GameStatus::Playing);
        assert!(snap.mothership.health <= last_mothership);
        assert!(snap.destroyer.health <= last_destroyer);
        last_mothership = snap.mothership.health;
        last_destroyer = snap.destroyer.health;

        for fighter in &snap.fighters {
            assert!(fighter.health <= 100);
        }
        for (faction, count) in [
            (Faction::Player, snap.missiles.player),
            (Faction::Enemy, snap.missiles.enemy),
            (Faction::Destroyer, snap.missiles.destroyer),
            (Faction::Mothership, snap.missiles.mothership),
        ] {
            assert_eq!(scene.count_of(Prototype::Missile(faction)), count as usize);
        }
        // Mothership, destroyer, viewpoint, the pool, and the live missiles
        assert_eq!(
            scene.live_count(),
            3 + snap.fighters.len() + snap.missiles.total() as usize
        );

        enemy_launches += snap
            .events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::MissileLaunched {
                        faction: Faction::Enemy
                    }
                )
            })
            .count();
    }

    assert!(enemy_launches > 0, "active fighters attack the mothership");
    engine.teardown();
    assert_eq!(scene.live_count(), 0);
}

#[test]
fn mothership_follows_the_scene() {
    let (mut engine, scene, clock) = start(SimConfig {
        fighter_count: 0,
        ..Default::default()
    });
    let handle = engine.mothership().object.handle();
    let moved = Vec3::new(100.0, 15.0, 0.0);
    scene.set_position(handle, moved);
    clock.set(FRAME_MS);
    let snap = engine.tick(Vec3::NEG_Z, Vec3::Y);
    assert_eq!(snap.mothership.position, moved);
}
