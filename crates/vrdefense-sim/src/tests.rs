//! Tests for the simulation engine, the frame systems and the collision pass.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vrdefense_core::config::{SimConfig, Tuning};
use vrdefense_core::constants::*;
use vrdefense_core::enums::*;
use vrdefense_core::events::GameEvent;
use vrdefense_core::types::Vec3;

use crate::audio::SilentAudio;
use crate::clock::{GameClock, ManualClock};
use crate::engine::{SetupError, SimulationEngine};
use crate::entities::{Fighter, Mothership};
use crate::render::{HeadlessScene, Prototype, Scene};
use crate::shared::SharedState;
use crate::systems::{self, Flow, FrameContext};
use crate::world_setup::MOTHERSHIP_START;

const FORWARD: Vec3 = Vec3::NEG_Z;
const UP: Vec3 = Vec3::Y;

// ---- Fixtures ----

fn engine_with(config: SimConfig) -> (SimulationEngine, Arc<HeadlessScene>, Arc<ManualClock>) {
    let scene = Arc::new(HeadlessScene::new());
    let clock = ManualClock::new(0);
    let engine = SimulationEngine::new(
        config,
        scene.clone(),
        Box::new(SilentAudio::new()),
        clock.clone(),
    )
    .unwrap();
    (engine, scene, clock)
}

fn config_without_fighters() -> SimConfig {
    SimConfig {
        fighter_count: 0,
        ..Default::default()
    }
}

/// Entities wired up by hand so a single system can be run in isolation.
struct Bench {
    scene: HeadlessScene,
    shared: SharedState,
    rng: ChaCha8Rng,
    tuning: Tuning,
    mothership: Mothership,
    fighters: Vec<Fighter>,
}

impl Bench {
    fn new() -> Self {
        let scene = HeadlessScene::new();
        let handle = scene.spawn(Prototype::Mothership).unwrap();
        scene.set_position(handle, MOTHERSHIP_START);
        let mut mothership = Mothership::new(handle, MOTHERSHIP_START, MOTHERSHIP_ATTACK_INTERVAL_MS);
        mothership.object.refresh_bounds(&scene);
        Self {
            shared: SharedState::new(GameClock::new(ManualClock::new(0))),
            rng: ChaCha8Rng::seed_from_u64(1),
            tuning: Tuning::default(),
            mothership,
            fighters: Vec::new(),
            scene,
        }
    }

    fn add_fighter(&mut self, position: Vec3) -> usize {
        let handle = self
            .scene
            .spawn(Prototype::Fighter(FighterKind::DarkFighter))
            .unwrap();
        self.scene.set_position(handle, position);
        let mut fighter = Fighter::new(
            handle,
            FighterKind::DarkFighter,
            position,
            FIGHTER_TARGET_OFFSET,
            FIGHTER_MAX_SPEED,
            0,
        );
        fighter.set_target(self.mothership.position());
        fighter.object.refresh_bounds(&self.scene);
        self.fighters.push(fighter);
        self.fighters.len() - 1
    }

    /// Launch a missile one unit short of `at`, flying through it.
    fn missile_into(&self, faction: Faction, at: Vec3, now: u64) {
        let from = at - Vec3::Z;
        systems::launch::spawn_missile(
            &self.scene,
            &self.shared,
            faction,
            from,
            at + Vec3::Z * 20.0,
            MISSILE_SPEED,
            now,
        );
    }

    fn run_missiles(&mut self, now: u64) -> Flow {
        let mut ctx = FrameContext {
            scene: &self.scene,
            shared: &self.shared,
            rng: &mut self.rng,
            tuning: &self.tuning,
            now,
        };
        systems::missiles::run(&mut ctx, &mut self.mothership, &mut self.fighters)
    }

    fn missile_count(&self) -> usize {
        self.shared.missiles().len()
    }
}

// ---- Collision pass ----

#[test]
fn test_seven_hits_take_fighter_down() {
    let mut bench = Bench::new();
    let at = Vec3::new(60.0, 20.0, 0.0);
    let idx = bench.add_fighter(at);

    for hit in 1..=6 {
        let before = bench.shared.score();
        bench.missile_into(Faction::Player, at, 0);
        assert_eq!(bench.run_missiles(0), Flow::Continue);
        assert_eq!(bench.shared.score() - before, SCORE_ENEMY_HIT, "hit {hit}");
        assert_eq!(bench.fighters[idx].health(), FIGHTER_HEALTH - MISSILE_DAMAGE * hit);
        assert!(bench.fighters[idx].object.is_alive());
        assert_eq!(bench.missile_count(), 0, "missile removed on hit");
    }
    assert_eq!(bench.fighters[idx].health(), 10);

    bench.missile_into(Faction::Player, at, 0);
    bench.run_missiles(0);
    assert_eq!(bench.fighters[idx].object.mode(), EntityMode::Dying);
    assert_eq!(
        bench.shared.score(),
        7 * SCORE_ENEMY_HIT + SCORE_ENEMY_DESTROYED
    );
    assert_eq!(bench.fighters[idx].attack_vector(), Vec3::Z);

    let events = bench.shared.take_events();
    assert!(events.contains(&GameEvent::FighterDown { fighter: idx }));
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::FighterHit { .. }))
        .count();
    assert_eq!(hits, 7);
}

#[test]
fn test_dying_fighter_is_not_hit_again() {
    let mut bench = Bench::new();
    let at = Vec3::new(60.0, 20.0, 0.0);
    let idx = bench.add_fighter(at);
    bench.fighters[idx].attacked(200, &bench.scene, 0);
    let health = bench.fighters[idx].health();
    let score = bench.shared.score();

    bench.missile_into(Faction::Player, at, 0);
    bench.run_missiles(0);
    assert_eq!(bench.fighters[idx].health(), health);
    assert_eq!(bench.shared.score(), score);
    // Missile keeps flying
    assert_eq!(bench.missile_count(), 1);
}

#[test]
fn test_one_missile_can_hit_overlapping_fighters() {
    let mut bench = Bench::new();
    let at = Vec3::new(60.0, 20.0, 0.0);
    let a = bench.add_fighter(at);
    let b = bench.add_fighter(at + Vec3::X);

    bench.missile_into(Faction::Player, at, 0);
    bench.run_missiles(0);
    assert_eq!(bench.fighters[a].health(), FIGHTER_HEALTH - MISSILE_DAMAGE);
    assert_eq!(bench.fighters[b].health(), FIGHTER_HEALTH - MISSILE_DAMAGE);
    assert_eq!(bench.shared.score(), 2 * SCORE_ENEMY_HIT);
    assert_eq!(bench.missile_count(), 0);
}

#[test]
fn test_enemy_missile_damages_mothership_once() {
    let mut bench = Bench::new();
    bench.missile_into(Faction::Enemy, MOTHERSHIP_START, 0);
    assert_eq!(bench.run_missiles(0), Flow::Continue);

    assert_eq!(bench.mothership.health(), CAPITAL_HEALTH - MISSILE_DAMAGE);
    assert_eq!(bench.shared.score(), SCORE_MOTHERSHIP_HIT);
    assert_eq!(bench.missile_count(), 0);
    assert!(bench.mothership.is_flashing());

    bench.run_missiles(1);
    assert_eq!(bench.mothership.health(), CAPITAL_HEALTH - MISSILE_DAMAGE);
}

#[test]
fn test_non_collidable_missiles_never_damage_mothership() {
    let mut bench = Bench::new();
    bench.missile_into(Faction::Destroyer, MOTHERSHIP_START, 0);
    bench.missile_into(Faction::Mothership, MOTHERSHIP_START, 0);

    for frame in 0..10 {
        bench.run_missiles(frame);
    }
    assert_eq!(bench.mothership.health(), CAPITAL_HEALTH);
    assert_eq!(bench.shared.score(), 0);
}

#[test]
fn test_player_fire_never_damages_mothership() {
    let mut bench = Bench::new();
    for n in 0..20 {
        bench.missile_into(Faction::Player, MOTHERSHIP_START, n);
    }
    for frame in 0..60 {
        bench.run_missiles(frame);
    }
    assert_eq!(bench.mothership.health(), CAPITAL_HEALTH);
    assert_eq!(bench.shared.score(), 0);
}

#[test]
fn test_fatal_hit_stops_the_pass() {
    let mut bench = Bench::new();
    bench
        .mothership
        .attacked(CAPITAL_HEALTH - 10, &bench.scene, 0);
    bench.missile_into(Faction::Enemy, MOTHERSHIP_START, 0);
    bench.missile_into(Faction::Enemy, MOTHERSHIP_START, 0);
    let untouched = bench.shared.missiles()[0].position();

    assert_eq!(bench.run_missiles(0), Flow::GameOver);
    assert!(bench.mothership.is_destroyed());
    // The fatal missile is reaped; the one still queued was never advanced
    let missiles = bench.shared.missiles();
    assert_eq!(missiles.len(), 1);
    assert_eq!(missiles[0].position(), untouched);
}

#[test]
fn test_expired_missile_is_reaped_with_its_handle() {
    let mut bench = Bench::new();
    bench.missile_into(Faction::Player, Vec3::new(0.0, 200.0, 0.0), 0);
    let handle = bench.shared.missiles()[0].object.handle();

    bench.run_missiles(MISSILE_TTL_MS - 1);
    assert_eq!(bench.missile_count(), 1);
    bench.run_missiles(MISSILE_TTL_MS);
    assert_eq!(bench.missile_count(), 0);
    assert!(!bench.scene.contains(handle));
}

// ---- Engine ----

#[test]
fn test_determinism_same_seed() {
    let (mut engine_a, _, clock_a) = engine_with(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let (mut engine_b, _, clock_b) = engine_with(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for _ in 0..1500 {
        clock_a.advance(16);
        clock_b.advance(16);
        let snap_a = engine_a.tick(FORWARD, UP);
        let snap_b = engine_b.tick(FORWARD, UP);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_different_seeds_place_fighters_differently() {
    let (engine_a, _, _) = engine_with(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let (engine_b, _, _) = engine_with(SimConfig {
        seed: 222,
        ..Default::default()
    });
    let pos_a: Vec<Vec3> = engine_a.fighters().iter().map(|f| f.position()).collect();
    let pos_b: Vec<Vec3> = engine_b.fighters().iter().map(|f| f.position()).collect();
    assert_ne!(pos_a, pos_b);
}

#[test]
fn test_fighter_pool_staggered_activation() {
    let (engine, _, _) = engine_with(SimConfig::default());
    let times: Vec<u64> = engine.fighters().iter().map(|f| f.active_at()).collect();
    assert_eq!(times, vec![10_000, 15_000, 20_000, 25_000, 30_000]);
}

#[test]
fn test_failed_fighter_excluded_from_pool() {
    let scene = Arc::new(HeadlessScene::new());
    scene.fail_prototype(Prototype::Fighter(FighterKind::DarkFighter));
    let engine = SimulationEngine::new(
        SimConfig::default(),
        scene.clone(),
        Box::new(SilentAudio::new()),
        ManualClock::new(0),
    )
    .unwrap();
    assert!(engine.fighters().is_empty());
}

#[test]
fn test_missing_capital_asset_fails_setup() {
    let scene = Arc::new(HeadlessScene::new());
    scene.fail_prototype(Prototype::Destroyer);
    let result = SimulationEngine::new(
        SimConfig::default(),
        scene,
        Box::new(SilentAudio::new()),
        ManualClock::new(0),
    );
    assert!(matches!(
        result,
        Err(SetupError::Spawn {
            what: "destroyer",
            ..
        })
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SimConfig::default();
    config.tuning.player_fire_range = 0.0;
    let result = SimulationEngine::new(
        config,
        Arc::new(HeadlessScene::new()),
        Box::new(SilentAudio::new()),
        ManualClock::new(0),
    );
    assert!(matches!(result, Err(SetupError::Config(_))));
}

#[test]
fn test_fire_rate_limited() {
    let (mut engine, _, clock) = engine_with(config_without_fighters());
    // No view direction yet
    assert!(!engine.fire());

    engine.advance_frame(FORWARD, UP);
    clock.set(1000);
    assert!(engine.fire());
    assert!(!engine.fire());
    clock.set(1000 + PLAYER_FIRE_INTERVAL_MS - 1);
    assert!(!engine.fire());
    clock.set(1000 + PLAYER_FIRE_INTERVAL_MS);
    assert!(engine.fire());

    let player = engine
        .missiles()
        .iter()
        .filter(|m| m.faction() == Faction::Player)
        .count();
    assert_eq!(player, 2);
}

#[test]
fn test_fire_aims_along_view_from_viewpoint() {
    let (mut engine, scene, _) = engine_with(config_without_fighters());
    let eye = Vec3::new(3.0, 20.0, 90.0);
    scene.set_position(engine.viewpoint(), eye);
    engine.advance_frame(Vec3::new(0.0, 0.0, -2.0), UP);
    assert!(engine.fire());

    let missile = engine
        .missiles()
        .into_iter()
        .find(|m| m.faction() == Faction::Player)
        .unwrap();
    assert_eq!(missile.position(), eye);
    assert_eq!(missile.target(), eye + FORWARD * PLAYER_FIRE_RANGE);
}

#[test]
fn test_fire_rejected_unless_playing() {
    let (mut engine, _, _) = engine_with(config_without_fighters());
    engine.advance_frame(FORWARD, UP);
    engine.pause_game();
    assert!(!engine.fire());
    engine.resume_game();
    assert!(engine.fire());
}

#[test]
fn test_fire_from_another_thread() {
    let (mut engine, scene, _) = engine_with(config_without_fighters());
    engine.advance_frame(FORWARD, UP);
    let before = scene.count_of(Prototype::Missile(Faction::Player));

    let trigger = engine.fire_handle();
    let fired = std::thread::spawn(move || trigger.fire()).join().unwrap();
    assert!(fired);
    assert_eq!(scene.count_of(Prototype::Missile(Faction::Player)), before + 1);

    engine.advance_frame(FORWARD, UP);
    assert!(engine
        .missiles()
        .iter()
        .any(|m| m.faction() == Faction::Player));
}

#[test]
fn test_paused_frames_change_nothing() {
    let mut config = SimConfig::default();
    config.tuning.fighter_first_delay_ms = 0;
    let (mut engine, _, clock) = engine_with(config);
    for _ in 0..200 {
        clock.advance(16);
        engine.advance_frame(FORWARD, UP);
    }
    let before = engine.snapshot();

    engine.pause_game();
    assert_eq!(engine.game_status(), GameStatus::Paused);
    for _ in 0..200 {
        clock.advance(16);
        engine.advance_frame(FORWARD, UP);
    }
    let after = engine.snapshot();

    assert_eq!(after.time, before.time);
    assert_eq!(after.score, before.score);
    assert_eq!(after.fighters, before.fighters);
    assert_eq!(after.mothership, before.mothership);
    assert_eq!(after.destroyer, before.destroyer);
    assert_eq!(after.missiles, before.missiles);
    assert!(after.events.is_empty());
}

#[test]
fn test_wall_clock_cooldowns_run_while_paused() {
    let (mut engine, _, clock) = engine_with(config_without_fighters());
    engine.advance_frame(FORWARD, UP);
    engine.take_events();

    clock.set(100);
    engine.pause_game();
    clock.set(10_100);
    engine.resume_game();
    engine.advance_frame(FORWARD, UP);

    // Both capital ships are due again immediately
    let launched = engine.take_events();
    assert!(launched.contains(&GameEvent::MissileLaunched {
        faction: Faction::Mothership
    }));
    assert!(launched.contains(&GameEvent::MissileLaunched {
        faction: Faction::Destroyer
    }));
}

#[test]
fn test_playing_time_skips_pauses_under_both_policies() {
    for policy in [ClockPolicy::WallClock, ClockPolicy::Pausable] {
        let (mut engine, _, clock) = engine_with(SimConfig {
            clock_policy: policy,
            ..config_without_fighters()
        });
        clock.set(1_000);
        engine.pause_game();
        clock.set(31_000);
        assert_eq!(engine.playing_ms(), 1_000);
        engine.resume_game();
        assert_eq!(engine.playing_ms(), 1_000);
        clock.set(31_500);
        assert_eq!(engine.playing_ms(), 1_500);
    }
}

#[test]
fn test_pausable_clock_freezes_cooldowns() {
    let (mut engine, _, clock) = engine_with(SimConfig {
        clock_policy: ClockPolicy::Pausable,
        ..config_without_fighters()
    });
    engine.advance_frame(FORWARD, UP);
    engine.take_events();

    clock.set(100);
    engine.pause_game();
    clock.set(10_100);
    engine.resume_game();
    engine.advance_frame(FORWARD, UP);

    assert_eq!(engine.time().now_ms, 100);
    let launched = engine.take_events();
    assert!(!launched.contains(&GameEvent::MissileLaunched {
        faction: Faction::Mothership
    }));
}

#[test]
fn test_counter_attack_cadence_and_score() {
    let (mut engine, _, clock) = engine_with(config_without_fighters());
    let mut mothership_shots = 0;
    let mut destroyer_shots = 0;
    // Frames every 100 ms from 0 through 12_900
    for frame in 0..130 {
        clock.set(frame * 100);
        engine.advance_frame(FORWARD, UP);
        for event in engine.take_events() {
            match event {
                GameEvent::MissileLaunched {
                    faction: Faction::Mothership,
                } => mothership_shots += 1,
                GameEvent::MissileLaunched {
                    faction: Faction::Destroyer,
                } => destroyer_shots += 1,
                _ => {}
            }
        }
    }
    // Burst of five, then an 11 s cooldown
    assert_eq!(destroyer_shots, DESTROYER_BURST_LEN as i32);
    assert_eq!(mothership_shots, 7);
    assert_eq!(
        engine.score(),
        mothership_shots * SCORE_DESTROYER_HIT + destroyer_shots * SCORE_MOTHERSHIP_HIT
    );
    assert_eq!(
        engine.destroyer().health(),
        CAPITAL_HEALTH - mothership_shots * COUNTER_ATTACK_DAMAGE
    );
    assert_eq!(
        engine.mothership().health(),
        CAPITAL_HEALTH - destroyer_shots * COUNTER_ATTACK_DAMAGE
    );

    clock.set(13_000);
    engine.advance_frame(FORWARD, UP);
    assert!(engine.take_events().contains(&GameEvent::MissileLaunched {
        faction: Faction::Destroyer
    }));
}

#[test]
fn test_game_over_within_the_fatal_frame() {
    let mut config = SimConfig::default();
    config.tuning.fighter_first_delay_ms = 0;
    let (mut engine, scene, _) = engine_with(config);
    engine
        .mothership_mut()
        .attacked(CAPITAL_HEALTH, scene.as_ref(), 0);
    let fighters_before: Vec<Vec3> = engine.fighters().iter().map(|f| f.position()).collect();

    engine.advance_frame(FORWARD, UP);

    assert_eq!(engine.game_status(), GameStatus::Ended);
    assert!(engine.mothership().is_destroyed());
    let fighters_after: Vec<Vec3> = engine.fighters().iter().map(|f| f.position()).collect();
    assert_eq!(fighters_before, fighters_after, "fighters skipped after game over");
    assert!(engine
        .take_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));

    // Ended is terminal
    engine.resume_game();
    assert_eq!(engine.game_status(), GameStatus::Ended);
}

#[test]
fn test_engine_collision_with_injected_missile() {
    let mut config = SimConfig::default();
    config.fighter_count = 1;
    config.tuning.fighter_first_delay_ms = 0;
    let (mut engine, _, clock) = engine_with(config);
    clock.set(1);
    engine.advance_frame(FORWARD, UP);
    let score = engine.score();

    let at = Vec3::new(200.0, 60.0, 0.0);
    engine.fighters_mut()[0].place(at);
    let from = at - Vec3::Z * 1.2;
    engine.inject_missile(Faction::Player, from, at + Vec3::Z * 20.0);

    // Far from the mothership so no counter-attack lands this frame
    clock.set(300);
    engine.advance_frame(FORWARD, UP);
    assert_eq!(engine.fighters()[0].health(), FIGHTER_HEALTH - MISSILE_DAMAGE);
    assert_eq!(engine.score(), score + SCORE_ENEMY_HIT);
}

#[test]
fn test_teardown_idempotent() {
    let (mut engine, scene, clock) = engine_with(SimConfig::default());
    engine.advance_frame(FORWARD, UP);
    clock.set(500);
    assert!(engine.fire());
    assert!(scene.live_count() > 0);

    engine.teardown();
    engine.teardown();
    assert_eq!(scene.live_count(), 0);
    assert_eq!(engine.game_status(), GameStatus::Ended);
    assert_eq!(engine.missile_count(), 0);
    assert!(engine.fighters().is_empty());

    let game_overs = engine
        .take_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    // Frames after teardown are no-ops
    engine.advance_frame(FORWARD, UP);
    assert_eq!(scene.live_count(), 0);
}

#[test]
fn test_audio_and_signals_pass_through() {
    let (mut engine, _, _) = engine_with(config_without_fighters());
    engine.apply_signal(vrdefense_core::commands::ControlSignal::Pause);
    assert_eq!(engine.game_status(), GameStatus::Paused);
    engine.apply_signal(vrdefense_core::commands::ControlSignal::Resume);
    assert_eq!(engine.game_status(), GameStatus::Playing);
    engine.apply_signal(vrdefense_core::commands::ControlSignal::PauseAudio);
    engine.apply_signal(vrdefense_core::commands::ControlSignal::ResumeAudio);
    engine.apply_signal(vrdefense_core::commands::ControlSignal::EndSession);
    assert_eq!(engine.game_status(), GameStatus::Ended);
}

#[test]
fn test_status_reader_tracks_engine() {
    let (mut engine, _, _) = engine_with(config_without_fighters());
    let reader = engine.status_reader();
    engine.advance_frame(FORWARD, UP);
    assert_eq!(reader.score(), engine.score());
    engine.pause_game();
    assert_eq!(reader.status(), GameStatus::Paused);
}
