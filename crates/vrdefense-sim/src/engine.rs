//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns every entity, runs the per-frame systems in a
//! fixed order, and produces `GameSnapshot`s. It never renders or plays
//! audio itself; it drives the `Scene` and `AudioEngine` collaborators it
//! was built with. Time comes from a `Clock`, so tests run with a manual
//! clock and a headless scene.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vrdefense_core::commands::ControlSignal;
use vrdefense_core::config::{ConfigError, SimConfig};
use vrdefense_core::enums::{ClockPolicy, GameStatus};
use vrdefense_core::events::GameEvent;
use vrdefense_core::state::GameSnapshot;
use vrdefense_core::types::{SimTime, Vec3};

use crate::audio::AudioEngine;
use crate::clock::{Clock, GameClock};
use crate::entities::{Destroyer, Fighter, Missile, Mothership};
use crate::render::{RenderError, RenderHandle, Scene};
use crate::shared::{FireHandle, SharedState, StatusReader};
use crate::systems::{self, Flow, FrameContext};
use crate::world_setup;

/// Failures while building a session.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn {what}: {source}")]
    Spawn {
        what: &'static str,
        #[source]
        source: RenderError,
    },
}

/// The simulation engine. Owns the entities and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    scene: Arc<dyn Scene>,
    audio: Box<dyn AudioEngine>,
    shared: Arc<SharedState>,
    fire: FireHandle,
    rng: ChaCha8Rng,
    time: SimTime,
    mothership: Mothership,
    destroyer: Destroyer,
    viewpoint: RenderHandle,
    fighters: Vec<Fighter>,
    paused_at: Option<u64>,
    paused_wall_ms: u64,
    torn_down: bool,
}

impl SimulationEngine {
    /// Build a session: validate the config and spawn every entity.
    pub fn new(
        config: SimConfig,
        scene: Arc<dyn Scene>,
        audio: Box<dyn AudioEngine>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let shared = Arc::new(SharedState::new(GameClock::new(clock)));
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let now = shared.clock.now_ms();

        let mothership = world_setup::spawn_mothership(scene.as_ref(), &config)?;
        let viewpoint = world_setup::spawn_viewpoint(scene.as_ref())?;
        let destroyer = world_setup::spawn_destroyer(scene.as_ref())?;
        let fighters = world_setup::spawn_fighter_pool(scene.as_ref(), &mut rng, &config, now);

        let fire = FireHandle::new(
            Arc::clone(&shared),
            Arc::clone(&scene),
            viewpoint,
            &config.tuning,
        );
        log::info!("session started (seed {}, t={now})", config.seed);

        Ok(Self {
            config,
            scene,
            audio,
            shared,
            fire,
            rng,
            time: SimTime {
                frame: 0,
                now_ms: now,
            },
            mothership,
            destroyer,
            viewpoint,
            fighters,
            paused_at: None,
            paused_wall_ms: 0,
            torn_down: false,
        })
    }

    /// Advance the simulation by one frame.
    ///
    /// `forward` and `up` are the head-tracked view vectors for this frame.
    /// Does nothing unless the session is playing.
    pub fn advance_frame(&mut self, forward: Vec3, up: Vec3) {
        if self.shared.status() != GameStatus::Playing {
            return;
        }
        {
            let mut aim = self.shared.aim();
            aim.forward = forward;
            aim.up = up;
        }
        let now = self.shared.clock.now_ms();
        self.time.advance(now);

        let mut ctx = FrameContext {
            scene: self.scene.as_ref(),
            shared: self.shared.as_ref(),
            rng: &mut self.rng,
            tuning: &self.config.tuning,
            now,
        };

        systems::capital::run_mothership(&mut ctx, &mut self.mothership, &mut self.destroyer);
        if systems::capital::run_destroyer(&mut ctx, &mut self.destroyer, &mut self.mothership)
            == Flow::GameOver
        {
            self.end_game();
            return;
        }
        systems::fighters::run(&mut ctx, &mut self.fighters, &self.mothership);
        if systems::missiles::run(&mut ctx, &mut self.mothership, &mut self.fighters)
            == Flow::GameOver
        {
            self.end_game();
        }
    }

    /// Advance one frame and return the resulting snapshot.
    pub fn tick(&mut self, forward: Vec3, up: Vec3) -> GameSnapshot {
        self.advance_frame(forward, up);
        self.snapshot()
    }

    /// Launch a player missile. See [`FireHandle::fire`].
    pub fn fire(&self) -> bool {
        self.fire.fire()
    }

    pub fn score(&self) -> i32 {
        self.shared.score()
    }

    pub fn game_status(&self) -> GameStatus {
        self.shared.status()
    }

    /// Playing -> Paused. Any other status is left alone.
    pub fn pause_game(&mut self) {
        if self.shared.status() == GameStatus::Playing {
            self.shared.set_status(GameStatus::Paused);
            self.paused_at = Some(self.shared.clock.raw_ms());
            log::info!("game paused");
        }
    }

    /// Paused -> Playing. Any other status is left alone.
    pub fn resume_game(&mut self) {
        if self.shared.status() != GameStatus::Paused {
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            let paused_for = self.shared.clock.raw_ms().saturating_sub(paused_at);
            self.paused_wall_ms += paused_for;
            if self.config.clock_policy == ClockPolicy::Pausable {
                self.shared.clock.add_paused(paused_for);
            }
        }
        self.shared.set_status(GameStatus::Playing);
        log::info!("game resumed");
    }

    pub fn pause_audio(&mut self) {
        self.audio.pause();
    }

    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Release every renderable and end the session. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let scene = self.scene.as_ref();
        for missile in self.shared.missiles().drain(..) {
            scene.remove(missile.object.handle());
        }
        for fighter in self.fighters.drain(..) {
            scene.remove(fighter.object.handle());
        }
        scene.remove(self.mothership.object.handle());
        scene.remove(self.destroyer.object.handle());
        scene.remove(self.viewpoint);

        if self.shared.status() != GameStatus::Ended {
            self.end_game();
        }
        log::info!("session torn down");
    }

    /// Apply a control signal delivered from outside the frame loop.
    pub fn apply_signal(&mut self, signal: ControlSignal) {
        match signal {
            ControlSignal::Fire => {
                self.fire();
            }
            ControlSignal::EndSession => self.teardown(),
            ControlSignal::Pause => self.pause_game(),
            ControlSignal::Resume => self.resume_game(),
            ControlSignal::PauseAudio => self.pause_audio(),
            ControlSignal::ResumeAudio => self.resume_audio(),
        }
    }

    /// Build a snapshot, draining the events recorded since the last one.
    pub fn snapshot(&mut self) -> GameSnapshot {
        let events = self.shared.take_events();
        let missiles = self.shared.missiles();
        systems::snapshot::build_snapshot(
            self.time,
            self.shared.status(),
            self.shared.score(),
            &self.mothership,
            &self.destroyer,
            &self.fighters,
            &missiles,
            events,
        )
    }

    /// Drain the events recorded since the last drain.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.shared.take_events()
    }

    /// Trigger that can be moved to another thread.
    pub fn fire_handle(&self) -> FireHandle {
        self.fire.clone()
    }

    pub fn status_reader(&self) -> StatusReader {
        StatusReader::new(Arc::clone(&self.shared))
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current simulation clock reading, after the pause policy.
    pub fn now_ms(&self) -> u64 {
        self.shared.clock.now_ms()
    }

    /// Source time with every pause cut out, whatever the clock policy.
    /// Scripted motion runs on this so it resumes where it stopped.
    pub fn playing_ms(&self) -> u64 {
        let raw = self.shared.clock.raw_ms();
        let current = self.paused_at.map_or(0, |at| raw.saturating_sub(at));
        raw.saturating_sub(self.paused_wall_ms + current)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mothership(&self) -> &Mothership {
        &self.mothership
    }

    pub fn destroyer(&self) -> &Destroyer {
        &self.destroyer
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    /// Handle of the viewpoint proxy. The embedding keeps it on the camera.
    pub fn viewpoint(&self) -> RenderHandle {
        self.viewpoint
    }

    pub fn missile_count(&self) -> usize {
        self.shared.missiles().len()
    }

    /// Copy of the live missiles.
    pub fn missiles(&self) -> Vec<Missile> {
        self.shared.missiles().clone()
    }

    fn end_game(&mut self) {
        self.shared.set_status(GameStatus::Ended);
        let score = self.shared.score();
        self.shared.push_event(GameEvent::GameOver { score });
        log::info!("game over, score {score}");
    }

    #[cfg(test)]
    pub(crate) fn fighters_mut(&mut self) -> &mut [Fighter] {
        &mut self.fighters
    }

    #[cfg(test)]
    pub(crate) fn mothership_mut(&mut self) -> &mut Mothership {
        &mut self.mothership
    }

    /// Put a missile into the live list without any launch rules.
    #[cfg(test)]
    pub(crate) fn inject_missile(
        &mut self,
        faction: vrdefense_core::enums::Faction,
        from: Vec3,
        target: Vec3,
    ) {
        let now = self.shared.clock.now_ms();
        systems::launch::spawn_missile(
            self.scene.as_ref(),
            &self.shared,
            faction,
            from,
            target,
            vrdefense_core::constants::MISSILE_SPEED,
            now,
        );
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
