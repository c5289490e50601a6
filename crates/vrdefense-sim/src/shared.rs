//! State shared between the frame loop and other threads.
//!
//! The missile list is the one collection mutated from outside the frame
//! loop (player fire). It sits behind a mutex that the missile pass holds
//! for its whole iteration. Status and score are atomics written only by
//! the engine and readable from anywhere.
//!
//! Lock order: `aim` before `missiles`. Nothing takes them the other way.

use std::sync::atomic::{AtomicI32, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vrdefense_core::config::Tuning;
use vrdefense_core::constants::MISSILE_SPEED;
use vrdefense_core::enums::{Faction, GameStatus};
use vrdefense_core::events::GameEvent;
use vrdefense_core::types::Vec3;

use crate::clock::GameClock;
use crate::entities::Missile;
use crate::render::{Prototype, RenderHandle, Scene};

/// Latest view direction and player fire bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct AimState {
    pub forward: Vec3,
    pub up: Vec3,
    pub last_fire_at: Option<u64>,
}

pub struct SharedState {
    missiles: Mutex<Vec<Missile>>,
    aim: Mutex<AimState>,
    events: Mutex<Vec<GameEvent>>,
    status: AtomicU8,
    score: AtomicI32,
    pub clock: GameClock,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedState {
    pub fn new(clock: GameClock) -> Self {
        Self {
            missiles: Mutex::new(Vec::new()),
            aim: Mutex::new(AimState::default()),
            events: Mutex::new(Vec::new()),
            status: AtomicU8::new(GameStatus::Playing.to_u8()),
            score: AtomicI32::new(0),
            clock,
        }
    }

    pub fn missiles(&self) -> MutexGuard<'_, Vec<Missile>> {
        lock(&self.missiles)
    }

    pub fn aim(&self) -> MutexGuard<'_, AimState> {
        lock(&self.aim)
    }

    pub fn push_event(&self, event: GameEvent) {
        lock(&self.events).push(event);
    }

    pub fn take_events(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *lock(&self.events))
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    pub(crate) fn set_status(&self, status: GameStatus) {
        self.status.store(status.to_u8(), Ordering::SeqCst);
    }

    pub fn score(&self) -> i32 {
        self.score.load(Ordering::SeqCst)
    }

    pub(crate) fn add_score(&self, delta: i32) {
        self.score.fetch_add(delta, Ordering::SeqCst);
    }
}

/// Player trigger, usable from any thread.
#[derive(Clone)]
pub struct FireHandle {
    shared: Arc<SharedState>,
    scene: Arc<dyn Scene>,
    viewpoint: RenderHandle,
    interval_ms: u64,
    range: f64,
}

impl FireHandle {
    pub(crate) fn new(
        shared: Arc<SharedState>,
        scene: Arc<dyn Scene>,
        viewpoint: RenderHandle,
        tuning: &Tuning,
    ) -> Self {
        Self {
            shared,
            scene,
            viewpoint,
            interval_ms: tuning.player_fire_interval_ms,
            range: tuning.player_fire_range,
        }
    }

    /// Launch a player missile along the current view direction.
    ///
    /// Returns false when rate limited, when the session is not playing,
    /// when no view direction has been received yet, or when the scene
    /// cannot provide a missile.
    pub fn fire(&self) -> bool {
        if self.shared.status() != GameStatus::Playing {
            return false;
        }
        let now = self.shared.clock.now_ms();

        let mut aim = self.shared.aim();
        if aim
            .last_fire_at
            .is_some_and(|at| now < at + self.interval_ms)
        {
            return false;
        }
        let forward = aim.forward.normalize_or_zero();
        if forward == Vec3::ZERO {
            return false;
        }
        let Some(origin) = self.scene.position(self.viewpoint) else {
            log::warn!("viewpoint {} has no pose; fire ignored", self.viewpoint);
            return false;
        };
        let handle = match self.scene.spawn(Prototype::Missile(Faction::Player)) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("player missile not spawned: {err}");
                return false;
            }
        };
        self.scene.set_position(handle, origin);

        let target = origin + forward * self.range;
        let missile = Missile::launch(handle, Faction::Player, origin, target, MISSILE_SPEED, now);
        self.shared.missiles().push(missile);
        aim.last_fire_at = Some(now);
        drop(aim);

        self.shared.push_event(GameEvent::MissileLaunched {
            faction: Faction::Player,
        });
        log::debug!("player fired at t={now}");
        true
    }
}

/// Lock-free view of status and score for UI threads.
#[derive(Clone)]
pub struct StatusReader {
    shared: Arc<SharedState>,
}

impl StatusReader {
    pub(crate) fn new(shared: Arc<SharedState>) -> Self {
        Self { shared }
    }

    pub fn status(&self) -> GameStatus {
        self.shared.status()
    }

    pub fn score(&self) -> i32 {
        self.shared.score()
    }
}
