//! Time sources.
//!
//! Every cooldown in the simulation is a millisecond timestamp compared
//! against a [`Clock`]. [`GameClock`] layers the pause policy on top.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A monotonic millisecond time source.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock, counted from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicU64::new(start_ms),
        })
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// The engine's view of time: a source clock minus accumulated paused time.
///
/// Paused time is only accumulated under `ClockPolicy::Pausable`; with the
/// wall-clock policy the offset stays zero.
pub struct GameClock {
    source: Arc<dyn Clock>,
    paused_total_ms: AtomicU64,
}

impl GameClock {
    pub fn new(source: Arc<dyn Clock>) -> Self {
        Self {
            source,
            paused_total_ms: AtomicU64::new(0),
        }
    }

    /// Simulation time in ms.
    pub fn now_ms(&self) -> u64 {
        self.raw_ms()
            .saturating_sub(self.paused_total_ms.load(Ordering::SeqCst))
    }

    /// Source time, ignoring pauses.
    pub fn raw_ms(&self) -> u64 {
        self.source.now_ms()
    }

    /// Exclude `ms` of paused time from every later reading.
    pub fn add_paused(&self, ms: u64) {
        self.paused_total_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn paused_total_ms(&self) -> u64 {
        self.paused_total_ms.load(Ordering::SeqCst)
    }
}
