//! Per-frame systems.
//!
//! Systems are free functions over the engine's entities. They do not own
//! state. The engine calls them in a fixed order every frame.

pub mod capital;
pub mod fighters;
pub mod launch;
pub mod missiles;
pub mod snapshot;

use rand_chacha::ChaCha8Rng;

use vrdefense_core::config::Tuning;

use crate::render::Scene;
use crate::shared::SharedState;

/// Everything a system needs besides the entities it updates.
pub struct FrameContext<'a> {
    pub scene: &'a dyn Scene,
    pub shared: &'a SharedState,
    pub rng: &'a mut ChaCha8Rng,
    pub tuning: &'a Tuning,
    pub now: u64,
}

/// Whether the rest of the frame should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The mothership was destroyed; skip everything left in the frame.
    GameOver,
}
