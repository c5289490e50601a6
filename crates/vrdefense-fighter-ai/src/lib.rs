//! Fighter AI for VR Defense.
//!
//! Implements the enemy fighter flight state machine (attack pass, turn,
//! dying fall, recycle) and per-kind flight profiles.

pub mod fsm;
pub mod profiles;
pub mod spawn;

pub use vrdefense_core as core;
