//! Simulation engine for VR Defense.
//!
//! Owns the mothership, destroyer, fighter pool and live missiles, runs
//! the per-frame update in a fixed order, resolves collisions, and keeps
//! score and game status. Rendering, audio and time are reached only
//! through the collaborator traits in [`render`], [`audio`] and [`clock`].

pub mod audio;
pub mod clock;
pub mod engine;
pub mod entities;
pub mod render;
pub mod shared;
pub mod systems;
pub mod world_setup;

pub use engine::{SetupError, SimulationEngine};
pub use vrdefense_core as core;

#[cfg(test)]
mod tests;
