//! VR Defense headless runner.
//!
//! Wires the simulation engine to a game loop thread, the scripted orbit
//! of the mothership and the viewpoint, and the remote controller link.

pub mod game_loop;
pub mod link;
pub mod logging;
pub mod orbit;
pub mod state;

pub use vrdefense_core as core;
