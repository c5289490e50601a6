//! Core types and definitions for the VR Defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vectors and bounding volumes, entity enums, tuning constants,
//! configuration, control signals, events, and state snapshots.
//! It has no dependency on any renderer, audio engine, or runtime.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
