//! Kind-specific flight profiles.
//!
//! Every hull flies the same state machine; the profile only decides the
//! speed ceiling and how large the renderer draws it.

use vrdefense_core::constants::FIGHTER_MAX_SPEED;
use vrdefense_core::enums::FighterKind;

/// Flight profile for a fighter kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterProfile {
    /// Speed ceiling (units per frame).
    pub max_speed: f64,
    /// Uniform scale the renderer applies to the prototype mesh.
    pub render_scale: f64,
}

/// Get the flight profile for a given kind.
pub fn get_profile(kind: FighterKind) -> FighterProfile {
    let render_scale = match kind {
        FighterKind::DarkFighter => 1.0,
        FighterKind::Spaceship1 => 1.2,
        FighterKind::Spaceship2
        | FighterKind::Spaceship3
        | FighterKind::Spaceship4
        | FighterKind::Spaceship5
        | FighterKind::Spaceship6 => 1.5,
    };
    FighterProfile {
        max_speed: FIGHTER_MAX_SPEED,
        render_scale,
    }
}

/// Resolve a per-instance speed override. Non-positive values fall back
/// to the profile's ceiling.
pub fn resolve_max_speed(kind: FighterKind, requested: f64) -> f64 {
    if requested > 0.0 {
        requested
    } else {
        get_profile(kind).max_speed
    }
}
