//! Simulation constants and tuning defaults.
//!
//! Distances are world units, speeds are world units per frame,
//! times are milliseconds.

/// Nominal frame rate of the embedding render loop (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Session ---

/// Default number of fighters in the recycled pool.
pub const FIGHTER_POOL_SIZE: usize = 5;

/// Delay before the first fighter activates (ms).
pub const FIGHTER_FIRST_DELAY_MS: u64 = 10_000;

/// Additional delay between consecutive fighter activations (ms).
pub const FIGHTER_DELAY_STEP_MS: u64 = 5_000;

/// Vertical offset above the mothership used as a fighter's waypoint.
pub const FIGHTER_TARGET_OFFSET: f64 = 5.0;

// --- Fighter flight ---

/// Waypoint distance at which a turning fighter starts its next pass.
pub const WAYPOINT_DISTANCE: f64 = 60.0;

/// Default maximum fighter speed.
pub const FIGHTER_MAX_SPEED: f64 = 0.18;

/// Minimum fighter speed; fighters never stall.
pub const FIGHTER_MIN_SPEED: f64 = 0.11;

/// Distance to the waypoint below which an attacking fighter turns.
pub const TURN_THRESHOLD: f64 = 3.0;

/// Steering acceleration magnitude.
pub const FIGHTER_ACCEL: f64 = 0.0032;

/// Knockback acceleration applied while the hit-flash is visible.
pub const KNOCKBACK_ACCEL: f64 = 0.5;

/// Arrival radius for the dying/destroyed sink points.
pub const SINK_ARRIVAL_RADIUS: f64 = 2.0;

/// Vertical offset that drags a dying fighter below the mothership.
pub const DYING_SINK_OFFSET: f64 = -100.0;

/// Fighter health on spawn and respawn.
pub const FIGHTER_HEALTH: i32 = 100;

/// Minimum interval between fighter missile launches (ms).
pub const FIGHTER_LAUNCH_INTERVAL_MS: u64 = 3_000;

// --- Spawn box (relative to the world origin / mothership) ---

/// Random X span for fresh fighters.
pub const SPAWN_SPAN_X: u32 = 100;
/// Random Y span for fresh fighters.
pub const SPAWN_SPAN_Y: u32 = 70;
/// Random Z span for fresh fighters.
pub const SPAWN_SPAN_Z: u32 = 100;
/// Base altitude of fresh fighters.
pub const SPAWN_BASE_Y: f64 = 15.0;

// --- Hit flash ---

/// How long the damage highlight stays visible (ms).
pub const HIT_FLASH_MS: u64 = 300;

// --- Capital ships ---

/// Starting health of the mothership and the destroyer.
pub const CAPITAL_HEALTH: i32 = 1_000_000;

/// Mothership counter-attack interval (ms).
pub const MOTHERSHIP_ATTACK_INTERVAL_MS: u64 = 2_000;

/// Destroyer delay between shots inside a burst (ms).
pub const DESTROYER_BURST_INTERVAL_MS: u64 = 500;

/// Destroyer cooldown after a full burst (ms).
pub const DESTROYER_COOLDOWN_MS: u64 = 11_000;

/// Shots per destroyer burst.
pub const DESTROYER_BURST_LEN: u32 = 5;

/// Height above the destroyer origin its missiles launch from.
pub const DESTROYER_LAUNCH_HEIGHT: f64 = 10.0;

/// Random jitter applied to each axis of the mothership's aim point.
pub const MOTHERSHIP_AIM_JITTER: u32 = 20;

// --- Missiles ---

/// Default missile speed.
pub const MISSILE_SPEED: f64 = 0.45;

/// Speed of long-range counter-attack missiles.
pub const MISSILE_LONG_RANGE_SPEED: f64 = 0.75;

/// Distance beyond which a counter-attack counts as long range.
pub const LONG_RANGE_DISTANCE: f64 = 50.0;

/// Launch offset along the aim vector for long-range shots.
pub const LONG_RANGE_LAUNCH_OFFSET: f64 = 30.0;

/// Launch offset along the aim vector for short-range shots.
pub const SHORT_RANGE_LAUNCH_OFFSET: f64 = 3.0;

/// Missile time to live (ms).
pub const MISSILE_TTL_MS: u64 = 3_000;

/// Missiles closer than this to their target are spent.
pub const MISSILE_ARRIVAL_RADIUS: f64 = 1.5;

/// Damage per missile hit.
pub const MISSILE_DAMAGE: i32 = 15;

/// Damage per mothership/destroyer counter-attack.
pub const COUNTER_ATTACK_DAMAGE: i32 = 15;

/// Minimum interval between player shots (ms).
pub const PLAYER_FIRE_INTERVAL_MS: u64 = 400;

/// Distance along the view direction at which player missiles aim.
pub const PLAYER_FIRE_RANGE: f64 = 30.0;

// --- Score ---

pub const SCORE_ENEMY_HIT: i32 = 15;
pub const SCORE_ENEMY_DESTROYED: i32 = 100;
pub const SCORE_MOTHERSHIP_HIT: i32 = -1;
pub const SCORE_DESTROYER_HIT: i32 = 1;

// --- Path (mothership orbit driven by the embedding) ---

/// Orbit radius of the mothership path.
pub const ORBIT_RADIUS: f64 = 100.0;

/// Orbit altitude of the mothership path.
pub const ORBIT_ALTITUDE: f64 = 15.0;

/// Duration of one full orbit (ms).
pub const ORBIT_PERIOD_MS: u64 = 120_000;

/// Offset of the viewpoint path from the mothership path.
pub const VIEWPOINT_OFFSET: f64 = 8.0;
