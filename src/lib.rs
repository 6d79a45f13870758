//! Super Cline Brothers - a single-screen side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game flow)
//! - `snapshot`: Per-frame render output for the presentation shell
//! - `platform`: Input sampling and fixed-step pacing
//! - `audio`: Background music cue
//! - `settings`: Runtime configuration

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use settings::Settings;
pub use snapshot::FrameSnapshot;

/// Game configuration constants
///
/// Speeds and accelerations are per simulation tick at `TICK_RATE`.
pub mod consts {
    /// Fixed simulation rate (one update per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Player body and movement
    pub const PLAYER_WIDTH: i32 = 30;
    pub const PLAYER_HEIGHT: i32 = 50;
    pub const PLAYER_WALK_SPEED: f32 = 5.0;
    pub const PLAYER_DASH_SPEED: f32 = 8.0;
    pub const PLAYER_JUMP_POWER: f32 = 15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Initial downward velocity when knocked off the stage
    pub const DAMAGE_FALL_SPEED: f32 = 5.0;
    /// Bounce off a stomped enemy without dash held
    pub const STOMP_BOUNCE: f32 = 10.0;
    /// Bounce off a stomped enemy with dash held (same as a jump)
    pub const DASH_STOMP_BOUNCE: f32 = PLAYER_JUMP_POWER;
    /// Ground-check probe distance below the feet
    pub const GROUND_PROBE: i32 = 2;

    /// Enemy body and movement
    pub const ENEMY_SIZE: i32 = 30;
    pub const ENEMY_WALK_SPEED: f32 = 2.0;
    /// Constant fall speed after defeat (no gravity accumulation)
    pub const ENEMY_DEFEATED_FALL_SPEED: f32 = 10.0;
    /// Defeated enemies are removed once their box y passes this
    pub const ENEMY_DESPAWN_Y: i32 = 1000;

    /// Goal marker
    pub const GOAL_WIDTH: i32 = 50;
    pub const GOAL_HEIGHT: i32 = 80;

    /// Lives at session start
    pub const INITIAL_LIVES: i32 = 2;
}
