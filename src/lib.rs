//! Arena Siege - A single-screen arena survival shooter
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (rounds, spawning, collisions, effects)
//! - `view`: Render/HUD snapshots handed to presentation adapters
//! - `audio`: Best-effort sound cue playback policy
//! - `settings`: Runtime configuration

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{AudioError, SessionError, SettingsError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u32 = 16;

    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 120.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Distance of the spawn point from the bottom edge
    pub const PLAYER_SPAWN_BOTTOM_OFFSET: f32 = 100.0;
    /// Health at run start, also the single heal cap
    pub const MAX_HEALTH: f32 = 200.0;

    /// Weapon defaults
    pub const BASE_SHOOT_COOLDOWN_MS: f32 = 200.0;
    pub const MIN_SHOOT_COOLDOWN_MS: f32 = 60.0;
    pub const BASE_BULLET_SPEED: f32 = 10.0;
    pub const BASE_BULLET_DAMAGE: f32 = 1.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    /// Total fan angle for multi-bullet volleys (radians)
    pub const MULTI_SHOT_SPREAD: f32 = 0.3;

    /// Muzzle placement relative to the player
    pub const GRIP_OFFSET_X: f32 = 3.0;
    pub const GRIP_OFFSET_Y: f32 = -6.0;
    pub const MUZZLE_FORWARD_SCALE: f32 = 0.48;
    pub const MUZZLE_UP_BIAS: f32 = -0.02;

    /// Shotgun power-up
    pub const SHOTGUN_MAX_AMMO: u32 = 12;
    pub const SHOTGUN_PELLETS: usize = 5;
    pub const SHOTGUN_SPREAD: f32 = 0.4;
    pub const SHOTGUN_PELLET_RADIUS: f32 = 4.0;

    /// Round progression
    pub const BASE_ENEMIES_PER_ROUND: u32 = 12;
    pub const ENEMIES_PER_ROUND_STEP: u32 = 4;
    pub const ROUND_BANNER_MS: u32 = 1500;
    pub const UPGRADE_DELAY_MS: u32 = 300;
    pub const UPGRADE_CHOICES: usize = 3;

    /// Enemy spawning
    pub const ENEMY_BATCH_SIZE: u32 = 2;
    pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;
    pub const ENEMY_SPAWN_RATE_BASE_MS: u32 = 1500;
    pub const ENEMY_SPAWN_RATE_STEP_MS: u32 = 100;
    pub const ENEMY_SPAWN_RATE_MIN_MS: u32 = 350;
    /// Spawn interval shrinks by this much per batch while above the decay floor
    pub const ENEMY_SPAWN_DECAY_MS: u32 = 5;
    pub const ENEMY_SPAWN_DECAY_FLOOR_MS: u32 = 400;
    pub const ENEMY_CONTACT_DAMAGE: f32 = 10.0;

    /// Bosses
    pub const BOSS_SIZE: f32 = 180.0;
    pub const BOSS_SECONDARY_EXTRA_SIZE: f32 = 10.0;
    pub const BOSS_SPEED: f32 = 1.5;
    pub const BOSS_SECONDARY_SPEED_MULT: f32 = 1.15;
    pub const BOSS_BASE_HEALTH: f32 = 120.0;
    pub const BOSS_HEALTH_PER_ROUND: f32 = 10.0;
    pub const BOSS_SPAWN_MARGIN: f32 = 60.0;
    pub const BOSS_CONTACT_DAMAGE: f32 = 20.0;
    pub const BOSS_KNOCKBACK: f32 = 20.0;
    pub const BOSS_FRAME_INTERVAL_MS: u32 = 180;
    pub const BOSS_INTRO_STAGGER_MS: u32 = 150;

    /// Scoring
    pub const ENEMY_SCORE: u64 = 100;
    pub const BOSS_SCORE: u64 = 2000;

    /// Power-up pickups
    pub const POWERUP_SPAWN_RATE_MS: u64 = 15_000;
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPAWN_INSET: f32 = 50.0;
    pub const HEALTH_PICKUP_AMOUNT: f32 = 30.0;

    /// Energy ball ability
    pub const ENERGY_BALL_MAX: u32 = 100;
    pub const ENERGY_BALL_SPEED: f32 = 5.0;
    pub const ENERGY_BALL_RADIUS: f32 = 58.0;
    pub const ENERGY_BALL_DAMAGE_ENEMY: f32 = 5.0;
    pub const ENERGY_BALL_DAMAGE_BOSS: f32 = 12.0;
    pub const ENERGY_BALL_RANGE: f32 = 2200.0;
    pub const ENERGY_BALL_MARGIN: f32 = 200.0;
    pub const ENEMY_KILL_CHARGE: u32 = 20;
    pub const BOSS_KILL_CHARGE: u32 = 100;

    /// Bullet cull margins (asymmetric, matches the sprite anchor)
    pub const BULLET_CULL_NEAR: f32 = 20.0;
    pub const BULLET_CULL_FAR: f32 = 50.0;
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Percentage helper that tolerates a zero denominator
#[inline]
pub fn ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
