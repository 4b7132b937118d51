//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed 16 ms timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod events;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{CollisionResult, circle_contact, circles_overlap};
pub use effects::{UpgradeKind, apply_upgrade, try_cast_energy_ball};
pub use events::{GameEvent, SoundCue};
pub use round::{boss_count, enemy_quota, enemy_spawn_rate, is_boss_round};
pub use state::{
    ActiveEffect, Boss, BossVariant, Bullet, EffectKind, Enemy, EnemyVariant, EnergyBall,
    GamePhase, GameState, Meter, Pickup, Playfield, Player, PlayerStats, PowerUpKind, RoundPhase,
};
pub use tick::{TickInput, autopilot_input, tick};
pub use weapon::try_fire;
