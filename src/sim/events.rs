//! Notifications emitted by the simulation for presentation adapters
//!
//! The core never calls into audio or rendering directly. It queues events on
//! the state and the adapter drains them after each tick.

use serde::{Deserialize, Serialize};

use super::effects::UpgradeKind;

/// Named sound cues (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Regular weapon volley
    Shoot,
    /// Shotgun blast
    ShotgunBlast,
    /// Bullet hit a regular enemy, or an enemy hit the player
    Hit,
    /// Regular enemy destroyed
    Explosion,
    /// Boss destroyed, or a boss rammed the player
    BossExplosion,
    /// Boss took damage
    BossHit,
    /// Pickup collected
    PowerupCollect,
    /// Energy ball launched
    AbilityCast,
    /// Boss wave stinger
    BossIntro,
    /// Start the looping boss theme
    BossThemeStart,
    /// Stop the looping boss theme
    BossThemeStop,
}

/// Everything the core reports outward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    RunStarted { seed: u64 },
    RoundStarted { round: u32, boss_wave: bool },
    RoundCleared { round: u32 },
    UpgradeApplied { kind: UpgradeKind },
    GameOver { score: u64, round: u32 },
}
