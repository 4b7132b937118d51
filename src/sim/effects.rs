//! Power-up effects, permanent upgrades and the energy ball ability
//!
//! Temporary effects always sit on top of the permanent [`PlayerStats`]:
//! every derived value is recomputed from the stats, so an effect expiring
//! can never erase an upgrade.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::SoundCue;
use super::state::{
    ActiveEffect, EffectKind, EnergyBall, GameState, Meter, PlayerStats, PowerUpKind,
};
use super::weapon::muzzle;
use crate::consts::*;

/// Timed effect durations (ms)
pub const TRIPLE_DURATION_MS: i64 = 10_000;
pub const SPREAD_DURATION_MS: i64 = 8_000;
pub const RAPID_DURATION_MS: i64 = 12_000;
pub const AUTOFIRE_DURATION_MS: i64 = 12_000;

/// Mystery outcomes
pub const MYSTERY_GOOD_CHANCE: f64 = 0.6;
pub const MYSTERY_HEAL: f32 = 80.0;
pub const MYSTERY_DAMAGE: f32 = 40.0;
pub const MYSTERY_RAPID_MS: i64 = 14_000;
pub const MYSTERY_TRIPLE_MS: i64 = 12_000;
pub const MYSTERY_SPREAD_MS: i64 = 10_000;
pub const JAM_DURATION_MS: i64 = 8_000;
pub const SLOW_DURATION_MS: i64 = 6_000;

/// Permanent upgrades offered between rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    FireRate,
    Damage,
    BulletSpeed,
    MultiShot,
    MoveSpeed,
    Heal,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::FireRate,
        UpgradeKind::Damage,
        UpgradeKind::BulletSpeed,
        UpgradeKind::MultiShot,
        UpgradeKind::MoveSpeed,
        UpgradeKind::Heal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UpgradeKind::FireRate => "Faster Fire +20%",
            UpgradeKind::Damage => "Damage +1",
            UpgradeKind::BulletSpeed => "Bullet Speed +20%",
            UpgradeKind::MultiShot => "Multi-Shot +1",
            UpgradeKind::MoveSpeed => "Move Speed +15%",
            UpgradeKind::Heal => "Heal +30",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UpgradeKind::FireRate => "Reduce time between shots.",
            UpgradeKind::Damage => "Bullets deal more damage.",
            UpgradeKind::BulletSpeed => "Bullets travel faster.",
            UpgradeKind::MultiShot => "Fires an extra bullet.",
            UpgradeKind::MoveSpeed => "Increase player movement speed.",
            UpgradeKind::Heal => "Restore some health.",
        }
    }
}

/// Apply a permanent upgrade to the run's stats and health
pub fn apply_upgrade(kind: UpgradeKind, stats: &PlayerStats, health: f32) -> (PlayerStats, f32) {
    let mut stats = stats.clone();
    let mut health = health;
    match kind {
        UpgradeKind::FireRate => stats.fire_rate_mult *= 0.8,
        UpgradeKind::Damage => stats.damage += 1.0,
        UpgradeKind::BulletSpeed => stats.bullet_speed *= 1.2,
        UpgradeKind::MultiShot => stats.multi_shot_bonus += 1,
        UpgradeKind::MoveSpeed => stats.speed_mult *= 1.15,
        UpgradeKind::Heal => health = (health + 30.0).min(MAX_HEALTH),
    }
    (stats, health)
}

/// Weapon cooldown for the given stats and active effect
pub fn fire_cooldown_ms(stats: &PlayerStats, effect: Option<EffectKind>) -> f32 {
    let base = BASE_SHOOT_COOLDOWN_MS * stats.fire_rate_mult;
    match effect {
        Some(EffectKind::Rapid) => (base * 0.5).max(40.0),
        Some(EffectKind::Autofire) => (base * 0.45).max(35.0),
        Some(EffectKind::Jam) => (base * 1.8).max(120.0),
        _ => base.max(MIN_SHOOT_COOLDOWN_MS),
    }
}

/// Movement speed for the given stats and active effect
pub fn move_speed(stats: &PlayerStats, effect: Option<EffectKind>) -> f32 {
    let base = PLAYER_BASE_SPEED * stats.speed_mult;
    match effect {
        Some(EffectKind::Slow) => (base * 0.6).max(2.0),
        _ => base,
    }
}

/// Recompute every derived stat from the persistent stats and active effect
pub fn refresh_derived(state: &mut GameState) {
    let effect = state.active_effect_kind();
    state.weapon.cooldown_ms = fire_cooldown_ms(&state.stats, effect);
    state.player.speed = move_speed(&state.stats, effect);
}

/// Replace whatever is active with `effect` (latest wins)
pub fn set_effect(state: &mut GameState, effect: ActiveEffect) {
    if let Some(previous) = state.effect {
        log::debug!("{:?} replaced by {:?}", previous.kind, effect.kind);
    }
    state.effect = Some(effect);
    state.weapon.auto_firing = false;
    refresh_derived(state);
}

/// Drop the active effect and fall back to the upgrade baseline
pub fn clear_effect(state: &mut GameState) {
    state.effect = None;
    state.weapon.auto_firing = false;
    refresh_derived(state);
}

/// Apply a collected pickup
pub fn apply_pickup(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => state.player.heal(HEALTH_PICKUP_AMOUNT),
        PowerUpKind::Triple => {
            set_effect(state, ActiveEffect::timed(EffectKind::Triple, TRIPLE_DURATION_MS))
        }
        PowerUpKind::Spread => {
            set_effect(state, ActiveEffect::timed(EffectKind::Spread, SPREAD_DURATION_MS))
        }
        PowerUpKind::Rapid => {
            set_effect(state, ActiveEffect::timed(EffectKind::Rapid, RAPID_DURATION_MS))
        }
        // Continuous fire starts on the next trigger pull
        PowerUpKind::Autofire => set_effect(
            state,
            ActiveEffect::timed(EffectKind::Autofire, AUTOFIRE_DURATION_MS),
        ),
        PowerUpKind::Shotgun => {
            set_effect(state, ActiveEffect::ammo(EffectKind::Shotgun, SHOTGUN_MAX_AMMO))
        }
        PowerUpKind::Mystery => apply_mystery(state),
    }
}

/// Roll a random good or bad outcome
pub fn apply_mystery(state: &mut GameState) {
    let good = state.rng.random_bool(MYSTERY_GOOD_CHANCE);
    if good {
        match state.rng.random_range(0..5) {
            0 => state.player.heal(MYSTERY_HEAL),
            1 => set_effect(state, ActiveEffect::timed(EffectKind::Rapid, MYSTERY_RAPID_MS)),
            2 => set_effect(state, ActiveEffect::timed(EffectKind::Triple, MYSTERY_TRIPLE_MS)),
            3 => set_effect(state, ActiveEffect::timed(EffectKind::Spread, MYSTERY_SPREAD_MS)),
            _ => add_energy_charge(state, ENERGY_BALL_MAX),
        }
        log::debug!("Mystery pickup: good outcome");
    } else {
        match state.rng.random_range(0..3) {
            0 => {
                state.player.take_damage(MYSTERY_DAMAGE);
            }
            1 => set_effect(state, ActiveEffect::timed(EffectKind::Jam, JAM_DURATION_MS)),
            _ => set_effect(state, ActiveEffect::timed(EffectKind::Slow, SLOW_DURATION_MS)),
        }
        log::debug!("Mystery pickup: bad outcome");
    }
}

/// Count the active timed effect down by one tick
pub fn update_effect_timer(state: &mut GameState) {
    let Some(effect) = state.effect.as_mut() else {
        return;
    };
    if let Meter::Timed { remaining_ms, .. } = &mut effect.meter {
        *remaining_ms -= TICK_MS as i64;
        if *remaining_ms <= 0 {
            log::debug!("{:?} expired", effect.kind);
            clear_effect(state);
        }
    }
}

/// Consume one shell from an ammo effect, clearing it when empty
pub fn consume_ammo(state: &mut GameState) {
    let Some(effect) = state.effect.as_mut() else {
        return;
    };
    if let Meter::Ammo { remaining, .. } = &mut effect.meter {
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            clear_effect(state);
        }
    }
}

pub fn add_energy_charge(state: &mut GameState, amount: u32) {
    state.energy_charge = (state.energy_charge + amount).min(ENERGY_BALL_MAX);
}

/// Launch the energy ball. No-op unless fully charged and none is in flight.
pub fn try_cast_energy_ball(state: &mut GameState) -> bool {
    if !state.simulation_active()
        || state.energy_ball.is_some()
        || state.energy_charge < ENERGY_BALL_MAX
    {
        return false;
    }

    let (origin, angle) = muzzle(&state.player);
    state.energy_ball = Some(EnergyBall {
        pos: origin,
        vel: crate::direction(angle) * ENERGY_BALL_SPEED,
        radius: ENERGY_BALL_RADIUS,
        damage_enemy: ENERGY_BALL_DAMAGE_ENEMY,
        damage_boss: ENERGY_BALL_DAMAGE_BOSS,
        traveled: 0.0,
        max_range: ENERGY_BALL_RANGE,
    });
    state.energy_charge = 0;
    state.sound(SoundCue::AbilityCast);
    log::debug!("Energy ball cast at angle {:.2}", angle);
    true
}
