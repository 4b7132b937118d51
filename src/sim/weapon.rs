//! Weapon firing: muzzle placement, volley shape and cooldown gating

use glam::Vec2;
use rand::Rng;

use super::effects::consume_ammo;
use super::events::SoundCue;
use super::state::{Bullet, EffectKind, GameState, Meter, Particle, Player, PlayerStats};
use crate::consts::*;

/// World-space muzzle point and aim angle
pub fn muzzle(player: &Player) -> (Vec2, f32) {
    let angle = player.aim_angle();
    let (sin, cos) = angle.sin_cos();
    let forward = player.size * MUZZLE_FORWARD_SCALE;
    let up = player.size * MUZZLE_UP_BIAS;
    let offset = Vec2::new(forward * cos - up * sin, forward * sin + up * cos);
    let grip = Vec2::new(GRIP_OFFSET_X, GRIP_OFFSET_Y);
    (player.pos + grip + offset, angle)
}

/// Bullets per volley. Power-ups raise the floor rather than add to it.
pub fn bullet_count(stats: &PlayerStats, effect: Option<EffectKind>) -> usize {
    let base = 1 + stats.multi_shot_bonus as usize;
    match effect {
        Some(EffectKind::Triple) => base.max(3),
        Some(EffectKind::Spread) => base.max(5),
        _ => base,
    }
}

/// Evenly spaced angles across `MULTI_SHOT_SPREAD`, centered on `aim`
pub fn volley_angles(count: usize, aim: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![aim; count];
    }
    let step = MULTI_SHOT_SPREAD / (count - 1) as f32;
    let mid = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| aim + (i as f32 - mid) * step)
        .collect()
}

fn shotgun_loaded(state: &GameState) -> bool {
    matches!(
        state.effect,
        Some(effect) if effect.kind == EffectKind::Shotgun
            && matches!(effect.meter, Meter::Ammo { remaining, .. } if remaining > 0)
    )
}

/// Fire once if the cooldown allows. Returns true when a volley left the muzzle.
pub fn try_fire(state: &mut GameState) -> bool {
    if !state.simulation_active() {
        return false;
    }
    if let Some(last) = state.weapon.last_shot_ms {
        if ((state.clock_ms - last) as f32) < state.weapon.cooldown_ms {
            return false;
        }
    }
    state.weapon.last_shot_ms = Some(state.clock_ms);

    let (origin, aim) = muzzle(&state.player);

    if shotgun_loaded(state) {
        let speed = state.stats.bullet_speed * 1.2;
        let damage = state.stats.damage * 0.8;
        for _ in 0..SHOTGUN_PELLETS {
            let angle = aim + (state.rng.random::<f32>() - 0.5) * SHOTGUN_SPREAD;
            state.bullets.push(Bullet {
                pos: origin,
                vel: crate::direction(angle) * speed,
                radius: SHOTGUN_PELLET_RADIUS,
                damage,
            });
        }
        state.sound(SoundCue::ShotgunBlast);
        consume_ammo(state);
        muzzle_flash(state, origin, aim, 15);
        return true;
    }

    let count = bullet_count(&state.stats, state.active_effect_kind());
    for angle in volley_angles(count, aim) {
        state.bullets.push(Bullet {
            pos: origin,
            vel: crate::direction(angle) * state.stats.bullet_speed,
            radius: BULLET_RADIUS,
            damage: state.stats.damage,
        });
    }
    state.sound(SoundCue::Shoot);
    muzzle_flash(state, origin, aim, 10);
    true
}

fn muzzle_flash(state: &mut GameState, origin: Vec2, aim: f32, count: usize) {
    for _ in 0..count {
        let speed = state.rng.random::<f32>() * 5.0 + 2.0;
        state.push_particle(Particle {
            pos: origin,
            vel: crate::direction(aim) * speed,
            life: 20,
            max_life: 20,
        });
    }
}
