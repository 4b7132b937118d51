//! Spawn & difficulty controller
//!
//! Decides when, where and what enters the arena. Regular enemies trickle in
//! from the screen edges in small batches, bosses arrive all at once at the
//! start of a boss round, and pickups drop on their own timer.

use glam::Vec2;
use rand::Rng;

use super::events::SoundCue;
use super::state::{
    Animation, Boss, BossVariant, Enemy, EnemyVariant, GamePhase, GameState, Pickup, PowerUpKind,
    RoundPhase,
};
use crate::consts::*;

/// Random point `margin` pixels outside a random screen edge
pub fn edge_position<R: Rng>(rng: &mut R, width: f32, height: f32, margin: f32) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * width, -margin),
        1 => Vec2::new(width + margin, rng.random::<f32>() * height),
        2 => Vec2::new(rng.random::<f32>() * width, height + margin),
        _ => Vec2::new(-margin, rng.random::<f32>() * height),
    }
}

/// Extra health every enemy gets, +1 per three rounds survived
pub fn enemy_bonus_health(round: u32) -> f32 {
    (round.saturating_sub(1) / 3) as f32
}

/// Health of each boss spawned in `round`
pub fn boss_health(round: u32) -> f32 {
    BOSS_BASE_HEALTH + (round.saturating_sub(1)) as f32 * BOSS_HEALTH_PER_ROUND
}

/// Roll a regular enemy for `round`
pub fn roll_enemy<R: Rng>(rng: &mut R, id: u32, pos: Vec2, round: u32) -> Enemy {
    let roll = rng.random::<f32>();
    let variant = if roll < 0.2 {
        EnemyVariant::Crawler
    } else if roll < 0.5 {
        EnemyVariant::Brute
    } else if roll < 0.75 {
        EnemyVariant::Drone
    } else {
        EnemyVariant::Stalker
    };
    let animation = (variant == EnemyVariant::Crawler)
        .then(|| Animation::new(3, rng.random_range(120..280)));

    let size = 75.0 + rng.random::<f32>() * 50.0;
    let speed = (1.0 + rng.random::<f32>() * 1.5) * (1.0 + round.saturating_sub(1) as f32 * 0.08);
    let health = variant.base_health() + enemy_bonus_health(round);

    Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        size,
        speed,
        health,
        max_health: health,
        variant,
        animation,
    }
}

/// Spawn the next enemy batch if the interval has elapsed
///
/// Returns the number of enemies spawned.
pub fn spawn_enemies(state: &mut GameState) -> u32 {
    let due = match state.round.last_enemy_spawn_ms {
        None => true,
        Some(last) => state.clock_ms - last > state.round.enemy_spawn_rate_ms as u64,
    };
    if !due {
        return 0;
    }
    state.round.last_enemy_spawn_ms = Some(state.clock_ms);

    if state.boss_wave_active()
        || state.phase != GamePhase::Running(RoundPhase::Active)
        || state.round.enemies_to_spawn == 0
    {
        return 0;
    }

    let mut spawned = 0;
    for _ in 0..ENEMY_BATCH_SIZE {
        if state.round.enemies_to_spawn == 0 {
            break;
        }
        let pos = edge_position(
            &mut state.rng,
            state.field.width,
            state.field.height,
            ENEMY_SPAWN_MARGIN,
        );
        let id = state.next_entity_id();
        let enemy = roll_enemy(&mut state.rng, id, pos, state.round.round);
        log::trace!("Spawned {:?} #{} hp={}", enemy.variant, enemy.id, enemy.health);
        state.enemies.push(enemy);
        state.round.enemies_to_spawn -= 1;
        spawned += 1;
    }

    if state.round.enemy_spawn_rate_ms > ENEMY_SPAWN_DECAY_FLOOR_MS {
        state.round.enemy_spawn_rate_ms = state
            .round
            .enemy_spawn_rate_ms
            .saturating_sub(ENEMY_SPAWN_DECAY_MS)
            .max(ENEMY_SPAWN_DECAY_FLOOR_MS);
    }
    spawned
}

/// Spawn a boss wave of `count` bosses and cue the intro
pub fn spawn_bosses(state: &mut GameState, count: u32) {
    let health = boss_health(state.round.round);
    for i in 0..count {
        let pos = edge_position(
            &mut state.rng,
            state.field.width,
            state.field.height,
            BOSS_SPAWN_MARGIN,
        );
        let variant = if i % 2 == 1 {
            BossVariant::Secondary
        } else {
            BossVariant::Primary
        };
        let mut animation = Animation::new(2, BOSS_FRAME_INTERVAL_MS);
        let size = match variant {
            BossVariant::Primary => BOSS_SIZE,
            BossVariant::Secondary => {
                animation.frame = 1;
                BOSS_SIZE + BOSS_SECONDARY_EXTRA_SIZE
            }
        };
        let id = state.next_entity_id();
        state.bosses.push(Boss {
            id,
            pos,
            size,
            speed: BOSS_SPEED,
            health,
            max_health: health,
            variant,
            animation,
        });
    }
    log::info!(
        "Boss wave: {} boss(es) with {} hp each (round {})",
        count,
        health,
        state.round.round
    );

    state.sound(SoundCue::BossIntro);
    state.round.pending_boss_intro_ms = Some(BOSS_INTRO_STAGGER_MS);
    state.sound(SoundCue::BossThemeStart);
}

/// Drop a pickup if the pickup timer has elapsed
pub fn spawn_pickup(state: &mut GameState) -> bool {
    let due = match state.last_powerup_spawn_ms {
        None => true,
        Some(last) => state.clock_ms - last > POWERUP_SPAWN_RATE_MS,
    };
    if !due {
        return false;
    }
    state.last_powerup_spawn_ms = Some(state.clock_ms);

    let x = POWERUP_SPAWN_INSET
        + state.rng.random::<f32>() * (state.field.width - 2.0 * POWERUP_SPAWN_INSET).max(0.0);
    let y = POWERUP_SPAWN_INSET
        + state.rng.random::<f32>() * (state.field.height - 2.0 * POWERUP_SPAWN_INSET).max(0.0);
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        pos: Vec2::new(x, y),
        radius: POWERUP_RADIUS,
        kind,
    });
    log::debug!("Pickup {:?} dropped at ({:.0}, {:.0})", kind, x, y);
    true
}
