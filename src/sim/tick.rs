//! Fixed timestep simulation tick
//!
//! Core game loop that advances the arena deterministically, one 16 ms step
//! at a time.

use glam::Vec2;

use super::collision::{circle_contact, circles_overlap, pursue};
use super::effects::{add_energy_charge, apply_pickup, try_cast_energy_ball, update_effect_timer};
use super::events::SoundCue;
use super::round::{advance_countdowns, advance_intermission, check_round_complete, game_over};
use super::spawn::{spawn_enemies, spawn_pickup};
use super::state::{EffectKind, GamePhase, GameState, HitFlash, RoundPhase};
use super::weapon::try_fire;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys currently held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in playfield coordinates
    pub aim: Option<Vec2>,
    /// Fire button pressed this tick
    pub fire_down: bool,
    /// Fire button released this tick
    pub fire_up: bool,
    /// Energy ball cast request
    pub cast: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Input sampling runs even while frozen
    if input.pause {
        state.toggle_pause();
    }
    if let Some(aim) = input.aim {
        state.player.aim = aim;
    }
    if input.fire_up {
        state.weapon.holding_fire = false;
    }
    // A press during upgrade selection or the intermission carries into the round
    if input.fire_down && state.is_running() {
        state.weapon.holding_fire = true;
    }

    if state.paused {
        return;
    }
    match state.phase {
        GamePhase::Running(RoundPhase::Active) => step_active(state, input),
        GamePhase::Running(RoundPhase::Intermission { .. }) => advance_intermission(state),
        _ => {}
    }
}

fn step_active(state: &mut GameState, input: &TickInput) {
    state.clock_ms += TICK_MS as u64;

    if input.fire_down {
        if state.active_effect_kind() == Some(EffectKind::Autofire) {
            state.weapon.auto_firing = true;
        }
        try_fire(state);
    }
    if input.cast {
        try_cast_energy_ball(state);
    }

    move_player(state, input);

    update_bullets(state);

    if update_enemies(state) || update_bosses(state) || update_pickups(state) {
        game_over(state);
        return;
    }

    state.update_cosmetics();
    update_effect_timer(state);
    update_energy_ball(state);

    if state.weapon.holding_fire || state.weapon.auto_firing {
        try_fire(state);
    }

    spawn_enemies(state);
    spawn_pickup(state);

    check_round_complete(state);
    advance_countdowns(state);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let mut step = Vec2::ZERO;
    if input.up {
        step.y -= 1.0;
    }
    if input.down {
        step.y += 1.0;
    }
    if input.left {
        step.x -= 1.0;
    }
    if input.right {
        step.x += 1.0;
    }
    // Axes move independently, so diagonals are faster
    state.player.pos += step * state.player.speed;
    state.player.clamp_to(&state.field);
}

fn update_bullets(state: &mut GameState) {
    let field = state.field;
    let mut bullets = std::mem::take(&mut state.bullets);

    bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;
        if bullet.is_off_screen(&field) {
            return false;
        }
        let angle = bullet.vel.y.atan2(bullet.vel.x);

        // Enemies first, then bosses; first hit consumes the bullet
        if let Some(i) = state
            .enemies
            .iter()
            .position(|e| circles_overlap(bullet.pos, bullet.radius, e.pos, e.radius()))
        {
            let enemy = &mut state.enemies[i];
            enemy.health -= bullet.damage;
            let (pos, size) = (enemy.pos, enemy.size);
            state.hit_flashes.push(HitFlash {
                pos,
                angle,
                size: (size * 0.6).max(42.0),
                life: 18,
                max_life: 18,
            });
            state.sound(SoundCue::Hit);
            state.burst(pos, 15, 8.0, 30);
            if state.enemies[i].health <= 0.0 {
                state.enemies.remove(i);
                award_enemy_kill(state);
            }
            return false;
        }

        if let Some(i) = state
            .bosses
            .iter()
            .position(|b| circles_overlap(bullet.pos, bullet.radius, b.pos, b.radius()))
        {
            let boss = &mut state.bosses[i];
            boss.health -= bullet.damage;
            let (pos, size) = (boss.pos, boss.size);
            state.hit_flashes.push(HitFlash {
                pos,
                angle,
                size: (size * 0.5).max(62.0),
                life: 20,
                max_life: 20,
            });
            state.sound(SoundCue::BossHit);
            state.burst(pos, 20, 10.0, 35);
            if state.bosses[i].health <= 0.0 {
                state.bosses.remove(i);
                award_boss_kill(state);
            }
            return false;
        }

        true
    });

    state.bullets = bullets;
}

fn award_enemy_kill(state: &mut GameState) {
    state.score += ENEMY_SCORE;
    add_energy_charge(state, ENEMY_KILL_CHARGE);
    state.sound(SoundCue::Explosion);
}

fn award_boss_kill(state: &mut GameState) {
    state.score += BOSS_SCORE;
    add_energy_charge(state, BOSS_KILL_CHARGE);
    state.sound(SoundCue::BossExplosion);
    if !state.boss_wave_active() {
        state.sound(SoundCue::BossThemeStop);
        log::info!("Boss wave down at round {}", state.round.round);
    }
}

/// Move enemies and resolve player contact. Returns true if the player died.
fn update_enemies(state: &mut GameState) -> bool {
    let target = state.player.pos;
    let player_radius = state.player.radius();
    let clock = state.clock_ms;
    let mut contacts = 0;

    state.enemies.retain_mut(|enemy| {
        let mut vel = pursue(enemy.pos, target, enemy.speed);
        if let Some(anim) = enemy.animation.as_mut() {
            // Animated crawlers wobble their pace a little
            let wobble = (clock as f32 * 0.001 + enemy.id as f32).sin() * 0.15;
            vel *= 1.0 + wobble;
            anim.advance(TICK_MS);
        }
        enemy.vel = vel;
        enemy.pos += vel;

        if circles_overlap(target, player_radius, enemy.pos, enemy.radius()) {
            contacts += 1;
            return false;
        }
        true
    });

    let mut dead = false;
    for _ in 0..contacts {
        dead |= state.player.take_damage(ENEMY_CONTACT_DAMAGE);
        state.sound(SoundCue::Hit);
        state.burst(target, 20, 10.0, 40);
        state.sound(SoundCue::Explosion);
        log::debug!("Enemy contact, health now {}", state.player.health);
    }
    dead
}

/// Move bosses and resolve ramming. Returns true if the player died.
fn update_bosses(state: &mut GameState) -> bool {
    let target = state.player.pos;
    let player_radius = state.player.radius();
    let mut rams = 0;

    for boss in &mut state.bosses {
        let speed = boss.speed * boss.variant.speed_mult();
        boss.pos += pursue(boss.pos, target, speed);
        boss.animation.advance(TICK_MS);

        let contact = circle_contact(boss.pos, boss.radius(), target, player_radius);
        if contact.hit {
            // Push the boss back along the line toward the player
            boss.pos -= contact.normal * BOSS_KNOCKBACK;
            rams += 1;
        }
    }

    let mut dead = false;
    for _ in 0..rams {
        dead |= state.player.take_damage(BOSS_CONTACT_DAMAGE);
        state.sound(SoundCue::BossExplosion);
        state.burst(target, 30, 12.0, 45);
        log::debug!("Boss contact, health now {}", state.player.health);
    }
    dead
}

/// Collect touched pickups. Returns true if a pickup was lethal.
fn update_pickups(state: &mut GameState) -> bool {
    let target = state.player.pos;
    let player_radius = state.player.radius();

    let mut collected = Vec::new();
    state.pickups.retain(|p| {
        if circles_overlap(target, player_radius, p.pos, p.radius) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.sound(SoundCue::PowerupCollect);
        apply_pickup(state, kind);
        log::debug!("Collected {:?}", kind);
    }
    state.player.health <= 0.0
}

fn update_energy_ball(state: &mut GameState) {
    let Some(mut ball) = state.energy_ball.take() else {
        return;
    };
    ball.pos += ball.vel;
    ball.traveled += ball.vel.length();

    // Pierces: every overlapping target takes damage each tick
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        if !circles_overlap(ball.pos, ball.radius, enemy.pos, enemy.radius()) {
            i += 1;
            continue;
        }
        enemy.health -= ball.damage_enemy;
        let (pos, killed) = (enemy.pos, enemy.health <= 0.0);
        state.burst(pos, 6, 6.0, 22);
        if killed {
            state.enemies.remove(i);
            award_enemy_kill(state);
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i < state.bosses.len() {
        let boss = &mut state.bosses[i];
        if !circles_overlap(ball.pos, ball.radius, boss.pos, boss.radius()) {
            i += 1;
            continue;
        }
        boss.health -= ball.damage_boss;
        let (pos, killed) = (boss.pos, boss.health <= 0.0);
        state.sound(SoundCue::BossHit);
        state.burst(pos, 10, 8.0, 26);
        if killed {
            state.bosses.remove(i);
            award_boss_kill(state);
        } else {
            i += 1;
        }
    }

    let field = state.field;
    let outside = ball.pos.x < -ENERGY_BALL_MARGIN
        || ball.pos.x > field.width + ENERGY_BALL_MARGIN
        || ball.pos.y < -ENERGY_BALL_MARGIN
        || ball.pos.y > field.height + ENERGY_BALL_MARGIN;
    if ball.traveled > ball.max_range || outside {
        log::trace!("Energy ball spent after {:.0} px", ball.traveled);
        return;
    }
    state.energy_ball = Some(ball);
}

/// Simple demo pilot: keeps its distance, aims at the closest threat and
/// grabs pickups when nothing is close.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if !state.simulation_active() {
        return input;
    }
    let me = state.player.pos;

    let nearest = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .chain(state.bosses.iter().map(|b| b.pos))
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut heading = Vec2::ZERO;
    if let Some(threat) = nearest {
        input.aim = Some(threat);
        input.fire_down = true;
        let dist = threat.distance(me);
        if dist < 260.0 {
            heading = (me - threat).normalize_or_zero();
        }
    }
    if heading == Vec2::ZERO {
        if let Some(pickup) = state.pickups.first() {
            heading = (pickup.pos - me).normalize_or_zero();
        } else {
            // Drift back toward the middle
            let center = Vec2::new(state.field.width, state.field.height) / 2.0;
            if center.distance(me) > 40.0 {
                heading = (center - me).normalize_or_zero();
            }
        }
    }

    input.left = heading.x < -0.3;
    input.right = heading.x > 0.3;
    input.up = heading.y < -0.3;
    input.down = heading.y > 0.3;
    input.cast = state.energy_charge >= ENERGY_BALL_MAX;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{
        Animation, Boss, BossVariant, Bullet, Enemy, EnemyVariant, EnergyBall, Pickup, PowerUpKind,
    };
    use crate::sim::GameEvent;
    use crate::sim::effects::MYSTERY_DAMAGE;
    use proptest::prelude::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state.drain_events();
        state
    }

    fn enemy_at(state: &mut GameState, pos: Vec2, health: f32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            vel: Vec2::ZERO,
            size: 80.0,
            speed: 0.0,
            health,
            max_health: health,
            variant: EnemyVariant::Drone,
            animation: None,
        });
    }

    fn boss_at(state: &mut GameState, pos: Vec2, health: f32) {
        let id = state.next_entity_id();
        state.bosses.push(Boss {
            id,
            pos,
            size: BOSS_SIZE,
            speed: 0.0,
            health,
            max_health: health,
            variant: BossVariant::Primary,
            animation: Animation::new(2, BOSS_FRAME_INTERVAL_MS),
        });
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new(12345);
        let input = TickInput {
            right: true,
            fire_down: true,
            ..Default::default()
        };
        let before = state.player.pos;
        tick(&mut state, &input);
        assert_eq!(state.clock_ms, 0);
        assert_eq!(state.player.pos, before);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = started(12345);
        tick(&mut state, &TickInput::default());
        let clock = state.clock_ms;
        let spawn_rate = state.round.enemy_spawn_rate_ms;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert!(state.paused);
        for _ in 0..100 {
            tick(&mut state, &TickInput { fire_down: true, right: true, ..Default::default() });
        }
        assert_eq!(state.clock_ms, clock);
        assert_eq!(state.round.enemy_spawn_rate_ms, spawn_rate);
        assert!(state.bullets.is_empty());

        // Unpause resumes where it stopped
        tick(&mut state, &pause);
        assert!(!state.paused);
        assert_eq!(state.clock_ms, clock + TICK_MS as u64);
    }

    #[test]
    fn test_first_tick_spawns_batch_and_pickup() {
        let mut state = started(5);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.round.enemies_to_spawn, 14);
    }

    #[test]
    fn test_held_fire_repeats_on_cooldown() {
        let mut state = started(5);
        state.pickups.clear();
        state.last_powerup_spawn_ms = Some(0);
        tick(&mut state, &TickInput { fire_down: true, ..Default::default() });
        assert_eq!(state.bullets.len(), 1);

        // 200 ms cooldown: 13 ticks of 16 ms later the next shot goes out
        for _ in 0..12 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 2);

        tick(&mut state, &TickInput { fire_up: true, ..Default::default() });
        assert!(!state.weapon.holding_fire);
    }

    #[test]
    fn test_autofire_arms_on_trigger() {
        let mut state = started(5);
        apply_pickup(&mut state, PowerUpKind::Autofire);
        tick(&mut state, &TickInput { fire_down: true, ..Default::default() });
        tick(&mut state, &TickInput { fire_up: true, ..Default::default() });
        assert!(state.weapon.auto_firing);
        assert!(!state.weapon.holding_fire);
        let fired = state.bullets.len();
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.len() > fired);
    }

    #[test]
    fn test_bullet_hits_first_enemy_only() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        state.last_powerup_spawn_ms = Some(0);
        let target = state.player.pos + Vec2::new(0.0, -300.0);
        enemy_at(&mut state, target, 3.0);
        enemy_at(&mut state, target, 3.0);
        state.player.aim = target;

        tick(&mut state, &TickInput { fire_down: true, ..Default::default() });
        tick(&mut state, &TickInput { fire_up: true, ..Default::default() });
        assert_eq!(state.bullets.len(), 1);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.is_empty());
        let mut healths: Vec<f32> = state.enemies.iter().map(|e| e.health).collect();
        healths.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(healths, vec![2.0, 3.0]);
        assert!(state
            .drain_events()
            .contains(&crate::sim::GameEvent::Sound(SoundCue::Hit)));
    }

    #[test]
    fn test_enemy_contact_kills_enemy_and_hurts() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        let pos = state.player.pos;
        enemy_at(&mut state, pos, 50.0);
        tick(&mut state, &TickInput::default());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, MAX_HEALTH - ENEMY_CONTACT_DAMAGE);
        // Last enemy dying on contact still completes the round
        assert!(state.upgrade_offer().is_some());
    }

    #[test]
    fn test_boss_contact_knocks_back() {
        let mut state = started(5);
        let pos = state.player.pos + Vec2::new(50.0, 0.0);
        boss_at(&mut state, pos, 100.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, MAX_HEALTH - BOSS_CONTACT_DAMAGE);
        assert!(state.bosses[0].pos.x > pos.x);
    }

    #[test]
    fn test_lethal_contact_ends_run() {
        let mut state = started(5);
        state.player.health = ENEMY_CONTACT_DAMAGE;
        let pos = state.player.pos;
        enemy_at(&mut state, pos, 1.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.pickups.is_empty(), "rest of the tick is skipped");
    }

    #[test]
    fn test_pickup_collected_on_touch() {
        let mut state = started(5);
        state.last_powerup_spawn_ms = Some(0);
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            pos: state.player.pos,
            radius: POWERUP_RADIUS,
            kind: PowerUpKind::Rapid,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.pickups.is_empty());
        assert_eq!(state.active_effect_kind(), Some(EffectKind::Rapid));
        assert!(state
            .drain_events()
            .contains(&crate::sim::GameEvent::Sound(SoundCue::PowerupCollect)));
    }

    #[test]
    fn test_energy_ball_pierces_and_expires() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        let origin = Vec2::new(200.0, 200.0);
        enemy_at(&mut state, origin + Vec2::new(20.0, 0.0), 5.0);
        enemy_at(&mut state, origin + Vec2::new(-20.0, 0.0), 5.0);
        // Out of reach; keeps the round open
        enemy_at(&mut state, Vec2::new(1200.0, 100.0), 100.0);
        state.energy_ball = Some(EnergyBall {
            pos: origin,
            vel: Vec2::ZERO,
            radius: ENERGY_BALL_RADIUS,
            damage_enemy: ENERGY_BALL_DAMAGE_ENEMY,
            damage_boss: ENERGY_BALL_DAMAGE_BOSS,
            traveled: 0.0,
            max_range: ENERGY_BALL_RANGE,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 2 * ENEMY_SCORE);
        assert_eq!(state.energy_charge, 2 * ENEMY_KILL_CHARGE);

        if let Some(ball) = state.energy_ball.as_mut() {
            ball.traveled = ENERGY_BALL_RANGE;
            ball.vel = Vec2::X;
        }
        tick(&mut state, &TickInput::default());
        assert!(state.energy_ball.is_none());
    }

    fn parked_ball(pos: Vec2) -> EnergyBall {
        EnergyBall {
            pos,
            vel: Vec2::ZERO,
            radius: ENERGY_BALL_RADIUS,
            damage_enemy: ENERGY_BALL_DAMAGE_ENEMY,
            damage_boss: ENERGY_BALL_DAMAGE_BOSS,
            traveled: 0.0,
            max_range: ENERGY_BALL_RANGE,
        }
    }

    #[test]
    fn test_energy_ball_kills_last_boss() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        state.last_powerup_spawn_ms = Some(0);
        let origin = Vec2::new(200.0, 200.0);
        boss_at(&mut state, origin, 2.0 * ENERGY_BALL_DAMAGE_BOSS);
        state.energy_ball = Some(parked_ball(origin));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bosses.len(), 1);
        assert_eq!(state.bosses[0].health, ENERGY_BALL_DAMAGE_BOSS);
        assert!(state.upgrade_offer().is_none());
        state.drain_events();

        tick(&mut state, &TickInput::default());
        assert!(state.bosses.is_empty());
        assert_eq!(state.score, BOSS_SCORE);
        assert_eq!(state.energy_charge, BOSS_KILL_CHARGE.min(ENERGY_BALL_MAX));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::BossHit)));
        assert!(events.contains(&GameEvent::Sound(SoundCue::BossThemeStop)));
        assert!(state.upgrade_offer().is_some());
    }

    #[test]
    fn test_lethal_mystery_ends_run() {
        let mut lethal = 0;
        for seed in 0..200 {
            let mut state = started(seed);
            state.player.health = MYSTERY_DAMAGE;
            let id = state.next_entity_id();
            state.pickups.push(Pickup {
                id,
                pos: state.player.pos,
                radius: POWERUP_RADIUS,
                kind: PowerUpKind::Mystery,
            });
            tick(&mut state, &TickInput::default());

            if state.phase == GamePhase::GameOver {
                lethal += 1;
                assert_eq!(state.player.health, 0.0);
                assert!(state.enemies.is_empty(), "rest of the tick is skipped");
                assert!(state
                    .drain_events()
                    .contains(&GameEvent::GameOver { score: 0, round: 1 }));
            } else {
                assert!(state.is_running());
            }
        }
        assert!(lethal > 0);
    }

    #[test]
    fn test_bullets_culled_past_margins() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        // Out of reach; keeps the round open
        enemy_at(&mut state, Vec2::new(600.0, -200.0), 100.0);
        let width = state.field.width;
        let bullet = |x: f32, dx: f32| Bullet {
            pos: Vec2::new(x, 100.0),
            vel: Vec2::new(dx, 0.0),
            radius: BULLET_RADIUS,
            damage: 1.0,
        };
        state.bullets.push(bullet(width + BULLET_CULL_FAR - 1.0, 2.0));
        state.bullets.push(bullet(-BULLET_CULL_NEAR + 3.0, -1.0));
        state.bullets.push(bullet(-BULLET_CULL_NEAR + 1.0, -2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, -BULLET_CULL_NEAR + 2.0);
    }

    #[test]
    fn test_fire_held_through_upgrade_selection() {
        let mut state = started(5);
        state.round.enemies_to_spawn = 0;
        state.last_powerup_spawn_ms = Some(0);
        tick(&mut state, &TickInput::default());
        assert!(state.upgrade_offer().is_some());

        tick(&mut state, &TickInput { fire_down: true, ..Default::default() });
        assert!(state.weapon.holding_fire);
        assert!(state.bullets.is_empty());

        state.select_upgrade(0).expect("offer is open");
        for _ in 0..=(UPGRADE_DELAY_MS / TICK_MS) {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.round.round, 2);
        assert!(state.weapon.holding_fire);
        tick(&mut state, &TickInput::default());
        assert!(!state.bullets.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        for _ in 0..600 {
            let input1 = autopilot_input(&state1);
            let input2 = autopilot_input(&state2);
            tick(&mut state1, &input1);
            tick(&mut state2, &input2);
        }

        assert_eq!(state1.clock_ms, state2.clock_ms);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.health, state2.player.health);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 4]>(), any::<bool>()).prop_map(|(keys, fire)| TickInput {
            up: keys[0],
            down: keys[1],
            left: keys[2],
            right: keys[3],
            fire_down: fire,
            ..Default::default()
        })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = started(7);
            let half = state.player.radius();
            for input in &inputs {
                tick(&mut state, input);
                let p = state.player.pos;
                prop_assert!(p.x >= half && p.x <= state.field.width - half);
                prop_assert!(p.y >= half && p.y <= state.field.height - half);
            }
        }
    }
}
