//! Round/game state machine
//!
//! Run lifecycle: `Idle → Running(Active) → Running(AwaitingUpgrade) →
//! Running(Intermission) → Running(Active)` for the next round, with
//! `GameOver` reachable from any running state. Pause is an orthogonal flag.

use rand::seq::index::sample;

use super::effects::{UpgradeKind, apply_upgrade, refresh_derived};
use super::events::{GameEvent, SoundCue};
use super::spawn::spawn_bosses;
use super::state::{GamePhase, GameState, RoundPhase};
use crate::SessionError;
use crate::consts::*;

/// Boss waves land on rounds 3, 7, 11, ...
pub fn is_boss_round(round: u32) -> bool {
    round >= 3 && (round - 3) % 4 == 0
}

/// Bosses in the wave for `round`: 1, 2, 3, ... on successive boss rounds
pub fn boss_count(round: u32) -> u32 {
    1 + round.saturating_sub(3) / 4
}

/// Regular enemies to spawn in a normal round
pub fn enemy_quota(round: u32) -> u32 {
    BASE_ENEMIES_PER_ROUND + ENEMIES_PER_ROUND_STEP * round
}

/// Starting enemy spawn interval for a normal round
pub fn enemy_spawn_rate(round: u32) -> u32 {
    ENEMY_SPAWN_RATE_BASE_MS
        .saturating_sub(ENEMY_SPAWN_RATE_STEP_MS * round)
        .max(ENEMY_SPAWN_RATE_MIN_MS)
}

/// Set up the wave for the current round counter
pub fn start_round(state: &mut GameState) {
    let round = state.round.round;
    state.phase = GamePhase::Running(RoundPhase::Active);
    state.round.banner_ms = ROUND_BANNER_MS;

    let boss_wave = is_boss_round(round);
    state.emit(GameEvent::RoundStarted { round, boss_wave });

    if boss_wave {
        state.round.enemies_to_spawn = 0;
        spawn_bosses(state, boss_count(round));
    } else {
        state.round.enemies_to_spawn = enemy_quota(round);
        state.round.enemy_spawn_rate_ms = enemy_spawn_rate(round);
        log::info!(
            "Round {}: {} enemies, spawn every {} ms",
            round,
            state.round.enemies_to_spawn,
            state.round.enemy_spawn_rate_ms
        );
    }
}

/// True when the active round has nothing left to fight or spawn
pub fn round_complete(state: &GameState) -> bool {
    !state.boss_wave_active() && state.round.enemies_to_spawn == 0 && state.enemies.is_empty()
}

/// Move to upgrade selection if the active round is done
///
/// Returns true when the transition happened.
pub fn check_round_complete(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running(RoundPhase::Active) || !round_complete(state) {
        return false;
    }

    let picks = sample(&mut state.rng, UpgradeKind::ALL.len(), UPGRADE_CHOICES);
    let mut offer = [UpgradeKind::FireRate; UPGRADE_CHOICES];
    for (slot, idx) in offer.iter_mut().zip(picks.iter()) {
        *slot = UpgradeKind::ALL[idx];
    }

    let round = state.round.round;
    state.phase = GamePhase::Running(RoundPhase::AwaitingUpgrade { offer });
    state.emit(GameEvent::RoundCleared { round });
    log::info!("Round {} cleared, offering {:?}", round, offer);
    true
}

/// End the run immediately
pub fn game_over(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.paused = false;
    state.weapon.holding_fire = false;
    state.weapon.auto_firing = false;
    state.sound(SoundCue::BossThemeStop);
    state.emit(GameEvent::GameOver {
        score: state.score,
        round: state.round.round,
    });
    log::info!(
        "Game over at round {} with score {}",
        state.round.round,
        state.score
    );
}

/// Advance pacing countdowns by one tick
pub fn advance_countdowns(state: &mut GameState) {
    state.round.banner_ms = state.round.banner_ms.saturating_sub(TICK_MS);

    if let Some(ms) = state.round.pending_boss_intro_ms {
        if ms <= TICK_MS {
            state.round.pending_boss_intro_ms = None;
            state.sound(SoundCue::BossIntro);
        } else {
            state.round.pending_boss_intro_ms = Some(ms - TICK_MS);
        }
    }
}

/// Count the post-upgrade delay down; starts the next round at zero
pub fn advance_intermission(state: &mut GameState) {
    let GamePhase::Running(RoundPhase::Intermission { remaining_ms }) = state.phase else {
        return;
    };
    if remaining_ms > TICK_MS {
        state.phase = GamePhase::Running(RoundPhase::Intermission {
            remaining_ms: remaining_ms - TICK_MS,
        });
        return;
    }
    state.round.round += 1;
    start_round(state);
}

impl GameState {
    /// Start (or restart) a run from scratch
    pub fn start_run(&mut self) {
        self.reset_run();
        refresh_derived(self);
        self.sound(SoundCue::BossThemeStop);
        self.emit(GameEvent::RunStarted { seed: self.seed });
        log::info!("Run started (seed {}, stream {})", self.seed, self.rng_state.stream);
        start_round(self);
    }

    /// Upgrades on offer, if the player is choosing one
    pub fn upgrade_offer(&self) -> Option<[UpgradeKind; UPGRADE_CHOICES]> {
        match self.phase {
            GamePhase::Running(RoundPhase::AwaitingUpgrade { offer }) => Some(offer),
            _ => None,
        }
    }

    /// Apply the chosen upgrade and schedule the next round
    pub fn select_upgrade(&mut self, choice: usize) -> Result<UpgradeKind, SessionError> {
        let offer = self.upgrade_offer().ok_or(SessionError::NotAwaitingUpgrade)?;
        let kind = *offer.get(choice).ok_or(SessionError::InvalidChoice(choice))?;

        let (stats, health) = apply_upgrade(kind, &self.stats, self.player.health);
        self.stats = stats;
        self.player.health = health;
        refresh_derived(self);

        self.phase = GamePhase::Running(RoundPhase::Intermission {
            remaining_ms: UPGRADE_DELAY_MS,
        });
        self.emit(GameEvent::UpgradeApplied { kind });
        log::info!("Upgrade applied: {}", kind.title());
        Ok(kind)
    }

    /// Flip the pause flag. Ignored outside a run.
    pub fn toggle_pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.set_paused(!self.paused);
    }

    /// Set the pause flag; setting the current value again is a no-op
    pub fn set_paused(&mut self, paused: bool) {
        if !self.is_running() || self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.weapon.holding_fire = false;
            if self.boss_wave_active() {
                self.sound(SoundCue::BossThemeStop);
            }
            log::debug!("Paused at {} ms", self.clock_ms);
        } else {
            if self.boss_wave_active() {
                self.sound(SoundCue::BossThemeStart);
            }
            log::debug!("Resumed at {} ms", self.clock_ms);
        }
    }
}
