//! Read-only snapshots for presentation adapters
//!
//! Renderers and HUD widgets never read [`GameState`] directly; they get a
//! [`FrameView`] / [`HudView`] built after each tick.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::effects::UpgradeKind;
use crate::sim::{BossVariant, EffectKind, EnemyVariant, GamePhase, GameState, Meter, PowerUpKind};

/// Something that draws a frame
pub trait RenderSink {
    fn draw(&mut self, frame: &FrameView);
}

/// Something that shows the HUD
pub trait HudSink {
    fn update(&mut self, hud: &HudView);
}

/// Capture both views and hand them to the adapters
pub fn present(state: &GameState, render: &mut dyn RenderSink, hud: &mut dyn HudSink) {
    render.draw(&FrameView::capture(state));
    hud.update(&HudView::capture(state));
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub aim_angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub variant: EnemyVariant,
    pub frame: u8,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub variant: BossVariant,
    /// Sprite frame; the secondary variant cycles in reverse
    pub frame: u8,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitFlashView {
    pub pos: Vec2,
    pub angle: f32,
    pub size: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnergyBallView {
    pub pos: Vec2,
    pub radius: f32,
    /// Share of range still left
    pub remaining: f32,
}

/// Round-start banner, fading out over its countdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub text: String,
    pub alpha: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub field: Vec2,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub bosses: Vec<BossView>,
    pub pickups: Vec<PickupView>,
    pub particles: Vec<ParticleView>,
    pub hit_flashes: Vec<HitFlashView>,
    pub energy_ball: Option<EnergyBallView>,
    /// Combined health of the boss wave, if one is active
    pub boss_health: Option<f32>,
    pub round: u32,
    pub banner: Option<Banner>,
    pub paused: bool,
    pub game_over: bool,
    /// Upgrade cards while the selection modal is open
    pub upgrade_offer: Option<Vec<UpgradeCard>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeCard {
    pub kind: UpgradeKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let enemies = state
            .enemies
            .iter()
            .map(|e| EnemyView {
                id: e.id,
                pos: e.pos,
                size: e.size,
                variant: e.variant,
                frame: e.animation.map_or(0, |a| a.frame),
                health_ratio: crate::ratio(e.health, e.max_health),
            })
            .collect();

        let bosses = state
            .bosses
            .iter()
            .map(|b| {
                let anim = b.animation;
                let frame = match b.variant {
                    BossVariant::Primary => anim.frame,
                    BossVariant::Secondary => anim.frames - 1 - anim.frame,
                };
                BossView {
                    id: b.id,
                    pos: b.pos,
                    size: b.size,
                    variant: b.variant,
                    frame,
                    health_ratio: crate::ratio(b.health, b.max_health),
                }
            })
            .collect();

        let boss_health = state.boss_wave_active().then(|| {
            let (hp, max) = state
                .bosses
                .iter()
                .fold((0.0, 0.0), |(hp, max), b| (hp + b.health.max(0.0), max + b.max_health));
            crate::ratio(hp, max)
        });

        let round = state.round.round;
        let banner = (state.is_running() && state.round.banner_ms > 0).then(|| Banner {
            text: if crate::sim::is_boss_round(round) {
                format!("Boss Round {round}")
            } else {
                format!("Round {round}")
            },
            alpha: crate::ratio(state.round.banner_ms as f32, ROUND_BANNER_MS as f32),
        });

        let upgrade_offer = state.upgrade_offer().map(|offer| {
            offer
                .iter()
                .map(|&kind| UpgradeCard {
                    kind,
                    title: kind.title(),
                    description: kind.description(),
                })
                .collect()
        });

        Self {
            field: Vec2::new(state.field.width, state.field.height),
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                aim_angle: player.aim_angle(),
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            enemies,
            bosses,
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupView {
                    pos: p.pos,
                    radius: p.radius,
                    kind: p.kind,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    alpha: crate::ratio(p.life as f32, p.max_life as f32),
                })
                .collect(),
            hit_flashes: state
                .hit_flashes
                .iter()
                .map(|h| HitFlashView {
                    pos: h.pos,
                    angle: h.angle,
                    size: h.size,
                    alpha: crate::ratio(h.life as f32, h.max_life as f32),
                })
                .collect(),
            energy_ball: state.energy_ball.as_ref().map(|b| EnergyBallView {
                pos: b.pos,
                radius: b.radius,
                remaining: 1.0 - crate::ratio(b.traveled, b.max_range),
            }),
            boss_health,
            round,
            banner,
            paused: state.paused,
            game_over: state.phase == GamePhase::GameOver,
            upgrade_offer,
        }
    }
}

/// Health bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    /// 30% or less
    Critical,
    /// 60% or less
    Warning,
    Healthy,
}

impl HealthBand {
    pub fn from_percent(percent: f32) -> Self {
        if percent <= 30.0 {
            HealthBand::Critical
        } else if percent <= 60.0 {
            HealthBand::Warning
        } else {
            HealthBand::Healthy
        }
    }
}

/// HUD readout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub score: u64,
    pub round: u32,
    /// 0 - 100, relative to the health cap
    pub health_percent: f32,
    pub health_band: HealthBand,
    pub power_label: String,
    /// Remaining time or ammo share of the active power-up
    pub power_fraction: f32,
    pub energy_fraction: f32,
    pub energy_ready: bool,
}

impl HudView {
    pub fn capture(state: &GameState) -> Self {
        let health_percent = crate::ratio(state.player.health, MAX_HEALTH) * 100.0;
        let (power_label, power_fraction) = match state.effect {
            Some(effect) => {
                let label = match (effect.kind, effect.meter) {
                    (EffectKind::Shotgun, Meter::Ammo { remaining, capacity }) => {
                        format!("SHOTGUN: {remaining}/{capacity}")
                    }
                    (kind, _) => format!("POWER: {}", kind.label()),
                };
                (label, effect.fraction())
            }
            None => ("POWER: NONE".to_string(), 0.0),
        };

        Self {
            score: state.score,
            round: state.round.round,
            health_percent,
            health_band: HealthBand::from_percent(health_percent),
            power_label,
            power_fraction,
            energy_fraction: crate::ratio(state.energy_charge as f32, ENERGY_BALL_MAX as f32),
            energy_ready: state.energy_charge >= ENERGY_BALL_MAX && state.energy_ball.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::apply_pickup;
    use crate::sim::{Boss, Playfield};
    use crate::sim::state::Animation;

    fn started() -> GameState {
        let mut state = GameState::new(21);
        state.start_run();
        state
    }

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::from_percent(30.0), HealthBand::Critical);
        assert_eq!(HealthBand::from_percent(30.5), HealthBand::Warning);
        assert_eq!(HealthBand::from_percent(60.0), HealthBand::Warning);
        assert_eq!(HealthBand::from_percent(100.0), HealthBand::Healthy);
    }

    #[test]
    fn test_hud_health_relative_to_cap() {
        let mut state = started();
        state.player.health = 100.0;
        let hud = HudView::capture(&state);
        assert_eq!(hud.health_percent, 50.0);
        assert_eq!(hud.health_band, HealthBand::Warning);

        state.player.health = 50.0;
        assert_eq!(HudView::capture(&state).health_band, HealthBand::Critical);
    }

    #[test]
    fn test_power_labels() {
        let mut state = started();
        assert_eq!(HudView::capture(&state).power_label, "POWER: NONE");

        apply_pickup(&mut state, PowerUpKind::Rapid);
        let hud = HudView::capture(&state);
        assert_eq!(hud.power_label, "POWER: RAPID");
        assert_eq!(hud.power_fraction, 1.0);

        apply_pickup(&mut state, PowerUpKind::Shotgun);
        for _ in 0..5 {
            crate::sim::effects::consume_ammo(&mut state);
        }
        let hud = HudView::capture(&state);
        assert_eq!(hud.power_label, "SHOTGUN: 7/12");
    }

    #[test]
    fn test_banner_fades_and_names_boss_rounds() {
        let mut state = started();
        let frame = FrameView::capture(&state);
        assert_eq!(
            frame.banner,
            Some(Banner {
                text: "Round 1".into(),
                alpha: 1.0
            })
        );

        state.round.round = 3;
        state.round.banner_ms = ROUND_BANNER_MS / 2;
        let banner = FrameView::capture(&state).banner.expect("banner");
        assert_eq!(banner.text, "Boss Round 3");
        assert_eq!(banner.alpha, 0.5);

        state.round.banner_ms = 0;
        assert!(FrameView::capture(&state).banner.is_none());
    }

    #[test]
    fn test_boss_health_is_aggregate_and_clamped() {
        let mut state = started();
        assert!(FrameView::capture(&state).boss_health.is_none());
        for (id, hp) in [(1, 60.0), (2, -5.0)] {
            state.bosses.push(Boss {
                id,
                pos: Vec2::ZERO,
                size: BOSS_SIZE,
                speed: 0.0,
                health: hp,
                max_health: 120.0,
                variant: BossVariant::Secondary,
                animation: Animation::new(2, BOSS_FRAME_INTERVAL_MS),
            });
        }
        let frame = FrameView::capture(&state);
        assert_eq!(frame.boss_health, Some(0.25));
        assert_eq!(frame.bosses[1].health_ratio, 0.0);
        // Reversed cycle for the secondary variant
        assert_eq!(frame.bosses[0].frame, 1);
    }

    #[test]
    fn test_upgrade_cards_only_while_choosing() {
        let mut state = started();
        assert!(FrameView::capture(&state).upgrade_offer.is_none());
        state.round.enemies_to_spawn = 0;
        crate::sim::round::check_round_complete(&mut state);
        let cards = FrameView::capture(&state).upgrade_offer.expect("cards");
        assert_eq!(cards.len(), UPGRADE_CHOICES);
        assert!(cards.iter().all(|c| !c.title.is_empty()));
    }

    struct Counter(usize);

    impl RenderSink for Counter {
        fn draw(&mut self, frame: &FrameView) {
            self.0 += frame.enemies.len() + 1;
        }
    }

    impl HudSink for Counter {
        fn update(&mut self, hud: &HudView) {
            self.0 += hud.round as usize;
        }
    }

    #[test]
    fn test_present_feeds_both_sinks() {
        let state = started();
        let mut render = Counter(0);
        let mut hud = Counter(0);
        present(&state, &mut render, &mut hud);
        assert_eq!(render.0, 1);
        assert_eq!(hud.0, 1);
        assert_eq!(FrameView::capture(&state).field.x, Playfield::default().width);
    }
}
