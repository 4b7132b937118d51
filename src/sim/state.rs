//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the tick and the state
//! machine only ever mutate it through `&mut GameState`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::UpgradeKind;
use super::events::{GameEvent, SoundCue};
use crate::Settings;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run
    Idle,
    /// A run is in progress
    Running(RoundPhase),
    /// Run ended; waits for a restart
    GameOver,
}

/// Sub-state while a run is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Enemies or bosses are in play
    Active,
    /// Round cleared, waiting for the player to pick one of three upgrades
    AwaitingUpgrade { offer: [UpgradeKind; UPGRADE_CHOICES] },
    /// Short pause after picking an upgrade, before the next round starts
    Intermission { remaining_ms: u32 },
}

/// Frame cycling for sprite-animated entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: u8,
    pub frame: u8,
    pub timer_ms: u32,
    pub interval_ms: u32,
}

impl Animation {
    pub fn new(frames: u8, interval_ms: u32) -> Self {
        Self {
            frames: frames.max(1),
            frame: 0,
            timer_ms: 0,
            interval_ms,
        }
    }

    /// Advance by one tick worth of time
    pub fn advance(&mut self, dt_ms: u32) {
        self.timer_ms += dt_ms;
        if self.timer_ms >= self.interval_ms {
            self.frame = (self.frame + 1) % self.frames;
            self.timer_ms = 0;
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Side of the square bounding box
    pub size: f32,
    /// Current movement speed (pixels per tick), derived from stats and effects
    pub speed: f32,
    pub health: f32,
    /// Pointer position the avatar faces
    pub aim: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            speed: PLAYER_BASE_SPEED,
            health: MAX_HEALTH,
            aim: pos - Vec2::Y,
        }
    }

    /// Effective collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Facing angle toward the pointer
    pub fn aim_angle(&self) -> f32 {
        crate::angle_between(self.pos, self.aim)
    }

    /// Keep the avatar fully on screen
    pub fn clamp_to(&mut self, field: &Playfield) {
        let half = self.radius();
        self.pos.x = self.pos.x.clamp(half, (field.width - half).max(half));
        self.pos.y = self.pos.y.clamp(half, (field.height - half).max(half));
    }

    /// Apply damage, saturating at zero. Returns true when this was lethal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }

    /// Heal up to the single health cap
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }
}

/// Permanent upgrade state for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Cooldown multiplier (lower is faster)
    pub fire_rate_mult: f32,
    pub damage: f32,
    pub bullet_speed: f32,
    /// Extra bullets beyond the first
    pub multi_shot_bonus: u32,
    pub speed_mult: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            fire_rate_mult: 1.0,
            damage: BASE_BULLET_DAMAGE,
            bullet_speed: BASE_BULLET_SPEED,
            multi_shot_bonus: 0,
            speed_mult: 1.0,
        }
    }
}

/// Trigger and cooldown state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Effective cooldown, derived from stats and the active effect
    pub cooldown_ms: f32,
    pub last_shot_ms: Option<u64>,
    /// Fire button currently held
    pub holding_fire: bool,
    /// Autofire power-up armed by a trigger pull
    pub auto_firing: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            cooldown_ms: BASE_SHOOT_COOLDOWN_MS,
            last_shot_ms: None,
            holding_fire: false,
            auto_firing: false,
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Damage snapshot taken when fired
    pub damage: f32,
}

impl Bullet {
    pub fn is_off_screen(&self, field: &Playfield) -> bool {
        self.pos.x < -BULLET_CULL_NEAR
            || self.pos.x > field.width + BULLET_CULL_FAR
            || self.pos.y < -BULLET_CULL_NEAR
            || self.pos.y > field.height + BULLET_CULL_FAR
    }
}

/// Regular enemy looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyVariant {
    /// Multi-frame animated sprite
    Crawler,
    /// Tankier sprite
    Brute,
    Drone,
    Stalker,
}

impl EnemyVariant {
    pub fn base_health(self) -> f32 {
        match self {
            EnemyVariant::Brute => 2.0,
            _ => 1.0,
        }
    }
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub variant: EnemyVariant,
    pub animation: Option<Animation>,
}

impl Enemy {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Boss looks and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossVariant {
    Primary,
    /// Every second boss in a wave: faster, larger, reversed frame cycle
    Secondary,
}

impl BossVariant {
    pub fn speed_mult(self) -> f32 {
        match self {
            BossVariant::Primary => 1.0,
            BossVariant::Secondary => BOSS_SECONDARY_SPEED_MULT,
        }
    }
}

/// A boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub variant: BossVariant,
    pub animation: Animation,
}

impl Boss {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Pickup types found on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Triple,
    Spread,
    Rapid,
    Autofire,
    Shotgun,
    Mystery,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Health,
        PowerUpKind::Triple,
        PowerUpKind::Spread,
        PowerUpKind::Rapid,
        PowerUpKind::Autofire,
        PowerUpKind::Shotgun,
        PowerUpKind::Mystery,
    ];
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Effects that can be active on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Triple,
    Spread,
    Rapid,
    Autofire,
    Shotgun,
    /// Mystery penalty: slower fire
    Jam,
    /// Mystery penalty: slower movement
    Slow,
}

impl EffectKind {
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Triple => "TRIPLE",
            EffectKind::Spread => "SPREAD",
            EffectKind::Rapid => "RAPID",
            EffectKind::Autofire => "AUTOFIRE",
            EffectKind::Shotgun => "SHOTGUN",
            EffectKind::Jam => "JAM",
            EffectKind::Slow => "SLOW",
        }
    }
}

/// How an active effect runs out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Meter {
    Timed { remaining_ms: i64, total_ms: i64 },
    Ammo { remaining: u32, capacity: u32 },
}

/// The single active power-up effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub meter: Meter,
}

impl ActiveEffect {
    pub fn timed(kind: EffectKind, duration_ms: i64) -> Self {
        Self {
            kind,
            meter: Meter::Timed {
                remaining_ms: duration_ms,
                total_ms: duration_ms,
            },
        }
    }

    pub fn ammo(kind: EffectKind, capacity: u32) -> Self {
        Self {
            kind,
            meter: Meter::Ammo {
                remaining: capacity,
                capacity,
            },
        }
    }

    /// Remaining share of the effect (time or ammo), 0..=1
    pub fn fraction(&self) -> f32 {
        match self.meter {
            Meter::Timed {
                remaining_ms,
                total_ms,
            } => crate::ratio(remaining_ms as f32, total_ms as f32),
            Meter::Ammo {
                remaining,
                capacity,
            } => crate::ratio(remaining as f32, capacity as f32),
        }
    }
}

/// Charge-gated piercing projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBall {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage_enemy: f32,
    pub damage_boss: f32,
    pub traveled: f32,
    pub max_range: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
}

/// Impact sprite shown where a bullet landed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitFlash {
    pub pos: Vec2,
    pub angle: f32,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Round counter and wave bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub round: u32,
    /// Regular enemies still to spawn this round
    pub enemies_to_spawn: u32,
    pub enemy_spawn_rate_ms: u32,
    pub last_enemy_spawn_ms: Option<u64>,
    /// Round-start banner countdown
    pub banner_ms: u32,
    /// Delayed second boss stinger
    pub pending_boss_intro_ms: Option<u32>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            round: 1,
            enemies_to_spawn: 0,
            enemy_spawn_rate_ms: ENEMY_SPAWN_RATE_BASE_MS,
            last_enemy_spawn_ms: None,
            banner_ms: 0,
            pending_boss_intro_ms: None,
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped per run so restarts play out differently
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

fn detached_rng() -> Pcg32 {
    RngState::new(0).to_rng()
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed
    pub seed: u64,
    pub rng_state: RngState,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// User pause, orthogonal to the phase
    pub paused: bool,
    /// Simulated milliseconds; only advances while the step runs
    pub clock_ms: u64,
    pub score: u64,
    pub field: Playfield,
    pub player: Player,
    pub stats: PlayerStats,
    pub weapon: Weapon,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Live bosses; the boss wave is active while non-empty
    pub bosses: Vec<Boss>,
    pub pickups: Vec<Pickup>,
    pub effect: Option<ActiveEffect>,
    /// Energy ball charge, 0..=ENERGY_BALL_MAX
    pub energy_charge: u32,
    pub energy_ball: Option<EnergyBall>,
    pub round: RoundState,
    pub last_powerup_spawn_ms: Option<u64>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub hit_flashes: Vec<HitFlash>,
    pub max_particles: usize,
    /// Pending notifications for adapters
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    /// Create an idle session sized and capped by `settings`
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let field = settings.playfield();
        let rng_state = RngState::new(seed);
        let spawn = Vec2::new(
            field.width / 2.0,
            field.height - PLAYER_SPAWN_BOTTOM_OFFSET,
        );
        Self {
            seed,
            rng: rng_state.to_rng(),
            rng_state,
            phase: GamePhase::Idle,
            paused: false,
            clock_ms: 0,
            score: 0,
            field,
            player: Player::new(spawn),
            stats: PlayerStats::default(),
            weapon: Weapon::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            pickups: Vec::new(),
            effect: None,
            energy_charge: 0,
            energy_ball: None,
            round: RoundState::default(),
            last_powerup_spawn_ms: None,
            particles: Vec::new(),
            hit_flashes: Vec::new(),
            max_particles: settings.max_particles(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an event for adapters
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a sound cue
    pub fn sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running(_))
    }

    /// Whether the per-tick simulation step runs right now
    pub fn simulation_active(&self) -> bool {
        self.phase == GamePhase::Running(RoundPhase::Active) && !self.paused
    }

    pub fn boss_wave_active(&self) -> bool {
        !self.bosses.is_empty()
    }

    pub fn active_effect_kind(&self) -> Option<EffectKind> {
        self.effect.map(|e| e.kind)
    }

    /// Add a particle, evicting the oldest when at capacity
    pub fn push_particle(&mut self, particle: Particle) {
        if self.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Scatter `count` particles from `pos` with velocities in ±spread/2
    pub fn burst(&mut self, pos: Vec2, count: usize, spread: f32, life: u32) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * spread,
                (self.rng.random::<f32>() - 0.5) * spread,
            );
            self.push_particle(Particle {
                pos,
                vel,
                life,
                max_life: life,
            });
        }
    }

    /// Advance particles and hit flashes by one tick
    pub fn update_cosmetics(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);

        for h in &mut self.hit_flashes {
            h.life = h.life.saturating_sub(1);
        }
        self.hit_flashes.retain(|h| h.life > 0);
    }

    /// Reset everything a run owns, keeping session identity and settings
    pub(crate) fn reset_run(&mut self) {
        self.rng_state.stream += 1;
        self.rng = self.rng_state.to_rng();
        self.paused = false;
        self.clock_ms = 0;
        self.score = 0;
        self.player = Player::new(Vec2::new(
            self.field.width / 2.0,
            self.field.height - PLAYER_SPAWN_BOTTOM_OFFSET,
        ));
        self.stats = PlayerStats::default();
        self.weapon = Weapon::default();
        self.bullets.clear();
        self.enemies.clear();
        self.bosses.clear();
        self.pickups.clear();
        self.effect = None;
        self.energy_charge = 0;
        self.energy_ball = None;
        self.round = RoundState::default();
        self.last_powerup_spawn_ms = None;
        self.particles.clear();
        self.hit_flashes.clear();
        self.next_id = 1;
    }
}
