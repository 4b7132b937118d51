//! Arena Siege - headless native driver
//!
//! Plays seeded runs with the built-in autopilot and logs what happens.
//! Usage: `arena-siege [SETTINGS.json] [--seed N] [--ticks N] [--runs N]`

use arena_siege::Settings;
use arena_siege::audio::{AudioManager, LogAudio};
use arena_siege::sim::{GameEvent, GamePhase, GameState, TickInput, autopilot_input, tick};
use arena_siege::view::{FrameView, HudSink, HudView, RenderSink, present};

/// Ticks between HUD log lines (~5 s of game time)
const HUD_LOG_INTERVAL: u64 = 300;

struct Options {
    settings_path: Option<String>,
    seed: u64,
    max_ticks: u64,
    runs: u32,
}

impl Options {
    fn parse() -> Self {
        let mut options = Self {
            settings_path: None,
            seed: 0x5eed,
            max_ticks: 60 * 60 * 10,
            runs: 1,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => options.seed = seed,
                    None => log::warn!("--seed needs a number"),
                },
                "--ticks" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(ticks) => options.max_ticks = ticks,
                    None => log::warn!("--ticks needs a number"),
                },
                "--runs" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(runs) => options.runs = runs,
                    None => log::warn!("--runs needs a number"),
                },
                other => options.settings_path = Some(other.to_string()),
            }
        }
        options
    }
}

/// Logs a HUD summary line every few seconds
#[derive(Default)]
struct HudLog {
    frames: u64,
}

impl HudSink for HudLog {
    fn update(&mut self, hud: &HudView) {
        self.frames += 1;
        if self.frames % HUD_LOG_INTERVAL != 0 {
            return;
        }
        log::info!(
            "R{} | SCORE: {} | HP {:.0}% ({:?}) | {} ({:.0}%) | energy {:.0}%",
            hud.round,
            hud.score,
            hud.health_percent,
            hud.health_band,
            hud.power_label,
            hud.power_fraction * 100.0,
            hud.energy_fraction * 100.0
        );
    }
}

/// Stand-in renderer that tracks the busiest frame
#[derive(Default)]
struct FrameStats {
    peak_entities: usize,
}

impl RenderSink for FrameStats {
    fn draw(&mut self, frame: &FrameView) {
        let entities = frame.enemies.len() + frame.bosses.len() + frame.bullets.len();
        self.peak_entities = self.peak_entities.max(entities);
    }
}

struct Game {
    state: GameState,
    audio: AudioManager,
    hud: HudLog,
    frames: FrameStats,
}

impl Game {
    fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            state: GameState::with_settings(seed, settings),
            audio: AudioManager::from_settings(settings, Box::new(LogAudio)),
            hud: HudLog::default(),
            frames: FrameStats::default(),
        }
    }

    /// One fixed step: autopilot input, tick, then hand events and views out
    fn update(&mut self) {
        let input: TickInput = autopilot_input(&self.state);
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        self.audio.handle(&events);
        for event in &events {
            if let GameEvent::RoundCleared { round } = event {
                log::info!("Round {} cleared with score {}", round, self.state.score);
            }
        }

        // The autopilot always takes the first card
        if self.state.upgrade_offer().is_some() {
            if let Err(e) = self.state.select_upgrade(0) {
                log::warn!("Upgrade selection failed: {}", e);
            }
        }

        present(&self.state, &mut self.frames, &mut self.hud);
    }

    fn play(&mut self, max_ticks: u64) {
        self.state.start_run();
        for _ in 0..max_ticks {
            self.update();
            if self.state.phase == GamePhase::GameOver {
                break;
            }
        }
        // Flush cues emitted by the final transition
        let events = self.state.drain_events();
        self.audio.handle(&events);
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load_from_path(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arena Siege (headless) starting...");

    let options = Options::parse();
    let settings = load_settings(options.settings_path.as_deref());
    log::info!(
        "Quality {}, arena {}x{}, max {} particles",
        settings.quality.as_str(),
        settings.arena_width,
        settings.arena_height,
        settings.max_particles()
    );

    let mut game = Game::new(options.seed, &settings);
    for run in 1..=options.runs {
        game.play(options.max_ticks);
        let state = &game.state;
        log::info!(
            "Run {}/{}: score {}, reached round {}, {:.1}s simulated, peak {} entities",
            run,
            options.runs,
            state.score,
            state.round.round,
            state.clock_ms as f64 / 1000.0,
            game.frames.peak_entities
        );
    }
}
