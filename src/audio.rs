//! Audio policy in front of a pluggable backend
//!
//! The simulation only emits [`SoundCue`]s. [`AudioManager`] decides whether
//! and how loud each one plays, owns the boss theme loop state, and swallows
//! backend failures so audio can never stall a frame.

use crate::AudioError;
use crate::Settings;
use crate::sim::{GameEvent, SoundCue};

/// Something that can actually make noise
pub trait AudioSink {
    /// Fire-and-forget a one-shot cue at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;

    /// Start the looping boss theme
    fn start_theme(&mut self, volume: f32) -> Result<(), AudioError>;

    /// Stop the looping boss theme
    fn stop_theme(&mut self) -> Result<(), AudioError>;
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        log::trace!("sfx {:?} @ {:.2}", cue, volume);
        Ok(())
    }

    fn start_theme(&mut self, volume: f32) -> Result<(), AudioError> {
        log::debug!("boss theme on @ {:.2}", volume);
        Ok(())
    }

    fn stop_theme(&mut self) -> Result<(), AudioError> {
        log::debug!("boss theme off");
        Ok(())
    }
}

/// Relative loudness of each cue before master/sfx scaling
fn cue_gain(cue: SoundCue) -> f32 {
    match cue {
        SoundCue::Shoot => 0.2,
        SoundCue::ShotgunBlast => 0.5,
        SoundCue::Hit => 0.2,
        SoundCue::Explosion => 0.15,
        SoundCue::BossExplosion => 0.9,
        SoundCue::BossHit => 0.2,
        SoundCue::PowerupCollect => 0.7,
        SoundCue::AbilityCast => 0.9,
        SoundCue::BossIntro => 0.7,
        SoundCue::BossThemeStart | SoundCue::BossThemeStop => 0.7,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    enabled: bool,
    theme_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Some(sink),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            enabled: true,
            theme_playing: false,
        }
    }

    /// Manager with no backend; every call is a no-op
    pub fn disabled() -> Self {
        Self {
            sink: None,
            ..Self::new(Box::new(LogAudio))
        }
    }

    /// Build from settings with the given backend
    pub fn from_settings(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.enabled = settings.sound_enabled;
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set boss theme volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn theme_playing(&self) -> bool {
        self.theme_playing
    }

    /// The sound toggle. Turning sound back on mid boss wave restarts the
    /// theme; the simulation is never touched.
    pub fn set_enabled(&mut self, enabled: bool, boss_active: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            if boss_active {
                self.start_theme();
            }
        } else {
            self.stop_theme();
        }
        log::info!("Sound {}", if enabled { "on" } else { "off" });
    }

    fn sfx_volume_for(&self, cue: SoundCue) -> f32 {
        if self.enabled {
            self.master_volume * self.sfx_volume * cue_gain(cue)
        } else {
            0.0
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::BossThemeStart => self.start_theme(),
            SoundCue::BossThemeStop => self.stop_theme(),
            _ => {
                let vol = self.sfx_volume_for(cue);
                if vol <= 0.0 {
                    return;
                }
                let Some(sink) = self.sink.as_mut() else { return };
                if let Err(e) = sink.play(cue, vol) {
                    log::warn!("Dropped {:?}: {}", cue, e);
                }
            }
        }
    }

    /// Play every sound cue in a drained event batch
    pub fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(cue) = event {
                self.play(*cue);
            }
        }
    }

    fn start_theme(&mut self) {
        if !self.enabled || self.theme_playing {
            return;
        }
        let vol = self.master_volume * self.music_volume * cue_gain(SoundCue::BossThemeStart);
        let Some(sink) = self.sink.as_mut() else { return };
        match sink.start_theme(vol) {
            Ok(()) => self.theme_playing = true,
            Err(e) => log::warn!("Boss theme failed to start: {}", e),
        }
    }

    fn stop_theme(&mut self) {
        if !self.theme_playing {
            return;
        }
        self.theme_playing = false;
        let Some(sink) = self.sink.as_mut() else { return };
        if let Err(e) = sink.stop_theme() {
            log::warn!("Boss theme failed to stop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(SoundCue),
        ThemeOn,
        ThemeOff,
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<Call>>>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, _volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Playback("shoot.mp3"));
            }
            self.calls.borrow_mut().push(Call::Play(cue));
            Ok(())
        }

        fn start_theme(&mut self, _volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Unavailable("no device".into()));
            }
            self.calls.borrow_mut().push(Call::ThemeOn);
            Ok(())
        }

        fn stop_theme(&mut self) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(Call::ThemeOff);
            Ok(())
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Vec<Call>>>) {
        let recorder = Recorder::default();
        let calls = recorder.calls.clone();
        (AudioManager::new(Box::new(recorder)), calls)
    }

    #[test]
    fn test_events_route_to_sink() {
        let (mut audio, calls) = manager();
        audio.handle(&[
            GameEvent::Sound(SoundCue::Shoot),
            GameEvent::RoundCleared { round: 1 },
            GameEvent::Sound(SoundCue::BossThemeStart),
            GameEvent::Sound(SoundCue::BossThemeStart),
            GameEvent::Sound(SoundCue::BossThemeStop),
        ]);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Play(SoundCue::Shoot), Call::ThemeOn, Call::ThemeOff]
        );
    }

    #[test]
    fn test_toggle_manages_theme() {
        let (mut audio, calls) = manager();
        audio.play(SoundCue::BossThemeStart);
        audio.set_enabled(false, true);
        assert!(!audio.theme_playing());
        audio.play(SoundCue::Hit);
        audio.play(SoundCue::BossThemeStart);
        audio.set_enabled(true, true);
        assert!(audio.theme_playing());
        assert_eq!(
            *calls.borrow(),
            vec![Call::ThemeOn, Call::ThemeOff, Call::ThemeOn]
        );

        // Re-enabling outside a boss wave stays quiet
        audio.set_enabled(false, false);
        audio.set_enabled(true, false);
        assert!(!audio.theme_playing());
    }

    #[test]
    fn test_zero_volume_skips_backend() {
        let (mut audio, calls) = manager();
        audio.set_sfx_volume(0.0);
        audio.play(SoundCue::Explosion);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_backend_errors_are_swallowed() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(recorder));
        audio.play(SoundCue::Shoot);
        audio.play(SoundCue::BossThemeStart);
        assert!(!audio.theme_playing());
    }

    #[test]
    fn test_settings_respected() {
        let settings = Settings {
            sound_enabled: false,
            ..Settings::default()
        };
        let recorder = Recorder::default();
        let calls = recorder.calls.clone();
        let mut audio = AudioManager::from_settings(&settings, Box::new(recorder));
        assert!(!audio.is_enabled());
        audio.play(SoundCue::PowerupCollect);
        assert!(calls.borrow().is_empty());

        let mut silent = AudioManager::disabled();
        silent.play(SoundCue::Shoot);
        silent.play(SoundCue::BossThemeStart);
        assert!(!silent.theme_playing());
    }
}
