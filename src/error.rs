//! Error types for the few fallible boundaries around the simulation
//!
//! The tick itself never fails; these cover UI contract violations and
//! configuration loading.

use thiserror::Error;

/// Errors returned by session-level state machine calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An upgrade was selected while no upgrade offer was open
    #[error("no upgrade selection is pending")]
    NotAwaitingUpgrade,

    /// The selected index does not name one of the offered upgrades
    #[error("invalid upgrade choice {0}; expected 0, 1 or 2")]
    InvalidChoice(usize),
}

/// Errors loading runtime settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by an audio backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The backend refused to start a sound
    #[error("audio backend unavailable: {0}")]
    Unavailable(String),

    /// A named asset could not be decoded or played
    #[error("failed to play '{0}'")]
    Playback(&'static str),
}
