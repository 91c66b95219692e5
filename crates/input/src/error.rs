use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// The device could not be opened. Non-fatal: the paddle stays neutral.
    #[error("input source {path} unavailable: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("input source read failed: {0}")]
    Read(#[from] io::Error),
    #[error("input source disconnected")]
    Disconnected,
    #[error("failed to start listener thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("invalid input source '{0}' (expected keys, none or evdev:<path>)")]
    InvalidSpec(String),
}
