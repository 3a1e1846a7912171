use thiserror::Error;

/// Custom error type for mediamuse operations.
#[derive(Debug, Error)]
pub enum MuseError {
    /// Network/HTTP failure talking to the model endpoint or library server.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The model never produced output that passed schema validation.
    ///
    /// Carries the last raw completion text and the last failure reason
    /// so callers can log a useful diagnostic.
    #[error("model output failed schema validation after {attempts} attempt(s): {reason}")]
    ValidationExhausted {
        attempts: u32,
        reason: String,
        raw: String,
    },

    /// Configuration loading or parsing failed.
    #[error("Config error: {0}")]
    Config(String),

    /// Library server returned something we could not interpret.
    #[error("Library error: {0}")]
    Library(String),

    /// JSON (de)serialization failed outside the validation path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for MuseError {
    fn from(err: reqwest::Error) -> Self {
        MuseError::Transport(err.to_string())
    }
}

impl MuseError {
    /// True for the error swallowed by batch-facing entry points.
    pub fn is_validation_exhausted(&self) -> bool {
        matches!(self, MuseError::ValidationExhausted { .. })
    }
}
