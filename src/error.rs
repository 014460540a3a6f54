//! Application error types.
//!
//! Provides unified error handling with actionable context for the user-facing banner.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// The generation credential is not configured.
    #[error("API key is missing. {hint}")]
    MissingCredential {
        /// Actionable guidance for supplying the key.
        hint: &'static str,
    },

    /// The generation service answered, but not with usable slides.
    #[error("Slide generation failed: {message}")]
    Generation {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create the missing-credential error with the standard hint.
    pub const fn missing_credential() -> Self {
        Self::MissingCredential {
            hint: "Set API_KEY (or GEMINI_API_KEY) in the environment or a .env file",
        }
    }

    /// Create a generation error for a malformed or incomplete payload.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a generation error with HTTP status
    pub fn generation_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The request was rejected - check GEMINI_MODEL"),
            401 | 403 => Some("Check that API_KEY is valid for the Gemini API"),
            404 => Some("The configured model or endpoint was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Generation service error - try again later"),
            _ => None,
        };
        Self::Generation {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// HTTP status carried by a generation error.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Generation { status, .. } => *status,
            _ => None,
        }
    }

    /// Actionable guidance, when the error carries any.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Generation { hint, .. } => *hint,
            Self::MissingCredential { hint } | Self::Config { hint, .. } => Some(*hint),
            _ => None,
        }
    }

    /// Whether this error comes from the generation boundary (network or payload).
    pub const fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Generation { .. } | Self::Network(_))
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
