//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// `Planning Center` API error with status context
    #[error("Planning Center API error: {message}")]
    PlanningCenter {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response body or input parsing error
    #[error("Parse error: {message}")]
    Parse {
        /// Where the malformed data came from (request path, file), if known.
        origin: Option<String>,
        /// Description of the parse failure.
        message: String,
    },

    /// A required resource does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A date field could not be read as a calendar date
    #[error("Invalid date {value:?}: {reason}")]
    DateParse {
        /// The text that failed to parse.
        value: String,
        /// Why the text was rejected.
        reason: String,
    },

    /// MIDI sequence could not be built or encoded
    #[error("MIDI error: {0}")]
    Midi(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a `Planning Center` error with HTTP status
    pub fn pco_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check PCO_APP_ID and PCO_SECRET environment variables"),
            403 => Some("Your API credentials may lack required permissions"),
            404 => Some("The requested resource was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Planning Center server error - try again later"),
            _ => None,
        };
        Self::PlanningCenter {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with origin context
    pub fn parse(message: impl Into<String>, origin: impl Into<Option<String>>) -> Self {
        Self::Parse { origin: origin.into(), message: message.into() }
    }

    /// Create a not-found error for the named resource
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a date parse error keeping the offending text
    pub fn date_parse(value: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::DateParse { value: value.into(), reason: reason.to_string() }
    }

    /// The actionable hint attached to this error, if any
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PlanningCenter { hint, .. } => *hint,
            Self::Config { hint, .. } => Some(*hint),
            _ => None,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
