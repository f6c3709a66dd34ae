//! Engine error taxonomy.
//!
//! Every failure is fatal to the single evaluation that raised it. Nothing in
//! the engine retries or substitutes a default for missing data.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The remote service reported the profile as private.
    #[error("Player profile is private. Authenticate and try again.")]
    AuthenticationRequired,

    /// A lookup by key failed (skill, quest, catalog entry, player).
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Input data is structurally wrong (unknown status, malformed segment).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reference data breaks an invariant the engine depends on.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Level lookup outside the experience table.
    #[error("Level {level} is outside the experience table (1..={max})")]
    Range { level: i32, max: i32 },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationRequired,
    NotFound,
    Validation,
    Configuration,
}

impl EngineError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::AuthenticationRequired => ErrorKind::AuthenticationRequired,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Validation(_) | EngineError::Parse { .. } => ErrorKind::Validation,
            EngineError::Configuration(_) | EngineError::Range { .. } | EngineError::Io { .. } => {
                ErrorKind::Configuration
            }
        }
    }
}
