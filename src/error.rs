//! Unified error hierarchy for fitplan
//!
//! Every fallible core operation returns [`FitnessError`]. Lookup and duplicate
//! failures are recoverable and never leave the manager half-mutated; I/O and
//! parse failures come from the persistence layer and leave in-memory state
//! untouched.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all fitplan operations
#[derive(Debug, Error)]
pub enum FitnessError {
    /// A name lookup for an exercise or session failed
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// The exercise is already part of the target session
    #[error("{exercise} already exists in session {session}")]
    DuplicateInSession { exercise: String, session: String },

    /// A numeric argument is out of range
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// File could not be opened, created, or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not well-formed or is missing a required key
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document is well-formed but holds an out-of-range value
    #[error("Invalid record: {reason}")]
    InvalidRecord { reason: String },
}

/// Which kind of entity a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Exercise,
    Session,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Exercise => write!(f, "Exercise"),
            EntityKind::Session => write!(f, "Training session"),
        }
    }
}

/// Result type alias for fitplan operations
pub type Result<T> = std::result::Result<T, FitnessError>;

impl FitnessError {
    pub fn exercise_not_found(name: &str) -> Self {
        FitnessError::NotFound {
            kind: EntityKind::Exercise,
            name: name.trim().to_string(),
        }
    }

    pub fn session_not_found(name: &str) -> Self {
        FitnessError::NotFound {
            kind: EntityKind::Session,
            name: name.trim().to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FitnessError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the error is a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, FitnessError::NotFound { .. })
    }

    /// Check if the caller can simply correct its input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FitnessError::NotFound { .. }
                | FitnessError::DuplicateInSession { .. }
                | FitnessError::InvalidArgument { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FitnessError::NotFound { .. } => ErrorSeverity::Warning,
            FitnessError::DuplicateInSession { .. } => ErrorSeverity::Warning,
            FitnessError::InvalidArgument { .. } => ErrorSeverity::Warning,
            FitnessError::Io { .. } => ErrorSeverity::Error,
            FitnessError::Parse(_) | FitnessError::InvalidRecord { .. } => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FitnessError::NotFound { kind, name } => {
                format!("{} '{}' does not exist. Check the spelling and try again.", kind, name)
            }
            FitnessError::DuplicateInSession { exercise, session } => {
                format!("{} is already part of {}.", exercise, session)
            }
            FitnessError::Io { path, .. } => {
                format!("Unable to access data file: {}", path.display())
            }
            FitnessError::Parse(e) => format!("Data file is malformed: {}", e),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Operation failed and the data file may need attention
    Error,
    /// Operation was rejected but nothing changed
    Warning,
}
