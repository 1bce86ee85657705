// Library interface for fitplan
// The binary and the integration tests both go through these modules

pub mod activity;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod models;
pub mod persistence;
pub mod report;

// Re-export commonly used types for convenience
pub use activity::{ActivityEvent, ActivityLog, ActivitySink};
pub use config::AppConfig;
pub use error::{EntityKind, ErrorSeverity, FitnessError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, ACTIVITY_TARGET};
pub use manager::{ExerciseUpdate, FitnessManager};
pub use models::{Exercise, TrainingSession};
pub use persistence::{JsonStore, DEFAULT_DATA_FILE};
