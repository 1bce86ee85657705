//! JSON reader and writer for the fitness manager
//!
//! The document holds two ordered arrays, `exercises` and `sessions`. Session
//! entries embed the full exercise fields plus a `sets` count, so a loaded
//! session holds its own value-equal copies rather than references into the
//! library array.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FitnessError, Result};
use crate::manager::FitnessManager;
use crate::models::{ensure_positive, Exercise, TrainingSession};

/// Default location of the data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "./data/fitness_manager.json";

const INDENT: &[u8] = b"    ";

#[derive(Debug, Serialize, Deserialize)]
struct FitnessDocument {
    exercises: Vec<ExerciseRecord>,
    sessions: Vec<SessionRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseRecord {
    name: String,
    target_muscle: String,
    weight: u32,
    reps: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    name: String,
    exercise_sets: Vec<ExerciseSetRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseSetRecord {
    name: String,
    target_muscle: String,
    weight: u32,
    reps: u32,
    sets: u32,
}

impl From<&Exercise> for ExerciseRecord {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name().to_string(),
            target_muscle: exercise.target_muscle().to_string(),
            weight: exercise.weight(),
            reps: exercise.reps(),
        }
    }
}

impl From<&TrainingSession> for SessionRecord {
    fn from(session: &TrainingSession) -> Self {
        Self {
            name: session.name().to_string(),
            exercise_sets: session
                .iter()
                .map(|(exercise, sets)| ExerciseSetRecord {
                    name: exercise.name().to_string(),
                    target_muscle: exercise.target_muscle().to_string(),
                    weight: exercise.weight(),
                    reps: exercise.reps(),
                    sets,
                })
                .collect(),
        }
    }
}

impl From<&FitnessManager> for FitnessDocument {
    fn from(manager: &FitnessManager) -> Self {
        Self {
            exercises: manager.exercises().iter().map(ExerciseRecord::from).collect(),
            sessions: manager.sessions().iter().map(SessionRecord::from).collect(),
        }
    }
}

impl FitnessDocument {
    fn into_manager(self) -> Result<FitnessManager> {
        let mut exercises = Vec::with_capacity(self.exercises.len());
        for (i, record) in self.exercises.into_iter().enumerate() {
            let exercise = Exercise::new(record.name, record.target_muscle, record.weight, record.reps)
                .map_err(|e| invalid_record(format!("exercises[{}]", i), e))?;
            exercises.push(exercise);
        }

        let mut sessions = Vec::with_capacity(self.sessions.len());
        for (i, record) in self.sessions.into_iter().enumerate() {
            let mut session = TrainingSession::new(record.name);
            for (j, entry) in record.exercise_sets.into_iter().enumerate() {
                let location = format!("sessions[{}].exerciseSets[{}]", i, j);
                ensure_positive("sets", entry.sets).map_err(|e| invalid_record(location.clone(), e))?;
                let exercise = Exercise::new(entry.name, entry.target_muscle, entry.weight, entry.reps)
                    .map_err(|e| invalid_record(location, e))?;

                // A repeated exercise takes the later set count
                session.exercise_sets_mut().insert(exercise, entry.sets);
            }
            sessions.push(session);
        }

        Ok(FitnessManager::from_parts(exercises, sessions))
    }
}

fn invalid_record(location: String, err: FitnessError) -> FitnessError {
    FitnessError::InvalidRecord {
        reason: format!("{}: {}", location, err),
    }
}

/// Render the manager as a JSON document
pub fn to_json_string(manager: &FitnessManager) -> Result<String> {
    let document = FitnessDocument::from(manager);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parse a JSON document into a new manager
pub fn from_json_str(json: &str) -> Result<FitnessManager> {
    let document: FitnessDocument = serde_json::from_str(json)?;
    document.into_manager()
}

/// Write the manager to a JSON file, creating parent directories as needed
///
/// The document is written to a sibling `.tmp` file first and renamed over
/// `path`, so a failed save leaves any previous file intact.
pub fn write_manager<P: AsRef<Path>>(manager: &FitnessManager, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_string(manager)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FitnessError::io(parent, e))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, json)
        .and_then(|()| fs::rename(&staging, path))
        .map_err(|e| {
            let _ = fs::remove_file(&staging);
            tracing::error!(path = %path.display(), error = %e, "Failed to save fitness data");
            FitnessError::io(path, e)
        })?;

    tracing::info!(
        path = %path.display(),
        exercises = manager.exercise_count(),
        sessions = manager.session_count(),
        "Saved fitness data"
    );
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

/// Read a manager from a JSON file
pub fn read_manager<P: AsRef<Path>>(path: P) -> Result<FitnessManager> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FitnessError::io(path, e))?;

    let manager = from_json_str(&content).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse fitness data");
        e
    })?;

    tracing::info!(
        path = %path.display(),
        exercises = manager.exercise_count(),
        sessions = manager.session_count(),
        "Loaded fitness data"
    );
    Ok(manager)
}

/// A data file location that can be read from and written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read(&self) -> Result<FitnessManager> {
        read_manager(&self.path)
    }

    /// Read the file, or start empty when it does not exist yet
    pub fn read_or_default(&self) -> Result<FitnessManager> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "No data file yet, starting empty");
            return Ok(FitnessManager::new());
        }
        self.read()
    }

    pub fn write(&self, manager: &FitnessManager) -> Result<()> {
        write_manager(manager, &self.path)
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
