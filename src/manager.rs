//! Aggregate root owning the exercise library and all training sessions
//!
//! All cross-entity rules live here: name lookup, duplicate detection within a
//! session, cascading deletion, and propagation of exercise edits into the
//! sessions that reference the edited exercise. A failed operation reports an
//! error and leaves the manager exactly as it was.

use std::path::Path;

use crate::activity::ActivitySink;
use crate::error::{FitnessError, Result};
use crate::models::{ensure_positive, matches_name, Exercise, TrainingSession};
use crate::persistence;

/// Field changes applied by [`FitnessManager::update_exercise`]
///
/// `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseUpdate {
    pub name: Option<String>,
    pub target_muscle: Option<String>,
    pub weight: Option<u32>,
    pub reps: Option<u32>,
}

impl ExerciseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_muscle.is_none()
            && self.weight.is_none()
            && self.reps.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitnessManager {
    exercises: Vec<Exercise>,
    sessions: Vec<TrainingSession>,
}

impl FitnessManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(exercises: Vec<Exercise>, sessions: Vec<TrainingSession>) -> Self {
        Self {
            exercises,
            sessions,
        }
    }

    /// Exercise library in creation order
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Training sessions in creation order
    pub fn sessions(&self) -> &[TrainingSession] {
        &self.sessions
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Create and store a new exercise; names are not deduplicated
    pub fn create_exercise(
        &mut self,
        name: impl Into<String>,
        target_muscle: impl Into<String>,
        weight: u32,
        reps: u32,
        sink: &mut dyn ActivitySink,
    ) -> Result<&Exercise> {
        let exercise = Exercise::new(name, target_muscle, weight, reps)?;
        tracing::debug!(exercise = %exercise, "Creating exercise");

        sink.record(format!("Created new exercise {}!", exercise.name()));
        self.exercises.push(exercise);
        Ok(&self.exercises[self.exercises.len() - 1])
    }

    /// Create and store a new training session
    pub fn create_session(
        &mut self,
        name: impl Into<String>,
        sink: &mut dyn ActivitySink,
    ) -> &TrainingSession {
        let session = TrainingSession::new(name);
        tracing::debug!(session = session.name(), "Creating training session");

        sink.record(format!("Created new session {}!", session.name()));
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// First exercise whose name matches, ignoring case and surrounding whitespace
    pub fn find_exercise_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| matches_name(e.name(), name))
    }

    /// First session whose name matches, ignoring case and surrounding whitespace
    pub fn find_session_by_name(&self, name: &str) -> Option<&TrainingSession> {
        self.sessions.iter().find(|s| matches_name(s.name(), name))
    }

    /// Add a library exercise to a session with the given set count
    pub fn add_exercise_to_session(
        &mut self,
        session_name: &str,
        exercise_name: &str,
        sets: u32,
        sink: &mut dyn ActivitySink,
    ) -> Result<()> {
        let session_idx = self.resolve_session(session_name)?;
        let exercise_idx = self.resolve_exercise(exercise_name)?;

        let exercise = self.exercises[exercise_idx].clone();
        let session = &mut self.sessions[session_idx];

        if session.contains(&exercise) {
            tracing::warn!(
                exercise = exercise.name(),
                session = session.name(),
                "Exercise already exists in session"
            );
            return Err(FitnessError::DuplicateInSession {
                exercise: exercise.name().to_string(),
                session: session.name().to_string(),
            });
        }

        session.add_exercise(exercise.clone(), sets, sink)?;
        sink.record(format!(
            "Added {} sets of {} to {}!",
            sets,
            exercise.name(),
            session.name()
        ));
        Ok(())
    }

    /// Remove an exercise from one session
    ///
    /// Returns `Ok(false)` without touching anything when the exercise exists
    /// but is not part of the session.
    pub fn remove_exercise_from_session(
        &mut self,
        session_name: &str,
        exercise_name: &str,
        sink: &mut dyn ActivitySink,
    ) -> Result<bool> {
        let session_idx = self.resolve_session(session_name)?;
        let exercise_idx = self.resolve_exercise(exercise_name)?;

        let exercise = &self.exercises[exercise_idx];
        let session = &mut self.sessions[session_idx];

        if !session.contains(exercise) {
            tracing::debug!(
                exercise = exercise.name(),
                session = session.name(),
                "Exercise not present in session"
            );
            return Ok(false);
        }

        session.remove_exercise(exercise, sink);
        sink.record(format!(
            "Removed {} from session {}.",
            exercise.name(),
            session.name()
        ));
        Ok(true)
    }

    /// Delete an exercise from the library and from every session holding it
    pub fn delete_exercise(&mut self, name: &str, sink: &mut dyn ActivitySink) -> Result<Exercise> {
        let index = self.resolve_exercise(name)?;
        let removed = self.exercises.remove(index);

        let mut affected = 0;
        for session in &mut self.sessions {
            if session.contains(&removed) {
                session.remove_exercise(&removed, sink);
                affected += 1;
            }
        }

        tracing::debug!(
            exercise = removed.name(),
            sessions = affected,
            "Deleted exercise"
        );
        sink.record(format!(
            "Deleted exercise {} from library and all sessions!",
            removed.name()
        ));
        Ok(removed)
    }

    /// Remove every exercise from a session
    pub fn clear_session(&mut self, session_name: &str, sink: &mut dyn ActivitySink) -> Result<()> {
        let index = self.resolve_session(session_name)?;
        self.sessions[index].clear_session(sink);
        Ok(())
    }

    pub fn rename_session(
        &mut self,
        session_name: &str,
        new_name: impl Into<String>,
        sink: &mut dyn ActivitySink,
    ) -> Result<()> {
        let index = self.resolve_session(session_name)?;
        self.sessions[index].rename(new_name, sink);
        Ok(())
    }

    /// Edit a library exercise in place
    ///
    /// Sessions holding the old value are re-keyed to the new value with their
    /// set counts intact. If a session already holds the new value, its
    /// existing entry is kept and the stale one is dropped.
    pub fn update_exercise(
        &mut self,
        name: &str,
        update: ExerciseUpdate,
        sink: &mut dyn ActivitySink,
    ) -> Result<&Exercise> {
        let index = self.resolve_exercise(name)?;
        if let Some(reps) = update.reps {
            ensure_positive("reps", reps)?;
        }

        let old = self.exercises[index].clone();
        let exercise = &mut self.exercises[index];
        if let Some(name) = update.name {
            exercise.set_name(name, sink);
        }
        if let Some(target_muscle) = update.target_muscle {
            exercise.set_target_muscle(target_muscle, sink);
        }
        if let Some(weight) = update.weight {
            exercise.set_weight(weight, sink);
        }
        if let Some(reps) = update.reps {
            exercise.set_reps(reps, sink)?;
        }
        let new = exercise.clone();

        if new != old {
            for session in &mut self.sessions {
                let sets_map = session.exercise_sets_mut();
                if let Some(sets) = sets_map.remove(&old) {
                    sets_map.entry(new.clone()).or_insert(sets);
                }
            }
        }

        Ok(&self.exercises[index])
    }

    /// Names of the sessions that contain the named exercise
    pub fn sessions_containing(&self, exercise_name: &str) -> Result<Vec<&str>> {
        let index = self.resolve_exercise(exercise_name)?;
        let exercise = &self.exercises[index];

        Ok(self
            .sessions
            .iter()
            .filter(|s| s.contains(exercise))
            .map(|s| s.name())
            .collect())
    }

    /// Write the whole aggregate to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::write_manager(self, path)
    }

    /// Replace the aggregate with the contents of a JSON file
    ///
    /// On any failure `self` is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = persistence::read_manager(path)?;
        Ok(())
    }

    fn resolve_exercise(&self, name: &str) -> Result<usize> {
        self.exercises
            .iter()
            .position(|e| matches_name(e.name(), name))
            .ok_or_else(|| {
                tracing::warn!(name = name.trim(), "Exercise not found");
                FitnessError::exercise_not_found(name)
            })
    }

    fn resolve_session(&self, name: &str) -> Result<usize> {
        self.sessions
            .iter()
            .position(|s| matches_name(s.name(), name))
            .ok_or_else(|| {
                tracing::warn!(name = name.trim(), "Training session not found");
                FitnessError::session_not_found(name)
            })
    }
}
