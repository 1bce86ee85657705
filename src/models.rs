use std::collections::BTreeMap;
use std::fmt;

use crate::activity::ActivitySink;
use crate::error::{FitnessError, Result};

/// A single movement in the exercise library
///
/// Identity is the value of all four fields: two exercises with the same
/// name, target muscle, weight, and reps are interchangeable, including as
/// keys of a [`TrainingSession`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Exercise {
    /// Exercise name
    name: String,

    /// Main muscle group the exercise targets
    target_muscle: String,

    /// Weight in pounds (0 for bodyweight)
    weight: u32,

    /// Repetitions per set, always positive
    reps: u32,
}

impl Exercise {
    /// Create an exercise, rejecting a zero rep count
    pub fn new(
        name: impl Into<String>,
        target_muscle: impl Into<String>,
        weight: u32,
        reps: u32,
    ) -> Result<Self> {
        ensure_positive("reps", reps)?;

        Ok(Self {
            name: name.into(),
            target_muscle: target_muscle.into(),
            weight,
            reps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_muscle(&self) -> &str {
        &self.target_muscle
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn is_bodyweight(&self) -> bool {
        self.weight == 0
    }

    pub fn set_name(&mut self, name: impl Into<String>, sink: &mut dyn ActivitySink) {
        self.name = name.into();
        sink.record(format!("Changed exercise name to {}!", self.name));
    }

    pub fn set_target_muscle(&mut self, target_muscle: impl Into<String>, sink: &mut dyn ActivitySink) {
        self.target_muscle = target_muscle.into();
        sink.record(format!(
            "Changed exercise target muscle to {}!",
            self.target_muscle
        ));
    }

    pub fn set_weight(&mut self, weight: u32, sink: &mut dyn ActivitySink) {
        self.weight = weight;
        sink.record(format!("Changed exercise weight to {}lbs!", weight));
    }

    pub fn set_reps(&mut self, reps: u32, sink: &mut dyn ActivitySink) -> Result<()> {
        ensure_positive("reps", reps)?;
        self.reps = reps;
        sink.record(format!("Changed exercise reps to {} per set!", reps));
        Ok(())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bodyweight() {
            write!(
                f,
                "{} ({}, bodyweight x {})",
                self.name, self.target_muscle, self.reps
            )
        } else {
            write!(
                f,
                "{} ({}, {}lbs x {})",
                self.name, self.target_muscle, self.weight, self.reps
            )
        }
    }
}

/// A named training session mapping exercises to their set counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSession {
    name: String,
    exercise_sets: BTreeMap<Exercise, u32>,
}

impl TrainingSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercise_sets: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exercises in this session with their set counts
    pub fn exercise_sets(&self) -> &BTreeMap<Exercise, u32> {
        &self.exercise_sets
    }

    pub(crate) fn exercise_sets_mut(&mut self) -> &mut BTreeMap<Exercise, u32> {
        &mut self.exercise_sets
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Exercise, u32)> + '_ {
        self.exercise_sets.iter().map(|(exercise, sets)| (exercise, *sets))
    }

    pub fn sets_for(&self, exercise: &Exercise) -> Option<u32> {
        self.exercise_sets.get(exercise).copied()
    }

    pub fn contains(&self, exercise: &Exercise) -> bool {
        self.exercise_sets.contains_key(exercise)
    }

    pub fn len(&self) -> usize {
        self.exercise_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercise_sets.is_empty()
    }

    /// Add an exercise with a set count
    ///
    /// An exercise already in the session is left untouched and `false` is
    /// returned. The activity is recorded either way.
    pub fn add_exercise(
        &mut self,
        exercise: Exercise,
        sets: u32,
        sink: &mut dyn ActivitySink,
    ) -> Result<bool> {
        ensure_positive("sets", sets)?;

        let description = format!("Added {} to {}!", exercise.name(), self.name);
        let inserted = if self.exercise_sets.contains_key(&exercise) {
            tracing::debug!(
                exercise = exercise.name(),
                session = %self.name,
                "Exercise already in session, keeping existing sets"
            );
            false
        } else {
            self.exercise_sets.insert(exercise, sets);
            true
        };

        sink.record(description);
        Ok(inserted)
    }

    /// Remove an exercise; absent exercises are ignored
    pub fn remove_exercise(&mut self, exercise: &Exercise, sink: &mut dyn ActivitySink) -> bool {
        let removed = self.exercise_sets.remove(exercise).is_some();
        sink.record(format!("Removed {} from {}!", exercise.name(), self.name));
        removed
    }

    pub fn clear_session(&mut self, sink: &mut dyn ActivitySink) {
        self.exercise_sets.clear();
        sink.record(format!("Cleared session {}!", self.name));
    }

    pub fn rename(&mut self, name: impl Into<String>, sink: &mut dyn ActivitySink) {
        let name = name.into();
        sink.record(format!("Renamed session {} to {}!", self.name, name));
        self.name = name;
    }
}

/// Case-insensitive name match against a trimmed query
pub(crate) fn matches_name(candidate: &str, query: &str) -> bool {
    candidate.to_lowercase() == query.trim().to_lowercase()
}

pub(crate) fn ensure_positive(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(FitnessError::InvalidArgument {
            field,
            reason: format!("{} must be greater than zero", field),
        });
    }
    Ok(())
}
