//! Plain-text tables for the exercise library and training sessions

use tabled::{settings::Style, Table, Tabled};

use crate::manager::FitnessManager;
use crate::models::{Exercise, TrainingSession};

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Target Muscle")]
    target_muscle: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Reps")]
    reps: u32,
}

#[derive(Tabled)]
struct SessionEntryRow {
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Target Muscle")]
    target_muscle: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Reps")]
    reps: u32,
    #[tabled(rename = "Sets")]
    sets: u32,
}

#[derive(Tabled)]
struct SessionSummaryRow {
    #[tabled(rename = "Session")]
    name: String,
    #[tabled(rename = "Exercises")]
    exercises: usize,
    #[tabled(rename = "Total Sets")]
    total_sets: u32,
}

fn weight_label(exercise: &Exercise) -> String {
    if exercise.is_bodyweight() {
        "bodyweight".to_string()
    } else {
        format!("{} lbs", exercise.weight())
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Table of library exercises in the given order
pub fn exercise_table(exercises: &[Exercise]) -> String {
    render(
        exercises
            .iter()
            .map(|e| ExerciseRow {
                name: e.name().to_string(),
                target_muscle: e.target_muscle().to_string(),
                weight: weight_label(e),
                reps: e.reps(),
            })
            .collect(),
    )
}

/// Table of a session's exercises with their set counts
pub fn session_table(session: &TrainingSession) -> String {
    render(
        session
            .iter()
            .map(|(e, sets)| SessionEntryRow {
                name: e.name().to_string(),
                target_muscle: e.target_muscle().to_string(),
                weight: weight_label(e),
                reps: e.reps(),
                sets,
            })
            .collect(),
    )
}

/// One row per session with exercise and set totals
pub fn session_overview_table(manager: &FitnessManager) -> String {
    render(
        manager
            .sessions()
            .iter()
            .map(|s| SessionSummaryRow {
                name: s.name().to_string(),
                exercises: s.len(),
                total_sets: s.iter().map(|(_, sets)| sets).sum(),
            })
            .collect(),
    )
}
