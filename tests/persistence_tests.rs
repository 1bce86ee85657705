//! File-level tests for saving and loading the fitness manager

use fitplan::persistence::{from_json_str, to_json_string};
use fitplan::{Exercise, FitnessError, FitnessManager, JsonStore};
use proptest::prelude::*;
use tempfile::tempdir;

fn build_plan(exercise_count: usize, session_count: usize) -> FitnessManager {
    let mut sink: Vec<String> = Vec::new();
    let mut manager = FitnessManager::new();

    for i in 0..exercise_count {
        let weight = (i as u32 % 4) * 45;
        manager
            .create_exercise(format!("Exercise {}", i), "Legs", weight, 5 + i as u32, &mut sink)
            .unwrap();
    }
    for s in 0..session_count {
        let session = format!("Day{}", s + 1);
        manager.create_session(session.clone(), &mut sink);
        for i in (0..exercise_count).filter(|i| i % (s + 1) == 0) {
            manager
                .add_exercise_to_session(&session, &format!("Exercise {}", i), 3, &mut sink)
                .unwrap();
        }
    }
    manager
}

#[test]
fn test_file_round_trip_preserves_order_and_contents() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("plan.json"));
    let original = build_plan(6, 3);

    store.write(&original).unwrap();
    let loaded = store.read().unwrap();

    assert_eq!(loaded, original);
    let names: Vec<&str> = loaded.exercises().iter().map(|e| e.name()).collect();
    assert_eq!(names[0], "Exercise 0");
    assert_eq!(names[5], "Exercise 5");
    let sessions: Vec<&str> = loaded.sessions().iter().map(|s| s.name()).collect();
    assert_eq!(sessions, vec!["Day1", "Day2", "Day3"]);
}

#[test]
fn test_loaded_session_entries_match_library_by_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    build_plan(3, 1).save(&path).unwrap();

    let mut manager = FitnessManager::new();
    manager.load(&path).unwrap();

    let day1 = manager.find_session_by_name("Day1").unwrap();
    for exercise in manager.exercises() {
        assert!(day1.contains(exercise));
    }
}

#[test]
fn test_empty_arrays_load_as_empty_manager() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, r#"{"exercises": [], "sessions": []}"#).unwrap();

    let manager = JsonStore::new(&path).read().unwrap();
    assert_eq!(manager.exercise_count(), 0);
    assert_eq!(manager.session_count(), 0);
}

#[test]
fn test_repeated_session_entry_takes_later_sets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repeated.json");
    std::fs::write(
        &path,
        r#"{"exercises": [], "sessions": [{"name": "Leg Day", "exerciseSets": [
            {"name": "Squat", "targetMuscle": "Legs", "weight": 315, "reps": 6, "sets": 3},
            {"name": "Squat", "targetMuscle": "Legs", "weight": 315, "reps": 6, "sets": 5}
        ]}]}"#,
    )
    .unwrap();

    let mut manager = FitnessManager::new();
    manager.load(&path).unwrap();

    let squat = Exercise::new("Squat", "Legs", 315, 6).unwrap();
    let leg_day = manager.find_session_by_name("Leg Day").unwrap();
    assert_eq!(leg_day.len(), 1);
    assert_eq!(leg_day.sets_for(&squat), Some(5));
}

#[test]
fn test_failed_load_keeps_previous_state() {
    let dir = tempdir().unwrap();
    let mut manager = build_plan(2, 1);
    let before = manager.clone();

    let err = manager.load(dir.path().join("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, FitnessError::Io { .. }));
    assert_eq!(manager, before);

    let malformed = dir.path().join("broken.json");
    std::fs::write(&malformed, r#"{"exercises": ["#).unwrap();
    assert!(matches!(manager.load(&malformed), Err(FitnessError::Parse(_))));
    assert_eq!(manager, before);
}

#[test]
fn test_missing_sessions_key_is_parse_error() {
    let err = from_json_str(r#"{"exercises": []}"#).unwrap_err();
    assert!(matches!(err, FitnessError::Parse(_)));
    assert!(err.to_string().contains("sessions"));
}

#[test]
fn test_write_to_invalid_destination_is_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let store = JsonStore::new(blocker.join("plan.json"));
    let err = store.write(&build_plan(1, 1)).unwrap_err();
    assert!(matches!(err, FitnessError::Io { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_read_or_default_starts_empty() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("nested").join("plan.json"));

    assert!(!store.exists());
    assert_eq!(store.read_or_default().unwrap(), FitnessManager::new());

    store.write(&build_plan(1, 0)).unwrap();
    assert!(store.exists());
    assert_eq!(store.read_or_default().unwrap().exercise_count(), 1);
}

proptest! {
    #[test]
    fn test_exercise_fields_survive_round_trip(
        name in "[A-Za-z]{1,8}( [A-Za-z]{1,8})?",
        muscle in "[A-Za-z]{1,10}",
        weight in 0u32..1000u32,
        reps in 1u32..100u32,
        sets in 1u32..20u32,
    ) {
        let mut sink: Vec<String> = Vec::new();
        let mut manager = FitnessManager::new();
        manager.create_exercise(name.clone(), muscle.clone(), weight, reps, &mut sink).unwrap();
        manager.create_session("Day1", &mut sink);
        manager.add_exercise_to_session("Day1", &name, sets, &mut sink).unwrap();

        let json = to_json_string(&manager).unwrap();
        let loaded = from_json_str(&json).unwrap();

        prop_assert_eq!(&loaded, &manager);
        let exercise = &loaded.exercises()[0];
        prop_assert_eq!(exercise.name(), name.as_str());
        prop_assert_eq!(exercise.target_muscle(), muscle.as_str());
        prop_assert_eq!(exercise.weight(), weight);
        prop_assert_eq!(exercise.reps(), reps);
        prop_assert_eq!(loaded.sessions()[0].sets_for(exercise), Some(sets));
    }

    #[test]
    fn test_plan_sizes_survive_round_trip(exercises in 0usize..12, sessions in 0usize..5) {
        let manager = build_plan(exercises, sessions);
        let loaded = from_json_str(&to_json_string(&manager).unwrap()).unwrap();

        prop_assert_eq!(loaded.exercise_count(), exercises);
        prop_assert_eq!(loaded.session_count(), sessions);
        prop_assert_eq!(loaded, manager);
    }
}
