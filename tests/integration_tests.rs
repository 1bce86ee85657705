use fitplan::{ActivityLog, EntityKind, Exercise, FitnessError, FitnessManager, TrainingSession};

/// Integration tests that exercise complete planning workflows

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn create_two_exercise_plan(log: &mut ActivityLog) -> FitnessManager {
        let mut manager = FitnessManager::new();
        manager.create_exercise("Squat", "Legs", 315, 6, log).unwrap();
        manager.create_exercise("Bench", "Chest", 185, 8, log).unwrap();
        manager.create_session("Day1", log);
        manager
    }

    /// Adding, then failing to add a missing or duplicate exercise
    #[test]
    fn test_day_one_scenario() {
        let mut log = ActivityLog::new();
        let mut manager = create_two_exercise_plan(&mut log);

        manager.add_exercise_to_session("Day1", "Squat", 3, &mut log).unwrap();

        let err = manager.add_exercise_to_session("Day1", "Missing", 2, &mut log).unwrap_err();
        assert!(matches!(
            err,
            FitnessError::NotFound { kind: EntityKind::Exercise, ref name } if name == "Missing"
        ));
        assert_eq!(manager.find_session_by_name("Day1").unwrap().len(), 1);

        let err = manager.add_exercise_to_session("Day1", "Squat", 5, &mut log).unwrap_err();
        assert!(matches!(err, FitnessError::DuplicateInSession { .. }));

        let squat = manager.find_exercise_by_name("Squat").unwrap();
        let day1 = manager.find_session_by_name("Day1").unwrap();
        assert_eq!(day1.sets_for(squat), Some(3));
    }

    /// A value-equal exercise built outside the manager is the same map key
    #[test]
    fn test_value_equal_exercise_is_same_key() {
        let mut log = ActivityLog::new();
        let mut manager = create_two_exercise_plan(&mut log);
        manager.add_exercise_to_session("Day1", "Squat", 3, &mut log).unwrap();

        let copy = Exercise::new("Squat", "Legs", 315, 6).unwrap();
        let day1 = manager.find_session_by_name("Day1").unwrap();
        assert!(day1.contains(&copy));

        let mut session = day1.clone();
        assert!(!session.add_exercise(copy.clone(), 9, &mut log).unwrap());
        assert_eq!(session.sets_for(&copy), Some(3));
    }

    /// Deleting an exercise removes it from the library and every session
    #[test]
    fn test_cascading_delete_across_sessions() {
        let mut log = ActivityLog::new();
        let mut manager = create_two_exercise_plan(&mut log);
        manager.create_session("Day2", &mut log);
        manager.add_exercise_to_session("Day1", "Squat", 3, &mut log).unwrap();
        manager.add_exercise_to_session("Day2", "Squat", 4, &mut log).unwrap();
        manager.add_exercise_to_session("Day2", "Bench", 5, &mut log).unwrap();

        let squat = manager.delete_exercise("Squat", &mut log).unwrap();

        assert_eq!(manager.exercise_count(), 1);
        assert!(manager.sessions().iter().all(|s: &TrainingSession| !s.contains(&squat)));
        assert!(manager.find_session_by_name("Day1").unwrap().is_empty());
        assert_eq!(manager.find_session_by_name("Day2").unwrap().len(), 1);

        assert!(manager.delete_exercise("Squat", &mut log).unwrap_err().is_not_found());
    }

    /// Every successful mutation leaves a trace in the activity log, in order
    #[test]
    fn test_activity_log_records_workflow() {
        let mut log = ActivityLog::new();
        let mut manager = create_two_exercise_plan(&mut log);
        manager.add_exercise_to_session("Day1", "Bench", 4, &mut log).unwrap();
        manager.clear_session("Day1", &mut log).unwrap();

        assert_eq!(
            log.descriptions(),
            vec![
                "Created new exercise Squat!",
                "Created new exercise Bench!",
                "Created new session Day1!",
                "Added Bench to Day1!",
                "Added 4 sets of Bench to Day1!",
                "Cleared session Day1!",
            ]
        );
        assert!(log.iter().all(|event| event.to_string().ends_with(&event.description)));
    }

    /// Failed operations leave the manager identical to before
    #[test]
    fn test_failures_leave_manager_unchanged() {
        let mut log = ActivityLog::new();
        let mut manager = create_two_exercise_plan(&mut log);
        manager.add_exercise_to_session("Day1", "Squat", 3, &mut log).unwrap();
        let snapshot = manager.clone();
        let logged = log.len();

        assert!(manager.add_exercise_to_session("Nope", "Squat", 3, &mut log).is_err());
        assert!(manager.remove_exercise_from_session("Day1", "Nope", &mut log).is_err());
        assert!(manager.delete_exercise("Nope", &mut log).is_err());
        assert!(manager.clear_session("Nope", &mut log).is_err());
        assert!(manager.create_exercise("Plank", "Core", 0, 0, &mut log).is_err());

        assert_eq!(manager, snapshot);
        assert_eq!(log.len(), logged);
    }
}
