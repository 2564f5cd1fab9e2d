// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{NewSelection, SelectionChanges};
use crate::error::PersistenceError;
use crate::tests::{create_test_persistence, seed_application, seed_program, utc};
use maeul_domain::{ApplicationStatus, Selection};

fn test_selection(application_id: i64, selected: bool) -> NewSelection {
    NewSelection::from_domain(&Selection::new(
        application_id,
        selected,
        String::from("Strong motivation"),
        7,
        utc(2025, 2, 2, 10),
        serde_json::json!({"score": 92}),
    ))
}

#[test]
fn test_record_selection_updates_application_status() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);

    let selection_id = persistence
        .record_selection(
            &test_selection(application_id, true),
            "selected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    let selection = persistence.get_selection(selection_id).unwrap();
    assert!(selection.selected);
    assert_eq!(selection.application_id, application_id);

    let application = persistence.get_application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Selected);
}

#[test]
fn test_second_selection_rolls_back_cleanly() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);

    persistence
        .record_selection(
            &test_selection(application_id, true),
            "selected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    let result = persistence.record_selection(
        &test_selection(application_id, false),
        "rejected",
        &utc(2025, 2, 3, 10).to_rfc3339(),
    );

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));

    // The failed transaction must not have flipped the application status.
    let application = persistence.get_application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Selected);
    let selections = persistence.list_selections_for_program(program_id).unwrap();
    assert_eq!(selections.len(), 1);
}

#[test]
fn test_selection_for_application_lookup() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);

    assert!(
        persistence
            .selection_for_application(application_id)
            .unwrap()
            .is_none()
    );

    persistence
        .record_selection(
            &test_selection(application_id, false),
            "rejected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    let selection = persistence
        .selection_for_application(application_id)
        .unwrap()
        .unwrap();
    assert!(!selection.selected);
}

#[test]
fn test_update_selection_reapplies_status_side_effect() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    let selection_id = persistence
        .record_selection(
            &test_selection(application_id, true),
            "selected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    let changes = SelectionChanges {
        selected: Some(false),
        reason: Some(String::from("Withdrew funding")),
        reviewed_at: Some(utc(2025, 2, 5, 10).to_rfc3339()),
        ..SelectionChanges::default()
    };
    persistence
        .update_selection(
            selection_id,
            &changes,
            application_id,
            "rejected",
            &utc(2025, 2, 5, 10).to_rfc3339(),
        )
        .unwrap();

    let selection = persistence.get_selection(selection_id).unwrap();
    assert!(!selection.selected);
    assert_eq!(selection.reason, "Withdrew funding");

    let application = persistence.get_application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Rejected);
}

#[test]
fn test_selection_coherence_after_writes() {
    // Selection.selected and Application.status must match after every
    // write path.
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    let selection_id = persistence
        .record_selection(
            &test_selection(application_id, true),
            "selected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    for (flip, status) in [(false, "rejected"), (true, "selected")] {
        let changes = SelectionChanges {
            selected: Some(flip),
            ..SelectionChanges::default()
        };
        persistence
            .update_selection(
                selection_id,
                &changes,
                application_id,
                status,
                &utc(2025, 2, 6, 10).to_rfc3339(),
            )
            .unwrap();

        let selection = persistence.get_selection(selection_id).unwrap();
        let application = persistence.get_application(application_id).unwrap();
        assert_eq!(
            application.status,
            selection.implied_status(),
            "status diverged from selection"
        );
    }
}

#[test]
fn test_state_load_includes_selections() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    persistence
        .record_selection(
            &test_selection(application_id, true),
            "selected",
            &utc(2025, 2, 2, 10).to_rfc3339(),
        )
        .unwrap();

    let state = persistence.load_program_state(program_id).unwrap();

    assert_eq!(state.selections.len(), 1);
    assert_eq!(state.selections[0].application_id, application_id);
}
