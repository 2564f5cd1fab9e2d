// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for withdrawal, selection records, and the payment ledger.

use crate::tests::helpers::{
    applicant_actor, staff_actor, state_with_application, test_cause, utc,
};
use crate::{Command, CoreError, apply};
use maeul_domain::{ApplicationStatus, DomainError};

fn record_selection_command(selected: bool) -> Command {
    Command::RecordSelection {
        application_id: 100,
        selected,
        reason: String::from("Capacity decision"),
        reviewer_id: 7,
        criteria: serde_json::json!({"score": 92}),
        now: utc(2025, 2, 2, 10),
    }
}

#[test]
fn test_withdraw_from_submitted() {
    let state = state_with_application(ApplicationStatus::Submitted);

    let result = apply(
        &state,
        Command::WithdrawApplication {
            application_id: 100,
            now: utc(2025, 1, 20, 9),
        },
        applicant_actor(),
        test_cause(),
    );

    let new_state = result.unwrap().new_state;
    assert_eq!(
        new_state.application(100).unwrap().status,
        ApplicationStatus::Withdrawn
    );
}

#[test]
fn test_withdraw_from_under_review() {
    let state = state_with_application(ApplicationStatus::UnderReview);

    let result = apply(
        &state,
        Command::WithdrawApplication {
            application_id: 100,
            now: utc(2025, 1, 25, 9),
        },
        applicant_actor(),
        test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_withdraw_of_finalized_application_is_blocked() {
    for terminal in [ApplicationStatus::Selected, ApplicationStatus::Rejected] {
        let state = state_with_application(terminal);

        let result = apply(
            &state,
            Command::WithdrawApplication {
                application_id: 100,
                now: utc(2025, 2, 3, 9),
            },
            applicant_actor(),
            test_cause(),
        );

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::WithdrawalNotAllowed { .. }
            ))
        ));
    }
}

#[test]
fn test_selection_sets_application_status() {
    let state = state_with_application(ApplicationStatus::UnderReview);

    let transition = apply(&state, record_selection_command(true), staff_actor(), test_cause())
        .unwrap();

    let new_state = transition.new_state;
    assert_eq!(new_state.selections.len(), 1);
    assert!(new_state.selections[0].selected);
    assert_eq!(
        new_state.application(100).unwrap().status,
        ApplicationStatus::Selected
    );
    assert_eq!(transition.audit_event.action.name, "RecordSelection");
}

#[test]
fn test_rejecting_selection_sets_rejected_status() {
    let state = state_with_application(ApplicationStatus::Submitted);

    let new_state = apply(&state, record_selection_command(false), staff_actor(), test_cause())
        .unwrap()
        .new_state;

    assert_eq!(
        new_state.application(100).unwrap().status,
        ApplicationStatus::Rejected
    );
    assert!(!new_state.selections[0].selected);
}

#[test]
fn test_second_selection_for_application_conflicts() {
    let state = state_with_application(ApplicationStatus::UnderReview);
    let mut state = apply(&state, record_selection_command(true), staff_actor(), test_cause())
        .unwrap()
        .new_state;
    state.selections[0].selection_id = Some(500);

    let result = apply(&state, record_selection_command(false), staff_actor(), test_cause());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DuplicateSelection {
                application_id: 100
            }
        ))
    ));
}

#[test]
fn test_selection_after_direct_review_conflicts() {
    // Review finalized the application without a selection row; a selection
    // create must not silently shadow that decision.
    let state = state_with_application(ApplicationStatus::Selected);

    let result = apply(&state, record_selection_command(false), staff_actor(), test_cause());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ApplicationAlreadyFinalized { .. }
        ))
    ));
}

#[test]
fn test_selection_update_flips_application_status() {
    let state = state_with_application(ApplicationStatus::UnderReview);
    let mut state = apply(&state, record_selection_command(true), staff_actor(), test_cause())
        .unwrap()
        .new_state;
    state.selections[0].selection_id = Some(500);

    let transition = apply(
        &state,
        Command::UpdateSelection {
            selection_id: 500,
            selected: Some(false),
            reason: Some(String::from("Withdrew funding")),
            criteria: None,
            now: utc(2025, 2, 5, 10),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap();

    let new_state = transition.new_state;
    assert!(!new_state.selections[0].selected);
    assert_eq!(new_state.selections[0].reason, "Withdrew funding");
    assert_eq!(
        new_state.application(100).unwrap().status,
        ApplicationStatus::Rejected
    );
}

#[test]
fn test_selection_update_of_missing_selection_fails() {
    let state = state_with_application(ApplicationStatus::UnderReview);

    let result = apply(
        &state,
        Command::UpdateSelection {
            selection_id: 999,
            selected: Some(false),
            reason: None,
            criteria: None,
            now: utc(2025, 2, 5, 10),
        },
        staff_actor(),
        test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::SelectionNotFound(999)
        ))
    ));
}

#[test]
fn test_selection_and_status_never_diverge() {
    let state = state_with_application(ApplicationStatus::UnderReview);
    let mut state = apply(&state, record_selection_command(true), staff_actor(), test_cause())
        .unwrap()
        .new_state;
    state.selections[0].selection_id = Some(500);

    for flip in [false, true, false] {
        state = apply(
            &state,
            Command::UpdateSelection {
                selection_id: 500,
                selected: Some(flip),
                reason: None,
                criteria: None,
                now: utc(2025, 2, 6, 10),
            },
            staff_actor(),
            test_cause(),
        )
        .unwrap()
        .new_state;

        let selection = &state.selections[0];
        let application = state.application(100).unwrap();
        assert_eq!(application.status, selection.implied_status());
    }
}

#[test]
fn test_payment_received_credits_revenue() {
    let state = state_with_application(ApplicationStatus::Selected);

    let new_state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: true,
            now: utc(2025, 2, 3, 14),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    assert_eq!(new_state.program.revenue, 50_000);
    let application = new_state.application(100).unwrap();
    assert!(application.is_payment_received);
    assert_eq!(application.payment_received_at, Some(utc(2025, 2, 3, 14)));
}

#[test]
fn test_payment_reversal_debits_revenue_and_clears_stamp() {
    let state = state_with_application(ApplicationStatus::Selected);
    let state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: true,
            now: utc(2025, 2, 3, 14),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    let new_state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: false,
            now: utc(2025, 2, 4, 9),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    assert_eq!(new_state.program.revenue, 0);
    let application = new_state.application(100).unwrap();
    assert!(!application.is_payment_received);
    assert_eq!(application.payment_received_at, None);
}

#[test]
fn test_payment_on_unselected_application_fails() {
    for status in [
        ApplicationStatus::Submitted,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ] {
        let state = state_with_application(status);

        let result = apply(
            &state,
            Command::SetPaymentReceived {
                application_id: 100,
                received: true,
                now: utc(2025, 2, 3, 14),
            },
            staff_actor(),
            test_cause(),
        );

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::PaymentRequiresSelection { .. }
            ))
        ));
    }
}

#[test]
fn test_repeated_payment_request_does_not_double_count() {
    let state = state_with_application(ApplicationStatus::Selected);
    let state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: true,
            now: utc(2025, 2, 3, 14),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    let new_state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: true,
            now: utc(2025, 2, 5, 14),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    assert_eq!(new_state.program.revenue, 50_000);
    // The original receipt timestamp is preserved on a no-op request.
    assert_eq!(
        new_state.application(100).unwrap().payment_received_at,
        Some(utc(2025, 2, 3, 14))
    );
}

#[test]
fn test_revenue_floor_when_fee_changed_between_toggles() {
    let state = state_with_application(ApplicationStatus::Selected);
    let mut state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: true,
            now: utc(2025, 2, 3, 14),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    // The fee was edited upward after the payment was recorded; the
    // reversal must not drive revenue negative.
    state.program.fee = 80_000;

    let new_state = apply(
        &state,
        Command::SetPaymentReceived {
            application_id: 100,
            received: false,
            now: utc(2025, 2, 4, 9),
        },
        staff_actor(),
        test_cause(),
    )
    .unwrap()
    .new_state;

    assert_eq!(new_state.program.revenue, 0);
}
