// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use crate::validate_program_active;
use chrono::{DateTime, Utc};
use maeul_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use maeul_domain::{Application, ApplicationStatus, DomainError, ProgramStatus, Selection};

/// Applies a command to the scoped state, producing a new state and an
/// audit event.
///
/// Transitions are pure: the input state is never mutated, and a failed
/// command leaves no trace. Persistence of the result (including the
/// transactional guarantees around multi-row invariants) is the caller's
/// concern.
///
/// # Arguments
///
/// * `state` - The current program-scoped state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command violates a domain rule
///
/// # Errors
///
/// Returns an error if the command violates domain rules; see the
/// individual command documentation for the guards each one enforces.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitApplication {
            applicant_id,
            payload,
            now,
        } => submit_application(state, applicant_id, payload, now, actor, cause),
        Command::UpdateApplication {
            application_id,
            payload,
            status,
            score,
            notes,
            now,
        } => update_application(
            state,
            application_id,
            payload,
            status,
            score,
            notes,
            now,
            actor,
            cause,
        ),
        Command::WithdrawApplication {
            application_id,
            now,
        } => withdraw_application(state, application_id, now, actor, cause),
        Command::ReviewApplication {
            application_id,
            decision,
            notes,
            now,
        } => review_application(state, application_id, decision, notes, now, actor, cause),
        Command::RecordSelection {
            application_id,
            selected,
            reason,
            reviewer_id,
            criteria,
            now,
        } => record_selection(
            state,
            application_id,
            selected,
            reason,
            reviewer_id,
            criteria,
            now,
            actor,
            cause,
        ),
        Command::UpdateSelection {
            selection_id,
            selected,
            reason,
            criteria,
            now,
        } => update_selection(state, selection_id, selected, reason, criteria, now, actor, cause),
        Command::SetPaymentReceived {
            application_id,
            received,
            now,
        } => set_payment_received(state, application_id, received, now, actor, cause),
    }
}

fn make_event(
    actor: Actor,
    cause: Cause,
    name: &str,
    details: Option<String>,
    before: StateSnapshot,
    after: StateSnapshot,
    program_id: Option<i64>,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(name.to_string(), details),
        before,
        after,
        program_id,
    )
}

/// Submits a new application to the scoped program.
///
/// Guards: the program must be active, its status must be `Open`, the
/// current time must fall inside the application window, and the applicant
/// must not already hold an application for this program.
fn submit_application(
    state: &State,
    applicant_id: i64,
    payload: serde_json::Value,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let program_id = state.program.program_id.unwrap_or_default();

    validate_program_active(&state.program)?;

    if state.program.status != ProgramStatus::Open {
        return Err(CoreError::DomainViolation(
            DomainError::ApplicationWindowClosed {
                program_id,
                reason: format!("program status is '{}'", state.program.status),
            },
        ));
    }
    if !state.program.schedule.accepts_applications_at(now) {
        return Err(CoreError::DomainViolation(
            DomainError::ApplicationWindowClosed {
                program_id,
                reason: String::from("the current time is outside the application window"),
            },
        ));
    }
    if state.application_for_applicant(applicant_id).is_some() {
        return Err(CoreError::DomainViolation(
            DomainError::DuplicateApplication {
                program_id,
                applicant_id,
            },
        ));
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    new_state
        .applications
        .push(Application::new(program_id, applicant_id, payload, now));
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "SubmitApplication",
        Some(format!(
            "Applicant {applicant_id} applied to program {program_id}"
        )),
        before,
        after,
        Some(program_id),
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Updates an application's editable fields.
///
/// Who may update, and when, is decided at the API boundary. Here only the
/// lifecycle rule is enforced: an explicit status change must be a valid
/// transition.
#[allow(clippy::too_many_arguments)]
fn update_application(
    state: &State,
    application_id: i64,
    payload: Option<serde_json::Value>,
    status: Option<ApplicationStatus>,
    score: Option<i64>,
    notes: Option<String>,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;
    let current = &state.applications[idx];

    if let Some(new_status) = status
        && new_status != current.status
    {
        current.status.validate_transition(new_status)?;
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let application = &mut new_state.applications[idx];

    if let Some(payload) = payload {
        application.payload = payload;
    }
    if let Some(new_status) = status {
        application.status = new_status;
    }
    if let Some(score) = score {
        application.score = Some(score);
    }
    if let Some(notes) = notes {
        application.notes = Some(notes);
    }
    application.updated_at = now;
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "UpdateApplication",
        Some(format!("Updated application {application_id}")),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Withdraws an application.
///
/// Finalized applications (selected or rejected) cannot be withdrawn.
fn withdraw_application(
    state: &State,
    application_id: i64,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;
    let current = &state.applications[idx];

    if !current.status.can_withdraw() {
        return Err(CoreError::DomainViolation(
            DomainError::WithdrawalNotAllowed {
                application_id,
                status: current.status.as_str().to_string(),
            },
        ));
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let application = &mut new_state.applications[idx];
    application.status = ApplicationStatus::Withdrawn;
    application.updated_at = now;
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "WithdrawApplication",
        Some(format!("Withdrew application {application_id}")),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Records a review decision directly on an application.
///
/// Re-reviewing a finalized application is a conflict.
fn review_application(
    state: &State,
    application_id: i64,
    decision: ApplicationStatus,
    notes: Option<String>,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if !decision.is_terminal() {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidReviewDecision {
                decision: decision.as_str().to_string(),
            },
        ));
    }

    let idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;
    let current = &state.applications[idx];

    if current.status.is_terminal() {
        return Err(CoreError::DomainViolation(
            DomainError::ApplicationAlreadyFinalized {
                application_id,
                status: current.status.as_str().to_string(),
            },
        ));
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let application = &mut new_state.applications[idx];
    application.status = decision;
    if let Some(notes) = notes {
        application.notes = Some(notes);
    }
    application.updated_at = now;
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "ReviewApplication",
        Some(format!(
            "Application {application_id} reviewed as '{decision}'"
        )),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Creates the one-to-one selection record for an application.
///
/// The parent application's status is set to match the decision within the
/// same transition, so the two can never diverge.
#[allow(clippy::too_many_arguments)]
fn record_selection(
    state: &State,
    application_id: i64,
    selected: bool,
    reason: String,
    reviewer_id: i64,
    criteria: serde_json::Value,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;
    let current = &state.applications[idx];

    if state.selection_for_application(application_id).is_some() {
        return Err(CoreError::DomainViolation(DomainError::DuplicateSelection {
            application_id,
        }));
    }
    if current.status.is_terminal() {
        return Err(CoreError::DomainViolation(
            DomainError::ApplicationAlreadyFinalized {
                application_id,
                status: current.status.as_str().to_string(),
            },
        ));
    }

    let selection = Selection::new(application_id, selected, reason, reviewer_id, now, criteria);
    let implied = selection.implied_status();

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let application = &mut new_state.applications[idx];
    application.status = implied;
    application.updated_at = now;
    new_state.selections.push(selection);
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "RecordSelection",
        Some(format!(
            "Application {application_id} decided as '{implied}' by reviewer {reviewer_id}"
        )),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Updates an existing selection record.
///
/// A changed decision re-applies the application status side effect. This
/// is the explicit override path for finalized applications, so the usual
/// terminal-state guard does not apply here.
#[allow(clippy::too_many_arguments)]
fn update_selection(
    state: &State,
    selection_id: i64,
    selected: Option<bool>,
    reason: Option<String>,
    criteria: Option<serde_json::Value>,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let selection_idx = state
        .selections
        .iter()
        .position(|s| s.selection_id == Some(selection_id))
        .ok_or(DomainError::SelectionNotFound(selection_id))?;
    let application_id = state.selections[selection_idx].application_id;
    let application_idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let selection = &mut new_state.selections[selection_idx];

    if let Some(selected) = selected {
        selection.selected = selected;
    }
    if let Some(reason) = reason {
        selection.reason = reason;
    }
    if let Some(criteria) = criteria {
        selection.criteria = criteria;
    }
    selection.reviewed_at = now;
    let implied = selection.implied_status();

    let application = &mut new_state.applications[application_idx];
    application.status = implied;
    application.updated_at = now;
    let after = new_state.to_snapshot();

    let audit_event = make_event(
        actor,
        cause,
        "UpdateSelection",
        Some(format!(
            "Selection {selection_id} updated; application {application_id} is '{implied}'"
        )),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Sets the payment-received flag on a selected application.
///
/// A real flag change adjusts the program's cached revenue by the program
/// fee: credited on receipt, debited (floored at zero) on reversal.
/// Requesting the flag value already held changes nothing.
fn set_payment_received(
    state: &State,
    application_id: i64,
    received: bool,
    now: DateTime<Utc>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let idx = state
        .applications
        .iter()
        .position(|a| a.application_id == Some(application_id))
        .ok_or(DomainError::ApplicationNotFound(application_id))?;
    let current = &state.applications[idx];

    if current.status != ApplicationStatus::Selected {
        return Err(CoreError::DomainViolation(
            DomainError::PaymentRequiresSelection {
                application_id,
                status: current.status.as_str().to_string(),
            },
        ));
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    let unchanged = current.is_payment_received == received;

    if !unchanged {
        let application = &mut new_state.applications[idx];
        application.is_payment_received = received;
        application.payment_received_at = received.then_some(now);
        application.updated_at = now;

        new_state.program.revenue = if received {
            new_state.program.credit_revenue(new_state.program.fee)
        } else {
            new_state.program.debit_revenue(new_state.program.fee)
        };
        new_state.program.updated_at = now;
    }

    let after = new_state.to_snapshot();
    let details = if unchanged {
        format!("Payment flag of application {application_id} already {received}; no change")
    } else {
        format!("Payment flag of application {application_id} set to {received}")
    };

    let audit_event = make_event(
        actor,
        cause,
        "SetPaymentReceived",
        Some(details),
        before,
        after,
        state.program.program_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}
