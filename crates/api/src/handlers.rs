// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers compose the layers: authorize, load the program-scoped state,
//! run the pure core transition, persist the outcome through the
//! transactional adapter, record the audit event, and translate every
//! error at the boundary.
//!
//! All handlers take the request instant as an argument so the guards and
//! timestamps are deterministic under test; the server passes `Utc::now()`.

use chrono::{DateTime, Utc};
use maeul_audit::Cause;
use maeul_core::{Command, State, apply};
use maeul_domain::{
    ApplicationStatus, Program, ProgramSchedule, ProgramStatus, calculate_program_status,
    validate_program_fields, validate_review_decision,
};
use maeul_persistence::{
    ApplicationChanges, NewApplication, NewProgram, NewSelection, Persistence, PersistenceError,
    ProgramChanges, SelectionChanges,
};
use std::str::FromStr;

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApplicationInfo, CreateProgramRequest, CreateSelectionRequest, ListApplicationsResponse,
    ListProgramsResponse, PaymentRequest, PaymentResponse, ProgramInfo, ReviewRequest,
    SelectionInfo, SubmitApplicationRequest, UpdateApplicationRequest, UpdateProgramRequest,
    UpdateSelectionRequest,
};
use crate::status_sync::sync_program_status;

/// Parses an RFC 3339 timestamp from a request field.
fn parse_rfc3339(field: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Failed to parse date '{value}': {e}"),
        })
}

fn parse_optional_rfc3339(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    value.map(|v| parse_rfc3339(field, v)).transpose()
}

/// Loads a program, mapping a missing row to a program not-found error.
fn load_program(persistence: &mut Persistence, program_id: i64) -> Result<Program, ApiError> {
    persistence.get_program(program_id).map_err(|e| match e {
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {program_id} does not exist"),
        },
        other => translate_persistence_error(other),
    })
}

/// Loads the program-scoped state the core engine operates on.
fn load_state(persistence: &mut Persistence, program_id: i64) -> Result<State, ApiError> {
    persistence
        .load_program_state(program_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Program"),
                message: format!("Program {program_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })
}

/// Loads an application, mapping a missing row to a not-found error.
fn load_application(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<maeul_domain::Application, ApiError> {
    persistence
        .get_application(application_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Application"),
                message: format!("Application {application_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })
}

/// Persists an audit event, translating failures.
fn persist_audit(
    persistence: &mut Persistence,
    event: &maeul_audit::AuditEvent,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    persistence
        .persist_audit_event(event, now)
        .map(|_| ())
        .map_err(translate_persistence_error)
}

// ============================================================================
// Programs
// ============================================================================

/// Creates a new program.
///
/// This function:
/// - Verifies the actor has organizer authority
/// - Validates the date ordering and field constraints
/// - Derives the initial status from the dates
/// - Persists the program and an audit event
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - A date field is malformed or out of order
/// - A field constraint is violated
pub fn create_program(
    persistence: &mut Persistence,
    request: CreateProgramRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ProgramInfo, ApiError> {
    AuthorizationService::authorize_create_program(actor)?;

    let schedule = ProgramSchedule::new(
        parse_rfc3339("apply_start", &request.apply_start)?,
        parse_rfc3339("apply_end", &request.apply_end)?,
        parse_optional_rfc3339("program_start", request.program_start.as_deref())?,
        parse_optional_rfc3339("program_end", request.program_end.as_deref())?,
    )
    .map_err(translate_domain_error)?;

    let mut program = Program::new(
        request.title,
        request.description,
        request.summary,
        actor.id,
        schedule,
        request.max_participants,
        request.fee,
        request.application_form,
        now,
    );
    validate_program_fields(&program).map_err(translate_domain_error)?;
    program.status = calculate_program_status(&program.schedule, program.status, now);

    let program_id = persistence
        .insert_program(&NewProgram::from_domain(&program))
        .map_err(translate_persistence_error)?;
    program.program_id = Some(program_id);

    let event = maeul_audit::AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        maeul_audit::Action::new(
            String::from("CreateProgram"),
            Some(format!("Created program '{}'", program.title)),
        ),
        maeul_audit::StateSnapshot::new(String::from("program=none")),
        maeul_audit::StateSnapshot::new(format!(
            "program={program_id},status={}",
            program.status
        )),
        Some(program_id),
    );
    persist_audit(persistence, &event, now)?;

    Ok(ProgramInfo::from_domain(&program))
}

/// Updates a program's editable fields.
///
/// Manually setting the status to `archived` is sticky: the synchronizer
/// will never recompute past it.
///
/// # Errors
///
/// Returns an error if the actor may not manage this program, the program
/// is missing, or a field is invalid.
#[allow(clippy::too_many_lines)]
pub fn update_program(
    persistence: &mut Persistence,
    program_id: i64,
    request: UpdateProgramRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ProgramInfo, ApiError> {
    let mut program = load_program(persistence, program_id)?;
    AuthorizationService::authorize_manage_program(actor, program.organizer_id)?;

    // Rebuild the schedule with any replaced dates so ordering is
    // re-validated as a whole.
    let schedule = ProgramSchedule::new(
        match request.apply_start.as_deref() {
            Some(v) => parse_rfc3339("apply_start", v)?,
            None => program.schedule.apply_start,
        },
        match request.apply_end.as_deref() {
            Some(v) => parse_rfc3339("apply_end", v)?,
            None => program.schedule.apply_end,
        },
        match &request.program_start {
            Some(v) => parse_optional_rfc3339("program_start", v.as_deref())?,
            None => program.schedule.program_start,
        },
        match &request.program_end {
            Some(v) => parse_optional_rfc3339("program_end", v.as_deref())?,
            None => program.schedule.program_end,
        },
    )
    .map_err(translate_domain_error)?;

    let status = match request.status.as_deref() {
        Some(s) => ProgramStatus::normalize(s).map_err(translate_domain_error)?,
        None => program.status,
    };

    program.schedule = schedule;
    program.status = status;
    if let Some(title) = &request.title {
        program.title.clone_from(title);
    }
    if let Some(description) = &request.description {
        program.description.clone_from(description);
    }
    if let Some(summary) = &request.summary {
        program.summary.clone_from(summary);
    }
    if let Some(cap) = request.max_participants {
        program.max_participants = cap;
    }
    if let Some(fee) = request.fee {
        program.fee = fee;
    }
    program.updated_at = now;
    validate_program_fields(&program).map_err(translate_domain_error)?;

    let changes = ProgramChanges {
        title: request.title,
        description: request.description,
        summary: request.summary,
        status: request.status.map(|_| status.as_str().to_string()),
        apply_start: request.apply_start,
        apply_end: request.apply_end,
        program_start: request.program_start,
        program_end: request.program_end,
        max_participants: request.max_participants,
        fee: request.fee,
        updated_at: Some(now.to_rfc3339()),
    };
    persistence
        .update_program(program_id, &changes)
        .map_err(translate_persistence_error)?;

    let event = maeul_audit::AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        maeul_audit::Action::new(
            String::from("UpdateProgram"),
            Some(format!("Updated program {program_id}")),
        ),
        maeul_audit::StateSnapshot::new(format!("program={program_id}")),
        maeul_audit::StateSnapshot::new(format!("program={program_id},status={status}")),
        Some(program_id),
    );
    persist_audit(persistence, &event, now)?;

    Ok(ProgramInfo::from_domain(&program))
}

/// Soft-deletes a program.
///
/// Programs are never hard-deleted; the row stays for applications that
/// reference it.
///
/// # Errors
///
/// Returns an error if the actor may not manage this program or the
/// program is missing.
pub fn delete_program(
    persistence: &mut Persistence,
    program_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    let program = load_program(persistence, program_id)?;
    AuthorizationService::authorize_manage_program(actor, program.organizer_id)?;

    persistence
        .set_program_active(program_id, false, &now.to_rfc3339())
        .map_err(translate_persistence_error)?;

    let event = maeul_audit::AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        maeul_audit::Action::new(
            String::from("DeleteProgram"),
            Some(format!("Soft-deleted program {program_id}")),
        ),
        maeul_audit::StateSnapshot::new(format!("program={program_id},is_active=true")),
        maeul_audit::StateSnapshot::new(format!("program={program_id},is_active=false")),
        Some(program_id),
    );
    persist_audit(persistence, &event, now)?;

    Ok(())
}

/// Fetches a program, synchronizing its status first.
///
/// Note: this read may write. The synchronizer persists a recomputed
/// status before the program is returned (see `status_sync`).
///
/// # Errors
///
/// Returns not-found if the program does not exist or is inactive.
pub fn get_program(
    persistence: &mut Persistence,
    program_id: i64,
    now: DateTime<Utc>,
) -> Result<ProgramInfo, ApiError> {
    let program = load_program(persistence, program_id)?;
    if !program.is_active {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {program_id} is no longer active"),
        });
    }
    let program = sync_program_status(persistence, program, now);
    Ok(ProgramInfo::from_domain(&program))
}

/// Lists active programs, synchronizing each row's status first.
///
/// Note: this read may write (one status update per stale row).
///
/// # Errors
///
/// Returns an error if the listing query fails.
pub fn list_programs(
    persistence: &mut Persistence,
    now: DateTime<Utc>,
) -> Result<ListProgramsResponse, ApiError> {
    let programs = persistence
        .list_programs(false)
        .map_err(translate_persistence_error)?;

    let programs = programs
        .into_iter()
        .map(|program| {
            let program = sync_program_status(persistence, program, now);
            ProgramInfo::from_domain(&program)
        })
        .collect();

    Ok(ListProgramsResponse { programs })
}

// ============================================================================
// Applications
// ============================================================================

/// Submits an application.
///
/// This function:
/// - Verifies the actor is an applicant (applications are always submitted
///   for oneself)
/// - Synchronizes the program status so the window guard sees the current
///   value
/// - Enriches the payload with the applicant identity snapshot
/// - Applies the core transition (window, status, and duplicate guards)
/// - Persists the row inside the duplicate-checking transaction
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an applicant
/// - The program is missing or inactive (not found)
/// - The application window is closed (forbidden)
/// - An application already exists for this applicant (conflict)
pub fn submit_application(
    persistence: &mut Persistence,
    request: SubmitApplicationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    AuthorizationService::authorize_submit_application(actor)?;

    let mut state = load_state(persistence, request.program_id)?;
    if !state.program.is_active {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {} is no longer active", request.program_id),
        });
    }
    state.program = sync_program_status(persistence, state.program, now);

    // Enrich the submitted answers with the applicant identity snapshot.
    let mut payload = request.payload;
    let Some(map) = payload.as_object_mut() else {
        return Err(ApiError::InvalidInput {
            field: String::from("payload"),
            message: String::from("Payload must be a JSON object"),
        });
    };
    map.insert(
        String::from("applicant"),
        serde_json::json!({
            "id": actor.id,
            "name": request.applicant_name,
            "email": request.applicant_email,
            "submitted_at": now.to_rfc3339(),
        }),
    );

    let transition = apply(
        &state,
        Command::SubmitApplication {
            applicant_id: actor.id,
            payload,
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    // The transition appended exactly one application.
    let Some(application) = transition.new_state.applications.last() else {
        return Err(ApiError::Internal {
            message: String::from("submit transition produced no application"),
        });
    };

    let application_id = persistence
        .submit_application(&NewApplication::from_domain(application))
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(message) => ApiError::Conflict {
                resource_type: String::from("Application"),
                message,
            },
            other => translate_persistence_error(other),
        })?;

    persist_audit(persistence, &transition.audit_event, now)?;

    let mut application = application.clone();
    application.application_id = Some(application_id);
    Ok(ApplicationInfo::from_domain(&application))
}

/// Fetches an application.
///
/// Applicants see their own applications; staff and reviewers see all.
///
/// # Errors
///
/// Returns not-found for a missing row, forbidden for someone else's
/// application.
pub fn get_application(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ApplicationInfo, ApiError> {
    let application = load_application(persistence, application_id)?;

    let allowed = actor.role.is_staff()
        || actor.role.is_reviewer()
        || (actor.role == Role::Applicant && application.applicant_id == actor.id);
    if !allowed {
        return Err(ApiError::Forbidden {
            action: String::from("view_application"),
            reason: String::from("applications are visible to their applicant and to staff"),
        });
    }

    Ok(ApplicationInfo::from_domain(&application))
}

/// Lists a program's applications.
///
/// # Errors
///
/// Returns an error if the actor lacks staff or reviewer authority, or if
/// the program does not exist.
pub fn list_applications(
    persistence: &mut Persistence,
    program_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListApplicationsResponse, ApiError> {
    AuthorizationService::authorize_list_applications(actor)?;
    // Existence check so a bogus program ID reads as not-found, not as an
    // empty listing.
    load_program(persistence, program_id)?;

    let applications = persistence
        .list_applications_for_program(program_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(ApplicationInfo::from_domain)
        .collect();

    Ok(ListApplicationsResponse {
        program_id,
        applications,
    })
}

/// Updates an application's editable fields.
///
/// An applicant may edit only their own application and only while it is
/// still `submitted`; staff may edit any application at any time.
///
/// # Errors
///
/// Returns an error if the ownership or role check fails, the application
/// is missing, or a requested status change is not a valid transition.
pub fn update_application(
    persistence: &mut Persistence,
    application_id: i64,
    request: UpdateApplicationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    let application = load_application(persistence, application_id)?;

    if actor.role == Role::Applicant {
        if application.applicant_id != actor.id {
            return Err(ApiError::Forbidden {
                action: String::from("update_application"),
                reason: String::from("applicants may only edit their own applications"),
            });
        }
        if !application.status.applicant_editable() {
            return Err(ApiError::Forbidden {
                action: String::from("update_application"),
                reason: format!(
                    "applications can no longer be edited while '{}'",
                    application.status
                ),
            });
        }
    } else if !actor.role.is_staff() {
        return Err(ApiError::Unauthorized {
            action: String::from("update_application"),
            required_role: String::from("Applicant (own), Staff, Admin, or Operator"),
        });
    }

    let status = request
        .status
        .as_deref()
        .map(ApplicationStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let state = load_state(persistence, application.program_id)?;
    let transition = apply(
        &state,
        Command::UpdateApplication {
            application_id,
            payload: request.payload.clone(),
            status,
            score: request.score,
            notes: request.notes.clone(),
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let changes = ApplicationChanges {
        payload: request.payload.map(|p| p.to_string()),
        status: status.map(|s| s.as_str().to_string()),
        score: request.score.map(Some),
        notes: request.notes.map(Some),
        updated_at: Some(now.to_rfc3339()),
    };
    persistence
        .update_application(application_id, &changes)
        .map_err(translate_persistence_error)?;

    persist_audit(persistence, &transition.audit_event, now)?;

    transition
        .new_state
        .application(application_id)
        .map(ApplicationInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("updated application missing from transition state"),
        })
}

/// Withdraws an application (applicant self-action).
///
/// # Errors
///
/// Returns an error if the actor is not the owning applicant or the
/// application is already finalized (forbidden).
pub fn withdraw_application(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    let application = load_application(persistence, application_id)?;

    if actor.role != Role::Applicant {
        return Err(ApiError::Unauthorized {
            action: String::from("withdraw_application"),
            required_role: String::from("Applicant"),
        });
    }
    if application.applicant_id != actor.id {
        return Err(ApiError::Forbidden {
            action: String::from("withdraw_application"),
            reason: String::from("applicants may only withdraw their own applications"),
        });
    }

    let state = load_state(persistence, application.program_id)?;
    let transition = apply(
        &state,
        Command::WithdrawApplication {
            application_id,
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .set_application_status(
            application_id,
            ApplicationStatus::Withdrawn.as_str(),
            &now.to_rfc3339(),
        )
        .map_err(translate_persistence_error)?;

    persist_audit(persistence, &transition.audit_event, now)?;

    transition
        .new_state
        .application(application_id)
        .map(ApplicationInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("withdrawn application missing from transition state"),
        })
}

/// Records a review decision directly on an application.
///
/// # Errors
///
/// Returns an error if the actor lacks staff authority, the application is
/// missing, the decision string is invalid, or the application is already
/// finalized (conflict).
pub fn review_application(
    persistence: &mut Persistence,
    application_id: i64,
    request: ReviewRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    AuthorizationService::authorize_review(actor)?;

    let application = load_application(persistence, application_id)?;
    let decision = validate_review_decision(&request.decision).map_err(translate_domain_error)?;

    let state = load_state(persistence, application.program_id)?;
    let transition = apply(
        &state,
        Command::ReviewApplication {
            application_id,
            decision,
            notes: request.notes.clone(),
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let changes = ApplicationChanges {
        status: Some(decision.as_str().to_string()),
        notes: request.notes.map(Some),
        updated_at: Some(now.to_rfc3339()),
        ..ApplicationChanges::default()
    };
    persistence
        .update_application(application_id, &changes)
        .map_err(translate_persistence_error)?;

    persist_audit(persistence, &transition.audit_event, now)?;

    transition
        .new_state
        .application(application_id)
        .map(ApplicationInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("reviewed application missing from transition state"),
        })
}

/// Changes the payment-received state of a selected application.
///
/// A real flag change adjusts the owning program's revenue by its fee at
/// the storage layer, inside the same transaction as the flag update.
/// Requesting the value already held is a no-op success.
///
/// # Errors
///
/// Returns an error if the actor lacks staff authority, the application is
/// missing, or the application is not `selected` (conflict).
pub fn set_payment(
    persistence: &mut Persistence,
    application_id: i64,
    request: PaymentRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<PaymentResponse, ApiError> {
    AuthorizationService::authorize_payment(actor)?;

    let application = load_application(persistence, application_id)?;
    let state = load_state(persistence, application.program_id)?;

    let transition = apply(
        &state,
        Command::SetPaymentReceived {
            application_id,
            received: request.received,
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let changed = application.is_payment_received != request.received;
    if changed {
        let delta = if request.received {
            state.program.fee
        } else {
            -state.program.fee
        };
        persistence
            .set_payment_received(
                application_id,
                application.program_id,
                request.received,
                request.received.then(|| now.to_rfc3339()),
                delta,
                &now.to_rfc3339(),
            )
            .map_err(translate_persistence_error)?;
    }

    persist_audit(persistence, &transition.audit_event, now)?;

    let updated = transition
        .new_state
        .application(application_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("application missing from transition state"),
        })?;

    Ok(PaymentResponse {
        application_id,
        is_payment_received: updated.is_payment_received,
        payment_received_at: updated.payment_received_at.map(|d| d.to_rfc3339()),
        program_revenue: transition.new_state.program.revenue,
    })
}

// ============================================================================
// Selections
// ============================================================================

/// Creates the one-to-one selection record for an application.
///
/// The selection insert and the application status side effect run in one
/// database transaction.
///
/// # Errors
///
/// Returns an error if the actor lacks reviewer authority, the application
/// is missing, or a selection already exists (conflict).
pub fn create_selection(
    persistence: &mut Persistence,
    request: CreateSelectionRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<SelectionInfo, ApiError> {
    AuthorizationService::authorize_selection(actor)?;

    let application = load_application(persistence, request.application_id)?;
    let state = load_state(persistence, application.program_id)?;

    let transition = apply(
        &state,
        Command::RecordSelection {
            application_id: request.application_id,
            selected: request.selected,
            reason: request.reason,
            reviewer_id: actor.id,
            criteria: request.criteria,
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let Some(selection) = transition.new_state.selections.last() else {
        return Err(ApiError::Internal {
            message: String::from("selection transition produced no selection"),
        });
    };

    let selection_id = persistence
        .record_selection(
            &NewSelection::from_domain(selection),
            selection.implied_status().as_str(),
            &now.to_rfc3339(),
        )
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(message) => ApiError::Conflict {
                resource_type: String::from("Selection"),
                message,
            },
            other => translate_persistence_error(other),
        })?;

    persist_audit(persistence, &transition.audit_event, now)?;

    let mut selection = selection.clone();
    selection.selection_id = Some(selection_id);
    Ok(SelectionInfo::from_domain(&selection))
}

/// Updates a selection record.
///
/// A changed decision re-applies the application status side effect in the
/// same database transaction.
///
/// # Errors
///
/// Returns an error if the actor lacks reviewer authority or the selection
/// is missing.
pub fn update_selection(
    persistence: &mut Persistence,
    selection_id: i64,
    request: UpdateSelectionRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<SelectionInfo, ApiError> {
    AuthorizationService::authorize_selection(actor)?;

    let selection = persistence.get_selection(selection_id).map_err(|e| match e {
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Selection"),
            message: format!("Selection {selection_id} does not exist"),
        },
        other => translate_persistence_error(other),
    })?;
    let application = load_application(persistence, selection.application_id)?;

    let state = load_state(persistence, application.program_id)?;
    let transition = apply(
        &state,
        Command::UpdateSelection {
            selection_id,
            selected: request.selected,
            reason: request.reason.clone(),
            criteria: request.criteria.clone(),
            now,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let updated = transition
        .new_state
        .selection(selection_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("updated selection missing from transition state"),
        })?;

    let changes = SelectionChanges {
        selected: request.selected,
        reason: request.reason,
        reviewed_at: Some(now.to_rfc3339()),
        criteria: request.criteria.map(|c| c.to_string()),
    };
    persistence
        .update_selection(
            selection_id,
            &changes,
            selection.application_id,
            updated.implied_status().as_str(),
            &now.to_rfc3339(),
        )
        .map_err(translate_persistence_error)?;

    persist_audit(persistence, &transition.audit_event, now)?;

    Ok(SelectionInfo::from_domain(updated))
}
