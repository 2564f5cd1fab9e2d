// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use maeul_core::CoreError;
use maeul_domain::DomainError;
use maeul_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// The HTTP layer maps each variant onto a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The action is not permitted in the current state, regardless of role.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the action is not permitted.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// The type of resource in conflict.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden: cannot {action}: {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidFee { fee } => ApiError::InvalidInput {
            field: String::from("fee"),
            message: format!("Invalid fee: {fee}. Fee must not be negative"),
        },
        DomainError::InvalidMaxParticipants { value } => ApiError::InvalidInput {
            field: String::from("max_participants"),
            message: format!("Invalid maximum participant count: {value}. Must be greater than 0"),
        },
        DomainError::InvalidApplyWindow {
            apply_start,
            apply_end,
        } => ApiError::InvalidInput {
            field: String::from("apply_end"),
            message: format!("Application window end {apply_end} precedes its start {apply_start}"),
        },
        DomainError::InvalidActivityWindow {
            program_start,
            program_end,
        } => ApiError::InvalidInput {
            field: String::from("program_end"),
            message: format!("Activity end {program_end} precedes its start {program_start}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidProgramStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown program status: '{status}'"),
        },
        DomainError::InvalidApplicationStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown application status: '{status}'"),
        },
        DomainError::InvalidReviewDecision { decision } => ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("Unknown review decision: '{decision}'. Must be 'selected' or 'rejected'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::Conflict {
            resource_type: String::from("Application"),
            message: format!("Cannot transition from '{from}' to '{to}': {reason}"),
        },
        DomainError::ProgramNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {id} does not exist"),
        },
        DomainError::ProgramInactive(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {id} is no longer active"),
        },
        DomainError::ApplicationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("Application {id} does not exist"),
        },
        DomainError::SelectionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Selection"),
            message: format!("Selection {id} does not exist"),
        },
        DomainError::ApplicationWindowClosed { program_id, reason } => ApiError::Forbidden {
            action: String::from("submit_application"),
            reason: format!("program {program_id} is not accepting applications: {reason}"),
        },
        DomainError::WithdrawalNotAllowed {
            application_id,
            status,
        } => ApiError::Forbidden {
            action: String::from("withdraw_application"),
            reason: format!("application {application_id} is already finalized as '{status}'"),
        },
        DomainError::DuplicateApplication {
            program_id,
            applicant_id,
        } => ApiError::Conflict {
            resource_type: String::from("Application"),
            message: format!(
                "Applicant {applicant_id} has already applied to program {program_id}"
            ),
        },
        DomainError::DuplicateSelection { application_id } => ApiError::Conflict {
            resource_type: String::from("Selection"),
            message: format!("Application {application_id} already has a selection decision"),
        },
        DomainError::ApplicationAlreadyFinalized {
            application_id,
            status,
        } => ApiError::Conflict {
            resource_type: String::from("Application"),
            message: format!("Application {application_id} is already finalized as '{status}'"),
        },
        DomainError::PaymentRequiresSelection {
            application_id,
            status,
        } => ApiError::Conflict {
            resource_type: String::from("Application"),
            message: format!(
                "Payment state of application {application_id} cannot change while '{status}'"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Unique-constraint rejections surface as conflicts; missing rows surface
/// as not-found; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
