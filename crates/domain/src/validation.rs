// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application_status::ApplicationStatus;
use crate::error::DomainError;
use crate::types::Program;

/// Validates that a program's basic field constraints are met.
///
/// This function checks field-local rules only. Date ordering is checked at
/// `ProgramSchedule` construction; uniqueness rules require context and are
/// checked where that context exists.
///
/// # Arguments
///
/// * `program` - The program to validate
///
/// # Returns
///
/// * `Ok(())` if the program's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or whitespace
/// - The fee is negative
/// - A maximum participant count is set but not positive
pub fn validate_program_fields(program: &Program) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if program.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: fee must not be negative
    if program.fee < 0 {
        return Err(DomainError::InvalidFee { fee: program.fee });
    }

    // Rule: when set, the participant cap must be positive
    if let Some(cap) = program.max_participants
        && cap <= 0
    {
        return Err(DomainError::InvalidMaxParticipants { value: cap });
    }

    Ok(())
}

/// Parses a review decision string into the application status it records.
///
/// Only the two terminal decisions are valid review outcomes.
///
/// # Arguments
///
/// * `decision` - The decision string (`"selected"` or `"rejected"`)
///
/// # Errors
///
/// Returns `DomainError::InvalidReviewDecision` for anything else.
pub fn validate_review_decision(decision: &str) -> Result<ApplicationStatus, DomainError> {
    match decision {
        "selected" => Ok(ApplicationStatus::Selected),
        "rejected" => Ok(ApplicationStatus::Rejected),
        _ => Err(DomainError::InvalidReviewDecision {
            decision: decision.to_string(),
        }),
    }
}
