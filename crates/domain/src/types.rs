// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application_status::ApplicationStatus;
use crate::error::DomainError;
use crate::program_status::ProgramStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four dates governing a program's lifecycle.
///
/// The application window is mandatory; the activity window is optional and
/// may be partially set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSchedule {
    /// When the application window opens.
    pub apply_start: DateTime<Utc>,
    /// When the application window closes (inclusive).
    pub apply_end: DateTime<Utc>,
    /// When the program activity starts (optional).
    pub program_start: Option<DateTime<Utc>>,
    /// When the program activity ends (optional, inclusive).
    pub program_end: Option<DateTime<Utc>>,
}

impl ProgramSchedule {
    /// Creates a new `ProgramSchedule`, validating date ordering.
    ///
    /// # Arguments
    ///
    /// * `apply_start` - Application window open
    /// * `apply_end` - Application window close
    /// * `program_start` - Activity start (optional)
    /// * `program_end` - Activity end (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if `apply_end` precedes `apply_start`, or if both
    /// activity dates are set and `program_end` precedes `program_start`.
    pub fn new(
        apply_start: DateTime<Utc>,
        apply_end: DateTime<Utc>,
        program_start: Option<DateTime<Utc>>,
        program_end: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if apply_end < apply_start {
            return Err(DomainError::InvalidApplyWindow {
                apply_start: apply_start.to_rfc3339(),
                apply_end: apply_end.to_rfc3339(),
            });
        }
        if let (Some(start), Some(end)) = (program_start, program_end)
            && end < start
        {
            return Err(DomainError::InvalidActivityWindow {
                program_start: start.to_rfc3339(),
                program_end: end.to_rfc3339(),
            });
        }
        Ok(Self {
            apply_start,
            apply_end,
            program_start,
            program_end,
        })
    }

    /// Returns true if `now` falls inside the application window.
    #[must_use]
    pub fn accepts_applications_at(&self, now: DateTime<Utc>) -> bool {
        self.apply_start <= now && now <= self.apply_end
    }
}

/// A community program.
///
/// `program_id` is the canonical identifier; `None` indicates the program
/// has not been persisted yet. `status` is a cached derived value (see
/// `calculate_program_status`) and `revenue` is a cached aggregate of
/// received payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Canonical identifier assigned by the database.
    pub program_id: Option<i64>,
    /// Program title.
    pub title: String,
    /// Long description shown on the detail page.
    pub description: String,
    /// Short summary shown in listings (optional).
    pub summary: Option<String>,
    /// The organizer user who owns this program.
    pub organizer_id: i64,
    /// Cached lifecycle status.
    pub status: ProgramStatus,
    /// The program's date fields.
    pub schedule: ProgramSchedule,
    /// Maximum participant count (optional).
    pub max_participants: Option<i64>,
    /// Participation fee in currency units.
    pub fee: i64,
    /// Cumulative received revenue in currency units. Never negative.
    pub revenue: i64,
    /// The structured schema of the application form fields.
    pub application_form: serde_json::Value,
    /// Soft-delete flag. Programs are never hard-deleted.
    pub is_active: bool,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last row update time.
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Creates a new `Program` without a persisted ID.
    ///
    /// The caller is expected to have validated the fields via
    /// `validate_program_fields`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        title: String,
        description: String,
        summary: Option<String>,
        organizer_id: i64,
        schedule: ProgramSchedule,
        max_participants: Option<i64>,
        fee: i64,
        application_form: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            program_id: None,
            title,
            description,
            summary,
            organizer_id,
            status: ProgramStatus::Upcoming,
            schedule,
            max_participants,
            fee,
            revenue: 0,
            application_form,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Credits one received payment to the cached revenue aggregate.
    #[must_use]
    pub const fn credit_revenue(&self, amount: i64) -> i64 {
        self.revenue.saturating_add(amount)
    }

    /// Debits one reverted payment from the cached revenue aggregate.
    ///
    /// The aggregate is floored at zero: repeated decrements can never push
    /// it negative.
    #[must_use]
    pub const fn debit_revenue(&self, amount: i64) -> i64 {
        let debited = self.revenue - amount;
        if debited < 0 { 0 } else { debited }
    }
}

/// An application submitted by an applicant to a program.
///
/// Exactly one application may exist per `(program, applicant)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Canonical identifier assigned by the database.
    pub application_id: Option<i64>,
    /// The program applied to.
    pub program_id: i64,
    /// The applicant user.
    pub applicant_id: i64,
    /// The submitted form answers, enriched server-side with an applicant
    /// identity snapshot at submission time.
    pub payload: serde_json::Value,
    /// Lifecycle status.
    pub status: ApplicationStatus,
    /// Review score (optional).
    pub score: Option<i64>,
    /// Reviewer notes (optional).
    pub notes: Option<String>,
    /// Whether the participation fee has been received.
    pub is_payment_received: bool,
    /// When the payment was received, if it has been.
    pub payment_received_at: Option<DateTime<Utc>>,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a new `Application` in the initial `Submitted` status.
    ///
    /// # Arguments
    ///
    /// * `program_id` - The program applied to
    /// * `applicant_id` - The applicant
    /// * `payload` - The enriched form answers
    /// * `now` - Submission time
    #[must_use]
    pub const fn new(
        program_id: i64,
        applicant_id: i64,
        payload: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            application_id: None,
            program_id,
            applicant_id,
            payload,
            status: ApplicationStatus::Submitted,
            score: None,
            notes: None,
            is_payment_received: false,
            payment_received_at: None,
            submitted_at: now,
            updated_at: now,
        }
    }
}

/// A reviewer's selection decision for one application.
///
/// One-to-one with `Application`. The parent application's status always
/// mirrors `selected`; every write path that changes one updates the other
/// within the same logical operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Canonical identifier assigned by the database.
    pub selection_id: Option<i64>,
    /// The application this decision belongs to.
    pub application_id: i64,
    /// The decision: selected into the program or not.
    pub selected: bool,
    /// Free-text reason for the decision.
    pub reason: String,
    /// The reviewer who made the decision.
    pub reviewer_id: i64,
    /// When the decision was made.
    pub reviewed_at: DateTime<Utc>,
    /// Free-form decision criteria; may include a numeric score.
    pub criteria: serde_json::Value,
}

impl Selection {
    /// Creates a new `Selection` without a persisted ID.
    #[must_use]
    pub const fn new(
        application_id: i64,
        selected: bool,
        reason: String,
        reviewer_id: i64,
        reviewed_at: DateTime<Utc>,
        criteria: serde_json::Value,
    ) -> Self {
        Self {
            selection_id: None,
            application_id,
            selected,
            reason,
            reviewer_id,
            reviewed_at,
            criteria,
        }
    }

    /// The application status implied by this decision.
    #[must_use]
    pub const fn implied_status(&self) -> ApplicationStatus {
        if self.selected {
            ApplicationStatus::Selected
        } else {
            ApplicationStatus::Rejected
        }
    }
}
