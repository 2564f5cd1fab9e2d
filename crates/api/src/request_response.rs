// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These are distinct from domain types and represent the API contract.
//! Timestamps cross the boundary as RFC 3339 strings.

use maeul_domain::{Application, Program, Selection};

/// API request to create a new program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProgramRequest {
    /// Program title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Short listing summary.
    pub summary: Option<String>,
    /// Application window open (RFC 3339).
    pub apply_start: String,
    /// Application window close (RFC 3339).
    pub apply_end: String,
    /// Activity start (RFC 3339, optional).
    pub program_start: Option<String>,
    /// Activity end (RFC 3339, optional).
    pub program_end: Option<String>,
    /// Maximum participant count (optional).
    pub max_participants: Option<i64>,
    /// Participation fee in currency units.
    pub fee: i64,
    /// The structured application form schema.
    pub application_form: serde_json::Value,
}

/// API request to update a program.
///
/// `None` fields are left untouched. Setting `status` to `"archived"`
/// archives the program; archived is sticky.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateProgramRequest {
    /// Replacement title, if changing.
    pub title: Option<String>,
    /// Replacement description, if changing.
    pub description: Option<String>,
    /// Replacement summary, if changing.
    pub summary: Option<Option<String>>,
    /// Manually assigned status, if changing.
    pub status: Option<String>,
    /// Replacement window open, if changing (RFC 3339).
    pub apply_start: Option<String>,
    /// Replacement window close, if changing (RFC 3339).
    pub apply_end: Option<String>,
    /// Replacement activity start, if changing (RFC 3339).
    pub program_start: Option<Option<String>>,
    /// Replacement activity end, if changing (RFC 3339).
    pub program_end: Option<Option<String>>,
    /// Replacement participant cap, if changing.
    pub max_participants: Option<Option<i64>>,
    /// Replacement fee, if changing.
    pub fee: Option<i64>,
}

/// Program data as returned by read endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    /// The program ID.
    pub program_id: i64,
    /// Program title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Short listing summary.
    pub summary: Option<String>,
    /// The owning organizer.
    pub organizer_id: i64,
    /// Current lifecycle status (synchronized before return).
    pub status: String,
    /// Application window open (RFC 3339).
    pub apply_start: String,
    /// Application window close (RFC 3339).
    pub apply_end: String,
    /// Activity start (RFC 3339, optional).
    pub program_start: Option<String>,
    /// Activity end (RFC 3339, optional).
    pub program_end: Option<String>,
    /// Maximum participant count (optional).
    pub max_participants: Option<i64>,
    /// Participation fee in currency units.
    pub fee: i64,
    /// Cumulative received revenue in currency units.
    pub revenue: i64,
    /// The structured application form schema.
    pub application_form: serde_json::Value,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Row creation time (RFC 3339).
    pub created_at: String,
    /// Last update time (RFC 3339).
    pub updated_at: String,
}

impl ProgramInfo {
    /// Builds the DTO from a domain program.
    #[must_use]
    pub fn from_domain(program: &Program) -> Self {
        Self {
            program_id: program.program_id.unwrap_or_default(),
            title: program.title.clone(),
            description: program.description.clone(),
            summary: program.summary.clone(),
            organizer_id: program.organizer_id,
            status: program.status.as_str().to_string(),
            apply_start: program.schedule.apply_start.to_rfc3339(),
            apply_end: program.schedule.apply_end.to_rfc3339(),
            program_start: program.schedule.program_start.map(|d| d.to_rfc3339()),
            program_end: program.schedule.program_end.map(|d| d.to_rfc3339()),
            max_participants: program.max_participants,
            fee: program.fee,
            revenue: program.revenue,
            application_form: program.application_form.clone(),
            is_active: program.is_active,
            created_at: program.created_at.to_rfc3339(),
            updated_at: program.updated_at.to_rfc3339(),
        }
    }
}

/// API response for listing programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProgramsResponse {
    /// The programs, newest first, statuses synchronized.
    pub programs: Vec<ProgramInfo>,
}

/// API request to submit an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitApplicationRequest {
    /// The program applied to.
    pub program_id: i64,
    /// The form answers.
    pub payload: serde_json::Value,
    /// Applicant display name, snapshotted into the payload.
    pub applicant_name: Option<String>,
    /// Applicant contact, snapshotted into the payload.
    pub applicant_email: Option<String>,
}

/// API request to update an application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateApplicationRequest {
    /// Replacement payload, if changing.
    pub payload: Option<serde_json::Value>,
    /// Requested status, if changing.
    pub status: Option<String>,
    /// Replacement score, if changing.
    pub score: Option<i64>,
    /// Replacement notes, if changing.
    pub notes: Option<String>,
}

/// API request to record a review decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// The decision: `"selected"` or `"rejected"`.
    pub decision: String,
    /// Reviewer notes, if any.
    pub notes: Option<String>,
}

/// API request to change payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRequest {
    /// The requested payment-received flag value.
    pub received: bool,
}

/// API response for a payment state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResponse {
    /// The application.
    pub application_id: i64,
    /// The payment-received flag after the change.
    pub is_payment_received: bool,
    /// The receipt timestamp after the change (RFC 3339).
    pub payment_received_at: Option<String>,
    /// The owning program's revenue after the change.
    pub program_revenue: i64,
}

/// Application data as returned by read endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// The application ID.
    pub application_id: i64,
    /// The program applied to.
    pub program_id: i64,
    /// The applicant user.
    pub applicant_id: i64,
    /// The enriched form answers.
    pub payload: serde_json::Value,
    /// Lifecycle status.
    pub status: String,
    /// Review score (optional).
    pub score: Option<i64>,
    /// Reviewer notes (optional).
    pub notes: Option<String>,
    /// Whether the participation fee has been received.
    pub is_payment_received: bool,
    /// Receipt timestamp (RFC 3339, optional).
    pub payment_received_at: Option<String>,
    /// Submission time (RFC 3339).
    pub submitted_at: String,
    /// Last update time (RFC 3339).
    pub updated_at: String,
}

impl ApplicationInfo {
    /// Builds the DTO from a domain application.
    #[must_use]
    pub fn from_domain(application: &Application) -> Self {
        Self {
            application_id: application.application_id.unwrap_or_default(),
            program_id: application.program_id,
            applicant_id: application.applicant_id,
            payload: application.payload.clone(),
            status: application.status.as_str().to_string(),
            score: application.score,
            notes: application.notes.clone(),
            is_payment_received: application.is_payment_received,
            payment_received_at: application.payment_received_at.map(|d| d.to_rfc3339()),
            submitted_at: application.submitted_at.to_rfc3339(),
            updated_at: application.updated_at.to_rfc3339(),
        }
    }
}

/// API response for listing a program's applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListApplicationsResponse {
    /// The program.
    pub program_id: i64,
    /// The applications, oldest first.
    pub applications: Vec<ApplicationInfo>,
}

/// API request to create a selection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSelectionRequest {
    /// The application the decision belongs to.
    pub application_id: i64,
    /// The decision: selected into the program or not.
    pub selected: bool,
    /// Free-text reason for the decision.
    pub reason: String,
    /// Free-form decision criteria.
    pub criteria: serde_json::Value,
}

/// API request to update a selection record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateSelectionRequest {
    /// Revised decision, if changing.
    pub selected: Option<bool>,
    /// Revised reason, if changing.
    pub reason: Option<String>,
    /// Revised criteria, if changing.
    pub criteria: Option<serde_json::Value>,
}

/// Selection data as returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    /// The selection ID.
    pub selection_id: i64,
    /// The application the decision belongs to.
    pub application_id: i64,
    /// The decision.
    pub selected: bool,
    /// Free-text reason.
    pub reason: String,
    /// The reviewer who made the decision.
    pub reviewer_id: i64,
    /// Decision time (RFC 3339).
    pub reviewed_at: String,
    /// Free-form decision criteria.
    pub criteria: serde_json::Value,
    /// The application status implied by the decision.
    pub application_status: String,
}

impl SelectionInfo {
    /// Builds the DTO from a domain selection.
    #[must_use]
    pub fn from_domain(selection: &Selection) -> Self {
        Self {
            selection_id: selection.selection_id.unwrap_or_default(),
            application_id: selection.application_id,
            selected: selection.selected,
            reason: selection.reason.clone(),
            reviewer_id: selection.reviewer_id,
            reviewed_at: selection.reviewed_at.to_rfc3339(),
            criteria: selection.criteria.clone(),
            application_status: selection.implied_status().as_str().to_string(),
        }
    }
}
