// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use maeul_domain::ApplicationStatus;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Authorization and
/// ownership checks happen before a command is built; commands themselves
/// carry no actor identity beyond what the state change records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new application to the scoped program.
    SubmitApplication {
        /// The applicant user.
        applicant_id: i64,
        /// The form answers, already enriched with the applicant snapshot.
        payload: serde_json::Value,
        /// Submission time.
        now: DateTime<Utc>,
    },
    /// Update an existing application's editable fields.
    UpdateApplication {
        /// The application to update.
        application_id: i64,
        /// Replacement payload, if changing.
        payload: Option<serde_json::Value>,
        /// Requested status, if changing.
        status: Option<ApplicationStatus>,
        /// Replacement score, if changing.
        score: Option<i64>,
        /// Replacement notes, if changing.
        notes: Option<String>,
        /// Update time.
        now: DateTime<Utc>,
    },
    /// Withdraw an application (applicant self-action).
    WithdrawApplication {
        /// The application to withdraw.
        application_id: i64,
        /// Withdrawal time.
        now: DateTime<Utc>,
    },
    /// Record a review decision directly on an application.
    ReviewApplication {
        /// The application under review.
        application_id: i64,
        /// The decision: `Selected` or `Rejected`.
        decision: ApplicationStatus,
        /// Reviewer notes, if any.
        notes: Option<String>,
        /// Review time.
        now: DateTime<Utc>,
    },
    /// Create the one-to-one selection record for an application.
    RecordSelection {
        /// The application the decision belongs to.
        application_id: i64,
        /// Selected into the program or not.
        selected: bool,
        /// Free-text reason for the decision.
        reason: String,
        /// The reviewer making the decision.
        reviewer_id: i64,
        /// Free-form decision criteria.
        criteria: serde_json::Value,
        /// Decision time.
        now: DateTime<Utc>,
    },
    /// Update an existing selection record.
    UpdateSelection {
        /// The selection to update.
        selection_id: i64,
        /// Revised decision, if changing.
        selected: Option<bool>,
        /// Revised reason, if changing.
        reason: Option<String>,
        /// Revised criteria, if changing.
        criteria: Option<serde_json::Value>,
        /// Update time.
        now: DateTime<Utc>,
    },
    /// Set the payment-received flag on a selected application.
    SetPaymentReceived {
        /// The application whose payment state changes.
        application_id: i64,
        /// The requested flag value.
        received: bool,
        /// Toggle time.
        now: DateTime<Utc>,
    },
}
