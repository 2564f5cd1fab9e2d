// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use maeul_audit::{AuditEvent, StateSnapshot};
use maeul_domain::{Application, Program, Selection};

/// The complete system state scoped to a single program.
///
/// State holds the program row plus every application and selection that
/// belongs to it. Scoping to one program keeps transitions small and makes
/// persistence and audit scoping straightforward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The program this state is scoped to.
    pub program: Program,
    /// All applications for this program.
    pub applications: Vec<Application>,
    /// All selection records for this program's applications.
    pub selections: Vec<Selection>,
}

impl State {
    /// Creates a new state for a program with no applications yet.
    ///
    /// # Arguments
    ///
    /// * `program` - The program this state is scoped to
    #[must_use]
    pub const fn new(program: Program) -> Self {
        Self {
            program,
            applications: Vec::new(),
            selections: Vec::new(),
        }
    }

    /// Looks up an application by its canonical ID.
    #[must_use]
    pub fn application(&self, application_id: i64) -> Option<&Application> {
        self.applications
            .iter()
            .find(|a| a.application_id == Some(application_id))
    }

    /// Looks up the application a given applicant submitted, if any.
    #[must_use]
    pub fn application_for_applicant(&self, applicant_id: i64) -> Option<&Application> {
        self.applications
            .iter()
            .find(|a| a.applicant_id == applicant_id)
    }

    /// Looks up the selection record for an application, if any.
    #[must_use]
    pub fn selection_for_application(&self, application_id: i64) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|s| s.application_id == application_id)
    }

    /// Looks up a selection by its canonical ID.
    #[must_use]
    pub fn selection(&self, selection_id: i64) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|s| s.selection_id == Some(selection_id))
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "program={},status={},applications={},selections={},revenue={}",
            self.program.program_id.unwrap_or_default(),
            self.program.status,
            self.applications.len(),
            self.selections.len(),
            self.program.revenue,
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
