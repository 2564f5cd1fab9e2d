// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be an applicant, a staff member, or an automated trigger
/// such as the status synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "applicant", "staff", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitApplication`", "`RecordSelection`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of system state at a point in time.
///
/// Snapshots are intentionally compact string summaries: enough to see what
/// a transition touched without re-serializing entire rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - The program the transition was scoped to, when applicable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The program this transition was scoped to, when applicable.
    pub program_id: Option<i64>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `program_id` - The program scope, when applicable
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        program_id: Option<i64>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            program_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("user-123"), String::from("applicant"));

        assert_eq!(actor.id, "user-123");
        assert_eq!(actor.actor_type, "applicant");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("User request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "User request");
    }

    #[test]
    fn test_action_creation_requires_name() {
        let action: Action = Action::new(String::from("SubmitApplication"), None);

        assert_eq!(action.name, "SubmitApplication");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("SubmitApplication"),
            Some(String::from("Application for the writing workshop")),
        );

        assert_eq!(action.name, "SubmitApplication");
        assert_eq!(
            action.details,
            Some(String::from("Application for the writing workshop"))
        );
    }

    #[test]
    fn test_actor_equality() {
        let actor1: Actor = Actor::new(String::from("user-123"), String::from("staff"));
        let actor2: Actor = Actor::new(String::from("user-123"), String::from("staff"));
        let actor3: Actor = Actor::new(String::from("user-456"), String::from("staff"));

        assert_eq!(actor1, actor2);
        assert_ne!(actor1, actor3);
    }

    #[test]
    fn test_audit_event_equality() {
        let actor: Actor = Actor::new(String::from("user-123"), String::from("staff"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("User request"));
        let action: Action = Action::new(String::from("ReviewApplication"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("status=submitted"));
        let after: StateSnapshot = StateSnapshot::new(String::from("status=selected"));

        let event1: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            Some(7),
        );

        let event2: AuditEvent = AuditEvent::new(actor, cause, action, before, after, Some(7));

        assert_eq!(event1, event2);
    }

    #[test]
    fn test_audit_event_without_program_scope() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-1"), String::from("Program creation")),
            Action::new(String::from("CreateProgram"), None),
            StateSnapshot::new(String::from("programs_count=0")),
            StateSnapshot::new(String::from("programs_count=1")),
            None,
        );

        assert_eq!(event.program_id, None);
    }
}
