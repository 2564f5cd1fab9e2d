// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversions to and from domain types.
//!
//! Timestamps are stored as RFC 3339 UTC strings; JSON columns hold the
//! serialized payloads verbatim. Stored program statuses are normalized
//! here via `ProgramStatus::normalize`, which is the single place legacy
//! scheme values are interpreted.

use crate::diesel_schema::{applications, audit_events, programs, selections};
use crate::error::PersistenceError;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use maeul_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use maeul_domain::{
    Application, ApplicationStatus, Program, ProgramSchedule, ProgramStatus, Selection,
};
use std::str::FromStr;

/// Parses a stored RFC 3339 timestamp.
///
/// # Errors
///
/// Returns a serialization error if the string is not valid RFC 3339.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            PersistenceError::SerializationError(format!("invalid timestamp '{value}': {e}"))
        })
}

fn parse_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, PersistenceError> {
    value.map(parse_timestamp).transpose()
}

fn parse_json(value: &str) -> Result<serde_json::Value, PersistenceError> {
    serde_json::from_str(value)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid JSON column: {e}")))
}

/// A row from the `programs` table.
#[derive(Debug, Clone, Queryable)]
pub struct ProgramRow {
    pub program_id: i64,
    pub title: String,
    pub description: String,
    pub summary: Option<String>,
    pub organizer_id: i64,
    pub status: String,
    pub apply_start: String,
    pub apply_end: String,
    pub program_start: Option<String>,
    pub program_end: Option<String>,
    pub max_participants: Option<i64>,
    pub fee: i64,
    pub revenue: i64,
    pub application_form: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ProgramRow {
    /// Converts this row into the domain `Program`.
    ///
    /// Legacy status strings normalize onto the canonical enum here.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a timestamp, status, or JSON
    /// column cannot be interpreted.
    pub fn into_domain(self) -> Result<Program, PersistenceError> {
        let status = ProgramStatus::normalize(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let schedule = ProgramSchedule::new(
            parse_timestamp(&self.apply_start)?,
            parse_timestamp(&self.apply_end)?,
            parse_optional_timestamp(self.program_start.as_deref())?,
            parse_optional_timestamp(self.program_end.as_deref())?,
        )
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(Program {
            program_id: Some(self.program_id),
            title: self.title,
            description: self.description,
            summary: self.summary,
            organizer_id: self.organizer_id,
            status,
            schedule,
            max_participants: self.max_participants,
            fee: self.fee,
            revenue: self.revenue,
            application_form: parse_json(&self.application_form)?,
            is_active: self.is_active,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Insertable form of a program.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programs)]
pub struct NewProgram {
    pub title: String,
    pub description: String,
    pub summary: Option<String>,
    pub organizer_id: i64,
    pub status: String,
    pub apply_start: String,
    pub apply_end: String,
    pub program_start: Option<String>,
    pub program_end: Option<String>,
    pub max_participants: Option<i64>,
    pub fee: i64,
    pub revenue: i64,
    pub application_form: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl NewProgram {
    /// Builds an insertable row from a domain `Program`.
    #[must_use]
    pub fn from_domain(program: &Program) -> Self {
        Self {
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
            application_form: program.application_form.to_string(),
            is_active: program.is_active,
            created_at: program.created_at.to_rfc3339(),
            updated_at: program.updated_at.to_rfc3339(),
        }
    }
}

/// Partial update of a program's editable fields.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = programs)]
pub struct ProgramChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<Option<String>>,
    pub status: Option<String>,
    pub apply_start: Option<String>,
    pub apply_end: Option<String>,
    pub program_start: Option<Option<String>>,
    pub program_end: Option<Option<String>>,
    pub max_participants: Option<Option<i64>>,
    pub fee: Option<i64>,
    pub updated_at: Option<String>,
}

/// A row from the `applications` table.
#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub program_id: i64,
    pub applicant_id: i64,
    pub payload: String,
    pub status: String,
    pub score: Option<i64>,
    pub notes: Option<String>,
    pub is_payment_received: bool,
    pub payment_received_at: Option<String>,
    pub submitted_at: String,
    pub updated_at: String,
}

impl ApplicationRow {
    /// Converts this row into the domain `Application`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a timestamp, status, or JSON
    /// column cannot be interpreted.
    pub fn into_domain(self) -> Result<Application, PersistenceError> {
        let status = ApplicationStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(Application {
            application_id: Some(self.application_id),
            program_id: self.program_id,
            applicant_id: self.applicant_id,
            payload: parse_json(&self.payload)?,
            status,
            score: self.score,
            notes: self.notes,
            is_payment_received: self.is_payment_received,
            payment_received_at: parse_optional_timestamp(self.payment_received_at.as_deref())?,
            submitted_at: parse_timestamp(&self.submitted_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Insertable form of an application.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplication {
    pub program_id: i64,
    pub applicant_id: i64,
    pub payload: String,
    pub status: String,
    pub score: Option<i64>,
    pub notes: Option<String>,
    pub is_payment_received: bool,
    pub payment_received_at: Option<String>,
    pub submitted_at: String,
    pub updated_at: String,
}

impl NewApplication {
    /// Builds an insertable row from a domain `Application`.
    #[must_use]
    pub fn from_domain(application: &Application) -> Self {
        Self {
            program_id: application.program_id,
            applicant_id: application.applicant_id,
            payload: application.payload.to_string(),
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

/// Partial update of an application's editable fields.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = applications)]
pub struct ApplicationChanges {
    pub payload: Option<String>,
    pub status: Option<String>,
    pub score: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
    pub updated_at: Option<String>,
}

/// A row from the `selections` table.
#[derive(Debug, Clone, Queryable)]
pub struct SelectionRow {
    pub selection_id: i64,
    pub application_id: i64,
    pub selected: bool,
    pub reason: String,
    pub reviewer_id: i64,
    pub reviewed_at: String,
    pub criteria: String,
}

impl SelectionRow {
    /// Converts this row into the domain `Selection`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a timestamp or JSON column cannot
    /// be interpreted.
    pub fn into_domain(self) -> Result<Selection, PersistenceError> {
        Ok(Selection {
            selection_id: Some(self.selection_id),
            application_id: self.application_id,
            selected: self.selected,
            reason: self.reason,
            reviewer_id: self.reviewer_id,
            reviewed_at: parse_timestamp(&self.reviewed_at)?,
            criteria: parse_json(&self.criteria)?,
        })
    }
}

/// Insertable form of a selection.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = selections)]
pub struct NewSelection {
    pub application_id: i64,
    pub selected: bool,
    pub reason: String,
    pub reviewer_id: i64,
    pub reviewed_at: String,
    pub criteria: String,
}

impl NewSelection {
    /// Builds an insertable row from a domain `Selection`.
    #[must_use]
    pub fn from_domain(selection: &Selection) -> Self {
        Self {
            application_id: selection.application_id,
            selected: selection.selected,
            reason: selection.reason.clone(),
            reviewer_id: selection.reviewer_id,
            reviewed_at: selection.reviewed_at.to_rfc3339(),
            criteria: selection.criteria.to_string(),
        }
    }
}

/// Partial update of a selection's fields.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = selections)]
pub struct SelectionChanges {
    pub selected: Option<bool>,
    pub reason: Option<String>,
    pub reviewed_at: Option<String>,
    pub criteria: Option<String>,
}

/// A row from the `audit_events` table.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub program_id: Option<i64>,
    pub created_at: String,
}

impl AuditEventRow {
    /// Converts this row back into an `AuditEvent`.
    #[must_use]
    pub fn into_event(self) -> AuditEvent {
        AuditEvent::new(
            Actor::new(self.actor_id, self.actor_type),
            Cause::new(self.cause_id, self.cause_description),
            Action::new(self.action_name, self.action_details),
            StateSnapshot::new(self.before_snapshot),
            StateSnapshot::new(self.after_snapshot),
            self.program_id,
        )
    }
}

/// Insertable form of an audit event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub program_id: Option<i64>,
    pub created_at: String,
}

impl NewAuditEvent {
    /// Builds an insertable row from an `AuditEvent`.
    #[must_use]
    pub fn from_event(event: &AuditEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action_name: event.action.name.clone(),
            action_details: event.action.details.clone(),
            before_snapshot: event.before.data.clone(),
            after_snapshot: event.after.data.clone(),
            program_id: event.program_id,
            created_at: created_at.to_rfc3339(),
        }
    }
}
