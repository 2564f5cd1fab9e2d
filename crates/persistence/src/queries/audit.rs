// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event query operations.

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Fetch an audit event row by ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn get_audit_event(
    conn: &mut _,
    event_id: i64,
) -> Result<AuditEventRow, PersistenceError> {
    audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first::<AuditEventRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// List the audit timeline for a program, oldest first.
pub fn list_audit_events_for_program(
    conn: &mut _,
    program_id: i64,
) -> Result<Vec<AuditEventRow>, PersistenceError> {
    audit_events::table
        .filter(audit_events::program_id.eq(program_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)
        .map_err(Into::into)
}

}
