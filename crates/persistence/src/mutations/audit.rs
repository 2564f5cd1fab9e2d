// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert an audit event row and return its assigned event ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn insert_audit_event(
    conn: &mut _,
    record: &NewAuditEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(audit_events::table)
        .values(record)
        .execute(conn)?;
    PersistenceBackend::get_last_insert_rowid(conn)
}

}
