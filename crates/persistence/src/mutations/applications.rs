// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutation operations.
//!
//! The `UNIQUE (program_id, applicant_id)` constraint backstops the
//! duplicate-application check: a concurrent submit that slips past the
//! existence check surfaces here as `PersistenceError::UniqueViolation`.

use crate::backend::PersistenceBackend;
use crate::data_models::{ApplicationChanges, NewApplication};
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert an application row and return its assigned ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn insert_application(
    conn: &mut _,
    record: &NewApplication,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(applications::table)
        .values(record)
        .execute(conn)?;
    PersistenceBackend::get_last_insert_rowid(conn)
}

}

backend_fn! {

/// Apply a partial update to an application row.
pub fn update_application(
    conn: &mut _,
    application_id: i64,
    changes: &ApplicationChanges,
) -> Result<(), PersistenceError> {
    diesel::update(applications::table.filter(applications::application_id.eq(application_id)))
        .set(changes)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Persist a lifecycle status change on an application row.
pub fn set_application_status(
    conn: &mut _,
    application_id: i64,
    status: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(applications::table.filter(applications::application_id.eq(application_id)))
        .set((
            applications::status.eq(status),
            applications::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Persist the payment-received flag and timestamp.
///
/// The matching revenue adjustment runs in the same transaction; see
/// `Persistence::set_payment_received`.
pub fn set_payment_state(
    conn: &mut _,
    application_id: i64,
    received: bool,
    received_at: Option<String>,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(applications::table.filter(applications::application_id.eq(application_id)))
        .set((
            applications::is_payment_received.eq(received),
            applications::payment_received_at.eq(received_at),
            applications::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
    Ok(())
}

}
