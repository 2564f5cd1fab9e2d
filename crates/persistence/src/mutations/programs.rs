// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewProgram, ProgramChanges};
use crate::diesel_schema::programs;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a program row and return its assigned ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn insert_program(
    conn: &mut _,
    record: &NewProgram,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(programs::table)
        .values(record)
        .execute(conn)?;
    PersistenceBackend::get_last_insert_rowid(conn)
}

}

backend_fn! {

/// Apply a partial update to a program row.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn update_program(
    conn: &mut _,
    program_id: i64,
    changes: &ProgramChanges,
) -> Result<(), PersistenceError> {
    diesel::update(programs::table.filter(programs::program_id.eq(program_id)))
        .set(changes)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Persist a recomputed lifecycle status.
///
/// Used by the status synchronizer on program read paths.
pub fn set_program_status(
    conn: &mut _,
    program_id: i64,
    status: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(programs::table.filter(programs::program_id.eq(program_id)))
        .set((
            programs::status.eq(status),
            programs::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Set the soft-delete flag on a program row.
pub fn set_program_active(
    conn: &mut _,
    program_id: i64,
    active: bool,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(programs::table.filter(programs::program_id.eq(program_id)))
        .set((
            programs::is_active.eq(active),
            programs::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Adjust the cached revenue aggregate in the database.
///
/// The adjustment is issued as an atomic in-database increment so that
/// concurrent payment toggles across applications of the same program
/// cannot lose updates. A second statement clamps the aggregate at zero;
/// the caller runs both inside one transaction.
pub fn adjust_program_revenue(
    conn: &mut _,
    program_id: i64,
    delta: i64,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(programs::table.filter(programs::program_id.eq(program_id)))
        .set((
            programs::revenue.eq(programs::revenue + delta),
            programs::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    diesel::update(
        programs::table
            .filter(programs::program_id.eq(program_id))
            .filter(programs::revenue.lt(0)),
    )
    .set(programs::revenue.eq(0))
    .execute(conn)?;

    Ok(())
}

}
