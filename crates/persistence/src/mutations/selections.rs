// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection mutation operations.
//!
//! The `UNIQUE (application_id)` constraint backstops the one-selection-
//! per-application invariant at the storage layer.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewSelection, SelectionChanges};
use crate::diesel_schema::selections;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a selection row and return its assigned ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn insert_selection(
    conn: &mut _,
    record: &NewSelection,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(selections::table)
        .values(record)
        .execute(conn)?;
    PersistenceBackend::get_last_insert_rowid(conn)
}

}

backend_fn! {

/// Apply a partial update to a selection row.
pub fn update_selection(
    conn: &mut _,
    selection_id: i64,
    changes: &SelectionChanges,
) -> Result<(), PersistenceError> {
    diesel::update(selections::table.filter(selections::selection_id.eq(selection_id)))
        .set(changes)
        .execute(conn)?;
    Ok(())
}

}
