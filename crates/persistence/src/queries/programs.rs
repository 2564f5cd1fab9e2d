// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program query operations.

use crate::data_models::ProgramRow;
use crate::diesel_schema::programs;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Fetch a program row by ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn get_program(
    conn: &mut _,
    program_id: i64,
) -> Result<ProgramRow, PersistenceError> {
    programs::table
        .filter(programs::program_id.eq(program_id))
        .first::<ProgramRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// List program rows, newest first.
///
/// Soft-deleted rows are excluded unless `include_inactive` is set.
pub fn list_programs(
    conn: &mut _,
    include_inactive: bool,
) -> Result<Vec<ProgramRow>, PersistenceError> {
    let mut query = programs::table.into_boxed();
    if !include_inactive {
        query = query.filter(programs::is_active.eq(true));
    }
    query
        .order(programs::program_id.desc())
        .load::<ProgramRow>(conn)
        .map_err(Into::into)
}

}
