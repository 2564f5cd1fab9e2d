// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection query operations.

use crate::data_models::SelectionRow;
use crate::diesel_schema::{applications, selections};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Fetch a selection row by ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn get_selection(
    conn: &mut _,
    selection_id: i64,
) -> Result<SelectionRow, PersistenceError> {
    selections::table
        .filter(selections::selection_id.eq(selection_id))
        .first::<SelectionRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Fetch the selection row for an application, if one exists.
pub fn selection_for_application(
    conn: &mut _,
    application_id: i64,
) -> Result<Option<SelectionRow>, PersistenceError> {
    selections::table
        .filter(selections::application_id.eq(application_id))
        .first::<SelectionRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// List all selection rows belonging to a program's applications.
pub fn list_selections_for_program(
    conn: &mut _,
    program_id: i64,
) -> Result<Vec<SelectionRow>, PersistenceError> {
    selections::table
        .inner_join(applications::table)
        .filter(applications::program_id.eq(program_id))
        .select((
            selections::selection_id,
            selections::application_id,
            selections::selected,
            selections::reason,
            selections::reviewer_id,
            selections::reviewed_at,
            selections::criteria,
        ))
        .order(selections::selection_id.asc())
        .load::<SelectionRow>(conn)
        .map_err(Into::into)
}

}
