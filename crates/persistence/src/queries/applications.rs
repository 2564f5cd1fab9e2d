// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application query operations.

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Fetch an application row by ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
pub fn get_application(
    conn: &mut _,
    application_id: i64,
) -> Result<ApplicationRow, PersistenceError> {
    applications::table
        .filter(applications::application_id.eq(application_id))
        .first::<ApplicationRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Fetch the application a given applicant submitted to a program, if any.
///
/// At most one row can match thanks to the unique constraint.
pub fn find_application_for_applicant(
    conn: &mut _,
    program_id: i64,
    applicant_id: i64,
) -> Result<Option<ApplicationRow>, PersistenceError> {
    applications::table
        .filter(applications::program_id.eq(program_id))
        .filter(applications::applicant_id.eq(applicant_id))
        .first::<ApplicationRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// List all application rows for a program, oldest first.
pub fn list_applications_for_program(
    conn: &mut _,
    program_id: i64,
) -> Result<Vec<ApplicationRow>, PersistenceError> {
    applications::table
        .filter(applications::program_id.eq(program_id))
        .order(applications::application_id.asc())
        .load::<ApplicationRow>(conn)
        .map_err(Into::into)
}

}
