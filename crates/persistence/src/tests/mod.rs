// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod payment_tests;
mod selection_tests;

use crate::data_models::{NewApplication, NewProgram};
use crate::Persistence;
use chrono::{DateTime, TimeZone, Utc};
use maeul_domain::{Application, Program, ProgramSchedule, ProgramStatus};

pub fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// The standard test program: applications in January 2025, activity
/// through February, 50,000 fee.
pub fn test_program() -> Program {
    let mut program = Program::new(
        String::from("Writing Workshop"),
        String::from("An eight-week community writing workshop."),
        Some(String::from("Weekly writing workshop")),
        11,
        ProgramSchedule::new(
            utc(2025, 1, 1, 0),
            utc(2025, 1, 31, 23),
            Some(utc(2025, 2, 1, 0)),
            Some(utc(2025, 2, 28, 23)),
        )
        .unwrap(),
        Some(20),
        50_000,
        serde_json::json!({"fields": [{"name": "motivation", "type": "text"}]}),
        utc(2024, 12, 1, 0),
    );
    program.status = ProgramStatus::Open;
    program
}

/// Inserts the standard test program and returns its assigned ID.
pub fn seed_program(persistence: &mut Persistence) -> i64 {
    persistence
        .insert_program(&NewProgram::from_domain(&test_program()))
        .expect("Failed to seed program")
}

/// Inserts an application for the given program and applicant.
pub fn seed_application(persistence: &mut Persistence, program_id: i64, applicant_id: i64) -> i64 {
    let application = Application::new(
        program_id,
        applicant_id,
        serde_json::json!({"motivation": "I write"}),
        utc(2025, 1, 15, 12),
    );
    persistence
        .submit_application(&NewApplication::from_domain(&application))
        .expect("Failed to seed application")
}
