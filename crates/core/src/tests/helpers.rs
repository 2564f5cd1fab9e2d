// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for core tests.

use crate::State;
use chrono::{DateTime, TimeZone, Utc};
use maeul_audit::{Actor, Cause};
use maeul_domain::{Application, ApplicationStatus, Program, ProgramSchedule, ProgramStatus};

pub fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

/// A program with the standard test window: applications in January 2025,
/// activity through February 2025, 50,000 fee.
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
    program.program_id = Some(1);
    program.status = ProgramStatus::Open;
    program
}

/// A state holding the test program and one persisted application.
pub fn state_with_application(status: ApplicationStatus) -> State {
    let mut state = State::new(test_program());
    let mut application = Application::new(
        1,
        42,
        serde_json::json!({"motivation": "I write"}),
        utc(2025, 1, 15, 12),
    );
    application.application_id = Some(100);
    application.status = status;
    state.applications.push(application);
    state
}

pub fn staff_actor() -> Actor {
    Actor::new(String::from("7"), String::from("staff"))
}

pub fn applicant_actor() -> Actor {
    Actor::new(String::from("42"), String::from("applicant"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test request"))
}
