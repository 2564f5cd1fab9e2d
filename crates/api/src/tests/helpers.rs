// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for API tests.

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers::{create_program, create_selection, submit_application};
use crate::request_response::{CreateProgramRequest, CreateSelectionRequest, SubmitApplicationRequest};
use chrono::{DateTime, TimeZone, Utc};
use maeul_audit::Cause;
use maeul_persistence::Persistence;

pub fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

/// A time inside the standard application window.
pub fn in_window() -> DateTime<Utc> {
    utc(2025, 1, 15, 12)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn applicant(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(id, Role::Applicant)
}

pub fn organizer() -> AuthenticatedActor {
    AuthenticatedActor::new(11, Role::Organizer)
}

pub fn staff() -> AuthenticatedActor {
    AuthenticatedActor::new(7, Role::Staff)
}

pub fn reviewer() -> AuthenticatedActor {
    AuthenticatedActor::new(8, Role::Reviewer)
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test request"))
}

/// The standard create-program request: applications in January 2025,
/// activity through February, 50,000 fee.
pub fn test_program_request() -> CreateProgramRequest {
    CreateProgramRequest {
        title: String::from("Writing Workshop"),
        description: String::from("An eight-week community writing workshop."),
        summary: Some(String::from("Weekly writing workshop")),
        apply_start: utc(2025, 1, 1, 0).to_rfc3339(),
        apply_end: utc(2025, 1, 31, 23).to_rfc3339(),
        program_start: Some(utc(2025, 2, 1, 0).to_rfc3339()),
        program_end: Some(utc(2025, 2, 28, 23).to_rfc3339()),
        max_participants: Some(20),
        fee: 50_000,
        application_form: serde_json::json!({"fields": [{"name": "motivation", "type": "text"}]}),
    }
}

/// Creates the standard program as the organizer, dated before the window
/// opens, and returns its ID.
pub fn seed_program(persistence: &mut Persistence) -> i64 {
    create_program(
        persistence,
        test_program_request(),
        &organizer(),
        test_cause(),
        utc(2024, 12, 1, 0),
    )
    .expect("Failed to seed program")
    .program_id
}

/// Submits an application inside the window and returns its ID.
pub fn seed_application(persistence: &mut Persistence, program_id: i64, applicant_id: i64) -> i64 {
    submit_application(
        persistence,
        SubmitApplicationRequest {
            program_id,
            payload: serde_json::json!({"motivation": "I write"}),
            applicant_name: Some(String::from("Kim Jiwoo")),
            applicant_email: Some(String::from("jiwoo@example.com")),
        },
        &applicant(applicant_id),
        test_cause(),
        in_window(),
    )
    .expect("Failed to seed application")
    .application_id
}

/// Records a selection for an application and returns its ID.
pub fn seed_selection(
    persistence: &mut Persistence,
    application_id: i64,
    selected: bool,
) -> i64 {
    create_selection(
        persistence,
        CreateSelectionRequest {
            application_id,
            selected,
            reason: String::from("Capacity decision"),
            criteria: serde_json::json!({"score": 92}),
        },
        &reviewer(),
        test_cause(),
        utc(2025, 2, 2, 10),
    )
    .expect("Failed to seed selection")
    .selection_id
}
