// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Application, ApplicationStatus, Program, ProgramSchedule, ProgramStatus, Selection};
use chrono::{DateTime, TimeZone, Utc};

fn utc(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
}

fn test_schedule() -> ProgramSchedule {
    ProgramSchedule::new(
        utc(2025, 1, 1),
        utc(2025, 1, 31),
        Some(utc(2025, 2, 1)),
        Some(utc(2025, 2, 28)),
    )
    .unwrap()
}

fn test_program() -> Program {
    Program::new(
        String::from("Writing Workshop"),
        String::from("An eight-week community writing workshop."),
        Some(String::from("Weekly writing workshop")),
        11,
        test_schedule(),
        Some(20),
        50_000,
        serde_json::json!({"fields": [{"name": "motivation", "type": "text"}]}),
        utc(2024, 12, 1),
    )
}

#[test]
fn test_schedule_rejects_inverted_apply_window() {
    let result = ProgramSchedule::new(utc(2025, 1, 31), utc(2025, 1, 1), None, None);
    assert!(result.is_err());
}

#[test]
fn test_schedule_rejects_inverted_activity_window() {
    let result = ProgramSchedule::new(
        utc(2025, 1, 1),
        utc(2025, 1, 31),
        Some(utc(2025, 2, 28)),
        Some(utc(2025, 2, 1)),
    );
    assert!(result.is_err());
}

#[test]
fn test_schedule_allows_partial_activity_window() {
    let result = ProgramSchedule::new(utc(2025, 1, 1), utc(2025, 1, 31), Some(utc(2025, 2, 1)), None);
    assert!(result.is_ok());
}

#[test]
fn test_schedule_window_membership() {
    let schedule = test_schedule();
    assert!(!schedule.accepts_applications_at(utc(2024, 12, 25)));
    assert!(schedule.accepts_applications_at(utc(2025, 1, 1)));
    assert!(schedule.accepts_applications_at(utc(2025, 1, 15)));
    assert!(schedule.accepts_applications_at(utc(2025, 1, 31)));
    assert!(!schedule.accepts_applications_at(utc(2025, 2, 2)));
}

#[test]
fn test_new_program_defaults() {
    let program = test_program();

    assert_eq!(program.program_id, None);
    assert_eq!(program.status, ProgramStatus::Upcoming);
    assert_eq!(program.revenue, 0);
    assert!(program.is_active);
}

#[test]
fn test_revenue_credit_and_debit() {
    let mut program = test_program();
    program.revenue = program.credit_revenue(50_000);
    assert_eq!(program.revenue, 50_000);

    program.revenue = program.debit_revenue(50_000);
    assert_eq!(program.revenue, 0);
}

#[test]
fn test_revenue_debit_is_floored_at_zero() {
    let mut program = test_program();
    program.revenue = 30_000;
    program.revenue = program.debit_revenue(50_000);
    assert_eq!(program.revenue, 0);

    // Repeated decrements past the floor stay at zero.
    program.revenue = program.debit_revenue(50_000);
    assert_eq!(program.revenue, 0);
}

#[test]
fn test_new_application_defaults() {
    let application = Application::new(
        1,
        42,
        serde_json::json!({"motivation": "I write", "applicant": {"name": "Kim"}}),
        utc(2025, 1, 15),
    );

    assert_eq!(application.application_id, None);
    assert_eq!(application.status, ApplicationStatus::Submitted);
    assert!(!application.is_payment_received);
    assert_eq!(application.payment_received_at, None);
    assert_eq!(application.score, None);
}

#[test]
fn test_selection_implied_status() {
    let selected = Selection::new(
        1,
        true,
        String::from("Strong motivation"),
        7,
        utc(2025, 2, 2),
        serde_json::json!({"score": 92}),
    );
    let rejected = Selection::new(
        2,
        false,
        String::from("Program is full"),
        7,
        utc(2025, 2, 2),
        serde_json::json!({}),
    );

    assert_eq!(selected.implied_status(), ApplicationStatus::Selected);
    assert_eq!(rejected.implied_status(), ApplicationStatus::Rejected);
}
