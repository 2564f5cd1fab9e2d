// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{get_program, set_payment};
use crate::request_response::PaymentRequest;
use crate::tests::helpers::{
    create_test_persistence, seed_application, seed_program, seed_selection, staff, test_cause,
    utc,
};

#[test]
fn test_payment_toggle_scenario() {
    // The full ledger flow: submit in January, select in February,
    // payment on (+fee, stamped), payment off (back to zero, cleared).
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    seed_selection(&mut persistence, application_id, true);

    let on = set_payment(
        &mut persistence,
        application_id,
        PaymentRequest { received: true },
        &staff(),
        test_cause(),
        utc(2025, 2, 3, 14),
    )
    .unwrap();

    assert!(on.is_payment_received);
    assert_eq!(
        on.payment_received_at.as_deref(),
        Some(utc(2025, 2, 3, 14).to_rfc3339().as_str())
    );
    assert_eq!(on.program_revenue, 50_000);

    let off = set_payment(
        &mut persistence,
        application_id,
        PaymentRequest { received: false },
        &staff(),
        test_cause(),
        utc(2025, 2, 4, 9),
    )
    .unwrap();

    assert!(!off.is_payment_received);
    assert_eq!(off.payment_received_at, None);
    assert_eq!(off.program_revenue, 0);
}

#[test]
fn test_payment_requires_selected_status() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);

    let result = set_payment(
        &mut persistence,
        application_id,
        PaymentRequest { received: true },
        &staff(),
        test_cause(),
        utc(2025, 2, 3, 14),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_payment_for_missing_application_is_not_found() {
    let mut persistence = create_test_persistence();
    seed_program(&mut persistence);

    let result = set_payment(
        &mut persistence,
        999,
        PaymentRequest { received: true },
        &staff(),
        test_cause(),
        utc(2025, 2, 3, 14),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_repeated_payment_request_is_a_no_op() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    seed_selection(&mut persistence, application_id, true);

    for _ in 0..2 {
        set_payment(
            &mut persistence,
            application_id,
            PaymentRequest { received: true },
            &staff(),
            test_cause(),
            utc(2025, 2, 3, 14),
        )
        .unwrap();
    }

    // Revenue counted once despite two identical requests.
    let program = get_program(&mut persistence, program_id, utc(2025, 2, 3, 15)).unwrap();
    assert_eq!(program.revenue, 50_000);
}

#[test]
fn test_revenue_accumulates_across_applications() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);

    for applicant_id in [42, 43] {
        let application_id = seed_application(&mut persistence, program_id, applicant_id);
        seed_selection(&mut persistence, application_id, true);
        set_payment(
            &mut persistence,
            application_id,
            PaymentRequest { received: true },
            &staff(),
            test_cause(),
            utc(2025, 2, 3, 14),
        )
        .unwrap();
    }

    let program = get_program(&mut persistence, program_id, utc(2025, 2, 3, 15)).unwrap();
    assert_eq!(program.revenue, 100_000);
}
