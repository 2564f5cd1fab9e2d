// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_persistence, seed_application, seed_program, utc};

#[test]
fn test_payment_credit_updates_flag_and_revenue() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    let received_at = utc(2025, 2, 3, 14);

    persistence
        .set_payment_received(
            application_id,
            program_id,
            true,
            Some(received_at.to_rfc3339()),
            50_000,
            &received_at.to_rfc3339(),
        )
        .unwrap();

    let application = persistence.get_application(application_id).unwrap();
    assert!(application.is_payment_received);
    assert_eq!(application.payment_received_at, Some(received_at));

    let program = persistence.get_program(program_id).unwrap();
    assert_eq!(program.revenue, 50_000);
}

#[test]
fn test_payment_reversal_clears_stamp_and_debits() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);
    let received_at = utc(2025, 2, 3, 14);

    persistence
        .set_payment_received(
            application_id,
            program_id,
            true,
            Some(received_at.to_rfc3339()),
            50_000,
            &received_at.to_rfc3339(),
        )
        .unwrap();
    persistence
        .set_payment_received(
            application_id,
            program_id,
            false,
            None,
            -50_000,
            &utc(2025, 2, 4, 9).to_rfc3339(),
        )
        .unwrap();

    let application = persistence.get_application(application_id).unwrap();
    assert!(!application.is_payment_received);
    assert_eq!(application.payment_received_at, None);

    let program = persistence.get_program(program_id).unwrap();
    assert_eq!(program.revenue, 0);
}

#[test]
fn test_revenue_is_floored_at_zero() {
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let application_id = seed_application(&mut persistence, program_id, 42);

    persistence
        .set_payment_received(
            application_id,
            program_id,
            true,
            Some(utc(2025, 2, 3, 14).to_rfc3339()),
            30_000,
            &utc(2025, 2, 3, 14).to_rfc3339(),
        )
        .unwrap();

    // A larger debit than was ever credited (the fee was edited upward
    // between the toggles) clamps at zero instead of going negative.
    persistence
        .set_payment_received(
            application_id,
            program_id,
            false,
            None,
            -80_000,
            &utc(2025, 2, 4, 9).to_rfc3339(),
        )
        .unwrap();

    let program = persistence.get_program(program_id).unwrap();
    assert_eq!(program.revenue, 0);
}

#[test]
fn test_concurrent_style_credits_accumulate() {
    // Two selected applications paying into the same program: the
    // in-database increments accumulate without lost updates.
    let mut persistence = create_test_persistence();
    let program_id = seed_program(&mut persistence);
    let first = seed_application(&mut persistence, program_id, 42);
    let second = seed_application(&mut persistence, program_id, 43);

    for application_id in [first, second] {
        persistence
            .set_payment_received(
                application_id,
                program_id,
                true,
                Some(utc(2025, 2, 3, 14).to_rfc3339()),
                50_000,
                &utc(2025, 2, 3, 14).to_rfc3339(),
            )
            .unwrap();
    }

    let program = persistence.get_program(program_id).unwrap();
    assert_eq!(program.revenue, 100_000);
}
