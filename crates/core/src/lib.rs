// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use maeul_domain::{DomainError, Program};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{State, TransitionResult};

/// Validates that a program can be operated on at all.
///
/// This is a read-only validation that does not create audit events.
///
/// # Arguments
///
/// * `program` - The program to validate
///
/// # Returns
///
/// * `Ok(())` if the program is active
/// * `Err(DomainError::ProgramInactive)` if it has been soft-deleted
///
/// # Errors
///
/// Returns an error if the program has been soft-deleted.
pub fn validate_program_active(program: &Program) -> Result<(), DomainError> {
    if !program.is_active {
        return Err(DomainError::ProgramInactive(
            program.program_id.unwrap_or_default(),
        ));
    }
    Ok(())
}
