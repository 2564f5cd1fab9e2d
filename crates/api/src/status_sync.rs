// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program status synchronization.
//!
//! Every program read path runs the synchronizer: the date-driven status
//! is recomputed and, when it differs from the stored value, the row is
//! updated before the program is returned. Reads may therefore incur a
//! write; callers must not assume read-only semantics.
//!
//! ## Failure handling
//!
//! If the persistence write fails, the freshly computed status is still
//! applied to the returned value and a warning is logged. Read
//! availability is prioritized over cached-status freshness.

use chrono::{DateTime, Utc};
use maeul_domain::{Program, calculate_program_status};
use maeul_persistence::Persistence;
use tracing::warn;

/// Synchronizes a program's cached status with its date-driven value.
///
/// # Arguments
///
/// * `persistence` - The persistence layer to write through
/// * `program` - The program as loaded from storage
/// * `now` - The current instant
///
/// # Returns
///
/// The program carrying the status that holds at `now`. The stored row has
/// been updated when it differed, unless the write failed (logged).
#[must_use]
pub fn sync_program_status(
    persistence: &mut Persistence,
    mut program: Program,
    now: DateTime<Utc>,
) -> Program {
    let computed = calculate_program_status(&program.schedule, program.status, now);
    if computed == program.status {
        return program;
    }

    if let Some(program_id) = program.program_id {
        match persistence.set_program_status(program_id, computed.as_str(), &now.to_rfc3339()) {
            Ok(()) => {
                program.updated_at = now;
            }
            Err(e) => {
                warn!(
                    program_id,
                    computed = computed.as_str(),
                    error = %e,
                    "failed to persist recomputed program status; returning computed value without persisting"
                );
            }
        }
    }
    program.status = computed;
    program
}
