// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Program lifecycle status and its date-driven calculation.
//!
//! A program's status is a derived value cached on the row: it follows from
//! the four stored dates and the current wall-clock time in the declared
//! civil timezone, except for `Archived`, which is operator-set and sticky.
//!
//! ## Invariants
//!
//! - `Archived` never auto-transitions; the calculator returns it unchanged
//! - All date comparisons are wall-clock comparisons in [`CIVIL_TIMEZONE`]
//! - Legacy status strings are normalized exactly once, at the data-access
//!   boundary ([`ProgramStatus::normalize`]), never inside business logic
//!
//! ## Usage
//!
//! This logic is used by:
//! - The status synchronizer (every program list/detail read)
//! - Application submission guards (window checks)

use crate::error::DomainError;
use crate::types::ProgramSchedule;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The civil timezone all program date comparisons are made in.
///
/// Program windows are administered as Korea Standard Time wall-clock
/// instants; rows store UTC and comparisons convert through this zone.
pub const CIVIL_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

/// Program lifecycle status.
///
/// Serialized snake_case for persistence and API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    /// The application window has not opened yet.
    Upcoming,
    /// The application window is open.
    Open,
    /// Applications closed; the program activity is pending or running.
    InProgress,
    /// The program activity has ended.
    Completed,
    /// Operator-archived. Sticky: never recomputed.
    Archived,
}

impl ProgramStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Parses a canonical status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProgramStatus` if the string is not a
    /// canonical status. Legacy strings are rejected here; use
    /// [`Self::normalize`] at the data-access boundary.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidProgramStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Normalizes a stored status string, accepting legacy scheme values.
    ///
    /// Older rows carry the four-state era strings; they map onto the
    /// canonical enum as follows:
    ///
    /// | legacy | canonical |
    /// |---|---|
    /// | `draft` | `upcoming` |
    /// | `open` | `open` |
    /// | `closed` | `in_progress` |
    /// | `ongoing` | `in_progress` |
    /// | `completed` | `completed` |
    /// | `archived` | `archived` |
    ///
    /// This is the only place legacy values are interpreted. The date-driven
    /// calculation remains authoritative for every normalized value except
    /// `archived`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProgramStatus` if the string matches
    /// neither a canonical nor a legacy status.
    pub fn normalize(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Upcoming),
            "closed" | "ongoing" => Ok(Self::InProgress),
            _ => Self::parse_str(s),
        }
    }

    /// Returns true if this status is the sticky terminal value.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl FromStr for ProgramStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calculates the status a program should hold right now.
///
/// # Arguments
///
/// * `schedule` - The program's stored dates
/// * `stored` - The currently stored (normalized) status
/// * `now` - The current instant
///
/// # Returns
///
/// The status that should hold at `now`.
///
/// # Calculation
///
/// Ordered rules, first match wins, all comparisons in [`CIVIL_TIMEZONE`]:
///
/// 1. `Archived` is sticky and returned unchanged
/// 2. before the application window -> `Upcoming`
/// 3. inside the application window -> `Open`
/// 4. after the window, before a set activity start -> `InProgress`
/// 5. inside a fully set activity window -> `InProgress`
/// 6. past a set activity end -> `Completed`
/// 7. activity dates unset -> `InProgress`
#[must_use]
pub fn calculate_program_status(
    schedule: &ProgramSchedule,
    stored: ProgramStatus,
    now: DateTime<Utc>,
) -> ProgramStatus {
    if stored.is_archived() {
        return ProgramStatus::Archived;
    }

    let now = now.with_timezone(&CIVIL_TIMEZONE);
    let apply_start = schedule.apply_start.with_timezone(&CIVIL_TIMEZONE);
    let apply_end = schedule.apply_end.with_timezone(&CIVIL_TIMEZONE);
    let program_start = schedule
        .program_start
        .map(|d| d.with_timezone(&CIVIL_TIMEZONE));
    let program_end = schedule
        .program_end
        .map(|d| d.with_timezone(&CIVIL_TIMEZONE));

    if now < apply_start {
        return ProgramStatus::Upcoming;
    }
    if now <= apply_end {
        return ProgramStatus::Open;
    }

    // The gap between application close and activity start counts as
    // in-progress, not a distinct state.
    if let Some(start) = program_start
        && now < start
    {
        return ProgramStatus::InProgress;
    }
    if let (Some(start), Some(end)) = (program_start, program_end)
        && start <= now
        && now <= end
    {
        return ProgramStatus::InProgress;
    }
    if let Some(end) = program_end
        && now > end
    {
        return ProgramStatus::Completed;
    }

    ProgramStatus::InProgress
}
