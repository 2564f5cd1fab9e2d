// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status tracking and transition logic.
//!
//! This module defines application status states and valid transitions.
//! Selected and rejected are terminal: once a decision is recorded, the
//! application can neither be withdrawn nor re-reviewed without an
//! explicit selection update.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application status states tracking progress from submission to decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted by the applicant; not yet looked at.
    Submitted,
    /// A reviewer has started working on the application.
    UnderReview,
    /// Accepted into the program.
    Selected,
    /// Not accepted into the program.
    Rejected,
    /// Withdrawn by the applicant before a decision.
    Withdrawn,
}

impl ApplicationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "selected" => Ok(Self::Selected),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::InvalidApplicationStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (a recorded decision).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Selected | Self::Rejected)
    }

    /// Returns true if the applicant may still withdraw.
    #[must_use]
    pub const fn can_withdraw(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }

    /// Returns true if the applicant may still edit their own submission.
    ///
    /// Staff roles are not bound by this; they may edit at any time.
    #[must_use]
    pub const fn applicant_editable(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Terminal decisions never transition through the lifecycle; only a
        // selection update may revise them.
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from a recorded decision".to_string(),
            });
        }

        let valid = match self {
            Self::Submitted => matches!(
                new_status,
                Self::UnderReview | Self::Selected | Self::Rejected | Self::Withdrawn
            ),
            Self::UnderReview => {
                matches!(new_status, Self::Selected | Self::Rejected | Self::Withdrawn)
            }
            // A reviewer may still record a decision on a withdrawn
            // application; the review guard only blocks terminal states.
            Self::Withdrawn => matches!(new_status, Self::Selected | Self::Rejected),
            Self::Selected | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by application lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Selected,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ];

        for status in statuses {
            let s = status.as_str();
            match ApplicationStatus::from_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = ApplicationStatus::from_str("pending");
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ApplicationStatus::Submitted.is_terminal());
        assert!(!ApplicationStatus::UnderReview.is_terminal());
        assert!(ApplicationStatus::Selected.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!ApplicationStatus::Withdrawn.is_terminal());
    }

    #[test]
    fn test_withdrawable_states() {
        assert!(ApplicationStatus::Submitted.can_withdraw());
        assert!(ApplicationStatus::UnderReview.can_withdraw());
        assert!(!ApplicationStatus::Selected.can_withdraw());
        assert!(!ApplicationStatus::Rejected.can_withdraw());
        assert!(!ApplicationStatus::Withdrawn.can_withdraw());
    }

    #[test]
    fn test_valid_transitions_from_submitted() {
        let current = ApplicationStatus::Submitted;

        assert!(
            current
                .validate_transition(ApplicationStatus::UnderReview)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Selected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Rejected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Withdrawn)
                .is_ok()
        );
    }

    #[test]
    fn test_valid_transitions_from_under_review() {
        let current = ApplicationStatus::UnderReview;

        assert!(
            current
                .validate_transition(ApplicationStatus::Selected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Rejected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Withdrawn)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Submitted)
                .is_err()
        );
    }

    #[test]
    fn test_withdrawn_may_still_receive_a_decision() {
        let current = ApplicationStatus::Withdrawn;

        assert!(
            current
                .validate_transition(ApplicationStatus::Selected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::Rejected)
                .is_ok()
        );
        assert!(
            current
                .validate_transition(ApplicationStatus::UnderReview)
                .is_err()
        );
    }

    #[test]
    fn test_no_transitions_from_terminal_states() {
        let terminal_states = vec![ApplicationStatus::Selected, ApplicationStatus::Rejected];

        for terminal in terminal_states {
            assert!(
                terminal
                    .validate_transition(ApplicationStatus::Submitted)
                    .is_err()
            );
            assert!(
                terminal
                    .validate_transition(ApplicationStatus::UnderReview)
                    .is_err()
            );
            assert!(
                terminal
                    .validate_transition(ApplicationStatus::Withdrawn)
                    .is_err()
            );
        }
    }
}
