// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization types and services.
//!
//! Authentication itself is an external collaborator: the surrounding
//! middleware verifies identity and hands each request an actor ID and
//! role. This module decides what that actor may do.

use maeul_audit::Actor;

use crate::error::ApiError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A resident applying to programs. May submit, edit (while
    /// submitted), view, and withdraw their own applications.
    Applicant,
    /// A program organizer. May create programs and edit or archive the
    /// programs they own.
    Organizer,
    /// Municipal staff. May edit any application, record review
    /// decisions, and manage payment state.
    Staff,
    /// A selection-committee reviewer. May create and update selection
    /// records.
    Reviewer,
    /// An administrator with both staff and reviewer authority.
    Admin,
    /// A system operator with unrestricted authority.
    Operator,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Organizer => "organizer",
            Self::Staff => "staff",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "applicant" => Ok(Self::Applicant),
            "organizer" => Ok(Self::Organizer),
            "staff" => Ok(Self::Staff),
            "reviewer" => Ok(Self::Reviewer),
            "admin" => Ok(Self::Admin),
            "operator" => Ok(Self::Operator),
            _ => Err(ApiError::InvalidInput {
                field: String::from("actor_role"),
                message: format!("Unknown role: '{s}'"),
            }),
        }
    }

    /// Whether this role carries staff authority over applications
    /// (edit any, review, payment).
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Staff | Self::Admin | Self::Operator)
    }

    /// Whether this role may create and update selection records.
    #[must_use]
    pub const fn is_reviewer(&self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin | Self::Operator)
    }

    /// Whether this role may create programs.
    #[must_use]
    pub const fn is_organizer(&self) -> bool {
        matches!(self, Self::Organizer | Self::Admin | Self::Operator)
    }
}

/// An authenticated actor with an associated role.
///
/// This represents a user whose identity has already been verified by the
/// authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user ID of this actor.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The user ID of this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.to_string(), self.role.as_str().to_string())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role (and, where relevant,
/// ownership).
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may create a program.
    ///
    /// Organizer, admin, and operator actors may create programs.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks organizer authority.
    pub fn authorize_create_program(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_organizer() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("create_program"),
                required_role: String::from("Organizer, Admin, or Operator"),
            })
        }
    }

    /// Checks if an actor may edit or archive a program.
    ///
    /// The owning organizer may edit their own program; staff roles may
    /// edit any program.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `organizer_id` - The program's owning organizer
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the owner nor staff.
    pub fn authorize_manage_program(
        actor: &AuthenticatedActor,
        organizer_id: i64,
    ) -> Result<(), ApiError> {
        if actor.role.is_staff() || (actor.role == Role::Organizer && actor.id == organizer_id) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("manage_program"),
                required_role: String::from("owning Organizer, Staff, Admin, or Operator"),
            })
        }
    }

    /// Checks if an actor may submit an application.
    ///
    /// Only applicants submit applications, and only for themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an applicant.
    pub fn authorize_submit_application(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role == Role::Applicant {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("submit_application"),
                required_role: String::from("Applicant"),
            })
        }
    }

    /// Checks if an actor may record a review decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks staff authority.
    pub fn authorize_review(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_staff() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("review_application"),
                required_role: String::from("Staff, Admin, or Operator"),
            })
        }
    }

    /// Checks if an actor may change payment state.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks staff authority.
    pub fn authorize_payment(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_staff() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("set_payment"),
                required_role: String::from("Staff, Admin, or Operator"),
            })
        }
    }

    /// Checks if an actor may create or update selection records.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks reviewer authority.
    pub fn authorize_selection(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_reviewer() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("manage_selection"),
                required_role: String::from("Reviewer, Admin, or Operator"),
            })
        }
    }

    /// Checks if an actor may list or export a program's applications.
    ///
    /// Reviewers need the listing to work through a program's candidates,
    /// so reviewer authority is accepted alongside staff authority.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks staff or reviewer authority.
    pub fn authorize_list_applications(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_staff() || actor.role.is_reviewer() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("list_applications"),
                required_role: String::from("Staff, Reviewer, Admin, or Operator"),
            })
        }
    }
}
