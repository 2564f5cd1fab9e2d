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
    clippy::all
)]

mod auth;
mod csv_export;
mod error;
mod handlers;
mod request_response;
mod status_sync;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use csv_export::{CsvExportError, export_applications_csv};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    create_program, create_selection, delete_program, get_application, get_program,
    list_applications, list_programs, review_application, set_payment, submit_application,
    update_application, update_program, update_selection, withdraw_application,
};
pub use request_response::{
    ApplicationInfo, CreateProgramRequest, CreateSelectionRequest, ListApplicationsResponse,
    ListProgramsResponse, PaymentRequest, PaymentResponse, ProgramInfo, ReviewRequest,
    SelectionInfo, SubmitApplicationRequest, UpdateApplicationRequest, UpdateProgramRequest,
    UpdateSelectionRequest,
};
pub use status_sync::sync_program_status;
