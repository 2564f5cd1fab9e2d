// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a program's application rows.
//!
//! Staff download the applicant roster as a spreadsheet. The export is a
//! read-only consumer of application data; formatting beyond plain CSV is
//! out of scope.

use maeul_persistence::Persistence;
use thiserror::Error;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};

/// Errors specific to CSV serialization.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// The CSV writer rejected a record.
    #[error("CSV serialization failed: {0}")]
    Serialization(#[from] csv::Error),
    /// The finished buffer was not valid UTF-8.
    #[error("CSV buffer was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    /// Flushing the underlying writer failed.
    #[error("CSV writer flush failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Exports a program's applications as CSV.
///
/// The header row is followed by one row per application, oldest first.
///
/// # Arguments
///
/// * `persistence` - The persistence layer to read from
/// * `program_id` - The program whose applications are exported
/// * `actor` - The authenticated actor requesting the export
///
/// # Errors
///
/// Returns an error if the actor lacks staff or reviewer authority, the
/// program does not exist, or serialization fails.
pub fn export_applications_csv(
    persistence: &mut Persistence,
    program_id: i64,
    actor: &AuthenticatedActor,
) -> Result<String, ApiError> {
    AuthorizationService::authorize_list_applications(actor)?;

    // Existence check so a bogus program ID reads as not-found.
    persistence.get_program(program_id).map_err(|e| match e {
        maeul_persistence::PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Program"),
            message: format!("Program {program_id} does not exist"),
        },
        other => translate_persistence_error(other),
    })?;

    let applications = persistence
        .list_applications_for_program(program_id)
        .map_err(translate_persistence_error)?;

    let result: Result<String, CsvExportError> = (|| {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "application_id",
            "applicant_id",
            "status",
            "score",
            "notes",
            "is_payment_received",
            "payment_received_at",
            "submitted_at",
        ])?;

        for application in &applications {
            writer.write_record([
                application
                    .application_id
                    .unwrap_or_default()
                    .to_string()
                    .as_str(),
                application.applicant_id.to_string().as_str(),
                application.status.as_str(),
                application
                    .score
                    .map(|s| s.to_string())
                    .unwrap_or_default()
                    .as_str(),
                application.notes.as_deref().unwrap_or_default(),
                if application.is_payment_received {
                    "true"
                } else {
                    "false"
                },
                application
                    .payment_received_at
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default()
                    .as_str(),
                application.submitted_at.to_rfc3339().as_str(),
            ])?;
        }

        let buffer = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(buffer)?)
    })();

    result.map_err(Into::into)
}
