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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use maeul_api::{
    ApiError, ApplicationInfo, AuthenticatedActor, CreateProgramRequest, CreateSelectionRequest,
    PaymentRequest, ProgramInfo, ReviewRequest, Role, SelectionInfo, SubmitApplicationRequest,
    UpdateApplicationRequest, UpdateProgramRequest, UpdateSelectionRequest, create_program,
    create_selection, delete_program, export_applications_csv, get_application, get_program,
    list_applications, list_programs, review_application, set_payment, submit_application,
    update_application, update_program, update_selection, withdraw_application,
};
use maeul_audit::Cause;
use maeul_persistence::{Persistence, PersistenceError};

/// Maeul Server - HTTP server for the Maeul program management backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for all rows.
    persistence: Arc<Mutex<Persistence>>,
}

/// Actor and cause fields carried by every mutating request.
///
/// Authentication is an external collaborator; the verified identity and
/// role arrive with the request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The acting user's ID.
    actor_id: i64,
    /// The acting user's role.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// Actor identification for read endpoints, via query parameters.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The acting user's ID.
    actor_id: i64,
    /// The acting user's role.
    actor_role: String,
}

/// API request for creating a program.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProgramApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// Program title.
    title: String,
    /// Long description.
    description: String,
    /// Short listing summary.
    summary: Option<String>,
    /// Application window open (RFC 3339).
    apply_start: String,
    /// Application window close (RFC 3339).
    apply_end: String,
    /// Activity start (RFC 3339, optional).
    program_start: Option<String>,
    /// Activity end (RFC 3339, optional).
    program_end: Option<String>,
    /// Maximum participant count (optional).
    max_participants: Option<i64>,
    /// Participation fee in currency units.
    fee: i64,
    /// The structured application form schema.
    application_form: serde_json::Value,
}

/// API request for updating a program.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateProgramApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    title: Option<String>,
    description: Option<String>,
    #[serde(default, with = "serde_double_option")]
    summary: Option<Option<String>>,
    status: Option<String>,
    apply_start: Option<String>,
    apply_end: Option<String>,
    #[serde(default, with = "serde_double_option")]
    program_start: Option<Option<String>>,
    #[serde(default, with = "serde_double_option")]
    program_end: Option<Option<String>>,
    #[serde(default, with = "serde_double_option")]
    max_participants: Option<Option<i64>>,
    fee: Option<i64>,
}

/// Serde helper for distinguishing "absent" from "explicitly null".
mod serde_double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// API request for deleting a program.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeleteProgramApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
}

/// API request for submitting an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitApplicationApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The program applied to.
    program_id: i64,
    /// The form answers.
    payload: serde_json::Value,
    /// Applicant display name for the identity snapshot.
    applicant_name: Option<String>,
    /// Applicant contact for the identity snapshot.
    applicant_email: Option<String>,
}

/// API request for updating an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateApplicationApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    payload: Option<serde_json::Value>,
    status: Option<String>,
    score: Option<i64>,
    notes: Option<String>,
}

/// API request for withdrawing an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WithdrawApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
}

/// API request for reviewing an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReviewApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The decision: `"selected"` or `"rejected"`.
    decision: String,
    /// Reviewer notes, if any.
    notes: Option<String>,
}

/// API request for changing payment state.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PaymentApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The requested payment-received flag value.
    received: bool,
}

/// API request for creating a selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSelectionApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The application the decision belongs to.
    application_id: i64,
    /// The decision.
    selected: bool,
    /// Free-text reason.
    reason: String,
    /// Free-form decision criteria.
    criteria: serde_json::Value,
}

/// API request for updating a selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateSelectionApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    selected: Option<bool>,
    reason: Option<String>,
    criteria: Option<serde_json::Value>,
}

/// Serializable program representation for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProgramResponse {
    program_id: i64,
    title: String,
    description: String,
    summary: Option<String>,
    organizer_id: i64,
    status: String,
    apply_start: String,
    apply_end: String,
    program_start: Option<String>,
    program_end: Option<String>,
    max_participants: Option<i64>,
    fee: i64,
    revenue: i64,
    application_form: serde_json::Value,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl From<ProgramInfo> for ProgramResponse {
    fn from(info: ProgramInfo) -> Self {
        Self {
            program_id: info.program_id,
            title: info.title,
            description: info.description,
            summary: info.summary,
            organizer_id: info.organizer_id,
            status: info.status,
            apply_start: info.apply_start,
            apply_end: info.apply_end,
            program_start: info.program_start,
            program_end: info.program_end,
            max_participants: info.max_participants,
            fee: info.fee,
            revenue: info.revenue,
            application_form: info.application_form,
            is_active: info.is_active,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// Serializable application representation for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApplicationResponse {
    application_id: i64,
    program_id: i64,
    applicant_id: i64,
    payload: serde_json::Value,
    status: String,
    score: Option<i64>,
    notes: Option<String>,
    is_payment_received: bool,
    payment_received_at: Option<String>,
    submitted_at: String,
    updated_at: String,
}

impl From<ApplicationInfo> for ApplicationResponse {
    fn from(info: ApplicationInfo) -> Self {
        Self {
            application_id: info.application_id,
            program_id: info.program_id,
            applicant_id: info.applicant_id,
            payload: info.payload,
            status: info.status,
            score: info.score,
            notes: info.notes,
            is_payment_received: info.is_payment_received,
            payment_received_at: info.payment_received_at,
            submitted_at: info.submitted_at,
            updated_at: info.updated_at,
        }
    }
}

/// Serializable selection representation for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SelectionResponse {
    selection_id: i64,
    application_id: i64,
    selected: bool,
    reason: String,
    reviewer_id: i64,
    reviewed_at: String,
    criteria: serde_json::Value,
    application_status: String,
}

impl From<SelectionInfo> for SelectionResponse {
    fn from(info: SelectionInfo) -> Self {
        Self {
            selection_id: info.selection_id,
            application_id: info.application_id,
            selected: info.selected,
            reason: info.reason,
            reviewer_id: info.reviewer_id,
            reviewed_at: info.reviewed_at,
            criteria: info.criteria,
            application_status: info.application_status,
        }
    }
}

/// Serializable payment-change response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaymentChangeResponse {
    application_id: i64,
    is_payment_received: bool,
    payment_received_at: Option<String>,
    program_revenue: i64,
}

/// List wrapper for program listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProgramListResponse {
    programs: Vec<ProgramResponse>,
}

/// List wrapper for application listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApplicationListResponse {
    program_id: i64,
    applications: Vec<ApplicationResponse>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Builds the authenticated actor from request-supplied fields.
fn parse_actor(actor_id: i64, role_str: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = Role::parse(role_str).map_err(HttpError::from)?;
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Builds the cause from request-supplied fields.
fn parse_cause(fields: &ActorFields) -> Cause {
    Cause::new(fields.cause_id.clone(), fields.cause_description.clone())
}

/// Handler for POST `/programs`.
async fn handle_create_program(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateProgramApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = create_program(
        &mut persistence,
        CreateProgramRequest {
            title: request.title,
            description: request.description,
            summary: request.summary,
            apply_start: request.apply_start,
            apply_end: request.apply_end,
            program_start: request.program_start,
            program_end: request.program_end,
            max_participants: request.max_participants,
            fee: request.fee,
            application_form: request.application_form,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok((StatusCode::CREATED, Json(ProgramResponse::from(info))))
}

/// Handler for GET `/programs`.
///
/// Runs the status synchronizer for every returned row, so this read may
/// write.
async fn handle_list_programs(
    AxumState(state): AxumState<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let listing = list_programs(&mut persistence, Utc::now())?;

    Ok(Json(ProgramListResponse {
        programs: listing.programs.into_iter().map(Into::into).collect(),
    }))
}

/// Handler for GET `/programs/{program_id}`.
///
/// Runs the status synchronizer, so this read may write.
async fn handle_get_program(
    AxumState(state): AxumState<AppState>,
    Path(program_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let info = get_program(&mut persistence, program_id, Utc::now())?;

    Ok(Json(ProgramResponse::from(info)))
}

/// Handler for PATCH `/programs/{program_id}`.
async fn handle_update_program(
    AxumState(state): AxumState<AppState>,
    Path(program_id): Path<i64>,
    Json(request): Json<UpdateProgramApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = update_program(
        &mut persistence,
        program_id,
        UpdateProgramRequest {
            title: request.title,
            description: request.description,
            summary: request.summary,
            status: request.status,
            apply_start: request.apply_start,
            apply_end: request.apply_end,
            program_start: request.program_start,
            program_end: request.program_end,
            max_participants: request.max_participants,
            fee: request.fee,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok(Json(ProgramResponse::from(info)))
}

/// Handler for DELETE `/programs/{program_id}` (soft delete).
async fn handle_delete_program(
    AxumState(state): AxumState<AppState>,
    Path(program_id): Path<i64>,
    Json(request): Json<DeleteProgramApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    delete_program(&mut persistence, program_id, &actor, cause, Utc::now())?;

    Ok(StatusCode::OK)
}

/// Handler for GET `/programs/{program_id}/applications`.
async fn handle_list_applications(
    AxumState(state): AxumState<AppState>,
    Path(program_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(query.actor_id, &query.actor_role)?;

    let mut persistence = state.persistence.lock().await;
    let listing = list_applications(&mut persistence, program_id, &actor)?;

    Ok(Json(ApplicationListResponse {
        program_id: listing.program_id,
        applications: listing.applications.into_iter().map(Into::into).collect(),
    }))
}

/// Handler for GET `/programs/{program_id}/applications/export`.
async fn handle_export_applications(
    AxumState(state): AxumState<AppState>,
    Path(program_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(query.actor_id, &query.actor_role)?;

    let mut persistence = state.persistence.lock().await;
    let csv = export_applications_csv(&mut persistence, program_id, &actor)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    ))
}

/// Handler for POST `/applications`.
async fn handle_submit_application(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubmitApplicationApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = submit_application(
        &mut persistence,
        SubmitApplicationRequest {
            program_id: request.program_id,
            payload: request.payload,
            applicant_name: request.applicant_name,
            applicant_email: request.applicant_email,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(info))))
}

/// Handler for GET `/applications/{application_id}`.
async fn handle_get_application(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(query.actor_id, &query.actor_role)?;

    let mut persistence = state.persistence.lock().await;
    let info = get_application(&mut persistence, application_id, &actor)?;

    Ok(Json(ApplicationResponse::from(info)))
}

/// Handler for PATCH `/applications/{application_id}`.
async fn handle_update_application(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<UpdateApplicationApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = update_application(
        &mut persistence,
        application_id,
        UpdateApplicationRequest {
            payload: request.payload,
            status: request.status,
            score: request.score,
            notes: request.notes,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok(Json(ApplicationResponse::from(info)))
}

/// Handler for PATCH `/applications/{application_id}/withdraw`.
async fn handle_withdraw_application(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<WithdrawApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = withdraw_application(&mut persistence, application_id, &actor, cause, Utc::now())?;

    Ok(Json(ApplicationResponse::from(info)))
}

/// Handler for PATCH `/applications/{application_id}/review`.
async fn handle_review_application(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<ReviewApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = review_application(
        &mut persistence,
        application_id,
        ReviewRequest {
            decision: request.decision,
            notes: request.notes,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok(Json(ApplicationResponse::from(info)))
}

/// Handler for PATCH `/applications/{application_id}/payment`.
async fn handle_set_payment(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<PaymentApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let response = set_payment(
        &mut persistence,
        application_id,
        PaymentRequest {
            received: request.received,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok(Json(PaymentChangeResponse {
        application_id: response.application_id,
        is_payment_received: response.is_payment_received,
        payment_received_at: response.payment_received_at,
        program_revenue: response.program_revenue,
    }))
}

/// Handler for POST `/selections`.
async fn handle_create_selection(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateSelectionApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = create_selection(
        &mut persistence,
        CreateSelectionRequest {
            application_id: request.application_id,
            selected: request.selected,
            reason: request.reason,
            criteria: request.criteria,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok((StatusCode::CREATED, Json(SelectionResponse::from(info))))
}

/// Handler for PATCH `/selections/{selection_id}`.
async fn handle_update_selection(
    AxumState(state): AxumState<AppState>,
    Path(selection_id): Path<i64>,
    Json(request): Json<UpdateSelectionApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = parse_actor(request.actor.actor_id, &request.actor.actor_role)?;
    let cause = parse_cause(&request.actor);

    let mut persistence = state.persistence.lock().await;
    let info = update_selection(
        &mut persistence,
        selection_id,
        UpdateSelectionRequest {
            selected: request.selected,
            reason: request.reason,
            criteria: request.criteria,
        },
        &actor,
        cause,
        Utc::now(),
    )?;

    Ok(Json(SelectionResponse::from(info)))
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/programs", post(handle_create_program))
        .route("/programs", get(handle_list_programs))
        .route("/programs/{program_id}", get(handle_get_program))
        .route("/programs/{program_id}", patch(handle_update_program))
        .route("/programs/{program_id}", delete(handle_delete_program))
        .route(
            "/programs/{program_id}/applications",
            get(handle_list_applications),
        )
        .route(
            "/programs/{program_id}/applications/export",
            get(handle_export_applications),
        )
        .route("/applications", post(handle_submit_application))
        .route("/applications/{application_id}", get(handle_get_application))
        .route(
            "/applications/{application_id}",
            patch(handle_update_application),
        )
        .route(
            "/applications/{application_id}/withdraw",
            patch(handle_withdraw_application),
        )
        .route(
            "/applications/{application_id}/review",
            patch(handle_review_application),
        )
        .route(
            "/applications/{application_id}/payment",
            patch(handle_set_payment),
        )
        .route("/selections", post(handle_create_selection))
        .route("/selections/{selection_id}", patch(handle_update_selection))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Maeul Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
