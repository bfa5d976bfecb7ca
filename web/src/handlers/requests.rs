//! Request handlers: listing, search, creation, updates, deadline
//! extension, and parts replacement.

use crate::error::AppError;
use crate::extractors::{Caller, CorrelationId};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};
use repairdesk_service::{RequestId, RequestPatch, RequestRecord};
use serde::{Deserialize, Serialize};

/// Request to create a repair request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    /// Kind of equipment under repair.
    pub equipment_type: String,
    /// Equipment model.
    pub equipment_model: String,
    /// Free-text problem description.
    pub problem_description: String,
}

/// Response after creating a request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    /// Identifier of the new request.
    pub request_id: RequestId,
    /// Confirmation message.
    pub message: String,
}

/// Query string for request search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Substring to match against equipment type, model, description, or
    /// the request id.
    pub q: String,
}

/// Request to extend a deadline.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendDeadlineRequest {
    /// Target request.
    pub request_id: RequestId,
    /// New extended due date; stored as supplied.
    pub new_date: NaiveDate,
}

/// Request to replace the parts consumed by a request.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPartsRequest {
    /// Target request.
    pub request_id: RequestId,
    /// Comma-separated part names; unknown names are added to the catalog.
    pub parts: String,
}

/// List requests visible to the caller.
///
/// # Endpoint
///
/// ```text
/// GET /requests
/// ```
///
/// # Errors
///
/// 401 when the caller identity does not resolve.
pub async fn list<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
) -> Result<Json<Vec<RequestRecord>>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    Ok(Json(state.service.list_requests(caller).await?))
}

/// Search requests visible to the caller.
///
/// # Endpoint
///
/// ```text
/// GET /requests/search?q=...
/// ```
///
/// # Errors
///
/// 401 when the caller identity does not resolve.
pub async fn search<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RequestRecord>>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    Ok(Json(state.service.search_requests(caller, &params.q).await?))
}

/// Create a repair request.
///
/// # Endpoint
///
/// ```text
/// POST /requests
/// ```
///
/// # Errors
///
/// 401/403 per the role table.
pub async fn create<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    correlation_id: CorrelationId,
    Json(request): Json<CreateRequest>,
) -> Result<(StatusCode, Json<CreateResponse>), AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    tracing::info!(
        correlation_id = %correlation_id.0,
        caller = %caller,
        "creating repair request"
    );

    let request_id = state
        .service
        .create_request(
            caller,
            &request.equipment_type,
            &request.equipment_model,
            &request.problem_description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            request_id,
            message: "request created".to_string(),
        }),
    ))
}

/// Update a request (client or staff path, chosen by the caller's role).
///
/// # Endpoint
///
/// ```text
/// PUT /requests/{id}
/// ```
///
/// # Errors
///
/// 403 for out-of-role payload fields, 404 for a missing request,
/// 400 for an unknown status name.
pub async fn update<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(patch): Json<RequestPatch>,
) -> Result<Json<MessageResponse>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    state
        .service
        .update_request(caller, RequestId(id), patch)
        .await?;
    Ok(Json(MessageResponse::new("request updated")))
}

/// Extend a request's deadline. Manager/admin only.
///
/// # Endpoint
///
/// ```text
/// PUT /requests/extend
/// ```
///
/// # Errors
///
/// 403 outside manager/admin, 404 for a missing request.
pub async fn extend_deadline<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Json(request): Json<ExtendDeadlineRequest>,
) -> Result<Json<MessageResponse>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    state
        .service
        .extend_deadline(caller, request.request_id, request.new_date)
        .await?;
    Ok(Json(MessageResponse::new("deadline extended")))
}

/// Replace the parts consumed by a request.
///
/// # Endpoint
///
/// ```text
/// POST /requests/parts
/// ```
///
/// # Errors
///
/// 403 per the role and assignment rules, 404 for a missing request.
pub async fn set_parts<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Json(request): Json<SetPartsRequest>,
) -> Result<Json<MessageResponse>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    state
        .service
        .set_parts(caller, request.request_id, &request.parts)
        .await?;
    Ok(Json(MessageResponse::new("parts saved")))
}
