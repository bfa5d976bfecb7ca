//! Comment handlers.

use crate::error::AppError;
use crate::extractors::Caller;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};
use repairdesk_service::{Comment, RequestId};
use serde::Deserialize;

/// Request to add a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    /// Target request.
    pub request_id: RequestId,
    /// Message body.
    pub message: String,
}

/// Append a comment to a request. Staff only; specialists must be the
/// assigned master.
///
/// # Endpoint
///
/// ```text
/// POST /comments
/// ```
///
/// # Errors
///
/// 403 per the role and assignment rules, 404 for a missing request.
pub async fn add<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    let comment = state
        .service
        .add_comment(caller, request.request_id, &request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// List a request's comments, oldest first.
///
/// # Endpoint
///
/// ```text
/// GET /requests/{id}/comments
/// ```
///
/// # Errors
///
/// 403 for a client reading a foreign request, 404 for a missing request.
pub async fn list<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    Ok(Json(state.service.list_comments(caller, RequestId(id)).await?))
}
