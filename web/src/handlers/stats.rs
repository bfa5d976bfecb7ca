//! Statistics handler.

use crate::error::AppError;
use crate::extractors::Caller;
use crate::state::AppState;
use axum::{Json, extract::State};
use repairdesk_service::StatsReport;
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};

/// Aggregate statistics over the request store. Operator/manager/admin.
///
/// # Endpoint
///
/// ```text
/// GET /stats
/// ```
///
/// # Errors
///
/// 401 for an unresolved caller, 403 outside the permitted roles.
pub async fn get<D, R>(
    State(state): State<AppState<D, R>>,
    Caller(caller): Caller,
) -> Result<Json<StatsReport>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    Ok(Json(state.service.get_statistics(caller).await?))
}
