//! Account handlers: registration and login.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use repairdesk_service::UserId;
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};
use serde::{Deserialize, Serialize};

/// Request to register a new client account.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Full name.
    pub full_name: String,
    /// Contact phone, optional.
    pub phone: Option<String>,
    /// Desired login; must be unique.
    pub login: String,
    /// Clear-text password; stored only as a salted hash.
    pub password: String,
}

/// Response after successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// Identifier of the new account.
    pub user_id: UserId,
    /// Confirmation message.
    pub message: String,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login.
    pub login: String,
    /// Clear-text password.
    pub password: String,
}

/// Authenticated identity and resolved role.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// User identifier; supply it as `X-User-Id` on later calls.
    pub id: UserId,
    /// Full name.
    pub full_name: String,
    /// Contact phone, if any.
    pub phone: Option<String>,
    /// Resolved role name.
    pub role: String,
}

/// Register a new client account.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// ```
///
/// # Errors
///
/// 409 if the login is already taken.
pub async fn register<D, R>(
    State(state): State<AppState<D, R>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    let user = state
        .service
        .register(
            &request.full_name,
            request.phone.as_deref(),
            &request.login,
            &request.password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "registration successful".to_string(),
        }),
    ))
}

/// Authenticate by login and password.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// ```
///
/// # Errors
///
/// 401 on unknown login or password mismatch.
pub async fn login<D, R>(
    State(state): State<AppState<D, R>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    let user = state.service.login(&request.login, &request.password).await?;

    Ok(Json(LoginResponse {
        id: user.id,
        full_name: user.full_name,
        phone: user.phone,
        role: user.role.as_str().to_string(),
    }))
}
