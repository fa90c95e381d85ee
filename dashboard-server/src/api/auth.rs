use axum::{extract::rejection::JsonRejection, Json};

use dashboard_types::{LoginRequest, LoginResponse, StatusResponse};

use super::validation::validate_email;
use crate::{api::ApiResult, auth::issue_token};

/// GET / - Health check
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// POST /auth/login - Demo login
///
/// Any password is accepted and the returned token simply embeds the email.
/// Do not expose this outside local development.
pub async fn login(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    validate_email(&payload.email)?;

    tracing::info!("Demo login for {}", payload.email);
    Ok(Json(LoginResponse {
        token: issue_token(&payload.email),
        email: payload.email,
    }))
}
