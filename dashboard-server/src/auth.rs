//! Demo bearer-token gate.
//!
//! Tokens have the shape `demo-token:<email>` and are never verified against
//! anything; the gate only checks that the header is well formed. This is a
//! placeholder for local testing, not a security boundary.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::ApiError;

pub const TOKEN_PREFIX: &str = "demo-token:";

/// Identity extracted from a valid demo token, stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub email: String,
}

/// Token handed out by `/auth/login`
pub fn issue_token(email: &str) -> String {
    format!("{}{}", TOKEN_PREFIX, email)
}

/// Parse an `Authorization` header value into the caller identity.
///
/// A blank value counts as a missing header.
pub fn caller_from_header(header: Option<&str>) -> Result<Caller, ApiError> {
    let header = header
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    parse_bearer(header).ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))
}

fn parse_bearer(header: &str) -> Option<Caller> {
    let mut parts = header.split(' ');
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return None,
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let email = token.strip_prefix(TOKEN_PREFIX)?;
    if email.is_empty() {
        return None;
    }

    Some(Caller {
        email: email.to_string(),
    })
}

fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, ApiError> {
    match headers.get(AUTHORIZATION) {
        None => caller_from_header(None),
        // Non-ASCII header bytes can never form a valid token
        Some(value) => caller_from_header(Some(value.to_str().unwrap_or_default())),
    }
}

/// Middleware rejecting requests without a well-formed demo token
pub async fn require_demo_token(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let caller = caller_from_headers(request.headers())?;
    tracing::debug!("Request authorized for {}", caller.email);

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
