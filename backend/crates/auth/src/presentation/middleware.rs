//! Auth Middleware
//!
//! Bearer-token gate for protected routes.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use platform::token::{TokenError, TokenService};
use std::sync::Arc;

use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub tokens: Arc<TokenService>,
}

impl AuthGateState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Subject of a verified bearer token, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Extract the token from an `Authorization` header value.
///
/// Absent or empty header is `Unauthenticated`; anything that is not
/// `Bearer <token>` in visible ASCII is a malformed token.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::Unauthenticated),
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::Token(TokenError::Malformed))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Token(TokenError::Malformed))?;

    Ok(token)
}

/// Middleware that requires a valid bearer token
///
/// On success the request carries an [`AuthenticatedUser`] extension.
pub async fn require_auth(
    State(gate): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let subject = gate.tokens.verify(token)?;

    // Only this service issues tokens, and it always signs a user id
    let user_id = subject
        .parse::<UserId>()
        .map_err(|_| AuthError::Token(TokenError::Malformed))?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
