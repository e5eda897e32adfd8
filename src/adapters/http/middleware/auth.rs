//! Bearer authentication for the `/api` routes.
//!
//! `auth_middleware` resolves the token through the `SessionValidator` port
//! and stores the investor in the request extensions. Handlers take
//! `RequireAuth` to demand one.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

/// The token in `Authorization: Bearer <token>`, if non-blank.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Requests without a token pass through so public routes keep working;
/// a token that fails validation is answered here.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_owned(),
        None => return next.run(request).await,
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => AuthRejection::from(e).into_response(),
    }
}

/// The authenticated investor; rejects with 401 when there is none.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(RequireAuth(user.clone())),
            None => Err(AuthRejection::Unauthenticated),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    Unauthenticated,
    Rejected(AuthError),
}

impl From<AuthError> for AuthRejection {
    fn from(error: AuthError) -> Self {
        AuthRejection::Rejected(error)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AuthRejection::Rejected(AuthError::TokenExpired) => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token expired".to_string(),
            ),
            AuthRejection::Rejected(AuthError::ServiceUnavailable(reason)) => {
                tracing::error!(%reason, "Session validation unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AUTH_UNAVAILABLE",
                    "Authentication service unavailable".to_string(),
                )
            }
            AuthRejection::Rejected(_) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid token".to_string(),
            ),
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
