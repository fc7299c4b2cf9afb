//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use fitness_auth_core::{AuthError, Claims};
use fitness_types::{RegistrantId, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// Registrant identified by a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: RegistrantId,
    pub email: String,
    /// Only present on tokens issued at signup
    pub role: Option<Role>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.registrant_id(),
            email: claims.email,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)?;

        let claims = app_state.auth.verify_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            e
        })?;

        Ok(Self::from(claims))
    }
}

/// Token from `Authorization: Bearer <token>`
///
/// A missing header or an empty token is 401; an unreadable header is treated
/// like a bad token.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::MissingToken);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;

    match value.split_once(' ') {
        Some((_, token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken),
    }
}
