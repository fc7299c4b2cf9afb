//! Auth store
//!
//! Holds the bearer token and its decoded claims. The token is mirrored under
//! [`TOKEN_KEY`] so a restart can pick the session up again; a persisted token
//! only becomes the live session once [`AuthStore::rehydrate`] has confirmed it
//! against the profile endpoint.

use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Deserialize;

use fitness_types::{RegistrantId, Role};

use crate::models::{LoginRequest, LoginResponse, Profile, SignupRequest, SignupResponse};
use crate::storage::{LocalStore, TOKEN_KEY};
use crate::{ClientError, FitnessClient, Result};

/// Claims read from a token payload, without signature verification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub id: i32,
    pub email: String,
    #[serde(rename = "type", default)]
    pub role: Option<Role>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn registrant_id(&self) -> RegistrantId {
        RegistrantId(self.id)
    }

    /// Whether `exp` is at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Decode the payload segment of a JWT
///
/// The signature is not checked; the server does that on every request.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ClientError::Serialization("token has no payload segment".to_string()))?;

    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::Serialization(format!("token payload: {e}")))?;

    Ok(serde_json::from_slice(&decoded)?)
}

#[derive(Debug, Clone)]
struct Session {
    token: String,
    claims: TokenClaims,
}

/// Session state shared by the UI
pub struct AuthStore {
    store: Arc<dyn LocalStore>,
    session: RwLock<Option<Session>>,
}

impl AuthStore {
    /// Create an empty store; call [`rehydrate`](Self::rehydrate) to restore a session
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            session: RwLock::new(None),
        }
    }

    /// Current token, if logged in
    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    /// Current claims, if logged in
    pub fn user(&self) -> Option<TokenClaims> {
        self.session.read().as_ref().map(|s| s.claims.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Current token or `Unauthenticated`
    pub fn require_token(&self) -> Result<String> {
        self.token()
            .ok_or_else(|| ClientError::Unauthenticated("Token manquant".to_string()))
    }

    /// Restore the persisted session if the server still accepts it
    ///
    /// Any failure (undecodable token, rejected token, unreachable server)
    /// logs out and returns `None`.
    pub async fn rehydrate(&self, client: &FitnessClient) -> Option<Profile> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                return None;
            }
        };

        let outcome = async {
            let claims = decode_claims(&token)?;
            let profile = client.profile(&token).await?;
            Ok::<_, ClientError>((claims, profile))
        }
        .await;

        match outcome {
            Ok((claims, profile)) => {
                *self.session.write() = Some(Session { token, claims });
                Some(profile)
            }
            Err(e) => {
                tracing::info!("Stored session rejected, logging out: {}", e);
                self.logout();
                None
            }
        }
    }

    /// Log in and persist the token
    pub async fn login(
        &self,
        client: &FitnessClient,
        email: &str,
        password: &str,
        recaptcha_token: &str,
    ) -> Result<LoginResponse> {
        let response = client
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
                recaptcha_token: recaptcha_token.to_string(),
            })
            .await?;
        self.start_session(&response.token)?;
        Ok(response)
    }

    /// Create an account; the returned token starts a session right away
    pub async fn signup(
        &self,
        client: &FitnessClient,
        request: &SignupRequest,
    ) -> Result<SignupResponse> {
        let response = client.signup(request).await?;
        self.start_session(&response.token)?;
        Ok(response)
    }

    /// Drop the session and its persisted token
    pub fn logout(&self) {
        *self.session.write() = None;
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            tracing::warn!("Failed to remove stored token: {}", e);
        }
    }

    fn start_session(&self, token: &str) -> Result<()> {
        let claims = decode_claims(token)?;
        self.store.set(TOKEN_KEY, token)?;
        *self.session.write() = Some(Session {
            token: token.to_string(),
            claims,
        });
        Ok(())
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
