//! Configuration types for the auth layer

use std::time::Duration;

use crate::recaptcha::RECAPTCHA_VERIFY_URL;

/// Auth configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// reCAPTCHA server secret; `None` disables verification
    pub recaptcha_secret: Option<String>,
    /// reCAPTCHA siteverify endpoint
    pub recaptcha_verify_url: String,
}

impl AuthConfig {
    /// Create a new auth config with a one hour token lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(60 * 60),
            recaptcha_secret: None,
            recaptcha_verify_url: RECAPTCHA_VERIFY_URL.to_string(),
        }
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set the reCAPTCHA secret
    pub fn with_recaptcha_secret(mut self, secret: Option<String>) -> Self {
        self.recaptcha_secret = secret.filter(|s| !s.is_empty());
        self
    }

    /// Override the siteverify endpoint (tests)
    pub fn with_recaptcha_verify_url(mut self, url: impl Into<String>) -> Self {
        self.recaptcha_verify_url = url.into();
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("recaptcha_enabled", &self.recaptcha_secret.is_some())
            .field("recaptcha_verify_url", &self.recaptcha_verify_url)
            .finish_non_exhaustive()
    }
}
