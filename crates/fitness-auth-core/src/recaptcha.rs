//! reCAPTCHA verification
//!
//! Signup, login and profile updates carry a `recaptchaToken` that is checked
//! against Google's siteverify endpoint before anything else happens.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::{AuthConfig, AuthError};

/// Google siteverify endpoint
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Verifies a client-supplied captcha token
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(())` when the token is accepted
    async fn verify(&self, token: Option<&str>) -> Result<(), AuthError>;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// Verifier backed by the siteverify HTTP API
#[derive(Clone)]
pub struct RecaptchaVerifier {
    http_client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaVerifier {
    /// Create a verifier with its own HTTP client
    pub fn new(secret: impl Into<String>, verify_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        }
    }

    /// Build the verifier the config asks for
    ///
    /// Without a secret, verification is disabled and a warning is logged.
    pub fn from_config(config: &AuthConfig) -> Box<dyn CaptchaVerifier> {
        match &config.recaptcha_secret {
            Some(secret) => Box::new(Self::new(secret.clone(), config.recaptcha_verify_url.clone())),
            None => {
                tracing::warn!("RECAPTCHA_SECRET_KEY not set, reCAPTCHA verification disabled");
                Box::new(DisabledVerifier)
            }
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: Option<&str>) -> Result<(), AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::CaptchaMissing)?;

        let response = self
            .http_client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("reCAPTCHA request failed: {}", e);
                AuthError::CaptchaUnavailable(e.to_string())
            })?;

        let body = response.json::<SiteVerifyResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse reCAPTCHA response: {}", e);
            AuthError::CaptchaUnavailable(e.to_string())
        })?;

        if body.success {
            Ok(())
        } else {
            tracing::debug!(error_codes = ?body.error_codes, "reCAPTCHA rejected");
            Err(AuthError::CaptchaRejected(body.error_codes))
        }
    }
}

impl std::fmt::Debug for RecaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaVerifier")
            .field("verify_url", &self.verify_url)
            .finish_non_exhaustive()
    }
}

/// Accepts everything; used when no secret is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledVerifier;

#[async_trait]
impl CaptchaVerifier for DisabledVerifier {
    async fn verify(&self, _token: Option<&str>) -> Result<(), AuthError> {
        Ok(())
    }
}
