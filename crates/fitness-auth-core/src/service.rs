//! Auth service - signup, login, token verification and credential updates

use chrono::NaiveDate;
use std::sync::Arc;

use fitness_db::{CreateRegistrant, RegistrantRepository, RegistrantRow, UpdateRegistrant};
use fitness_types::{Civility, Role};

use crate::{
    config::AuthConfig,
    password::{hash_password, verify_password, MIN_PASSWORD_LENGTH},
    token::{Claims, TokenIssuer},
    AuthError,
};

/// Signup input
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub civility: Option<Civility>,
    pub role: Option<Role>,
    pub subscription_id: Option<i32>,
}

/// Partial profile update; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub civility: Option<Civility>,
}

/// Authentication service
pub struct AuthService<R: RegistrantRepository + ?Sized> {
    config: AuthConfig,
    tokens: TokenIssuer,
    registrants: Arc<R>,
}

impl<R: RegistrantRepository + ?Sized> AuthService<R> {
    /// Create a new auth service
    pub fn new(config: AuthConfig, registrants: Arc<R>) -> Self {
        Self {
            tokens: TokenIssuer::new(&config),
            config,
            registrants,
        }
    }

    /// Token issuer used by this service
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    // =========================================================================
    // Signup / Login
    // =========================================================================

    /// Register a new account and issue its first token
    pub async fn signup(&self, input: SignupInput) -> Result<(RegistrantRow, String), AuthError> {
        let email = input.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }

        if self.registrants.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let role = input.role.unwrap_or_default();
        let password_hash = hash_password(&input.password).await?;

        let registrant = self
            .registrants
            .create(CreateRegistrant {
                email,
                password_hash,
                last_name: input.last_name,
                first_name: input.first_name,
                address: input.address,
                phone: input.phone,
                birth_date: input.birth_date,
                civility: input.civility.map(|c| c.as_str().to_string()),
                role,
                subscription_id: input.subscription_id,
            })
            .await?;

        let token = self
            .tokens
            .issue(registrant.id, &registrant.email, Some(role))?;

        tracing::info!(registrant_id = registrant.id, "Registrant signed up");
        Ok((registrant, token))
    }

    /// Check credentials and issue a token
    ///
    /// Unknown email and wrong password are reported distinctly.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(RegistrantRow, String), AuthError> {
        let registrant = self
            .registrants
            .find_by_email(email.trim())
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        if !verify_password(password, &registrant.password_hash).await? {
            tracing::debug!(registrant_id = registrant.id, "Password mismatch");
            return Err(AuthError::WrongPassword);
        }

        let token = self.tokens.issue(registrant.id, &registrant.email, None)?;
        Ok((registrant, token))
    }

    /// Verify a bearer token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Load the registrant a token was issued to
    pub async fn profile(&self, id: i32) -> Result<RegistrantRow, AuthError> {
        self.registrants
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply a partial profile update, re-hashing a new password
    pub async fn update_profile(
        &self,
        id: i32,
        update: ProfileUpdate,
    ) -> Result<RegistrantRow, AuthError> {
        let email = update.email.map(|e| e.trim().to_string());
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(AuthError::InvalidEmail);
            }
            if let Some(existing) = self.registrants.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AuthError::EmailTaken);
                }
            }
        }

        let password_hash = match update.password.filter(|p| !p.is_empty()) {
            Some(password) if password.chars().count() < MIN_PASSWORD_LENGTH => {
                return Err(AuthError::PasswordTooShort)
            }
            Some(password) => Some(hash_password(&password).await?),
            None => None,
        };

        let changes = UpdateRegistrant {
            email,
            password_hash,
            last_name: update.last_name,
            first_name: update.first_name,
            address: update.address,
            phone: update.phone,
            civility: update.civility.map(|c| c.as_str().to_string()),
        };

        self.registrants
            .update_profile(id, changes)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

impl<R: RegistrantRepository + ?Sized> std::fmt::Debug for AuthService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish()
    }
}

/// Basic shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}
