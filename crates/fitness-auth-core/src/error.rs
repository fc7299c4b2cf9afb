//! Auth errors
//!
//! Display strings are the user-facing messages sent back by the API.

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email fails format validation
    #[error("Email invalide")]
    InvalidEmail,

    /// Password shorter than the minimum length
    #[error("Mot de passe trop court")]
    PasswordTooShort,

    /// Email already belongs to a registrant
    #[error("Cet email est déjà utilisé")]
    EmailTaken,

    /// No registrant with that email
    #[error("Email incorrect")]
    UnknownEmail,

    /// Password does not match
    #[error("mot de passe incorrect")]
    WrongPassword,

    /// No bearer token on the request
    #[error("Token manquant")]
    MissingToken,

    /// Malformed token or bad signature
    #[error("Token invalide")]
    InvalidToken,

    /// Token past its expiry
    #[error("Token expiré")]
    TokenExpired,

    /// Request carried no reCAPTCHA token
    #[error("Token reCAPTCHA manquant")]
    CaptchaMissing,

    /// reCAPTCHA rejected the token
    #[error("Échec de la vérification reCAPTCHA")]
    CaptchaRejected(Vec<String>),

    /// reCAPTCHA endpoint unreachable or unparseable
    #[error("reCAPTCHA unavailable: {0}")]
    CaptchaUnavailable(String),

    /// Registrant referenced by a token no longer exists
    #[error("Utilisateur non trouvé")]
    UserNotFound,

    /// Hashing failure
    #[error("hashing error: {0}")]
    Hashing(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidEmail
            | Self::PasswordTooShort
            | Self::EmailTaken
            | Self::UnknownEmail
            | Self::WrongPassword
            | Self::CaptchaMissing
            | Self::CaptchaRejected(_) => 400,
            Self::MissingToken => 401,
            Self::InvalidToken | Self::TokenExpired => 403,
            Self::UserNotFound => 404,
            Self::CaptchaUnavailable(_)
            | Self::Hashing(_)
            | Self::Database(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UnknownEmail => "UNKNOWN_EMAIL",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::CaptchaMissing => "CAPTCHA_MISSING",
            Self::CaptchaRejected(_) => "CAPTCHA_REJECTED",
            Self::CaptchaUnavailable(_) => "CAPTCHA_UNAVAILABLE",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Hashing(_) => "HASHING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is a server fault rather than a client mistake
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<fitness_db::DbError> for AuthError {
    fn from(err: fitness_db::DbError) -> Self {
        match err {
            fitness_db::DbError::Conflict(_) => Self::EmailTaken,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
