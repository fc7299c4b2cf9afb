//! FitnessDev Auth Core - Authentication business logic
//!
//! Signup and login against the registrant store, HS256 session tokens,
//! bcrypt password hashing and reCAPTCHA verification.

pub mod config;
pub mod error;
pub mod password;
pub mod recaptcha;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use recaptcha::{CaptchaVerifier, DisabledVerifier, RecaptchaVerifier, RECAPTCHA_VERIFY_URL};
pub use service::{is_valid_email, AuthService, ProfileUpdate, SignupInput};
pub use token::{Claims, TokenIssuer};
