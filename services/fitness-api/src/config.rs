//! Configuration for the FitnessDev API service.

use fitness_auth_core::AuthConfig;
use fitness_db::PgConnectOptions;
use std::time::Duration;

/// API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database connection settings
    pub database: PgConnectOptions,
    /// Token and reCAPTCHA settings
    pub auth: AuthConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database: DATABASE_URL wins over the DB_* parts
        let database = match lookup("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|_| ConfigError::Invalid("DATABASE_URL"))?,
            None => database_from_parts(&lookup)?,
        };

        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_secs: u64 = lookup("TOKEN_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS"))?;

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let metrics_enabled = lookup("METRICS_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .unwrap_or(true);

        let auth = AuthConfig::new(jwt_secret)
            .with_token_ttl(Duration::from_secs(token_ttl_secs))
            .with_recaptcha_secret(lookup("RECAPTCHA_SECRET_KEY"));

        Ok(Self {
            http_port,
            database,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

/// Connection options from the `DB_*` variables, passed through verbatim
fn database_from_parts<F>(lookup: &F) -> Result<PgConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let user = lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
    let host = lookup("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?;
    let name = lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let port: u16 = lookup("DB_PORT")
        .unwrap_or_else(|| "5432".to_string())
        .parse()
        .map_err(|_| ConfigError::Invalid("DB_PORT"))?;

    let options = PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .database(&name);

    Ok(if password.is_empty() {
        options
    } else {
        options.password(&password)
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_database_from_parts() {
        let config = Config::from_lookup(lookup(&[
            ("DB_USER", "fit"),
            ("DB_PASSWORD", "pw"),
            ("DB_HOST", "db"),
            ("DB_NAME", "fitness"),
            ("DB_PORT", "5433"),
            ("JWT_SECRET", "s"),
        ]))
        .unwrap();
        assert_eq!(config.database.get_host(), "db");
        assert_eq!(config.database.get_port(), 5433);
        assert_eq!(config.database.get_username(), "fit");
        assert_eq!(config.database.get_database(), Some("fitness"));
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.auth.token_ttl, Duration::from_secs(3600));
        assert!(config.auth.recaptcha_secret.is_none());
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_database_url_overrides_parts() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/x"),
            ("DB_HOST", "ignored"),
            ("DB_USER", "ignored"),
            ("DB_NAME", "ignored"),
            ("JWT_SECRET", "s"),
            ("RECAPTCHA_SECRET_KEY", "captcha"),
        ]))
        .unwrap();
        assert_eq!(config.database.get_host(), "localhost");
        assert_eq!(config.database.get_database(), Some("x"));
        assert_eq!(config.auth.recaptcha_secret.as_deref(), Some("captcha"));
    }

    #[test]
    fn test_password_with_url_delimiters_keeps_host_and_database() {
        let config = Config::from_lookup(lookup(&[
            ("DB_USER", "fit"),
            ("DB_PASSWORD", "p@ss/w#rd:1"),
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "fitness"),
            ("JWT_SECRET", "s"),
        ]))
        .unwrap();
        assert_eq!(config.database.get_host(), "db.internal");
        assert_eq!(config.database.get_port(), 5432);
        assert_eq!(config.database.get_username(), "fit");
        assert_eq!(config.database.get_database(), Some("fitness"));
    }

    #[test]
    fn test_malformed_database_url() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "not a url"),
            ("JWT_SECRET", "s"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DATABASE_URL")));
    }

    #[test]
    fn test_missing_jwt_secret() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("HTTP_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("HTTP_PORT")));
    }
}
