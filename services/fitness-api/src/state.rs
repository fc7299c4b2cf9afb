//! Application state for the FitnessDev API service.

use std::sync::Arc;
use std::time::Duration;

use fitness_auth_core::{AuthConfig, AuthService, CaptchaVerifier, RecaptchaVerifier};
use fitness_db::{
    CourseRepository, DbPool, ProductRepository, PurchaseRepository, RegistrantRepository,
    Repositories, SubscriptionRepository,
};

/// Default request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Repository handles behind trait objects, so tests can swap in memory stores
#[derive(Clone)]
pub struct Stores {
    pub registrants: Arc<dyn RegistrantRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
}

impl From<Repositories> for Stores {
    fn from(repos: Repositories) -> Self {
        Self {
            registrants: Arc::new(repos.registrants),
            courses: Arc::new(repos.courses),
            subscriptions: Arc::new(repos.subscriptions),
            products: Arc::new(repos.products),
            purchases: Arc::new(repos.purchases),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Signup, login, token verification and profile
    pub auth: Arc<AuthService<dyn RegistrantRepository>>,
    /// reCAPTCHA check for signup, login and profile updates
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub courses: Arc<dyn CourseRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    /// Pool used by the readiness probe; absent with in-memory stores
    pub pool: Option<DbPool>,
    request_timeout: Duration,
}

impl AppState {
    /// Create state with the captcha verifier the config asks for
    pub fn new(auth: AuthConfig, stores: Stores) -> Self {
        let captcha: Arc<dyn CaptchaVerifier> = Arc::from(RecaptchaVerifier::from_config(&auth));
        Self::with_captcha(auth, stores, captcha)
    }

    /// Create state with an explicit captcha verifier
    pub fn with_captcha(auth: AuthConfig, stores: Stores, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(auth, stores.registrants)),
            captcha,
            courses: stores.courses,
            subscriptions: stores.subscriptions,
            products: stores.products,
            purchases: stores.purchases,
            pool: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Attach the database pool for readiness checks
    pub fn with_pool(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Get request timeout
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
