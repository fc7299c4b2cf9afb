//! Common test utilities for fitness-api integration tests

pub mod mock_repos;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use fitness_api::{build_router, AppState, Stores};
use fitness_auth_core::{AuthConfig, AuthError, CaptchaVerifier};

#[allow(unused_imports)]
pub use mock_repos::{
    MockCourseRepository, MockProductRepository, MockPurchaseRepository,
    MockRegistrantRepository, MockSubscriptionRepository,
};

pub const JWT_SECRET: &str = "test-secret";
pub const GOOD_CAPTCHA: &str = "good-token";

/// Accepts only [`GOOD_CAPTCHA`]
pub struct StaticCaptcha;

#[async_trait]
impl CaptchaVerifier for StaticCaptcha {
    async fn verify(&self, token: Option<&str>) -> Result<(), AuthError> {
        match token {
            None | Some("") => Err(AuthError::CaptchaMissing),
            Some(GOOD_CAPTCHA) => Ok(()),
            Some(_) => Err(AuthError::CaptchaRejected(vec![
                "invalid-input-response".to_string(),
            ])),
        }
    }
}

/// Router over in-memory stores, with handles on every store
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub registrants: MockRegistrantRepository,
    pub courses: MockCourseRepository,
    pub subscriptions: MockSubscriptionRepository,
    pub products: MockProductRepository,
    pub purchases: MockPurchaseRepository,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let registrants = MockRegistrantRepository::default();
        let courses = MockCourseRepository::default();
        let subscriptions = MockSubscriptionRepository::default();
        let products = MockProductRepository::default();
        let purchases = MockPurchaseRepository::new(products.clone());

        let stores = Stores {
            registrants: Arc::new(registrants.clone()),
            courses: Arc::new(courses.clone()),
            subscriptions: Arc::new(subscriptions.clone()),
            products: Arc::new(products.clone()),
            purchases: Arc::new(purchases.clone()),
        };
        let state = AppState::with_captcha(AuthConfig::new(JWT_SECRET), stores, Arc::new(StaticCaptcha));

        Self {
            router: build_router(state.clone(), None),
            state,
            registrants,
            courses,
            subscriptions,
            products,
            purchases,
        }
    }

    /// Send a request and return status plus parsed JSON body (`Null` if empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    /// Sign up `email` and return the issued token
    pub async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/signup",
                None,
                serde_json::json!({
                    "email_inscrit": email,
                    "mdp_inscrit": "motdepasse",
                    "nom_inscrit": "Dupont",
                    "prenom_inscrit": "Jean",
                    "civilite_inscrit": "Homme",
                    "recaptchaToken": GOOD_CAPTCHA,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}
