//! Typed REST client

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use fitness_types::CourseId;

use crate::models::*;
use crate::{ClientConfig, ClientError, Result};

/// HTTP client for the FitnessDev API
#[derive(Debug, Clone)]
pub struct FitnessClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl FitnessClient {
    /// Create a client with its own connection pool
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    /// Create a client sharing an existing `reqwest::Client`
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.send(self.request(Method::POST, "/auth/signup", None).json(request))
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.send(self.request(Method::POST, "/auth/login", None).json(request))
            .await
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// `GET /user/profil`
    pub async fn profile(&self, token: &str) -> Result<Profile> {
        let envelope: ProfileEnvelope = self
            .send(self.request(Method::GET, "/user/profil", Some(token)))
            .await?;
        Ok(envelope.user)
    }

    /// `PUT /user/profil`
    pub async fn update_profile(
        &self,
        token: &str,
        request: &ProfileUpdateRequest,
    ) -> Result<Profile> {
        let envelope: ProfileEnvelope = self
            .send(
                self.request(Method::PUT, "/user/profil", Some(token))
                    .json(request),
            )
            .await?;
        Ok(envelope.user)
    }

    // =========================================================================
    // Courses
    // =========================================================================

    /// `GET /user/previous-courses`, latest course first
    pub async fn previous_courses(&self, token: &str) -> Result<Vec<Enrollment>> {
        let envelope: CoursesEnvelope = self
            .send(self.request(Method::GET, "/user/previous-courses", Some(token)))
            .await?;
        Ok(envelope.courses)
    }

    /// `POST /bookings`
    pub async fn book(&self, token: &str, request: &BookingRequest) -> Result<BookingResponse> {
        self.send(self.request(Method::POST, "/bookings", Some(token)).json(request))
            .await
    }

    /// `DELETE /user/course/{id_cours}`
    pub async fn cancel_course(&self, token: &str, course_id: CourseId) -> Result<()> {
        let path = format!("/user/course/{course_id}");
        let response = self
            .request(Method::DELETE, &path, Some(token))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// `GET /user/abonnement/check`; `None` when no subscription is active
    pub async fn active_subscription(&self, token: &str) -> Result<Option<ActiveSubscription>> {
        match self
            .send(self.request(Method::GET, "/user/abonnement/check", Some(token)))
            .await
        {
            Ok(subscription) => Ok(Some(subscription)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST /user/abonnement/subscribe`
    pub async fn subscribe(
        &self,
        token: &str,
        request: &SubscribeRequest,
    ) -> Result<SubscribeResponse> {
        self.send(
            self.request(Method::POST, "/user/abonnement/subscribe", Some(token))
                .json(request),
        )
        .await
    }

    /// `PUT /user/abonnement/cancel`
    pub async fn cancel_subscription(&self, token: &str) -> Result<CancelSubscriptionResponse> {
        self.send(self.request(Method::PUT, "/user/abonnement/cancel", Some(token)))
            .await
    }

    /// `GET /type_abonnement[?nom=]`
    pub async fn subscription_types(&self, name: Option<&str>) -> Result<Vec<SubscriptionType>> {
        let mut request = self.request(Method::GET, "/type_abonnement", None);
        if let Some(name) = name {
            request = request.query(&[("nom", name)]);
        }
        self.send(request).await
    }

    // =========================================================================
    // Products and purchases
    // =========================================================================

    /// `GET /produit[?nom=]`
    pub async fn products(&self, name: Option<&str>) -> Result<Vec<Product>> {
        let mut request = self.request(Method::GET, "/produit", None);
        if let Some(name) = name {
            request = request.query(&[("nom", name)]);
        }
        self.send(request).await
    }

    /// `POST /produit/add`
    pub async fn add_products(&self, products: &[NewProduct]) -> Result<AddProductsResponse> {
        self.send(self.request(Method::POST, "/produit/add", None).json(products))
            .await
    }

    /// `POST /user/achat`
    pub async fn purchase(&self, token: &str, request: &PurchaseRequest) -> Result<PurchaseResponse> {
        self.send(self.request(Method::POST, "/user/achat", Some(token)).json(request))
            .await
    }

    /// `GET /user/orders`, newest first
    pub async fn orders(&self, token: &str) -> Result<Vec<Order>> {
        let envelope: OrdersEnvelope = self
            .send(self.request(Method::GET, "/user/orders", Some(token)))
            .await?;
        Ok(envelope.orders)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.config.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn non-success responses into typed errors
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "API request failed");
    Err(ClientError::from_response(status, &body))
}

