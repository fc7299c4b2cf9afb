//! Application state
//!
//! One value owning the REST client and both stores, handed to UI code by
//! reference. Calls that need a session take the token from the auth store
//! and drop the session when the server rejects it.

use std::sync::Arc;

use chrono::NaiveDateTime;

use fitness_types::{CourseId, CourseKind, CourseSlot};

use crate::booking::{self, CourseOffer};
use crate::models::{BookingResponse, Enrollment, Order, PurchaseResponse};
use crate::{AuthStore, CartStore, ClientConfig, ClientError, FitnessClient, LocalStore, Result};

/// Client-side application state
#[derive(Debug)]
pub struct AppState {
    client: FitnessClient,
    auth: AuthStore,
    cart: CartStore,
}

impl AppState {
    /// Build the state; the cart is rehydrated immediately, the session on
    /// [`AuthStore::rehydrate`]
    pub fn new(config: ClientConfig, store: Arc<dyn LocalStore>) -> Result<Self> {
        Ok(Self::with_client(FitnessClient::new(config)?, store))
    }

    pub fn with_client(client: FitnessClient, store: Arc<dyn LocalStore>) -> Self {
        Self {
            client,
            auth: AuthStore::new(Arc::clone(&store)),
            cart: CartStore::new(store),
        }
    }

    pub fn client(&self) -> &FitnessClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Purchase the cart content, taking the bought lines out on success
    pub async fn checkout(&self, payment_type: &str) -> Result<PurchaseResponse> {
        let token = self.auth.require_token()?;
        self.cart
            .checkout(&self.client, &token, payment_type)
            .await
            .map_err(|e| self.on_error(e))
    }

    /// Past orders of the logged-in registrant
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let token = self.auth.require_token()?;
        self.client.orders(&token).await.map_err(|e| self.on_error(e))
    }

    /// All enrollments of the logged-in registrant
    pub async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        let token = self.auth.require_token()?;
        self.client
            .previous_courses(&token)
            .await
            .map_err(|e| self.on_error(e))
    }

    /// Next slots of a course; unflagged when nobody is logged in
    pub async fn course_offers(
        &self,
        kind: CourseKind,
        now: NaiveDateTime,
    ) -> Result<Vec<CourseOffer>> {
        let enrollments = if self.auth.is_authenticated() {
            self.enrollments().await?
        } else {
            Vec::new()
        };
        Ok(booking::course_offers(kind, now, &enrollments))
    }

    /// Book a slot
    pub async fn book(&self, slot: &CourseSlot) -> Result<BookingResponse> {
        let token = self.auth.require_token()?;
        self.client
            .book(&token, &booking::booking_request(slot))
            .await
            .map_err(|e| self.on_error(e))
    }

    /// Cancel an enrollment
    pub async fn cancel_course(&self, course_id: CourseId) -> Result<()> {
        let token = self.auth.require_token()?;
        self.client
            .cancel_course(&token, course_id)
            .await
            .map_err(|e| self.on_error(e))
    }

    fn on_error(&self, err: ClientError) -> ClientError {
        if err.is_auth_failure() {
            tracing::info!("Session rejected by server, logging out");
            self.auth.logout();
        }
        err
    }
}
