//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use fitness_types::{CourseKind, PurchaseLine, Role};

use crate::error::DbResult;
use crate::models::*;

/// Registrant repository trait
#[async_trait]
pub trait RegistrantRepository: Send + Sync {
    /// Find a registrant by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<RegistrantRow>>;

    /// Find a registrant by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<RegistrantRow>>;

    /// Create a new registrant; `Conflict` if the email is taken
    async fn create(&self, registrant: CreateRegistrant) -> DbResult<RegistrantRow>;

    /// Apply a partial profile update; `None` if the registrant does not exist
    async fn update_profile(
        &self,
        id: i32,
        update: UpdateRegistrant,
    ) -> DbResult<Option<RegistrantRow>>;
}

/// Create registrant input
#[derive(Debug, Clone)]
pub struct CreateRegistrant {
    pub email: String,
    pub password_hash: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub civility: Option<String>,
    pub role: Role,
    pub subscription_id: Option<i32>,
}

/// Partial registrant update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateRegistrant {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub civility: Option<String>,
}

impl UpdateRegistrant {
    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.last_name.is_none()
            && self.first_name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.civility.is_none()
    }
}

/// Course and enrollment repository trait
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert-or-fetch the course instance and enroll the registrant, atomically
    ///
    /// Returns `Conflict` if the registrant is already enrolled.
    async fn book(&self, booking: BookCourse) -> DbResult<CourseRow>;

    /// All enrollments of a registrant, latest course first
    async fn enrollments_for(&self, registrant_id: i32) -> DbResult<Vec<EnrollmentRow>>;

    /// Remove one enrollment; false if there was none
    async fn cancel_enrollment(&self, registrant_id: i32, course_id: i32) -> DbResult<bool>;
}

/// Booking input
#[derive(Debug, Clone)]
pub struct BookCourse {
    pub registrant_id: i32,
    pub kind: CourseKind,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i32,
}

/// Subscription repository trait
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Active subscription of a registrant, joined with its type name
    async fn find_active(&self, registrant_id: i32) -> DbResult<Option<ActiveSubscriptionRow>>;

    /// Create a subscription and its payment in one transaction
    ///
    /// Returns `Conflict` if an active subscription already exists.
    async fn subscribe(&self, sub: CreateSubscription) -> DbResult<(SubscriptionRow, PaymentRow)>;

    /// Deactivate the active subscription; `None` if there was none
    async fn cancel_active(&self, registrant_id: i32) -> DbResult<Option<SubscriptionRow>>;

    /// All subscription types
    async fn list_types(&self) -> DbResult<Vec<SubscriptionTypeRow>>;

    /// Subscription types with an exact name
    async fn find_types_by_name(&self, name: &str) -> DbResult<Vec<SubscriptionTypeRow>>;
}

/// Create subscription input
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub registrant_id: i32,
    pub type_id: i32,
    pub duration_months: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub price: Decimal,
    pub active: bool,
    pub payment_method: Option<String>,
}

/// Product repository trait
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products
    async fn list(&self) -> DbResult<Vec<ProductRow>>;

    /// Products with an exact name
    async fn find_by_name(&self, name: &str) -> DbResult<Vec<ProductRow>>;

    /// Insert a product unless one with that name exists; `None` when skipped
    async fn insert_if_absent(&self, name: &str, price: Decimal) -> DbResult<Option<ProductRow>>;
}

/// Purchase repository trait
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Record a purchase, its lines and its payment in one transaction
    ///
    /// The total is computed from catalogue prices. Returns `NotFound` if a
    /// line references an unknown product.
    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseReceipt>;

    /// Purchases of a registrant with their lines, newest first
    async fn orders_for(&self, registrant_id: i32) -> DbResult<Vec<OrderRecord>>;
}

/// Create purchase input
#[derive(Debug, Clone)]
pub struct CreatePurchase {
    pub registrant_id: i32,
    pub payment_method: Option<String>,
    pub lines: Vec<PurchaseLine>,
}
