//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Queries alias the French column names to the English field names below.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use fitness_types::{
    CourseId, ProductId, PurchaseId, RegistrantId, Role, SubscriptionId, SubscriptionTypeId,
};

/// Registrant row (`inscrit`)
#[derive(Debug, Clone, FromRow)]
pub struct RegistrantRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub civility: Option<String>,
    pub role: String,
    pub subscription_id: Option<i32>,
}

/// Course instance row (`cours`)
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: i32,
    pub name: String,
    pub duration_minutes: i32,
    pub starts_at: NaiveDateTime,
    pub price: Decimal,
    pub coach_id: Option<i32>,
}

/// Enrollment joined with its course (`inscription` + `cours`)
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub course_id: i32,
    pub course_name: String,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub enrolled_at: DateTime<Utc>,
}

/// Subscription type row (`type_abonnement`)
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionTypeRow {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

/// Subscription row (`abonnement`)
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub id: i32,
    pub duration_months: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub price: Decimal,
    pub active: bool,
    pub type_id: i32,
    pub registrant_id: i32,
}

/// Active subscription joined with its type name
#[derive(Debug, Clone, FromRow)]
pub struct ActiveSubscriptionRow {
    #[sqlx(flatten)]
    pub subscription: SubscriptionRow,
    pub type_name: String,
}

/// Payment row (`paiement`)
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: i32,
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    pub method: Option<String>,
    pub purchase_id: Option<i32>,
    pub subscription_id: Option<i32>,
    pub registrant_id: i32,
}

/// Product row (`produit`)
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

/// Purchase row (`achat`)
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRow {
    pub id: i32,
    pub purchased_at: DateTime<Utc>,
    pub registrant_id: i32,
}

/// Purchase line joined with its product (`achat_produit` + `produit`)
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseLineRow {
    pub purchase_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// A purchase with its lines and computed total
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub purchase: PurchaseRow,
    pub lines: Vec<PurchaseLineRow>,
    pub total: Decimal,
}

/// Result of recording a purchase
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub purchase: PurchaseRow,
    pub total: Decimal,
    pub payment: PaymentRow,
}

// Conversion helpers from row types to fitness-types domain types
impl RegistrantRow {
    /// Convert to domain RegistrantId
    pub fn registrant_id(&self) -> RegistrantId {
        RegistrantId(self.id)
    }

    /// Parsed role; unknown column values fall back to `Client`
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or_default()
    }
}

impl CourseRow {
    /// Convert to domain CourseId
    pub fn course_id(&self) -> CourseId {
        CourseId(self.id)
    }
}

impl EnrollmentRow {
    /// Convert to domain CourseId
    pub fn course_id(&self) -> CourseId {
        CourseId(self.course_id)
    }
}

impl SubscriptionRow {
    /// Convert to domain SubscriptionId
    pub fn subscription_id(&self) -> SubscriptionId {
        SubscriptionId(self.id)
    }

    /// Convert to domain SubscriptionTypeId
    pub fn type_id(&self) -> SubscriptionTypeId {
        SubscriptionTypeId(self.type_id)
    }
}

impl ProductRow {
    /// Convert to domain ProductId
    pub fn product_id(&self) -> ProductId {
        ProductId(self.id)
    }
}

impl PurchaseRow {
    /// Convert to domain PurchaseId
    pub fn purchase_id(&self) -> PurchaseId {
        PurchaseId(self.id)
    }
}
