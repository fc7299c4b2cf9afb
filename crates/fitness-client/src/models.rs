//! Wire models
//!
//! Field names follow the API's JSON (French column names, a few camelCase
//! request fields); Rust names are English.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitness_types::{Civility, CourseId, ProductId, PurchaseLine, Role};

// =============================================================================
// Auth
// =============================================================================

/// `POST /auth/signup` body
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupRequest {
    #[serde(rename = "email_inscrit")]
    pub email: String,
    #[serde(rename = "mdp_inscrit")]
    pub password: String,
    #[serde(rename = "nom_inscrit", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom_inscrit", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "adresse_inscrit", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telephone_inscrit", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "date_naissance", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "civilite_inscrit", skip_serializing_if = "Option::is_none")]
    pub civility: Option<Civility>,
    #[serde(rename = "type_inscrit", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: String,
}

/// Registrant summary returned by signup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignupUser {
    pub id_inscrit: i32,
    pub email_inscrit: String,
    pub nom_inscrit: Option<String>,
    pub prenom_inscrit: Option<String>,
    pub type_inscrit: Role,
}

/// `POST /auth/signup` response
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub user: SignupUser,
    pub token: String,
}

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "email_inscrit")]
    pub email: String,
    #[serde(rename = "mdp_inscrit")]
    pub password: String,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: String,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

// =============================================================================
// Profile
// =============================================================================

/// Profile as returned by `GET /user/profil`; never carries the password hash
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id_inscrit: i32,
    pub email_inscrit: String,
    pub nom_inscrit: Option<String>,
    pub prenom_inscrit: Option<String>,
    pub adresse_inscrit: Option<String>,
    pub telephone_inscrit: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub civilite_inscrit: Option<Civility>,
    pub id_abonnement: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub user: Profile,
}

/// `PUT /user/profil` body; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(rename = "civilite", skip_serializing_if = "Option::is_none")]
    pub civility: Option<Civility>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "firstname", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "emailConfirm", skip_serializing_if = "Option::is_none")]
    pub email_confirm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "adress", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: String,
}

// =============================================================================
// Courses
// =============================================================================

/// One enrollment from `GET /user/previous-courses`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "id_cours")]
    pub course_id: CourseId,
    #[serde(rename = "nom_cours")]
    pub course_name: String,
    #[serde(rename = "datetime_cours")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "duree_cours")]
    pub duration_minutes: i32,
    #[serde(rename = "date_inscription")]
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CoursesEnvelope {
    pub courses: Vec<Enrollment>,
}

/// `POST /bookings` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "courseName")]
    pub course_name: String,
    /// `DD/MM/YYYY`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Display label, e.g. `2h`
    pub duration: String,
}

/// `POST /bookings` response
#[derive(Debug, Clone, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    #[serde(rename = "id_cours")]
    pub course_id: CourseId,
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Subscription row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id_abonnement: i32,
    pub duree_abonnement: i32,
    pub datedebut_abonnement: NaiveDate,
    pub datefin_abonnement: NaiveDate,
    pub prix_abonnement: Decimal,
    pub actif_abonnement: bool,
    pub id_type_abonnement: i32,
    pub id_inscrit: i32,
}

/// `GET /user/abonnement/check` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActiveSubscription {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub nom_type_abonnement: String,
}

/// `POST /user/abonnement/subscribe` body
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    pub duree_abonnement: i32,
    pub datedebut_abonnement: NaiveDate,
    pub datefin_abonnement: NaiveDate,
    pub prix_abonnement: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actif_abonnement: Option<bool>,
    pub id_type_abonnement: i32,
    pub type_paiement: String,
}

/// `POST /user/abonnement/subscribe` response
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub abonnement: Subscription,
    pub paiement: Payment,
}

/// `PUT /user/abonnement/cancel` response
#[derive(Debug, Clone, Deserialize)]
pub struct CancelSubscriptionResponse {
    pub message: String,
    pub abonnement: Subscription,
}

/// Subscription formula
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionType {
    pub id_type_abonnement: i32,
    pub nom_type_abonnement: String,
    pub prix_type_abonnement: Decimal,
    pub description_type_abonnement: Option<String>,
}

// =============================================================================
// Products and purchases
// =============================================================================

/// Catalogue product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(rename = "id_produit")]
    pub id: ProductId,
    #[serde(rename = "nom_produit")]
    pub name: String,
    #[serde(rename = "prix_produit")]
    pub price: Decimal,
}

/// Entry of a `POST /produit/add` body
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nom_produit")]
    pub name: String,
    #[serde(rename = "prix_produit")]
    pub price: Decimal,
}

/// `POST /produit/add` response
#[derive(Debug, Clone, Deserialize)]
pub struct AddProductsResponse {
    pub message: String,
    pub produits: Vec<Product>,
}

/// Payment row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Payment {
    pub id_paiement: i32,
    pub montant_paiement: Decimal,
    pub date_paiement: NaiveDate,
    pub type_paiement: Option<String>,
    pub id_achat: Option<i32>,
    pub id_abonnement: Option<i32>,
    pub id_inscrit: i32,
}

/// `POST /user/achat` body
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequest {
    pub type_paiement: String,
    pub produits: Vec<PurchaseLine>,
}

/// `POST /user/achat` response
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseResponse {
    pub message: String,
    pub id_achat: i32,
    pub montant: Decimal,
    pub paiement: Payment,
}

/// Line of a past order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    pub id_produit: ProductId,
    pub nom_produit: String,
    pub prix_produit: Decimal,
    pub quantite: i32,
}

/// Past order from `GET /user/orders`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id_achat: i32,
    pub date_achat: DateTime<Utc>,
    pub total: Decimal,
    pub produits: Vec<OrderLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrdersEnvelope {
    pub orders: Vec<Order>,
}
