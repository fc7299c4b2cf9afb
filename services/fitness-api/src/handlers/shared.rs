//! Shared handler utilities
//!
//! Wire views of rows used by several handlers, body helpers and metrics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fitness_db::{PaymentRow, SubscriptionRow};

// ============================================================================
// Request Helpers
// ============================================================================

/// A JSON body field that accepts either one value or an array of values
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// `?nom=` exact-name filter of the catalogue listings
#[derive(Debug, Deserialize)]
pub struct NameFilter {
    pub nom: Option<String>,
}

/// Treat blank form fields as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Response Views
// ============================================================================

/// `abonnement` row as sent on the wire
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub id_abonnement: i32,
    pub duree_abonnement: i32,
    pub datedebut_abonnement: NaiveDate,
    pub datefin_abonnement: NaiveDate,
    pub prix_abonnement: Decimal,
    pub actif_abonnement: bool,
    pub id_type_abonnement: i32,
    pub id_inscrit: i32,
}

impl From<SubscriptionRow> for SubscriptionView {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id_abonnement: row.id,
            duree_abonnement: row.duration_months,
            datedebut_abonnement: row.starts_on,
            datefin_abonnement: row.ends_on,
            prix_abonnement: row.price,
            actif_abonnement: row.active,
            id_type_abonnement: row.type_id,
            id_inscrit: row.registrant_id,
        }
    }
}

/// `paiement` row as sent on the wire
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub id_paiement: i32,
    pub montant_paiement: Decimal,
    pub date_paiement: NaiveDate,
    pub type_paiement: Option<String>,
    pub id_achat: Option<i32>,
    pub id_abonnement: Option<i32>,
    pub id_inscrit: i32,
}

impl From<PaymentRow> for PaymentView {
    fn from(row: PaymentRow) -> Self {
        Self {
            id_paiement: row.id,
            montant_paiement: row.amount,
            date_paiement: row.paid_on,
            type_paiement: row.method,
            id_achat: row.purchase_id,
            id_abonnement: row.subscription_id,
            id_inscrit: row.registrant_id,
        }
    }
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "fitness_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Tests
// ============================================================================
