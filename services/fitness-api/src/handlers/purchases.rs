//! Purchase handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fitness_db::{CreatePurchase, DbError, OrderRecord, PurchaseLineRow};
use fitness_types::PurchaseLine;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::{non_blank, record_op_duration, OneOrMany, PaymentView};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub type_paiement: Option<String>,
    pub produits: Option<OneOrMany<PurchaseLine>>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub message: &'static str,
    pub id_achat: i32,
    pub montant: Decimal,
    pub paiement: PaymentView,
}

#[derive(Debug, Serialize)]
pub struct OrderLineView {
    pub id_produit: i32,
    pub nom_produit: String,
    pub prix_produit: Decimal,
    pub quantite: i32,
}

impl From<PurchaseLineRow> for OrderLineView {
    fn from(row: PurchaseLineRow) -> Self {
        Self {
            id_produit: row.product_id,
            nom_produit: row.product_name,
            prix_produit: row.unit_price,
            quantite: row.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id_achat: i32,
    pub date_achat: DateTime<Utc>,
    pub total: Decimal,
    pub produits: Vec<OrderLineView>,
}

impl From<OrderRecord> for OrderView {
    fn from(record: OrderRecord) -> Self {
        Self {
            id_achat: record.purchase.id,
            date_achat: record.purchase.purchased_at,
            total: record.total,
            produits: record.lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub message: &'static str,
    pub orders: Vec<OrderView>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /user/achat
pub async fn create_purchase(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PurchaseResponse>)> {
    let start = Instant::now();
    let Json(req) = payload?;

    let lines = req.produits.map(OneOrMany::into_vec).unwrap_or_default();
    if lines.is_empty() {
        return Err(ApiError::bad_request("Le panier est vide"));
    }
    if lines.iter().any(|line| line.quantity < 1) {
        return Err(ApiError::bad_request("Quantité invalide"));
    }

    let result = state
        .purchases
        .create(CreatePurchase {
            registrant_id: user.id.0,
            payment_method: non_blank(req.type_paiement),
            lines,
        })
        .await;
    record_op_duration("purchase", start, result.is_ok());

    let receipt = result.map_err(|e| match e {
        DbError::NotFound(what) => {
            tracing::debug!(%what, "Purchase references an unknown product");
            ApiError::not_found("Produit non trouvé")
        }
        other => other.into(),
    })?;

    metrics::counter!("fitness_purchases_total").increment(1);
    tracing::info!(
        registrant_id = user.id.0,
        purchase_id = receipt.purchase.id,
        total = %receipt.total,
        "Purchase recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            message: "Panier et paiement créés avec succès",
            id_achat: receipt.purchase.id,
            montant: receipt.total,
            paiement: receipt.payment.into(),
        }),
    ))
}

/// GET /user/orders
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<OrdersResponse>> {
    let records = state.purchases.orders_for(user.id.0).await?;

    Ok(Json(OrdersResponse {
        message: "Commandes récupérées avec succès",
        orders: records.into_iter().map(Into::into).collect(),
    }))
}
