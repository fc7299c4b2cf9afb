//! Subscription handlers

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fitness_db::{ActiveSubscriptionRow, CreateSubscription, DbError, SubscriptionTypeRow};
use fitness_types::SubscriptionState;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::{
    non_blank, record_op_duration, NameFilter, PaymentView, SubscriptionView,
};
use crate::state::AppState;

const ALREADY_ACTIVE: &str = "Un abonnement actif existe déjà";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Active subscription with its type name, sent without an envelope
#[derive(Debug, Serialize)]
pub struct ActiveSubscriptionView {
    #[serde(flatten)]
    pub subscription: SubscriptionView,
    pub nom_type_abonnement: String,
}

impl From<ActiveSubscriptionRow> for ActiveSubscriptionView {
    fn from(row: ActiveSubscriptionRow) -> Self {
        Self {
            subscription: row.subscription.into(),
            nom_type_abonnement: row.type_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub duree_abonnement: i32,
    pub datedebut_abonnement: NaiveDate,
    pub datefin_abonnement: NaiveDate,
    pub prix_abonnement: Decimal,
    pub actif_abonnement: Option<bool>,
    pub id_type_abonnement: i32,
    pub type_paiement: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: &'static str,
    pub abonnement: SubscriptionView,
    pub paiement: PaymentView,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub message: &'static str,
    pub abonnement: SubscriptionView,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionTypeView {
    pub id_type_abonnement: i32,
    pub nom_type_abonnement: String,
    pub prix_type_abonnement: Decimal,
    pub description_type_abonnement: Option<String>,
}

impl From<SubscriptionTypeRow> for SubscriptionTypeView {
    fn from(row: SubscriptionTypeRow) -> Self {
        Self {
            id_type_abonnement: row.id,
            nom_type_abonnement: row.name,
            prix_type_abonnement: row.price,
            description_type_abonnement: row.description,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /user/abonnement/check
pub async fn check_subscription(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ActiveSubscriptionView>> {
    let active = state
        .subscriptions
        .find_active(user.id.0)
        .await?
        .ok_or_else(|| ApiError::not_found("Aucun abonnement actif trouvé"))?;

    Ok(Json(active.into()))
}

/// POST /user/abonnement/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubscribeResponse>)> {
    let start = Instant::now();
    let Json(req) = payload?;

    if req.datefin_abonnement < req.datedebut_abonnement {
        return Err(ApiError::bad_request(
            "La date de fin précède la date de début",
        ));
    }

    let current = state.subscriptions.find_active(user.id.0).await?;
    SubscriptionState::from_active_flag(current.map(|_| true))
        .subscribe()
        .map_err(|_| ApiError::bad_request(ALREADY_ACTIVE))?;

    let result = state
        .subscriptions
        .subscribe(CreateSubscription {
            registrant_id: user.id.0,
            type_id: req.id_type_abonnement,
            duration_months: req.duree_abonnement,
            starts_on: req.datedebut_abonnement,
            ends_on: req.datefin_abonnement,
            price: req.prix_abonnement,
            active: req.actif_abonnement.unwrap_or(true),
            payment_method: non_blank(req.type_paiement),
        })
        .await;
    record_op_duration("subscribe", start, result.is_ok());

    // A concurrent subscribe can still lose the race on the unique index
    let (subscription, payment) = result.map_err(|e| match e {
        DbError::Conflict(_) => ApiError::bad_request(ALREADY_ACTIVE),
        other => other.into(),
    })?;

    metrics::counter!("fitness_subscriptions_created_total").increment(1);
    tracing::info!(
        registrant_id = user.id.0,
        subscription_id = subscription.id,
        type_id = subscription.type_id,
        "Subscription created"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: "Abonnement et paiement créés avec succès",
            abonnement: subscription.into(),
            paiement: payment.into(),
        }),
    ))
}

/// PUT /user/abonnement/cancel
pub async fn cancel_subscription(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<CancelResponse>> {
    let cancelled = state
        .subscriptions
        .cancel_active(user.id.0)
        .await?
        .ok_or_else(|| ApiError::not_found("Aucun abonnement actif à annuler"))?;

    metrics::counter!("fitness_subscriptions_cancelled_total").increment(1);
    tracing::info!(
        registrant_id = user.id.0,
        subscription_id = cancelled.id,
        "Subscription cancelled"
    );

    Ok(Json(CancelResponse {
        message: "Abonnement annulé avec succès",
        abonnement: cancelled.into(),
    }))
}

/// GET /type_abonnement[?nom=]
pub async fn list_subscription_types(
    State(state): State<AppState>,
    filter: Result<Query<NameFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<SubscriptionTypeView>>> {
    let Query(filter) = filter?;

    let rows = match non_blank(filter.nom) {
        Some(name) => {
            let rows = state.subscriptions.find_types_by_name(&name).await?;
            if rows.is_empty() {
                return Err(ApiError::not_found("Type d’abonnement non trouvé"));
            }
            rows
        }
        None => state.subscriptions.list_types().await?,
    };

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
