//! Product catalogue handlers

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitness_db::ProductRow;

use crate::error::{ApiError, ApiResult};
use crate::handlers::shared::{non_blank, NameFilter, OneOrMany};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id_produit: i32,
    pub nom_produit: String,
    pub prix_produit: Decimal,
}

impl From<ProductRow> for ProductView {
    fn from(row: ProductRow) -> Self {
        Self {
            id_produit: row.id,
            nom_produit: row.name,
            prix_produit: row.price,
        }
    }
}

/// Entry of an add-products body; invalid entries are skipped, not rejected
#[derive(Debug, Deserialize)]
pub struct NewProductRequest {
    pub nom_produit: Option<String>,
    pub prix_produit: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct AddProductsResponse {
    pub message: String,
    pub produits: Vec<ProductView>,
}

/// GET /produit[?nom=]
pub async fn list_products(
    State(state): State<AppState>,
    filter: Result<Query<NameFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductView>>> {
    let Query(filter) = filter?;

    let rows = match non_blank(filter.nom) {
        Some(name) => {
            let rows = state.products.find_by_name(&name).await?;
            if rows.is_empty() {
                return Err(ApiError::not_found("Produit non trouvé"));
            }
            rows
        }
        None => state.products.list().await?,
    };

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /produit/add
pub async fn add_products(
    State(state): State<AppState>,
    payload: Result<Json<OneOrMany<NewProductRequest>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AddProductsResponse>)> {
    let Json(body) = payload?;

    let mut inserted = Vec::new();
    for entry in body.into_vec() {
        let (Some(name), Some(price)) = (non_blank(entry.nom_produit), entry.prix_produit) else {
            continue;
        };
        if price <= Decimal::ZERO {
            continue;
        }

        // Existing names come back as None
        if let Some(row) = state.products.insert_if_absent(name.trim(), price).await? {
            inserted.push(ProductView::from(row));
        }
    }

    metrics::counter!("fitness_products_added_total").increment(inserted.len() as u64);
    tracing::info!(count = inserted.len(), "Products added");

    Ok((
        StatusCode::CREATED,
        Json(AddProductsResponse {
            message: format!("{} produit(s) ajouté(s)", inserted.len()),
            produits: inserted,
        }),
    ))
}
