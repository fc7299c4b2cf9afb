//! PostgreSQL purchase repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use fitness_types::order_total;

use crate::error::{DbError, DbResult};
use crate::models::{OrderRecord, PaymentRow, PurchaseLineRow, PurchaseReceipt, PurchaseRow};
use crate::repo::{CreatePurchase, PurchaseRepository};

/// PostgreSQL purchase repository
#[derive(Clone)]
pub struct PgPurchaseRepository {
    pool: PgPool,
}

impl PgPurchaseRepository {
    /// Create a new purchase repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseRepository for PgPurchaseRepository {
    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseReceipt> {
        let mut tx = self.pool.begin().await?;

        let ids: Vec<i32> = purchase.lines.iter().map(|l| l.product_id.0).collect();
        let prices: HashMap<i32, Decimal> = sqlx::query_as::<_, (i32, Decimal)>(
            "SELECT id_produit, prix_produit FROM produit WHERE id_produit = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        let mut priced = Vec::with_capacity(purchase.lines.len());
        for line in &purchase.lines {
            let price = prices
                .get(&line.product_id.0)
                .copied()
                .ok_or_else(|| DbError::NotFound(format!("product {}", line.product_id)))?;
            priced.push((price, line.quantity));
        }
        let total = order_total(priced);

        let row = sqlx::query_as::<_, PurchaseRow>(
            r#"
            INSERT INTO achat (id_inscrit)
            VALUES ($1)
            RETURNING id_achat AS id, date_achat AS purchased_at, id_inscrit AS registrant_id
            "#,
        )
        .bind(purchase.registrant_id)
        .fetch_one(&mut *tx)
        .await?;

        for line in &purchase.lines {
            // Repeated product ids in one request merge into a single line
            sqlx::query(
                r#"
                INSERT INTO achat_produit (id_achat, id_produit, quantite)
                VALUES ($1, $2, $3)
                ON CONFLICT (id_achat, id_produit)
                    DO UPDATE SET quantite = achat_produit.quantite + EXCLUDED.quantite
                "#,
            )
            .bind(row.id)
            .bind(line.product_id.0)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        let payment = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO paiement (montant_paiement, date_paiement, type_paiement,
                                  id_achat, id_inscrit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id_paiement AS id, montant_paiement AS amount, date_paiement AS paid_on,
                      type_paiement AS method, id_achat AS purchase_id,
                      id_abonnement AS subscription_id, id_inscrit AS registrant_id
            "#,
        )
        .bind(total)
        .bind(Utc::now().date_naive())
        .bind(&purchase.payment_method)
        .bind(row.id)
        .bind(purchase.registrant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PurchaseReceipt {
            purchase: row,
            total,
            payment,
        })
    }

    async fn orders_for(&self, registrant_id: i32) -> DbResult<Vec<OrderRecord>> {
        let purchases = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id_achat AS id, date_achat AS purchased_at, id_inscrit AS registrant_id
            FROM achat
            WHERE id_inscrit = $1
            ORDER BY date_achat DESC, id_achat DESC
            "#,
        )
        .bind(registrant_id)
        .fetch_all(&self.pool)
        .await?;

        let lines = sqlx::query_as::<_, PurchaseLineRow>(
            r#"
            SELECT ap.id_achat AS purchase_id, p.id_produit AS product_id,
                   p.nom_produit AS product_name, p.prix_produit AS unit_price,
                   ap.quantite AS quantity
            FROM achat_produit ap
            JOIN achat a ON a.id_achat = ap.id_achat
            JOIN produit p ON p.id_produit = ap.id_produit
            WHERE a.id_inscrit = $1
            ORDER BY ap.id_achat, p.id_produit
            "#,
        )
        .bind(registrant_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_purchase: HashMap<i32, Vec<PurchaseLineRow>> = HashMap::new();
        for line in lines {
            by_purchase.entry(line.purchase_id).or_default().push(line);
        }

        Ok(purchases
            .into_iter()
            .map(|purchase| {
                let lines = by_purchase.remove(&purchase.id).unwrap_or_default();
                let total = order_total(lines.iter().map(|l| (l.unit_price, l.quantity)));
                OrderRecord {
                    purchase,
                    lines,
                    total,
                }
            })
            .collect())
    }
}
