//! PostgreSQL product repository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::ProductRow;
use crate::repo::ProductRepository;

/// PostgreSQL product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> DbResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id_produit AS id, nom_produit AS name, prix_produit AS price
            FROM produit
            ORDER BY id_produit
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id_produit AS id, nom_produit AS name, prix_produit AS price
            FROM produit
            WHERE nom_produit = $1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_if_absent(&self, name: &str, price: Decimal) -> DbResult<Option<ProductRow>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO produit (nom_produit, prix_produit)
            VALUES ($1, $2)
            ON CONFLICT (nom_produit) DO NOTHING
            RETURNING id_produit AS id, nom_produit AS name, prix_produit AS price
            "#,
        )
        .bind(name)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
