//! PostgreSQL subscription repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::{ActiveSubscriptionRow, PaymentRow, SubscriptionRow, SubscriptionTypeRow};
use crate::repo::{CreateSubscription, SubscriptionRepository};

/// PostgreSQL subscription repository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new subscription repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_active(&self, registrant_id: i32) -> DbResult<Option<ActiveSubscriptionRow>> {
        let row = sqlx::query_as::<_, ActiveSubscriptionRow>(
            r#"
            SELECT a.id_abonnement AS id, a.duree_abonnement AS duration_months,
                   a.datedebut_abonnement AS starts_on, a.datefin_abonnement AS ends_on,
                   a.prix_abonnement AS price, a.actif_abonnement AS active,
                   a.id_type_abonnement AS type_id, a.id_inscrit AS registrant_id,
                   t.nom_type_abonnement AS type_name
            FROM abonnement a
            JOIN type_abonnement t ON t.id_type_abonnement = a.id_type_abonnement
            WHERE a.id_inscrit = $1 AND a.actif_abonnement = TRUE
            "#,
        )
        .bind(registrant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn subscribe(&self, sub: CreateSubscription) -> DbResult<(SubscriptionRow, PaymentRow)> {
        let mut tx = self.pool.begin().await?;

        // The partial unique index rejects a second active row
        let subscription = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            INSERT INTO abonnement (duree_abonnement, datedebut_abonnement, datefin_abonnement,
                                    prix_abonnement, actif_abonnement, id_type_abonnement,
                                    id_inscrit)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id_abonnement AS id, duree_abonnement AS duration_months,
                      datedebut_abonnement AS starts_on, datefin_abonnement AS ends_on,
                      prix_abonnement AS price, actif_abonnement AS active,
                      id_type_abonnement AS type_id, id_inscrit AS registrant_id
            "#,
        )
        .bind(sub.duration_months)
        .bind(sub.starts_on)
        .bind(sub.ends_on)
        .bind(sub.price)
        .bind(sub.active)
        .bind(sub.type_id)
        .bind(sub.registrant_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::unique_or(e, "an active subscription already exists"))?;

        let payment = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO paiement (montant_paiement, date_paiement, type_paiement,
                                  id_abonnement, id_inscrit)
            VALUES ($1, CURRENT_DATE, $2, $3, $4)
            RETURNING id_paiement AS id, montant_paiement AS amount, date_paiement AS paid_on,
                      type_paiement AS method, id_achat AS purchase_id,
                      id_abonnement AS subscription_id, id_inscrit AS registrant_id
            "#,
        )
        .bind(sub.price)
        .bind(&sub.payment_method)
        .bind(subscription.id)
        .bind(sub.registrant_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE inscrit SET id_abonnement = $1 WHERE id_inscrit = $2")
            .bind(subscription.id)
            .bind(sub.registrant_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((subscription, payment))
    }

    async fn cancel_active(&self, registrant_id: i32) -> DbResult<Option<SubscriptionRow>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            UPDATE abonnement
            SET actif_abonnement = FALSE
            WHERE id_inscrit = $1 AND actif_abonnement = TRUE
            RETURNING id_abonnement AS id, duree_abonnement AS duration_months,
                      datedebut_abonnement AS starts_on, datefin_abonnement AS ends_on,
                      prix_abonnement AS price, actif_abonnement AS active,
                      id_type_abonnement AS type_id, id_inscrit AS registrant_id
            "#,
        )
        .bind(registrant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_types(&self) -> DbResult<Vec<SubscriptionTypeRow>> {
        let rows = sqlx::query_as::<_, SubscriptionTypeRow>(
            r#"
            SELECT id_type_abonnement AS id, nom_type_abonnement AS name,
                   prix_type_abonnement AS price, description_type_abonnement AS description
            FROM type_abonnement
            ORDER BY id_type_abonnement
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_types_by_name(&self, name: &str) -> DbResult<Vec<SubscriptionTypeRow>> {
        let rows = sqlx::query_as::<_, SubscriptionTypeRow>(
            r#"
            SELECT id_type_abonnement AS id, nom_type_abonnement AS name,
                   prix_type_abonnement AS price, description_type_abonnement AS description
            FROM type_abonnement
            WHERE nom_type_abonnement = $1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
