//! PostgreSQL registrant repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::RegistrantRow;
use crate::repo::{CreateRegistrant, RegistrantRepository, UpdateRegistrant};

/// PostgreSQL registrant repository
#[derive(Clone)]
pub struct PgRegistrantRepository {
    pool: PgPool,
}

impl PgRegistrantRepository {
    /// Create a new registrant repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrantRepository for PgRegistrantRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<RegistrantRow>> {
        let row = sqlx::query_as::<_, RegistrantRow>(
            r#"
            SELECT id_inscrit AS id, email_inscrit AS email, mdp_inscrit AS password_hash,
                   nom_inscrit AS last_name, prenom_inscrit AS first_name,
                   adresse_inscrit AS address, telephone_inscrit AS phone,
                   date_naissance AS birth_date, civilite_inscrit AS civility,
                   type_inscrit AS role, id_abonnement AS subscription_id
            FROM inscrit
            WHERE id_inscrit = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<RegistrantRow>> {
        let row = sqlx::query_as::<_, RegistrantRow>(
            r#"
            SELECT id_inscrit AS id, email_inscrit AS email, mdp_inscrit AS password_hash,
                   nom_inscrit AS last_name, prenom_inscrit AS first_name,
                   adresse_inscrit AS address, telephone_inscrit AS phone,
                   date_naissance AS birth_date, civilite_inscrit AS civility,
                   type_inscrit AS role, id_abonnement AS subscription_id
            FROM inscrit
            WHERE email_inscrit = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, registrant: CreateRegistrant) -> DbResult<RegistrantRow> {
        sqlx::query_as::<_, RegistrantRow>(
            r#"
            INSERT INTO inscrit (email_inscrit, mdp_inscrit, nom_inscrit, prenom_inscrit,
                                 adresse_inscrit, telephone_inscrit, date_naissance,
                                 civilite_inscrit, type_inscrit, id_abonnement)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id_inscrit AS id, email_inscrit AS email, mdp_inscrit AS password_hash,
                      nom_inscrit AS last_name, prenom_inscrit AS first_name,
                      adresse_inscrit AS address, telephone_inscrit AS phone,
                      date_naissance AS birth_date, civilite_inscrit AS civility,
                      type_inscrit AS role, id_abonnement AS subscription_id
            "#,
        )
        .bind(&registrant.email)
        .bind(&registrant.password_hash)
        .bind(&registrant.last_name)
        .bind(&registrant.first_name)
        .bind(&registrant.address)
        .bind(&registrant.phone)
        .bind(registrant.birth_date)
        .bind(&registrant.civility)
        .bind(registrant.role.as_str())
        .bind(registrant.subscription_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::unique_or(e, "email already registered"))
    }

    async fn update_profile(
        &self,
        id: i32,
        update: UpdateRegistrant,
    ) -> DbResult<Option<RegistrantRow>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        sqlx::query_as::<_, RegistrantRow>(
            r#"
            UPDATE inscrit SET
                email_inscrit = COALESCE($2, email_inscrit),
                mdp_inscrit = COALESCE($3, mdp_inscrit),
                nom_inscrit = COALESCE($4, nom_inscrit),
                prenom_inscrit = COALESCE($5, prenom_inscrit),
                adresse_inscrit = COALESCE($6, adresse_inscrit),
                telephone_inscrit = COALESCE($7, telephone_inscrit),
                civilite_inscrit = COALESCE($8, civilite_inscrit)
            WHERE id_inscrit = $1
            RETURNING id_inscrit AS id, email_inscrit AS email, mdp_inscrit AS password_hash,
                      nom_inscrit AS last_name, prenom_inscrit AS first_name,
                      adresse_inscrit AS address, telephone_inscrit AS phone,
                      date_naissance AS birth_date, civilite_inscrit AS civility,
                      type_inscrit AS role, id_abonnement AS subscription_id
            "#,
        )
        .bind(id)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(&update.last_name)
        .bind(&update.first_name)
        .bind(&update.address)
        .bind(&update.phone)
        .bind(&update.civility)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::unique_or(e, "email already registered"))
    }
}
