//! PostgreSQL course repository implementation
//!
//! Course instances are materialised lazily: booking a slot upserts the
//! `(nom_cours, datetime_cours)` row and enrolls the registrant in the same
//! transaction.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::{CourseRow, EnrollmentRow};
use crate::repo::{BookCourse, CourseRepository};

/// PostgreSQL course repository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new course repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn book(&self, booking: BookCourse) -> DbResult<CourseRow> {
        let mut tx = self.pool.begin().await?;

        // The no-op update makes RETURNING yield the existing row on conflict
        let course = sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO cours (nom_cours, duree_cours, datetime_cours, prix_cours, id_coach)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (nom_cours, datetime_cours)
                DO UPDATE SET nom_cours = EXCLUDED.nom_cours
            RETURNING id_cours AS id, nom_cours AS name, duree_cours AS duration_minutes,
                      datetime_cours AS starts_at, prix_cours AS price, id_coach AS coach_id
            "#,
        )
        .bind(booking.kind.name())
        .bind(booking.duration_minutes)
        .bind(booking.starts_at)
        .bind(Decimal::ZERO)
        .bind(booking.kind.coach_id())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO inscription (id_inscrit, id_cours)
            VALUES ($1, $2)
            "#,
        )
        .bind(booking.registrant_id)
        .bind(course.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::unique_or(e, "already enrolled in this course"))?;

        tx.commit().await?;

        tracing::debug!(
            registrant_id = booking.registrant_id,
            course_id = course.id,
            "enrollment recorded"
        );

        Ok(course)
    }

    async fn enrollments_for(&self, registrant_id: i32) -> DbResult<Vec<EnrollmentRow>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT c.id_cours AS course_id, c.nom_cours AS course_name,
                   c.datetime_cours AS starts_at, c.duree_cours AS duration_minutes,
                   i.date_inscription AS enrolled_at
            FROM inscription i
            JOIN cours c ON c.id_cours = i.id_cours
            WHERE i.id_inscrit = $1
            ORDER BY c.datetime_cours DESC
            "#,
        )
        .bind(registrant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn cancel_enrollment(&self, registrant_id: i32, course_id: i32) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM inscription
            WHERE id_inscrit = $1 AND id_cours = $2
            "#,
        )
        .bind(registrant_id)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
