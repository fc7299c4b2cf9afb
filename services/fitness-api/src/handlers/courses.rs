//! Course booking handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fitness_db::{BookCourse, DbError, EnrollmentRow};
use fitness_types::{parse_slot, CourseKind, DEFAULT_COURSE_DURATION_MINUTES};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::{non_blank, record_op_duration};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EnrollmentView {
    pub id_cours: i32,
    pub nom_cours: String,
    pub datetime_cours: NaiveDateTime,
    pub duree_cours: i32,
    pub date_inscription: DateTime<Utc>,
}

impl From<EnrollmentRow> for EnrollmentView {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id_cours: row.course_id,
            nom_cours: row.course_name,
            datetime_cours: row.starts_at,
            duree_cours: row.duration_minutes,
            date_inscription: row.enrolled_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub message: &'static str,
    pub courses: Vec<EnrollmentView>,
}

/// Booking form; every field is required
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
    /// `DD/MM/YYYY`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    /// Display label only, string or number; instances always last two hours
    pub duration: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: &'static str,
    pub id_cours: i32,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Null, `false`, `0` and blank strings count as missing
fn is_filled(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /user/previous-courses
pub async fn previous_courses(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<CoursesResponse>> {
    let rows = state.courses.enrollments_for(user.id.0).await?;

    Ok(Json(CoursesResponse {
        message: "Cours précédents récupérés avec succès",
        courses: rows.into_iter().map(EnrollmentView::from).collect(),
    }))
}

/// POST /bookings
pub async fn book_course(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let start = Instant::now();
    let Json(req) = payload?;

    let (Some(course_name), Some(date), Some(time), true) = (
        non_blank(req.course_name),
        non_blank(req.date),
        non_blank(req.time),
        req.duration.as_ref().is_some_and(is_filled),
    ) else {
        return Err(ApiError::bad_request(
            "Données manquantes : courseName, date, time, ou duration requis",
        ));
    };

    let kind: CourseKind = course_name
        .parse()
        .map_err(|_| ApiError::bad_request("Nom de cours invalide"))?;
    let starts_at = parse_slot(&date, &time)?;

    let result = state
        .courses
        .book(BookCourse {
            registrant_id: user.id.0,
            kind,
            starts_at,
            duration_minutes: DEFAULT_COURSE_DURATION_MINUTES,
        })
        .await;
    record_op_duration("book_course", start, result.is_ok());

    let course = result.map_err(|e| match e {
        DbError::Conflict(_) => ApiError::Conflict("Déjà inscrit à ce cours".into()),
        other => other.into(),
    })?;

    metrics::counter!("fitness_bookings_total", "course" => kind.name()).increment(1);
    tracing::info!(
        registrant_id = user.id.0,
        course_id = course.id,
        course = kind.name(),
        %starts_at,
        "Course booked"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Réservation enregistrée",
            id_cours: course.id,
        }),
    ))
}

/// DELETE /user/course/{id_cours}
pub async fn cancel_course(
    State(state): State<AppState>,
    user: AuthUser,
    course_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(course_id) = course_id?;

    if !state.courses.cancel_enrollment(user.id.0, course_id).await? {
        return Err(ApiError::not_found("Inscription non trouvée"));
    }

    tracing::info!(registrant_id = user.id.0, course_id, "Enrollment cancelled");
    Ok(Json(MessageResponse {
        message: "Inscription annulée avec succès",
    }))
}
