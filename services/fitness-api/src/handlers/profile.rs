//! Profile handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fitness_auth_core::ProfileUpdate;
use fitness_db::RegistrantRow;
use fitness_types::Civility;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::non_blank;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registrant as shown to its owner; password hash and role are not part of it
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id_inscrit: i32,
    pub email_inscrit: String,
    pub nom_inscrit: Option<String>,
    pub prenom_inscrit: Option<String>,
    pub adresse_inscrit: Option<String>,
    pub telephone_inscrit: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub civilite_inscrit: Option<String>,
    pub id_abonnement: Option<i32>,
}

impl From<RegistrantRow> for ProfileView {
    fn from(row: RegistrantRow) -> Self {
        Self {
            id_inscrit: row.id,
            email_inscrit: row.email,
            nom_inscrit: row.last_name,
            prenom_inscrit: row.first_name,
            adresse_inscrit: row.address,
            telephone_inscrit: row.phone,
            date_naissance: row.birth_date,
            civilite_inscrit: row.civility,
            id_abonnement: row.subscription_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: ProfileView,
}

/// Profile form body; absent or blank fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub civilite: Option<Civility>,
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "emailConfirm")]
    pub email_confirm: Option<String>,
    pub password: Option<String>,
    pub adress: Option<String>,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /user/profil
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let registrant = state.auth.profile(user.id.0).await?;

    Ok(Json(ProfileResponse {
        message: "Profil récupéré avec succès",
        user: registrant.into(),
    }))
}

/// PUT /user/profil
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<ProfileResponse>> {
    let Json(req) = payload?;

    state.captcha.verify(req.recaptcha_token.as_deref()).await?;

    let email = non_blank(req.email);
    let email_confirm = non_blank(req.email_confirm);
    if let (Some(email), Some(confirm)) = (&email, &email_confirm) {
        if email.trim() != confirm.trim() {
            return Err(ApiError::bad_request("Les emails ne correspondent pas"));
        }
    }

    let update = ProfileUpdate {
        email,
        password: non_blank(req.password),
        last_name: non_blank(req.name),
        first_name: non_blank(req.firstname),
        address: non_blank(req.adress),
        phone: non_blank(req.phone),
        civility: req.civilite,
    };

    let registrant = state.auth.update_profile(user.id.0, update).await?;
    tracing::info!(registrant_id = registrant.id, "Profile updated");

    Ok(Json(ProfileResponse {
        message: "Profil mis à jour avec succès",
        user: registrant.into(),
    }))
}
