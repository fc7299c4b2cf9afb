//! Signup and login handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fitness_auth_core::SignupInput;
use fitness_types::{Civility, Role};

use crate::error::ApiResult;
use crate::handlers::shared::{non_blank, record_op_duration};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email_inscrit: String,
    #[serde(default)]
    pub mdp_inscrit: String,
    pub nom_inscrit: Option<String>,
    pub prenom_inscrit: Option<String>,
    pub adresse_inscrit: Option<String>,
    pub telephone_inscrit: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub civilite_inscrit: Option<Civility>,
    pub type_inscrit: Option<Role>,
    pub id_abonnement: Option<i32>,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupUser {
    pub id_inscrit: i32,
    pub email_inscrit: String,
    pub nom_inscrit: Option<String>,
    pub prenom_inscrit: Option<String>,
    pub type_inscrit: Role,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: SignupUser,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email_inscrit: String,
    #[serde(default)]
    pub mdp_inscrit: String,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let start = Instant::now();
    let Json(req) = payload?;

    state.captcha.verify(req.recaptcha_token.as_deref()).await?;

    let input = SignupInput {
        email: req.email_inscrit,
        password: req.mdp_inscrit,
        last_name: non_blank(req.nom_inscrit),
        first_name: non_blank(req.prenom_inscrit),
        address: non_blank(req.adresse_inscrit),
        phone: non_blank(req.telephone_inscrit),
        birth_date: req.date_naissance,
        civility: req.civilite_inscrit,
        role: req.type_inscrit,
        subscription_id: req.id_abonnement,
    };

    let result = state.auth.signup(input).await;
    record_op_duration("signup", start, result.is_ok());
    let (registrant, token) = result?;

    metrics::counter!("fitness_signups_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: SignupUser {
                id_inscrit: registrant.id,
                type_inscrit: registrant.role(),
                email_inscrit: registrant.email,
                nom_inscrit: registrant.last_name,
                prenom_inscrit: registrant.first_name,
            },
            token,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let start = Instant::now();
    let Json(req) = payload?;

    state.captcha.verify(req.recaptcha_token.as_deref()).await?;

    let result = state.auth.login(&req.email_inscrit, &req.mdp_inscrit).await;
    record_op_duration("login", start, result.is_ok());

    let outcome = if result.is_ok() { "success" } else { "failure" };
    metrics::counter!("fitness_logins_total", "result" => outcome).increment(1);

    let (registrant, token) = result?;
    tracing::info!(registrant_id = registrant.id, "Registrant logged in");

    Ok(Json(LoginResponse {
        message: "Connexion réussie",
        token,
    }))
}
