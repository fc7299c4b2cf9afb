//! Subscription lifecycle over the real router

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

fn subscribe_body() -> serde_json::Value {
    json!({
        "duree_abonnement": 12,
        "datedebut_abonnement": "2026-11-01",
        "datefin_abonnement": "2027-10-31",
        "prix_abonnement": "29.99",
        "id_type_abonnement": 1,
        "type_paiement": "carte",
    })
}

#[tokio::test]
async fn test_cancel_without_active_subscription_is_not_found() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;

    let (status, body) = app.put("/user/abonnement/cancel", Some(&token), json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Aucun abonnement actif à annuler");
}

#[tokio::test]
async fn test_subscription_lifecycle() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;

    let (status, body) = app.get("/user/abonnement/check", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Aucun abonnement actif trouvé");

    let (status, body) = app
        .post("/user/abonnement/subscribe", Some(&token), subscribe_body())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Abonnement et paiement créés avec succès");
    assert_eq!(body["abonnement"]["actif_abonnement"], true);
    assert_eq!(body["paiement"]["montant_paiement"], "29.99");
    assert_eq!(body["paiement"]["type_paiement"], "carte");
    assert_eq!(
        body["paiement"]["id_abonnement"],
        body["abonnement"]["id_abonnement"]
    );

    // Active subscription comes back without an envelope, with its type name
    let (status, body) = app.get("/user/abonnement/check", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nom_type_abonnement"], "ESSENTIAL");
    assert_eq!(body["duree_abonnement"], 12);

    let (status, body) = app.put("/user/abonnement/cancel", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Abonnement annulé avec succès");
    assert_eq!(body["abonnement"]["actif_abonnement"], false);

    let (status, _) = app.get("/user/abonnement/check", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A cancelled subscription does not block a new one
    let (status, _) = app
        .post("/user/abonnement/subscribe", Some(&token), subscribe_body())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.subscriptions.count(), 2);
}

#[tokio::test]
async fn test_second_active_subscription_rejected() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;
    app.post("/user/abonnement/subscribe", Some(&token), subscribe_body())
        .await;

    let (status, body) = app
        .post("/user/abonnement/subscribe", Some(&token), subscribe_body())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Un abonnement actif existe déjà");
    assert_eq!(app.subscriptions.count(), 1);
}

#[tokio::test]
async fn test_subscribe_rejects_inverted_dates() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;
    let mut body = subscribe_body();
    body["datefin_abonnement"] = json!("2026-10-01");

    let (status, _) = app
        .post("/user/abonnement/subscribe", Some(&token), body)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.subscriptions.count(), 0);
}

#[tokio::test]
async fn test_subscription_types_listing_and_filter() {
    let app = TestApp::new();

    let (status, body) = app.get("/type_abonnement", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app.get("/type_abonnement?nom=PREMIUM", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["nom_type_abonnement"], "PREMIUM");
    assert_eq!(body[0]["prix_type_abonnement"], "49.99");

    let (status, _) = app.get("/type_abonnement?nom=GOLD", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
