//! Course booking over the real router

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

fn booking(course: &str, date: &str) -> serde_json::Value {
    json!({
        "courseName": course,
        "date": date,
        "time": "18:00",
        "duration": "2h",
    })
}

#[tokio::test]
async fn test_same_slot_booked_twice_keeps_one_course_and_conflicts() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;

    let (status, first) = app
        .post("/bookings", Some(&token), booking("Boxe", "05/11/2026"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["message"], "Réservation enregistrée");

    let (status, body) = app
        .post("/bookings", Some(&token), booking("Boxe", "05/11/2026"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Déjà inscrit à ce cours");

    assert_eq!(app.courses.course_count(), 1);
    assert_eq!(app.courses.enrollment_count(), 1);
}

#[tokio::test]
async fn test_two_registrants_share_the_course_instance() {
    let app = TestApp::new();
    let jean = app.signup("jean@example.com").await;
    let marie = app.signup("marie@example.com").await;

    let (_, a) = app
        .post("/bookings", Some(&jean), booking("MMA", "07/11/2026"))
        .await;
    let (status, b) = app
        .post("/bookings", Some(&marie), booking("MMA", "07/11/2026"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(a["id_cours"], b["id_cours"]);
    assert_eq!(app.courses.course_count(), 1);
    assert_eq!(app.courses.enrollment_count(), 2);
}

#[tokio::test]
async fn test_numeric_duration_is_accepted() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;

    let (status, body) = app
        .post(
            "/bookings",
            Some(&token),
            json!({
                "courseName": "Boxe",
                "date": "05/11/2026",
                "time": "18:00",
                "duration": 120,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(app.courses.enrollment_count(), 1);
}

#[tokio::test]
async fn test_booking_validation() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;

    // Missing duration
    let (status, body) = app
        .post(
            "/bookings",
            Some(&token),
            json!({ "courseName": "Boxe", "date": "05/11/2026", "time": "18:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Données manquantes"));

    let (status, body) = app
        .post("/bookings", Some(&token), booking("Yoga", "05/11/2026"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Nom de cours invalide");

    let (status, _) = app
        .post("/bookings", Some(&token), booking("Boxe", "2026-11-05"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.courses.course_count(), 0);
}

#[tokio::test]
async fn test_booking_requires_token() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/bookings", None, booking("Boxe", "05/11/2026"))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_previous_courses_latest_first() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;
    app.post("/bookings", Some(&token), booking("Boxe", "05/11/2026"))
        .await;
    app.post("/bookings", Some(&token), booking("Pole Dance", "10/11/2026"))
        .await;

    let (status, body) = app.get("/user/previous-courses", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let courses = body["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["nom_cours"], "Pole Dance");
    assert_eq!(courses[0]["datetime_cours"], "2026-11-10T18:00:00");
    assert_eq!(courses[0]["duree_cours"], 120);
    assert_eq!(courses[1]["nom_cours"], "Boxe");
}

#[tokio::test]
async fn test_cancel_enrollment() {
    let app = TestApp::new();
    let token = app.signup("jean@example.com").await;
    let (_, booked) = app
        .post("/bookings", Some(&token), booking("Crosstraining", "04/11/2026"))
        .await;
    let uri = format!("/user/course/{}", booked["id_cours"]);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/user/previous-courses", Some(&token)).await;
    assert!(body["courses"].as_array().unwrap().is_empty());

    let (status, _) = app
        .request(Method::DELETE, "/user/course/abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
