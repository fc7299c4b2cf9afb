//! reCAPTCHA verifier against a mock siteverify endpoint

mod common;

use common::RecaptchaMockServer;
use fitness_auth_core::{AuthConfig, AuthError, CaptchaVerifier, RecaptchaVerifier};

#[tokio::test]
async fn test_accepted_token() {
    let server = RecaptchaMockServer::start().await;
    let verifier = RecaptchaVerifier::new("secret", server.verify_url());

    assert!(verifier.verify(Some("good-token")).await.is_ok());
}

#[tokio::test]
async fn test_rejected_token_carries_error_codes() {
    let server = RecaptchaMockServer::start().await;
    let verifier = RecaptchaVerifier::new("secret", server.verify_url());

    match verifier.verify(Some("bad-token")).await {
        Err(AuthError::CaptchaRejected(codes)) => {
            assert_eq!(codes, vec!["invalid-input-response".to_string()]);
        }
        other => panic!("Expected CaptchaRejected, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_token_never_calls_out() {
    let verifier = RecaptchaVerifier::new("secret", "http://127.0.0.1:9/unreachable");

    let err = verifier.verify(None).await.unwrap_err();
    assert!(matches!(err, AuthError::CaptchaMissing));
    assert_eq!(err.status_code(), 400);

    let err = verifier.verify(Some("")).await.unwrap_err();
    assert!(matches!(err, AuthError::CaptchaMissing));
}

#[tokio::test]
async fn test_unparseable_response_is_internal() {
    let server = RecaptchaMockServer::start_broken().await;
    let verifier = RecaptchaVerifier::new("secret", server.verify_url());

    let err = verifier.verify(Some("good-token")).await.unwrap_err();
    assert!(matches!(err, AuthError::CaptchaUnavailable(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_no_secret_disables_verification() {
    let verifier = RecaptchaVerifier::from_config(&AuthConfig::new("jwt"));
    assert!(verifier.verify(None).await.is_ok());
}
