//! Mock siteverify endpoint

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VERIFY_PATH: &str = "/recaptcha/api/siteverify";

/// Wiremock server answering siteverify requests
pub struct RecaptchaMockServer {
    server: MockServer,
}

impl RecaptchaMockServer {
    /// Accept `good-token`, reject anything else with `invalid-input-response`
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .and(body_string_contains("response=good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "hostname": "localhost"
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error-codes": ["invalid-input-response"]
            })))
            .with_priority(2)
            .mount(&server)
            .await;

        Self { server }
    }

    /// Server that answers with a non-JSON error page
    #[allow(dead_code)]
    pub async fn start_broken() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn verify_url(&self) -> String {
        format!("{}{}", self.server.uri(), VERIFY_PATH)
    }
}
