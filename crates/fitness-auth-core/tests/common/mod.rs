//! Common test utilities for fitness-auth-core integration tests

pub mod mock_repos;
pub mod recaptcha_mock;

#[allow(unused_imports)]
pub use mock_repos::MockRegistrantRepository;
#[allow(unused_imports)]
pub use recaptcha_mock::RecaptchaMockServer;
