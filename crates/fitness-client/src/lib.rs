//! FitnessDev Client - state and transport for front-ends
//!
//! Everything a UI needs besides rendering: a typed REST client for the API,
//! an auth store and a cart store that persist to a [`LocalStore`], and the
//! course-booking view logic (weekly slots, upcoming vs. past enrollments).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fitness_client::{AppState, ClientConfig, FileStore};
//!
//! let config = ClientConfig::builder().base_url("http://localhost:3000").build()?;
//! let store = Arc::new(FileStore::open("./.fitness")?);
//! let app = AppState::new(config, store)?;
//!
//! app.auth().rehydrate(app.client()).await;
//! app.cart().upsert_item(item)?;
//! let receipt = app.checkout("carte").await?;
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;

pub use api::FitnessClient;
pub use auth::{decode_claims, AuthStore, TokenClaims};
pub use booking::{booking_request, course_offers, history, upcoming, CourseOffer};
pub use cart::CartStore;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use error::{ClientError, Result};
pub use models::*;
pub use state::AppState;
pub use storage::{FileStore, LocalStore, MemoryStore, CART_KEY, TOKEN_KEY};
