//! REST API handlers

pub mod auth;
pub mod courses;
pub mod health;
pub mod products;
pub mod profile;
pub mod purchases;
pub mod shared;
pub mod subscription;

pub use auth::*;
pub use courses::*;
pub use health::*;
pub use products::*;
pub use profile::*;
pub use purchases::*;
pub use subscription::*;
