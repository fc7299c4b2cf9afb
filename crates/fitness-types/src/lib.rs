//! FitnessDev Types - Shared domain types
//!
//! This crate contains domain types used across FitnessDev crates:
//! - Registrant identity, role and civility
//! - Course catalogue and weekly slot generation
//! - Subscription lifecycle
//! - Products and cart lines

pub mod cart;
pub mod course;
pub mod error;
pub mod product;
pub mod registrant;
pub mod subscription;

pub use cart::*;
pub use course::*;
pub use error::*;
pub use product::*;
pub use registrant::*;
pub use subscription::*;
