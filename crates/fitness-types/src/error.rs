//! Common error types

use thiserror::Error;

/// Domain-level errors shared by FitnessDev crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Course name is not part of the catalogue
    #[error("unknown course: {0}")]
    UnknownCourse(String),

    /// Role value is not recognised
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Civility value is not recognised
    #[error("invalid civility: {0}")]
    InvalidCivility(String),

    /// Date or time of a course slot could not be parsed
    #[error("invalid course slot: {0}")]
    InvalidSlot(String),

    /// Subscription state change that the lifecycle does not allow
    #[error("invalid subscription transition: {from:?} -> {action}")]
    InvalidTransition {
        from: crate::SubscriptionState,
        action: &'static str,
    },
}
