//! Subscription (abonnement) types

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Unique subscription identifier (`id_abonnement`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub i32);

/// Unique subscription type identifier (`id_type_abonnement`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionTypeId(pub i32);

/// Lifecycle of a registrant's subscription
///
/// `None -> Active` on subscribe, `Active -> Inactive` on cancel. Cancellation
/// is a soft update; there is no reactivation of an inactive row, a new
/// subscribe creates a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// No subscription row yet
    None,
    /// `actif_abonnement = true`
    Active,
    /// `actif_abonnement = false`
    Inactive,
}

impl SubscriptionState {
    /// State derived from the latest subscription row, if any
    pub fn from_active_flag(active: Option<bool>) -> Self {
        match active {
            None => Self::None,
            Some(true) => Self::Active,
            Some(false) => Self::Inactive,
        }
    }

    /// Transition taken by a subscribe request
    pub fn subscribe(self) -> Result<Self, DomainError> {
        match self {
            Self::None | Self::Inactive => Ok(Self::Active),
            Self::Active => Err(DomainError::InvalidTransition {
                from: self,
                action: "subscribe",
            }),
        }
    }

    /// Transition taken by a cancel request
    pub fn cancel(self) -> Result<Self, DomainError> {
        match self {
            Self::Active => Ok(Self::Inactive),
            Self::None | Self::Inactive => Err(DomainError::InvalidTransition {
                from: self,
                action: "cancel",
            }),
        }
    }

    /// Whether the subscription currently grants access
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_from_none() {
        assert_eq!(
            SubscriptionState::None.subscribe().unwrap(),
            SubscriptionState::Active
        );
    }

    #[test]
    fn test_subscribe_twice_rejected() {
        let err = SubscriptionState::Active.subscribe().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: SubscriptionState::Active,
                action: "subscribe"
            }
        ));
    }

    #[test]
    fn test_cancel_lifecycle() {
        let state = SubscriptionState::None.subscribe().unwrap();
        let state = state.cancel().unwrap();
        assert_eq!(state, SubscriptionState::Inactive);
        assert!(state.cancel().is_err());
        assert!(SubscriptionState::None.cancel().is_err());
    }

    #[test]
    fn test_from_active_flag() {
        assert_eq!(SubscriptionState::from_active_flag(None), SubscriptionState::None);
        assert!(SubscriptionState::from_active_flag(Some(true)).is_active());
        assert_eq!(
            SubscriptionState::from_active_flag(Some(false)),
            SubscriptionState::Inactive
        );
    }
}
