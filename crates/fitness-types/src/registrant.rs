//! Registrant types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DomainError;

/// Unique registrant identifier (`id_inscrit`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrantId(pub i32);

impl std::fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RegistrantId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Authorization role stored in `type_inscrit`
///
/// The column only ever holds a role. Civility is kept in its own column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer account
    #[default]
    Client,
    /// Back-office account
    Admin,
}

impl Role {
    /// Column value for this role
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }

    /// Whether the role grants back-office access
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// Civility stored in `civilite_inscrit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Civility {
    Homme,
    Femme,
}

impl Civility {
    /// Column value for this civility
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Homme => "Homme",
            Self::Femme => "Femme",
        }
    }
}

impl std::fmt::Display for Civility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Civility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "homme" | "m" | "m." => Ok(Self::Homme),
            "femme" | "mme" | "f" => Ok(Self::Femme),
            _ => Err(DomainError::InvalidCivility(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("Homme".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_default_is_client() {
        assert_eq!(Role::default(), Role::Client);
        assert!(!Role::Client.is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_civility_parse() {
        assert_eq!("Homme".parse::<Civility>().unwrap(), Civility::Homme);
        assert_eq!("femme".parse::<Civility>().unwrap(), Civility::Femme);
        assert!("client".parse::<Civility>().is_err());
    }

    #[test]
    fn test_registrant_id_transparent() {
        assert_eq!(serde_json::to_string(&RegistrantId(42)).unwrap(), "42");
        assert_eq!(RegistrantId(7).to_string(), "7");
    }
}
