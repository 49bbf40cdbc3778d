//! Closed role and payout-method enumerations.
//!
//! The store deals in a fixed set of roles and payout methods; unknown
//! values are rejected at the boundary with a validation error rather than
//! stored as free text.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`Role`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0} (expected admin, client or helper)")]
pub struct RoleError(pub String);

/// A user's role within the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: catalog, payout, users, configuration.
    Admin,
    /// Regular customer account.
    #[default]
    Client,
    /// Community moderator with limited admin tooling.
    Helper,
}

impl Role {
    /// String form as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
            Self::Helper => "helper",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            "helper" => Ok(Self::Helper),
            other => Err(RoleError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an unknown [`PayoutMethod`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown payout method: {0} (expected paypal or debit-account)")]
pub struct PayoutMethodError(pub String);

/// How the store owner is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayoutMethod {
    /// PayPal transfer to a configured email.
    Paypal,
    /// Direct deposit to a bank account number.
    DebitAccount,
}

impl PayoutMethod {
    /// String form as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paypal => "paypal",
            Self::DebitAccount => "debit-account",
        }
    }
}

impl std::fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PayoutMethod {
    type Err = PayoutMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paypal" => Ok(Self::Paypal),
            "debit-account" => Ok(Self::DebitAccount),
            other => Err(PayoutMethodError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Client, Role::Helper] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        // Legacy free-text roles from the old store are not accepted
        assert!("cliente".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_default_is_client() {
        assert_eq!(Role::default(), Role::Client);
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Role = serde_json::from_str("\"helper\"").unwrap();
        assert_eq!(parsed, Role::Helper);
    }

    #[test]
    fn test_payout_method_round_trip() {
        for method in [PayoutMethod::Paypal, PayoutMethod::DebitAccount] {
            let parsed: PayoutMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_payout_method_serde_kebab_case() {
        let json = serde_json::to_string(&PayoutMethod::DebitAccount).unwrap();
        assert_eq!(json, "\"debit-account\"");
    }

    #[test]
    fn test_payout_method_rejects_unknown() {
        assert!("wire".parse::<PayoutMethod>().is_err());
    }
}
