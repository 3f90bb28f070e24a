//! User roles and management capability checks.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};

/// Workflow role of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Works on assigned tasks; the default for unknown users.
    #[default]
    Executor,
    /// Reviews and approves submitted work.
    Manager,
    /// Full control, including role assignment.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Executor => "executor",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may review, approve, and directly complete tasks.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "executor" => Ok(Self::Executor),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
