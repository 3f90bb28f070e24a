//! Error types for access-control domain values.

use thiserror::Error;

/// Error returned while parsing a role from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
