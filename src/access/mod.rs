//! Role and chat authorization for taskdesk.
//!
//! Resolves a caller's role, validates that role-gated actions originate
//! from the configured work chat, and matches live username handles against
//! stored assignee text. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
