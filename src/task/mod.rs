//! Task lifecycle management for taskdesk.
//!
//! Implements the workflow state machine: pending → review → completed with
//! a review → revision → pending rework loop, efficiency scoring, and point
//! awards. The module follows hexagonal architecture:
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
