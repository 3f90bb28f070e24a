//! taskdesk: task assignment and review workflow manager.
//!
//! The core of a chat-bot-driven task workflow: a lifecycle state machine
//! (pending → review → completed, with a revision rework loop), efficiency
//! scoring and point awards, role and work-chat authorization, a free-text
//! command grammar, and dashboard statistics projections. The chat
//! transport, HTTP routing, and session handling are supplied externally
//! and reach the core only through ports.
//!
//! # Architecture
//!
//! taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: pure business logic with no infrastructure dependencies
//! - **Ports**: abstract trait interfaces for external interactions
//! - **Adapters**: concrete implementations of ports (in-memory and
//!   `PostgreSQL` storage, chat notification)
//!
//! # Modules
//!
//! - [`task`]: the lifecycle state machine, scoring, and statistics
//! - [`access`]: roles, handle matching, and work-chat gating
//! - [`command`]: the `/task` grammar and inline action codec
//! - [`chat`]: notification templates, keyboards, and reply correlation

pub mod access;
pub mod chat;
pub mod command;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;
