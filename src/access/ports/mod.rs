//! Port contracts for user, group, and settings storage.
//!
//! Ports define infrastructure-agnostic interfaces used by access services
//! and by the task lifecycle engine's point award.

pub mod directory;

pub use directory::{
    DirectoryError, DirectoryResult, GroupRepository, SettingsRepository, UserRepository,
};
