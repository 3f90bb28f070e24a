//! Domain model for roles, handles, and chat authorization.
//!
//! Pure values and predicates only; reading settings or user records happens
//! in the service layer against directory ports.

mod context;
mod error;
mod handle;
mod ids;
mod role;
mod user;

pub use context::{AccessContext, Caller};
pub use error::ParseRoleError;
pub use handle::{is_assignee, normalize_handle};
pub use ids::{ChatId, MessageId, UserId};
pub use role::Role;
pub use user::{Group, User, UserProfile};
