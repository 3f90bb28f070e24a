//! Application services for authorization and registration.

mod context;

pub use context::{AccessError, AccessResult, AccessService, WORK_CHAT_KEY};
