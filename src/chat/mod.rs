//! Chat-surface adapters and ports: outbound notifications, keyboard
//! affordances, and revision-comment reply correlation.
//!
//! The chat transport itself is supplied externally; this module defines
//! what the core consumes from it and how lifecycle events become messages.

mod announcer;
mod correlation;
mod keyboard;
mod ports;
mod templates;

pub use announcer::ChatAnnouncer;
pub use correlation::ReplyCorrelations;
pub use keyboard::available_actions;
pub use ports::{ChatSender, IdentityResolver};
pub use templates::render_event;
