//! Command parsing for the chat surface: the free-text task creation
//! grammar and the inline callback-action codec.

mod actions;
mod parser;

pub use actions::InlineAction;
pub use parser::{TaskDraft, parse_task_command};
