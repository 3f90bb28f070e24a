//! Free-text grammar for the task creation command.
//!
//! One line of text yields title, assignee, description, and deadline:
//!
//! ```text
//! /task Create design @anna_designer Build homepage mockup 2025-06-15 18:00
//!       └─ title ──┘ └─ assignee ──┘ └─ description ────┘ └─ deadline ──┘
//! ```
//!
//! Tokens accumulate into the title until the first `@`-prefixed token,
//! which becomes the assignee; later tokens accumulate into the description
//! until a `YYYY-MM-DD` token, which becomes the deadline (consuming an
//! immediately following `H:MM`/`HH:MM` token). Parsing never fails; callers
//! reject incomplete drafts with a usage message.

use crate::task::domain::Deadline;

/// Parsed but unvalidated task creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Space-joined tokens before the assignee.
    pub title: String,
    /// The first `@`-prefixed token, `@` included; empty when absent.
    pub assignee: String,
    /// Space-joined tokens between assignee and deadline.
    pub description: String,
    /// Captured deadline, if a date token appeared.
    pub deadline: Option<Deadline>,
}

impl TaskDraft {
    /// Whether the draft has the required title and assignee.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.assignee.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseMode {
    Title,
    Description,
    Done,
}

/// Parses the free-text body of a task creation command.
#[must_use]
pub fn parse_task_command(input: &str) -> TaskDraft {
    let mut draft = TaskDraft::default();
    let mut title_tokens: Vec<&str> = Vec::new();
    let mut description_tokens: Vec<&str> = Vec::new();
    let mut mode = ParseMode::Title;

    let mut tokens = input.split_whitespace().peekable();
    while let Some(token) = tokens.next() {
        if mode == ParseMode::Done {
            break;
        }
        if draft.assignee.is_empty() && token.starts_with('@') && token.len() > 1 {
            draft.assignee = token.to_owned();
            mode = ParseMode::Description;
            continue;
        }
        if let Some(date) = Deadline::parse_date_token(token) {
            let time = tokens
                .peek()
                .and_then(|next_token| Deadline::parse_time_token(next_token));
            if time.is_some() {
                tokens.next();
            }
            draft.deadline = Some(Deadline::new(date, time));
            mode = ParseMode::Done;
            continue;
        }
        match mode {
            ParseMode::Title => title_tokens.push(token),
            ParseMode::Description => description_tokens.push(token),
            ParseMode::Done => {}
        }
    }

    draft.title = title_tokens.join(" ");
    draft.description = description_tokens.join(" ");
    draft
}
