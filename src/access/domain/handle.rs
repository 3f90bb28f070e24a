//! Username handle normalization and assignee matching.
//!
//! Assignment is recorded by username text, so stored and live handles may
//! disagree on case and on the presence of a leading `@`. All comparisons go
//! through [`normalize_handle`] so that every combination matches.

/// Normalizes a username handle: trims whitespace, strips one leading `@`,
/// and lowercases the remainder.
#[must_use]
pub fn normalize_handle(handle: &str) -> String {
    let trimmed = handle.trim();
    let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
    bare.to_lowercase()
}

/// Whether `current` identifies the same user as the stored `assignee`
/// handle, comparing normalized forms.
///
/// Empty handles never match: a task without an assignee has no owner.
#[must_use]
pub fn is_assignee(current: &str, assignee: &str) -> bool {
    let lhs = normalize_handle(current);
    let rhs = normalize_handle(assignee);
    !lhs.is_empty() && lhs == rhs
}
