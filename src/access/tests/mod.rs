//! Unit tests for roles, handles, and chat authorization.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod context_tests;
mod directory_tests;
