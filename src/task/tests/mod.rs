//! Unit tests for task lifecycle management.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod service_tests;
