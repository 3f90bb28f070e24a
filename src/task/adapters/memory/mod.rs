//! In-memory task repository adapter.

mod task;

pub use task::InMemoryTaskRepository;
