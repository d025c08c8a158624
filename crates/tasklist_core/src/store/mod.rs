//! Use-case layer over the task collection.
//!
//! # Responsibility
//! - Expose the command and query surface consumed by view layers.
//! - Keep view layers decoupled from persistence details.

pub mod task_store;
