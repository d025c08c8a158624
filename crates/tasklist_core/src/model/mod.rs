//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the records and predicates shared by the store, persistence
//!   and view layers.
//!
//! # Invariants
//! - Task ids are positive and unique within one collection.

pub mod task;
