//! Domain model for the swipe-card task manager.
//!
//! # Responsibility
//! - Define the Task aggregate and the value types it owns.
//! - Keep the shared-schema wire shape next to the types that mirror it.
//!
//! # Invariants
//! - A task exclusively owns its subtasks and its location; nothing is
//!   shared across owners and no back-references exist.
//! - No model type carries an identity field; storage owns IDs.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod location;
pub mod subtask;
pub mod task;
