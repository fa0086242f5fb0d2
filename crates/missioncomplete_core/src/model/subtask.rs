//! Subtask checklist line item.
//!
//! # Responsibility
//! - Represent one checklist entry owned by exactly one task.
//! - Keep the completion flag as the only mutable state.
//!
//! # Invariants
//! - `completed` defaults to `false` at construction and on the wire.
//! - Wire field names are `title` and `completed`, exactly.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One checklist line inside a task's ordered subtask list.
///
/// The title is non-empty by convention only; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    title: String,
    #[serde(default)]
    completed: bool,
}

impl Subtask {
    /// Creates a not-yet-completed subtask.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_completed(title, false)
    }

    /// Creates a subtask with an explicit completion flag.
    ///
    /// Used by storage and import paths that restore persisted state.
    pub fn with_completed(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }

    /// Returns the stored title unchanged.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether this subtask has been checked off.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Overwrites the completion flag. The only mutator on this type.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl Display for Subtask {
    // Historic card wording: subtask debug lines start with `Task`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task \"{}\" is {}",
            self.title,
            if self.completed {
                "completed"
            } else {
                "not completed"
            }
        )
    }
}
