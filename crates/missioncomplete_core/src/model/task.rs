//! Task aggregate model.
//!
//! # Responsibility
//! - Define the top-level to-do item with its owned subtasks and location.
//! - Enforce construction validation and index-checked subtask edits.
//! - Render the debug block and the shared-schema wire form.
//!
//! # Invariants
//! - `title` is never blank.
//! - `difficulty` is `None` or a non-negative value; the wire carries the
//!   raw numeric form where any negative value means unset.
//! - Scalar fields are fixed at construction; only the location and the
//!   subtask list change afterwards.
//! - Subtask order is insertion order; display and removal depend on it.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::location::TaskLocation;
use crate::model::subtask::Subtask;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical wire value standing in for an unset difficulty.
pub const DIFFICULTY_UNSET: f64 = -1.0;

/// Maps a raw schema difficulty to the explicit optional form.
///
/// Any negative value means "not set" in the shared task schema.
pub fn normalize_difficulty(raw: f64) -> Option<f64> {
    if raw < 0.0 {
        None
    } else {
        Some(raw)
    }
}

/// Validation failures raised by task construction and subtask indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Tasks require a non-blank title.
    MissingTitle,
    /// Index-based subtask operation outside the valid range.
    SubtaskIndexOutOfRange { index: usize, len: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "task title must not be empty"),
            Self::SubtaskIndexOutOfRange { index, len } => write!(
                f,
                "subtask index {index} is out of range for {len} subtask(s)"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// The main task object for all tasks within the application.
///
/// A task exclusively owns its subtasks and its optional location; both are
/// dropped with it. There is no identity field here: storage owns IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire", into = "TaskWire")]
pub struct Task {
    title: String,
    note: Option<String>,
    /// Unix epoch milliseconds.
    due: Option<i64>,
    difficulty: Option<f64>,
    completed: bool,
    location: Option<TaskLocation>,
    subtasks: Vec<Subtask>,
}

impl Task {
    /// Creates a task with all scalar fields fixed and no subtasks yet.
    ///
    /// A negative `difficulty` value normalizes to `None`.
    ///
    /// # Errors
    /// - `MissingTitle` when `title` is empty or whitespace-only.
    pub fn new(
        title: impl Into<String>,
        note: Option<String>,
        due: Option<i64>,
        difficulty: Option<f64>,
        completed: bool,
        location: Option<TaskLocation>,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::MissingTitle);
        }

        Ok(Self {
            title,
            note,
            due,
            difficulty: difficulty.and_then(normalize_difficulty),
            completed,
            location,
            subtasks: Vec::new(),
        })
    }

    /// Creates a minimal open task with only a title set.
    pub fn titled(title: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::new(title, None, None, None, false, None)
    }

    /// Returns the stored title unchanged.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional free-form note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the due date as Unix epoch milliseconds, when set.
    pub fn due(&self) -> Option<i64> {
        self.due
    }

    /// Returns the difficulty as an explicit option; `None` means unset.
    pub fn difficulty(&self) -> Option<f64> {
        self.difficulty
    }

    /// Returns the raw schema form of the difficulty, [`DIFFICULTY_UNSET`]
    /// when unset.
    pub fn difficulty_raw(&self) -> f64 {
        self.difficulty.unwrap_or(DIFFICULTY_UNSET)
    }

    /// Returns whether this overall task is completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the attached location, if any.
    pub fn location(&self) -> Option<TaskLocation> {
        self.location
    }

    /// Attaches or clears the optional location.
    pub fn set_location(&mut self, location: Option<TaskLocation>) {
        self.location = location;
    }

    /// Appends a subtask to the end of the ordered list.
    pub fn add_subtask(&mut self, subtask: Subtask) {
        self.subtasks.push(subtask);
    }

    /// Inserts a subtask at `index`, shifting later entries back.
    ///
    /// # Errors
    /// - `SubtaskIndexOutOfRange` when `index > subtask_count()`.
    pub fn insert_subtask(
        &mut self,
        index: usize,
        subtask: Subtask,
    ) -> Result<(), TaskValidationError> {
        if index > self.subtasks.len() {
            return Err(self.index_error(index));
        }
        self.subtasks.insert(index, subtask);
        Ok(())
    }

    /// Removes and returns the subtask at `index`.
    ///
    /// # Errors
    /// - `SubtaskIndexOutOfRange` when `index >= subtask_count()`.
    pub fn remove_subtask(&mut self, index: usize) -> Result<Subtask, TaskValidationError> {
        if index >= self.subtasks.len() {
            return Err(self.index_error(index));
        }
        Ok(self.subtasks.remove(index))
    }

    /// Returns mutable access to one subtask, for completion toggling.
    ///
    /// # Errors
    /// - `SubtaskIndexOutOfRange` when `index >= subtask_count()`.
    pub fn subtask_mut(&mut self, index: usize) -> Result<&mut Subtask, TaskValidationError> {
        let len = self.subtasks.len();
        self.subtasks
            .get_mut(index)
            .ok_or(TaskValidationError::SubtaskIndexOutOfRange { index, len })
    }

    /// Returns the ordered subtask list, read-only.
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the number of subtasks attached to this task.
    pub fn subtask_count(&self) -> usize {
        self.subtasks.len()
    }

    /// True iff every subtask is completed; vacuously true when empty.
    pub fn all_subtasks_completed(&self) -> bool {
        self.subtasks.iter().all(Subtask::is_completed)
    }

    fn index_error(&self, index: usize) -> TaskValidationError {
        TaskValidationError::SubtaskIndexOutOfRange {
            index,
            len: self.subtasks.len(),
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Note: {}", self.note.as_deref().unwrap_or("None"))?;
        writeln!(f, "Difficulty: {}", self.difficulty_raw())?;
        match self.due {
            Some(due) => writeln!(f, "Due: {due}")?,
            None => writeln!(f, "Due: None")?,
        }
        writeln!(f, "Completed: {}", self.completed)?;
        match &self.location {
            Some(location) => writeln!(f, "Location: {location}")?,
            None => writeln!(f, "Location: None")?,
        }
        writeln!(f, "Subtasks:")?;
        for subtask in &self.subtasks {
            writeln!(f, "{subtask}")?;
        }
        write!(f, "<END SUBTASKS>")
    }
}

/// Wire mirror matching the shared task schema field-for-field.
///
/// Declaration order here is the serialized field order. Absent optionals
/// serialize as explicit `null`; on input every field except `title` may be
/// omitted and falls back to its construction default.
#[derive(Serialize, Deserialize)]
struct TaskWire {
    title: String,
    #[serde(default = "unset_difficulty")]
    difficulty: f64,
    #[serde(default)]
    due: Option<i64>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    location: Option<TaskLocation>,
    #[serde(default)]
    subtasks: Vec<Subtask>,
}

fn unset_difficulty() -> f64 {
    DIFFICULTY_UNSET
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        let mut task = Task::new(
            wire.title,
            wire.note,
            wire.due,
            normalize_difficulty(wire.difficulty),
            wire.completed,
            wire.location,
        )?;
        task.subtasks = wire.subtasks;
        Ok(task)
    }
}

impl From<Task> for TaskWire {
    fn from(task: Task) -> Self {
        let difficulty = task.difficulty_raw();
        Self {
            title: task.title,
            difficulty,
            due: task.due,
            completed: task.completed,
            note: task.note,
            location: task.location,
            subtasks: task.subtasks,
        }
    }
}
