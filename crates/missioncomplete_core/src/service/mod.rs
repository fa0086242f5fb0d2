//! Use-case layer over the repositories.
//!
//! # Responsibility
//! - Bundles multi-step task flows (mutate, write, read back) behind one
//!   call per user action.
//! - Owns the list contract the UI depends on (default and maximum page
//!   size).
//!
//! # See also
//! - `docs/architecture/data-model.md`

pub mod task_service;

pub use task_service::{
    normalize_task_limit, CreateTaskRequest, TaskService, TaskServiceError, TasksListResult,
};
