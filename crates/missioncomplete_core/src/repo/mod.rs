//! Repository layer for task persistence.
//!
//! # Responsibility
//! - Defines the [`TaskRepository`] trait the service layer depends on.
//! - Provides the SQLite implementation over a migrated connection.
//!
//! # Invariants
//! - Repositories never hand out rows they cannot fully reconstruct; broken
//!   persisted data surfaces as [`RepoError::InvalidData`].
//! - Construction guards verify schema shape up front, so method calls can
//!   assume the tables and columns they touch exist.
//!
//! # See also
//! - `docs/architecture/data-model.md`

pub mod task_repo;

pub use task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskId, TaskListQuery, TaskRecord, TaskRepository,
};
