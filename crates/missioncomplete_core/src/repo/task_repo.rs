//! SQLite-backed task storage.
//!
//! # Responsibility
//! - Persists [`Task`] values under repository-owned [`TaskId`]s.
//! - Reconstructs full tasks (subtasks included, in stored order) on every
//!   read path.
//! - Keeps deletion as a tombstone so history-aware callers can still reach
//!   removed rows.
//!
//! # Invariants
//! - `updated_at` moves forward on every successful write, which keeps the
//!   `updated_at DESC, uuid ASC` listing order stable.
//! - A task row and its subtask rows change together inside one transaction.
//! - `lat` and `lng` are stored as a pair; a one-sided pair is treated as
//!   corrupt data, not as a location.
//!
//! # See also
//! - `docs/architecture/data-model.md`

use std::fmt;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::location::TaskLocation;
use crate::model::subtask::Subtask;
use crate::model::task::{Task, TaskValidationError};

/// Storage identity of a task. The task model itself carries no id; the
/// repository owns identity end to end.
pub type TaskId = Uuid;

/// Convenience alias for repository results.
pub type RepoResult<T> = Result<T, RepoError>;

/// Error type for repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// A persisted row failed model validation on reconstruction.
    Validation(TaskValidationError),
    /// Underlying database failure.
    Db(DbError),
    /// No live row matched the given id.
    NotFound(TaskId),
    /// The nil uuid is reserved and never a valid task id.
    NilTaskId,
    /// The connection has not been migrated to the supported schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table the repository depends on is absent.
    MissingRequiredTable(&'static str),
    /// A column the repository depends on is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Stored bytes could not be interpreted as task data.
    InvalidData(String),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::Validation(err) => write!(f, "{err}"),
            RepoError::Db(err) => write!(f, "{err}"),
            RepoError::NotFound(task_id) => write!(f, "task not found: {task_id}"),
            RepoError::NilTaskId => write!(f, "task id must not be the nil uuid"),
            RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not ready: schema version {actual_version}, expected {expected_version}"
            ),
            RepoError::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            RepoError::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{column}` is missing from table `{table}`")
            }
            RepoError::InvalidData(message) => {
                write!(f, "invalid persisted task data: {message}")
            }
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::Validation(err) => Some(err),
            RepoError::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(err: TaskValidationError) -> Self {
        RepoError::Validation(err)
    }
}

impl From<DbError> for RepoError {
    fn from(err: DbError) -> Self {
        RepoError::Db(err)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(err: rusqlite::Error) -> Self {
        RepoError::Db(DbError::Sqlite(err))
    }
}

/// A task as the store returns it: model value plus storage metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub task: Task,
    /// Last write time, epoch milliseconds.
    pub updated_at: i64,
}

/// Filters and paging for [`TaskRepository::list_tasks`].
///
/// `limit: None` means unbounded; callers that want the capped list contract
/// go through the service layer instead of building a query by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// `Some(flag)` keeps only tasks whose completion matches `flag`.
    pub completed: Option<bool>,
    /// When true, tombstoned tasks are listed as well.
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Storage operations for tasks.
pub trait TaskRepository {
    /// Inserts `task` under the caller-chosen `task_id`.
    fn create_task_with_id(&mut self, task_id: TaskId, task: &Task) -> RepoResult<TaskId>;

    /// Inserts `task` under a fresh v4 id and returns that id.
    fn create_task(&mut self, task: &Task) -> RepoResult<TaskId> {
        self.create_task_with_id(Uuid::new_v4(), task)
    }

    /// Replaces the stored task wholesale: scalars, location and the entire
    /// subtask set. Tombstoned rows are not updatable.
    fn update_task(&mut self, task_id: TaskId, task: &Task) -> RepoResult<()>;

    /// Fetches one task. `include_deleted` widens the lookup to tombstoned
    /// rows; a miss is `Ok(None)`, not an error.
    fn get_task(&self, task_id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskRecord>>;

    /// Lists tasks ordered by `updated_at DESC, uuid ASC`.
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>>;

    /// Marks a task deleted. Repeating the call on an already-deleted task
    /// succeeds and refreshes `updated_at`.
    fn soft_delete_task(&mut self, task_id: TaskId) -> RepoResult<()>;
}

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    note,
    due,
    difficulty,
    completed,
    lat,
    lng,
    updated_at
FROM tasks";

const SUBTASK_SELECT_SQL: &str = "SELECT title, completed
FROM subtasks
WHERE task_uuid = ?1
ORDER BY position ASC;";

/// [`TaskRepository`] over a borrowed, already-migrated [`Connection`].
#[derive(Debug)]
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps `conn` after verifying it is ready for task storage.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when `PRAGMA user_version`
    ///   does not match the latest migration.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the schema lacks the shape the queries assume.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task_with_id(&mut self, task_id: TaskId, task: &Task) -> RepoResult<TaskId> {
        if task_id.is_nil() {
            return Err(RepoError::NilTaskId);
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO tasks (uuid, title, note, due, difficulty, completed, lat, lng)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task_id.to_string(),
                task.title(),
                task.note(),
                task.due(),
                task.difficulty(),
                bool_to_int(task.is_completed()),
                task.location().map(|location| location.latitude()),
                task.location().map(|location| location.longitude()),
            ],
        )?;
        insert_subtasks_in_tx(&tx, task_id, task.subtasks())?;
        tx.commit()?;

        log::debug!(
            "event=task_create module=repo status=ok task_id={task_id} subtasks={}",
            task.subtask_count()
        );
        Ok(task_id)
    }

    fn update_task(&mut self, task_id: TaskId, task: &Task) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE tasks
             SET
                title = ?2,
                note = ?3,
                due = ?4,
                difficulty = ?5,
                completed = ?6,
                lat = ?7,
                lng = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![
                task_id.to_string(),
                task.title(),
                task.note(),
                task.due(),
                task.difficulty(),
                bool_to_int(task.is_completed()),
                task.location().map(|location| location.latitude()),
                task.location().map(|location| location.longitude()),
            ],
        )?;

        if changed == 0 {
            // Dropping the open transaction rolls back; nothing was written.
            return Err(RepoError::NotFound(task_id));
        }

        tx.execute(
            "DELETE FROM subtasks WHERE task_uuid = ?1;",
            [task_id.to_string()],
        )?;
        insert_subtasks_in_tx(&tx, task_id, task.subtasks())?;
        tx.commit()?;

        log::debug!(
            "event=task_update module=repo status=ok task_id={task_id} subtasks={}",
            task.subtask_count()
        );
        Ok(())
    }

    fn get_task(&self, task_id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskRecord>> {
        let sql = format!(
            "{TASK_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            task_id.to_string(),
            bool_to_int(include_deleted)
        ])?;

        if let Some(row) = rows.next()? {
            let mut record = parse_task_row(row)?;
            load_subtasks_into(self.conn, record.task_id, &mut record.task)?;
            return Ok(Some(record));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            // SQLite needs a LIMIT clause to accept OFFSET; -1 means no cap.
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = parse_task_row(row)?;
            load_subtasks_into(self.conn, record.task_id, &mut record.task)?;
            records.push(record);
        }

        Ok(records)
    }

    fn soft_delete_task(&mut self, task_id: TaskId) -> RepoResult<()> {
        // No is_deleted filter: deleting twice stays a success.
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [task_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_id));
        }

        log::debug!("event=task_delete module=repo status=ok task_id={task_id}");
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["tasks", "subtasks"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    const TASK_COLUMNS: &[&str] = &[
        "uuid",
        "title",
        "note",
        "due",
        "difficulty",
        "completed",
        "lat",
        "lng",
        "is_deleted",
        "updated_at",
    ];
    for &column in TASK_COLUMNS {
        if !table_has_column(conn, "tasks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    const SUBTASK_COLUMNS: &[&str] = &["task_uuid", "position", "title", "completed"];
    for &column in SUBTASK_COLUMNS {
        if !table_has_column(conn, "subtasks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "subtasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1
         FROM sqlite_master
         WHERE type = 'table'
           AND name = ?1
         LIMIT 1;",
    )?;
    let found = stmt.query([table])?.next()?.is_some();
    Ok(found)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn insert_subtasks_in_tx(
    tx: &Transaction<'_>,
    task_id: TaskId,
    subtasks: &[Subtask],
) -> RepoResult<()> {
    let task_id_text = task_id.to_string();
    for (position, subtask) in subtasks.iter().enumerate() {
        tx.execute(
            "INSERT INTO subtasks (task_uuid, position, title, completed)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task_id_text.as_str(),
                position,
                subtask.title(),
                bool_to_int(subtask.is_completed()),
            ],
        )?;
    }
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskRecord> {
    let uuid_text: String = row.get("uuid")?;
    let task_id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let completed = int_to_bool(row.get::<_, i64>("completed")?, "tasks.completed")?;

    let lat: Option<f64> = row.get("lat")?;
    let lng: Option<f64> = row.get("lng")?;
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(TaskLocation::new(lat, lng)),
        (None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(format!(
                "one-sided location pair for task `{uuid_text}`"
            )));
        }
    };

    let task = Task::new(
        row.get::<_, String>("title")?,
        row.get::<_, Option<String>>("note")?,
        row.get::<_, Option<i64>>("due")?,
        row.get::<_, Option<f64>>("difficulty")?,
        completed,
        location,
    )?;

    Ok(TaskRecord {
        task_id,
        task,
        updated_at: row.get("updated_at")?,
    })
}

fn load_subtasks_into(conn: &Connection, task_id: TaskId, task: &mut Task) -> RepoResult<()> {
    let mut stmt = conn.prepare(SUBTASK_SELECT_SQL)?;
    let mut rows = stmt.query([task_id.to_string()])?;
    while let Some(row) = rows.next()? {
        let completed = int_to_bool(row.get::<_, i64>("completed")?, "subtasks.completed")?;
        task.add_subtask(Subtask::with_completed(
            row.get::<_, String>("title")?,
            completed,
        ));
    }
    Ok(())
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
