//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level task functions to Dart via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back inside response envelopes, never as exceptions.
//!
//! # See also
//! - docs/architecture/logging.md

use missioncomplete_core::db::open_db;
use missioncomplete_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    normalize_task_limit, ping as ping_inner, CreateTaskRequest, SqliteTaskRepository, TaskId,
    TaskLocation, TaskRecord, TaskService, TaskServiceError,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const ENTRY_DB_FILE_NAME: &str = "missioncomplete_entry.sqlite3";
const ENTRY_DB_PATH_ENV: &str = "MISSIONCOMPLETE_DB_PATH";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for task command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Task id the operation targeted or created.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Text payload envelope (JSON export, display text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTextResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Payload text; `None` on failure.
    pub text: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryTextResponse {
    fn success(text: String) -> Self {
        Self {
            ok: true,
            text: Some(text),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: None,
            message: message.into(),
        }
    }
}

/// One swipe-deck card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCard {
    /// Task id backing the card, for swipe actions.
    pub task_id: String,
    /// Card line: title, with subtask progress appended when present.
    pub text: String,
    pub subtasks_total: u32,
    pub subtasks_done: u32,
}

/// Deck response envelope: open tasks, newest write first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckResponse {
    pub cards: Vec<DeckCard>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Effective applied list limit.
    pub applied_limit: u32,
}

/// Creates a task from the entry flow. New tasks start open.
///
/// Input semantics:
/// - `title`: required; blank titles are rejected.
/// - `difficulty`: negative values mean unset.
/// - `lat`/`lng`: both present or both absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_create_task(
    title: String,
    note: Option<String>,
    due_epoch_ms: Option<i64>,
    difficulty: Option<f64>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> EntryActionResponse {
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(TaskLocation::new(lat, lng)),
        (None, None) => None,
        _ => {
            return EntryActionResponse::failure(
                "entry_create_task failed: lat and lng must be provided together",
            );
        }
    };

    let request = CreateTaskRequest {
        title: title.trim().to_string(),
        note: note
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        due_epoch_ms,
        difficulty,
        location,
    };

    match with_task_service(|service| service.create_task(&request)) {
        Ok(record) => EntryActionResponse::success("Task created.", record.task_id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_create_task failed: {err}")),
    }
}

/// Appends a subtask, or inserts at `index` when one is given.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Negative `index` fails as out of range.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_subtask(task_id: String, title: String, index: Option<i64>) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!("entry_add_subtask failed: {message}"));
        }
    };
    let position = match index {
        None => None,
        Some(raw) => match usize::try_from(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                return EntryActionResponse::failure(format!(
                    "entry_add_subtask failed: subtask index {raw} is out of range"
                ));
            }
        },
    };

    match with_task_service(|service| service.add_subtask(parsed_id, title.trim(), position)) {
        Ok(record) => EntryActionResponse::success("Subtask added.", record.task_id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_add_subtask failed: {err}")),
    }
}

/// Removes the subtask at `index`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Negative `index` fails as out of range.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_remove_subtask(task_id: String, index: i64) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!("entry_remove_subtask failed: {message}"));
        }
    };
    let position = match usize::try_from(index) {
        Ok(value) => value,
        Err(_) => {
            return EntryActionResponse::failure(format!(
                "entry_remove_subtask failed: subtask index {index} is out of range"
            ));
        }
    };

    match with_task_service(|service| service.remove_subtask(parsed_id, position)) {
        Ok((removed, record)) => EntryActionResponse::success(
            format!("Removed subtask \"{}\".", removed.title()),
            record.task_id.to_string(),
        ),
        Err(err) => EntryActionResponse::failure(format!("entry_remove_subtask failed: {err}")),
    }
}

/// Flips one subtask's completion flag.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_set_subtask_completed(
    task_id: String,
    index: i64,
    completed: bool,
) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!(
                "entry_set_subtask_completed failed: {message}"
            ));
        }
    };
    let position = match usize::try_from(index) {
        Ok(value) => value,
        Err(_) => {
            return EntryActionResponse::failure(format!(
                "entry_set_subtask_completed failed: subtask index {index} is out of range"
            ));
        }
    };

    match with_task_service(|service| service.set_subtask_completed(parsed_id, position, completed))
    {
        Ok(record) => EntryActionResponse::success("Subtask updated.", record.task_id.to_string()),
        Err(err) => {
            EntryActionResponse::failure(format!("entry_set_subtask_completed failed: {err}"))
        }
    }
}

/// Sets the task-level completion flag (swipe right = done).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_set_task_completed(task_id: String, completed: bool) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!(
                "entry_set_task_completed failed: {message}"
            ));
        }
    };

    match with_task_service(|service| service.set_task_completed(parsed_id, completed)) {
        Ok(record) => EntryActionResponse::success("Task updated.", record.task_id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_set_task_completed failed: {err}")),
    }
}

/// Attaches, replaces or clears the task's location.
///
/// Input semantics:
/// - `lat`/`lng` both present: set that location.
/// - both absent: clear the location.
/// - one-sided: failure.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_set_task_location(
    task_id: String,
    lat: Option<f64>,
    lng: Option<f64>,
) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!(
                "entry_set_task_location failed: {message}"
            ));
        }
    };
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(TaskLocation::new(lat, lng)),
        (None, None) => None,
        _ => {
            return EntryActionResponse::failure(
                "entry_set_task_location failed: lat and lng must be provided together",
            );
        }
    };

    match with_task_service(|service| service.set_task_location(parsed_id, location)) {
        Ok(record) => EntryActionResponse::success("Location updated.", record.task_id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_set_task_location failed: {err}")),
    }
}

/// Soft-deletes a task (swipe left = discard). Idempotent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_task(task_id: String) -> EntryActionResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryActionResponse::failure(format!("entry_delete_task failed: {message}"));
        }
    };

    match with_task_service(|service| service.delete_task(parsed_id).map(|()| parsed_id)) {
        Ok(deleted_id) => EntryActionResponse::success("Task deleted.", deleted_id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_delete_task failed: {err}")),
    }
}

/// Exports one task as its canonical JSON form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `text` carries the JSON document on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_task_json(task_id: String) -> EntryTextResponse {
    let parsed_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => {
            return EntryTextResponse::failure(format!("entry_task_json failed: {message}"));
        }
    };

    let record = with_task_service(|service| {
        service
            .get_task(parsed_id)
            .map_err(TaskServiceError::from)?
            .ok_or(TaskServiceError::TaskNotFound(parsed_id))
    });

    match record {
        Ok(record) => match serde_json::to_string(&record.task) {
            Ok(text) => EntryTextResponse::success(text),
            Err(err) => EntryTextResponse::failure(format!("entry_task_json failed: {err}")),
        },
        Err(message) => EntryTextResponse::failure(format!("entry_task_json failed: {message}")),
    }
}

/// Loads the swipe deck: open tasks, newest write first.
///
/// Input semantics:
/// - `limit`: page size; `None` or `0` applies the default, oversized values
///   are clamped.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns deterministic envelope with applied limit.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_cards(limit: Option<u32>) -> DeckResponse {
    match with_task_service(|service| service.list_tasks(Some(false), limit, 0)) {
        Ok(page) => {
            let cards = page.items.iter().map(to_deck_card).collect::<Vec<_>>();
            let message = if cards.is_empty() {
                "Deck is empty.".to_string()
            } else {
                format!("Loaded {} card(s).", cards.len())
            };
            DeckResponse {
                cards,
                message,
                applied_limit: page.applied_limit,
            }
        }
        Err(message) => DeckResponse {
            cards: Vec::new(),
            message: format!("deck_cards failed: {message}"),
            applied_limit: normalize_task_limit(limit),
        },
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| format!("invalid task id `{trimmed}`"))
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            let path = entry_db_path_from_env()
                .unwrap_or_else(|| std::env::temp_dir().join(ENTRY_DB_FILE_NAME));
            log::info!(
                "event=entry_db module=ffi status=ok path={}",
                path.display()
            );
            path
        })
        .clone()
}

fn entry_db_path_from_env() -> Option<PathBuf> {
    let raw = std::env::var(ENTRY_DB_PATH_ENV).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn with_task_service<T>(
    f: impl FnOnce(&mut TaskService<SqliteTaskRepository<'_>>) -> Result<T, TaskServiceError>,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&mut conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let mut service = TaskService::new(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn to_deck_card(record: &TaskRecord) -> DeckCard {
    let total = record.task.subtask_count();
    let done = record
        .task
        .subtasks()
        .iter()
        .filter(|subtask| subtask.is_completed())
        .count();
    let text = if total > 0 {
        format!("{} ({done}/{total})", record.task.title())
    } else {
        record.task.title().to_string()
    };
    DeckCard {
        task_id: record.task_id.to_string(),
        text,
        subtasks_total: u32::try_from(total).unwrap_or(u32::MAX),
        subtasks_done: u32::try_from(done).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, deck_cards, entry_add_subtask, entry_create_task, entry_delete_task,
        entry_remove_subtask, entry_set_subtask_completed, entry_set_task_completed,
        entry_set_task_location, entry_task_json, init_logging, ping,
    };
    use missioncomplete_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn open_entry_db() -> rusqlite::Connection {
        open_db(super::resolve_entry_db_path()).expect("open entry db")
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn create_task(title: &str) -> String {
        let created = entry_create_task(title.to_string(), None, None, None, None, None);
        assert!(created.ok, "{}", created.message);
        created.task_id.expect("created task should return task_id")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn entry_create_task_persists_open_task() {
        let title = unique_token("create");
        let created = entry_create_task(
            title.clone(),
            Some("  with note  ".to_string()),
            Some(1_700_000_000_000),
            Some(2.5),
            None,
            None,
        );
        assert!(created.ok, "{}", created.message);
        let task_id = created.task_id.expect("task id");

        let conn = open_entry_db();
        let (stored_title, note, due, difficulty, completed): (
            String,
            Option<String>,
            Option<i64>,
            Option<f64>,
            i64,
        ) = conn
            .query_row(
                "SELECT title, note, due, difficulty, completed FROM tasks WHERE uuid = ?1",
                [task_id.as_str()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .expect("query task row");
        assert_eq!(stored_title, title);
        assert_eq!(note.as_deref(), Some("with note"));
        assert_eq!(due, Some(1_700_000_000_000));
        assert_eq!(difficulty, Some(2.5));
        assert_eq!(completed, 0);
    }

    #[test]
    fn entry_create_task_rejects_blank_title() {
        let created = entry_create_task("   ".to_string(), None, None, None, None, None);
        assert!(!created.ok);
        assert!(created.message.contains("title"));
    }

    #[test]
    fn entry_create_task_rejects_one_sided_location() {
        let created = entry_create_task(
            unique_token("one-sided"),
            None,
            None,
            None,
            Some(48.2),
            None,
        );
        assert!(!created.ok);
        assert!(created.message.contains("together"));
    }

    #[test]
    fn entry_subtask_flow_adds_completes_and_removes() {
        let task_id = create_task(&unique_token("subtasks"));

        let added = entry_add_subtask(task_id.clone(), "first".to_string(), None);
        assert!(added.ok, "{}", added.message);
        let added = entry_add_subtask(task_id.clone(), "second".to_string(), None);
        assert!(added.ok, "{}", added.message);

        let done = entry_set_subtask_completed(task_id.clone(), 0, true);
        assert!(done.ok, "{}", done.message);

        let conn = open_entry_db();
        let completed: i64 = conn
            .query_row(
                "SELECT completed FROM subtasks WHERE task_uuid = ?1 AND position = 0",
                [task_id.as_str()],
                |row| row.get(0),
            )
            .expect("query subtask row");
        assert_eq!(completed, 1);

        let removed = entry_remove_subtask(task_id.clone(), 0);
        assert!(removed.ok, "{}", removed.message);
        assert!(removed.message.contains("first"));

        let remaining: String = conn
            .query_row(
                "SELECT title FROM subtasks WHERE task_uuid = ?1 AND position = 0",
                [task_id.as_str()],
                |row| row.get(0),
            )
            .expect("query remaining subtask");
        assert_eq!(remaining, "second");
    }

    #[test]
    fn entry_remove_subtask_rejects_negative_index() {
        let task_id = create_task(&unique_token("negative-index"));
        let removed = entry_remove_subtask(task_id, -1);
        assert!(!removed.ok);
        assert!(removed.message.contains("out of range"));
    }

    #[test]
    fn entry_set_task_completed_marks_row() {
        let task_id = create_task(&unique_token("complete"));
        let updated = entry_set_task_completed(task_id.clone(), true);
        assert!(updated.ok, "{}", updated.message);

        let conn = open_entry_db();
        let completed: i64 = conn
            .query_row(
                "SELECT completed FROM tasks WHERE uuid = ?1",
                [task_id.as_str()],
                |row| row.get(0),
            )
            .expect("query task row");
        assert_eq!(completed, 1);
    }

    #[test]
    fn entry_set_task_location_sets_and_clears_pair() {
        let task_id = create_task(&unique_token("location"));

        let set = entry_set_task_location(task_id.clone(), Some(40.44), Some(-79.94));
        assert!(set.ok, "{}", set.message);

        let conn = open_entry_db();
        let (lat, lng): (Option<f64>, Option<f64>) = conn
            .query_row(
                "SELECT lat, lng FROM tasks WHERE uuid = ?1",
                [task_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .expect("query location");
        assert_eq!(lat, Some(40.44));
        assert_eq!(lng, Some(-79.94));

        let cleared = entry_set_task_location(task_id.clone(), None, None);
        assert!(cleared.ok, "{}", cleared.message);
        let (lat, lng): (Option<f64>, Option<f64>) = conn
            .query_row(
                "SELECT lat, lng FROM tasks WHERE uuid = ?1",
                [task_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .expect("query cleared location");
        assert_eq!(lat, None);
        assert_eq!(lng, None);

        let one_sided = entry_set_task_location(task_id, Some(1.0), None);
        assert!(!one_sided.ok);
        assert!(one_sided.message.contains("together"));
    }

    #[test]
    fn entry_task_json_exports_canonical_fields() {
        let title = unique_token("json");
        let task_id = create_task(&title);
        let added = entry_add_subtask(task_id.clone(), "step".to_string(), None);
        assert!(added.ok, "{}", added.message);

        let exported = entry_task_json(task_id);
        assert!(exported.ok, "{}", exported.message);
        let text = exported.text.expect("json payload");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");

        assert_eq!(value["title"], serde_json::json!(title));
        assert_eq!(value["difficulty"], serde_json::json!(-1.0));
        assert_eq!(value["due"], serde_json::Value::Null);
        assert_eq!(value["completed"], serde_json::json!(false));
        assert_eq!(value["subtasks"][0]["title"], serde_json::json!("step"));
        assert_eq!(value["subtasks"][0]["completed"], serde_json::json!(false));
    }

    #[test]
    fn entry_task_json_reports_unknown_id() {
        let exported = entry_task_json(uuid::Uuid::new_v4().to_string());
        assert!(!exported.ok);
        assert!(exported.message.contains("task not found"));
    }

    #[test]
    fn deck_cards_lists_open_tasks_and_hides_completed() {
        let title = unique_token("deck");
        let task_id = create_task(&title);

        let deck = deck_cards(Some(50));
        assert_eq!(deck.applied_limit, 50);
        assert!(deck.cards.iter().any(|card| card.task_id == task_id));

        let updated = entry_set_task_completed(task_id.clone(), true);
        assert!(updated.ok, "{}", updated.message);

        let deck = deck_cards(Some(50));
        assert!(deck.cards.iter().all(|card| card.task_id != task_id));
    }

    #[test]
    fn deck_cards_shows_subtask_progress() {
        let title = unique_token("progress");
        let task_id = create_task(&title);
        assert!(entry_add_subtask(task_id.clone(), "a".to_string(), None).ok);
        assert!(entry_add_subtask(task_id.clone(), "b".to_string(), None).ok);
        assert!(entry_set_subtask_completed(task_id.clone(), 0, true).ok);

        let deck = deck_cards(Some(50));
        let card = deck
            .cards
            .iter()
            .find(|card| card.task_id == task_id)
            .expect("created card should be in deck");
        assert_eq!(card.subtasks_total, 2);
        assert_eq!(card.subtasks_done, 1);
        assert!(card.text.contains("(1/2)"));
    }

    #[test]
    fn entry_delete_task_hides_from_deck_and_stays_idempotent() {
        let title = unique_token("delete");
        let task_id = create_task(&title);

        let deleted = entry_delete_task(task_id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let deck = deck_cards(Some(50));
        assert!(deck.cards.iter().all(|card| card.task_id != task_id));

        let again = entry_delete_task(task_id);
        assert!(again.ok, "{}", again.message);
    }

    #[test]
    fn entry_actions_reject_malformed_task_id() {
        let response = entry_set_task_completed("not-a-uuid".to_string(), true);
        assert!(!response.ok);
        assert!(response.message.contains("invalid task id"));
    }
}
