use missioncomplete_core::{Subtask, Task, TaskLocation};

fn sample_task() -> Task {
    let mut task = Task::new(
        "Buy milk",
        Some("2% if they have it".to_string()),
        Some(1_700_000_000_000),
        Some(2.5),
        false,
        Some(TaskLocation::new(40.44, -79.94)),
    )
    .unwrap();
    task.add_subtask(Subtask::new("go to the store"));
    task.add_subtask(Subtask::with_completed("find the milk", true));
    task
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let json = serde_json::to_value(sample_task()).unwrap();

    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["difficulty"], 2.5);
    assert_eq!(json["due"], 1_700_000_000_000_i64);
    assert_eq!(json["completed"], false);
    assert_eq!(json["note"], "2% if they have it");
    assert_eq!(json["location"]["lat"], 40.44);
    assert_eq!(json["location"]["lng"], -79.94);
    assert_eq!(json["subtasks"][0]["title"], "go to the store");
    assert_eq!(json["subtasks"][0]["completed"], false);
    assert_eq!(json["subtasks"][1]["title"], "find the milk");
    assert_eq!(json["subtasks"][1]["completed"], true);

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 7, "wire schema has exactly seven fields");
}

#[test]
fn absent_optionals_serialize_as_explicit_nulls() {
    let json = serde_json::to_value(Task::titled("Buy milk").unwrap()).unwrap();
    let object = json.as_object().unwrap();

    assert!(object.contains_key("note"));
    assert!(object.contains_key("due"));
    assert!(object.contains_key("location"));
    assert!(json["note"].is_null());
    assert!(json["due"].is_null());
    assert!(json["location"].is_null());
    assert_eq!(json["subtasks"], serde_json::json!([]));
}

#[test]
fn unset_difficulty_serializes_as_sentinel() {
    let json = serde_json::to_value(Task::titled("Buy milk").unwrap()).unwrap();
    assert_eq!(json["difficulty"], -1.0);
}

#[test]
fn round_trip_preserves_equality() {
    let task = sample_task();
    let text = serde_json::to_string(&task).unwrap();
    let decoded: Task = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn minimal_document_parses_with_defaults() {
    let decoded: Task = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();

    assert_eq!(decoded.title(), "Buy milk");
    assert_eq!(decoded.difficulty(), None);
    assert_eq!(decoded.due(), None);
    assert!(!decoded.is_completed());
    assert_eq!(decoded.note(), None);
    assert_eq!(decoded.location(), None);
    assert!(decoded.subtasks().is_empty());
}

#[test]
fn negative_difficulty_parses_as_unset() {
    let decoded: Task =
        serde_json::from_str(r#"{"title":"Buy milk","difficulty":-7.5}"#).unwrap();
    assert_eq!(decoded.difficulty(), None);
    assert_eq!(decoded.difficulty_raw(), -1.0);

    let decoded: Task = serde_json::from_str(r#"{"title":"Buy milk","difficulty":0.0}"#).unwrap();
    assert_eq!(decoded.difficulty(), Some(0.0));
}

#[test]
fn subtask_completed_defaults_to_false_on_parse() {
    let decoded: Task = serde_json::from_str(
        r#"{"title":"Buy milk","subtasks":[{"title":"go to the store"}]}"#,
    )
    .unwrap();
    assert_eq!(decoded.subtasks()[0].title(), "go to the store");
    assert!(!decoded.subtasks()[0].is_completed());
}

#[test]
fn parse_rejects_missing_title() {
    let err = serde_json::from_str::<Task>(r#"{"completed":false}"#).unwrap_err();
    assert!(err.to_string().contains("title"), "unexpected error: {err}");
}

#[test]
fn parse_rejects_blank_title() {
    let err = serde_json::from_str::<Task>(r#"{"title":"   "}"#).unwrap_err();
    assert!(
        err.to_string().contains("task title must not be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn parse_ignores_unknown_fields() {
    let decoded: Task = serde_json::from_str(
        r#"{"title":"Buy milk","priority":"high","archived":true}"#,
    )
    .unwrap();
    assert_eq!(decoded.title(), "Buy milk");
}

#[test]
fn location_round_trips_through_wire_names() {
    let location = TaskLocation::new(-33.86, 151.21);
    let json = serde_json::to_value(location).unwrap();
    assert_eq!(json, serde_json::json!({"lat": -33.86, "lng": 151.21}));

    let decoded: TaskLocation = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, location);
}

#[test]
fn serialized_text_keeps_schema_field_order() {
    let text = serde_json::to_string(&Task::titled("Buy milk").unwrap()).unwrap();
    let title_at = text.find("\"title\"").unwrap();
    let difficulty_at = text.find("\"difficulty\"").unwrap();
    let due_at = text.find("\"due\"").unwrap();
    let completed_at = text.find("\"completed\"").unwrap();
    let note_at = text.find("\"note\"").unwrap();
    let location_at = text.find("\"location\"").unwrap();
    let subtasks_at = text.find("\"subtasks\"").unwrap();

    assert!(title_at < difficulty_at);
    assert!(difficulty_at < due_at);
    assert!(due_at < completed_at);
    assert!(completed_at < note_at);
    assert!(note_at < location_at);
    assert!(location_at < subtasks_at);
}
