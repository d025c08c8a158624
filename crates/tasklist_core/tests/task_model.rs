use chrono::{TimeZone, Utc};
use tasklist_core::{Filter, Task};

#[test]
fn task_json_round_trip_keeps_millisecond_timestamp() {
    let created_at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap()
        + chrono::Duration::microseconds(456_789);
    let task = Task::with_created_at(12, "ship release", created_at);
    assert_eq!(
        task.created_at,
        Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(456)
    );

    let json = serde_json::to_string(&task).unwrap();
    assert!(json.contains(r#""createdAt":"2026-02-13T10:00:00.456Z""#));

    let decoded: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_accepts_offset_timestamps() {
    let decoded: Task = serde_json::from_value(serde_json::json!({
        "id": 1,
        "text": "offset",
        "completed": true,
        "createdAt": "2024-06-01T12:00:00.000+02:00"
    }))
    .unwrap();

    assert_eq!(
        decoded.created_at,
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    );
    assert!(decoded.completed);
}

#[test]
fn filter_uses_lowercase_wire_names() {
    assert_eq!(serde_json::to_value(Filter::Completed).unwrap(), "completed");
    assert_eq!(Filter::default(), Filter::All);
    assert_eq!(Filter::Active.to_string(), "active");
}
