//! Serde representation tests for API-facing types.

use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::json;

use super::helpers::{test_epoch, FixedClock};
use crate::domain::{
    StatusChange, Task, TaskAuditEntry, TaskPriority, TaskStatus, TaskTitle, UserId,
};
use crate::services::TaskSituation;

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(test_epoch())
}

#[rstest]
#[case(TaskStatus::Pending, json!("pending"))]
#[case(TaskStatus::InProgress, json!("in_progress"))]
#[case(TaskStatus::Completed, json!("completed"))]
#[case(TaskStatus::Cancelled, json!("cancelled"))]
fn status_serializes_snake_case(#[case] status: TaskStatus, #[case] expected: serde_json::Value) {
    let value = serde_json::to_value(status).expect("status should serialize");
    assert_eq!(value, expected);
}

#[rstest]
#[case(TaskSituation::Overdue, json!("OVERDUE"))]
#[case(TaskSituation::Urgent, json!("URGENT"))]
#[case(TaskSituation::OnTrack, json!("ON_TRACK"))]
fn situation_serializes_screaming_case(
    #[case] situation: TaskSituation,
    #[case] expected: serde_json::Value,
) {
    let value = serde_json::to_value(situation).expect("situation should serialize");
    assert_eq!(value, expected);
    assert_eq!(value.as_str(), Some(situation.as_str()));
}

#[rstest]
fn priority_serializes_snake_case() {
    let value = serde_json::to_value(TaskPriority::Urgent).expect("priority should serialize");
    assert_eq!(value, json!("urgent"));
}

#[rstest]
fn audit_entry_exposes_transition_fields(clock: FixedClock) {
    let title = TaskTitle::new("Serialized").expect("valid title");
    let task = Task::new(UserId::new(), title, &clock);
    let change = StatusChange {
        from: TaskStatus::Pending,
        to: TaskStatus::Completed,
    };
    let entry = TaskAuditEntry::new(task.id(), change, clock.utc());

    let value = serde_json::to_value(&entry).expect("entry should serialize");

    assert_eq!(value["task_id"], json!(task.id().into_inner().to_string()));
    assert_eq!(value["from_status"], json!("pending"));
    assert_eq!(value["to_status"], json!("completed"));
}

#[rstest]
fn task_round_trips_through_json(clock: FixedClock) {
    let title = TaskTitle::new("Round trip").expect("valid title");
    let task = Task::new(UserId::new(), title, &clock)
        .with_priority(TaskPriority::High)
        .with_description("Persisted and restored");

    let encoded = serde_json::to_string(&task).expect("task should serialize");
    let decoded: Task = serde_json::from_str(&encoded).expect("task should deserialize");

    assert_eq!(decoded, task);
}
