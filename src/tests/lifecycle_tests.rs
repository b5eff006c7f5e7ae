//! Service tests for task creation and audited transitions.

use chrono::TimeDelta;
use mockable::Clock;
use rstest::{fixture, rstest};

use super::helpers::Harness;
use crate::domain::{
    EmailAddress, TaskDomainError, TaskPriority, TaskStatus, User, UserId,
};
use crate::ports::{UserRepository, UserStoreError};
use crate::services::{CreateTaskRequest, LifecycleError};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_pending_with_defaults(harness: Harness) {
    let owner = harness.register_user("ana").await;

    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Write minutes"))
        .await
        .expect("creation should succeed");
    let task = harness
        .lifecycle
        .find_task(task_id)
        .await
        .expect("task should be retrievable");

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.due_at(), None);
    assert_eq!(task.owner_id(), owner);
    let trail = harness
        .lifecycle
        .audit_trail(task_id)
        .await
        .expect("trail should be readable");
    assert!(trail.is_empty(), "creation must not write audit entries");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_offsets_from_creation_time(harness: Harness) {
    let owner = harness.register_user("bruno").await;
    let now = harness.clock.utc();

    let due_today = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Report").due_in_days(0))
        .await
        .expect("creation should succeed");
    let in_three_days = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Slides").due_in_days(3))
        .await
        .expect("creation should succeed");

    let due_today = harness.lifecycle.find_task(due_today).await.expect("live");
    let in_three_days = harness
        .lifecycle
        .find_task(in_three_days)
        .await
        .expect("live");
    assert_eq!(due_today.due_at(), Some(now));
    assert_eq!(in_three_days.due_at(), Some(now + TimeDelta::days(3)));
}

#[rstest]
#[case(i64::MAX)]
#[case(i64::MIN)]
#[case(1_000_000_000)] // representable delta, but past the calendar range
#[tokio::test(flavor = "multi_thread")]
async fn unrepresentable_due_offset_fails_validation(#[case] days: i64, harness: Harness) {
    let owner = harness.register_user("bea").await;

    let result = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Far future").due_in_days(days))
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(TaskDomainError::DueDateOutOfRange(offset)))
            if offset == days
    ));
}

#[rstest]
#[case("high", TaskPriority::High)]
#[case("someday maybe", TaskPriority::Medium)]
#[tokio::test(flavor = "multi_thread")]
async fn priority_labels_degrade_to_medium(
    #[case] label: &str,
    #[case] expected: TaskPriority,
    harness: Harness,
) {
    let owner = harness.register_user("caio").await;

    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Labelled").with_priority_label(label))
        .await
        .expect("creation should succeed");

    let task = harness.lifecycle.find_task(task_id).await.expect("live");
    assert_eq!(task.priority(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_rejected(harness: Harness) {
    let owner = harness.register_user("carla").await;

    let result = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "   "))
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_is_rejected(harness: Harness) {
    let ghost = UserId::new();

    let result = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(ghost, "Orphan"))
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::UserNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_owner_is_rejected(harness: Harness) {
    let email = EmailAddress::new("dormant@example.com").expect("valid email");
    let mut user = User::new("Dormant", email, "opaque-hash", &*harness.clock)
        .expect("valid user");
    user.deactivate(&*harness.clock);
    harness
        .store
        .insert_user(&user)
        .await
        .expect("insert should succeed");

    let result = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(user.id(), "Blocked"))
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::UserNotFound(id)) if id == user.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn category_of_another_user_is_rejected(harness: Harness) {
    let owner = harness.register_user("dora").await;
    let other = harness.register_user("enzo").await;
    let foreign = harness
        .registry
        .create_category("Private", Some(other), None, None)
        .await
        .expect("category creation should succeed");

    let result = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Trespass").with_category(foreign))
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::CategoryNotFound(id)) if id == foreign
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn global_category_is_usable_by_anyone(harness: Harness) {
    let owner = harness.register_user("fabio").await;
    let shared = harness
        .registry
        .create_category("Errands", None, Some("#00aa00".to_owned()), None)
        .await
        .expect("category creation should succeed");

    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Groceries").with_category(shared))
        .await
        .expect("creation should succeed");

    let task = harness.lifecycle.find_task(task_id).await.expect("live");
    assert_eq!(task.category_id(), Some(shared));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_and_reopening_maintains_audit_and_timestamps(harness: Harness) {
    let owner = harness.register_user("gina").await;
    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Report").due_in_days(0))
        .await
        .expect("creation should succeed");

    harness.clock.advance(TimeDelta::hours(2));
    let completed = harness
        .lifecycle
        .transition_status(task_id, TaskStatus::Completed)
        .await
        .expect("transition should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert_eq!(completed.completed_at(), Some(harness.clock.utc()));

    harness.clock.advance(TimeDelta::hours(1));
    let reopened = harness
        .lifecycle
        .transition_status(task_id, TaskStatus::Pending)
        .await
        .expect("transition should succeed");
    assert_eq!(reopened.status(), TaskStatus::Pending);
    assert_eq!(reopened.completed_at(), None);

    let trail = harness
        .lifecycle
        .audit_trail(task_id)
        .await
        .expect("trail should be readable");
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].from_status(), TaskStatus::Pending);
    assert_eq!(trail[0].to_status(), TaskStatus::Completed);
    assert_eq!(trail[1].from_status(), TaskStatus::Completed);
    assert_eq!(trail[1].to_status(), TaskStatus::Pending);
    assert_eq!(trail[0].changed_at(), completed.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_status_transition_is_idempotent(harness: Harness) {
    let owner = harness.register_user("hugo").await;
    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Steady"))
        .await
        .expect("creation should succeed");
    let before = harness.lifecycle.find_task(task_id).await.expect("live");

    harness.clock.advance(TimeDelta::hours(4));
    let after = harness
        .lifecycle
        .transition_status(task_id, TaskStatus::Pending)
        .await
        .expect("no-op should succeed");

    assert_eq!(after, before);
    let trail = harness
        .lifecycle
        .audit_trail(task_id)
        .await
        .expect("trail should be readable");
    assert!(trail.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_entries_match_effective_changes(harness: Harness) {
    let owner = harness.register_user("iris").await;
    let task_id = harness
        .lifecycle
        .create_task(CreateTaskRequest::new(owner, "Churn"))
        .await
        .expect("creation should succeed");

    let requests = [
        TaskStatus::InProgress, // change
        TaskStatus::InProgress, // no-op
        TaskStatus::Completed,  // change
        TaskStatus::Completed,  // no-op
        TaskStatus::Cancelled,  // change
        TaskStatus::Pending,    // change
    ];
    for status in requests {
        harness.clock.advance(TimeDelta::minutes(10));
        harness
            .lifecycle
            .transition_status(task_id, status)
            .await
            .expect("transition should succeed");
    }

    let trail = harness
        .lifecycle
        .audit_trail(task_id)
        .await
        .expect("trail should be readable");
    assert_eq!(trail.len(), 4);
    assert!(trail.windows(2).all(|pair| {
        pair[0].changed_at() <= pair[1].changed_at()
            && pair[0].to_status() == pair[1].from_status()
    }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_on_missing_task_fails(harness: Harness) {
    let ghost = crate::domain::TaskId::new();

    let result = harness
        .lifecycle
        .transition_status(ghost, TaskStatus::Completed)
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::TaskNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected(harness: Harness) {
    harness.register_user("julia").await;

    let result = harness
        .registry
        .register_user("Julia Again", "julia@example.com", "other-hash")
        .await;

    assert!(matches!(
        result,
        Err(crate::services::RegistryError::UserStore(
            UserStoreError::DuplicateEmail(_)
        ))
    ));
}
