//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use crate::access::{
    adapters::memory::InMemoryDirectory,
    domain::{AccessContext, Caller, ChatId, Role, UserId, UserProfile},
    ports::UserRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{GuardRejection, NewTask, TaskDomainError, TaskEdit, TaskId, TaskStatus},
    ports::{NullNotifier, TaskFilter, TaskNotifier, notify::MockTaskNotifier, NotifyError},
    services::{TaskLifecycleError, TaskLifecycleService, TransitionOutcome},
};
use crate::test_support::FixedClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, FixedClock>;

const WORK_CHAT: ChatId = ChatId::new(-100);
const CREATION_TIME: &str = "2025-06-10T10:00:00Z";

/// Shared backends so services pinned to different instants see one state.
struct Harness {
    tasks: Arc<InMemoryTaskRepository>,
    directory: Arc<InMemoryDirectory>,
}

impl Harness {
    fn new() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            directory: Arc::new(InMemoryDirectory::new()),
        }
    }

    fn service_at(&self, timestamp: &str) -> TestService {
        self.service_with(timestamp, Arc::new(NullNotifier))
    }

    fn service_with(&self, timestamp: &str, notifier: Arc<dyn TaskNotifier>) -> TestService {
        TaskLifecycleService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.directory),
            Arc::new(FixedClock::at(timestamp)),
            notifier,
        )
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn manager() -> Caller {
    Caller::new(
        UserId::new(99),
        Some("boss".to_owned()),
        AccessContext::new(Role::Manager, true),
    )
}

fn assignee() -> Caller {
    Caller::new(
        UserId::new(1),
        Some("anna".to_owned()),
        AccessContext::new(Role::Executor, true),
    )
}

fn bystander() -> Caller {
    Caller::new(
        UserId::new(55),
        Some("carol".to_owned()),
        AccessContext::new(Role::Executor, true),
    )
}

fn outside_work_chat(mut caller: Caller) -> Caller {
    caller.context = AccessContext::new(caller.context.role, false);
    caller
}

fn new_task_request() -> NewTask {
    NewTask::new("Build homepage mockup", "@Anna", WORK_CHAT, UserId::new(7))
}

async fn create_task(service: &TestService) -> TaskId {
    let task = service
        .create(new_task_request())
        .await
        .expect("task creation should succeed");
    task.id()
}

/// Submit, reject, and return: one full revision cycle.
async fn run_revision_cycle(service: &TestService, id: TaskId, comment: &str) {
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied(), "submit rejected: {submitted:?}");
    let rejected = service
        .request_revision(id, &manager(), comment)
        .await
        .expect("revision request should succeed");
    assert!(rejected.is_applied(), "revision rejected: {rejected:?}");
    let returned = service
        .return_to_work(id, &assignee())
        .await
        .expect("return should succeed");
    assert!(returned.is_applied(), "return rejected: {returned:?}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_a_pending_task(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);

    let id = create_task(&service).await;

    let fetched = service
        .get(id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched.status(), TaskStatus::Pending);
    assert_eq!(fetched.assignee(), "@Anna");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_a_blank_title(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let request = NewTask::new("   ", "@anna", WORK_CHAT, UserId::new(7));

    let result = service.create(request).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_applies_for_the_assignee(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;

    let outcome = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");

    let task = outcome.applied().expect("submission should apply");
    assert_eq!(task.status(), TaskStatus::Review);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_is_rejected_for_other_callers(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;

    let outcome = service
        .submit(id, &bystander())
        .await
        .expect("submit should succeed");

    assert_eq!(
        outcome,
        TransitionOutcome::Rejected(GuardRejection::NotAssignee)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transitions_are_rejected_outside_the_work_chat(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;

    let submit = service
        .submit(id, &outside_work_chat(assignee()))
        .await
        .expect("submit should succeed");
    let complete = service
        .complete(id, &outside_work_chat(manager()))
        .await
        .expect("complete should succeed");

    assert_eq!(
        submit,
        TransitionOutcome::Rejected(GuardRejection::OutsideWorkChat)
    );
    assert_eq!(
        complete,
        TransitionOutcome::Rejected(GuardRejection::OutsideWorkChat)
    );
    let task = service
        .get(id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(task.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tasks_yield_not_found(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);

    let outcome = service
        .submit(TaskId::new(), &assignee())
        .await
        .expect("submit should succeed");

    assert_eq!(outcome, TransitionOutcome::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_fixes_metrics_and_awards_a_point(harness: Harness) {
    harness
        .directory
        .upsert_user(&UserProfile::new(UserId::new(1)).with_username("anna"))
        .await
        .expect("user registration should succeed");
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied());

    let later = harness.service_at("2025-06-10T11:30:00Z");
    let outcome = later
        .approve(id, &manager(), Some("looks good"))
        .await
        .expect("approval should succeed");

    let task = outcome.applied().expect("approval should apply");
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.time_spent_minutes(), Some(90));
    assert_eq!(task.reviewed_by(), Some(UserId::new(99)));
    assert_eq!(task.review_comment(), Some("looks good"));
    let user = harness
        .directory
        .find_user(UserId::new(1))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.points, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_by_an_executor_is_rejected(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied());

    let outcome = service
        .approve(id, &assignee(), None)
        .await
        .expect("approval should succeed");

    assert_eq!(
        outcome,
        TransitionOutcome::Rejected(GuardRejection::NotManager)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn re_approval_is_rejected_and_never_reawards(harness: Harness) {
    harness
        .directory
        .upsert_user(&UserProfile::new(UserId::new(1)).with_username("anna"))
        .await
        .expect("user registration should succeed");
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied());
    let first = service
        .approve(id, &manager(), None)
        .await
        .expect("approval should succeed");
    assert!(first.is_applied());

    let second = service
        .approve(id, &manager(), None)
        .await
        .expect("approval should succeed");

    assert_eq!(
        second,
        TransitionOutcome::Rejected(GuardRejection::AlreadyCompleted)
    );
    let user = harness
        .directory
        .find_user(UserId::new(1))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.points, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_after_three_revisions_awards_nothing(harness: Harness) {
    harness
        .directory
        .upsert_user(&UserProfile::new(UserId::new(1)).with_username("anna"))
        .await
        .expect("user registration should succeed");
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    run_revision_cycle(&service, id, "first pass").await;
    run_revision_cycle(&service, id, "second pass").await;
    run_revision_cycle(&service, id, "third pass").await;
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied());

    let outcome = service
        .approve(id, &manager(), None)
        .await
        .expect("approval should succeed");

    let task = outcome.applied().expect("approval should apply");
    assert_eq!(task.revision_count(), 3);
    let score = task.efficiency_score().expect("score fixed at approval");
    assert!((score.value() - 0.4).abs() < 1e-9);
    let user = harness
        .directory
        .find_user(UserId::new(1))
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.points, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_request_stores_the_comment(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    let submitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(submitted.is_applied());

    let outcome = service
        .request_revision(id, &manager(), "missing error handling")
        .await
        .expect("revision request should succeed");

    let task = outcome.applied().expect("revision should apply");
    assert_eq!(task.status(), TaskStatus::Revision);
    assert_eq!(task.review_comment(), Some("missing error handling"));
    assert_eq!(task.revision_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn return_to_work_requires_the_assignee(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    run_revision_cycle(&service, id, "tweak layout").await;
    let resubmitted = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");
    assert!(resubmitted.is_applied());
    let rejected = service
        .request_revision(id, &manager(), "still off")
        .await
        .expect("revision request should succeed");
    assert!(rejected.is_applied());

    let by_manager = service
        .return_to_work(id, &manager())
        .await
        .expect("return should succeed");
    let by_assignee = service
        .return_to_work(id, &assignee())
        .await
        .expect("return should succeed");

    assert_eq!(
        by_manager,
        TransitionOutcome::Rejected(GuardRejection::NotAssignee)
    );
    let task = by_assignee.applied().expect("return should apply");
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.review_comment(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn direct_completion_is_manager_gated_and_skips_metrics(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;

    let by_executor = service
        .complete(id, &bystander())
        .await
        .expect("complete should succeed");
    let by_manager = service
        .complete(id, &manager())
        .await
        .expect("complete should succeed");

    assert_eq!(
        by_executor,
        TransitionOutcome::Rejected(GuardRejection::NotManager)
    );
    let task = by_manager.applied().expect("completion should apply");
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.time_spent_minutes(), None);
    assert_eq!(task.efficiency_score(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_is_allowed_for_the_creator_and_managers_only(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;
    let creator = Caller::new(
        UserId::new(7),
        Some("dave".to_owned()),
        AccessContext::new(Role::Executor, true),
    );

    let by_bystander = service
        .delete(id, &bystander())
        .await
        .expect("delete should succeed");
    let by_creator = service
        .delete(id, &creator)
        .await
        .expect("delete should succeed");

    assert_eq!(
        by_bystander,
        TransitionOutcome::Rejected(GuardRejection::NotPermitted)
    );
    assert!(by_creator.is_applied());
    let gone = service.get(id).await.expect("lookup should succeed");
    assert_eq!(gone, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_details_edits_the_stored_task(harness: Harness) {
    let service = harness.service_at(CREATION_TIME);
    let id = create_task(&service).await;

    let outcome = service
        .update_details(
            id,
            TaskEdit {
                title: "Refined mockup".to_owned(),
                description: "desktop and mobile".to_owned(),
                deadline: None,
            },
        )
        .await
        .expect("edit should succeed");

    let task = outcome.applied().expect("edit should apply");
    assert_eq!(task.title(), "Refined mockup");
    assert_eq!(task.description(), "desktop and mobile");

    let blank = service
        .update_details(
            id,
            TaskEdit {
                title: "  ".to_owned(),
                description: String::new(),
                deadline: None,
            },
        )
        .await;
    assert!(matches!(
        blank,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_newest_first_and_filters_by_chat(harness: Harness) {
    let first = harness.service_at("2025-06-10T10:00:00Z");
    let second = harness.service_at("2025-06-10T11:00:00Z");
    let third = harness.service_at("2025-06-10T12:00:00Z");
    let older = first
        .create(NewTask::new("First", "@anna", WORK_CHAT, UserId::new(7)))
        .await
        .expect("task creation should succeed");
    let other_chat = second
        .create(NewTask::new("Elsewhere", "@bob", ChatId::new(-200), UserId::new(7)))
        .await
        .expect("task creation should succeed");
    let newer = third
        .create(NewTask::new("Second", "@anna", WORK_CHAT, UserId::new(7)))
        .await
        .expect("task creation should succeed");

    let all = third
        .list(TaskFilter::all())
        .await
        .expect("listing should succeed");
    let work_only = third
        .list(TaskFilter::for_chat(WORK_CHAT))
        .await
        .expect("listing should succeed");

    let all_ids: Vec<TaskId> = all.iter().map(|task| task.id()).collect();
    assert_eq!(all_ids, vec![newer.id(), other_chat.id(), older.id()]);
    let work_ids: Vec<TaskId> = work_only.iter().map(|task| task.id()).collect();
    assert_eq!(work_ids, vec![newer.id(), older.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn notifier_failures_never_fail_the_transition(harness: Harness) {
    let mut notifier = MockTaskNotifier::new();
    notifier
        .expect_announce()
        .returning(|_| Err(NotifyError::Render("template exploded".to_owned())));
    let service = harness.service_with(CREATION_TIME, Arc::new(notifier));

    let id = create_task(&service).await;
    let outcome = service
        .submit(id, &assignee())
        .await
        .expect("submit should succeed");

    assert!(outcome.is_applied());
}
