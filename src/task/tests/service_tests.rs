//! Service orchestration tests for the board operations.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        Board, Priority, Status, Task, TaskCode, TaskDomainError, TaskFilter, TaskId, TaskPatch,
        WorkflowError,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{CreateTaskRequest, TaskBoardError, TaskBoardService},
};
use mockable::DefaultClock;
use mockall::Sequence;
use rstest::{fixture, rstest};

type TestService = TaskBoardService<InMemoryTaskRepository, DefaultClock>;

mockall::mock! {
    Repo {}

    #[async_trait::async_trait]
    impl TaskRepository for Repo {
        async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn list_codes(&self, priority: Priority) -> TaskRepositoryResult<Vec<TaskCode>>;
        async fn count_in_status(&self, board: Board, status: Status)
            -> TaskRepositoryResult<usize>;
    }
}

#[fixture]
fn service() -> TestService {
    TaskBoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn mock_service(repository: MockRepo) -> TaskBoardService<MockRepo, DefaultClock> {
    TaskBoardService::new(Arc::new(repository), Arc::new(DefaultClock))
}

async fn create_progress_tasks(service: &TestService, board: Board, count: usize) {
    for index in 0..count {
        let request = CreateTaskRequest::new(format!("In flight {index}"), Priority::Medium)
            .with_status(Status::Progress)
            .with_board(board);
        service
            .create_task(request)
            .await
            .expect("progress task creation should succeed");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_on_empty_store_allocates_first_critical_code(service: TestService) {
    let request = CreateTaskRequest::new("Fix login bug", Priority::Critical)
        .with_board(Board::PontisDev);
    let created = service
        .create_task(request)
        .await
        .expect("task creation should succeed");

    assert_eq!(created.code().to_string(), "C-001");
    assert_eq!(created.status(), Status::Backlog);
    assert_eq!(created.board(), Board::PontisDev);

    let second = service
        .create_task(CreateTaskRequest::new("Address parsing bug", Priority::Critical))
        .await
        .expect("task creation should succeed");
    assert_eq!(second.code().to_string(), "C-002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn code_sequences_are_scoped_per_priority(service: TestService) {
    let codes = [
        ("Critical one", Priority::Critical),
        ("High one", Priority::High),
        ("Critical two", Priority::Critical),
    ];
    let mut allocated = Vec::new();
    for (title, priority) in codes {
        let task = service
            .create_task(CreateTaskRequest::new(title, priority))
            .await
            .expect("task creation should succeed");
        allocated.push(task.code().to_string());
    }

    assert_eq!(allocated, ["C-001", "H-001", "C-002"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title(service: TestService) {
    let result = service
        .create_task(CreateTaskRequest::new("   ", Priority::Low))
        .await;

    assert!(matches!(
        result,
        Err(TaskBoardError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_board_partitioned_and_priority_ordered(service: TestService) {
    service
        .create_task(CreateTaskRequest::new("Routine dev work", Priority::Medium))
        .await
        .expect("task creation should succeed");
    service
        .create_task(CreateTaskRequest::new("Dev blocker", Priority::Critical))
        .await
        .expect("task creation should succeed");
    service
        .create_task(
            CreateTaskRequest::new("Personal errand", Priority::High).with_board(Board::Personal),
        )
        .await
        .expect("task creation should succeed");

    let dev_view = service
        .list_tasks(&TaskFilter::new(Board::PontisDev))
        .await
        .expect("listing should succeed");
    let dev_titles: Vec<&str> = dev_view.iter().map(Task::title).collect();
    assert_eq!(dev_titles, ["Dev blocker", "Routine dev work"]);

    let personal_view = service
        .list_tasks(&TaskFilter::new(Board::Personal))
        .await
        .expect("listing should succeed");
    assert!(personal_view.iter().all(|task| task.board() == Board::Personal));
    assert_eq!(personal_view.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_search_matches_the_task_code(service: TestService) {
    service
        .create_task(CreateTaskRequest::new("Staging environment", Priority::Critical))
        .await
        .expect("task creation should succeed");
    service
        .create_task(CreateTaskRequest::new("Pricing model", Priority::High))
        .await
        .expect("task creation should succeed");

    let view = service
        .list_tasks(&TaskFilter::new(Board::PontisDev).with_search("c-001"))
        .await
        .expect("listing should succeed");

    let titles: Vec<&str> = view.iter().map(Task::title).collect();
    assert_eq!(titles, ["Staging environment"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_retains_unspecified_fields_and_persists(service: TestService) {
    let created = service
        .create_task(
            CreateTaskRequest::new("Subscription flow UX", Priority::High)
                .with_description("Improve value proposition messaging")
                .with_assignee("Blake"),
        )
        .await
        .expect("task creation should succeed");

    let updated = service
        .update_task(created.id(), TaskPatch::new().with_assignee("Clara"))
        .await
        .expect("update should succeed");

    assert_eq!(updated.assignee(), "Clara");
    assert_eq!(updated.title(), "Subscription flow UX");
    assert_eq!(updated.description(), "Improve value proposition messaging");
    assert_eq!(updated.code(), created.code());
    assert!(updated.updated_at() >= created.updated_at());

    let fetched = service
        .get_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, updated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_reports_not_found(service: TestService) {
    let missing = TaskId::new();
    let result = service
        .update_task(missing, TaskPatch::new().with_title("Renamed"))
        .await;

    assert!(matches!(result, Err(TaskBoardError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_persists_the_new_status(service: TestService) {
    let created = service
        .create_task(CreateTaskRequest::new("QA verification", Priority::High))
        .await
        .expect("task creation should succeed");

    let moved = service
        .transition_status(created.id(), Status::Testing)
        .await
        .expect("transition should succeed");
    assert_eq!(moved.status(), Status::Testing);

    let fetched = service
        .get_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.status(), Status::Testing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_into_full_progress_column_is_rejected(service: TestService) {
    create_progress_tasks(&service, Board::PontisDev, 5).await;
    let sixth = service
        .create_task(CreateTaskRequest::new("Sixth task", Priority::High))
        .await
        .expect("task creation should succeed");

    let result = service.transition_status(sixth.id(), Status::Progress).await;

    assert!(matches!(
        result,
        Err(TaskBoardError::Workflow(WorkflowError::WipLimitExceeded {
            board: Board::PontisDev,
            limit: 5,
        }))
    ));
    let fetched = service
        .get_task(sixth.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.status(), Status::Backlog);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wip_limit_is_scoped_to_the_target_board(service: TestService) {
    create_progress_tasks(&service, Board::PontisDev, 5).await;
    let personal = service
        .create_task(
            CreateTaskRequest::new("Personal task", Priority::Low).with_board(Board::Personal),
        )
        .await
        .expect("task creation should succeed");

    let moved = service
        .transition_status(personal.id(), Status::Progress)
        .await
        .expect("a full pontis-dev column must not block the personal board");
    assert_eq!(moved.status(), Status::Progress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_into_progress_is_guarded_like_a_transition(service: TestService) {
    create_progress_tasks(&service, Board::PontisDev, 5).await;
    let sixth = service
        .create_task(CreateTaskRequest::new("Sixth task", Priority::High))
        .await
        .expect("task creation should succeed");

    let result = service
        .update_task(sixth.id(), TaskPatch::new().with_status(Status::Progress))
        .await;

    assert!(matches!(
        result,
        Err(TaskBoardError::Workflow(WorkflowError::WipLimitExceeded { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaving_a_full_progress_column_is_allowed(service: TestService) {
    create_progress_tasks(&service, Board::PontisDev, 5).await;
    let view = service
        .list_tasks(&TaskFilter::new(Board::PontisDev))
        .await
        .expect("listing should succeed");
    let first = view.first().expect("board should hold tasks");

    let moved = service
        .transition_status(first.id(), Status::Testing)
        .await
        .expect("leaving progress should succeed");
    assert_eq!(moved.status(), Status::Testing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_task(service: TestService) {
    let created = service
        .create_task(CreateTaskRequest::new("Throwaway", Priority::Low))
        .await
        .expect("task creation should succeed");

    service
        .delete_task(created.id())
        .await
        .expect("delete should succeed");

    let lookup = service.get_task(created.id()).await;
    assert!(matches!(lookup, Err(TaskBoardError::NotFound(id)) if id == created.id()));

    let again = service.delete_task(created.id()).await;
    assert!(matches!(again, Err(TaskBoardError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn code_collision_triggers_rescan_and_retry() {
    let mut repository = MockRepo::new();
    let mut order = Sequence::new();
    repository
        .expect_list_codes()
        .times(1)
        .in_sequence(&mut order)
        .returning(|_| Ok(Vec::new()));
    repository
        .expect_insert()
        .times(1)
        .in_sequence(&mut order)
        .returning(|task| Err(TaskRepositoryError::DuplicateTaskCode(task.code())));
    repository
        .expect_list_codes()
        .times(1)
        .in_sequence(&mut order)
        .returning(|_| Ok(vec![TaskCode::from_parts(Priority::Critical, 1)]));
    repository
        .expect_insert()
        .times(1)
        .in_sequence(&mut order)
        .withf(|task| task.code() == TaskCode::from_parts(Priority::Critical, 2))
        .returning(|_| Ok(()));

    let created = mock_service(repository)
        .create_task(CreateTaskRequest::new("Raced create", Priority::Critical))
        .await
        .expect("retry should resolve the collision");

    assert_eq!(created.code().to_string(), "C-002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_retries_surface_a_typed_error() {
    let mut repository = MockRepo::new();
    repository
        .expect_list_codes()
        .returning(|_| Ok(Vec::new()));
    repository
        .expect_insert()
        .returning(|task| Err(TaskRepositoryError::DuplicateTaskCode(task.code())));

    let result = mock_service(repository)
        .create_task(CreateTaskRequest::new("Contended create", Priority::High))
        .await;

    assert!(matches!(
        result,
        Err(TaskBoardError::CodeAllocationExhausted { attempts: 3 })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_scan_falls_back_to_time_derived_code() {
    let mut repository = MockRepo::new();
    repository.expect_list_codes().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "scan unavailable",
        )))
    });
    repository
        .expect_insert()
        .withf(|task| task.code().priority() == Priority::Medium && task.code().number() < 1000)
        .returning(|_| Ok(()));

    let created = mock_service(repository)
        .create_task(CreateTaskRequest::new("Degraded create", Priority::Medium))
        .await
        .expect("fallback allocation should keep creation live");

    assert!(created.code().to_string().starts_with("M-"));
}
