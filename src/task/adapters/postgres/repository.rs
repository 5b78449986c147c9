//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Board, PersistedTaskData, Priority, Status, Task, TaskCode, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_code = task.code();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_task_code_unique_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::DuplicateTaskCode(task_code)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changed = to_new_row(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(changed.title),
                    tasks::description.eq(changed.description),
                    tasks::priority.eq(changed.priority),
                    tasks::status.eq(changed.status),
                    tasks::board.eq(changed.board),
                    tasks::assignee.eq(changed.assignee),
                    tasks::updated_at.eq(changed.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_codes(&self, priority: Priority) -> TaskRepositoryResult<Vec<TaskCode>> {
        let pattern = format!("{}-%", priority.code_letter());
        self.run_blocking(move |connection| {
            let codes = tasks::table
                .filter(tasks::task_code.like(pattern))
                .select(tasks::task_code)
                .load::<String>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            codes
                .into_iter()
                .map(|raw| {
                    TaskCode::try_from(raw.as_str()).map_err(TaskRepositoryError::persistence)
                })
                .collect()
        })
        .await
    }

    async fn count_in_status(&self, board: Board, status: Status) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .filter(tasks::board.eq(board.as_str()))
                .filter(tasks::status.eq(status.as_str()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            usize::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        task_code: task.code().to_string(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        board: task.board().as_str().to_owned(),
        assignee: task.assignee().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        task_code,
        title,
        description,
        priority,
        status,
        board,
        assignee,
        created_at,
        updated_at,
    } = row;

    let code =
        TaskCode::try_from(task_code.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_priority =
        Priority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_status =
        Status::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_board =
        Board::try_from(board.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        code,
        title,
        description,
        priority: parsed_priority,
        status: parsed_status,
        board: parsed_board,
        assignee,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn is_task_code_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_tasks_task_code_unique")
}
