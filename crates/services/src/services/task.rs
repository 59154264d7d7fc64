use db::{
    DbErr, TransactionTrait,
    models::{
        comment::{Comment, CreateComment},
        project::Project,
        task::{CreateTask, Task, UpdateTask},
        task_history::TaskHistory,
        user::User,
    },
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskServiceError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Task not found")]
    TaskNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Project is at capacity ({} tasks max)", Project::MAX_TASKS)]
    CapacityExceeded,
    #[error("The store reported no changes were written")]
    CommitFailed,
}

pub type Result<T> = std::result::Result<T, TaskServiceError>;

#[derive(Clone, Default)]
pub struct TaskService;

impl TaskService {
    pub fn new() -> Self {
        Self
    }

    /// Inserts the task and its creation audit entry in a single
    /// transaction; a project already at the task ceiling rejects the
    /// insert without writing anything.
    pub async fn create_task(&self, pool: &db::DbPool, payload: CreateTask) -> Result<Task> {
        let tx = pool.begin().await?;

        let project = Project::find_by_id(&tx, payload.project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound)?;

        let task_count = Task::count_by_project_id(&tx, project.id).await?;
        if !Project::has_task_capacity(task_count) {
            tracing::info!(
                "Rejected task for project {}: already holding {} tasks",
                project.id,
                task_count
            );
            return Err(TaskServiceError::CapacityExceeded);
        }

        let id = Uuid::new_v4();
        let task = Task::create(&tx, &payload, id).await?;

        let message = TaskHistory::creation_message(&task.priority, &task.status);
        TaskHistory::record(&tx, task.id, &message, &project.user_id.to_string()).await?;

        tx.commit().await?;
        tracing::info!("Created task {} in project {}", task.id, project.id);
        Ok(task)
    }

    /// Applies the requested changes and appends one audit entry per field
    /// that actually changed, all in a single transaction. An empty
    /// description clears the stored one; an absent field keeps it.
    pub async fn update_task(
        &self,
        pool: &db::DbPool,
        task_id: Uuid,
        payload: UpdateTask,
    ) -> Result<Task> {
        let tx = pool.begin().await?;

        let task = Task::find_by_id(&tx, task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound)?;
        let user = User::find_by_id(&tx, payload.user_id)
            .await?
            .ok_or(TaskServiceError::UserNotFound)?;

        let new_status = payload.status.unwrap_or_else(|| task.status.clone());
        let new_description = match payload.description {
            Some(description) if description.trim().is_empty() => None,
            Some(description) => Some(description),
            None => task.description.clone(),
        };

        if new_status != task.status {
            let message = TaskHistory::status_change_message(&task.status, &new_status);
            TaskHistory::record(&tx, task.id, &message, &user.name).await?;
        }

        if new_description != task.description {
            let message = TaskHistory::description_change_message(
                task.description.as_deref(),
                new_description.as_deref(),
            );
            TaskHistory::record(&tx, task.id, &message, &user.name).await?;
        }

        let updated = Task::update(&tx, task.id, new_status, new_description)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => TaskServiceError::CommitFailed,
                other => TaskServiceError::Database(other),
            })?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn add_comment(
        &self,
        pool: &db::DbPool,
        task_id: Uuid,
        payload: CreateComment,
    ) -> Result<Comment> {
        if Task::find_by_id(pool, task_id).await?.is_none() {
            return Err(TaskServiceError::TaskNotFound);
        }

        let comment = Comment::create(pool, task_id, &payload).await?;
        Ok(comment)
    }

    pub async fn delete_task(&self, pool: &db::DbPool, task_id: Uuid) -> Result<()> {
        let rows_affected = Task::delete(pool, task_id).await?;
        if rows_affected == 0 {
            return Err(TaskServiceError::TaskNotFound);
        }

        tracing::info!("Deleted task {}", task_id);
        Ok(())
    }
}
