use db::{
    DbErr,
    models::{
        project::{CreateProject, Project},
        task::Task,
        user::User,
    },
};
use thiserror::Error;
use uuid::Uuid;

use crate::services::deletion_policy::{PendingTasksError, ProjectDeletionPolicy};

#[derive(Debug, Error)]
pub enum ProjectServiceError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Project not found")]
    ProjectNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    DeletionBlocked(#[from] PendingTasksError),
}

pub type Result<T> = std::result::Result<T, ProjectServiceError>;

#[derive(Clone, Default)]
pub struct ProjectService {
    deletion_policy: ProjectDeletionPolicy,
}

impl ProjectService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_project(
        &self,
        pool: &db::DbPool,
        payload: CreateProject,
    ) -> Result<Project> {
        if User::find_by_id(pool, payload.user_id).await?.is_none() {
            return Err(ProjectServiceError::UserNotFound);
        }

        let id = Uuid::new_v4();
        let project = Project::create(pool, &payload, id).await?;

        tracing::info!("Created project {} for user {}", project.id, project.user_id);
        Ok(project)
    }

    /// Returns the number of deleted rows, so callers can distinguish a
    /// vanished project from a successful delete.
    pub async fn delete_project(&self, pool: &db::DbPool, project_id: Uuid) -> Result<u64> {
        let pending_tasks = Task::count_pending_by_project_id(pool, project_id)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotFound(_) => ProjectServiceError::ProjectNotFound,
                other => ProjectServiceError::Database(other),
            })?;
        self.deletion_policy.evaluate(pending_tasks)?;

        let rows_affected = Project::delete(pool, project_id).await?;
        if rows_affected > 0 {
            tracing::info!("Deleted project {}", project_id);
        }
        Ok(rows_affected)
    }
}
