use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::types::{TaskPriority, TaskStatus};

use crate::{entities::task, models::ids};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
}

/// Priority is deliberately absent: once a task exists its priority is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub status: Option<TaskStatus>,
    pub description: Option<String>,
    pub user_id: Uuid,
}

impl Task {
    async fn from_model<C: ConnectionTrait>(db: &C, model: task::Model) -> Result<Self, DbErr> {
        let project_uuid = ids::project_uuid_by_id(db, model.project_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

        Ok(Self {
            id: model.uuid,
            project_id: project_uuid,
            title: model.title,
            description: model.description,
            due_date: model.due_date.into(),
            status: model.status,
            priority: model.priority,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let models = task::Entity::find()
            .order_by_desc(task::Column::CreatedAt)
            .all(db)
            .await?;

        let mut tasks = Vec::with_capacity(models.len());
        for model in models {
            tasks.push(Self::from_model(db, model).await?);
        }
        Ok(tasks)
    }

    pub async fn find_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let project_row_id = ids::project_id_by_uuid(db, project_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

        let models = task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_row_id))
            .order_by_desc(task::Column::CreatedAt)
            .all(db)
            .await?;

        let mut tasks = Vec::with_capacity(models.len());
        for model in models {
            tasks.push(Self::from_model(db, model).await?);
        }
        Ok(tasks)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let record = task::Entity::find()
            .filter(task::Column::Uuid.eq(id))
            .one(db)
            .await?;

        match record {
            Some(model) => Ok(Some(Self::from_model(db, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn count_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<u64, DbErr> {
        let project_row_id = ids::project_id_by_uuid(db, project_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

        task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_row_id))
            .count(db)
            .await
    }

    pub async fn count_pending_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<u64, DbErr> {
        let project_row_id = ids::project_id_by_uuid(db, project_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

        task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_row_id))
            .filter(task::Column::Status.eq(TaskStatus::Pending))
            .count(db)
            .await
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateTask,
        task_id: Uuid,
    ) -> Result<Self, DbErr> {
        let project_row_id = ids::project_id_by_uuid(db, data.project_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

        let now = Utc::now();
        let active = task::ActiveModel {
            uuid: Set(task_id),
            project_id: Set(project_row_id),
            title: Set(data.title.clone()),
            description: Set(data.description.clone()),
            due_date: Set(data.due_date.into()),
            status: Set(TaskStatus::default()),
            priority: Set(data.priority.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        Self::from_model(db, model).await
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        status: TaskStatus,
        description: Option<String>,
    ) -> Result<Self, DbErr> {
        let record = task::Entity::find()
            .filter(task::Column::Uuid.eq(id))
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let mut active: task::ActiveModel = record.into();
        active.status = Set(status);
        active.description = Set(description);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(db).await?;
        Self::from_model(db, updated).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let result = task::Entity::delete_many()
            .filter(task::Column::Uuid.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
