use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::task_history,
    models::ids,
    types::{TaskPriority, TaskStatus},
};

/// One line of a task's append-only audit trail. Entries are only ever
/// inserted, never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHistory {
    pub id: Uuid,
    pub task_id: Uuid,
    pub modification: String,
    pub modified_by: String,
    pub modified_at: DateTime<Utc>,
}

impl TaskHistory {
    pub fn creation_message(priority: &TaskPriority, status: &TaskStatus) -> String {
        format!("Task created with priority {priority} and status {status}.")
    }

    pub fn status_change_message(from: &TaskStatus, to: &TaskStatus) -> String {
        format!("Task status changed from {from} to {to}")
    }

    pub fn description_change_message(from: Option<&str>, to: Option<&str>) -> String {
        format!(
            "Task description changed from {} to {}",
            from.unwrap_or_default(),
            to.unwrap_or_default()
        )
    }

    async fn from_model<C: ConnectionTrait>(
        db: &C,
        model: task_history::Model,
    ) -> Result<Self, DbErr> {
        let task_uuid = ids::task_uuid_by_id(db, model.task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        Ok(Self {
            id: model.uuid,
            task_id: task_uuid,
            modification: model.modification,
            modified_by: model.modified_by,
            modified_at: model.modified_at.into(),
        })
    }

    pub async fn find_by_task_id<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let models = task_history::Entity::find()
            .filter(task_history::Column::TaskId.eq(task_row_id))
            .order_by_asc(task_history::Column::Id)
            .all(db)
            .await?;

        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            entries.push(Self::from_model(db, model).await?);
        }
        Ok(entries)
    }

    pub async fn record<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
        modification: &str,
        modified_by: &str,
    ) -> Result<Self, DbErr> {
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let active = task_history::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            task_id: Set(task_row_id),
            modification: Set(modification.to_string()),
            modified_by: Set(modified_by.to_string()),
            modified_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        Self::from_model(db, model).await
    }
}
