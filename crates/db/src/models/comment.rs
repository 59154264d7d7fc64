use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{entities::comment, models::ids};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub author: String,
}

impl Comment {
    async fn from_model<C: ConnectionTrait>(
        db: &C,
        model: comment::Model,
    ) -> Result<Self, DbErr> {
        let task_uuid = ids::task_uuid_by_id(db, model.task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        Ok(Self {
            id: model.uuid,
            task_id: task_uuid,
            content: model.content,
            author: model.author,
            created_at: model.created_at.into(),
        })
    }

    pub async fn find_by_task_id<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let models = comment::Entity::find()
            .filter(comment::Column::TaskId.eq(task_row_id))
            .order_by_asc(comment::Column::Id)
            .all(db)
            .await?;

        let mut comments = Vec::with_capacity(models.len());
        for model in models {
            comments.push(Self::from_model(db, model).await?);
        }
        Ok(comments)
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
        data: &CreateComment,
    ) -> Result<Self, DbErr> {
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let active = comment::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            task_id: Set(task_row_id),
            content: Set(data.content.clone()),
            author: Set(data.author.clone()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        Self::from_model(db, model).await
    }
}
