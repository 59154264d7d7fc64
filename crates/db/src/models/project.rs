use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{entities::project, models::ids};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl Project {
    /// Hard ceiling on how many tasks a single project may hold.
    pub const MAX_TASKS: u64 = 20;

    pub fn has_task_capacity(task_count: u64) -> bool {
        task_count < Self::MAX_TASKS
    }

    async fn from_model<C: ConnectionTrait>(db: &C, model: project::Model) -> Result<Self, DbErr> {
        let user_uuid = ids::user_uuid_by_id(db, model.user_id)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        Ok(Self {
            id: model.uuid,
            user_id: user_uuid,
            name: model.name,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = project::Entity::find()
            .order_by_desc(project::Column::CreatedAt)
            .all(db)
            .await?;

        let mut projects = Vec::with_capacity(records.len());
        for record in records {
            projects.push(Self::from_model(db, record).await?);
        }
        Ok(projects)
    }

    pub async fn find_by_user_id<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let user_row_id = ids::user_id_by_uuid(db, user_id)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let records = project::Entity::find()
            .filter(project::Column::UserId.eq(user_row_id))
            .order_by_desc(project::Column::CreatedAt)
            .all(db)
            .await?;

        let mut projects = Vec::with_capacity(records.len());
        for record in records {
            projects.push(Self::from_model(db, record).await?);
        }
        Ok(projects)
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Self>, DbErr> {
        let record = project::Entity::find()
            .filter(project::Column::Uuid.eq(id))
            .one(db)
            .await?;

        match record {
            Some(model) => Ok(Some(Self::from_model(db, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateProject,
        project_id: Uuid,
    ) -> Result<Self, DbErr> {
        let user_row_id = ids::user_id_by_uuid(db, data.user_id)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let now = Utc::now();
        let active = project::ActiveModel {
            uuid: Set(project_id),
            user_id: Set(user_row_id),
            name: Set(data.name.clone()),
            description: Set(data.description.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        Self::from_model(db, model).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let result = project::Entity::delete_many()
            .filter(project::Column::Uuid.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_capacity_closes_at_the_ceiling() {
        assert!(Project::has_task_capacity(0));
        assert!(Project::has_task_capacity(Project::MAX_TASKS - 1));
        assert!(!Project::has_task_capacity(Project::MAX_TASKS));
        assert!(!Project::has_task_capacity(Project::MAX_TASKS + 1));
    }
}
