use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{entities::user, types::UserFunction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub function: UserFunction,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub function: UserFunction,
}

impl User {
    fn from_model(model: user::Model) -> Self {
        Self {
            id: model.uuid,
            name: model.name,
            email: model.email,
            function: model.function,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = user::Entity::find()
            .order_by_asc(user::Column::Name)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Self>, DbErr> {
        let record = user::Entity::find()
            .filter(user::Column::Uuid.eq(id))
            .one(db)
            .await?;
        Ok(record.map(Self::from_model))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateUser,
        user_id: Uuid,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = user::ActiveModel {
            uuid: Set(user_id),
            name: Set(data.name.clone()),
            email: Set(data.email.clone()),
            function: Set(data.function.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        let model = active.insert(db).await?;
        Ok(Self::from_model(model))
    }
}
