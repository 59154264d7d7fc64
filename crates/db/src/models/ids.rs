use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entities::{project, task, user};

pub async fn user_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    user::Entity::find()
        .select_only()
        .column(user::Column::Id)
        .filter(user::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn user_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    user::Entity::find()
        .select_only()
        .column(user::Column::Uuid)
        .filter(user::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

pub async fn project_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    project::Entity::find()
        .select_only()
        .column(project::Column::Id)
        .filter(project::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn project_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    project::Entity::find()
        .select_only()
        .column(project::Column::Uuid)
        .filter(project::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

pub async fn task_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    task::Entity::find()
        .select_only()
        .column(task::Column::Id)
        .filter(task::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn task_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    task::Entity::find()
        .select_only()
        .column(task::Column::Uuid)
        .filter(task::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use crate::{
        models::{
            project::{CreateProject, Project},
            task::{CreateTask, Task},
            user::{CreateUser, User},
        },
        types::{TaskPriority, TaskStatus},
    };

    use super::*;

    async fn setup_db() -> sea_orm::DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db_migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn ids_roundtrip_and_uuid_resolution() {
        let db = setup_db().await;

        let user_id = Uuid::new_v4();
        let user = User::create(
            &db,
            &CreateUser {
                name: "Test user".to_string(),
                email: "test@example.com".to_string(),
                function: Default::default(),
            },
            user_id,
        )
        .await
        .unwrap();
        assert_eq!(user.id, user_id);

        let user_row_id = user_id_by_uuid(&db, user_id)
            .await
            .unwrap()
            .expect("user row id");
        assert_eq!(
            user_uuid_by_id(&db, user_row_id).await.unwrap(),
            Some(user_id)
        );

        let project_id = Uuid::new_v4();
        let project = Project::create(
            &db,
            &CreateProject {
                user_id,
                name: "Test project".to_string(),
                description: None,
            },
            project_id,
        )
        .await
        .unwrap();
        assert_eq!(project.id, project_id);
        assert_eq!(project.user_id, user_id);

        let project_row_id = project_id_by_uuid(&db, project_id)
            .await
            .unwrap()
            .expect("project row id");
        assert_eq!(
            project_uuid_by_id(&db, project_row_id).await.unwrap(),
            Some(project_id)
        );

        let task_id = Uuid::new_v4();
        let task = Task::create(
            &db,
            &CreateTask {
                project_id,
                title: "Test task".to_string(),
                description: None,
                due_date: Utc::now() + Duration::days(7),
                priority: TaskPriority::Medium,
            },
            task_id,
        )
        .await
        .unwrap();
        assert_eq!(task.id, task_id);
        assert_eq!(task.project_id, project_id);
        assert_eq!(task.status, TaskStatus::Pending);

        let task_row_id = task_id_by_uuid(&db, task_id)
            .await
            .unwrap()
            .expect("task row id");
        assert_eq!(
            task_uuid_by_id(&db, task_row_id).await.unwrap(),
            Some(task_id)
        );

        let tasks = Task::find_by_project_id(&db, project_id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task_id);
    }
}
