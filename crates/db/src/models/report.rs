use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::{project, task},
    models::{ids, user::User},
    types::TaskStatus,
};

/// Trailing window, in days, a completed task's due date must fall inside
/// to count toward the report.
pub const REPORT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReport {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub completed_tasks: u64,
    /// Completed tasks per owned project. `None` when the user owns no
    /// projects, since the average is undefined there.
    pub completion_ratio: Option<f64>,
}

impl UserReport {
    pub async fn generate<C: ConnectionTrait>(db: &C, user: &User) -> Result<Self, DbErr> {
        let user_row_id = ids::user_id_by_uuid(db, user.id)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let project_ids: Vec<i64> = project::Entity::find()
            .select_only()
            .column(project::Column::Id)
            .filter(project::Column::UserId.eq(user_row_id))
            .into_tuple()
            .all(db)
            .await?;

        let project_count = project_ids.len() as u64;
        let completed_tasks = if project_ids.is_empty() {
            0
        } else {
            // Due dates are not capped at now, so recently completed work
            // scheduled for the future still counts.
            let cutoff = Utc::now() - Duration::days(REPORT_WINDOW_DAYS);
            task::Entity::find()
                .filter(task::Column::ProjectId.is_in(project_ids))
                .filter(task::Column::Status.eq(TaskStatus::Completed))
                .filter(task::Column::DueDate.gt(cutoff))
                .count(db)
                .await?
        };

        let completion_ratio =
            (project_count > 0).then(|| completed_tasks as f64 / project_count as f64);

        Ok(Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            completed_tasks,
            completion_ratio,
        })
    }
}
