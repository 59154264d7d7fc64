use db::{
    DbErr,
    models::{report::UserReport, user::User},
    types::UserFunction,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("User not found")]
    UserNotFound,
    #[error("Reports can only be generated by users with the manager function")]
    NotManager,
}

pub type Result<T> = std::result::Result<T, ReportServiceError>;

#[derive(Clone, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Builds the completed-work summary for one user. Only managers may
    /// request it, including reports about their own projects.
    pub async fn generate_user_report(
        &self,
        pool: &db::DbPool,
        user_id: Uuid,
    ) -> Result<UserReport> {
        let user = User::find_by_id(pool, user_id)
            .await?
            .ok_or(ReportServiceError::UserNotFound)?;

        if user.function != UserFunction::Manager {
            tracing::info!("Refused report for {}: user is not a manager", user.id);
            return Err(ReportServiceError::NotManager);
        }

        let report = UserReport::generate(pool, &user).await?;
        Ok(report)
    }
}
