use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use services::services::{
    config::{Config, ConfigError},
    project::ProjectService,
    report::ReportService,
    task::TaskService,
};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Database(#[from] db::DbErr),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One running instance of the task board: the shared config, the database
/// handle, and the domain services that route handlers call into.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    async fn new() -> Result<Self, DeploymentError>;

    fn config(&self) -> &Arc<RwLock<Config>>;

    fn db(&self) -> &DBService;

    fn project(&self) -> &ProjectService;

    fn task(&self) -> &TaskService;

    fn report(&self) -> &ReportService;
}
