use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use deployment::{Deployment, DeploymentError};
use services::services::{
    config::{Config, load_config_from_file, save_config_to_file},
    project::ProjectService,
    report::ReportService,
    task::TaskService,
};
use tokio::sync::RwLock;
use utils::assets::config_path;

#[derive(Clone)]
pub struct LocalDeployment {
    config: Arc<RwLock<Config>>,
    db: DBService,
    project: ProjectService,
    task: TaskService,
    report: ReportService,
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new() -> Result<Self, DeploymentError> {
        let config = Self::load_runtime_config().await?;
        let db = DBService::new().await?;

        let deployment = Self {
            config,
            db,
            project: ProjectService::new(),
            task: TaskService::new(),
            report: ReportService::new(),
        };

        Ok(deployment)
    }

    fn config(&self) -> &Arc<RwLock<Config>> {
        &self.config
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn project(&self) -> &ProjectService {
        &self.project
    }

    fn task(&self) -> &TaskService {
        &self.task
    }

    fn report(&self) -> &ReportService {
        &self.report
    }
}

impl LocalDeployment {
    async fn load_runtime_config() -> Result<Arc<RwLock<Config>>, DeploymentError> {
        let config_path = config_path();
        let raw_config = load_config_from_file(&config_path).await;

        // Write the config straight back so newly added fields and the
        // version stamp reach the file on first boot after an upgrade.
        save_config_to_file(&raw_config, &config_path).await?;
        tracing::debug!("Runtime config loaded from {}", config_path.display());

        Ok(Arc::new(RwLock::new(raw_config)))
    }
}
