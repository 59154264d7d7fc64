use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::project::{CreateProject, Project};
use deployment::Deployment;
use serde::Deserialize;
use services::services::project::ProjectServiceError;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError, middleware::load_project_middleware};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub user_id: Option<Uuid>,
}

pub async fn get_projects(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<ProjectQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = match query.user_id {
        Some(user_id) => Project::find_by_user_id(&deployment.db().pool, user_id).await?,
        None => Project::find_all(&deployment.db().pool).await?,
    };

    Ok(ResponseJson(ApiResponse::success(projects)))
}

pub async fn get_project(
    Extension(project): Extension<Project>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn create_project(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    tracing::debug!("Creating project '{}'", payload.name);

    match deployment
        .project()
        .create_project(&deployment.db().pool, payload)
        .await
    {
        Ok(project) => Ok(ResponseJson(ApiResponse::success(project))),
        Err(ProjectServiceError::UserNotFound) => Err(ApiError::NotFound(
            "The specified owner does not exist".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_project(
    Extension(project): Extension<Project>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = deployment
        .project()
        .delete_project(&deployment.db().pool, project.id)
        .await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let project_id_router = Router::new()
        .route("/", get(get_project).delete(delete_project))
        .layer(from_fn_with_state(
            deployment.clone(),
            load_project_middleware::<DeploymentImpl>,
        ));

    let projects_router = Router::new()
        .route("/", get(get_projects).post(create_project))
        .nest("/{project_id}", project_id_router);

    Router::new().nest("/projects", projects_router)
}
