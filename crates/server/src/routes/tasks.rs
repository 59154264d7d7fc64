use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{delete, get, put},
};
use db::models::{
    comment::{Comment, CreateComment},
    task::{CreateTask, Task, UpdateTask},
    task_history::TaskHistory,
};
use deployment::Deployment;
use serde::Deserialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError, middleware::load_task_middleware};

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub project_id: Option<Uuid>,
}

pub async fn get_tasks(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<TaskQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = match query.project_id {
        Some(project_id) => Task::find_by_project_id(&deployment.db().pool, project_id).await?,
        None => Task::find_all(&deployment.db().pool).await?,
    };

    Ok(ResponseJson(ApiResponse::success(tasks)))
}

pub async fn get_task(
    Extension(task): Extension<Task>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn create_task(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    tracing::debug!(
        "Creating task '{}' in project {}",
        payload.title,
        payload.project_id
    );

    let task = deployment
        .task()
        .create_task(&deployment.db().pool, payload)
        .await?;

    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn update_task(
    Extension(existing_task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<UpdateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let task = deployment
        .task()
        .update_task(&deployment.db().pool, existing_task.id, payload)
        .await?;

    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), ApiError> {
    deployment
        .task()
        .delete_task(&deployment.db().pool, task.id)
        .await?;

    Ok((StatusCode::ACCEPTED, ResponseJson(ApiResponse::success(()))))
}

pub async fn get_task_history(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<TaskHistory>>>, ApiError> {
    let history = TaskHistory::find_by_task_id(&deployment.db().pool, task.id).await?;
    Ok(ResponseJson(ApiResponse::success(history)))
}

pub async fn get_comments(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<Comment>>>, ApiError> {
    let comments = Comment::find_by_task_id(&deployment.db().pool, task.id).await?;
    Ok(ResponseJson(ApiResponse::success(comments)))
}

pub async fn create_comment(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateComment>,
) -> Result<ResponseJson<ApiResponse<Comment>>, ApiError> {
    let comment = deployment
        .task()
        .add_comment(&deployment.db().pool, task.id, payload)
        .await?;

    Ok(ResponseJson(ApiResponse::success(comment)))
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let task_actions_router = Router::new()
        .route("/", put(update_task))
        .route("/", delete(delete_task));

    let task_id_router = Router::new()
        .route("/", get(get_task))
        .route("/history", get(get_task_history))
        .route("/comments", get(get_comments).post(create_comment))
        .merge(task_actions_router)
        .layer(from_fn_with_state(deployment.clone(), load_task_middleware::<DeploymentImpl>));

    let tasks_router = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .nest("/{task_id}", task_id_router);

    Router::new().nest("/tasks", tasks_router)
}
