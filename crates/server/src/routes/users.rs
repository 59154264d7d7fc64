use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::user::{CreateUser, User};
use deployment::Deployment;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError, middleware::load_user_middleware};

pub async fn get_users(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<User>>>, ApiError> {
    let users = User::find_all(&deployment.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(users)))
}

pub async fn get_user(
    Extension(user): Extension<User>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(user)))
}

pub async fn create_user(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    tracing::debug!("Creating user '{}'", payload.name);

    let id = Uuid::new_v4();
    let user = User::create(&deployment.db().pool, &payload, id).await?;

    Ok(ResponseJson(ApiResponse::success(user)))
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let user_id_router = Router::new()
        .route("/", get(get_user))
        .layer(from_fn_with_state(deployment.clone(), load_user_middleware::<DeploymentImpl>));

    let users_router = Router::new()
        .route("/", get(get_users).post(create_user))
        .nest("/{user_id}", user_id_router);

    Router::new().nest("/users", users_router)
}
