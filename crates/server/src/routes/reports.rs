use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::report::UserReport;
use deployment::Deployment;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError};

pub async fn get_user_report(
    State(deployment): State<DeploymentImpl>,
    Path(user_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<UserReport>>, ApiError> {
    let report = deployment
        .report()
        .generate_user_report(&deployment.db().pool, user_id)
        .await?;

    Ok(ResponseJson(ApiResponse::success(report)))
}

pub fn router() -> Router<DeploymentImpl> {
    Router::new().route("/reports/users/{user_id}", get(get_user_report))
}
