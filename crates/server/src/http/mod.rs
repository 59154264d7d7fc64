use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{DeploymentImpl, routes};

pub fn router(deployment: DeploymentImpl) -> Router {
    let api_routes = Router::new()
        .merge(routes::users::router(&deployment))
        .merge(routes::projects::router(&deployment))
        .merge(routes::tasks::router(&deployment))
        .merge(routes::reports::router());

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(deployment)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{DeploymentImpl, test_support::TestEnvGuard};
    use deployment::Deployment;

    async fn setup_deployment() -> (TestEnvGuard, DeploymentImpl) {
        let temp_root = std::env::temp_dir().join(format!("taskboard-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&temp_root).unwrap();

        let db_path = temp_root.join("db.sqlite");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.to_string_lossy());
        let env_guard = TestEnvGuard::new(&temp_root, db_url);

        let deployment = DeploymentImpl::new().await.unwrap();

        (env_guard, deployment)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_check_is_reachable() {
        let (_env_guard, deployment) = setup_deployment().await;
        let app = super::router(deployment);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json.get("success").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(json.get("data").and_then(|v| v.as_str()), Some("OK"));
        assert!(json.get("message").unwrap().is_null());
    }

    #[tokio::test]
    async fn unknown_task_returns_not_found() {
        let (_env_guard, deployment) = setup_deployment().await;
        let app = super::router(deployment);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/tasks/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn task_lifecycle_over_http() {
        let (_env_guard, deployment) = setup_deployment().await;
        let app = super::router(deployment);

        // Owner.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                serde_json::json!({
                    "name": "Ana Lima",
                    "email": "ana@example.com",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json.get("success").and_then(|v| v.as_bool()), Some(true));
        let user_id = json
            .pointer("/data/id")
            .and_then(|v| v.as_str())
            .unwrap()
            .to_string();
        assert_eq!(
            json.pointer("/data/function").and_then(|v| v.as_str()),
            Some("normal")
        );

        // Project.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/projects",
                serde_json::json!({
                    "user_id": user_id,
                    "name": "Launch checklist",
                    "description": null,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let project_id = json
            .pointer("/data/id")
            .and_then(|v| v.as_str())
            .unwrap()
            .to_string();

        // Task, born pending.
        let due_date = (Utc::now() + Duration::days(3)).to_rfc3339();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/tasks",
                serde_json::json!({
                    "project_id": project_id,
                    "title": "Write release notes",
                    "description": "Cover the API changes",
                    "due_date": due_date,
                    "priority": "high",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(
            json.pointer("/data/status").and_then(|v| v.as_str()),
            Some("pending")
        );
        let task_id = json
            .pointer("/data/id")
            .and_then(|v| v.as_str())
            .unwrap()
            .to_string();

        // Complete it.
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/tasks/{task_id}"),
                serde_json::json!({
                    "status": "completed",
                    "user_id": user_id,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(
            json.pointer("/data/status").and_then(|v| v.as_str()),
            Some("completed")
        );

        // Creation plus the status change.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/tasks/{task_id}/history"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let history = json.get("data").and_then(|v| v.as_array()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[1].get("modification").and_then(|v| v.as_str()),
            Some("Task status changed from pending to completed")
        );
        assert_eq!(
            history[1].get("modified_by").and_then(|v| v.as_str()),
            Some("Ana Lima")
        );

        // Comment, which never touches history.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/tasks/{task_id}/comments"),
                serde_json::json!({
                    "content": "Shipped!",
                    "author": "Ana Lima",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/tasks/{task_id}/history"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(
            json.get("data").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(2)
        );

        // Report for the owner is refused, they are not a manager.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/reports/users/{user_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Delete is acknowledged with 202.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/tasks/{task_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/tasks/{task_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
