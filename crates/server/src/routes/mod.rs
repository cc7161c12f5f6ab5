use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    BoxError, Router,
};
use shared::{
    api::{error::ServerError, response_errors::WorkoutError, Object},
    other_error,
};
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

pub mod health;
pub mod workouts;

use health::health;
use workouts::{create_workout, delete_workout, fetch_workout, update_workout};

pub fn app(state: AppState) -> Router {
    let args = state.args.clone();

    Router::new()
        .route(Object::Health.path(), get(health))
        .route(Object::Workout.path(), post(create_workout))
        .route(
            Object::WorkoutId.path(),
            get(fetch_workout).put(update_workout).delete(delete_workout),
        )
        .layer(DefaultBodyLimit::max(args.request_body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(HandleErrorLayer::new(handle_layer_error))
                .timeout(Duration::from_secs(args.request_timeout_secs)),
        )
        .with_state(state)
}

/// Renders errors raised by the middleware stack in the usual error envelope
async fn handle_layer_error(err: BoxError) -> ServerError<WorkoutError> {
    if err.is::<Elapsed>() {
        WorkoutError::Timeout.into()
    } else {
        other_error!("middleware: {err}")
    }
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        error_handling::HandleErrorLayer,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use clap::Parser;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::{ServiceBuilder, ServiceExt};

    use super::{app, handle_layer_error};
    use crate::{cli::Cli, db, AppState};

    fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workouts.sqlite");
        let args = Cli::parse_from([
            "server",
            "--sqlite-connection-string",
            path.to_str().unwrap(),
        ]);

        db::run_migrations(&args.sqlite_connection_string).unwrap();
        let pool = db::create_pool(&args.sqlite_connection_string).unwrap();

        (app(AppState { pool, args: Arc::new(args) }), dir)
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Option<Value>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).unwrap());

        (status, body)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        send_raw(app, method, uri, body.map(|b| b.to_string())).await
    }

    fn push_ups() -> Value {
        json!({
            "title": "push ups",
            "description": "upper body day",
            "duration_minutes": 60,
            "calories_burned": 200,
            "entries": [
                {
                    "exercise_name": "Bench press",
                    "sets": 3,
                    "reps": 10,
                    "weight": 135.5,
                    "notes": "Awesome today",
                    "order_index": 1
                }
            ]
        })
    }

    async fn create(app: &Router, body: Value) -> Value {
        let (status, body) = send(app, "POST", "/workouts", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        body.unwrap()["workout"].clone()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Status is available and ok\n");
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let (app, _dir) = test_app();
        let created = create(&app, push_ups()).await;

        let id = created["id"].as_i64().unwrap();
        assert!(id > 0);
        assert!(created["entries"][0]["id"].as_i64().unwrap() > 0);
        assert_eq!(created["entries"][0]["order_index"], 1);

        let (status, body) = send(&app, "GET", &format!("/workouts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let fetched = &body.unwrap()["workout"];
        assert_eq!(fetched["title"], "push ups");
        assert_eq!(fetched["entries"].as_array().unwrap().len(), 1);
        assert_eq!(fetched["entries"][0]["weight"], 135.5);
        assert_eq!(fetched["entries"][0]["duration_seconds"], Value::Null);
        assert_eq!(fetched, &created);
    }

    #[tokio::test]
    async fn test_fetch_missing() {
        let (app, _dir) = test_app();
        let (status, body) = send(&app, "GET", "/workouts/12345", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Some(json!({ "error": "workout not found" })));
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let (app, _dir) = test_app();

        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, "/workouts/abc", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, Some(json!({ "error": "invalid workout id" })));
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (app, _dir) = test_app();
        let (status, body) =
            send_raw(&app, "POST", "/workouts", Some(r#"{"title": "#.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({ "error": "invalid request sent" })));
    }

    #[tokio::test]
    async fn test_invalid_entry_is_rejected() {
        let (app, _dir) = test_app();
        let mut workout = push_ups();
        workout["entries"][0]["duration_seconds"] = json!(60);

        let (status, body) = send(&app, "POST", "/workouts", Some(workout)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            Some(json!({
                "error": "entries[0]: exactly one of reps or duration_seconds must be set"
            }))
        );
    }

    #[tokio::test]
    async fn test_partial_update_keeps_entries() {
        let (app, _dir) = test_app();
        let created = create(&app, push_ups()).await;
        let uri = format!("/workouts/{}", created["id"]);

        let (status, body) =
            send(&app, "PUT", &uri, Some(json!({ "title": "new title" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["workout"]["title"], "new title");

        let (_, body) = send(&app, "GET", &uri, None).await;
        let fetched = &body.unwrap()["workout"];
        assert_eq!(fetched["title"], "new title");
        assert_eq!(fetched["description"], created["description"]);
        assert_eq!(fetched["duration_minutes"], created["duration_minutes"]);

        let entries = fetched["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        for field in ["id", "exercise_name", "sets", "reps", "weight", "notes", "order_index"] {
            assert_eq!(entries[0][field], created["entries"][0][field]);
        }
    }

    #[tokio::test]
    async fn test_update_replaces_entries() {
        let (app, _dir) = test_app();
        let created = create(&app, push_ups()).await;
        let uri = format!("/workouts/{}", created["id"]);

        let changes = json!({
            "entries": [
                { "exercise_name": "Plank", "sets": 3, "duration_seconds": 60, "order_index": 2 },
                { "exercise_name": "Squat", "sets": 5, "reps": 5, "weight": 100.0, "order_index": 1 }
            ]
        });
        let (status, _) = send(&app, "PUT", &uri, Some(changes)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", &uri, None).await;
        let fetched = &body.unwrap()["workout"];
        assert_eq!(fetched["title"], "push ups");

        let names: Vec<&str> = fetched["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["exercise_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Squat", "Plank"]);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (app, _dir) = test_app();
        let (status, body) =
            send(&app, "PUT", "/workouts/777", Some(json!({ "title": "nope" }))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Some(json!({ "error": "workout not found" })));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (app, _dir) = test_app();
        let created = create(&app, push_ups()).await;
        let uri = format!("/workouts/{}", created["id"]);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, None);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let (app, _dir) = test_app();
        let first = create(&app, push_ups()).await;
        let uri = format!("/workouts/{}", first["id"]);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let second = create(&app, push_ups()).await;
        assert_ne!(second["id"], first["id"]);
        assert_ne!(second["entries"][0]["id"], first["entries"][0]["id"]);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Some(json!({ "error": "workout not found" })));
    }

    #[tokio::test]
    async fn test_timeout_uses_error_envelope() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_layer_error))
                    .timeout(Duration::from_millis(10)),
            );

        let (status, body) = send(&app, "GET", "/slow", None).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, Some(json!({ "error": "request timed out" })));
    }
}
