//! HTTP API over the workspace.
//!
//! Every route locks the shared [`Workspace`] for the duration of the
//! request, so requests within one server process never interleave their
//! read-modify-write cycles.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use univassist_core::{
    ChatRequest, CoreError, GoalPatch, NewGoal, NewMood, NewTask, StudyPlanRequest, TaskStatus,
    Workspace,
};

pub type SharedWorkspace = Arc<Mutex<Workspace>>;

/// Build the router with every API route.
pub fn router(workspace: SharedWorkspace) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat_v2", post(chat_v2_handler))
        .route("/api/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/api/tasks/{id}/status", patch(task_status_handler))
        .route("/api/planner", get(planner_handler))
        .route("/api/studyplan", post(studyplan_handler))
        .route("/api/timer/start", post(timer_start_handler))
        .route("/api/timer/stop", post(timer_stop_handler))
        .route("/api/mood", get(list_moods_handler).post(log_mood_handler))
        .route("/api/mood/last7", get(mood_last7_handler))
        .route("/api/productivity", get(productivity_handler))
        .route("/api/productivity/full", get(productivity_full_handler))
        .route("/api/goals", get(list_goals_handler).post(create_goal_handler))
        .route("/api/goals/{id}", patch(update_goal_handler))
        .route("/api/notifications", get(notifications_handler))
        .route("/api/quotes/daily", get(daily_quote_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(workspace)
}

/// Serve the API on `addr` until the process is interrupted.
pub async fn serve(workspace: Workspace, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(Arc::new(Mutex::new(workspace)));

    info!(addr = %addr, "univassist API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

/// Lock the workspace, recovering it from a poisoned mutex.
fn lock(workspace: &SharedWorkspace) -> MutexGuard<'_, Workspace> {
    workspace.lock().unwrap_or_else(|e| e.into_inner())
}

/// Core errors rendered as `{"error": message}`.
struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: TaskStatus,
}

#[derive(Debug, Deserialize)]
struct TimerBody {
    task_id: i64,
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn chat_handler(State(ws): State<SharedWorkspace>, Json(req): Json<ChatRequest>) -> Json<Value> {
    let reply = lock(&ws).chat(&req.message);
    Json(json!({ "reply": reply.reply }))
}

async fn chat_v2_handler(
    State(ws): State<SharedWorkspace>,
    Json(req): Json<ChatRequest>,
) -> Json<Value> {
    let reply = lock(&ws).chat_in_mode(&req.message, req.mode.as_deref());
    Json(json!(reply))
}

async fn list_tasks_handler(
    State(ws): State<SharedWorkspace>,
    Query(filter): Query<StatusFilter>,
) -> Json<Value> {
    Json(json!({ "tasks": lock(&ws).list_tasks(filter.status) }))
}

async fn create_task_handler(State(ws): State<SharedWorkspace>, Json(new): Json<NewTask>) -> ApiResult {
    let task = lock(&ws).create_task(new)?;
    Ok(Json(json!({ "task": task })))
}

async fn task_status_handler(
    State(ws): State<SharedWorkspace>,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> ApiResult {
    let task = lock(&ws).set_task_status(id, body.status)?;
    Ok(Json(json!({ "task": task })))
}

async fn planner_handler(State(ws): State<SharedWorkspace>) -> ApiResult {
    let plan = lock(&ws).legacy_plan()?;
    Ok(Json(json!({ "plan": plan })))
}

async fn studyplan_handler(
    State(ws): State<SharedWorkspace>,
    Json(req): Json<StudyPlanRequest>,
) -> ApiResult {
    let plan = lock(&ws).study_plan(req)?;
    Ok(Json(json!({ "plan": plan })))
}

async fn timer_start_handler(State(ws): State<SharedWorkspace>, Json(body): Json<TimerBody>) -> ApiResult {
    let entry = lock(&ws).start_timer(body.task_id)?;
    Ok(Json(json!({ "entry": entry })))
}

async fn timer_stop_handler(State(ws): State<SharedWorkspace>, Json(body): Json<TimerBody>) -> ApiResult {
    let outcome = lock(&ws).stop_timer(body.task_id)?;
    Ok(Json(json!(outcome)))
}

async fn log_mood_handler(State(ws): State<SharedWorkspace>, Json(new): Json<NewMood>) -> ApiResult {
    let entry = lock(&ws).log_mood(new)?;
    Ok(Json(json!({ "entry": entry })))
}

async fn list_moods_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!({ "mood": lock(&ws).list_moods() }))
}

async fn mood_last7_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!({ "last7": lock(&ws).mood_last7() }))
}

async fn productivity_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!(lock(&ws).weekly_productivity()))
}

async fn productivity_full_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!(lock(&ws).full_productivity()))
}

async fn list_goals_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!({ "goals": lock(&ws).list_goals() }))
}

async fn create_goal_handler(State(ws): State<SharedWorkspace>, Json(new): Json<NewGoal>) -> ApiResult {
    let goal = lock(&ws).create_goal(new)?;
    Ok(Json(json!({ "goal": goal })))
}

async fn update_goal_handler(
    State(ws): State<SharedWorkspace>,
    Path(id): Path<i64>,
    Json(patch): Json<GoalPatch>,
) -> ApiResult {
    let goal = lock(&ws).update_goal(id, patch)?;
    Ok(Json(json!({ "goal": goal })))
}

async fn notifications_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!({ "notifications": lock(&ws).list_notifications() }))
}

async fn daily_quote_handler(State(ws): State<SharedWorkspace>) -> Json<Value> {
    Json(json!({ "quote": lock(&ws).quote_of_day() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::open_at(dir.path()).unwrap();
        (dir, router(Arc::new(Mutex::new(workspace))))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn task_create_list_and_patch() {
        let (_dir, app) = test_app();

        let (status, body) = send(&app, "POST", "/api/tasks", Some(json!({ "title": "Essay" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["id"], 1);
        assert_eq!(body["task"]["status"], "todo");
        assert_eq!(body["task"]["estimated_minutes"], 60);

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/tasks/1/status",
            Some(json!({ "status": "done" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["status"], "done");

        let (_, body) = send(&app, "GET", "/api/tasks?status=todo", None).await;
        assert_eq!(body["tasks"], json!([]));
        let (_, body) = send(&app, "GET", "/api/tasks?status=done", None).await;
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_task_is_404() {
        let (_dir, app) = test_app();
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/tasks/99/status",
            Some(json!({ "status": "done" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "task 99 not found");
    }

    #[tokio::test]
    async fn studyplan_with_subjects() {
        let (_dir, app) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/studyplan",
            Some(json!({ "days": 2, "hours_per_day": 3, "subjects": ["Math", "Physics"], "start_hour": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let plan = body["plan"].as_array().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0]["blocks"][0]["title"], "Math");
        assert_eq!(plan[0]["blocks"][0]["minutes"], 180);
        assert!(plan[0]["blocks"][0]["start"].as_str().unwrap().ends_with("09:00"));
        assert_eq!(plan[1]["blocks"][0]["title"], "Physics");
    }

    #[tokio::test]
    async fn studyplan_rejects_bad_start_hour() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, "POST", "/api/studyplan", Some(json!({ "start_hour": 24 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("start_hour"));
    }

    #[tokio::test]
    async fn oversized_budgets_are_bad_requests() {
        let (_dir, app) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/studyplan",
            Some(json!({ "hours_per_day": u32::MAX, "subjects": ["Math"] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("hours_per_day"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(json!({ "title": "Forever", "estimated_minutes": i64::MAX })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/planner", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], json!([]));
    }

    #[tokio::test]
    async fn timer_stop_without_start_is_soft_error() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, "POST", "/api/timer/stop", Some(json!({ "task_id": 5 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "No running timer found" }));

        let (_, body) = send(&app, "POST", "/api/timer/start", Some(json!({ "task_id": 5 }))).await;
        assert_eq!(body["entry"]["running"], true);
        let (_, body) = send(&app, "POST", "/api/timer/stop", Some(json!({ "task_id": 5 }))).await;
        assert_eq!(body["task_id"], 5);
        assert_eq!(body["minutes"], 0);
    }

    #[tokio::test]
    async fn chat_modes() {
        let (_dir, app) = test_app();
        let (_, body) = send(&app, "POST", "/api/chat", Some(json!({ "message": "hi" }))).await;
        assert!(body["reply"].as_str().unwrap().starts_with("Hello!"));
        assert!(body.get("mode").is_none());

        let (_, body) = send(
            &app,
            "POST",
            "/api/chat_v2",
            Some(json!({ "message": "hi", "mode": "mentor" })),
        )
        .await;
        assert_eq!(body["mode"], "mentor");
        assert!(body["reply"].as_str().unwrap().starts_with("As your mentor"));
    }

    #[tokio::test]
    async fn seeded_feeds_and_reports() {
        let (_dir, app) = test_app();

        let (_, body) = send(&app, "GET", "/api/goals", None).await;
        assert_eq!(body["goals"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/goals/2",
            Some(json!({ "progress_minutes": 30 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["goal"]["progress_minutes"], 30);

        let (_, body) = send(&app, "GET", "/api/notifications", None).await;
        assert_eq!(body["notifications"].as_array().unwrap().len(), 3);

        let (_, body) = send(&app, "GET", "/api/quotes/daily", None).await;
        assert!(body["quote"].is_string());

        let (_, body) = send(&app, "GET", "/api/productivity", None).await;
        assert_eq!(body["days"][0], "Mon");
        assert_eq!(body["percent"], 0);

        let (_, body) = send(&app, "GET", "/api/productivity/full", None).await;
        assert_eq!(body["raw"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn mood_routes() {
        let (_dir, app) = test_app();
        let (_, body) = send(&app, "POST", "/api/mood", Some(json!({ "mood": "calm" }))).await;
        assert_eq!(body["entry"]["intensity"], 5);
        assert_eq!(body["entry"]["note"], "");

        let (_, body) = send(&app, "GET", "/api/mood", None).await;
        assert_eq!(body["mood"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, "GET", "/api/mood/last7", None).await;
        assert_eq!(body["last7"][0]["mood"], "calm");
    }
}
