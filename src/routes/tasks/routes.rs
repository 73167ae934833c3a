use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::dto::ListTasksQuery;
use super::queries;
use crate::filter::{compute_stats, filter_tasks, TaskFilter};
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;
use crate::validation::{validate_task, validate_task_update, TaskPayload, TaskUpdatePayload};

pub async fn create(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Json(body): Json<TaskPayload>,
) -> impl IntoResponse {
    let input = match validate_task(&body) {
        Ok(input) => input,
        Err(errors) => return errors.into_response(),
    };

    match queries::create_task(&state.db, user_id, &input).await {
        Ok(t) => (StatusCode::CREATED, Json(t)).into_response(),
        Err(e) => {
            tracing::error!("error creating task: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create task").into_response()
        }
    }
}

/// Fetches the caller's tasks and applies the filter criteria from the
/// query string. With no criteria this is a plain list.
pub async fn list(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Query(query): Query<ListTasksQuery>,
) -> impl IntoResponse {
    let filter = match TaskFilter::from_params(
        query.search,
        query.status.as_deref(),
        query.priority.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    match queries::list_tasks(&state.db, user_id).await {
        Ok(tasks) => (StatusCode::OK, Json(filter_tasks(tasks, &filter))).into_response(),
        Err(e) => {
            tracing::error!("error listing tasks: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list tasks").into_response()
        }
    }
}

pub async fn stats(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
) -> impl IntoResponse {
    match queries::list_tasks(&state.db, user_id).await {
        Ok(tasks) => (StatusCode::OK, Json(compute_stats(&tasks))).into_response(),
        Err(e) => {
            tracing::error!("error computing task stats: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute stats").into_response()
        }
    }
}

pub async fn get(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match queries::get_task(&state.db, user_id, id).await {
        Ok(Some(t)) => (StatusCode::OK, Json(t)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Task not found").into_response(),
        Err(e) => {
            tracing::error!("error fetching task: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch task").into_response()
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TaskUpdatePayload>,
) -> impl IntoResponse {
    let patch = match validate_task_update(&body) {
        Ok(patch) => patch,
        Err(errors) => return errors.into_response(),
    };

    match queries::update_task(&state.db, user_id, id, &patch).await {
        Ok(Some(t)) => (StatusCode::OK, Json(t)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Task not found").into_response(),
        Err(e) => {
            tracing::error!("error updating task: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update task").into_response()
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match queries::delete_task(&state.db, user_id, id).await {
        Ok(true) => (StatusCode::OK, Json(serde_json::json!({"deleted": true}))).into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Task not found").into_response(),
        Err(e) => {
            tracing::error!("error deleting task: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete task").into_response()
        }
    }
}
