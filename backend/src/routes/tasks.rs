//! Task API routes
//!
//! Every path embeds the target `user_id`; each handler resolves the
//! caller's identity, runs the ownership guard against the path id, and
//! only then touches the task store. Guard-before-lookup ordering means a
//! forbidden request on a nonexistent task is 403, never 404.

use crate::auth::{ensure_owner, CurrentUser};
use crate::error::ApiResult;
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use taskboard_shared::types::{
    CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest,
};

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id/tasks", get(list_tasks).post(create_task))
        .route(
            "/:user_id/tasks/:task_id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/:user_id/tasks/:task_id/toggle", patch(toggle_task))
}

fn to_response(task: taskboard_shared::models::Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        owner_id: task.owner_id,
        title: task.title,
        description: task.description,
        completed: task.completed,
        priority: task.priority,
        due_date: task.due_date,
        tags: task.tags,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

/// GET /api/{user_id}/tasks - List tasks with optional filters
///
/// Supports `completed`, `priority`, and free-text `search` over title
/// and description.
async fn list_tasks(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    ensure_owner(&current_user, user_id)?;

    let tasks = TaskService::list(state.db(), user_id, query).await?;
    Ok(Json(tasks.into_iter().map(to_response).collect()))
}

/// POST /api/{user_id}/tasks - Create a task
async fn create_task(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    ensure_owner(&current_user, user_id)?;

    let task = TaskService::create(state.db(), user_id, req).await?;
    Ok((StatusCode::CREATED, Json(to_response(task))))
}

/// GET /api/{user_id}/tasks/{task_id} - Fetch a single task
async fn get_task(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((user_id, task_id)): Path<(i64, i64)>,
) -> ApiResult<Json<TaskResponse>> {
    ensure_owner(&current_user, user_id)?;

    let task = TaskService::get(state.db(), user_id, task_id).await?;
    Ok(Json(to_response(task)))
}

/// PUT /api/{user_id}/tasks/{task_id} - Update a task
///
/// Absent fields keep their stored values.
async fn update_task(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((user_id, task_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    ensure_owner(&current_user, user_id)?;

    let task = TaskService::update(state.db(), user_id, task_id, req).await?;
    Ok(Json(to_response(task)))
}

/// DELETE /api/{user_id}/tasks/{task_id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((user_id, task_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    ensure_owner(&current_user, user_id)?;

    TaskService::delete(state.db(), user_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/{user_id}/tasks/{task_id}/toggle - Toggle completion
async fn toggle_task(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((user_id, task_id)): Path<(i64, i64)>,
) -> ApiResult<Json<TaskResponse>> {
    ensure_owner(&current_user, user_id)?;

    let task = TaskService::toggle(state.db(), user_id, task_id).await?;
    Ok(Json(to_response(task)))
}
