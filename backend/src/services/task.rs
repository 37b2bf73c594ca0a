//! Task service
//!
//! Business logic for task CRUD and completion toggling. Every function
//! takes the owner id the caller has already been authorized for; the
//! ownership guard runs in the handlers, before any of this code, so
//! `NotFound` here is only reachable for the resource's real owner.

use crate::error::ApiError;
use crate::repositories::{CreateTask, TaskFilters, TaskRepository, UpdateTask};
use sqlx::PgPool;
use taskboard_shared::models::Task;
use taskboard_shared::types::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest};
use taskboard_shared::validation::validate_title;

/// Task service for task operations
pub struct TaskService;

impl TaskService {
    /// List the owner's tasks with optional filters
    pub async fn list(
        pool: &PgPool,
        owner_id: i64,
        query: TaskListQuery,
    ) -> Result<Vec<Task>, ApiError> {
        let filters = TaskFilters {
            completed: query.completed,
            priority: query.priority,
            search: query.search,
        };

        let records = TaskRepository::list(pool, owner_id, filters)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Task::from).collect())
    }

    /// Create a task owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: i64,
        req: CreateTaskRequest,
    ) -> Result<Task, ApiError> {
        validate_title(&req.title).map_err(ApiError::Validation)?;

        let record = TaskRepository::create(
            pool,
            CreateTask {
                owner_id,
                title: req.title,
                description: req.description,
                completed: req.completed,
                priority: req.priority,
                due_date: req.due_date,
                tags: req.tags,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    /// Fetch a single task
    pub async fn get(pool: &PgPool, owner_id: i64, task_id: i64) -> Result<Task, ApiError> {
        let record = TaskRepository::find_for_owner(pool, owner_id, task_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

        Ok(record.into())
    }

    /// Apply a partial update to a task
    pub async fn update(
        pool: &PgPool,
        owner_id: i64,
        task_id: i64,
        req: UpdateTaskRequest,
    ) -> Result<Task, ApiError> {
        if let Some(title) = &req.title {
            validate_title(title).map_err(ApiError::Validation)?;
        }

        let record = TaskRepository::update(
            pool,
            owner_id,
            task_id,
            UpdateTask {
                title: req.title,
                description: req.description,
                completed: req.completed,
                priority: req.priority,
                due_date: req.due_date,
                tags: req.tags,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

        Ok(record.into())
    }

    /// Delete a task
    pub async fn delete(pool: &PgPool, owner_id: i64, task_id: i64) -> Result<(), ApiError> {
        let deleted = TaskRepository::delete(pool, owner_id, task_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Task not found".to_string()));
        }

        Ok(())
    }

    /// Negate a task's completion flag
    pub async fn toggle(pool: &PgPool, owner_id: i64, task_id: i64) -> Result<Task, ApiError> {
        let record = TaskRepository::toggle_completed(pool, owner_id, task_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

        Ok(record.into())
    }
}
