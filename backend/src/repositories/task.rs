//! Task repository for database operations
//!
//! Every query is scoped by `owner_id` in SQL, in addition to the
//! handler-level ownership guard.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskboard_shared::models::{Priority, Task};

/// Task record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            owner_id: record.owner_id,
            title: record.title,
            description: record.description,
            completed: record.completed,
            // The column only ever holds values written through Priority's
            // Display impl; an unknown value falls back to the default.
            priority: record.priority.parse::<Priority>().unwrap_or_default(),
            due_date: record.due_date,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// Partial update for a task; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

/// Filters for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

const TASK_COLUMNS: &str =
    "id, owner_id, title, description, completed, priority, due_date, tags, created_at, updated_at";

/// Task repository for database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task
    pub async fn create(pool: &PgPool, input: CreateTask) -> Result<TaskRecord> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            INSERT INTO tasks (owner_id, title, description, completed, priority, due_date, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(input.owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(input.priority.to_string())
        .bind(input.due_date)
        .bind(&input.tags)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List a user's tasks, newest first, with optional filters
    pub async fn list(
        pool: &PgPool,
        owner_id: i64,
        filters: TaskFilters,
    ) -> Result<Vec<TaskRecord>> {
        let records = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE owner_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
              AND ($3::text IS NULL OR priority = $3)
              AND ($4::text IS NULL
                   OR title ILIKE '%' || $4 || '%'
                   OR description ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            "#,
        ))
        .bind(owner_id)
        .bind(filters.completed)
        .bind(filters.priority.map(|p| p.to_string()))
        .bind(filters.search)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Fetch a single task belonging to `owner_id`
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: i64,
        task_id: i64,
    ) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        ))
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Apply a partial update; returns `None` if the task does not exist
    /// for this owner
    pub async fn update(
        pool: &PgPool,
        owner_id: i64,
        task_id: i64,
        changes: UpdateTask,
    ) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                completed = COALESCE($5, completed),
                priority = COALESCE($6, priority),
                due_date = COALESCE($7, due_date),
                tags = COALESCE($8, tags),
                updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(task_id)
        .bind(owner_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.completed)
        .bind(changes.priority.map(|p| p.to_string()))
        .bind(changes.due_date)
        .bind(changes.tags)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a task; returns whether a row was removed
    pub async fn delete(pool: &PgPool, owner_id: i64, task_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically negate the completion flag
    pub async fn toggle_completed(
        pool: &PgPool,
        owner_id: i64,
        task_id: i64,
    ) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            UPDATE tasks SET
                completed = NOT completed,
                updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_conversion_parses_priority() {
        let record = TaskRecord {
            id: 1,
            owner_id: 2,
            title: "t".to_string(),
            description: None,
            completed: false,
            priority: "high".to_string(),
            due_date: None,
            tags: vec!["a".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let task: Task = record.into();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_record_conversion_defaults_unknown_priority() {
        let record = TaskRecord {
            id: 1,
            owner_id: 2,
            title: "t".to_string(),
            description: None,
            completed: false,
            priority: "mystery".to_string(),
            due_date: None,
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let task: Task = record.into();
        assert_eq!(task.priority, Priority::Medium);
    }
}
