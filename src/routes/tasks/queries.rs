use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::model::Task;
use crate::validation::{TaskInput, TaskUpdateInput};

pub async fn create_task(pool: &PgPool, user_id: Uuid, input: &TaskInput) -> Result<Task> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, user_id, title, description, status, priority, due_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, title, description, status, priority, due_date, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.priority)
    .bind(input.due_date)
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

pub async fn list_tasks(pool: &PgPool, user_id: Uuid) -> Result<Vec<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, title, description, status, priority, due_date, created_at, updated_at
        FROM tasks
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rec)
}

pub async fn get_task(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, title, description, status, priority, due_date, created_at, updated_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Partial update: absent fields keep their stored value. Returns None when
/// the task does not exist or belongs to another user.
pub async fn update_task(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &TaskUpdateInput,
) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            status = COALESCE($5, status),
            priority = COALESCE($6, priority),
            due_date = COALESCE($7, due_date),
            updated_at = NOW()
        WHERE id = $2 AND user_id = $1
        RETURNING id, user_id, title, description, status, priority, due_date, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(id)
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(patch.status)
    .bind(patch.priority)
    .bind(patch.due_date)
    .fetch_optional(pool)
    .await
}

pub async fn delete_task(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
