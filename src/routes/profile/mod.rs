pub mod routes;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Result};
use uuid::Uuid;

use crate::validation::ProfileInput;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, full_name, avatar_url, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// An absent full_name leaves the stored one untouched; the avatar is
/// replaced outright so an empty submission clears it.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    input: &ProfileInput,
) -> Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles
        SET
            full_name = COALESCE($2, full_name),
            avatar_url = $3,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, full_name, avatar_url, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&input.full_name)
    .bind(&input.avatar_url)
    .fetch_optional(pool)
    .await
}
