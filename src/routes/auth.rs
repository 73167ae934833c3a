use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::rngs::OsRng;

use crate::state::AppState;
use crate::validation::{validate_login, validate_registration, LoginPayload, RegisterPayload};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    let input = match validate_registration(&payload) {
        Ok(input) => input,
        Err(errors) => return errors.into_response(),
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon = Argon2::default();

    let password_hash = match argon.hash_password(input.password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => {
            tracing::error!("password hash error: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "could not create user").into_response();
        }
    };
    let user_id = Uuid::new_v4();

    // User and profile rows go in together or not at all.
    let res = async {
        let mut tx = state.db.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&input.email)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(&input.full_name)
        .execute(&mut *tx)
        .await?;
        tx.commit().await
    }
    .await;

    match res {
        Ok(_) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                id: user_id,
                email: input.email,
            }),
        )
            .into_response(),
        Err(e) => {
            if let Some(db_error) = e.as_database_error() {
                if db_error.code() == Some(std::borrow::Cow::Borrowed("23505")) {
                    return (StatusCode::CONFLICT, "Email already registered").into_response();
                }
            }
            tracing::error!("DB insert error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "could not create user").into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    let input = match validate_login(&payload) {
        Ok(input) => input,
        Err(errors) => return errors.into_response(),
    };

    #[derive(sqlx::FromRow)]
    struct UserRow {
        id: Uuid,
        password_hash: String,
    }

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, password_hash FROM users WHERE email = $1
        "#,
    )
    .bind(&input.email)
    .fetch_optional(&state.db)
    .await;

    let row = match row {
        Ok(Some(r)) => r,
        Ok(None) => return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
        Err(e) => {
            tracing::error!("DB error: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "db error").into_response();
        }
    };

    let parsed_hash = match PasswordHash::new(&row.password_hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("stored hash unreadable: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "auth error").into_response();
        }
    };
    let argon = Argon2::default();
    let verify = argon
        .verify_password(input.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !verify {
        return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
    }

    // create JWT
    let now = Utc::now();
    let exp = now + Duration::hours(24);
    let claims = Claims {
        sub: row.id.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    );

    match token {
        Ok(t) => (StatusCode::OK, Json(LoginResponse { token: t })).into_response(),
        Err(e) => {
            tracing::error!("jwt encode error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "token error").into_response()
        }
    }
}
