use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::{get_profile, update_profile};
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;
use crate::validation::{validate_profile, ProfilePayload};

pub async fn get(State(state): State<AppState>, JwtUser(user_id): JwtUser) -> impl IntoResponse {
    match get_profile(&state.db, user_id).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            tracing::error!("error fetching profile: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch profile").into_response()
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Json(body): Json<ProfilePayload>,
) -> impl IntoResponse {
    let input = match validate_profile(&body) {
        Ok(input) => input,
        Err(errors) => return errors.into_response(),
    };

    match update_profile(&state.db, user_id, &input).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            tracing::error!("error updating profile: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update profile").into_response()
        }
    }
}
