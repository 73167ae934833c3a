use axum::{
    middleware,
    routing::{get, post},
    Router,
};

mod auth;
mod health;
pub mod middleware_auth;
mod profile;
pub mod tasks;

pub use auth::{login, register};
pub use health::health;

use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let task_router = Router::new()
        .route("/", post(tasks::routes::create).get(tasks::routes::list))
        .route("/stats", get(tasks::routes::stats))
        .route(
            "/{id}",
            get(tasks::routes::get)
                .put(tasks::routes::update)
                .delete(tasks::routes::delete),
        );

    let profile_router =
        Router::new().route("/", get(profile::routes::get).put(profile::routes::update));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .nest(
            "/api",
            Router::new()
                .nest("/tasks", task_router)
                .nest("/profile", profile_router)
                .layer(middleware::from_fn_with_state(
                    state,
                    middleware_auth::require_auth,
                )),
        )
}

async fn root() -> &'static str {
    "Welcome to the task-buddy API"
}
