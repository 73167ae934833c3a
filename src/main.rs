mod config;
mod filter;
mod routes;
mod state;
mod validation;

use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_buddy_api=info,tower_http=info".into()),
        )
        .init();

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("Error connecting DB");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Error running migrations");

    let addr = config.addr();
    let state = state::AppState { db, config };

    let app = routes::routes(state.clone())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Error binding listener");

    tracing::info!("server is chilling at http://{addr}");

    axum::serve(listener, app).await.expect("server error");
}
