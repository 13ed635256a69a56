use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::TaskStore;
use crate::task::api::create_api_router;
use crate::task::web::create_task_page_router;

/// Assembles every task route on top of a single shared store.
pub fn create_app(store: TaskStore) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(create_api_router(store.clone()))
        .merge(create_task_page_router(store))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new()),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Task service running on http://{}", server_address);

    let app = create_app(TaskStore::seeded());

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
