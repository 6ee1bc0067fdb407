use std::{path::Path, sync::Arc};

use axum::{Router, http::Uri, routing::get};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{ServerError, balances, expenses, groups, members};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn api_not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(format!("no route for {uri}"))
}

fn api_router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", get(groups::list).post(groups::group_new))
        .route(
            "/groups/{group_id}/members",
            get(members::list).post(members::member_new),
        )
        .route(
            "/groups/{group_id}/expenses",
            get(expenses::list).post(expenses::expense_new),
        )
        .route("/groups/{group_id}/balances", get(balances::list))
        .fallback(api_not_found)
        .with_state(state)
}

/// Builds the full application: the JSON API under `/api` and the
/// single-page frontend from `static_dir` for everything else.
///
/// Paths that match no static file fall back to `index.html` so the client
/// side router can take over.
pub fn router(state: ServerState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_router(state))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    static_dir: impl AsRef<Path>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state, static_dir)).await
}
