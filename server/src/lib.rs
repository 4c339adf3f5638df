//! In-memory todo and category REST service.
//!
//! # Overview
//! `app()` builds the axum router over a fresh `MemoryStore`; `run()` serves
//! it on an existing listener and `serve()` binds from `Config`. Every error
//! leaves the service as `{"error":{"status","message"}}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod query;
pub mod store;

use std::{any::Any, sync::Arc};

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::error::HttpError;
use crate::store::{MemoryStore, Store};

pub use model::{Category, Todo};

pub type Db = Arc<RwLock<Box<dyn Store>>>;

pub fn memory_db() -> Db {
    let store: Box<dyn Store> = Box::new(MemoryStore::new());
    Arc::new(RwLock::new(store))
}

/// Router over a fresh in-memory store with routes at the root.
pub fn app() -> Router {
    router(memory_db(), "")
}

/// Router over `db` with the todo and category routes mounted at `prefix`.
/// `/health` always stays at the root.
pub fn router(db: Db, prefix: &str) -> Router {
    let api = Router::new()
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(db);

    let prefix = config::normalize_prefix(prefix);
    let routes = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };

    routes
        .route("/health", get(handlers::health))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    HttpError::Internal(detail).into_response()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[tracing::instrument(skip(config))]
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    let prefix = config.route_prefix();
    tracing::info!("Server running on http://{} (routes at '{}/')", address, prefix);
    axum::serve(listener, router(memory_db(), &prefix)).await?;
    Ok(())
}
