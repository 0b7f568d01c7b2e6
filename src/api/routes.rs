use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers;
use crate::model::Entity;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/main", get(handlers::main_page))
        // Health check
        .route("/health", get(handlers::health_check))
        // API description
        .route("/docs/openapi.json", get(handlers::get_openapi_spec))
        // Read-only entity listings
        .route(Entity::Houses.path(), get(handlers::list_houses::<S>))
        .route(Entity::News.path(), get(handlers::list_news::<S>))
        .route(Entity::Contracts.path(), get(handlers::list_contracts::<S>))
        .route(Entity::Protocols.path(), get(handlers::list_protocols::<S>))
        .route(Entity::Documents.path(), get(handlers::list_documents::<S>))
        .route(Entity::Reports.path(), get(handlers::list_reports::<S>))
        .fallback(handlers::not_found)
}
