use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::model::Entity;
use crate::store::{HouseStore, NewsStore, Store, StoreError, StoreResult};
use crate::view::{
    render_all, ContractView, DocumentView, HouseView, NewsView, ProtocolView, ReportView,
};

pub type AppState<S> = Arc<S>;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn index() -> &'static str {
    "Hello World!"
}

pub async fn main_page() -> &'static str {
    "Welcome to the Main page"
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not found")),
    )
}

fn store_error(entity: Entity, err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    log::error!("GET {} failed: {}", entity.path(), err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&err.to_string())),
    )
}

// Either the whole row set is rendered or the request fails; there is no
// partial array.
fn respond<T, V>(entity: Entity, result: StoreResult<Vec<T>>) -> ApiResult<Vec<V>>
where
    V: for<'a> From<&'a T>,
{
    match result {
        Ok(rows) => Ok(Json(render_all(&rows))),
        Err(e) => Err(store_error(entity, e)),
    }
}

pub async fn list_houses<S: Store>(State(store): State<AppState<S>>) -> ApiResult<Vec<HouseView>> {
    respond(Entity::Houses, store.list_houses().await)
}

pub async fn list_news<S: Store>(State(store): State<AppState<S>>) -> ApiResult<Vec<NewsView>> {
    respond(Entity::News, store.list_news().await)
}

pub async fn list_contracts<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<Vec<ContractView>> {
    respond(Entity::Contracts, store.list_contracts().await)
}

pub async fn list_protocols<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<Vec<ProtocolView>> {
    respond(Entity::Protocols, store.list_protocols().await)
}

pub async fn list_documents<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<Vec<DocumentView>> {
    respond(Entity::Documents, store.list_documents().await)
}

pub async fn list_reports<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<Vec<ReportView>> {
    respond(Entity::Reports, store.list_reports().await)
}

fn date_field() -> Value {
    json!({ "type": "string", "pattern": "^\\d{2}\\.\\d{2}\\.\\d{4}$", "example": "02.03.2024" })
}

fn money_field() -> Value {
    json!({ "type": "string", "pattern": "^-?\\d+\\.\\d{2}$", "example": "120.50" })
}

/// Properties of each served object, in wire order.
fn entity_properties(entity: Entity) -> Vec<(&'static str, Value)> {
    let int = || json!({ "type": "integer" });
    let string = || json!({ "type": "string" });
    match entity {
        Entity::Houses => vec![
            ("id", int()),
            ("address", string()),
            ("date", date_field()),
            ("area", money_field()),
            ("tariff", money_field()),
        ],
        Entity::News => vec![
            ("id", int()),
            ("title", string()),
            ("date", date_field()),
            ("image", string()),
            ("report", json!({ "type": "boolean" })),
            ("txt", string()),
        ],
        Entity::Reports => vec![
            ("id", int()),
            ("txt", string()),
            ("image", string()),
            ("report_id", int()),
        ],
        Entity::Contracts => vec![("id", int()), ("txt", string()), ("house_id", int())],
        Entity::Protocols => vec![
            ("id", int()),
            ("name", string()),
            ("number", int()),
            ("date", date_field()),
            ("house_id", int()),
            ("link", string()),
        ],
        Entity::Documents => vec![
            ("id", int()),
            ("name", string()),
            ("number", int()),
            ("date", date_field()),
            ("link", string()),
            ("house_id", int()),
        ],
    }
}

/// OpenAPI 3 description of the entity listings.
pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for entity in Entity::ALL {
        let properties = entity_properties(entity);
        let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
        let properties: Map<String, Value> = properties
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();
        schemas.insert(
            entity.table().to_string(),
            json!({ "type": "object", "required": required, "properties": properties }),
        );

        let ordering = if entity.newest_first() {
            "All rows, newest first"
        } else {
            "All rows, by ascending id"
        };
        paths.insert(
            entity.path().to_string(),
            json!({
                "get": {
                    "summary": entity.summary(),
                    "operationId": format!("list_{}", entity.table()),
                    "responses": {
                        "200": {
                            "description": ordering,
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": format!("#/components/schemas/{}", entity.table()) }
                            } } }
                        },
                        "500": {
                            "description": "Storage failure",
                            "content": { "application/json": { "schema": {
                                "$ref": "#/components/schemas/error"
                            } } }
                        }
                    }
                }
            }),
        );
    }

    schemas.insert(
        "error".to_string(),
        json!({
            "type": "object",
            "required": ["error"],
            "properties": { "error": { "type": "string" } }
        }),
    );

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Amur housing API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Read-only listings of houses, news, contracts, protocols, documents and reports"
        },
        "paths": paths,
        "components": { "schemas": schemas }
    })
}

pub async fn get_openapi_spec() -> Json<Value> {
    Json(openapi_document())
}
