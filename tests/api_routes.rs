use std::str::FromStr;
use std::sync::Arc;

use amur_api::model::{Contract, Dataset, Document, Entity, House, News, Protocol};
use amur_api::routes::create_router;
use amur_api::seed::demo_dataset;
use amur_api::store::{
    AdminStore, HouseStore, MemoryStore, NewsStore, Store, StoreError, StoreResult,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

fn app<S: Store + 'static>(store: Arc<S>) -> Router {
    create_router().with_state(store)
}

async fn request(app: Router, method: Method, path: &str) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn get(app: Router, path: &str) -> TestResponse {
    request(app, Method::GET, path).await
}

async fn store_with(dataset: &Dataset) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_dataset(dataset).await.unwrap())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parse_rendered_date(value: &Value) -> NaiveDate {
    NaiveDate::parse_from_str(value.as_str().unwrap(), "%d.%m.%Y").unwrap()
}

/// A store whose every read fails the same way.
struct FailingStore {
    unavailable: bool,
}

impl FailingStore {
    fn fail(&self, entity: Entity) -> StoreError {
        if self.unavailable {
            StoreError::StorageUnavailable("connection refused".to_string())
        } else {
            StoreError::query_failed(entity, "canceling statement due to statement timeout")
        }
    }
}

#[async_trait::async_trait]
impl HouseStore for FailingStore {
    async fn list_houses(&self) -> StoreResult<Vec<House>> {
        Err(self.fail(Entity::Houses))
    }
    async fn list_contracts(&self) -> StoreResult<Vec<Contract>> {
        Err(self.fail(Entity::Contracts))
    }
    async fn list_protocols(&self) -> StoreResult<Vec<Protocol>> {
        Err(self.fail(Entity::Protocols))
    }
    async fn list_documents(&self) -> StoreResult<Vec<Document>> {
        Err(self.fail(Entity::Documents))
    }
}

#[async_trait::async_trait]
impl NewsStore for FailingStore {
    async fn list_news(&self) -> StoreResult<Vec<News>> {
        Err(self.fail(Entity::News))
    }
    async fn list_reports(&self) -> StoreResult<Vec<amur_api::model::Report>> {
        Err(self.fail(Entity::Reports))
    }
}

#[tokio::test]
async fn test_houses_example_row() {
    let dataset = Dataset {
        houses: vec![House {
            id: 1,
            address: "Main St 5".to_string(),
            date: day(2024, 3, 2),
            area: BigDecimal::from_str("120.5").unwrap(),
            tariff: BigDecimal::from_str("3.333").unwrap(),
        }],
        ..Default::default()
    };

    let response = get(app(store_with(&dataset).await), "/houses").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        response.body,
        r#"[{"id":1,"address":"Main St 5","date":"02.03.2024","area":"120.50","tariff":"3.33"}]"#
    );
}

#[tokio::test]
async fn test_empty_tables_serialize_to_empty_array() {
    let store = Arc::new(MemoryStore::new());

    for entity in Entity::ALL {
        let response = get(app(store.clone()), entity.path()).await;
        assert_eq!(response.status, StatusCode::OK, "{}", entity);
        assert_eq!(response.body, "[]", "{}", entity);
    }
}

#[tokio::test]
async fn test_houses_and_news_are_newest_first() {
    let mut dataset = demo_dataset();
    dataset.houses.reverse();
    dataset.news.reverse();
    dataset.news.push(News {
        id: 3,
        title: "Older item".to_string(),
        date: day(2018, 6, 30),
        image: String::new(),
        report: false,
        text: String::new(),
    });
    let store = store_with(&dataset).await;

    for path in ["/houses", "/news"] {
        let body = get(app(store.clone()), path).await.json();
        let dates: Vec<NaiveDate> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| parse_rendered_date(&row["date"]))
            .collect();
        assert!(!dates.is_empty());
        assert!(
            dates.windows(2).all(|w| w[0] >= w[1]),
            "{} not sorted: {:?}",
            path,
            dates
        );
    }
}

#[tokio::test]
async fn test_house_fields_are_formatted() {
    let store = store_with(&demo_dataset()).await;
    let body = get(app(store), "/houses").await.json();

    for row in body.as_array().unwrap() {
        let date = row["date"].as_str().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[2..3], ".");
        assert_eq!(&date[5..6], ".");
        parse_rendered_date(&row["date"]);

        for field in ["area", "tariff"] {
            let value = row[field].as_str().unwrap();
            let (_, fraction) = value.split_once('.').unwrap();
            assert_eq!(fraction.len(), 2, "{} = {}", field, value);
        }
    }
}

#[tokio::test]
async fn test_object_keys_in_wire_order() {
    let store = store_with(&demo_dataset()).await;

    let body = get(app(store.clone()), "/protocols").await.body;
    let first = body.find(r#""house_id""#).unwrap();
    let link = body.find(r#""link""#).unwrap();
    assert!(first < link, "protocol: house_id precedes link");

    let body = get(app(store.clone()), "/documents").await.body;
    let first = body.find(r#""link""#).unwrap();
    let house = body.find(r#""house_id""#).unwrap();
    assert!(first < house, "document: link precedes house_id");

    let news = get(app(store), "/news").await.json();
    assert!(news[0].get("txt").is_some());
    assert!(news[0].get("text").is_none());
}

#[tokio::test]
async fn test_unavailable_store_yields_500_everywhere() {
    let store = Arc::new(FailingStore { unavailable: true });

    for entity in Entity::ALL {
        let response = get(app(store.clone()), entity.path()).await;
        assert_eq!(
            response.status,
            StatusCode::INTERNAL_SERVER_ERROR,
            "{}",
            entity
        );
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
        let body = response.json();
        assert!(
            body["error"].as_str().unwrap().contains("connection refused"),
            "{}: {}",
            entity,
            body
        );
    }
}

#[tokio::test]
async fn test_failed_query_yields_500_with_entity() {
    let store = Arc::new(FailingStore { unavailable: false });

    let response = get(app(store), "/protocols").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["error"],
        "query on protocols failed: canceling statement due to statement timeout"
    );
}

#[tokio::test]
async fn test_deleted_house_takes_dependents_along() {
    let store = store_with(&demo_dataset()).await;
    assert!(store.delete_house(1).await.unwrap());

    for path in ["/contracts", "/protocols", "/documents"] {
        let body = get(app(store.clone()), path).await.json();
        assert!(
            body.as_array()
                .unwrap()
                .iter()
                .all(|row| row["house_id"] != 1),
            "{} still references house 1: {}",
            path,
            body
        );
    }

    let houses = get(app(store), "/houses").await.json();
    assert!(houses.as_array().unwrap().iter().all(|h| h["id"] != 1));
}

#[tokio::test]
async fn test_query_parameters_do_not_select_tables() {
    let store = store_with(&demo_dataset()).await;

    let plain = get(app(store.clone()), "/houses").await.body;
    let with_param = get(app(store.clone()), "/houses?houses=news").await.body;
    assert_eq!(plain, with_param);

    let legacy = get(app(store), "/main/items/?houses=news").await;
    assert_eq!(legacy.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_writes_are_not_routed() {
    let store = Arc::new(MemoryStore::new());

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let response = request(app(store.clone()), method.clone(), "/houses").await;
        assert!(!response.status.is_success(), "{}", method);
    }

    let body = get(app(store), "/houses").await.body;
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_auxiliary_routes() {
    let store = Arc::new(MemoryStore::new());

    let index = get(app(store.clone()), "/").await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.body, "Hello World!");

    let main = get(app(store.clone()), "/main").await;
    assert_eq!(main.body, "Welcome to the Main page");

    let health = get(app(store.clone()), "/health").await.json();
    assert_eq!(health["status"], "healthy");

    let openapi = get(app(store.clone()), "/docs/openapi.json").await.json();
    assert_eq!(openapi["openapi"], "3.0.3");

    let missing = get(app(store), "/nope").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["error"], "Not found");
}
