//! Boundary tests: the engine behind an axum handler

mod fixtures;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_test::TestServer;
use carve::prelude::*;
use fixtures::{Author, AuthorDto, engine, seeded_source};

#[derive(Clone)]
struct AppState {
    engine: ResourceEngine,
    authors: InMemorySource<Author>,
}

async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Response, CarveError> {
    let page = state
        .engine
        .shaped_page(&state.authors, &query, AuthorDto::from)
        .await?;

    let (name, value) = pagination_header(&page.meta)?;
    let mut response = Json(serde_json::json!({ "value": page.items })).into_response();
    response.headers_mut().insert(name, value);
    Ok(response)
}

fn app() -> Router {
    let state = AppState {
        engine: engine(),
        authors: seeded_source(),
    };
    Router::new()
        .route("/api/authors", get(list_authors))
        .with_state(state)
}

#[tokio::test]
async fn returns_shaped_collection_with_pagination_header() {
    let server = TestServer::new(app()).unwrap();

    let response = server
        .get("/api/authors")
        .add_query_param("fields", "id, name")
        .add_query_param("orderBy", "name")
        .add_query_param("pageSize", "2")
        .await;

    response.assert_status_ok();

    let header = response
        .headers()
        .get(PAGINATION_HEADER)
        .expect("pagination header present")
        .to_str()
        .unwrap()
        .to_string();
    let meta: serde_json::Value = serde_json::from_str(&header).unwrap();
    assert_eq!(meta["totalCount"], 5);
    assert_eq!(meta["pageSize"], 2);
    assert_eq!(meta["currentPage"], 1);
    assert_eq!(meta["totalPages"], 3);

    let body: serde_json::Value = response.json();
    let value = body["value"].as_array().unwrap();
    assert_eq!(value.len(), 2);
    assert_eq!(value[0]["Name"], "Arnold Able");
    // Only the requested fields travel
    assert!(value[0].get("Age").is_none());
    assert!(value[0].get("MainCategory").is_none());
}

#[tokio::test]
async fn unknown_sort_key_maps_to_bad_request() {
    let server = TestServer::new(app()).unwrap();

    let response = server
        .get("/api/authors")
        .add_query_param("orderBy", "rank desc")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNKNOWN_SORT_KEY");
    assert_eq!(body["details"]["key"], "rank");
}

#[tokio::test]
async fn unknown_field_maps_to_bad_request() {
    let server = TestServer::new(app()).unwrap();

    let response = server
        .get("/api/authors")
        .add_query_param("fields", "unknown")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNKNOWN_FIELD");
}

#[tokio::test]
async fn page_beyond_range_is_ok_and_empty() {
    let server = TestServer::new(app()).unwrap();

    let response = server
        .get("/api/authors")
        .add_query_param("pageNumber", "40")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["value"].as_array().unwrap().is_empty());
}
