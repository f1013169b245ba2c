//! Course-library demo: a small authors API over the carve engine
//!
//! Run with `cargo run --example course_library`, then try:
//!
//! ```text
//! curl 'localhost:3000/api/authors?orderBy=name desc,age&fields=id,name'
//! curl 'localhost:3000/api/authors?pageNumber=2&pageSize=2' -i
//! curl 'localhost:3000/api/authors?filter={"mainCategory":"Rum"}'
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use carve::prelude::*;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
struct Author {
    id: Uuid,
    first_name: String,
    last_name: String,
    date_of_birth: DateTime<Utc>,
    main_category: String,
}

impl_shaped!(Author, "Author", {
    "Id" => id,
    "FirstName" => first_name,
    "LastName" => last_name,
    "DateOfBirth" => date_of_birth,
    "MainCategory" => main_category,
});

#[derive(Clone)]
struct AuthorDto {
    id: Uuid,
    name: String,
    age: i64,
    main_category: String,
}

impl_shaped!(AuthorDto, "AuthorDto", {
    "Id" => id,
    "Name" => name,
    "Age" => age,
    "MainCategory" => main_category,
});

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        let age = Utc::now()
            .date_naive()
            .years_since(author.date_of_birth.date_naive())
            .unwrap_or(0) as i64;
        AuthorDto {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age,
            main_category: author.main_category,
        }
    }
}

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

async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<ResourceQuery>,
) -> Result<Response, CarveError> {
    let lookup = SourceQuery::new(Some(serde_json::json!({ "Id": author_id })), Vec::new());
    let mut found = state.authors.slice(&lookup, 0, 1).await?;

    let Some(author) = found.pop() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let shaped = state
        .engine
        .shaped_one(&AuthorDto::from(author), query.fields())?;
    Ok(Json(shaped).into_response())
}

fn seed(first: &str, last: &str, born: &str, category: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: born.parse().expect("seed date"),
        main_category: category.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,carve=debug,tower_http=debug".into()),
        )
        .init();

    let mut registry = SortMappingRegistry::new();
    registry.register_for::<Author, AuthorDto>(
        SortMapping::new()
            .map("Id", &["Id"])
            .map("MainCategory", &["MainCategory"])
            .map_reversed("Age", &["DateOfBirth"])
            .map("Name", &["FirstName", "LastName"]),
    )?;

    let authors = InMemorySource::from_records(vec![
        seed("Berry", "Griffin", "1980-05-24T00:00:00Z", "Ships"),
        seed("Nancy", "Swashbuckler", "1968-12-23T00:00:00Z", "Rum"),
        seed("Eli", "Ivory", "1954-03-02T00:00:00Z", "Singing"),
        seed("Arnold", "Able", "1994-11-23T00:00:00Z", "Rum"),
        seed("Seabury", "Toxic", "1989-01-03T00:00:00Z", "Maps"),
        seed("Victoria", "Grey", "1977-09-11T00:00:00Z", "Maps"),
    ]);

    let state = AppState {
        engine: ResourceEngine::new(Arc::new(registry)),
        authors,
    };

    let app = Router::new()
        .route("/api/authors", get(list_authors))
        .route("/api/authors/{author_id}", get(get_author))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("course-library demo listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
