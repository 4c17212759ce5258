use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::CacheBackend;
use crate::catalog::{Identity, MovieFilter, MovieSummary, NewMovie, Role, ScoredMovie};
use crate::constants::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::search::{SEARCH_SOURCE_HEADER, SearchOutcome};
use crate::store::DocumentStore;

use super::error::GatewayError;
use super::state::HandlerState;

/// Builds the HTTP router over a handler state.
pub fn create_router<S, B>(state: HandlerState<S, B>) -> Router
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    Router::new()
        .route("/health", get(health_handler::<S, B>))
        .route("/search", get(search_handler::<S, B>))
        .route(
            "/movies",
            get(list_movies_handler::<S, B>).post(create_movie_handler::<S, B>),
        )
        .route("/movies/{id}", delete(delete_movie_handler::<S, B>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

// Not flattened into `MovieFilter`: query-string deserialization routes
// numeric fields through untyped content under `flatten` and rejects them.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListParams {
    fn filter(&self) -> MovieFilter {
        MovieFilter {
            title: self.title.clone(),
            director: self.director.clone(),
            genre: self.genre.clone(),
            year: self.year,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub results: Vec<ScoredMovie>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub store_ready: bool,
    pub embedder: &'static str,
}

/// Resolves the caller identity from upstream-auth headers.
///
/// Authentication itself happens upstream; this only reads the resolved
/// subject/role so handlers can pass identity explicitly to the catalog.
fn identity_from_headers(headers: &HeaderMap) -> Identity {
    let subject = headers
        .get("x-user")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();
    let role = match headers.get("x-role").and_then(|v| v.to_str().ok()) {
        Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::User,
    };
    Identity::new(subject, role)
}

fn source_header(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        SEARCH_SOURCE_HEADER,
        HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static("ERROR")),
    );
    headers
}

#[instrument(skip(state, params))]
pub async fn search_handler<S, B>(
    State(state): State<HandlerState<S, B>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError>
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    let query = params.q.unwrap_or_default();
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let outcome = state.engine.search(&query, limit).await?;

    let (headers, body) = match outcome {
        SearchOutcome::NoQuery => (
            source_header("NONE"),
            SearchBody {
                status: "no_query",
                source: None,
                results: Vec::new(),
            },
        ),
        SearchOutcome::Ranked { hits, source } => (
            source_header(source.as_header_value()),
            SearchBody {
                status: "ok",
                source: Some(source.to_string()),
                results: hits,
            },
        ),
    };

    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

#[instrument(skip(state, params))]
pub async fn list_movies_handler<S, B>(
    State(state): State<HandlerState<S, B>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MovieSummary>>, GatewayError>
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT as u32);
    let movies = state.engine.filtered(&params.filter(), limit).await?;
    Ok(Json(movies))
}

#[instrument(skip(state, headers, new))]
pub async fn create_movie_handler<S, B>(
    State(state): State<HandlerState<S, B>>,
    headers: HeaderMap,
    Json(new): Json<NewMovie>,
) -> Result<Response, GatewayError>
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    if new.title.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "movie title must not be empty".to_string(),
        ));
    }

    let identity = identity_from_headers(&headers);
    let summary = state.catalog.add_movie(&identity, new).await?;
    Ok((StatusCode::CREATED, Json(summary)).into_response())
}

#[instrument(skip(state, headers))]
pub async fn delete_movie_handler<S, B>(
    State(state): State<HandlerState<S, B>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GatewayError>
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    let identity = identity_from_headers(&headers);
    state.catalog.delete_movie(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn health_handler<S, B>(
    State(state): State<HandlerState<S, B>>,
) -> Json<HealthBody>
where
    S: DocumentStore + 'static,
    B: CacheBackend + 'static,
{
    let store_ready = state.store.is_ready().await;
    Json(HealthBody {
        status: if store_ready { "ok" } else { "degraded" },
        store_ready,
        embedder: if state.engine.embedder().is_stub() {
            "stub"
        } else {
            "model"
        },
    })
}
