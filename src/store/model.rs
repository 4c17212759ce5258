use std::collections::HashMap;

use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ListValue, Value};
use uuid::Uuid;

use crate::catalog::{Movie, MovieSummary};

fn string_list_value(items: &[String]) -> Value {
    Value {
        kind: Some(Kind::ListValue(ListValue {
            values: items.iter().map(|item| item.clone().into()).collect(),
        })),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match &value.kind {
        Some(Kind::ListValue(list)) => list
            .values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Builds the point payload for a movie. The embedding is NOT part of the
/// payload; it is stored as the point vector and never read back by search.
pub(crate) fn payload_from_movie(movie: &Movie) -> HashMap<String, Value> {
    let mut payload: HashMap<String, Value> = HashMap::new();
    payload.insert("id".to_string(), movie.id.to_string().into());
    payload.insert("title".to_string(), movie.title.clone().into());
    payload.insert("year".to_string(), (movie.year as i64).into());
    payload.insert("director".to_string(), movie.director.clone().into());
    payload.insert("genres".to_string(), string_list_value(&movie.genres));
    payload.insert("description".to_string(), movie.description.clone().into());
    payload.insert("cast".to_string(), string_list_value(&movie.cast));
    if let Some(url) = &movie.poster_url {
        payload.insert("poster_url".to_string(), url.clone().into());
    }
    if let Some(rating) = movie.rating {
        payload.insert("rating".to_string(), rating.into());
    }
    payload
}

/// Reconstructs the caller-facing projection from a point payload.
///
/// Returns `None` when the payload is missing its identity fields; callers
/// skip such points rather than failing the whole result set.
pub(crate) fn summary_from_payload(payload: &HashMap<String, Value>) -> Option<MovieSummary> {
    let id = payload
        .get("id")
        .and_then(|v| v.as_str())
        .and_then(|raw| Uuid::parse_str(raw).ok())?;

    let title = payload
        .get("title")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())?;

    Some(MovieSummary {
        id,
        title,
        year: payload
            .get("year")
            .and_then(|v| v.as_integer())
            .unwrap_or(0) as i32,
        director: payload
            .get("director")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        genres: payload.get("genres").map(string_list).unwrap_or_default(),
        description: payload
            .get("description")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        cast: payload.get("cast").map(string_list).unwrap_or_default(),
        poster_url: payload
            .get("poster_url")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        rating: payload.get("rating").and_then(|v| v.as_double()),
    })
}
