use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::search::{SEARCH_SOURCE_HEADER, SearchError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("catalog operation failed: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::Search(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            GatewayError::Catalog(inner) => match inner {
                CatalogError::Forbidden { .. } => (StatusCode::FORBIDDEN, self.to_string()),
                CatalogError::EmptyDocument => (StatusCode::BAD_REQUEST, self.to_string()),
                CatalogError::Embedding(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
                }
                CatalogError::Store(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            },
        };

        let mut headers = HeaderMap::new();
        headers.insert(SEARCH_SOURCE_HEADER, HeaderValue::from_static("ERROR"));

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
