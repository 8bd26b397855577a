//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use refrate_core::{Classify, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// The first five variants mirror [`ErrorKind`]; anything unclassified is an
/// internal error and maps to 500.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not implemented: {0}")]
  NotImplemented(String),

  #[error("bad gateway: {0}")]
  BadGateway(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Translate a classified lower-layer error into the matching API error.
  pub fn classify<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match err.kind() {
      Some(ErrorKind::NotFound) => Self::NotFound(err.to_string()),
      Some(ErrorKind::Conflict) => Self::Conflict(err.to_string()),
      Some(ErrorKind::InvalidArgument) => Self::BadRequest(err.to_string()),
      Some(ErrorKind::NotImplemented) => Self::NotImplemented(err.to_string()),
      Some(ErrorKind::BadGateway) => Self::BadGateway(err.to_string()),
      None => Self::Internal(Box::new(err)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotImplemented(m) => (StatusCode::NOT_IMPLEMENTED, m.clone()),
      ApiError::BadGateway(m) => (StatusCode::BAD_GATEWAY, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "internal error in API handler");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
