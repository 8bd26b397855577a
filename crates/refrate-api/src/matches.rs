//! Handlers for `/matches` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/matches` | `?limit=&offset=` |
//! | `POST` | `/matches` | Body: a `NewMatch`, 201 on success |
//! | `GET`  | `/matches/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use refrate_core::{
  matches::{Match, NewMatch},
  store::SceneStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

const DEFAULT_LIMIT: usize = 50;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

/// `GET /matches[?limit=&offset=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Match>>, ApiError>
where
  S: SceneStore,
{
  let matches = store
    .list_matches(
      params.limit.unwrap_or(DEFAULT_LIMIT),
      params.offset.unwrap_or(0),
    )
    .await
    .map_err(ApiError::classify)?;
  Ok(Json(matches))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /matches` — body: a `NewMatch`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SceneStore,
{
  let m = store.add_match(body).await.map_err(ApiError::classify)?;
  Ok((StatusCode::CREATED, Json(m)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /matches/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Match>, ApiError>
where
  S: SceneStore,
{
  let m = store
    .get_match(id)
    .await
    .map_err(ApiError::classify)?
    .ok_or_else(|| ApiError::NotFound(format!("match {id} not found")))?;
  Ok(Json(m))
}
