//! Handlers for `/ratings` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/ratings` | Body: a `NewRating`, 201; 409 on duplicate |
//! | `GET`  | `/ratings` | `?scene_id=&limit=` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use refrate_core::{
  rating::{NewRating, Rating},
  store::SceneStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

const DEFAULT_LIMIT: usize = 50;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /ratings` — body: a `NewRating`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewRating>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SceneStore,
{
  let rating = store.submit_rating(body).await.map_err(ApiError::classify)?;
  Ok((StatusCode::CREATED, Json(rating)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub scene_id: Option<Uuid>,
  pub limit:    Option<usize>,
}

/// `GET /ratings[?scene_id=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Rating>>, ApiError>
where
  S: SceneStore,
{
  let ratings = store
    .list_ratings(params.scene_id, params.limit.unwrap_or(DEFAULT_LIMIT))
    .await
    .map_err(ApiError::classify)?;
  Ok(Json(ratings))
}
