//! Handlers for `/scenes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/scenes` | `?match_id=&limit=&offset=` |
//! | `POST` | `/scenes` | Body: a `NewScene`, 201; scenes start unreleased |
//! | `GET`  | `/scenes/:id` | 404 if not found |
//! | `GET`  | `/scenes/:id/aggregate` | Rating summary, works on any scene |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use refrate_core::{
  aggregate::SceneAggregate,
  scene::{NewScene, Scene},
  store::{SceneQuery, SceneStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub match_id: Option<Uuid>,
  pub limit:    Option<usize>,
  pub offset:   Option<usize>,
}

/// `GET /scenes[?match_id=&limit=&offset=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Scene>>, ApiError>
where
  S: SceneStore,
{
  let defaults = SceneQuery::default();
  let query = SceneQuery {
    match_id: params.match_id,
    limit:    params.limit.unwrap_or(defaults.limit),
    offset:   params.offset.unwrap_or(defaults.offset),
  };
  let scenes = store.list_scenes(query).await.map_err(ApiError::classify)?;
  Ok(Json(scenes))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /scenes` — body: a `NewScene`. The scene starts in draft state.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewScene>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SceneStore,
{
  let scene = store.add_scene(body).await.map_err(ApiError::classify)?;
  Ok((StatusCode::CREATED, Json(scene)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /scenes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Scene>, ApiError>
where
  S: SceneStore,
{
  let scene = store
    .get_scene(id)
    .await
    .map_err(ApiError::classify)?
    .ok_or_else(|| ApiError::NotFound(format!("scene {id} not found")))?;
  Ok(Json(scene))
}

// ─── Aggregate ────────────────────────────────────────────────────────────────

/// `GET /scenes/:id/aggregate`
pub async fn aggregate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SceneAggregate>, ApiError>
where
  S: SceneStore,
{
  let summary = store.aggregate(id).await.map_err(ApiError::classify)?;
  Ok(Json(summary))
}
