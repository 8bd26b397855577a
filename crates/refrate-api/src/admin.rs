//! Handlers for `/admin` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/scenes/:id/release` | Stamps `release_time` |
//! | `POST` | `/admin/scenes/:id/unrelease` | Clears flag and stamp |
//! | `POST` | `/admin/scenes/:id/lock` | 409-proof freeze |
//! | `POST` | `/admin/scenes/:id/unlock` | |
//! | `POST` | `/admin/scenes/:id/delete` | 204; removes ratings too |
//! | `POST` | `/admin/scenes/voice-draft` | Transcript/audio to scene draft |
//! | `POST` | `/admin/matches/:id/matchday` | Backfill matchday labels |
//! | `POST` | `/admin/matches/provider-sync` | Batch upsert by external ref |
//! | `POST` | `/admin/users/:id/anonymize` | Clears user ref on ratings |
//!
//! Authentication is the deployment's concern; mount this router behind
//! whatever middleware guards admin access.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use refrate_core::{
  matches::{Match, NewMatch},
  scene::Scene,
  store::SceneStore,
};
use refrate_voice::{DraftRequest, Extractor, Lang, VoiceSceneDraft};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;

/// State for the admin router: the store plus the voice pipeline.
pub struct AdminState<S> {
  pub store:     Arc<S>,
  pub extractor: Arc<Extractor>,
}

impl<S> Clone for AdminState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      extractor: Arc::clone(&self.extractor),
    }
  }
}

// ─── Scene lifecycle ──────────────────────────────────────────────────────────

/// `POST /admin/scenes/:id/release`
pub async fn release<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Scene>, ApiError>
where
  S: SceneStore,
{
  let scene = state.store.release_scene(id).await.map_err(ApiError::classify)?;
  Ok(Json(scene))
}

/// `POST /admin/scenes/:id/unrelease`
pub async fn unrelease<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Scene>, ApiError>
where
  S: SceneStore,
{
  let scene =
    state.store.unrelease_scene(id).await.map_err(ApiError::classify)?;
  Ok(Json(scene))
}

/// `POST /admin/scenes/:id/lock`
pub async fn lock<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Scene>, ApiError>
where
  S: SceneStore,
{
  let scene = state.store.lock_scene(id).await.map_err(ApiError::classify)?;
  Ok(Json(scene))
}

/// `POST /admin/scenes/:id/unlock`
pub async fn unlock<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Scene>, ApiError>
where
  S: SceneStore,
{
  let scene = state.store.unlock_scene(id).await.map_err(ApiError::classify)?;
  Ok(Json(scene))
}

/// `POST /admin/scenes/:id/delete` — 204 on success, 409 while locked.
pub async fn delete<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SceneStore,
{
  state.store.delete_scene(id).await.map_err(ApiError::classify)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Voice draft ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VoiceDraftBody {
  pub transcript: Option<String>,
  /// BCP-47-ish tag; anything not starting with `en` is treated as German.
  pub lang:       Option<String>,
  /// Base64-encoded audio, handed to the speech-to-text command.
  pub audio_b64:  Option<String>,
}

/// `POST /admin/scenes/voice-draft`
pub async fn voice_draft<S>(
  State(state): State<AdminState<S>>,
  Json(body): Json<VoiceDraftBody>,
) -> Result<Json<VoiceSceneDraft>, ApiError>
where
  S: SceneStore,
{
  let audio = body
    .audio_b64
    .as_deref()
    .map(|b64| B64.decode(b64))
    .transpose()
    .map_err(|e| ApiError::BadRequest(format!("invalid audio_b64: {e}")))?;

  let request = DraftRequest {
    transcript: body.transcript,
    audio,
    lang: body.lang.as_deref().map(Lang::from_tag).unwrap_or_default(),
  };
  let draft =
    state.extractor.draft(request).await.map_err(ApiError::classify)?;
  Ok(Json(draft))
}

// ─── Matches ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchdayBody {
  pub matchday_number: Option<u32>,
  pub matchday_name:   Option<String>,
}

/// `POST /admin/matches/:id/matchday` — backfill matchday labels.
pub async fn set_matchday<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MatchdayBody>,
) -> Result<Json<Match>, ApiError>
where
  S: SceneStore,
{
  let m = state
    .store
    .set_matchday(id, body.matchday_number, body.matchday_name)
    .await
    .map_err(ApiError::classify)?;
  Ok(Json(m))
}

/// `POST /admin/matches/provider-sync` — body: an array of `NewMatch`
/// records carrying external refs. Upserts each by `(provider, external_id)`.
pub async fn provider_sync<S>(
  State(state): State<AdminState<S>>,
  Json(body): Json<Vec<NewMatch>>,
) -> Result<Json<Vec<Match>>, ApiError>
where
  S: SceneStore,
{
  let mut synced = Vec::with_capacity(body.len());
  for input in body {
    let m = state
      .store
      .upsert_provider_match(input)
      .await
      .map_err(ApiError::classify)?;
    synced.push(m);
  }
  Ok(Json(synced))
}

// ─── Users ────────────────────────────────────────────────────────────────────

/// `POST /admin/users/:id/anonymize` — clears the user reference on all of
/// the user's ratings. Returns `{"anonymized": <count>}`.
pub async fn anonymize_user<S>(
  State(state): State<AdminState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SceneStore,
{
  let count =
    state.store.anonymize_user(id).await.map_err(ApiError::classify)?;
  Ok(Json(json!({ "anonymized": count })))
}
