//! JSON REST API for refrate.
//!
//! Exposes two axum [`Router`]s backed by any
//! [`refrate_core::store::SceneStore`]: a public one for browsing matches
//! and scenes and submitting ratings, and an admin one for scene lifecycle,
//! provider sync, user erasure, and voice drafts. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", refrate_api::api_router(store.clone()))
//! .nest("/api/v1", refrate_api::admin_router(store, extractor))
//! ```

pub mod admin;
pub mod error;
pub mod matches;
pub mod ratings;
pub mod scenes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use refrate_core::store::SceneStore;
use refrate_voice::Extractor;

pub use crate::{admin::AdminState, error::ApiError};

/// Build the public API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SceneStore + 'static,
{
  Router::new()
    // Matches
    .route("/matches", get(matches::list::<S>).post(matches::create::<S>))
    .route("/matches/{id}", get(matches::get_one::<S>))
    // Scenes
    .route("/scenes", get(scenes::list::<S>).post(scenes::create::<S>))
    .route("/scenes/{id}", get(scenes::get_one::<S>))
    .route("/scenes/{id}/aggregate", get(scenes::aggregate::<S>))
    // Ratings
    .route("/ratings", get(ratings::list::<S>).post(ratings::create::<S>))
    .with_state(store)
}

/// Build the admin router for `store`, carrying the voice pipeline.
pub fn admin_router<S>(store: Arc<S>, extractor: Arc<Extractor>) -> Router<()>
where
  S: SceneStore + 'static,
{
  Router::new()
    .route("/admin/scenes/{id}/release", post(admin::release::<S>))
    .route("/admin/scenes/{id}/unrelease", post(admin::unrelease::<S>))
    .route("/admin/scenes/{id}/lock", post(admin::lock::<S>))
    .route("/admin/scenes/{id}/unlock", post(admin::unlock::<S>))
    .route("/admin/scenes/{id}/delete", post(admin::delete::<S>))
    .route("/admin/scenes/voice-draft", post(admin::voice_draft::<S>))
    .route("/admin/matches/{id}/matchday", post(admin::set_matchday::<S>))
    .route("/admin/matches/provider-sync", post(admin::provider_sync::<S>))
    .route("/admin/users/{id}/anonymize", post(admin::anonymize_user::<S>))
    .with_state(AdminState { store, extractor })
}

// ─── Integration tests ────────────────────────────────────────────────────────
