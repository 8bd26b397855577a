//! The `SceneStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `refrate-store-sqlite`).
//! Higher layers (`refrate-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Classify,
  aggregate::SceneAggregate,
  matches::{Match, NewMatch},
  rating::{NewRating, Rating},
  scene::{NewScene, Scene},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`SceneStore::list_scenes`].
#[derive(Debug, Clone)]
pub struct SceneQuery {
  /// Restrict to scenes of one match.
  pub match_id: Option<Uuid>,
  pub limit:    usize,
  pub offset:   usize,
}

impl Default for SceneQuery {
  fn default() -> Self {
    Self { match_id: None, limit: 50, offset: 0 }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a refrate storage backend.
///
/// Every operation executes inside exactly one storage transaction; that
/// transaction is the sole unit of atomicity and isolation. Check-then-act
/// sequences (rating uniqueness, release-vs-locked attribution) are made
/// race-safe by constraints and same-transaction diagnostic reads, never by
/// in-process locks.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SceneStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Matches ───────────────────────────────────────────────────────────

  /// Create and persist a match entered manually by an admin.
  fn add_match(
    &self,
    input: NewMatch,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  /// Insert or update a match delivered by an external provider.
  ///
  /// The conflict target is `(provider, external_id)`; a second sync of the
  /// same fixture updates the existing row instead of duplicating it.
  /// Returns an error if `input.external_ref` is missing.
  fn upsert_provider_match(
    &self,
    input: NewMatch,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  /// Retrieve a match by id. Returns `None` if not found.
  fn get_match(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Match>, Self::Error>> + Send + '_;

  /// List matches, newest kickoff first.
  fn list_matches(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Match>, Self::Error>> + Send + '_;

  /// Backfill the matchday label of a match. The only mutation a match
  /// permits once scenes reference it.
  fn set_matchday(
    &self,
    id: Uuid,
    number: Option<u32>,
    name: Option<String>,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  // ── Scenes ────────────────────────────────────────────────────────────

  /// Create a scene in draft state (unreleased, unlocked).
  fn add_scene(
    &self,
    input: NewScene,
  ) -> impl Future<Output = Result<Scene, Self::Error>> + Send + '_;

  /// Retrieve a scene by id. Returns `None` if not found.
  fn get_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Scene>, Self::Error>> + Send + '_;

  /// List scenes, newest first, optionally restricted to one match.
  fn list_scenes(
    &self,
    query: SceneQuery,
  ) -> impl Future<Output = Result<Vec<Scene>, Self::Error>> + Send + '_;

  /// Open a scene for rating: sets `is_released = true` and stamps
  /// `release_time`. Re-releasing an already-released scene overwrites the
  /// stamp. Fails with a locked Conflict even if already released.
  fn release_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Scene, Self::Error>> + Send + '_;

  /// Withdraw a scene from rating: clears both `is_released` and
  /// `release_time`. Rejected while locked.
  fn unrelease_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Scene, Self::Error>> + Send + '_;

  /// Freeze a scene against release-state changes and deletion. Always
  /// permitted on an existing scene regardless of release state.
  fn lock_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Scene, Self::Error>> + Send + '_;

  /// Lift the freeze. The only operation a locked scene accepts.
  fn unlock_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Scene, Self::Error>> + Send + '_;

  /// Delete a scene and its ratings. Rejected while locked.
  fn delete_scene(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Ratings ───────────────────────────────────────────────────────────

  /// Submit one user's rating of a scene.
  ///
  /// Preconditions, in order, against one transaction snapshot: scene
  /// exists; scene released; scene unlocked; scores in range and
  /// `fav_team` (if given) one of the match's team names; no prior rating
  /// by this user. The UNIQUE constraint on `(scene_id, user_id)` backstops
  /// the last check under concurrent duplicate submissions.
  fn submit_rating(
    &self,
    input: NewRating,
  ) -> impl Future<Output = Result<Rating, Self::Error>> + Send + '_;

  /// List ratings, newest first, optionally restricted to one scene.
  fn list_ratings(
    &self,
    scene_id: Option<Uuid>,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Rating>, Self::Error>> + Send + '_;

  /// Clear the user reference on all of `user_id`'s ratings (user erasure).
  /// The rating rows survive so aggregates are unaffected. Returns the
  /// number of ratings touched.
  fn anonymize_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Aggregation ───────────────────────────────────────────────────────

  /// Compute the rating summary for a scene. Existence check and rating
  /// scan share one transaction so the count and means always agree.
  /// Release/lock state does not gate aggregation.
  fn aggregate(
    &self,
    scene_id: Uuid,
  ) -> impl Future<Output = Result<SceneAggregate, Self::Error>> + Send + '_;
}
