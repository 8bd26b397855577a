//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use refrate_core::{
  Classify, ErrorKind,
  matches::{ExternalRef, NewMatch},
  rating::{NewRating, PerceptionChannel, RatingTimeType, RuleKnowledge},
  scene::{NewScene, SceneType},
  store::{SceneQuery, SceneStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_match() -> NewMatch {
  NewMatch {
    league:          "BL1".into(),
    season:          "2025/26".into(),
    kickoff:         Utc.with_ymd_and_hms(2025, 8, 22, 18, 30, 0).unwrap(),
    team_home:       "FC Altona".into(),
    team_away:       "SV Brinkum".into(),
    matchday_number: Some(1),
    matchday_name:   Some("1. Spieltag".into()),
    external_ref:    None,
  }
}

fn new_scene(match_id: Uuid) -> NewScene {
  NewScene {
    match_id,
    minute: 57,
    stoppage_time: None,
    scene_type: SceneType::Penalty,
    description_de: "Elfmeter nach Handspiel im Strafraum".into(),
    description_en: "Penalty after a handball in the box".into(),
    created_by: None,
  }
}

fn new_rating(scene_id: Uuid, user_id: Uuid) -> NewRating {
  NewRating {
    scene_id,
    user_id,
    decision_score: 4,
    confidence_score: 3,
    perception_channel: PerceptionChannel::Tv,
    rule_knowledge: RuleKnowledge::Medium,
    rating_time_type: RatingTimeType::Live,
    fav_team: None,
  }
}

/// Shorthand: create a match plus a released scene, ready for rating.
async fn released_scene(s: &SqliteStore) -> (Uuid, Uuid) {
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();
  s.release_scene(scene.scene_id).await.unwrap();
  (m.match_id, scene.scene_id)
}

// ─── Matches ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_match() {
  let s = store().await;

  let m = s.add_match(new_match()).await.unwrap();
  let fetched = s.get_match(m.match_id).await.unwrap().unwrap();
  assert_eq!(fetched.match_id, m.match_id);
  assert_eq!(fetched.team_home, "FC Altona");
  assert_eq!(fetched.matchday_number, Some(1));
}

#[tokio::test]
async fn get_match_missing_returns_none() {
  let s = store().await;
  assert!(s.get_match(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn provider_upsert_updates_instead_of_duplicating() {
  let s = store().await;

  let mut input = new_match();
  input.external_ref = Some(ExternalRef {
    provider:    "openligadb".into(),
    external_id: "39601".into(),
  });

  let first = s.upsert_provider_match(input.clone()).await.unwrap();

  // Second sync of the same fixture with corrected kickoff.
  input.kickoff = Utc.with_ymd_and_hms(2025, 8, 23, 15, 30, 0).unwrap();
  let second = s.upsert_provider_match(input).await.unwrap();

  assert_eq!(second.match_id, first.match_id);
  assert_eq!(second.kickoff, Utc.with_ymd_and_hms(2025, 8, 23, 15, 30, 0).unwrap());
  assert_eq!(s.list_matches(10, 0).await.unwrap().len(), 1);
}

#[tokio::test]
async fn provider_upsert_without_external_ref_is_invalid() {
  let s = store().await;
  let err = s.upsert_provider_match(new_match()).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
}

#[tokio::test]
async fn matchday_backfill() {
  let s = store().await;

  let mut input = new_match();
  input.matchday_number = None;
  input.matchday_name = None;
  let m = s.add_match(input).await.unwrap();

  let updated = s
    .set_matchday(m.match_id, Some(7), Some("7. Spieltag".into()))
    .await
    .unwrap();
  assert_eq!(updated.matchday_number, Some(7));
  assert_eq!(updated.matchday_name.as_deref(), Some("7. Spieltag"));

  let err = s.set_matchday(Uuid::new_v4(), Some(1), None).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

// ─── Scene creation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn add_scene_starts_as_unreleased_draft() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();

  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();
  assert!(!scene.is_released);
  assert!(scene.release_time.is_none());
  assert!(!scene.is_locked);

  let fetched = s.get_scene(scene.scene_id).await.unwrap().unwrap();
  assert_eq!(fetched.scene_type, SceneType::Penalty);
  assert_eq!(fetched.minute, 57);
}

#[tokio::test]
async fn add_scene_for_unknown_match_fails() {
  let s = store().await;
  let err = s.add_scene(new_scene(Uuid::new_v4())).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn add_scene_rejects_out_of_range_minute() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();

  let mut input = new_scene(m.match_id);
  input.minute = 131;
  let err = s.add_scene(input).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
}

#[tokio::test]
async fn list_scenes_filtered_by_match() {
  let s = store().await;
  let m1 = s.add_match(new_match()).await.unwrap();
  let m2 = s.add_match(new_match()).await.unwrap();
  s.add_scene(new_scene(m1.match_id)).await.unwrap();
  s.add_scene(new_scene(m1.match_id)).await.unwrap();
  s.add_scene(new_scene(m2.match_id)).await.unwrap();

  let all = s.list_scenes(SceneQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let only_m1 = s
    .list_scenes(SceneQuery { match_id: Some(m1.match_id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(only_m1.len(), 2);
  assert!(only_m1.iter().all(|sc| sc.match_id == m1.match_id));
}

// ─── Release / lock state machine ────────────────────────────────────────────

#[tokio::test]
async fn release_sets_flag_and_stamp() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();

  let released = s.release_scene(scene.scene_id).await.unwrap();
  assert!(released.is_released);
  assert!(released.release_time.is_some());
}

#[tokio::test]
async fn unrelease_clears_flag_and_stamp_together() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;

  let back = s.unrelease_scene(scene_id).await.unwrap();
  assert!(!back.is_released);
  // Invariant: unreleased scenes never carry a release stamp.
  assert!(back.release_time.is_none());
}

#[tokio::test]
async fn re_release_overwrites_stamp() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  let first = s.get_scene(scene_id).await.unwrap().unwrap().release_time.unwrap();

  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  let again = s.release_scene(scene_id).await.unwrap();
  assert!(again.release_time.unwrap() > first);
}

#[tokio::test]
async fn release_missing_scene_is_not_found() {
  let s = store().await;
  let err = s.release_scene(Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn locked_scene_rejects_release_whatever_its_release_state() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;

  s.lock_scene(scene_id).await.unwrap();

  // Already released, still Conflict: lock dominates.
  let err = s.release_scene(scene_id).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
  let err = s.unrelease_scene(scene_id).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
}

#[tokio::test]
async fn lock_and_unlock_ignore_release_state() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();

  // Lock an unreleased draft.
  let locked = s.lock_scene(scene.scene_id).await.unwrap();
  assert!(locked.is_locked);
  assert!(!locked.is_released);

  // Unlock keeps the release state untouched.
  let unlocked = s.unlock_scene(scene.scene_id).await.unwrap();
  assert!(!unlocked.is_locked);
  assert!(!unlocked.is_released);

  // Locking a released scene keeps it released.
  s.release_scene(scene.scene_id).await.unwrap();
  let locked = s.lock_scene(scene.scene_id).await.unwrap();
  assert!(locked.is_locked);
  assert!(locked.is_released);
  assert!(locked.release_time.is_some());
}

#[tokio::test]
async fn unlock_then_release_works_again() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();

  s.lock_scene(scene.scene_id).await.unwrap();
  s.unlock_scene(scene.scene_id).await.unwrap();
  let released = s.release_scene(scene.scene_id).await.unwrap();
  assert!(released.is_released);
}

#[tokio::test]
async fn delete_unlocked_scene_succeeds_and_removes_ratings() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  s.submit_rating(new_rating(scene_id, Uuid::new_v4())).await.unwrap();

  s.delete_scene(scene_id).await.unwrap();
  assert!(s.get_scene(scene_id).await.unwrap().is_none());
  assert!(s.list_ratings(Some(scene_id), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_locked_scene_is_conflict() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  s.submit_rating(new_rating(scene_id, Uuid::new_v4())).await.unwrap();
  s.lock_scene(scene_id).await.unwrap();

  let err = s.delete_scene(scene_id).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));

  // The aborted transaction must not have eaten the ratings.
  assert_eq!(s.list_ratings(Some(scene_id), 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_missing_scene_is_not_found() {
  let s = store().await;
  let err = s.delete_scene(Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

// ─── Rating submission ───────────────────────────────────────────────────────

#[tokio::test]
async fn submit_and_list_rating() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  let user_id = Uuid::new_v4();

  let rating = s.submit_rating(new_rating(scene_id, user_id)).await.unwrap();
  assert_eq!(rating.scene_id, scene_id);
  assert_eq!(rating.user_id, Some(user_id));
  assert_eq!(rating.decision_score, 4);

  let listed = s.list_ratings(Some(scene_id), 10).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].rating_id, rating.rating_id);
}

#[tokio::test]
async fn rating_missing_scene_is_not_found() {
  let s = store().await;
  let err = s
    .submit_rating(new_rating(Uuid::new_v4(), Uuid::new_v4()))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn rating_unreleased_scene_is_conflict() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();

  let err = s
    .submit_rating(new_rating(scene.scene_id, Uuid::new_v4()))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
  assert!(err.to_string().contains("not released"));
}

#[tokio::test]
async fn rating_locked_scene_is_conflict() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  s.lock_scene(scene_id).await.unwrap();

  let err = s
    .submit_rating(new_rating(scene_id, Uuid::new_v4()))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
  assert!(err.to_string().contains("locked"));
}

#[tokio::test]
async fn rating_with_score_out_of_range_is_invalid() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;

  let mut input = new_rating(scene_id, Uuid::new_v4());
  input.decision_score = 6;
  let err = s.submit_rating(input).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
}

#[tokio::test]
async fn fav_team_must_name_one_of_the_sides() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;

  let mut input = new_rating(scene_id, Uuid::new_v4());
  input.fav_team = Some("TSV Elsewhere".into());
  let err = s.submit_rating(input).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));

  // Nothing was written.
  assert!(s.list_ratings(Some(scene_id), 10).await.unwrap().is_empty());

  let mut input = new_rating(scene_id, Uuid::new_v4());
  input.fav_team = Some("SV Brinkum".into());
  let rating = s.submit_rating(input).await.unwrap();
  assert_eq!(rating.fav_team.as_deref(), Some("SV Brinkum"));
}

#[tokio::test]
async fn second_rating_by_same_user_is_conflict() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  let user_id = Uuid::new_v4();

  s.submit_rating(new_rating(scene_id, user_id)).await.unwrap();
  let err = s.submit_rating(new_rating(scene_id, user_id)).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
  assert!(err.to_string().contains("already rated"));
}

#[tokio::test]
async fn concurrent_duplicate_submissions_yield_one_success() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  let user_id = Uuid::new_v4();

  let (a, b) = tokio::join!(
    s.submit_rating(new_rating(scene_id, user_id)),
    s.submit_rating(new_rating(scene_id, user_id)),
  );

  let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
  assert_eq!(successes, 1, "exactly one of two racing submissions may win");
  let err = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
  assert_eq!(err.kind(), Some(ErrorKind::Conflict));
}

#[tokio::test]
async fn same_user_may_rate_different_scenes() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let user_id = Uuid::new_v4();

  for _ in 0..2 {
    let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();
    s.release_scene(scene.scene_id).await.unwrap();
    s.submit_rating(new_rating(scene.scene_id, user_id)).await.unwrap();
  }
}

// ─── User anonymization ──────────────────────────────────────────────────────

#[tokio::test]
async fn anonymize_clears_user_but_keeps_ratings() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  let user_id = Uuid::new_v4();
  s.submit_rating(new_rating(scene_id, user_id)).await.unwrap();
  s.submit_rating(new_rating(scene_id, Uuid::new_v4())).await.unwrap();

  let touched = s.anonymize_user(user_id).await.unwrap();
  assert_eq!(touched, 1);

  let ratings = s.list_ratings(Some(scene_id), 10).await.unwrap();
  assert_eq!(ratings.len(), 2);
  assert_eq!(ratings.iter().filter(|r| r.user_id.is_none()).count(), 1);

  // Aggregates are unaffected by erasure.
  let agg = s.aggregate(scene_id).await.unwrap();
  assert_eq!(agg.rating_count, 2);
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn aggregate_of_missing_scene_is_not_found() {
  let s = store().await;
  let err = s.aggregate(Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn aggregate_with_no_ratings_is_all_zeroes() {
  let s = store().await;
  let m = s.add_match(new_match()).await.unwrap();
  let scene = s.add_scene(new_scene(m.match_id)).await.unwrap();

  // Unreleased is fine: release state does not gate aggregation.
  let agg = s.aggregate(scene.scene_id).await.unwrap();
  assert_eq!(agg.rating_count, 0);
  assert_eq!(agg.avg_decision, 0.0);
  assert_eq!(agg.avg_confidence, 0.0);
  assert!(agg.decision_dist.is_empty());
  assert!(agg.confidence_dist.is_empty());
  assert!(agg.channel_dist.is_empty());
  assert!(agg.time_type_dist.is_empty());
  assert!(agg.rule_knowledge_dist.is_empty());
}

#[tokio::test]
async fn aggregate_means_and_distributions() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;

  for (decision, channel) in [
    (3, PerceptionChannel::Stadium),
    (4, PerceptionChannel::Tv),
    (4, PerceptionChannel::Tv),
  ] {
    let mut input = new_rating(scene_id, Uuid::new_v4());
    input.decision_score = decision;
    input.perception_channel = channel;
    s.submit_rating(input).await.unwrap();
  }

  let agg = s.aggregate(scene_id).await.unwrap();
  assert_eq!(agg.rating_count, 3);
  assert!((agg.avg_decision - 11.0 / 3.0).abs() < 1e-9);
  assert_eq!(agg.decision_dist.get("3"), Some(&1));
  assert_eq!(agg.decision_dist.get("4"), Some(&2));
  assert_eq!(agg.decision_dist.len(), 2);
  assert_eq!(agg.channel_dist.get("STADIUM"), Some(&1));
  assert_eq!(agg.channel_dist.get("TV"), Some(&2));
  // Categories nobody picked do not appear.
  assert!(!agg.channel_dist.contains_key("STREAM"));
}

#[tokio::test]
async fn aggregate_works_on_locked_scene() {
  let s = store().await;
  let (_, scene_id) = released_scene(&s).await;
  s.submit_rating(new_rating(scene_id, Uuid::new_v4())).await.unwrap();
  s.lock_scene(scene_id).await.unwrap();

  let agg = s.aggregate(scene_id).await.unwrap();
  assert_eq!(agg.rating_count, 1);
}
