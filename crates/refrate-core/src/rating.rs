//! Rating — one user's judgment of a scene across structured dimensions.
//!
//! Ratings are write-once: never updated, never deleted through documented
//! operations. Erasing a user anonymizes their ratings instead of deleting
//! them so aggregates stay intact. At most one rating exists per
//! `(scene_id, user_id)` pair, enforced by a storage-level UNIQUE constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// How the rater watched the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerceptionChannel {
  Stadium,
  Tv,
  Stream,
  Highlight,
}

impl PerceptionChannel {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Stadium => "STADIUM",
      Self::Tv => "TV",
      Self::Stream => "STREAM",
      Self::Highlight => "HIGHLIGHT",
    }
  }
}

/// Self-assessed familiarity with the laws of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKnowledge {
  Low,
  Medium,
  High,
}

impl RuleKnowledge {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "LOW",
      Self::Medium => "MEDIUM",
      Self::High => "HIGH",
    }
  }
}

/// When the judgment was formed relative to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingTimeType {
  Live,
  AfterReplay,
  AfterVar,
  Later,
}

impl RatingTimeType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Live => "LIVE",
      Self::AfterReplay => "AFTER_REPLAY",
      Self::AfterVar => "AFTER_VAR",
      Self::Later => "LATER",
    }
  }
}

/// A persisted judgment. `user_id` is `None` after the owning user was
/// anonymized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
  pub rating_id:          Uuid,
  pub scene_id:           Uuid,
  pub user_id:            Option<Uuid>,
  /// Agreement with the referee's call, 1 (wrong) to 5 (correct).
  pub decision_score:     u8,
  /// Confidence in the own judgment, 1 to 5.
  pub confidence_score:   u8,
  pub perception_channel: PerceptionChannel,
  pub rule_knowledge:     RuleKnowledge,
  pub rating_time_type:   RatingTimeType,
  /// Declared allegiance; when present it names one of the match's two teams.
  pub fav_team:           Option<String>,
  pub created_at:         DateTime<Utc>,
}

/// Input to [`crate::store::SceneStore::submit_rating`].
/// `rating_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRating {
  pub scene_id:           Uuid,
  pub user_id:            Uuid,
  pub decision_score:     u8,
  pub confidence_score:   u8,
  pub perception_channel: PerceptionChannel,
  pub rule_knowledge:     RuleKnowledge,
  pub rating_time_type:   RatingTimeType,
  pub fav_team:           Option<String>,
}

impl NewRating {
  /// Score range checks. Scene state and favorite-team membership are
  /// checked by the store against the same transaction snapshot as the
  /// insert.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("decision_score", self.decision_score),
      ("confidence_score", self.confidence_score),
    ] {
      if !(1..=5).contains(&value) {
        return Err(Error::OutOfRange {
          field,
          value: i64::from(value),
          min: 1,
          max: 5,
        });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rating(decision: u8, confidence: u8) -> NewRating {
    NewRating {
      scene_id:           Uuid::new_v4(),
      user_id:            Uuid::new_v4(),
      decision_score:     decision,
      confidence_score:   confidence,
      perception_channel: PerceptionChannel::Tv,
      rule_knowledge:     RuleKnowledge::Medium,
      rating_time_type:   RatingTimeType::Live,
      fav_team:           None,
    }
  }

  #[test]
  fn validate_accepts_score_bounds() {
    assert!(rating(1, 5).validate().is_ok());
    assert!(rating(5, 1).validate().is_ok());
  }

  #[test]
  fn validate_rejects_scores_outside_one_to_five() {
    assert!(rating(0, 3).validate().is_err());
    assert!(rating(3, 6).validate().is_err());
  }

  #[test]
  fn enum_wire_forms_are_screaming_snake() {
    assert_eq!(
      serde_json::to_string(&RatingTimeType::AfterReplay).unwrap(),
      "\"AFTER_REPLAY\""
    );
    assert_eq!(PerceptionChannel::Highlight.as_str(), "HIGHLIGHT");
  }
}
