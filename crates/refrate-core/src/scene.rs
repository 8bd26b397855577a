//! Scene — a single refereeable moment within a match, the unit users rate.
//!
//! A scene carries two independent administrative booleans: `is_released`
//! (open for rating) and `is_locked` (emergency brake). Lock dominates: a
//! locked scene rejects every mutation except unlock, without losing its
//! released/unreleased status. The two must not be collapsed into one enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Bounds accepted for [`Scene::minute`].
pub const MINUTE_RANGE: (i64, i64) = (0, 130);
/// Bounds accepted for [`Scene::stoppage_time`].
pub const STOPPAGE_RANGE: (i64, i64) = (0, 30);

/// Closed enumeration of refereeing-decision categories.
///
/// The serialised form doubles as the value stored in the `scene_type`
/// column, so the variants are wire-stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneType {
  // Referee decisions / restarts
  Penalty,
  PenaltyReview,
  PenaltyOverturned,
  FreeKick,
  IndirectFreeKick,
  DropBall,

  // Fouls / discipline
  Foul,
  YellowCard,
  SecondYellow,
  RedCard,

  // Offside / goals
  Offside,
  Goal,
  OffsideGoal,
  GoalDisallowed,
  VarReview,
  VarDecision,

  Handball,
  DeniedGoalscoringOpportunity,

  // Other stoppages
  Substitution,
  InjuryStoppage,
  TimeWasting,
  Dissent,

  // Ball out of play
  Corner,
  GoalKick,
  ThrowIn,

  /// Catch-all for scenes outside the taxonomy.
  Other,
}

impl SceneType {
  /// The string stored in the `scene_type` column.
  /// Must match the `rename_all = "SCREAMING_SNAKE_CASE"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Penalty => "PENALTY",
      Self::PenaltyReview => "PENALTY_REVIEW",
      Self::PenaltyOverturned => "PENALTY_OVERTURNED",
      Self::FreeKick => "FREE_KICK",
      Self::IndirectFreeKick => "INDIRECT_FREE_KICK",
      Self::DropBall => "DROP_BALL",
      Self::Foul => "FOUL",
      Self::YellowCard => "YELLOW_CARD",
      Self::SecondYellow => "SECOND_YELLOW",
      Self::RedCard => "RED_CARD",
      Self::Offside => "OFFSIDE",
      Self::Goal => "GOAL",
      Self::OffsideGoal => "OFFSIDE_GOAL",
      Self::GoalDisallowed => "GOAL_DISALLOWED",
      Self::VarReview => "VAR_REVIEW",
      Self::VarDecision => "VAR_DECISION",
      Self::Handball => "HANDBALL",
      Self::DeniedGoalscoringOpportunity => "DENIED_GOALSCORING_OPPORTUNITY",
      Self::Substitution => "SUBSTITUTION",
      Self::InjuryStoppage => "INJURY_STOPPAGE",
      Self::TimeWasting => "TIME_WASTING",
      Self::Dissent => "DISSENT",
      Self::Corner => "CORNER",
      Self::GoalKick => "GOAL_KICK",
      Self::ThrowIn => "THROW_IN",
      Self::Other => "OTHER",
    }
  }
}

/// A refereeable moment.
///
/// Invariant: `is_released == false` implies `release_time == None`. The
/// store never produces a scene violating this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
  pub scene_id:       Uuid,
  pub match_id:       Uuid,
  pub minute:         u16,
  pub stoppage_time:  Option<u16>,
  pub scene_type:     SceneType,
  /// Canonical German description.
  pub description_de: String,
  /// Secondary English description.
  pub description_en: String,
  pub is_released:    bool,
  pub release_time:   Option<DateTime<Utc>>,
  pub is_locked:      bool,
  pub created_by:     Option<Uuid>,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::SceneStore::add_scene`].
/// `scene_id` and `created_at` are always set by the store; scenes start
/// unreleased and unlocked.
#[derive(Debug, Clone, Deserialize)]
pub struct NewScene {
  pub match_id:       Uuid,
  pub minute:         u16,
  pub stoppage_time:  Option<u16>,
  pub scene_type:     SceneType,
  pub description_de: String,
  pub description_en: String,
  pub created_by:     Option<Uuid>,
}

impl NewScene {
  /// Range checks on caller-supplied fields; match existence is checked by
  /// the store inside the insert transaction.
  pub fn validate(&self) -> Result<()> {
    let (min, max) = MINUTE_RANGE;
    if i64::from(self.minute) > max {
      return Err(Error::OutOfRange {
        field: "minute",
        value: i64::from(self.minute),
        min,
        max,
      });
    }
    if let Some(st) = self.stoppage_time {
      let (min, max) = STOPPAGE_RANGE;
      if i64::from(st) > max {
        return Err(Error::OutOfRange {
          field: "stoppage_time",
          value: i64::from(st),
          min,
          max,
        });
      }
    }
    if !(3..=1000).contains(&self.description_de.chars().count()) {
      return Err(Error::DescriptionLength);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_scene(minute: u16, stoppage: Option<u16>) -> NewScene {
    NewScene {
      match_id:       Uuid::new_v4(),
      minute,
      stoppage_time:  stoppage,
      scene_type:     SceneType::Penalty,
      description_de: "Elfmeter nach Foul".into(),
      description_en: "Penalty after a foul".into(),
      created_by:     None,
    }
  }

  #[test]
  fn scene_type_round_trips_through_serde() {
    let json = serde_json::to_string(&SceneType::PenaltyOverturned).unwrap();
    assert_eq!(json, "\"PENALTY_OVERTURNED\"");
    let back: SceneType = serde_json::from_str(&json).unwrap();
    assert_eq!(back, SceneType::PenaltyOverturned);
    assert_eq!(SceneType::PenaltyOverturned.as_str(), "PENALTY_OVERTURNED");
  }

  #[test]
  fn validate_accepts_bounds() {
    assert!(new_scene(0, None).validate().is_ok());
    assert!(new_scene(130, Some(30)).validate().is_ok());
  }

  #[test]
  fn validate_rejects_out_of_range() {
    assert!(matches!(
      new_scene(131, None).validate(),
      Err(Error::OutOfRange { field: "minute", .. })
    ));
    assert!(matches!(
      new_scene(90, Some(31)).validate(),
      Err(Error::OutOfRange { field: "stoppage_time", .. })
    ));
  }

  #[test]
  fn validate_rejects_short_description() {
    let mut s = new_scene(12, None);
    s.description_de = "ab".into();
    assert!(matches!(s.validate(), Err(Error::DescriptionLength)));
  }
}
