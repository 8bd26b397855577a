//! The computed statistical summary of a scene's ratings — never stored,
//! always derived from a single transaction snapshot of the rating set.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rating::Rating;

/// Count-by-value map. Keys are the wire form of the value (score digits or
/// enum tags); only values actually present among the scene's ratings appear.
pub type Distribution = BTreeMap<String, u64>;

/// On-demand summary of all ratings for one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneAggregate {
  pub scene_id:            Uuid,
  pub rating_count:        u64,
  /// Arithmetic mean of decision scores; `0.0` when there are no ratings.
  pub avg_decision:        f64,
  /// Arithmetic mean of confidence scores; `0.0` when there are no ratings.
  pub avg_confidence:      f64,
  pub decision_dist:       Distribution,
  pub confidence_dist:     Distribution,
  pub channel_dist:        Distribution,
  pub time_type_dist:      Distribution,
  pub rule_knowledge_dist: Distribution,
  /// Wall-clock time of this computation; aggregates are never cached.
  pub computed_at:         DateTime<Utc>,
}

impl SceneAggregate {
  /// Fold a snapshot of ratings into the summary. Pure; the caller is
  /// responsible for reading `ratings` inside the same transaction as the
  /// scene-existence check.
  pub fn compute(scene_id: Uuid, ratings: &[Rating]) -> Self {
    let mut agg = Self {
      scene_id,
      rating_count: ratings.len() as u64,
      avg_decision: 0.0,
      avg_confidence: 0.0,
      decision_dist: Distribution::new(),
      confidence_dist: Distribution::new(),
      channel_dist: Distribution::new(),
      time_type_dist: Distribution::new(),
      rule_knowledge_dist: Distribution::new(),
      computed_at: Utc::now(),
    };

    if ratings.is_empty() {
      return agg;
    }

    let mut decision_sum = 0u64;
    let mut confidence_sum = 0u64;
    for r in ratings {
      decision_sum += u64::from(r.decision_score);
      confidence_sum += u64::from(r.confidence_score);

      *agg
        .decision_dist
        .entry(r.decision_score.to_string())
        .or_insert(0) += 1;
      *agg
        .confidence_dist
        .entry(r.confidence_score.to_string())
        .or_insert(0) += 1;
      *agg
        .channel_dist
        .entry(r.perception_channel.as_str().to_owned())
        .or_insert(0) += 1;
      *agg
        .time_type_dist
        .entry(r.rating_time_type.as_str().to_owned())
        .or_insert(0) += 1;
      *agg
        .rule_knowledge_dist
        .entry(r.rule_knowledge.as_str().to_owned())
        .or_insert(0) += 1;
    }

    let n = ratings.len() as f64;
    agg.avg_decision = decision_sum as f64 / n;
    agg.avg_confidence = confidence_sum as f64 / n;
    agg
  }
}
