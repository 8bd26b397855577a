//! Match — the fixture a scene belongs to.
//!
//! Matches are owned by the provider boundary (sync job or manual admin
//! entry); the rating core only reads their existence and team names. Once
//! scenes reference a match it is immutable except for matchday backfill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a match record in an external provider's fixture feed.
///
/// `(provider, external_id)` is unique in the store, so repeated provider
/// syncs update in place instead of duplicating fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
  /// Provider slug, e.g. `"openligadb"`.
  pub provider:    String,
  /// The match id within that provider's namespace.
  pub external_id: String,
}

/// A scheduled or played fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
  pub match_id:        Uuid,
  /// League code, e.g. `"BL1"`.
  pub league:          String,
  /// Season label, e.g. `"2025/26"`.
  pub season:          String,
  pub kickoff:         DateTime<Utc>,
  pub team_home:       String,
  pub team_away:       String,
  pub matchday_number: Option<u32>,
  pub matchday_name:   Option<String>,
  pub external_ref:    Option<ExternalRef>,
  pub created_at:      DateTime<Utc>,
}

impl Match {
  /// Whether `team` names one of the two sides of this match.
  /// Used to validate the optional favorite-team field on ratings.
  pub fn has_team(&self, team: &str) -> bool {
    team == self.team_home || team == self.team_away
  }
}

/// Input to [`crate::store::SceneStore::add_match`] and
/// [`crate::store::SceneStore::upsert_provider_match`].
/// `created_at` is always set by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
  pub league:          String,
  pub season:          String,
  pub kickoff:         DateTime<Utc>,
  pub team_home:       String,
  pub team_away:       String,
  pub matchday_number: Option<u32>,
  pub matchday_name:   Option<String>,
  pub external_ref:    Option<ExternalRef>,
}
