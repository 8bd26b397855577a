//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enum fields are stored as
//! their SCREAMING_SNAKE_CASE wire tags. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use refrate_core::{
  matches::{ExternalRef, Match},
  rating::{PerceptionChannel, Rating, RatingTimeType, RuleKnowledge},
  scene::{Scene, SceneType},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SceneType ───────────────────────────────────────────────────────────────

pub fn encode_scene_type(t: SceneType) -> &'static str { t.as_str() }

/// The 26-variant taxonomy round-trips through serde instead of a hand-kept
/// match table; the wire tags are the serde tags.
pub fn decode_scene_type(s: &str) -> Result<SceneType> {
  serde_json::from_value(serde_json::Value::String(s.to_owned()))
    .map_err(|_| Error::Decode(format!("unknown scene type: {s:?}")))
}

// ─── Rating enums ────────────────────────────────────────────────────────────

pub fn decode_perception_channel(s: &str) -> Result<PerceptionChannel> {
  match s {
    "STADIUM" => Ok(PerceptionChannel::Stadium),
    "TV" => Ok(PerceptionChannel::Tv),
    "STREAM" => Ok(PerceptionChannel::Stream),
    "HIGHLIGHT" => Ok(PerceptionChannel::Highlight),
    other => Err(Error::Decode(format!("unknown perception channel: {other:?}"))),
  }
}

pub fn decode_rule_knowledge(s: &str) -> Result<RuleKnowledge> {
  match s {
    "LOW" => Ok(RuleKnowledge::Low),
    "MEDIUM" => Ok(RuleKnowledge::Medium),
    "HIGH" => Ok(RuleKnowledge::High),
    other => Err(Error::Decode(format!("unknown rule knowledge: {other:?}"))),
  }
}

pub fn decode_rating_time_type(s: &str) -> Result<RatingTimeType> {
  match s {
    "LIVE" => Ok(RatingTimeType::Live),
    "AFTER_REPLAY" => Ok(RatingTimeType::AfterReplay),
    "AFTER_VAR" => Ok(RatingTimeType::AfterVar),
    "LATER" => Ok(RatingTimeType::Later),
    other => Err(Error::Decode(format!("unknown rating time type: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `matches` row.
pub struct RawMatch {
  pub match_id:          String,
  pub league:            String,
  pub season:            String,
  pub kickoff:           String,
  pub team_home:         String,
  pub team_away:         String,
  pub matchday_number:   Option<i64>,
  pub matchday_name:     Option<String>,
  pub external_provider: Option<String>,
  pub external_match_id: Option<String>,
  pub created_at:        String,
}

impl RawMatch {
  /// SELECT column list matching the field order above.
  pub const COLUMNS: &'static str = "match_id, league, season, kickoff, \
     team_home, team_away, matchday_number, matchday_name, \
     external_provider, external_match_id, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      match_id:          row.get(0)?,
      league:            row.get(1)?,
      season:            row.get(2)?,
      kickoff:           row.get(3)?,
      team_home:         row.get(4)?,
      team_away:         row.get(5)?,
      matchday_number:   row.get(6)?,
      matchday_name:     row.get(7)?,
      external_provider: row.get(8)?,
      external_match_id: row.get(9)?,
      created_at:        row.get(10)?,
    })
  }

  pub fn into_match(self) -> Result<Match> {
    let external_ref = match (self.external_provider, self.external_match_id) {
      (Some(provider), Some(external_id)) => Some(ExternalRef { provider, external_id }),
      _ => None,
    };
    Ok(Match {
      match_id: decode_uuid(&self.match_id)?,
      league: self.league,
      season: self.season,
      kickoff: decode_dt(&self.kickoff)?,
      team_home: self.team_home,
      team_away: self.team_away,
      matchday_number: self.matchday_number.map(|n| n as u32),
      matchday_name: self.matchday_name,
      external_ref,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `scenes` row.
pub struct RawScene {
  pub scene_id:       String,
  pub match_id:       String,
  pub minute:         i64,
  pub stoppage_time:  Option<i64>,
  pub scene_type:     String,
  pub description_de: String,
  pub description_en: String,
  pub is_released:    bool,
  pub release_time:   Option<String>,
  pub is_locked:      bool,
  pub created_by:     Option<String>,
  pub created_at:     String,
}

impl RawScene {
  pub const COLUMNS: &'static str = "scene_id, match_id, minute, \
     stoppage_time, scene_type, description_de, description_en, is_released, \
     release_time, is_locked, created_by, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      scene_id:       row.get(0)?,
      match_id:       row.get(1)?,
      minute:         row.get(2)?,
      stoppage_time:  row.get(3)?,
      scene_type:     row.get(4)?,
      description_de: row.get(5)?,
      description_en: row.get(6)?,
      is_released:    row.get(7)?,
      release_time:   row.get(8)?,
      is_locked:      row.get(9)?,
      created_by:     row.get(10)?,
      created_at:     row.get(11)?,
    })
  }

  pub fn into_scene(self) -> Result<Scene> {
    Ok(Scene {
      scene_id: decode_uuid(&self.scene_id)?,
      match_id: decode_uuid(&self.match_id)?,
      minute: self.minute as u16,
      stoppage_time: self.stoppage_time.map(|n| n as u16),
      scene_type: decode_scene_type(&self.scene_type)?,
      description_de: self.description_de,
      description_en: self.description_en,
      is_released: self.is_released,
      release_time: self.release_time.as_deref().map(decode_dt).transpose()?,
      is_locked: self.is_locked,
      created_by: self.created_by.as_deref().map(decode_uuid).transpose()?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `ratings` row.
pub struct RawRating {
  pub rating_id:          String,
  pub scene_id:           String,
  pub user_id:            Option<String>,
  pub decision_score:     i64,
  pub confidence_score:   i64,
  pub perception_channel: String,
  pub rule_knowledge:     String,
  pub rating_time_type:   String,
  pub fav_team:           Option<String>,
  pub created_at:         String,
}

impl RawRating {
  pub const COLUMNS: &'static str = "rating_id, scene_id, user_id, \
     decision_score, confidence_score, perception_channel, rule_knowledge, \
     rating_time_type, fav_team, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      rating_id:          row.get(0)?,
      scene_id:           row.get(1)?,
      user_id:            row.get(2)?,
      decision_score:     row.get(3)?,
      confidence_score:   row.get(4)?,
      perception_channel: row.get(5)?,
      rule_knowledge:     row.get(6)?,
      rating_time_type:   row.get(7)?,
      fav_team:           row.get(8)?,
      created_at:         row.get(9)?,
    })
  }

  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      rating_id: decode_uuid(&self.rating_id)?,
      scene_id: decode_uuid(&self.scene_id)?,
      user_id: self.user_id.as_deref().map(decode_uuid).transpose()?,
      decision_score: self.decision_score as u8,
      confidence_score: self.confidence_score as u8,
      perception_channel: decode_perception_channel(&self.perception_channel)?,
      rule_knowledge: decode_rule_knowledge(&self.rule_knowledge)?,
      rating_time_type: decode_rating_time_type(&self.rating_time_type)?,
      fav_team: self.fav_team,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
