//! SQL schema for the refrate SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Two constraints carry core invariants rather than mere hygiene:
/// - `ratings`: `UNIQUE (scene_id, user_id)` is the race backstop for the
///   at-most-one-rating-per-user rule; the application pre-check alone is not
///   atomic against concurrent duplicate submissions.
/// - `scenes`: the CHECK ties `release_time` to `is_released` so an
///   unreleased scene can never carry a release stamp.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS matches (
    match_id          TEXT PRIMARY KEY,
    league            TEXT NOT NULL,
    season            TEXT NOT NULL,
    kickoff           TEXT NOT NULL,   -- ISO 8601 UTC
    team_home         TEXT NOT NULL,
    team_away         TEXT NOT NULL,
    matchday_number   INTEGER,
    matchday_name     TEXT,
    external_provider TEXT,            -- provider slug, NULL for manual entry
    external_match_id TEXT,
    created_at        TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS matches_external_idx
    ON matches(external_provider, external_match_id)
    WHERE external_provider IS NOT NULL;

CREATE TABLE IF NOT EXISTS scenes (
    scene_id       TEXT PRIMARY KEY,
    match_id       TEXT NOT NULL REFERENCES matches(match_id),
    minute         INTEGER NOT NULL,
    stoppage_time  INTEGER,
    scene_type     TEXT NOT NULL,      -- SceneType wire tag
    description_de TEXT NOT NULL,
    description_en TEXT NOT NULL,
    is_released    INTEGER NOT NULL DEFAULT 0,
    release_time   TEXT,
    is_locked      INTEGER NOT NULL DEFAULT 0,
    created_by     TEXT,
    created_at     TEXT NOT NULL,
    CHECK (is_released = 1 OR release_time IS NULL)
);

CREATE TABLE IF NOT EXISTS ratings (
    rating_id          TEXT PRIMARY KEY,
    scene_id           TEXT NOT NULL REFERENCES scenes(scene_id),
    user_id            TEXT,           -- NULL after user anonymization
    decision_score     INTEGER NOT NULL,
    confidence_score   INTEGER NOT NULL,
    perception_channel TEXT NOT NULL,
    rule_knowledge     TEXT NOT NULL,
    rating_time_type   TEXT NOT NULL,
    fav_team           TEXT,
    created_at         TEXT NOT NULL,
    UNIQUE (scene_id, user_id)
);

CREATE INDEX IF NOT EXISTS scenes_match_idx   ON scenes(match_id);
CREATE INDEX IF NOT EXISTS scenes_created_idx ON scenes(created_at);
CREATE INDEX IF NOT EXISTS ratings_scene_idx  ON ratings(scene_id);
CREATE INDEX IF NOT EXISTS ratings_user_idx   ON ratings(user_id);

PRAGMA user_version = 1;
";
