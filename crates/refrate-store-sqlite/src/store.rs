//! [`SqliteStore`] — the SQLite implementation of [`SceneStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use refrate_core::{
  aggregate::SceneAggregate,
  matches::{Match, NewMatch},
  rating::{NewRating, Rating},
  scene::{NewScene, Scene},
  store::{SceneQuery, SceneStore},
};

use crate::{
  Error, Result,
  encode::{RawMatch, RawRating, RawScene, encode_dt, encode_scene_type, encode_uuid},
  schema::SCHEMA,
};

// ─── Transaction outcomes ────────────────────────────────────────────────────
//
// Closures handed to `tokio_rusqlite` can only fail with database errors, so
// domain outcomes (not found, locked, duplicate) travel out as data and are
// mapped to errors on the async side.

enum SceneMutation {
  Applied(RawScene),
  Missing,
  Locked,
}

enum SceneDeletion {
  Deleted,
  Missing,
  Locked,
}

enum SubmitOutcome {
  Created,
  SceneMissing,
  NotReleased,
  Locked,
  BadFavTeam { home: String, away: String },
  Duplicate,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A refrate store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers (run inside the call closures) ──────────────────────────────

fn read_scene(
  conn: &rusqlite::Connection,
  id_str: &str,
) -> rusqlite::Result<Option<RawScene>> {
  conn
    .query_row(
      &format!("SELECT {} FROM scenes WHERE scene_id = ?1", RawScene::COLUMNS),
      rusqlite::params![id_str],
      RawScene::from_row,
    )
    .optional()
}

fn read_match(
  conn: &rusqlite::Connection,
  id_str: &str,
) -> rusqlite::Result<Option<RawMatch>> {
  conn
    .query_row(
      &format!("SELECT {} FROM matches WHERE match_id = ?1", RawMatch::COLUMNS),
      rusqlite::params![id_str],
      RawMatch::from_row,
    )
    .optional()
}

fn scene_exists(conn: &rusqlite::Connection, id_str: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM scenes WHERE scene_id = ?1",
        rusqlite::params![id_str],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── SceneStore impl ─────────────────────────────────────────────────────────

impl SceneStore for SqliteStore {
  type Error = Error;

  // ── Matches ───────────────────────────────────────────────────────────────

  async fn add_match(&self, input: NewMatch) -> Result<Match> {
    let m = Match {
      match_id:        Uuid::new_v4(),
      league:          input.league,
      season:          input.season,
      kickoff:         input.kickoff,
      team_home:       input.team_home,
      team_away:       input.team_away,
      matchday_number: input.matchday_number,
      matchday_name:   input.matchday_name,
      external_ref:    input.external_ref,
      created_at:      Utc::now(),
    };

    let id_str          = encode_uuid(m.match_id);
    let kickoff_str     = encode_dt(m.kickoff);
    let at_str          = encode_dt(m.created_at);
    let league          = m.league.clone();
    let season          = m.season.clone();
    let team_home       = m.team_home.clone();
    let team_away       = m.team_away.clone();
    let matchday_number = m.matchday_number;
    let matchday_name   = m.matchday_name.clone();
    let provider        = m.external_ref.as_ref().map(|r| r.provider.clone());
    let external_id     = m.external_ref.as_ref().map(|r| r.external_id.clone());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO matches (
             match_id, league, season, kickoff, team_home, team_away,
             matchday_number, matchday_name,
             external_provider, external_match_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            league,
            season,
            kickoff_str,
            team_home,
            team_away,
            matchday_number,
            matchday_name,
            provider,
            external_id,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(m)
  }

  async fn upsert_provider_match(&self, input: NewMatch) -> Result<Match> {
    let external = input.external_ref.clone().ok_or(Error::MissingExternalRef)?;

    let id_str      = encode_uuid(Uuid::new_v4());
    let kickoff_str = encode_dt(input.kickoff);
    let at_str      = encode_dt(Utc::now());

    let raw: RawMatch = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO matches (
             match_id, league, season, kickoff, team_home, team_away,
             matchday_number, matchday_name,
             external_provider, external_match_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
           ON CONFLICT (external_provider, external_match_id)
             WHERE external_provider IS NOT NULL
           DO UPDATE SET
             league          = excluded.league,
             season          = excluded.season,
             kickoff         = excluded.kickoff,
             team_home       = excluded.team_home,
             team_away       = excluded.team_away,
             matchday_number = excluded.matchday_number,
             matchday_name   = excluded.matchday_name",
          rusqlite::params![
            id_str,
            input.league,
            input.season,
            kickoff_str,
            input.team_home,
            input.team_away,
            input.matchday_number,
            input.matchday_name,
            external.provider,
            external.external_id,
            at_str,
          ],
        )?;

        // Re-read by external identity: on conflict the pre-existing row (and
        // its match_id) was updated, not the candidate row inserted.
        let raw = tx.query_row(
          &format!(
            "SELECT {} FROM matches
             WHERE external_provider = ?1 AND external_match_id = ?2",
            RawMatch::COLUMNS
          ),
          rusqlite::params![external.provider, external.external_id],
          RawMatch::from_row,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_match()
  }

  async fn get_match(&self, id: Uuid) -> Result<Option<Match>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(read_match(conn, &id_str)?)).await?;
    raw.map(RawMatch::into_match).transpose()
  }

  async fn list_matches(&self, limit: usize, offset: usize) -> Result<Vec<Match>> {
    let raws: Vec<RawMatch> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM matches ORDER BY kickoff DESC LIMIT ?1 OFFSET ?2",
          RawMatch::COLUMNS
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![limit as i64, offset as i64],
            RawMatch::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatch::into_match).collect()
  }

  async fn set_matchday(
    &self,
    id: Uuid,
    number: Option<u32>,
    name: Option<String>,
  ) -> Result<Match> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMatch> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE matches SET matchday_number = ?2, matchday_name = ?3
           WHERE match_id = ?1",
          rusqlite::params![id_str, number, name],
        )?;
        if n == 0 {
          return Ok(None);
        }
        let raw = read_match(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    match raw {
      Some(raw) => raw.into_match(),
      None => Err(refrate_core::Error::MatchNotFound(id).into()),
    }
  }

  // ── Scenes ────────────────────────────────────────────────────────────────

  async fn add_scene(&self, input: NewScene) -> Result<Scene> {
    input.validate().map_err(Error::Core)?;

    let scene = Scene {
      scene_id:       Uuid::new_v4(),
      match_id:       input.match_id,
      minute:         input.minute,
      stoppage_time:  input.stoppage_time,
      scene_type:     input.scene_type,
      description_de: input.description_de,
      description_en: input.description_en,
      is_released:    false,
      release_time:   None,
      is_locked:      false,
      created_by:     input.created_by,
      created_at:     Utc::now(),
    };

    let scene_id_str = encode_uuid(scene.scene_id);
    let match_id_str = encode_uuid(scene.match_id);
    let type_str     = encode_scene_type(scene.scene_type).to_owned();
    let by_str       = scene.created_by.map(encode_uuid);
    let at_str       = encode_dt(scene.created_at);
    let minute       = i64::from(scene.minute);
    let stoppage     = scene.stoppage_time.map(i64::from);
    let de           = scene.description_de.clone();
    let en           = scene.description_en.clone();

    let match_found: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let found: bool = tx
          .query_row(
            "SELECT 1 FROM matches WHERE match_id = ?1",
            rusqlite::params![match_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !found {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO scenes (
             scene_id, match_id, minute, stoppage_time, scene_type,
             description_de, description_en,
             is_released, release_time, is_locked, created_by, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, NULL, 0, ?8, ?9)",
          rusqlite::params![
            scene_id_str,
            match_id_str,
            minute,
            stoppage,
            type_str,
            de,
            en,
            by_str,
            at_str,
          ],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !match_found {
      return Err(refrate_core::Error::MatchNotFound(scene.match_id).into());
    }
    Ok(scene)
  }

  async fn get_scene(&self, id: Uuid) -> Result<Option<Scene>> {
    let id_str = encode_uuid(id);
    let raw = self.conn.call(move |conn| Ok(read_scene(conn, &id_str)?)).await?;
    raw.map(RawScene::into_scene).transpose()
  }

  async fn list_scenes(&self, query: SceneQuery) -> Result<Vec<Scene>> {
    let match_id_str = query.match_id.map(encode_uuid);
    let limit        = query.limit as i64;
    let offset       = query.offset as i64;

    let raws: Vec<RawScene> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(mid) = match_id_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scenes WHERE match_id = ?1
             ORDER BY created_at DESC LIMIT ?2 OFFSET ?3",
            RawScene::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![mid, limit, offset], RawScene::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scenes ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
            RawScene::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![limit, offset], RawScene::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawScene::into_scene).collect()
  }

  async fn release_scene(&self, id: Uuid) -> Result<Scene> {
    let id_str = encode_uuid(id);
    let now_str = encode_dt(Utc::now());

    let outcome: SceneMutation = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE scenes SET is_released = 1, release_time = ?2
           WHERE scene_id = ?1 AND is_locked = 0",
          rusqlite::params![id_str, now_str],
        )?;
        if n == 0 {
          // Diagnostic read in the same transaction: was the scene absent,
          // or present but locked? Reading outside the transaction could
          // attribute the failure wrongly under concurrent modification.
          return Ok(if scene_exists(&tx, &id_str)? {
            SceneMutation::Locked
          } else {
            SceneMutation::Missing
          });
        }
        let raw = read_scene(&tx, &id_str)?
          .map(SceneMutation::Applied)
          .unwrap_or(SceneMutation::Missing);
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    match outcome {
      SceneMutation::Applied(raw) => raw.into_scene(),
      SceneMutation::Missing => Err(refrate_core::Error::SceneNotFound(id).into()),
      SceneMutation::Locked => Err(refrate_core::Error::SceneLocked(id).into()),
    }
  }

  async fn unrelease_scene(&self, id: Uuid) -> Result<Scene> {
    let id_str = encode_uuid(id);

    let outcome: SceneMutation = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE scenes SET is_released = 0, release_time = NULL
           WHERE scene_id = ?1 AND is_locked = 0",
          rusqlite::params![id_str],
        )?;
        if n == 0 {
          return Ok(if scene_exists(&tx, &id_str)? {
            SceneMutation::Locked
          } else {
            SceneMutation::Missing
          });
        }
        let raw = read_scene(&tx, &id_str)?
          .map(SceneMutation::Applied)
          .unwrap_or(SceneMutation::Missing);
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    match outcome {
      SceneMutation::Applied(raw) => raw.into_scene(),
      SceneMutation::Missing => Err(refrate_core::Error::SceneNotFound(id).into()),
      SceneMutation::Locked => Err(refrate_core::Error::SceneLocked(id).into()),
    }
  }

  async fn lock_scene(&self, id: Uuid) -> Result<Scene> {
    self.set_locked(id, true).await
  }

  async fn unlock_scene(&self, id: Uuid) -> Result<Scene> {
    self.set_locked(id, false).await
  }

  async fn delete_scene(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let outcome: SceneDeletion = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // Ratings first; dropping the transaction rolls this back if the
        // scene turns out to be locked.
        tx.execute(
          "DELETE FROM ratings WHERE scene_id = ?1",
          rusqlite::params![id_str],
        )?;
        let n = tx.execute(
          "DELETE FROM scenes WHERE scene_id = ?1 AND is_locked = 0",
          rusqlite::params![id_str],
        )?;
        if n == 0 {
          return Ok(if scene_exists(&tx, &id_str)? {
            SceneDeletion::Locked
          } else {
            SceneDeletion::Missing
          });
        }
        tx.commit()?;
        Ok(SceneDeletion::Deleted)
      })
      .await?;

    match outcome {
      SceneDeletion::Deleted => Ok(()),
      SceneDeletion::Missing => Err(refrate_core::Error::SceneNotFound(id).into()),
      SceneDeletion::Locked => Err(refrate_core::Error::SceneLocked(id).into()),
    }
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  async fn submit_rating(&self, input: NewRating) -> Result<Rating> {
    input.validate().map_err(Error::Core)?;

    let rating = Rating {
      rating_id:          Uuid::new_v4(),
      scene_id:           input.scene_id,
      user_id:            Some(input.user_id),
      decision_score:     input.decision_score,
      confidence_score:   input.confidence_score,
      perception_channel: input.perception_channel,
      rule_knowledge:     input.rule_knowledge,
      rating_time_type:   input.rating_time_type,
      fav_team:           input.fav_team.clone(),
      created_at:         Utc::now(),
    };

    let rating_id_str = encode_uuid(rating.rating_id);
    let scene_id_str  = encode_uuid(rating.scene_id);
    let user_id_str   = encode_uuid(input.user_id);
    let at_str        = encode_dt(rating.created_at);
    let channel       = rating.perception_channel.as_str();
    let knowledge     = rating.rule_knowledge.as_str();
    let time_type     = rating.rating_time_type.as_str();
    let fav_team      = rating.fav_team.clone();
    let decision      = i64::from(rating.decision_score);
    let confidence    = i64::from(rating.confidence_score);

    let outcome: SubmitOutcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // 1–3: scene exists, released, unlocked — one snapshot.
        let scene: Option<(String, bool, bool)> = tx
          .query_row(
            "SELECT match_id, is_released, is_locked FROM scenes
             WHERE scene_id = ?1",
            rusqlite::params![scene_id_str],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
          )
          .optional()?;
        let (match_id_str, is_released, is_locked) = match scene {
          Some(s) => s,
          None => return Ok(SubmitOutcome::SceneMissing),
        };
        if !is_released {
          return Ok(SubmitOutcome::NotReleased);
        }
        if is_locked {
          return Ok(SubmitOutcome::Locked);
        }

        // 4: favorite team must name one of the two sides.
        if let Some(fav) = &fav_team {
          let (home, away): (String, String) = tx.query_row(
            "SELECT team_home, team_away FROM matches WHERE match_id = ?1",
            rusqlite::params![match_id_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )?;
          if *fav != home && *fav != away {
            return Ok(SubmitOutcome::BadFavTeam { home, away });
          }
        }

        // 5: optimistic pre-check for the fast, clear error path.
        let already: bool = tx
          .query_row(
            "SELECT 1 FROM ratings WHERE scene_id = ?1 AND user_id = ?2",
            rusqlite::params![scene_id_str, user_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if already {
          return Ok(SubmitOutcome::Duplicate);
        }

        // The UNIQUE (scene_id, user_id) constraint is the correctness
        // guarantee under concurrent duplicate submissions; a violation here
        // must surface as the same Conflict as the pre-check, never as an
        // internal error.
        let inserted = tx.execute(
          "INSERT INTO ratings (
             rating_id, scene_id, user_id, decision_score, confidence_score,
             perception_channel, rule_knowledge, rating_time_type,
             fav_team, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            rating_id_str,
            scene_id_str,
            user_id_str,
            decision,
            confidence,
            channel,
            knowledge,
            time_type,
            fav_team,
            at_str,
          ],
        );
        match inserted {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => return Ok(SubmitOutcome::Duplicate),
          Err(e) => return Err(e.into()),
        }

        tx.commit()?;
        Ok(SubmitOutcome::Created)
      })
      .await?;

    match outcome {
      SubmitOutcome::Created => Ok(rating),
      SubmitOutcome::SceneMissing => {
        Err(refrate_core::Error::SceneNotFound(input.scene_id).into())
      }
      SubmitOutcome::NotReleased => {
        Err(refrate_core::Error::SceneNotReleased(input.scene_id).into())
      }
      SubmitOutcome::Locked => {
        Err(refrate_core::Error::SceneLocked(input.scene_id).into())
      }
      SubmitOutcome::BadFavTeam { home, away } => {
        Err(
          refrate_core::Error::UnknownFavoriteTeam {
            given: input.fav_team.unwrap_or_default(),
            home,
            away,
          }
          .into(),
        )
      }
      SubmitOutcome::Duplicate => {
        Err(
          refrate_core::Error::AlreadyRated {
            scene_id: input.scene_id,
            user_id:  input.user_id,
          }
          .into(),
        )
      }
    }
  }

  async fn list_ratings(
    &self,
    scene_id: Option<Uuid>,
    limit: usize,
  ) -> Result<Vec<Rating>> {
    let scene_id_str = scene_id.map(encode_uuid);
    let limit = limit as i64;

    let raws: Vec<RawRating> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(sid) = scene_id_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM ratings WHERE scene_id = ?1
             ORDER BY created_at DESC LIMIT ?2",
            RawRating::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![sid, limit], RawRating::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM ratings ORDER BY created_at DESC LIMIT ?1",
            RawRating::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![limit], RawRating::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRating::into_rating).collect()
  }

  async fn anonymize_user(&self, user_id: Uuid) -> Result<u64> {
    let user_id_str = encode_uuid(user_id);
    let touched = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE ratings SET user_id = NULL WHERE user_id = ?1",
          rusqlite::params![user_id_str],
        )?;
        Ok(n as u64)
      })
      .await?;
    Ok(touched)
  }

  // ── Aggregation ───────────────────────────────────────────────────────────

  async fn aggregate(&self, scene_id: Uuid) -> Result<SceneAggregate> {
    let id_str = encode_uuid(scene_id);

    // Existence check and rating scan share one transaction so the count and
    // the means are computed from the same snapshot of the rating set.
    let raws: Option<Vec<RawRating>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !scene_exists(&tx, &id_str)? {
          return Ok(None);
        }
        let mut stmt = tx.prepare(&format!(
          "SELECT {} FROM ratings WHERE scene_id = ?1",
          RawRating::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawRating::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);
        tx.commit()?;
        Ok(Some(rows))
      })
      .await?;

    let raws = raws.ok_or(refrate_core::Error::SceneNotFound(scene_id))?;
    let ratings = raws
      .into_iter()
      .map(RawRating::into_rating)
      .collect::<Result<Vec<_>>>()?;

    Ok(SceneAggregate::compute(scene_id, &ratings))
  }
}

// ─── Private helpers ─────────────────────────────────────────────────────────

impl SqliteStore {
  /// Shared body of `lock_scene` / `unlock_scene`: always permitted on an
  /// existing scene, whatever its release or lock state.
  async fn set_locked(&self, id: Uuid, locked: bool) -> Result<Scene> {
    let id_str = encode_uuid(id);
    let flag = i64::from(locked);

    let raw: Option<RawScene> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE scenes SET is_locked = ?2 WHERE scene_id = ?1",
          rusqlite::params![id_str, flag],
        )?;
        if n == 0 {
          return Ok(None);
        }
        let raw = read_scene(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    match raw {
      Some(raw) => raw.into_scene(),
      None => Err(refrate_core::Error::SceneNotFound(id).into()),
    }
  }
}
