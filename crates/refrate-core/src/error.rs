//! Error taxonomy for `refrate-core`.
//!
//! Every recoverable failure in the system classifies into one of five
//! transport-facing kinds. Backends and the voice pipeline carry their own
//! error enums; the [`Classify`] trait lets generic callers (the API layer)
//! translate any of them without knowing the concrete type.

use thiserror::Error;
use uuid::Uuid;

/// The transport-facing classification of a failure.
///
/// The API layer maps these to HTTP status codes; the core only cares that
/// every recoverable failure lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A referenced scene, match, or rating does not exist.
  NotFound,
  /// A state invariant blocks the operation (locked, unreleased, duplicate).
  Conflict,
  /// A caller-supplied value fails a validation rule.
  InvalidArgument,
  /// An optional external capability is not configured.
  NotImplemented,
  /// A configured external dependency ran but failed.
  BadGateway,
}

/// Classification hook for error types across the workspace.
///
/// `None` means the failure is internal (storage fault, codec bug) and has no
/// client-facing kind.
pub trait Classify {
  fn kind(&self) -> Option<ErrorKind>;
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("scene not found: {0}")]
  SceneNotFound(Uuid),

  #[error("match not found: {0}")]
  MatchNotFound(Uuid),

  #[error("scene {0} is not released yet")]
  SceneNotReleased(Uuid),

  #[error("scene {0} is locked")]
  SceneLocked(Uuid),

  #[error("user {user_id} already rated scene {scene_id}")]
  AlreadyRated { scene_id: Uuid, user_id: Uuid },

  #[error("{field} must be between {min} and {max}, got {value}")]
  OutOfRange {
    field: &'static str,
    value: i64,
    min:   i64,
    max:   i64,
  },

  #[error("favorite team {given:?} is neither {home:?} nor {away:?}")]
  UnknownFavoriteTeam {
    given: String,
    home:  String,
    away:  String,
  },

  #[error("description must be between 3 and 1000 characters")]
  DescriptionLength,
}

impl Classify for Error {
  fn kind(&self) -> Option<ErrorKind> {
    match self {
      Self::SceneNotFound(_) | Self::MatchNotFound(_) => Some(ErrorKind::NotFound),
      Self::SceneNotReleased(_) | Self::SceneLocked(_) | Self::AlreadyRated { .. } => {
        Some(ErrorKind::Conflict)
      }
      Self::OutOfRange { .. }
      | Self::UnknownFavoriteTeam { .. }
      | Self::DescriptionLength => Some(ErrorKind::InvalidArgument),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
