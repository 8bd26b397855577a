//! Error type for `refrate-voice`.
//!
//! Translation failures never appear here: the English description has a safe
//! fallback (the raw transcript), so the translator absorbs its own errors.

use refrate_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Neither a transcript nor audio was supplied.
  #[error("audio or transcript required")]
  EmptyTranscript,

  /// Audio was supplied but no speech-to-text command is configured.
  #[error("speech-to-text not configured; provide a transcript or set asr_cmd")]
  AsrNotConfigured,

  /// The configured speech-to-text command exited non-zero.
  #[error("speech-to-text failed: {0}")]
  AsrFailed(String),

  /// The configured speech-to-text command produced no usable output.
  #[error("speech-to-text returned an empty transcript")]
  AsrEmptyOutput,

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("glossary resource error: {0}")]
  GlossaryResource(#[from] serde_json::Error),

  #[error("glossary pattern error: {0}")]
  GlossaryPattern(#[from] regex::Error),
}

impl Classify for Error {
  fn kind(&self) -> Option<ErrorKind> {
    match self {
      Self::EmptyTranscript => Some(ErrorKind::InvalidArgument),
      Self::AsrNotConfigured => Some(ErrorKind::NotImplemented),
      Self::AsrFailed(_) | Self::AsrEmptyOutput => Some(ErrorKind::BadGateway),
      Self::Io(_) | Self::GlossaryResource(_) | Self::GlossaryPattern(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
