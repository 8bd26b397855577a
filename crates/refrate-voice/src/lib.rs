//! Voice-scene-draft extraction for refrate.
//!
//! Turns a free-text transcript of a spoken scene description (optionally
//! produced by an external speech-to-text command) into a structured
//! [`draft::VoiceSceneDraft`]: minute, stoppage time, scene type, and a
//! bilingual description. The pipeline is a cascade of deterministic text
//! transforms; nothing here touches persisted state.

pub mod classify;
pub mod draft;
pub mod error;
pub mod extract;
pub mod glossary;
pub mod minute;
pub mod normalize;
pub mod transcribe;
pub mod translate;

pub use draft::VoiceSceneDraft;
pub use error::{Error, Result};
pub use extract::{DraftRequest, Extractor, extract_draft};
pub use glossary::Glossary;
pub use normalize::Lang;
