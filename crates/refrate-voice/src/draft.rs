use refrate_core::scene::SceneType;
use serde::{Deserialize, Serialize};

/// A pre-filled scene form produced from a voice transcript. Every field is
/// a suggestion; the client is expected to let the user correct it before
/// the scene is actually created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoiceSceneDraft {
  pub transcript:     String,
  pub minute:         Option<u16>,
  pub stoppage_time:  Option<u16>,
  pub scene_type:     Option<SceneType>,
  pub description_de: String,
  pub description_en: String,
  /// Human-readable caveats, e.g. when no minute could be detected.
  pub notes:          Vec<String>,
}
