//! The extraction pipeline itself.
//!
//! [`extract_draft`] is the pure core: transcript in, draft out, no IO. The
//! [`Extractor`] wraps it with the optional IO stages (speech-to-text when
//! only audio was supplied, machine translation of the description).

use tracing::info;

use crate::{
  classify,
  draft::VoiceSceneDraft,
  error::{Error, Result},
  glossary::Glossary,
  minute,
  normalize::{self, Lang},
  transcribe::Transcriber,
  translate::{self, Translator},
};

pub const MINUTE_NOT_DETECTED: &str = "Minute not detected; please verify.";

/// Builds a scene draft from a transcript. Deterministic and infallible:
/// whatever cannot be detected is simply left unset, with a note where the
/// user should double-check.
pub fn extract_draft(transcript: &str, glossary: &Glossary) -> VoiceSceneDraft {
  let transcript = normalize::tidy(transcript);
  let folded = normalize::fold(&transcript);

  let guess = minute::detect(&folded);
  let scene_type = classify::detect(&folded);

  // The German description always gets the glossary pass so terms dictated
  // in English land in their canonical German form. Translation (if
  // configured) later replaces the description not in the transcript's
  // language.
  let description_de = glossary.germanize(&transcript);
  let description_en = transcript.clone();

  // A stoppage time alone is not enough; the scene still needs a minute.
  let mut notes = Vec::new();
  if guess.minute.is_none() {
    notes.push(MINUTE_NOT_DETECTED.to_string());
  }

  VoiceSceneDraft {
    transcript,
    minute: guess.minute,
    stoppage_time: guess.stoppage_time,
    scene_type,
    description_de,
    description_en,
    notes,
  }
}

/// Input to [`Extractor::draft`]. Either `transcript` or `audio` must be
/// present; a transcript takes precedence when both are.
#[derive(Debug, Default)]
pub struct DraftRequest {
  pub transcript: Option<String>,
  pub audio:      Option<Vec<u8>>,
  pub lang:       Lang,
}

pub struct Extractor {
  glossary:    Glossary,
  translator:  Option<Translator>,
  transcriber: Option<Transcriber>,
}

impl Extractor {
  pub fn new(
    glossary: Glossary,
    translator: Option<Translator>,
    transcriber: Option<Transcriber>,
  ) -> Self {
    Self { glossary, translator, transcriber }
  }

  async fn obtain_transcript(&self, request: &DraftRequest) -> Result<String> {
    if let Some(t) = &request.transcript {
      if !t.trim().is_empty() {
        return Ok(t.clone());
      }
    }
    match &request.audio {
      Some(audio) if !audio.is_empty() => match &self.transcriber {
        Some(transcriber) => transcriber.transcribe(audio, request.lang).await,
        None => Err(Error::AsrNotConfigured),
      },
      _ => Err(Error::EmptyTranscript),
    }
  }

  /// Runs the full pipeline for one request.
  pub async fn draft(&self, request: DraftRequest) -> Result<VoiceSceneDraft> {
    let transcript = self.obtain_transcript(&request).await?;
    let mut draft = extract_draft(&transcript, &self.glossary);

    if let Some(translator) = &self.translator {
      match request.lang {
        Lang::De => {
          // Anglicize first so football jargon reaches the translator
          // pre-resolved; fix its known mistranslations afterwards.
          let source = self.glossary.anglicize(&draft.description_de);
          if let Some(en) = translator.translate(&source, "de", "en").await {
            draft.description_en = translate::post_translate_fix(&en);
          }
        }
        Lang::En => {
          if let Some(de) =
            translator.translate(&draft.description_en, "en", "de").await
          {
            draft.description_de = self.glossary.germanize(&de);
          }
        }
      }
    }

    info!(
      minute = ?draft.minute,
      scene_type = ?draft.scene_type,
      "extracted scene draft"
    );
    Ok(draft)
  }
}

#[cfg(test)]
mod tests {
  use refrate_core::scene::SceneType;

  use super::*;

  fn glossary() -> Glossary {
    Glossary::embedded().unwrap()
  }

  #[test]
  fn plus_notation_fills_minute_and_stoppage() {
    let d = extract_draft("Foul im Strafraum, 90+3", &glossary());
    assert_eq!(d.minute, Some(90));
    assert_eq!(d.stoppage_time, Some(3));
    assert_eq!(d.scene_type, Some(SceneType::Foul));
    assert!(d.notes.is_empty());
  }

  #[test]
  fn minute_prefix_is_detected() {
    let d = extract_draft("Minute: 45, Abseits verpasst", &glossary());
    assert_eq!(d.minute, Some(45));
    assert_eq!(d.stoppage_time, None);
    assert_eq!(d.scene_type, Some(SceneType::Offside));
  }

  #[test]
  fn ordinal_phrase_is_detected() {
    let d = extract_draft("Tor in der 12.", &glossary());
    assert_eq!(d.minute, Some(12));
    assert_eq!(d.scene_type, Some(SceneType::Goal));
  }

  #[test]
  fn missing_minute_adds_a_note() {
    let d = extract_draft("klares Handspiel im Strafraum", &glossary());
    assert_eq!(d.minute, None);
    assert_eq!(d.notes, vec![MINUTE_NOT_DETECTED.to_string()]);
    assert_eq!(d.scene_type, Some(SceneType::Handball));
  }

  #[test]
  fn stoppage_alone_still_notes_the_missing_minute() {
    let d = extract_draft("Nachspielzeit 4, Elfmeter", &glossary());
    assert_eq!(d.minute, None);
    assert_eq!(d.stoppage_time, Some(4));
    assert_eq!(d.notes, vec![MINUTE_NOT_DETECTED.to_string()]);
  }

  #[test]
  fn overturned_penalty_is_not_a_penalty() {
    let d = extract_draft("Elfmeter zurück nach VAR, Minute 67", &glossary());
    assert_eq!(d.scene_type, Some(SceneType::PenaltyOverturned));
    assert_eq!(d.minute, Some(67));
  }

  #[test]
  fn descriptions_default_to_the_transcript() {
    let d = extract_draft("Eckball in der 30. Minute", &glossary());
    assert_eq!(d.description_de, "Eckball in der 30. Minute");
    assert_eq!(d.description_en, "Eckball in der 30. Minute");
  }

  #[test]
  fn english_transcript_keeps_english_description() {
    let d = extract_draft("red card in the 55th", &glossary());
    assert_eq!(d.scene_type, Some(SceneType::RedCard));
    assert_eq!(d.minute, Some(55));
    assert_eq!(d.description_en, "red card in the 55th");
    assert_eq!(d.description_de, "Rote Karte in the 55th");
  }

  #[tokio::test]
  async fn empty_request_is_invalid() {
    let extractor = Extractor::new(glossary(), None, None);
    let err = extractor.draft(DraftRequest::default()).await.unwrap_err();
    assert!(matches!(err, Error::EmptyTranscript));
  }

  #[tokio::test]
  async fn audio_without_asr_is_not_implemented() {
    let extractor = Extractor::new(glossary(), None, None);
    let request = DraftRequest {
      audio: Some(vec![1, 2, 3]),
      ..DraftRequest::default()
    };
    let err = extractor.draft(request).await.unwrap_err();
    assert!(matches!(err, Error::AsrNotConfigured));
  }

  #[tokio::test]
  async fn transcript_bypasses_asr() {
    let extractor = Extractor::new(glossary(), None, None);
    let request = DraftRequest {
      transcript: Some("Elfmeter in der 80. Minute".into()),
      audio: Some(vec![1, 2, 3]),
      lang: Lang::De,
    };
    let draft = extractor.draft(request).await.unwrap();
    assert_eq!(draft.scene_type, Some(SceneType::Penalty));
    assert_eq!(draft.minute, Some(80));
  }
}
