//! Optional machine translation of the German description.
//!
//! Translation is best-effort: any failure (network, HTTP status, shape of
//! the response) is logged and absorbed, and the caller falls back to the
//! raw transcript. A scene draft is never rejected because a translation
//! service is down.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Corrections for systematic mistranslations of football jargon seen in the
/// wild. Applied after the glossary pass, case-insensitively.
const FIXUPS: &[(&str, &str)] = &[
  ("red map", "red card"),
  ("yellow map", "yellow card"),
  ("nudbremser", "DOGSO"),
  ("emergency brake", "DOGSO"),
];

#[derive(Serialize)]
struct TranslateRequest<'a> {
  q:      &'a str,
  source: &'a str,
  target: &'a str,
  format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
  #[serde(rename = "translatedText")]
  translated_text: String,
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct Translator {
  client: reqwest::Client,
  url:    String,
}

const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);

impl Translator {
  pub fn new(url: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), url: url.into() }
  }

  /// Translates `text`, returning `None` on any failure.
  pub async fn translate(
    &self,
    text: &str,
    source: &str,
    target: &str,
  ) -> Option<String> {
    let request = TranslateRequest { q: text, source, target, format: "text" };
    let response = match self
      .client
      .post(&self.url)
      .timeout(TRANSLATE_TIMEOUT)
      .json(&request)
      .send()
      .await
    {
      Ok(r) => r,
      Err(err) => {
        debug!(%err, "translation request failed");
        return None;
      }
    };
    if !response.status().is_success() {
      debug!(status = %response.status(), "translation returned an error");
      return None;
    }
    match response.json::<TranslateResponse>().await {
      Ok(body) if !body.translated_text.trim().is_empty() => {
        Some(body.translated_text)
      }
      Ok(_) => {
        debug!("translation returned empty text");
        None
      }
      Err(err) => {
        debug!(%err, "translation response malformed");
        None
      }
    }
  }
}

static FIXUP_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
  FIXUPS
    .iter()
    .map(|(wrong, right)| {
      let pattern = format!(r"(?i)\b{}\b", regex::escape(wrong));
      // Patterns are static and escaped, so compilation cannot fail.
      (Regex::new(&pattern).unwrap(), *right)
    })
    .collect()
});

/// Applies the hard-coded fixups to a translated English description.
pub fn post_translate_fix(text: &str) -> String {
  let mut out = text.to_string();
  for (pattern, right) in FIXUP_RULES.iter() {
    out = pattern.replace_all(&out, *right).into_owned();
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fixes_known_mistranslations() {
    assert_eq!(
      post_translate_fix("clear Red Map for the defender"),
      "clear red card for the defender"
    );
    assert_eq!(
      post_translate_fix("that was a Nudbremser"),
      "that was a DOGSO"
    );
  }

  #[test]
  fn leaves_clean_text_alone() {
    assert_eq!(
      post_translate_fix("penalty after a handball"),
      "penalty after a handball"
    );
  }
}
