//! Transcript normalization shared by the whole pipeline.

use serde::{Deserialize, Serialize};

/// Transcript language. Anything that is not English is treated as German,
/// which is the primary dialect of the user base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  #[default]
  De,
  En,
}

impl Lang {
  /// Picks a language from a BCP-47-ish tag such as `"de-DE"` or `"en"`.
  pub fn from_tag(tag: &str) -> Self {
    if tag.trim().to_ascii_lowercase().starts_with("en") {
      Lang::En
    } else {
      Lang::De
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Lang::De => "de",
      Lang::En => "en",
    }
  }
}

/// Lowercases and folds German diacritics the way speech-to-text output is
/// commonly spelled when umlaut keys are unavailable. Keyword tables match
/// against this folded form only.
pub fn fold(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      'ä' | 'Ä' => out.push_str("ae"),
      'ö' | 'Ö' => out.push_str("oe"),
      'ü' | 'Ü' => out.push_str("ue"),
      'ß' => out.push_str("ss"),
      _ => out.extend(ch.to_lowercase()),
    }
  }
  out
}

/// Collapses runs of whitespace and trims. Applied to transcripts before any
/// matching so regexes can rely on single spaces.
pub fn tidy(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn folds_umlauts_and_eszett() {
    assert_eq!(fold("Strafstoß für Köln"), "strafstoss fuer koeln");
    assert_eq!(fold("ÄÖÜ"), "aeoeue");
  }

  #[test]
  fn tidy_collapses_whitespace() {
    assert_eq!(tidy("  foul \n im   strafraum "), "foul im strafraum");
  }

  #[test]
  fn lang_tag_defaults_to_german() {
    assert_eq!(Lang::from_tag("en-US"), Lang::En);
    assert_eq!(Lang::from_tag("de"), Lang::De);
    assert_eq!(Lang::from_tag(""), Lang::De);
    assert_eq!(Lang::from_tag("fr"), Lang::De);
  }
}
