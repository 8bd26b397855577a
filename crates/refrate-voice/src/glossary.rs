//! Bilingual football-term glossary.
//!
//! Terms live in two locale files keyed by a shared identifier; only keys
//! present in both files become glossary entries. Each entry compiles to a
//! case-insensitive whole-word pattern that also matches the diacritic-folded
//! spelling and tolerates space/hyphen variation ("VAR Check", "VAR-Check").

use std::collections::BTreeMap;

use regex::Regex;
use serde::Deserialize;

use crate::{error::Result, normalize};

const TERMS_DE: &str = include_str!("../resources/football_terms.de.json");
const TERMS_EN: &str = include_str!("../resources/football_terms.en.json");

#[derive(Deserialize)]
struct LocaleFile {
  football: BTreeMap<String, String>,
}

struct Rule {
  pattern:     Regex,
  replacement: String,
}

pub struct Glossary {
  /// German-term patterns, longest source term first.
  de_to_en: Vec<Rule>,
  /// English-term patterns, longest source term first.
  en_to_de: Vec<Rule>,
}

/// Turns a term into a whole-word pattern matching both its original and
/// folded spellings, with any run of spaces/hyphens between words.
fn flex_pattern(term: &str) -> Result<Regex> {
  let flex = |t: &str| {
    let mut out = String::new();
    for ch in t.chars() {
      if ch == ' ' || ch == '-' {
        if !out.ends_with("[\\s\\-]+") {
          out.push_str("[\\s\\-]+");
        }
      } else {
        out.push_str(&regex::escape(&ch.to_string()));
      }
    }
    out
  };
  let orig = flex(term);
  let folded = flex(&normalize::fold(term));
  let pattern = if orig == folded {
    format!(r"(?i)\b{orig}\b")
  } else {
    format!(r"(?i)\b(?:{orig}|{folded})\b")
  };
  Ok(Regex::new(&pattern)?)
}

fn build_rules(pairs: &[(&str, &str)]) -> Result<Vec<Rule>> {
  let mut sorted: Vec<_> = pairs.to_vec();
  sorted.sort_by_key(|(from, _)| std::cmp::Reverse(from.chars().count()));
  sorted
    .into_iter()
    .map(|(from, to)| {
      Ok(Rule { pattern: flex_pattern(from)?, replacement: to.to_string() })
    })
    .collect()
}

impl Glossary {
  /// Builds the glossary from the embedded locale files.
  pub fn embedded() -> Result<Self> {
    let de: LocaleFile = serde_json::from_str(TERMS_DE)?;
    let en: LocaleFile = serde_json::from_str(TERMS_EN)?;

    let mut pairs = Vec::new();
    for (key, term_de) in &de.football {
      if let Some(term_en) = en.football.get(key) {
        pairs.push((term_de.as_str(), term_en.as_str()));
      }
    }

    let de_to_en = build_rules(&pairs)?;
    let flipped: Vec<_> = pairs.iter().map(|(d, e)| (*e, *d)).collect();
    let en_to_de = build_rules(&flipped)?;

    Ok(Self { de_to_en, en_to_de })
  }

  fn apply(rules: &[Rule], text: &str) -> String {
    let mut out = text.to_string();
    for rule in rules {
      out = rule.pattern.replace_all(&out, rule.replacement.as_str()).into_owned();
    }
    out
  }

  /// Replaces German football terms with their English equivalents. Used to
  /// repair machine-translated descriptions that left terms untranslated or
  /// translated them literally.
  pub fn anglicize(&self, text: &str) -> String {
    Self::apply(&self.de_to_en, text)
  }

  /// Replaces English football terms with their German equivalents, for
  /// transcripts dictated in English but stored with a German description.
  pub fn germanize(&self, text: &str) -> String {
    Self::apply(&self.en_to_de, text)
  }
}
