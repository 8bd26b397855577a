//! Minute detection.
//!
//! Works on folded transcripts (see [`crate::normalize::fold`]) and tries a
//! cascade of increasingly vague patterns. `N+M` short-circuits; a stoppage
//! keyword only fills the stoppage slot and the minute scan keeps going, so
//! "Minute 90, Nachspielzeit 3" yields both. Anything out of range falls
//! through to the next pattern instead of failing the whole extraction.

use once_cell::sync::Lazy;
use refrate_core::scene::{MINUTE_RANGE, STOPPAGE_RANGE};
use regex::Regex;

/// `90+3`, with optional spaces around the plus.
static PLUS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(\d{1,3})\s*\+\s*(\d{1,2})\b").unwrap());

/// Stoppage-time keyword near a number, either order.
static STOPPAGE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?:nachspielzeit|zusatzzeit|stoppage time|injury time)\D{0,12}?(\d{1,2})\b|\b(\d{1,2})\.?\s*minute\w*\s+(?:der\s+)?(?:nachspielzeit|zusatzzeit|stoppage time|injury time)",
  )
  .unwrap()
});

/// `minute: 45`, `min. 45`.
static MINUTE_PREFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\bmin(?:ute[n]?)?\.?\s*:?\s*(\d{1,3})\b").unwrap());

/// `45. minute`, `45 min.`.
static MINUTE_SUFFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(\d{1,3})\.?\s*min(?:ute[n]?)?\b").unwrap());

/// `in der 12.`, `in the 12th`.
static ORDINAL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\bin\s+(?:der|the)\s+(\d{1,3})(?:\.|st|nd|rd|th)?\b").unwrap()
});

static BARE_NUMBER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(\d{1,3})\b").unwrap());

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinuteGuess {
  pub minute:        Option<u16>,
  pub stoppage_time: Option<u16>,
}

fn in_range(value: u16, range: (i64, i64)) -> bool {
  let v = i64::from(value);
  v >= range.0 && v <= range.1
}

fn parse_group(m: Option<regex::Match<'_>>) -> Option<u16> {
  m.and_then(|m| m.as_str().parse().ok())
}

fn inside(span: Option<(usize, usize)>, start: usize, end: usize) -> bool {
  span.is_some_and(|(s, e)| start < e && end > s)
}

/// Scans a folded transcript for a match minute and optional stoppage time.
pub fn detect(folded: &str) -> MinuteGuess {
  if let Some(caps) = PLUS.captures(folded) {
    let minute = parse_group(caps.get(1));
    let stoppage = parse_group(caps.get(2));
    if let (Some(minute), Some(stoppage)) = (minute, stoppage) {
      if in_range(minute, MINUTE_RANGE) && in_range(stoppage, STOPPAGE_RANGE) {
        return MinuteGuess {
          minute:        Some(minute),
          stoppage_time: Some(stoppage),
        };
      }
    }
  }

  let mut stoppage_time = None;
  let mut stoppage_span = None;
  if let Some(caps) = STOPPAGE.captures(folded) {
    let n = parse_group(caps.get(1)).or_else(|| parse_group(caps.get(2)));
    if let Some(n) = n {
      if in_range(n, STOPPAGE_RANGE) {
        stoppage_time = Some(n);
        stoppage_span = caps.get(0).map(|m| (m.start(), m.end()));
      }
    }
  }

  // The minute scan skips any number inside the stoppage match, so the "3"
  // of "3. Minute der Nachspielzeit" is not also read as the match minute.
  for re in [&*MINUTE_PREFIX, &*MINUTE_SUFFIX, &*ORDINAL] {
    for caps in re.captures_iter(folded) {
      let Some(m) = caps.get(1) else { continue };
      if inside(stoppage_span, m.start(), m.end()) {
        continue;
      }
      if let Some(n) =
        m.as_str().parse().ok().filter(|&n| in_range(n, MINUTE_RANGE))
      {
        return MinuteGuess { minute: Some(n), stoppage_time };
      }
    }
  }

  // A bare number next to a stoppage keyword is the stoppage itself; only
  // fall back to it when no stoppage was named.
  if stoppage_time.is_none() {
    if let Some(n) =
      BARE_NUMBER.captures(folded).and_then(|c| parse_group(c.get(1)))
    {
      if in_range(n, MINUTE_RANGE) {
        return MinuteGuess {
          minute:        Some(n),
          stoppage_time: None,
        };
      }
    }
  }

  MinuteGuess { minute: None, stoppage_time }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn detect_raw(text: &str) -> MinuteGuess {
    detect(&crate::normalize::fold(text))
  }

  #[test]
  fn plus_notation_wins() {
    let guess = detect_raw("foul in 90+3, klare sache");
    assert_eq!(guess.minute, Some(90));
    assert_eq!(guess.stoppage_time, Some(3));
  }

  #[test]
  fn plus_notation_with_spaces() {
    let guess = detect_raw("45 + 2 handspiel im strafraum");
    assert_eq!(guess.minute, Some(45));
    assert_eq!(guess.stoppage_time, Some(2));
  }

  #[test]
  fn stoppage_keyword_without_base_minute() {
    let guess = detect_raw("Nachspielzeit 4, Elfmeter");
    assert_eq!(guess.minute, None);
    assert_eq!(guess.stoppage_time, Some(4));
  }

  #[test]
  fn stoppage_keyword_keeps_separate_minute() {
    let guess = detect_raw("Elfmeter in Minute 90, Nachspielzeit 3");
    assert_eq!(guess.minute, Some(90));
    assert_eq!(guess.stoppage_time, Some(3));
  }

  #[test]
  fn stoppage_number_is_not_reused_as_minute() {
    let guess = detect_raw("3. Minute der Nachspielzeit, Handspiel");
    assert_eq!(guess.minute, None);
    assert_eq!(guess.stoppage_time, Some(3));
  }

  #[test]
  fn minute_prefix_variant() {
    assert_eq!(detect_raw("Minute: 45, Abseits").minute, Some(45));
    assert_eq!(detect_raw("minute 7 gelbe karte").minute, Some(7));
  }

  #[test]
  fn minute_suffix_variant() {
    assert_eq!(detect_raw("Rote Karte in der 88. Minute").minute, Some(88));
  }

  #[test]
  fn abbreviated_min_variant() {
    assert_eq!(detect_raw("min. 19, Einwurf falsch").minute, Some(19));
    assert_eq!(detect_raw("Handspiel 72 min").minute, Some(72));
  }

  #[test]
  fn ordinal_variant() {
    assert_eq!(detect_raw("Tor in der 12.").minute, Some(12));
    assert_eq!(detect_raw("goal in the 73rd").minute, Some(73));
  }

  #[test]
  fn bare_number_fallback() {
    assert_eq!(detect_raw("12 abseits verpasst").minute, Some(12));
  }

  #[test]
  fn out_of_range_numbers_are_ignored() {
    let guess = detect_raw("spielernummer 250");
    assert_eq!(guess.minute, None);
    assert_eq!(guess.stoppage_time, None);
  }

  #[test]
  fn no_digits_yields_nothing() {
    assert_eq!(detect_raw("klares foul, keine karte"), MinuteGuess::default());
  }
}
