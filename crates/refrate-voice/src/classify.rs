//! Keyword-based scene-type classification.
//!
//! The table is ordered from most to least specific and the first entry with
//! a matching phrase wins, so overturned penalties are checked before plain
//! penalties and second yellows before yellow cards. All phrases are in
//! folded form (see [`crate::normalize::fold`]).

use refrate_core::scene::SceneType;

type Entry = (SceneType, &'static [&'static str]);

#[rustfmt::skip]
const KEYWORDS: &[Entry] = &[
  (SceneType::PenaltyOverturned, &[
    "elfmeter zurueck", "elfmeter zurueckgenommen", "penalty overturned",
    "kein elfmeter", "no penalty",
  ]),
  (SceneType::PenaltyReview, &[
    "elfmeter-check", "elfmeter check", "penalty review",
  ]),
  (SceneType::Penalty, &["elfmeter", "strafstoss", "penalty"]),
  (SceneType::SecondYellow, &[
    "gelb-rot", "gelb rot", "ampelkarte", "zweite gelbe", "second yellow",
  ]),
  (SceneType::RedCard, &[
    "rote karte", "rot fuer", "platzverweis", "red card",
  ]),
  (SceneType::YellowCard, &[
    "gelbe karte", "gelb fuer", "verwarnung", "yellow card",
  ]),
  (SceneType::OffsideGoal, &[
    "abseitstor", "tor aus abseits", "offside goal",
  ]),
  (SceneType::GoalDisallowed, &[
    "aberkannt", "aberkanntes tor", "tor zaehlt nicht", "kein tor",
    "disallowed goal", "goal disallowed",
  ]),
  (SceneType::VarDecision, &[
    "var-entscheidung", "var entscheidung", "var decision",
  ]),
  (SceneType::VarReview, &[
    "var-check", "var check", "var review", "videobeweis", "video review",
  ]),
  (SceneType::DeniedGoalscoringOpportunity, &[
    "notbremse", "dogso", "nudbremser",
  ]),
  (SceneType::Handball, &["handspiel", "handball"]),
  (SceneType::IndirectFreeKick, &[
    "indirekter freistoss", "indirect free kick",
  ]),
  (SceneType::FreeKick, &["freistoss", "free kick"]),
  (SceneType::DropBall, &["schiedsrichterball", "drop ball"]),
  (SceneType::Foul, &["foul", "gefoult"]),
  (SceneType::Offside, &["abseits", "offside"]),
  (SceneType::InjuryStoppage, &[
    "verletzung", "verletzt", "behandlungspause", "injury",
  ]),
  (SceneType::Substitution, &[
    "auswechslung", "wechsel", "eingewechselt", "substitution",
  ]),
  (SceneType::TimeWasting, &["zeitspiel", "time wasting"]),
  (SceneType::Dissent, &["meckern", "reklamieren", "dissent"]),
  (SceneType::Corner, &["eckball", "ecke", "corner"]),
  (SceneType::GoalKick, &["abstoss", "goal kick"]),
  (SceneType::ThrowIn, &["einwurf", "throw-in", "throw in"]),
  (SceneType::Goal, &["tor", "treffer", "goal"]),
];

/// Whole-word phrase search, so "tor" matches neither "torwart" nor "motor".
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
  let mut from = 0;
  while let Some(pos) = haystack[from..].find(phrase) {
    let at = from + pos;
    let end = at + phrase.len();
    let before_ok =
      haystack[..at].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
    let after_ok =
      haystack[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
    if before_ok && after_ok {
      return true;
    }
    from = at + 1;
  }
  false
}

/// Classifies a folded transcript. Returns `None` when nothing in the table
/// matches; the draft then carries no scene-type suggestion at all rather
/// than a misleading `Other`.
pub fn detect(folded: &str) -> Option<SceneType> {
  KEYWORDS
    .iter()
    .find(|(_, phrases)| phrases.iter().any(|p| contains_phrase(folded, p)))
    .map(|(scene_type, _)| *scene_type)
}
