//! Toll plaza and vehicle plate recovery from free-text line descriptions.
//!
//! Concession descriptions read like `PASAJE PEATONAL PEATONAL ABC123 1`: a
//! plaza phrase, the vehicle plate, and a trailing passage count. Matching is
//! layered: stage 1 splits phrase / plate / count, stage 2 reduces the phrase
//! to its final alphabetic word as the canonical plaza name. A description
//! that matches neither is simply not a toll passage.

use lazy_static::lazy_static;
use regex::Regex;

/// Label prefixed to every extracted plaza name.
pub const TOLL_LABEL: &str = "PEAJE";

lazy_static! {
    // Stage 1: non-digit plaza phrase, alphanumeric plate token, passage count.
    static ref TOLL_LINE: Regex =
        Regex::new(r"(?P<plaza>\D+)\s+(?P<plate>[A-Za-z0-9]+)\s+\d+").unwrap();

    // Stage 2: final alphabetic word of the plaza phrase.
    static ref FINAL_WORD: Regex = Regex::new(r"\s([A-Za-z]+)$").unwrap();
}

/// Result of a successful description match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TollMatch {
    /// Canonical plaza name, label-prefixed (`PEAJE PEATONAL`).
    pub toll_name: String,
    /// Vehicle plate as printed (`ABC123`).
    pub plate_number: String,
}

/// Run the layered matcher over one description.
///
/// Stage 2 falls back to the whole trimmed phrase when the phrase is a single
/// word or ends in something non-alphabetic.
pub fn match_description(description: &str) -> Option<TollMatch> {
    let caps = TOLL_LINE.captures(description)?;
    let phrase = caps.name("plaza")?.as_str().trim();
    let plate = caps.name("plate")?.as_str();
    if phrase.is_empty() {
        return None;
    }

    let name = FINAL_WORD
        .captures(phrase)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(phrase);

    Some(TollMatch {
        toll_name: format!("{TOLL_LABEL} {name}"),
        plate_number: plate.to_string(),
    })
}
