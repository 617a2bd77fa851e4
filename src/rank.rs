//! Rank label classification.
//!
//! Rank labels are free text such as `"SC - Section Chief"`. A label is
//! matched against a fixed marker table: the abbreviation must appear as a
//! whole token, or all of the marker's keywords anywhere in the label, both
//! case-insensitive.
//! The first matching marker decides both the tier and the sort order.

use std::cmp::Ordering;

use crate::model::entity::SeniorityTier;

/// Sort order for labels that match no marker.
pub const UNRANKED_ORDER: u32 = 999;

struct Marker {
    abbrev: &'static str,
    /// Every keyword must appear somewhere in the label.
    keywords: &'static [&'static str],
    /// The keywords only count when the label does not also contain this.
    unless: Option<&'static str>,
    tier: SeniorityTier,
    order: u32,
}

const fn marker(
    abbrev: &'static str,
    keywords: &'static [&'static str],
    unless: Option<&'static str>,
    tier: SeniorityTier,
    order: u32,
) -> Marker {
    Marker { abbrev, keywords, unless, tier, order }
}

static MARKERS: [Marker; 7] = [
    marker("mgr", &["manager"], None, SeniorityTier::HigherSenior, 1),
    marker("sc", &["section chief"], None, SeniorityTier::HigherSenior, 2),
    marker("ins", &["instructor"], None, SeniorityTier::HigherSenior, 3),
    marker("pur", &["purser"], None, SeniorityTier::HigherSenior, 4),
    marker("lfa", &["leading", "attendant"], None, SeniorityTier::Senior, 5),
    marker("stw", &["stewardess"], None, SeniorityTier::Junior, 6),
    marker("fa", &["attendant"], Some("leading"), SeniorityTier::Junior, 7),
];

impl Marker {
    fn matches(&self, label: &str, tokens: &[&str]) -> bool {
        if tokens.contains(&self.abbrev) {
            return true;
        }
        self.keywords.iter().all(|keyword| label.contains(keyword))
            && !self.unless.is_some_and(|word| label.contains(word))
    }
}

fn find_marker(label: &str) -> Option<&'static Marker> {
    let label = label.to_lowercase();
    let tokens: Vec<&str> = label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    MARKERS.iter().find(|marker| marker.matches(&label, &tokens))
}

pub fn classify_rank(label: &str) -> SeniorityTier {
    find_marker(label).map_or(SeniorityTier::Other, |marker| marker.tier)
}

/// Display and tie-break order for a rank label; lower is more senior.
pub fn rank_order(label: &str) -> u32 {
    find_marker(label).map_or(UNRANKED_ORDER, |marker| marker.order)
}

/// Compares identifiers so that embedded numbers sort by value
/// (`"C9" < "C10"`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (is_number(l), is_number(r)) {
            (true, true) => {
                let l = l.trim_start_matches('0');
                let r = r.trim_start_matches('0');
                l.len().cmp(&r.len()).then_with(|| l.cmp(r))
            }
            _ => l.cmp(r),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

fn is_number(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

/// Splits into alternating runs of ASCII digits and everything else.
fn chunks(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if prev.is_some_and(|p| p != digit) {
            out.push(&s[start..i]);
            start = i;
        }
        prev = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}
