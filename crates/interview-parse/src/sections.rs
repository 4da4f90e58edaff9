//! Report section segmentation.
//!
//! A flat table of heading patterns. The first match of each heading marks
//! where its section begins; found headings are sorted by position and each
//! section runs up to the next found heading, so sections may appear in any
//! order or be missing entirely.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Known report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Overview,
    WhatWentWell,
    ChallengesPainPoints,
    GapsIdentified,
    KeyThemes,
    ActionsRecommendations,
    AdditionalInsight,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        Self::Overview,
        Self::WhatWentWell,
        Self::ChallengesPainPoints,
        Self::GapsIdentified,
        Self::KeyThemes,
        Self::ActionsRecommendations,
        Self::AdditionalInsight,
    ];

    /// Field name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::WhatWentWell => "whatWentWell",
            Self::ChallengesPainPoints => "challengesPainPoints",
            Self::GapsIdentified => "gapsIdentified",
            Self::KeyThemes => "keyThemes",
            Self::ActionsRecommendations => "actionsRecommendations",
            Self::AdditionalInsight => "additionalInsight",
        }
    }

    /// Whether the section holds bullets rather than a single paragraph.
    pub fn is_bulleted(&self) -> bool {
        !matches!(self, Self::Overview | Self::AdditionalInsight)
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading patterns, line-anchored. Multi-word headings tolerate a line break
/// or a slash between words ("Challenges/ Pain\nPoints"). Matching is
/// case-sensitive, Title Case or ALL CAPS, and the heading must end its line
/// or be followed by a colon, so wrapped prose ("key themes that recur") is
/// not taken for a heading.
static HEADINGS: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    let table: [(SectionKey, &str); 7] = [
        (SectionKey::Overview, r"Overview"),
        (SectionKey::WhatWentWell, r"What\s+Went\s+Well"),
        (
            SectionKey::ChallengesPainPoints,
            r"Challenges\s*(?:/|&|and)?\s*Pain\s*Points",
        ),
        (SectionKey::GapsIdentified, r"Gaps\s+Identified"),
        (SectionKey::KeyThemes, r"Key\s+Themes"),
        (
            SectionKey::ActionsRecommendations,
            r"Actions?\s*(?:/|&|and)?\s*Recommendations",
        ),
        (SectionKey::AdditionalInsight, r"Additional\s+Insights?"),
    ];
    table
        .into_iter()
        .map(|(key, heading)| {
            let pattern = format!(
                r"(?m)^[ \t]*(?:{}|{})[ \t]*(?::|$)",
                heading,
                upper_pattern(heading)
            );
            (key, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// ALL CAPS form of a heading pattern. Escape sequences (`\s`) are kept.
fn upper_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        out.push(if escaped { c } else { c.to_ascii_uppercase() });
        escaped = c == '\\' && !escaped;
    }
    out
}

/// Offsets of one section in the segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub key: SectionKey,
    /// Where the heading itself starts.
    pub heading_start: usize,
    /// Just past the heading; the section body starts here.
    pub start: usize,
    /// Start of the next found heading, or end of text.
    pub end: usize,
}

/// Locate every known heading and compute the body span of each.
///
/// Spans come back sorted by position. Consecutive spans tile the text:
/// each `end` is the next span's `heading_start`, the last `end` is `text.len()`.
pub fn section_spans(text: &str) -> Vec<SectionSpan> {
    let mut found: Vec<(SectionKey, usize, usize)> = HEADINGS
        .iter()
        .filter_map(|(key, re)| re.find(text).map(|m| (*key, m.start(), m.end())))
        .collect();
    found.sort_by_key(|&(_, start, _)| start);

    // A heading match inside another heading's match cannot start a section.
    let mut accepted: Vec<(SectionKey, usize, usize)> = Vec::with_capacity(found.len());
    for item in found {
        match accepted.last() {
            Some(&(_, _, prev_end)) if item.1 < prev_end => continue,
            _ => accepted.push(item),
        }
    }

    let mut spans = Vec::with_capacity(accepted.len());
    for (i, &(key, heading_start, start)) in accepted.iter().enumerate() {
        let end = accepted
            .get(i + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(text.len());
        spans.push(SectionSpan {
            key,
            heading_start,
            start,
            end,
        });
    }
    spans
}

/// Section key → raw section body. Headings not found have no entry.
pub fn segment(text: &str) -> HashMap<SectionKey, String> {
    split_report(text).1
}

/// Text before the first recognized heading (the document header, or the
/// whole text when no heading is present) and the section bodies, from a
/// single heading scan.
pub fn split_report(text: &str) -> (&str, HashMap<SectionKey, String>) {
    let spans = section_spans(text);
    let header = match spans.first() {
        Some(span) => &text[..span.heading_start],
        None => text,
    };
    let sections = spans
        .into_iter()
        .map(|span| (span.key, text[span.start..span.end].to_string()))
        .collect();
    (header, sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Header stuff\n\
        Overview\n\
        The search went well.\n\
        What Went Well\n\
        Speed: fast shortlist.\n\
        Challenges/ Pain\n\
        Points\n\
        Slow feedback loops.\n\
        Key Themes\n\
        Partnership.\n";

    #[test]
    fn test_segment_finds_headings() {
        let sections = segment(REPORT);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[&SectionKey::Overview].trim(), "The search went well.");
        assert_eq!(sections[&SectionKey::WhatWentWell].trim(), "Speed: fast shortlist.");
        assert_eq!(
            sections[&SectionKey::ChallengesPainPoints].trim(),
            "Slow feedback loops."
        );
        assert_eq!(sections[&SectionKey::KeyThemes].trim(), "Partnership.");
        assert!(!sections.contains_key(&SectionKey::GapsIdentified));
    }

    #[test]
    fn test_out_of_order_sections() {
        let text = "Key Themes\nTrust.\nOverview:\nSummary here.\n";
        let spans = section_spans(text);
        assert_eq!(spans[0].key, SectionKey::KeyThemes);
        assert_eq!(spans[1].key, SectionKey::Overview);
        let sections = segment(text);
        assert_eq!(sections[&SectionKey::KeyThemes].trim(), "Trust.");
        assert_eq!(sections[&SectionKey::Overview].trim(), "Summary here.");
    }

    #[test]
    fn test_spans_tile_the_text() {
        let spans = section_spans(REPORT);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].heading_start);
        }
        assert_eq!(spans.last().unwrap().end, REPORT.len());
    }

    #[test]
    fn test_split_report() {
        let (header, sections) = split_report(REPORT);
        assert_eq!(header, "Header stuff\n");
        assert_eq!(sections, segment(REPORT));
        assert_eq!(split_report("no headings"), ("no headings", HashMap::new()));
    }

    #[test]
    fn test_heading_must_start_a_line() {
        let text = "We gave an overview of the plan.\nThe key themes were clear.";
        assert!(segment(text).is_empty());
    }

    #[test]
    fn test_heading_phrase_in_wrapped_prose() {
        let text = "Overview\n\
            The conversation touched on several\n\
            key themes that recur below.\n\
            What Went Well\n\
            Speed: fast shortlist.\n\
            Key Themes that matter most\n\
            were listed in the deck.\n\
            Key Themes\n\
            Trust and candour: Valued throughout.\n";
        let sections = segment(text);
        assert_eq!(
            sections[&SectionKey::Overview].trim(),
            "The conversation touched on several\nkey themes that recur below."
        );
        assert_eq!(
            sections[&SectionKey::WhatWentWell].trim(),
            "Speed: fast shortlist.\nKey Themes that matter most\nwere listed in the deck."
        );
        assert_eq!(
            sections[&SectionKey::KeyThemes].trim(),
            "Trust and candour: Valued throughout."
        );
    }

    #[test]
    fn test_upper_pattern_keeps_escapes() {
        assert_eq!(upper_pattern(r"What\s+Went\s+Well"), r"WHAT\s+WENT\s+WELL");
        assert_eq!(upper_pattern(r"a\\b"), r"A\\B");
    }

    #[test]
    fn test_heading_variants() {
        let text = "ACTIONS & RECOMMENDATIONS\nDo more.\nAdditional Insights:  None.\nGAPS IDENTIFIED\n";
        let sections = segment(text);
        assert_eq!(sections[&SectionKey::ActionsRecommendations].trim(), "Do more.");
        assert_eq!(sections[&SectionKey::AdditionalInsight].trim(), "None.");
        assert_eq!(sections[&SectionKey::GapsIdentified].trim(), "");
        assert!(segment("key themes\nWhat went well\n").is_empty());
    }
}
