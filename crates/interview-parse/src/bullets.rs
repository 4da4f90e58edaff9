//! Bullet splitting for report sections.
//!
//! In the source PDFs every bullet opens with a short bold lead-in phrase
//! ("Speed of delivery: ...", "Clear communication - ..."), but the extracted
//! text has no delimiter between bullets. A lead-in is recognized by shape: a
//! capitalized phrase of 8–118 characters closed by `". "`, `": "` or a dash,
//! sitting at the start of the text or right after a sentence end. Phrases
//! whose first word only ever opens an ordinary sentence are rejected.
//!
//! The split is deterministic, not infallible. An ordinary sentence can look
//! like a lead-in and a real lead-in can start with a stoplisted word; both
//! are accepted behaviour. Text is never dropped wholesale: with no usable
//! boundary the whole section becomes one bullet.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::text::clean;

/// Fragments this short (in characters) are discarded, not kept as bullets.
pub const MIN_BULLET_CHARS: usize = 10;

/// Sentence end followed by optional closing quotes/brackets and a space.
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?]["')\]]* "#).unwrap());

/// Lead-in shape, anchored at a candidate position.
static LEAD_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}[^.:!?]{7,117}?(?:[.:]| ?-) ").unwrap());

/// Words that open sentence interiors in this corpus, never a lead-in.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "They", "And", "The", "But", "It", "We", "He", "She", "That", "This", "However",
        "Also", "Not", "For", "As", "If", "When", "Where", "While", "Although", "Because",
        "Since", "Or", "So", "Yet", "Both", "Each", "Over", "From", "With", "Into", "After",
        "Before", "Upon",
    ]
    .into_iter()
    .collect()
});

/// Split one section's text into bullets.
///
/// Empty input gives no bullets. Every bullet is longer than
/// [`MIN_BULLET_CHARS`] except one case: when nothing survives the split, the
/// whole cleaned section comes back as a single bullet, however short
/// (`"None."` stays `["None."]`).
pub fn split_bullets(section_text: &str) -> Vec<String> {
    let flat = clean(section_text);
    if flat.is_empty() {
        return Vec::new();
    }

    let splits = split_points(&flat);
    if splits.is_empty() {
        return vec![flat];
    }

    let mut bounds = Vec::with_capacity(splits.len() + 2);
    bounds.push(0);
    bounds.extend(splits);
    bounds.push(flat.len());

    let bullets: Vec<String> = bounds
        .windows(2)
        .map(|w| clean(&flat[w[0]..w[1]]))
        .filter(|b| b.chars().count() > MIN_BULLET_CHARS)
        .collect();

    if bullets.is_empty() {
        vec![flat]
    } else {
        bullets
    }
}

/// Byte offsets in `flat` where a new bullet starts. Offset 0 is never included.
pub fn split_points(flat: &str) -> Vec<usize> {
    let candidates = std::iter::once(0).chain(SENTENCE_END.find_iter(flat).map(|m| m.end()));

    let mut points: Vec<usize> = candidates
        .filter(|&pos| pos > 0 && pos < flat.len())
        .filter(|&pos| is_lead_in(&flat[pos..]))
        .collect();
    points.dedup();
    points
}

fn is_lead_in(rest: &str) -> bool {
    let Some(m) = LEAD_IN.find(rest) else {
        return false;
    };
    let first_word = m
        .as_str()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .next()
        .unwrap_or("");
    !STOPWORDS.contains(first_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_lead_ins() {
        let text = "Speed of delivery: The shortlist arrived within two weeks. \
                    Clear communication - Weekly updates kept everyone aligned.\n\
                    Deep market knowledge. Candidates were well briefed.";
        let bullets = split_bullets(text);
        assert_eq!(
            bullets,
            vec![
                "Speed of delivery: The shortlist arrived within two weeks.",
                "Clear communication - Weekly updates kept everyone aligned.",
                "Deep market knowledge. Candidates were well briefed.",
            ]
        );
    }

    #[test]
    fn test_stoplisted_sentence_does_not_split() {
        let text = "Strong partnership: The team felt heard. They responded within a day. \
                    And escalations were rare.";
        assert_eq!(split_bullets(text), vec![clean(text)]);
    }

    #[test]
    fn test_no_lead_in_keeps_whole_section() {
        let text = "overall a smooth process with no real issues to report";
        assert_eq!(split_bullets(text), vec![text.to_string()]);
    }

    #[test]
    fn test_short_fallback_still_kept() {
        assert_eq!(split_bullets("  None.  "), vec!["None."]);
        assert!(split_bullets(" \n ").is_empty());
    }

    #[test]
    fn test_short_fragments_dropped() {
        let text = "Go team. Fast turnaround: Offers went out in days.";
        let bullets = split_bullets(text);
        assert_eq!(bullets, vec!["Fast turnaround: Offers went out in days."]);
    }

    #[test]
    fn test_closing_quote_before_boundary() {
        let text = "They called it \"excellent.\" Onboarding support: Handled smoothly end to end.";
        let bullets = split_bullets(text);
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[1], "Onboarding support: Handled smoothly end to end.");
    }

    #[test]
    fn test_long_phrase_is_not_a_lead_in() {
        let long = format!("Intro sentence here. Alpha {} end. Next", "x".repeat(130));
        assert!(split_points(&clean(&long)).is_empty());
    }

    #[test]
    fn test_offset_zero_never_a_split_point() {
        let flat = "Speed of delivery: Great work overall.";
        assert!(split_points(flat).is_empty());
    }
}
