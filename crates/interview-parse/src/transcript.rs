//! Transcript parsing: header fields plus speaker-turn segmentation.
//!
//! Dialogue follows a `FULL TRANSCRIPT` marker. Each turn opens with a line
//! holding only a speaker label and an optional timestamp:
//!
//! ```text
//! Interviewer 1:53
//! Speaker 1 2:16
//! Speaker
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::fields::{extract_field, parse_score, split_client_field};
use crate::text::{clean, normalize_newlines, normalize_punctuation, to_iso_date};
use crate::types::{ParsedTranscriptDocument, TranscriptTurn};

static FULL_TRANSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)full[ \t]+transcript").unwrap());

/// A line that is exactly a speaker label with an optional `m:ss` / `h:mm:ss` stamp.
static SPEAKER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*((?:Interviewer|Speaker(?:[ \t]+\d+)?)(?:[ \t]+\d{1,2}:\d{2}(?::\d{2})?)?)[ \t]*$",
    )
    .unwrap()
});

/// Byte offset where dialogue starts: just past `FULL TRANSCRIPT`, or 0.
fn dialogue_start(text: &str) -> usize {
    FULL_TRANSCRIPT.find(text).map(|m| m.end()).unwrap_or(0)
}

/// Split transcript text into speaker turns, in source order.
///
/// Only text after the `FULL TRANSCRIPT` marker is considered (the whole text
/// when the marker is missing). Text before the first speaker line is not a
/// turn, and turns whose cleaned text is empty are dropped.
pub fn segment_turns(body: &str) -> Vec<TranscriptTurn> {
    let text = normalize_newlines(&normalize_punctuation(body));
    let dialogue = &text[dialogue_start(&text)..];

    let markers: Vec<(String, usize, usize)> = SPEAKER_LINE
        .captures_iter(dialogue)
        .filter_map(|cap| {
            let line = cap.get(0)?;
            let label = cap.get(1)?;
            Some((clean(label.as_str()), line.start(), line.end()))
        })
        .collect();

    let mut turns = Vec::with_capacity(markers.len());
    for (i, (speaker, _, text_start)) in markers.iter().enumerate() {
        let text_end = markers
            .get(i + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(dialogue.len());
        let turn_text = clean(&dialogue[*text_start..text_end]);
        if turn_text.is_empty() {
            continue;
        }
        turns.push(TranscriptTurn {
            speaker: speaker.clone(),
            text: turn_text,
        });
    }
    turns
}

/// Header region: everything before the dialogue marker, or before the first
/// speaker line when there is no marker.
fn header_region(text: &str) -> &str {
    if let Some(m) = FULL_TRANSCRIPT.find(text) {
        return &text[..m.start()];
    }
    match SPEAKER_LINE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Build a transcript record from extracted text. Never fails; missing
/// fields come back empty.
pub fn parse_transcript(text: &str) -> ParsedTranscriptDocument {
    let normalized = normalize_newlines(&normalize_punctuation(text));
    let header = header_region(&normalized);

    let client = split_client_field(&extract_field(header, "Client"));
    let project = extract_field(header, "Project");
    let interview_date = to_iso_date(&extract_field(header, "Interview Date"));
    let score = parse_score(&extract_field(header, "Score"))
        .or_else(|| parse_score(&extract_field(header, "NPS")));

    let turns = segment_turns(&normalized);
    let raw_text = turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker, t.text))
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        "Parsed transcript for {:?}: {} turns, date={:?}",
        client.name,
        turns.len(),
        interview_date
    );

    ParsedTranscriptDocument {
        client_name: client.name,
        client_title: client.title,
        company: client.company,
        project,
        interview_date,
        score,
        turns,
        raw_text,
    }
}
