//! Index chunks for the retrieval/embedding collaborator.
//!
//! Every bullet and every transcript turn is one atomic chunk; paragraphs
//! (overview, additional insight) are one chunk each. Nothing is re-split.

use serde::Serialize;

use crate::ingest::{DocumentKind, InterviewRecord, ParsedDocument};
use interview_parse::SectionKey;

/// Section label used for transcript turns.
pub const TURN_SECTION: &str = "turn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexChunk {
    pub interview_id: String,
    pub kind: DocumentKind,
    /// Section key (`whatWentWell`, ...) or `turn`.
    pub section: String,
    /// Position within the section.
    pub ordinal: usize,
    pub text: String,
}

/// Chunks of one record, in document order.
pub fn index_chunks(record: &InterviewRecord) -> Vec<IndexChunk> {
    let chunk = |section: &str, ordinal: usize, text: String| IndexChunk {
        interview_id: record.id.clone(),
        kind: record.kind(),
        section: section.to_string(),
        ordinal,
        text,
    };

    let mut chunks = Vec::new();
    match &record.document {
        ParsedDocument::Report(doc) => {
            for key in SectionKey::ALL {
                if key.is_bulleted() {
                    for (i, bullet) in doc.bullets(key).iter().enumerate() {
                        chunks.push(chunk(key.as_str(), i, bullet.clone()));
                    }
                    continue;
                }
                let paragraph = match key {
                    SectionKey::Overview => &doc.overview,
                    _ => &doc.additional_insight,
                };
                if !paragraph.is_empty() {
                    chunks.push(chunk(key.as_str(), 0, paragraph.clone()));
                }
            }
        }
        ParsedDocument::Transcript(doc) => {
            for (i, turn) in doc.turns.iter().enumerate() {
                chunks.push(chunk(TURN_SECTION, i, format!("{}: {}", turn.speaker, turn.text)));
            }
        }
    }
    chunks
}
