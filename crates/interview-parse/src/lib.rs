//! Interview Parse — recovers structured records from PDF-extracted interview text.
//!
//! Everything here is pure and synchronous: a filename plus a body string go
//! in, a record comes out. Boundaries (sections, bullets, speaker turns) are
//! found with regex heuristics and stoplists, never with semantic analysis.
//! Body parsing is total; only filename decoding can fail.

pub mod bullets;
pub mod fields;
pub mod filename;
pub mod report;
pub mod sections;
pub mod text;
pub mod transcript;
pub mod types;

pub use bullets::split_bullets;
pub use fields::{extract_field, parse_score, recover_client_block, split_client_field};
pub use filename::decode_filename;
pub use report::parse_report;
pub use sections::{section_spans, segment, split_report, SectionKey, SectionSpan};
pub use text::{clean, dedupe_first_name, normalize_date, to_iso_date};
pub use transcript::{parse_transcript, segment_turns};
pub use types::{
    ClientField, FilenameMetadata, ParsedReportDocument, ParsedTranscriptDocument, TranscriptTurn,
};
