//! Structured records produced by the pipeline.
//!
//! Field names serialize in camelCase, the shape the storage and indexing
//! collaborators consume.

use serde::{Deserialize, Serialize};

/// Metadata decoded from a `R29_NPS10_NA_CONSULTING_HOUSE_DEC25.pdf` style filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilenameMetadata {
    /// Document code, e.g. `"R29"` or `"T29"`.
    pub code: String,
    /// NPS score, 0–10.
    pub score: u8,
    /// Region token as written (`NA`, `EMEA`, `APAC`, `LATAM`, ...). Not validated.
    pub region: String,
    /// Decoded solution name, or the raw key when unknown.
    pub solution: String,
    /// Decoded account type, or the raw key when unknown.
    pub account_type: String,
    /// Always `YYYY-MM`.
    pub month_year: String,
}

impl FilenameMetadata {
    /// Leading letter of the code (`R` report, `T` transcript).
    pub fn code_prefix(&self) -> Option<char> {
        self.code.chars().next()
    }

    /// Interview id shared by a report and its transcript: the code's digits
    /// without leading zeros, kept as text so long ids never overflow. A code
    /// with no digits is its own id.
    pub fn interview_id(&self) -> String {
        let digits: String = self.code.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return self.code.clone();
        }
        match digits.trim_start_matches('0') {
            "" => "0".to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

/// Client field decomposed into its comma-separated parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientField {
    pub name: String,
    pub title: String,
    pub company: String,
}

/// Structured record recovered from a report body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReportDocument {
    pub client: String,
    pub client_title: String,
    pub company: String,
    pub engagement: String,
    /// `YYYY-MM-DD` or empty.
    pub interview_date: String,
    pub score: Option<u8>,
    pub overview: String,
    pub what_went_well: Vec<String>,
    pub challenges_pain_points: Vec<String>,
    pub gaps_identified: Vec<String>,
    pub key_themes: Vec<String>,
    pub actions_recommendations: Vec<String>,
    pub additional_insight: String,
}

/// One speaker turn in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// Marker label, including the timestamp when present (`"Speaker 1 2:16"`).
    pub speaker: String,
    pub text: String,
}

/// Structured record recovered from a transcript body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTranscriptDocument {
    pub client_name: String,
    pub client_title: String,
    pub company: String,
    pub project: String,
    /// `YYYY-MM-DD` or empty.
    pub interview_date: String,
    pub score: Option<u8>,
    pub turns: Vec<TranscriptTurn>,
    /// `"{speaker}: {text}"` per turn, newline-joined.
    pub raw_text: String,
}
