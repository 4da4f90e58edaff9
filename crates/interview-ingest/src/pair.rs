//! Pairing reports with their transcripts by shared interview id.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::ingest::{DocumentKind, InterviewRecord};

/// A report and/or transcript sharing one interview id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub report: Option<InterviewRecord>,
    pub transcript: Option<InterviewRecord>,
}

impl Interview {
    pub fn is_complete(&self) -> bool {
        self.report.is_some() && self.transcript.is_some()
    }
}

/// Group records by id. Numeric ids sort numerically, others after them.
/// When two records claim the same slot, the first one is kept.
pub fn group_interviews(records: Vec<InterviewRecord>) -> Vec<Interview> {
    let mut groups: BTreeMap<(bool, usize, String), Interview> = BTreeMap::new();

    for record in records {
        let sort_key = sort_key(&record.id);
        let entry = groups.entry(sort_key).or_insert_with(|| Interview {
            id: record.id.clone(),
            report: None,
            transcript: None,
        });
        let slot = match record.kind() {
            DocumentKind::Report => &mut entry.report,
            DocumentKind::Transcript => &mut entry.transcript,
        };
        if slot.is_some() {
            warn!(
                "Interview {} already has a {}, ignoring {}",
                record.id,
                record.kind(),
                record.source_file
            );
            continue;
        }
        *slot = Some(record);
    }

    groups.into_values().collect()
}

/// Ids carry no leading zeros, so among numeric ids a shorter one is smaller.
fn sort_key(id: &str) -> (bool, usize, String) {
    let numeric = !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit());
    (!numeric, if numeric { id.len() } else { 0 }, id.to_string())
}
