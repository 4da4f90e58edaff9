//! Document ingestion: file → text → parsed record.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::file;
use interview_core::{Error, IngestConfig, Result};
use interview_parse::{
    decode_filename, parse_report, parse_transcript, FilenameMetadata, ParsedReportDocument,
    ParsedTranscriptDocument,
};

/// Document kind, from the first letter of the filename code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Report,
    Transcript,
}

impl DocumentKind {
    /// `R…` → report, `T…` → transcript (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self> {
        match code.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('R') => Ok(Self::Report),
            Some('T') => Ok(Self::Transcript),
            _ => Err(Error::UnknownDocumentKind(code.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Transcript => "transcript",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed body of either document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ParsedDocument {
    Report(ParsedReportDocument),
    Transcript(ParsedTranscriptDocument),
}

impl ParsedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Report(_) => DocumentKind::Report,
            Self::Transcript(_) => DocumentKind::Transcript,
        }
    }
}

/// One ingested document, ready for the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    /// Numeric part of the code; a report and its transcript share it.
    pub id: String,
    pub metadata: FilenameMetadata,
    pub document: ParsedDocument,
    /// Hex SHA-256 of the body text.
    pub content_hash: String,
    pub source_file: String,
}

impl InterviewRecord {
    pub fn kind(&self) -> DocumentKind {
        self.document.kind()
    }
}

/// Outcome of a batch run. A failing file never aborts the batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<InterviewRecord>,
    /// Files passed over on purpose (duplicates, unsupported, empty), with the reason.
    pub skipped: Vec<(PathBuf, String)>,
    /// Files that failed, with the error message.
    pub errors: Vec<(PathBuf, String)>,
}

/// Turns source files into interview records.
pub struct Ingester {
    config: IngestConfig,
    seen_hashes: HashSet<String>,
}

impl Ingester {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            seen_hashes: HashSet::new(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Build a record from a filename and its extracted body text.
    ///
    /// Fails only when the filename does not decode.
    pub fn ingest_text(&self, filename: &str, text: &str) -> Result<InterviewRecord> {
        let metadata = decode_filename(filename)?;
        let kind = DocumentKind::from_code(&metadata.code)?;

        let document = match kind {
            DocumentKind::Report => ParsedDocument::Report(parse_report(text)),
            DocumentKind::Transcript => ParsedDocument::Transcript(parse_transcript(text)),
        };
        let id = metadata.interview_id();

        debug!("Parsed {} {} ({})", kind, id, filename);

        Ok(InterviewRecord {
            id,
            metadata,
            document,
            content_hash: content_hash(text),
            source_file: filename.to_string(),
        })
    }

    /// Extract and parse one file. `Ok(None)` when the file has no usable text.
    pub fn ingest_file(&self, path: &Path) -> Result<Option<InterviewRecord>> {
        let text = match file::extract_text(path)? {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                debug!("No text extracted from {}", path.display());
                return Ok(None);
            }
        };
        let name = file::document_name(path)
            .ok_or_else(|| Error::invalid_filename(&path.display().to_string(), "not UTF-8"))?;

        let mut record = self.ingest_text(&name, &text)?;
        record.source_file = path.display().to_string();
        Ok(Some(record))
    }

    /// Ingest every matching file under the configured input directory.
    pub fn ingest_dir(&mut self) -> Result<IngestReport> {
        let root = self.config.input_dir.clone();
        if !root.is_dir() {
            return Err(Error::Config(format!(
                "input directory does not exist: {}",
                root.display()
            )));
        }

        let mut report = IngestReport::default();
        for path in self.collect_files(&root)? {
            match self.ingest_file(&path) {
                Ok(Some(record)) => {
                    if self.config.skip_duplicates
                        && !self.seen_hashes.insert(record.content_hash.clone())
                    {
                        debug!("Duplicate content, skipping: {}", path.display());
                        let reason = Error::DuplicateContent(record.content_hash).to_string();
                        report.skipped.push((path, reason));
                        continue;
                    }
                    report.records.push(record);
                }
                Ok(None) => report.skipped.push((path, "no text".to_string())),
                Err(e) => {
                    warn!("Failed to ingest {}: {}", path.display(), e);
                    report.errors.push((path, e.to_string()));
                }
            }
        }

        info!(
            "Ingested {} documents from {} ({} skipped, {} failed)",
            report.records.len(),
            root.display(),
            report.skipped.len(),
            report.errors.len()
        );
        Ok(report)
    }

    /// Matching files under `root`, sorted for deterministic ordering.
    fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(root).min_depth(1);
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let accepted = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.config.accepts_extension(ext));
            if accepted {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Compute SHA-256 content hash.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
