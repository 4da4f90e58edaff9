//! Source file handling: format detection and text extraction.

use std::path::Path;

use interview_core::{Error, Result};
use tracing::debug;

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Original PDF; text comes from the PDF extractor.
    Pdf,
    /// Text already extracted upstream.
    PlainText,
    Unknown,
}

impl SourceFormat {
    /// Detect format from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// Extract body text from a source file. `None` for unsupported formats.
pub fn extract_text(path: &Path) -> Result<Option<String>> {
    match SourceFormat::from_path(path) {
        SourceFormat::PlainText => Ok(Some(std::fs::read_to_string(path)?)),
        SourceFormat::Pdf => {
            let bytes = std::fs::read(path)?;
            let text = pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| Error::Extraction(format!("{}: {}", path.display(), e)))?;
            Ok(Some(text))
        }
        SourceFormat::Unknown => {
            debug!("Unsupported source format: {}", path.display());
            Ok(None)
        }
    }
}

/// File name with a trailing `.txt` / `.text` removed, so that
/// `R29_..._DEC25.txt` and `R29_..._DEC25.pdf.txt` both yield a decodable name.
pub fn document_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    for suffix in [".txt", ".text"] {
        let cut = name.len().saturating_sub(suffix.len());
        if name.get(cut..).is_some_and(|tail| tail.eq_ignore_ascii_case(suffix)) {
            return Some(name[..cut].to_string());
        }
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_extension("PDF"), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_extension("txt"), SourceFormat::PlainText);
        assert_eq!(SourceFormat::from_extension("docx"), SourceFormat::Unknown);
        assert_eq!(SourceFormat::from_path(Path::new("README")), SourceFormat::Unknown);
    }

    #[test]
    fn test_document_name() {
        let name = |p: &str| document_name(&PathBuf::from(p)).unwrap();
        assert_eq!(name("in/R29_NPS10_NA_ES_HOUSE_DEC25.txt"), "R29_NPS10_NA_ES_HOUSE_DEC25");
        assert_eq!(name("R29_NPS10_NA_ES_HOUSE_DEC25.pdf.TXT"), "R29_NPS10_NA_ES_HOUSE_DEC25.pdf");
        assert_eq!(name("R29_NPS10_NA_ES_HOUSE_DEC25.pdf"), "R29_NPS10_NA_ES_HOUSE_DEC25.pdf");
    }

    #[test]
    fn test_extract_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T1_NPS9_NA_ES_HOUSE_JAN25.txt");
        std::fs::write(&path, "FULL TRANSCRIPT\nInterviewer\nHi.").unwrap();
        assert_eq!(
            extract_text(&path).unwrap().as_deref(),
            Some("FULL TRANSCRIPT\nInterviewer\nHi.")
        );
        assert!(extract_text(&dir.path().join("notes.md")).unwrap().is_none());
    }
}
