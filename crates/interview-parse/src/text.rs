//! Text cleanup shared by every stage: punctuation folding, whitespace
//! collapsing, page-marker removal, name and date normalization.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// `-- 3 of 7 --` page-break markers emitted by the PDF extractor.
static PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)--[ \t]*\d+[ \t]+of[ \t]+\d+[ \t]*--").unwrap());

/// Fold typographic quotes, dashes, ellipses and exotic spaces to ASCII.
/// Line breaks are left alone.
pub fn normalize_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{00A0}' | '\u{2007}' | '\u{2009}' | '\u{200A}' | '\u{202F}' => out.push(' '),
            '\u{200B}' | '\u{FEFF}' => {}
            _ => out.push(c),
        }
    }
    out
}

/// CRLF and lone CR become LF.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collapse every whitespace run (newlines included) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Full cleanup: ASCII punctuation, single spaces, trimmed ends. Idempotent.
pub fn clean(text: &str) -> String {
    collapse_whitespace(&normalize_punctuation(text))
        .trim()
        .to_string()
}

/// Remove `-- n of m --` page-break markers.
pub fn strip_page_markers(text: &str) -> String {
    PAGE_MARKER.replace_all(text, "").into_owned()
}

/// Collapse an immediately repeated first token (`"Mike Mike Arshinskiy"`),
/// an artifact of PDF table extraction.
pub fn dedupe_first_name(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() >= 2 && tokens[0] == tokens[1] {
        tokens[1..].join(" ")
    } else {
        tokens.join(" ")
    }
}

/// Normalize a dot-separated `D.M.Y` / `D.M.YY` date to `YYYY-MM-DD`.
///
/// Anything that is not three dot-separated numeric parts comes back unchanged.
pub fn normalize_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return raw.to_string();
    }
    let (day, month, year) = (parts[0], parts[1], parts[2]);
    let numeric = |s: &str, max_len: usize| {
        !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !numeric(day, 2) || !numeric(month, 2) || !numeric(year, 4) {
        return raw.to_string();
    }
    if year.len() != 2 && year.len() != 4 {
        return raw.to_string();
    }
    let year = if year.len() == 2 {
        format!("20{}", year)
    } else {
        year.to_string()
    };
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Normalize a date and keep it only if it is a real `YYYY-MM-DD` calendar date.
/// Returns an empty string otherwise, never a partial date.
pub fn to_iso_date(raw: &str) -> String {
    let normalized = normalize_date(raw);
    if normalized.len() == 10 && NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").is_ok() {
        normalized
    } else {
        String::new()
    }
}
