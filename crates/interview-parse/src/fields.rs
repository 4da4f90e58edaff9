//! Labeled header fields (`Client:`, `NPS:`, `Interview Date:` ...) and the
//! client-field decomposition.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{clean, dedupe_first_name};
use crate::types::ClientField;

/// Header keywords that close the title block of a report without a `Client` label.
static HEADER_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*(?:NPS|Engagement|Interview[ \t]+Date)\b").unwrap());

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Extract the value of a labeled field, or `""` when absent.
///
/// Patterns are tried in order, first match wins:
/// 1. `Label: value` at the start of any line
/// 2. `Label value` (the extractor dropped the colon)
/// 3. `Label:` alone on a line, value on the next non-empty line
///
/// Patterns 2 and 3 skip the first non-empty line, which is the document
/// title ("Client Feedback Report" is not a `Client` field).
pub fn extract_field(text: &str, field: &str) -> String {
    let label = regex::escape(field.trim()).replace(' ', r"[ \t]+");
    if label.is_empty() {
        return String::new();
    }
    let body = after_title(text).unwrap_or("");
    let patterns = [
        (format!(r"(?im)^[ \t]*{}[ \t]*:[ \t]*(\S[^\n]*)$", label), text),
        (format!(r"(?im)^[ \t]*{}[ \t]+([^\s:][^\n]*)$", label), body),
        (
            format!(r"(?im)^[ \t]*{}[ \t]*:[ \t]*\n(?:[ \t]*\n)*[ \t]*(\S[^\n]*)$", label),
            body,
        ),
    ];
    for (pattern, haystack) in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(value) = re.captures(haystack).and_then(|cap| cap.get(1)) {
            let value = clean(value.as_str());
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// Text after the first non-empty line, or `None` when every line is blank.
fn after_title(text: &str) -> Option<&str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if !line.trim().is_empty() {
            return Some(&text[offset..]);
        }
    }
    None
}

/// First integer in a field value, accepted only in the NPS range 0–10.
pub fn parse_score(value: &str) -> Option<u8> {
    let m = FIRST_NUMBER.find(value)?;
    match m.as_str().parse::<u32>() {
        Ok(n) if n <= 10 => Some(n as u8),
        _ => None,
    }
}

/// Recover the client field from a report that has no `Client` label: the text
/// between the title line and the first `NPS` / `Engagement` / `Interview Date`
/// line. Empty when no such keyword follows the title.
pub fn recover_client_block(header: &str) -> String {
    let Some(rest) = after_title(header) else {
        return String::new();
    };
    match HEADER_KEYWORD.find(rest) {
        Some(m) => clean(&rest[..m.start()]),
        None => String::new(),
    }
}

/// Decompose `"Name, Title, ..., Company"`.
///
/// Three or more parts: first is the name, last the company, the middle parts
/// (joined by `", "`) the title. Two parts: name and company. One part: name.
/// The name then has a repeated first token collapsed.
pub fn split_client_field(raw: &str) -> ClientField {
    let parts: Vec<String> = raw
        .split(',')
        .map(clean)
        .filter(|p| !p.is_empty())
        .collect();

    let mut field = match parts.len() {
        0 => ClientField::default(),
        1 => ClientField {
            name: parts[0].clone(),
            ..Default::default()
        },
        2 => ClientField {
            name: parts[0].clone(),
            title: String::new(),
            company: parts[1].clone(),
        },
        n => ClientField {
            name: parts[0].clone(),
            title: parts[1..n - 1].join(", "),
            company: parts[n - 1].clone(),
        },
    };
    field.name = dedupe_first_name(&field.name);
    field
}
