//! Filename code decoding.
//!
//! Grammar: `{R|T}{id}_NPS{score}_{REGION}_{SOLUTION}_{ACCOUNT}_{MON}{YY}.pdf`,
//! e.g. `R29_NPS10_NA_CONSULTING_HOUSE_DEC25.pdf`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use interview_core::{Error, Result};

use crate::types::FilenameMetadata;

const TOKEN_COUNT: usize = 6;

/// Solution key → display name. Unknown keys pass through unchanged.
static SOLUTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ES", "Executive Search"),
        ("CONSULTING", "Consulting"),
        ("LA", "Leadership Assessment"),
        ("INTERIM", "Interim Management"),
        ("BOARD", "Board Services"),
    ])
});

/// Account key → account type. Unknown keys pass through unchanged.
static ACCOUNT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("HOUSE", "House"),
        ("KEY", "Key Account"),
        ("NEW", "New Client"),
        ("STRATEGIC", "Strategic"),
    ])
});

static MONTHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("JAN", "01"),
        ("FEB", "02"),
        ("MAR", "03"),
        ("APR", "04"),
        ("MAY", "05"),
        ("JUN", "06"),
        ("JUL", "07"),
        ("AUG", "08"),
        ("SEP", "09"),
        ("OCT", "10"),
        ("NOV", "11"),
        ("DEC", "12"),
    ])
});

/// Decode a report/transcript filename into its metadata.
///
/// Fails with [`Error::InvalidFilenameFormat`] when the name does not split into
/// exactly six tokens, the score is not an integer in 0–10, or the month-year
/// token has no two-digit year.
pub fn decode_filename(name: &str) -> Result<FilenameMetadata> {
    let stem = strip_pdf_suffix(name.trim());
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() != TOKEN_COUNT {
        return Err(Error::invalid_filename(
            name,
            format!("expected {} tokens, found {}", TOKEN_COUNT, tokens.len()),
        ));
    }

    let code = tokens[0];
    if code.is_empty() {
        return Err(Error::invalid_filename(name, "empty document code"));
    }

    Ok(FilenameMetadata {
        code: code.to_string(),
        score: decode_score(name, tokens[1])?,
        region: tokens[2].to_string(),
        solution: lookup(&SOLUTIONS, tokens[3]),
        account_type: lookup(&ACCOUNT_TYPES, tokens[4]),
        month_year: decode_month_year(name, tokens[5])?,
    })
}

fn strip_pdf_suffix(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".pdf") {
        &name[..len - 4]
    } else {
        name
    }
}

fn lookup(map: &HashMap<&'static str, &'static str>, key: &str) -> String {
    map.get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| key.to_string())
}

fn decode_score(name: &str, token: &str) -> Result<u8> {
    let digits = match token.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("NPS") => &token[3..],
        _ => token,
    };
    match digits.parse::<u8>() {
        Ok(score) if score <= 10 => Ok(score),
        _ => Err(Error::invalid_filename(
            name,
            format!("score token {:?} is not NPS0-NPS10", token),
        )),
    }
}

/// `DEC25` → `2025-12`. An unknown month code defaults to January.
fn decode_month_year(name: &str, token: &str) -> Result<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 5 {
        return Err(Error::invalid_filename(
            name,
            format!("month-year token {:?} is too short", token),
        ));
    }
    let year: String = chars[chars.len() - 2..].iter().collect();
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_filename(
            name,
            format!("month-year token {:?} has no two-digit year", token),
        ));
    }
    let month_code: String = chars[..3].iter().collect::<String>().to_uppercase();
    let month = MONTHS.get(month_code.as_str()).copied().unwrap_or("01");
    Ok(format!("20{}-{}", year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_report_filename() {
        let meta = decode_filename("R29_NPS10_NA_CONSULTING_HOUSE_DEC25.pdf").unwrap();
        assert_eq!(
            meta,
            FilenameMetadata {
                code: "R29".into(),
                score: 10,
                region: "NA".into(),
                solution: "Consulting".into(),
                account_type: "House".into(),
                month_year: "2025-12".into(),
            }
        );
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let meta = decode_filename("T7_NPS6_EMEA_XYZ_PARTNER_MAR24.PDF").unwrap();
        assert_eq!(meta.code, "T7");
        assert_eq!(meta.solution, "XYZ");
        assert_eq!(meta.account_type, "PARTNER");
        assert_eq!(meta.month_year, "2024-03");
    }

    #[test]
    fn test_unknown_month_defaults_to_january() {
        let meta = decode_filename("R3_NPS8_APAC_ES_HOUSE_XYZ25.pdf").unwrap();
        assert_eq!(meta.solution, "Executive Search");
        assert_eq!(meta.month_year, "2025-01");
    }

    #[test]
    fn test_suffix_optional() {
        let meta = decode_filename("R29_NPS0_LATAM_ES_HOUSE_jan26").unwrap();
        assert_eq!(meta.score, 0);
        assert_eq!(meta.month_year, "2026-01");
    }

    #[test]
    fn test_wrong_token_count_is_named_error() {
        let err = decode_filename("R29_NPS10_NA.pdf").unwrap_err();
        assert!(matches!(err, Error::InvalidFilenameFormat { .. }));
        assert!(decode_filename("R29_NPS10_NA_ES_HOUSE_DEC25_extra.pdf").is_err());
    }

    #[test]
    fn test_bad_score_and_year() {
        assert!(decode_filename("R29_NPS11_NA_ES_HOUSE_DEC25.pdf").is_err());
        assert!(decode_filename("R29_NPSx_NA_ES_HOUSE_DEC25.pdf").is_err());
        assert!(decode_filename("R29_NPS5_NA_ES_HOUSE_DECEM.pdf").is_err());
        assert!(decode_filename("R29_NPS5_NA_ES_HOUSE_D5.pdf").is_err());
    }
}
