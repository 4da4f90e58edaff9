//! Report assembly: header fields, client recovery, sections and bullets.

use tracing::debug;

use crate::bullets::split_bullets;
use crate::fields::{extract_field, parse_score, recover_client_block, split_client_field};
use crate::sections::{split_report, SectionKey};
use crate::text::{clean, normalize_newlines, normalize_punctuation, strip_page_markers, to_iso_date};
use crate::types::ParsedReportDocument;

impl ParsedReportDocument {
    /// Bullets of a bulleted section; empty for paragraph sections.
    pub fn bullets(&self, key: SectionKey) -> &[String] {
        match key {
            SectionKey::WhatWentWell => &self.what_went_well,
            SectionKey::ChallengesPainPoints => &self.challenges_pain_points,
            SectionKey::GapsIdentified => &self.gaps_identified,
            SectionKey::KeyThemes => &self.key_themes,
            SectionKey::ActionsRecommendations => &self.actions_recommendations,
            SectionKey::Overview | SectionKey::AdditionalInsight => &[],
        }
    }
}

/// Build a report record from extracted text. Never fails; a missing field
/// is empty, a missing section is an empty list.
pub fn parse_report(text: &str) -> ParsedReportDocument {
    let body = strip_page_markers(&normalize_newlines(&normalize_punctuation(text)));
    let (header, mut sections) = split_report(&body);

    let mut client_raw = extract_field(header, "Client");
    if client_raw.is_empty() {
        client_raw = recover_client_block(header);
        if !client_raw.is_empty() {
            debug!("Recovered client from title block: {:?}", client_raw);
        }
    }
    let client = split_client_field(&client_raw);

    let score = parse_score(&extract_field(header, "NPS"))
        .or_else(|| parse_score(&extract_field(header, "Score")));
    let engagement = extract_field(header, "Engagement");
    let interview_date = to_iso_date(&extract_field(header, "Interview Date"));

    let mut paragraph = |key: SectionKey| {
        sections
            .remove(&key)
            .map(|s| clean(&s))
            .unwrap_or_default()
    };
    let overview = paragraph(SectionKey::Overview);
    let additional_insight = paragraph(SectionKey::AdditionalInsight);
    let bullets = |key: SectionKey| {
        sections
            .get(&key)
            .map(|s| split_bullets(s))
            .unwrap_or_default()
    };

    let doc = ParsedReportDocument {
        client: client.name,
        client_title: client.title,
        company: client.company,
        engagement,
        interview_date,
        score,
        overview,
        what_went_well: bullets(SectionKey::WhatWentWell),
        challenges_pain_points: bullets(SectionKey::ChallengesPainPoints),
        gaps_identified: bullets(SectionKey::GapsIdentified),
        key_themes: bullets(SectionKey::KeyThemes),
        actions_recommendations: bullets(SectionKey::ActionsRecommendations),
        additional_insight,
    };

    debug!(
        "Parsed report for {:?}: {} well, {} challenges, {} gaps, {} themes, {} actions",
        doc.client,
        doc.what_went_well.len(),
        doc.challenges_pain_points.len(),
        doc.gaps_identified.len(),
        doc.key_themes.len(),
        doc.actions_recommendations.len()
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_header() {
        let text = "Client Feedback Summary\n\
            Client: Mike Mike Arshinskiy, CFO, Acme Corp\n\
            NPS: 10\n\
            Engagement: CEO search\n\
            Interview Date: 02.09.25\n\
            -- 1 of 2 --\n\
            Overview\n\
            A strong search overall.\n";
        let doc = parse_report(text);
        assert_eq!(doc.client, "Mike Arshinskiy");
        assert_eq!(doc.client_title, "CFO");
        assert_eq!(doc.company, "Acme Corp");
        assert_eq!(doc.score, Some(10));
        assert_eq!(doc.engagement, "CEO search");
        assert_eq!(doc.interview_date, "2025-09-02");
        assert_eq!(doc.overview, "A strong search overall.");
        assert!(doc.what_went_well.is_empty());
        assert!(doc.bullets(SectionKey::Overview).is_empty());
        assert_eq!(doc.additional_insight, "");
    }

    #[test]
    fn test_client_recovered_from_title_block() {
        let text = "Executive Search Feedback\n\
            Gerd Pircher, Nordwind AG\n\
            NPS 8\n\
            Interview Date 8.12.25\n";
        let doc = parse_report(text);
        assert_eq!(doc.client, "Gerd Pircher");
        assert_eq!(doc.company, "Nordwind AG");
        assert_eq!(doc.client_title, "");
        assert_eq!(doc.score, Some(8));
        assert_eq!(doc.interview_date, "2025-12-08");
    }

    #[test]
    fn test_title_with_client_word_falls_back_to_block() {
        let text = "Client Feedback Report\n\
            Gerd Pircher, Managing Director, Nordwind AG\n\
            NPS 8\n\
            Overview\n\
            Good search.\n";
        let doc = parse_report(text);
        assert_eq!(doc.client, "Gerd Pircher");
        assert_eq!(doc.client_title, "Managing Director");
        assert_eq!(doc.company, "Nordwind AG");
        assert_eq!(doc.score, Some(8));
        assert_eq!(doc.overview, "Good search.");
    }

    #[test]
    fn test_wrapped_heading_phrase_stays_in_overview() {
        let text = "Client: A B\n\
            Overview\n\
            The conversation touched on several\n\
            key themes that recur below.\n\
            What Went Well\n\
            Fast shortlist: Delivered in ten days.\n\
            Key Themes\n\
            Trust and candour: Valued throughout.\n";
        let doc = parse_report(text);
        assert_eq!(
            doc.overview,
            "The conversation touched on several key themes that recur below."
        );
        assert_eq!(doc.what_went_well, vec!["Fast shortlist: Delivered in ten days."]);
        assert_eq!(doc.key_themes, vec!["Trust and candour: Valued throughout."]);
    }

    #[test]
    fn test_unparseable_date_is_empty() {
        let doc = parse_report("Client: A B\nInterview Date: sometime in May\n");
        assert_eq!(doc.interview_date, "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_report(""), ParsedReportDocument::default());
    }
}
