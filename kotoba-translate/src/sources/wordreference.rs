//! WordReference English-Japanese dictionary, scraped.
//!
//! Result pages hold one `table.WRD` per section. The header row
//! (`tr.wrtopsection`) names the section; "Additional Translations" tables
//! are tagged [`Section::Secondary`](crate::types::Section::Secondary).
//! Translations sit in `td.ToWrd` cells with a trailing part-of-speech
//! `<em>` that is dropped.

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::extract::html::{extract_blocks, HtmlBlockProfile, SectionRule};
use crate::http;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, SourceId};

/// Block signature of WordReference result pages.
pub const WORDREFERENCE_BLOCKS: HtmlBlockProfile = HtmlBlockProfile {
    block: "td.ToWrd",
    skip: Some("em, .dsense, .tooltip"),
    sections: Some(SectionRule {
        container: "table.WRD",
        header: "tr.wrtopsection",
        secondary_marker: "additional",
    }),
    max_blocks: 20,
};

/// WordReference page scraper.
pub struct WordReferenceSource;

impl TranslationSource for WordReferenceSource {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        tracing::trace!(term, "WordReference lookup");

        let client = http::build_client(config, SourceId::WordReference)?;
        let url = http::url_with_segment(&config.endpoints.word_reference, term)?;
        let request = client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "ja,en;q=0.8");

        http::send_for_text(SourceId::WordReference, request)
            .await
            .map(Payload::Html)
    }

    fn extract(&self, payload: &Payload, _limit: usize) -> Vec<Candidate> {
        match payload {
            Payload::Html(html) => {
                extract_blocks(html, &WORDREFERENCE_BLOCKS, SourceId::WordReference)
            }
            Payload::Json(_) => {
                tracing::debug!("WordReference payload is not HTML");
                Vec::new()
            }
        }
    }

    fn source_id(&self) -> SourceId {
        SourceId::WordReference
    }
}
