//! Weblio English-Japanese dictionary, curated and scraped.
//!
//! Content pages at `https://ejje.weblio.jp/content/<term>` carry the main
//! translations in `.content-explanation` cells as one enumerated string
//! (`猫、ネコ、飼い猫`).

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::extract::html::{extract_blocks, HtmlBlockProfile};
use crate::http;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, SourceId};

/// Block signature of Weblio content pages.
pub const WEBLIO_BLOCKS: HtmlBlockProfile = HtmlBlockProfile {
    block: ".content-explanation",
    skip: None,
    sections: None,
    max_blocks: 20,
};

/// Weblio page scraper.
///
/// Most trusted source: editorially curated translations, one enumerated
/// block per headword.
pub struct WeblioSource;

impl TranslationSource for WeblioSource {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        tracing::trace!(term, "Weblio lookup");

        let client = http::build_client(config, SourceId::Weblio)?;
        let url = http::url_with_segment(&config.endpoints.weblio, term)?;
        let request = client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "ja,en;q=0.8");

        http::send_for_text(SourceId::Weblio, request)
            .await
            .map(Payload::Html)
    }

    fn extract(&self, payload: &Payload, _limit: usize) -> Vec<Candidate> {
        match payload {
            Payload::Html(html) => extract_blocks(html, &WEBLIO_BLOCKS, SourceId::Weblio),
            Payload::Json(_) => {
                tracing::debug!("Weblio payload is not HTML");
                Vec::new()
            }
        }
    }

    fn source_id(&self) -> SourceId {
        SourceId::Weblio
    }
}
