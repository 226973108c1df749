//! Jisho word search API (JMdict): community dictionary, JSON.
//!
//! `GET /api/v1/search/words?keyword=<term>` returns
//! `{ "data": [ { "japanese": [ { "word": "猫", "reading": "ねこ" } ] } ] }`.
//! Each `japanese` item contributes its written form, or its reading when
//! the word is kana-only.

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::extract::structured::{array_at, entries, first_non_empty, CandidateCollector};
use crate::http;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, Section, SourceId};

/// Jisho API client.
pub struct JishoSource;

impl TranslationSource for JishoSource {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        tracing::trace!(term, "Jisho lookup");

        let client = http::build_client(config, SourceId::Jisho)?;
        let url = http::url_with_query(&config.endpoints.jisho, "keyword", term)?;
        let request = client.get(url).header("Accept", "application/json");

        http::send_for_json(SourceId::Jisho, request)
            .await
            .map(Payload::Json)
    }

    fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate> {
        let Payload::Json(value) = payload else {
            tracing::debug!("Jisho payload is not JSON");
            return Vec::new();
        };

        let mut collector = CandidateCollector::for_limit(SourceId::Jisho, limit);
        'entries: for entry in entries(value, Some("data")) {
            for form in array_at(entry, "japanese") {
                if let Some(text) = first_non_empty(form, &["word", "reading"]) {
                    collector.push(text, Section::Primary);
                }
                if collector.is_full() {
                    break 'entries;
                }
            }
        }
        collector.finish()
    }

    fn source_id(&self) -> SourceId {
        SourceId::Jisho
    }
}
