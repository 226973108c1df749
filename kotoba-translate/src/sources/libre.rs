//! LibreTranslate machine translation, the last-resort source.
//!
//! `POST /translate` with `{ q, source: "en", target: "ja", format: "text",
//! alternatives }` returns `{ "translatedText": "猫", "alternatives": [...] }`.
//! Disabled by default; enable it by adding `libre_translate` to the
//! configured sources.

use serde::Serialize;

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::extract::structured::{array_at, CandidateCollector};
use crate::http;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, Section, SourceId};

/// Alternative translations requested per lookup.
const ALTERNATIVES: usize = 3;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
    alternatives: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// LibreTranslate client.
pub struct LibreTranslateSource;

impl TranslationSource for LibreTranslateSource {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        tracing::trace!(term, "LibreTranslate lookup");

        let client = http::build_client(config, SourceId::LibreTranslate)?;
        let body = TranslateRequest {
            q: term,
            source: "en",
            target: "ja",
            format: "text",
            alternatives: ALTERNATIVES,
            api_key: config.libre_api_key.as_deref(),
        };
        let request = client
            .post(&config.endpoints.libre_translate)
            .header("Accept", "application/json")
            .json(&body);

        http::send_for_json(SourceId::LibreTranslate, request)
            .await
            .map(Payload::Json)
    }

    fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate> {
        let Payload::Json(value) = payload else {
            tracing::debug!("LibreTranslate payload is not JSON");
            return Vec::new();
        };

        let mut collector = CandidateCollector::for_limit(SourceId::LibreTranslate, limit);
        if let Some(text) = value.get("translatedText").and_then(|v| v.as_str()) {
            collector.push(text, Section::Primary);
        }
        for alternative in array_at(value, "alternatives").filter_map(|v| v.as_str()) {
            collector.push(alternative, Section::Secondary);
        }
        collector.finish()
    }

    fn source_id(&self) -> SourceId {
        SourceId::LibreTranslate
    }
}
