//! Wiktionary translation tables via a wiktextract word endpoint.
//!
//! The endpoint returns an array of entries (one per part of speech),
//! each with `senses[]`, and each sense may carry `translations[]` items
//! of the form `{ "lang_code": "ja", "lang": "Japanese", "word": "猫" }`.
//! Entry-level `translations[]` are read too.
//!
//! Senses tagged idiom, phrasal verb, slang or colloquial describe the
//! usage learners look the word up for, so their translations are
//! [`Section::Primary`]; everything else is [`Section::Secondary`].

use serde_json::Value;

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::extract::structured::{array_at, first_non_empty, CandidateCollector, MAX_ENTRIES};
use crate::http;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, Section, SourceId};

/// Sense tags that promote a sense's translations.
const PREFERRED_TAGS: &[&str] = &["idiom", "phrasal verb", "slang", "colloquial"];

/// Wiktionary (wiktextract) client.
pub struct WiktionarySource;

impl TranslationSource for WiktionarySource {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        tracing::trace!(term, "Wiktionary lookup");

        let client = http::build_client(config, SourceId::Wiktionary)?;
        let url = http::url_with_segment(&config.endpoints.wiktionary, term)?;
        let request = client.get(url).header("Accept", "application/json");

        http::send_for_json(SourceId::Wiktionary, request)
            .await
            .map(Payload::Json)
    }

    fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate> {
        let Payload::Json(value) = payload else {
            tracing::debug!("Wiktionary payload is not JSON");
            return Vec::new();
        };

        // Some deployments return a single entry object instead of an array.
        let root: &[Value] = match value {
            Value::Array(items) => items,
            Value::Object(_) => std::slice::from_ref(value),
            _ => &[],
        };

        let mut collector = CandidateCollector::for_limit(SourceId::Wiktionary, limit);
        for entry in root.iter().take(MAX_ENTRIES) {
            for sense in array_at(entry, "senses") {
                let section = if has_preferred_tag(sense) {
                    Section::Primary
                } else {
                    Section::Secondary
                };
                push_japanese(&mut collector, sense, section);
            }
            push_japanese(&mut collector, entry, Section::Secondary);
            if collector.is_full() {
                break;
            }
        }
        collector.finish()
    }

    fn source_id(&self) -> SourceId {
        SourceId::Wiktionary
    }
}

/// Push the Japanese items of `node.translations` into `collector`.
fn push_japanese(collector: &mut CandidateCollector, node: &Value, section: Section) {
    for translation in array_at(node, "translations") {
        if collector.is_full() {
            return;
        }
        if !is_japanese(translation) {
            continue;
        }
        if let Some(text) = first_non_empty(translation, &["word", "text"]) {
            collector.push(text, section);
        }
    }
}

fn is_japanese(translation: &Value) -> bool {
    let code_matches = translation
        .get("lang_code")
        .or_else(|| translation.get("code"))
        .and_then(Value::as_str)
        .is_some_and(|code| code.eq_ignore_ascii_case("ja"));
    let name_matches = translation
        .get("lang")
        .and_then(Value::as_str)
        .is_some_and(|lang| lang.to_lowercase().contains("japanese"));
    code_matches || name_matches
}

fn has_preferred_tag(sense: &Value) -> bool {
    array_at(sense, "tags")
        .filter_map(Value::as_str)
        .any(|tag| PREFERRED_TAGS.contains(&tag.to_lowercase().as_str()))
}
