//! Core lookup orchestrator: concurrent multi-source fan-out, filter, fold, rank.
//!
//! Queries every configured source concurrently, each under its own
//! deadline, waits for all of them to settle, then folds the successful
//! payloads in descending trust order and ranks the result.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use crate::config::TranslateConfig;
use crate::source::TranslationSource;
use crate::sources::SourceClient;
use crate::types::{LookupRequest, RankedResult, SourceId, SourceOutcome, SourceResult};

use super::aggregate::Aggregator;
use super::rank::rank;

/// Orchestrate a concurrent lookup across all enabled sources.
///
/// # Pipeline
///
/// 1. Build one client per distinct [`SourceId`] in `config.sources`
/// 2. Fan out fetches concurrently with [`futures::future::join_all`],
///    each bounded by `config.timeout_seconds`
/// 3. Log per-source failures at warn level; they contribute nothing
/// 4. Extract, filter and fold payloads in descending trust order
/// 5. Rank and truncate to `request.limit()`
///
/// Never fails: if every source fails the result is simply empty.
pub async fn orchestrate_lookup(request: &LookupRequest, config: &TranslateConfig) -> RankedResult {
    let mut enabled: Vec<SourceId> = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        if !enabled.contains(source) {
            enabled.push(*source);
        }
    }
    let clients: Vec<SourceClient> = enabled.into_iter().map(SourceClient::new).collect();
    lookup_with_sources(request, &clients, config).await
}

/// Run the lookup pipeline over an explicit set of sources.
pub async fn lookup_with_sources<S: TranslationSource>(
    request: &LookupRequest,
    sources: &[S],
    config: &TranslateConfig,
) -> RankedResult {
    let deadline = Duration::from_secs(config.timeout_seconds);
    let started = Instant::now();

    let futures = sources
        .iter()
        .map(|source| run_source(source, request.term(), config, deadline));
    let results = futures::future::join_all(futures).await;

    let settled: Vec<(&S, SourceResult)> = sources.iter().zip(results).collect();
    let succeeded = settled.iter().filter(|(_, r)| r.outcome.is_ok()).count();

    let ranked = merge(request.limit(), settled);
    tracing::debug!(
        sources = sources.len(),
        succeeded,
        terms = ranked.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "lookup finished"
    );
    ranked
}

/// Fetch from one source under its deadline. Always settles.
async fn run_source<S: TranslationSource>(
    source: &S,
    term: &str,
    config: &TranslateConfig,
    deadline: Duration,
) -> SourceResult {
    let id = source.source_id();
    let started = Instant::now();

    let outcome = match tokio::time::timeout(deadline, source.fetch(term, config)).await {
        Ok(Ok(payload)) => SourceOutcome::Ok(payload),
        Ok(Err(err)) => {
            tracing::warn!(source = %id, error = %err, "source fetch failed");
            SourceOutcome::from(err)
        }
        Err(_) => {
            tracing::warn!(source = %id, timeout_secs = deadline.as_secs(), "source timed out");
            SourceOutcome::Timeout
        }
    };

    tracing::debug!(
        source = %id,
        status = outcome.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "source settled"
    );
    SourceResult { source: id, outcome }
}

/// Fold settled results in descending trust order, then rank.
fn merge<S: TranslationSource>(limit: usize, mut settled: Vec<(&S, SourceResult)>) -> RankedResult {
    // Stable: equal trust keeps configuration order.
    settled.sort_by_key(|(source, _)| Reverse(source.trust()));

    let mut aggregator = Aggregator::new();
    for (source, result) in &settled {
        let SourceOutcome::Ok(payload) = &result.outcome else {
            continue;
        };
        let candidates = source.extract(payload, limit);
        let extracted = candidates.len();
        let stats = aggregator.fold_source(
            result.source,
            candidates,
            result.source.intake_cap(limit),
        );
        tracing::debug!(
            source = %result.source,
            extracted,
            accepted = stats.accepted,
            rejected = stats.rejected,
            capped = stats.capped,
            "source folded"
        );
    }

    rank(aggregator.into_terms(), limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use crate::types::{Candidate, Payload};

    enum Behaviour {
        Words(Vec<&'static str>),
        Fail,
        Slow(u64, Vec<&'static str>),
        Garbage,
    }

    struct MockSource {
        source: SourceId,
        behaviour: Behaviour,
    }

    fn mock(source: SourceId, behaviour: Behaviour) -> MockSource {
        MockSource { source, behaviour }
    }

    impl TranslationSource for MockSource {
        async fn fetch(&self, _term: &str, _config: &TranslateConfig) -> Result<Payload, TranslateError> {
            match &self.behaviour {
                Behaviour::Words(words) => Ok(Payload::Json(serde_json::json!(words))),
                Behaviour::Fail => Err(TranslateError::Http {
                    status: Some(500),
                    message: "mock failure".into(),
                }),
                Behaviour::Slow(secs, words) => {
                    tokio::time::sleep(Duration::from_secs(*secs)).await;
                    Ok(Payload::Json(serde_json::json!(words)))
                }
                Behaviour::Garbage => Ok(Payload::Html("<html>not json</html>".into())),
            }
        }

        fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate> {
            let Payload::Json(value) = payload else {
                return Vec::new();
            };
            value
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| v.as_str())
                .take(limit * 2)
                .map(|w| Candidate::primary(w, self.source))
                .collect()
        }

        fn source_id(&self) -> SourceId {
            self.source
        }
    }

    fn request(limit: usize) -> LookupRequest {
        LookupRequest::new("cat", limit).expect("valid request")
    }

    fn config() -> TranslateConfig {
        TranslateConfig {
            timeout_seconds: 2,
            ..TranslateConfig::default()
        }
    }

    #[tokio::test]
    async fn agreement_ranks_first_and_noise_is_dropped() {
        let sources = vec![
            mock(SourceId::Jisho, Behaviour::Words(vec!["猫", "ニャンコ"])),
            mock(SourceId::Weblio, Behaviour::Words(vec!["猫", "ネコ", "宣伝"])),
        ];
        let result = lookup_with_sources(&request(3), &sources, &config()).await;
        assert_eq!(result.texts(), vec!["猫", "ネコ", "ニャンコ"]);
        assert_eq!(result.terms[0].sources.len(), 2);
    }

    #[tokio::test]
    async fn failed_sources_contribute_nothing() {
        let sources = vec![
            mock(SourceId::Weblio, Behaviour::Fail),
            mock(SourceId::Jisho, Behaviour::Words(vec!["猫"])),
            mock(SourceId::Wiktionary, Behaviour::Garbage),
        ];
        let result = lookup_with_sources(&request(5), &sources, &config()).await;
        assert_eq!(result.texts(), vec!["猫"]);
        assert_eq!(result.terms[0].sources, vec![SourceId::Jisho]);
    }

    #[tokio::test]
    async fn all_sources_failing_yields_empty() {
        let sources = vec![
            mock(SourceId::Weblio, Behaviour::Fail),
            mock(SourceId::Jisho, Behaviour::Fail),
        ];
        let result = lookup_with_sources(&request(5), &sources, &config()).await;
        assert!(result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_is_cut_off_at_deadline() {
        let sources = vec![
            mock(SourceId::Weblio, Behaviour::Slow(30, vec!["遅い"])),
            mock(SourceId::Jisho, Behaviour::Slow(1, vec!["猫"])),
        ];
        let result = lookup_with_sources(&request(5), &sources, &config()).await;
        assert_eq!(result.texts(), vec!["猫"]);
    }

    #[tokio::test(start_paused = true)]
    async fn sources_run_concurrently() {
        // Three one-second sources under a two-second deadline all finish.
        let sources = vec![
            mock(SourceId::Weblio, Behaviour::Slow(1, vec!["一"])),
            mock(SourceId::Jisho, Behaviour::Slow(1, vec!["二"])),
            mock(SourceId::Wiktionary, Behaviour::Slow(1, vec!["三"])),
        ];
        let started = tokio::time::Instant::now();
        let result = lookup_with_sources(&request(5), &sources, &config()).await;
        assert_eq!(result.len(), 3);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn completion_order_does_not_change_result() {
        let fast_first = vec![
            mock(SourceId::Jisho, Behaviour::Slow(0, vec!["犬", "猫"])),
            mock(SourceId::Weblio, Behaviour::Slow(1, vec!["猫", "ネコ"])),
        ];
        let slow_first = vec![
            mock(SourceId::Jisho, Behaviour::Slow(1, vec!["犬", "猫"])),
            mock(SourceId::Weblio, Behaviour::Slow(0, vec!["猫", "ネコ"])),
        ];
        let a = lookup_with_sources(&request(5), &fast_first, &config()).await;
        let b = lookup_with_sources(&request(5), &slow_first, &config()).await;
        assert_eq!(a, b);
        assert_eq!(a.texts(), vec!["猫", "ネコ", "犬"]);
    }

    #[tokio::test]
    async fn supplementary_sources_capped_at_limit() {
        let sources = vec![mock(
            SourceId::Wiktionary,
            Behaviour::Words(vec!["一", "二", "三", "四"]),
        )];
        let result = lookup_with_sources(&request(2), &sources, &config()).await;
        assert_eq!(result.texts(), vec!["一", "二"]);
    }

    #[tokio::test]
    async fn result_never_exceeds_limit() {
        let sources = vec![mock(
            SourceId::Jisho,
            Behaviour::Words(vec!["一", "二", "三", "四", "五", "六"]),
        )];
        let result = lookup_with_sources(&request(3), &sources, &config()).await;
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn repeated_lookups_are_identical() {
        let sources = vec![
            mock(SourceId::Weblio, Behaviour::Words(vec!["猫", "ネコ"])),
            mock(SourceId::Jisho, Behaviour::Words(vec!["ネコ", "にゃんこ"])),
            mock(SourceId::Wiktionary, Behaviour::Words(vec!["猫", "やつ"])),
        ];
        let first = lookup_with_sources(&request(5), &sources, &config()).await;
        for _ in 0..5 {
            assert_eq!(lookup_with_sources(&request(5), &sources, &config()).await, first);
        }
    }
}
