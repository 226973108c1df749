//! Lookup integration tests.
//!
//! Every source endpoint is pointed at a local wiremock server, so these
//! tests exercise the real clients, extractors, filter, aggregation and
//! ranking end to end without touching the network.

use kotoba_translate::{lookup, SourceEndpoints, SourceId, TranslateConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ────────────────────────────────────────────────────────────────────────────
// Fixtures
// ────────────────────────────────────────────────────────────────────────────

const WEBLIO_CAT: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="header"><a href="/login">ログイン</a></div>
<table><tr>
  <td class="content-explanation ej">猫、ネコ、宣伝</td>
</tr></table>
<div class="footer">Copyright © GRAS Group, Inc.</div>
</body>
</html>"#;

const WORDREFERENCE_CAT: &str = r#"<!DOCTYPE html>
<html>
<body>
<table class='WRD'>
  <tr class='wrtopsection'><td colspan='3' title='Principal Translations'>Principal Translations/主な訳語</td></tr>
  <tr class='langHeader'><td class='FrWrd'>English</td><td></td><td class='ToWrd'>日本語</td></tr>
  <tr><td class='FrWrd'>cat</td><td>(feline)</td><td class='ToWrd'>猫 <em class='POS2'>名</em></td></tr>
</table>
<table class='WRD'>
  <tr class='wrtopsection'><td colspan='3' title='Additional Translations'>Additional Translations/その他の訳語</td></tr>
  <tr><td class='FrWrd'>cat</td><td>(slang)</td><td class='ToWrd'>やつ</td></tr>
</table>
</body>
</html>"#;

fn jisho_body(words: &[&str]) -> serde_json::Value {
    let data: Vec<_> = words
        .iter()
        .map(|w| json!({ "japanese": [ { "word": w } ] }))
        .collect();
    json!({ "meta": { "status": 200 }, "data": data })
}

fn config_for(server: &MockServer, sources: Vec<SourceId>) -> TranslateConfig {
    TranslateConfig {
        sources,
        timeout_seconds: 1,
        user_agent: None,
        endpoints: SourceEndpoints::with_base(&server.uri()),
        libre_api_key: None,
    }
}

async fn mount_weblio(server: &MockServer, html: &str) {
    Mock::given(method("GET"))
        .and(path("/content/cat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

async fn mount_jisho(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/search/words"))
        .and(query_param("keyword", "cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation and ranking
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn agreeing_sources_rank_first_and_ads_are_dropped() {
    let server = MockServer::start().await;
    mount_weblio(&server, WEBLIO_CAT).await;
    mount_jisho(&server, jisho_body(&["猫", "ニャンコ"])).await;

    let config = config_for(&server, vec![SourceId::Weblio, SourceId::Jisho]);
    let result = lookup("cat", 3, &config).await.expect("lookup");

    assert_eq!(result.texts(), vec!["猫", "ネコ", "ニャンコ"]);
    assert_eq!(
        result.terms[0].sources,
        vec![SourceId::Weblio, SourceId::Jisho]
    );
}

#[tokio::test]
async fn all_four_default_sources_merge() {
    let server = MockServer::start().await;
    mount_weblio(&server, WEBLIO_CAT).await;
    mount_jisho(&server, jisho_body(&["猫"])).await;
    Mock::given(method("GET"))
        .and(path("/enja/cat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WORDREFERENCE_CAT))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/word/cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "senses": [ { "translations": [ { "lang_code": "ja", "word": "猫" } ] } ] }
        ])))
        .mount(&server)
        .await;

    let config = TranslateConfig {
        endpoints: SourceEndpoints::with_base(&server.uri()),
        timeout_seconds: 1,
        ..TranslateConfig::default()
    };
    let result = lookup("cat", 5, &config).await.expect("lookup");

    assert_eq!(result.terms[0].text, "猫");
    assert_eq!(result.terms[0].sources.len(), 4);
    // Column headers and section titles never make it through.
    assert!(!result.texts().iter().any(|t| t.contains("訳語")));
    assert!(result.texts().contains(&"やつ".to_string()));
}

#[tokio::test]
async fn results_are_identical_across_runs() {
    let server = MockServer::start().await;
    mount_weblio(&server, WEBLIO_CAT).await;
    mount_jisho(&server, jisho_body(&["ネコ", "にゃんこ", "猫"])).await;

    let config = config_for(&server, vec![SourceId::Jisho, SourceId::Weblio]);
    let first = lookup("cat", 5, &config).await.expect("lookup");
    for _ in 0..5 {
        let again = lookup("cat", 5, &config).await.expect("lookup");
        assert_eq!(again, first);
    }
}

#[tokio::test]
async fn limit_bounds_the_result() {
    let server = MockServer::start().await;
    mount_jisho(
        &server,
        jisho_body(&["一", "二", "三", "四", "五", "六", "七"]),
    )
    .await;

    let config = config_for(&server, vec![SourceId::Jisho]);
    let result = lookup("cat", 2, &config).await.expect("lookup");
    assert_eq!(result.texts(), vec!["一", "二"]);
}

// ────────────────────────────────────────────────────────────────────────────
// Filtering
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fifty_characters_kept_fifty_one_dropped() {
    let server = MockServer::start().await;
    let fifty = "猫".repeat(50);
    let fifty_one = "犬".repeat(51);
    mount_jisho(&server, jisho_body(&[&fifty_one, &fifty])).await;

    let config = config_for(&server, vec![SourceId::Jisho]);
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.texts(), vec![fifty]);
}

#[tokio::test]
async fn romaji_only_candidates_dropped() {
    let server = MockServer::start().await;
    mount_jisho(&server, jisho_body(&["neko", "猫"])).await;

    let config = config_for(&server, vec![SourceId::Jisho]);
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.texts(), vec!["猫"]);
}

// ────────────────────────────────────────────────────────────────────────────
// Failure isolation
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_source_failing_yields_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/cat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search/words"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(jisho_body(&["猫"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/word/cat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;
    // WordReference has no mock mounted and gets a 404.

    let config = TranslateConfig {
        endpoints: SourceEndpoints::with_base(&server.uri()),
        timeout_seconds: 1,
        ..TranslateConfig::default()
    };
    let result = lookup("cat", 5, &config).await.expect("lookup still succeeds");
    assert!(result.is_empty());
}

#[tokio::test]
async fn slow_source_does_not_block_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/cat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(WEBLIO_CAT)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_jisho(&server, jisho_body(&["猫"])).await;

    let config = config_for(&server, vec![SourceId::Weblio, SourceId::Jisho]);
    let started = std::time::Instant::now();
    let result = lookup("cat", 5, &config).await.expect("lookup");

    assert_eq!(result.texts(), vec!["猫"]);
    assert_eq!(result.terms[0].sources, vec![SourceId::Jisho]);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn malformed_payload_contributes_nothing() {
    let server = MockServer::start().await;
    mount_weblio(&server, WEBLIO_CAT).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search/words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "nope" })))
        .mount(&server)
        .await;

    let config = config_for(&server, vec![SourceId::Weblio, SourceId::Jisho]);
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.texts(), vec!["猫", "ネコ"]);
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scraped_sources_send_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/cat"))
        .and(header_regex("user-agent", "^Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEBLIO_CAT))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search/words"))
        .and(header_regex("user-agent", "^kotoba-translate/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jisho_body(&["猫"])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, vec![SourceId::Weblio, SourceId::Jisho]);
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.terms[0].sources.len(), 2);
}

#[tokio::test]
async fn libre_translate_posts_json_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({
            "q": "cat",
            "source": "en",
            "target": "ja",
            "api_key": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translatedText": "猫",
            "alternatives": ["ネコ"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = TranslateConfig {
        libre_api_key: Some("secret".into()),
        ..config_for(&server, vec![SourceId::LibreTranslate])
    };
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.texts(), vec!["猫", "ネコ"]);
}

#[tokio::test]
async fn duplicate_configured_sources_queried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search/words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jisho_body(&["猫"])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, vec![SourceId::Jisho, SourceId::Jisho]);
    let result = lookup("cat", 5, &config).await.expect("lookup");
    assert_eq!(result.terms[0].occurrence_count, 1);
}
