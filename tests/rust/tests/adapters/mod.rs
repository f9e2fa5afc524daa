//! Source adapter tests against a mocked HTTP platform.

use pretty_assertions::assert_eq;
use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mcpscout_core::sources::{
    CuratedListAdapter, GithubAdapter, HuggingFaceAdapter, WebSearchAdapter,
};
use mcpscout_core::SourceAdapter;
use tests::fixtures::WEATHER_JSON;

#[tokio::test]
async fn test_github_adapter_fetches_and_scores_code_search_hits() {
    let server = MockServer::start().await;
    let html_url = format!("{}/acme/tools/blob/main/weather.mcp.json", server.uri());
    let raw_url = format!("{}/acme/tools/raw/main/weather.mcp.json", server.uri());

    Mock::given(method("GET"))
        .and(path("/search/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "items": [{
                "name": "weather.mcp.json",
                "html_url": html_url,
                "download_url": raw_url,
                "repository": {
                    "full_name": "acme/tools",
                    "description": "MCP tool collection",
                    "stargazers_count": 42
                }
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acme/tools/raw/main/weather.mcp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_JSON))
        .mount(&server)
        .await;

    let adapter = GithubAdapter::new(reqwest::Client::new())
        .with_api_base(server.uri())
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 1).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.source_platform, "github");
    assert_eq!(result.name, "weather-tool");
    assert_eq!(result.repository.as_deref(), Some("acme/tools"));
    assert_eq!(result.stars, Some(42));
    assert!(result.validated);
    // 0.70 document score + 0.1 stars>10 + 0.1 ".mcp." marker + 0.1 "mcp"
    // in the result title, clamped at 1.0.
    assert!((result.confidence_score - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_github_adapter_unreachable_platform_yields_empty() {
    let server = MockServer::start().await;
    // No mounted routes: every search URL 404s.

    let adapter = GithubAdapter::new(reqwest::Client::new())
        .with_api_base(server.uri())
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 5).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_github_adapter_skips_unfetchable_candidates() {
    let server = MockServer::start().await;
    let good_raw = format!("{}/acme/good/raw/main/good.mcp.json", server.uri());

    Mock::given(method("GET"))
        .and(path("/search/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "name": "missing.mcp.json",
                    "html_url": format!("{}/acme/bad/blob/main/missing.mcp.json", server.uri()),
                    "repository": {"full_name": "acme/bad"}
                },
                {
                    "name": "good.mcp.json",
                    "html_url": format!("{}/acme/good/blob/main/good.mcp.json", server.uri()),
                    "download_url": good_raw,
                    "repository": {"full_name": "acme/good"}
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acme/good/raw/main/good.mcp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_JSON))
        .mount(&server)
        .await;

    let adapter = GithubAdapter::new(reqwest::Client::new())
        .with_api_base(server.uri())
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 1).await;

    // The 404ing candidate is skipped, not fatal.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].repository.as_deref(), Some("acme/good"));
}

#[tokio::test]
async fn test_huggingface_adapter_probes_well_known_filenames() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "acme/weather-mcp", "description": "Weather MCP dataset", "likes": 7}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acme/weather-mcp/raw/main/mcp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_JSON))
        .mount(&server)
        .await;

    let adapter = HuggingFaceAdapter::new(reqwest::Client::new())
        .with_base(server.uri())
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 1).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.source_platform, "huggingface");
    assert_eq!(result.repository.as_deref(), Some("acme/weather-mcp"));
    assert_eq!(result.stars, Some(7));
    assert_eq!(
        result.source_url,
        format!("{}/acme/weather-mcp", server.uri())
    );
}

#[tokio::test]
async fn test_curated_adapter_follows_markdown_links() {
    let server = MockServer::start().await;

    // The link target carries a code-host marker in its path so it passes
    // the candidate filter while staying on the mock server.
    let listing = format!(
        "# Awesome MCP\n\n- [Weather MCP]({}/github.com/acme/weather/blob/main/weather.mcp.json) - forecasts\n",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/lists/awesome.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/github.com/acme/weather/raw/main/weather.mcp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_JSON))
        .mount(&server)
        .await;

    let adapter = CuratedListAdapter::new(reqwest::Client::new())
        .with_list_urls(vec![format!("{}/lists/awesome.md", server.uri())])
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 5).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.source_platform, "awesome");
    assert_eq!(result.repository.as_deref(), Some("acme/weather"));
}

#[tokio::test]
async fn test_web_adapter_follows_structured_result_links() {
    let server = MockServer::start().await;

    let page = format!(
        r#"<html><body>
            <a href="https://duckduckgo.com/settings">settings</a>
            <a href="{}/files/weather.mcp.json">result</a>
            <a href="{}/about.html">about</a>
        </body></html>"#,
        server.uri(),
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/weather.mcp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_JSON))
        .mount(&server)
        .await;

    let adapter = WebSearchAdapter::new(reqwest::Client::new())
        .with_search_base(format!("{}/html", server.uri()))
        .with_request_delay(Duration::ZERO);
    let results = adapter.discover("weather", 5).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_platform, "web");
    assert_eq!(results[0].name, "weather-tool");
}
