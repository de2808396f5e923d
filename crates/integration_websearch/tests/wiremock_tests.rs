//! Integration tests for the Tavily client using WireMock
//!
//! These tests mock HTTP responses to verify client behavior without
//! making actual API calls.

use integration_websearch::{SearchProvider, TavilyClient, WebSearchConfig, WebSearchError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

/// Sample Tavily search response
fn tavily_success_response() -> serde_json::Value {
    serde_json::json!({
        "query": "best places to visit in Hunza",
        "follow_up_questions": null,
        "answer": null,
        "images": [],
        "results": [
            {
                "title": "Attabad Lake",
                "url": "https://example.com/attabad",
                "content": "A turquoise lake formed by a landslide in 2010.",
                "score": 0.97,
                "raw_content": null
            },
            {
                "title": "Baltit Fort",
                "url": "https://example.com/baltit",
                "content": "A 700-year-old fort overlooking Karimabad.",
                "score": 0.91,
                "raw_content": null
            }
        ],
        "response_time": 1.42
    })
}

fn create_client(base_url: &str) -> TavilyClient {
    let config = WebSearchConfig {
        api_key: Some("tvly-test-key".to_string()),
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..Default::default()
    };
    TavilyClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_search_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(serde_json::json!({
            "api_key": "tvly-test-key",
            "query": "best places to visit in Hunza",
            "search_depth": "basic",
            "max_results": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let response = client
        .search("best places to visit in Hunza", 3)
        .await
        .unwrap();

    assert_eq!(response.provider, "tavily");
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].title, "Attabad Lake");
    assert!(response.search_time_ms.is_some());
    assert_eq!(
        response.to_markdown(),
        "- **Attabad Lake**: A turquoise lake formed by a landslide in 2010. [Link](https://example.com/attabad)\n\
         - **Baltit Fort**: A 700-year-old fort overlooking Karimabad. [Link](https://example.com/baltit)"
    );
}

#[tokio::test]
async fn test_search_trims_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(serde_json::json!({"query": "Skardu hotels"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let response = client.search("  Skardu hotels \n", 3).await.unwrap();

    assert_eq!(response.query, "Skardu hotels");
}

#[tokio::test]
async fn test_partial_results_use_placeholders() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"url": "https://example.com/x"}]
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let response = client.search("x", 3).await.unwrap();

    assert_eq!(
        response.to_markdown(),
        "- **No Title**: No Content [Link](https://example.com/x)"
    );
}

#[tokio::test]
async fn test_empty_results_render_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": "zzqx",
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let response = client.search("zzqx", 3).await.unwrap();

    assert!(response.is_empty());
    assert_eq!(response.to_markdown(), "No results found.");
}

#[tokio::test]
async fn test_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": {"error": "Unauthorized: missing or invalid API key."}
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let result = client.search("Hunza", 3).await;

    assert!(
        matches!(result, Err(WebSearchError::AuthenticationFailed(m)) if m.starts_with("Unauthorized"))
    );
}

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let result = client.search("Hunza", 3).await;

    assert!(matches!(
        result,
        Err(WebSearchError::RateLimitExceeded {
            retry_after_secs: Some(60)
        })
    ));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let err = client.search("Hunza", 3).await.unwrap_err();

    assert!(matches!(err, WebSearchError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let result = client.search("Hunza", 3).await;

    assert!(matches!(result, Err(WebSearchError::ParseError(_))));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    };
    let client = TavilyClient::new(config).unwrap();
    let result = client.search("Hunza", 3).await;

    assert!(matches!(result, Err(WebSearchError::ConfigurationError(_))));
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server.uri());

    let result = client.search("   ", 3).await;

    assert!(matches!(result, Err(WebSearchError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tavily_success_response())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        api_key: Some("k".to_string()),
        base_url: mock_server.uri(),
        timeout_secs: 1,
        ..Default::default()
    };
    let client = TavilyClient::new(config).unwrap();
    let result = client.search("Hunza", 3).await;

    assert!(matches!(
        result,
        Err(WebSearchError::Timeout { timeout_secs: 1 })
    ));
}
