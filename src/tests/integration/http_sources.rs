//! HTTP Collaborator Integration Tests
//!
//! Drives the reqwest-backed page source and the mathjs evaluator against
//! wiremock servers, alone and wired into a service from configuration.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{AppConfig, SourceConfig};
use crate::core::properties::error::{ExtractError, RangeError};
use crate::core::properties::source::build_client;
use crate::core::properties::{
    DocumentSource, ExpressionEvaluator, HttpSource, MathJsEvaluator, PropertyService,
};
use crate::core::query::QuerySpec;
use crate::tests::common::*;

fn client() -> reqwest::Client {
    build_client(&SourceConfig::default()).unwrap()
}

async fn math_server(expr: &str, body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/"))
        .and(query_param("expr", expr))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

// =============================================================================
// Evaluator
// =============================================================================

#[tokio::test]
async fn test_evaluator_sends_expression() {
    let server = math_server("30000000*8", "240000000", 200).await;
    let evaluator = MathJsEvaluator::new(format!("{}/v4/", server.uri()), client());

    assert_eq!(evaluator.evaluate("30000000*8").await.unwrap(), 240000000);
}

#[tokio::test]
async fn test_evaluator_rounds_exponent_output() {
    let server = math_server("2^63 - 1", "9.223372036854776e+18", 200).await;
    let evaluator = MathJsEvaluator::new(format!("{}/v4/", server.uri()), client());

    assert_eq!(evaluator.evaluate("2^63 - 1").await.unwrap(), i64::MAX);
}

#[tokio::test]
async fn test_evaluator_error_status() {
    let server = math_server("1/0", "Error: division by zero", 400).await;
    let evaluator = MathJsEvaluator::new(format!("{}/v4/", server.uri()), client());

    let err = evaluator.evaluate("1/0").await.unwrap_err();
    assert!(matches!(err, RangeError::EvaluatorUnreachable { .. }));
}

#[tokio::test]
async fn test_evaluator_non_numeric_output() {
    let server = math_server("1/0", "Infinity", 200).await;
    let evaluator = MathJsEvaluator::new(format!("{}/v4/", server.uri()), client());

    let err = evaluator.evaluate("1/0").await.unwrap_err();
    assert!(matches!(err, RangeError::EvaluatorOutput { ref output, .. } if output == "Infinity"));
}

// =============================================================================
// Page Source
// =============================================================================

#[tokio::test]
async fn test_http_source_fetches_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/Server.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let source = HttpSource::new(client());
    let body = source
        .fetch(&format!("{}/w/Server.properties", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<html></html>");
}

#[tokio::test]
async fn test_http_source_error_status_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpSource::new(client());
    let err = source.fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, ExtractError::SourceUnreachable { ref reason, .. } if reason.contains("503")));
}

// =============================================================================
// Configured Service
// =============================================================================

#[tokio::test]
async fn test_configured_service_resolves_expression_and_translation() {
    let server = MockServer::start().await;
    let localized_url = format!("{}/de/w/Server.properties", server.uri());

    let rows = vec![
        RowFixture::new("max-world-size", "integer (1-(30000000*8))", "29999984", "World radius."),
        RowFixture::new("motd", "string", "A Minecraft Server", "Message of the day."),
    ];
    Mock::given(method("GET"))
        .and(path("/w/Server.properties"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(english_page(&rows, &[("de", localized_url.as_str())])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/de/w/Server.properties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(localized_page(&[("max-world-size", "Weltradius.")], false)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/"))
        .and(query_param("expr", "30000000*8"))
        .respond_with(ResponseTemplate::new(200).set_body_string("240000000"))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        source: SourceConfig {
            wiki_url: format!("{}/w/Server.properties", server.uri()),
            math_api_url: format!("{}/v4/", server.uri()),
            ..SourceConfig::default()
        },
        ..AppConfig::default()
    };
    let service = PropertyService::from_config(&config).unwrap();

    let spec = QuerySpec::default().with_locale(Some("de".parse().unwrap()));
    let records = service.query(&spec).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!((records[0].values.min, records[0].values.max), (1, 240000000));
    assert_eq!(records[0].description, "Weltradius.");
    assert_eq!(records[1].description, "Message of the day.");
}
