//! End-to-end assembly tests against a mock brokerage API.
//!
//! Exercises the full fetch-normalize-compute pipeline: a wiremock double
//! stands in for the Alpaca REST API and a tempdir holds the flat data
//! files, so every degrade policy is observable from the outside.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vantage_server::broker::AlpacaClient;
use vantage_server::config::Credentials;
use vantage_server::dashboard::DashboardService;
use vantage_server::data::FileStore;

const TWO_YEARS_SECS: i64 = (2.0 * 365.25 * 86_400.0) as i64;

fn credentials() -> Credentials {
    Credentials::new("test-key".to_string(), "test-secret".to_string())
}

fn client_for(server: &MockServer) -> AlpacaClient {
    AlpacaClient::new(credentials(), server.uri(), Duration::from_secs(5))
        .expect("client should build")
}

async fn mount_history(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/account/portfolio/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_positions(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_orders(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn happy_path_computes_metrics_and_chart() {
    let server = MockServer::start().await;

    mount_positions(
        &server,
        json!([{
            "symbol": "AAPL",
            "qty": "10",
            "market_value": "1650.00",
            "unrealized_pl": "150.00",
            "avg_entry_price": "150.00",
            "current_price": "165.00"
        }]),
    )
    .await;
    mount_history(
        &server,
        json!({
            "equity": [100.0, 110.0, 121.0],
            "timestamp": [0, TWO_YEARS_SECS / 2, TWO_YEARS_SECS]
        }),
    )
    .await;
    mount_orders(&server, json!([])).await;

    let dir = tempfile::tempdir().expect("tempdir");
    tokio::fs::write(
        dir.path().join("benchmark_data.json"),
        json!({
            "sp500Data": [
                {"date": "2024-08-01", "value": 50.0},
                {"date": "2025-08-01", "value": 75.0},
                {"date": "2026-08-01", "value": 25.0}
            ],
            "nasdaqData": []
        })
        .to_string(),
    )
    .await
    .expect("write benchmark file");

    let service = DashboardService::new(client_for(&server), FileStore::new(dir.path()), 90);
    let response = service.assemble().await;

    assert!(response.error.is_none());
    assert!((response.metrics.total_return - 0.21).abs() < 1e-12);
    assert!((response.metrics.annualized_return - 0.1).abs() < 1e-6);
    assert!(response.metrics.sharpe_ratio.is_finite());

    assert_eq!(response.positions.len(), 1);
    assert_eq!(response.positions[0].symbol, "AAPL");

    assert_eq!(response.chart.labels.len(), 3);
    assert_eq!(response.chart.portfolio[0], 0.0);
    assert_eq!(response.chart.benchmarks.len(), 1);
    assert_eq!(response.chart.benchmarks[0].values, vec![0.0, 50.0, -50.0]);
}

#[tokio::test]
async fn auth_failure_fails_the_whole_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 40110000,
            "message": "access key verification failed"
        })))
        .mount(&server)
        .await;
    mount_history(&server, json!({"equity": [100.0, 110.0], "timestamp": [0, 86_400]})).await;
    mount_orders(&server, json!([])).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let service = DashboardService::new(client_for(&server), FileStore::new(dir.path()), 90);
    let response = service.assemble().await;

    // Shape stays well-formed; every section is zeroed and the message set.
    assert!(response.error.is_some());
    assert_eq!(response.metrics.total_return, 0.0);
    assert!(response.positions.is_empty());
    assert!(response.trades.is_empty());
    assert!(response.chart.labels.is_empty());
    assert_eq!(response.summary.win_rate.to_string(), "0.0");
}

#[tokio::test]
async fn single_source_failure_degrades_locally() {
    let server = MockServer::start().await;

    mount_positions(
        &server,
        json!([{"symbol": "MSFT", "qty": "1", "market_value": "400"}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v2/account/portfolio/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_orders(&server, json!([])).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let service = DashboardService::new(client_for(&server), FileStore::new(dir.path()), 90);
    let response = service.assemble().await;

    // History failed, so metrics degrade to zero, but the rest is intact
    // and no error is surfaced.
    assert!(response.error.is_none());
    assert_eq!(response.metrics.total_return, 0.0);
    assert_eq!(response.positions.len(), 1);
    assert_eq!(response.positions[0].symbol, "MSFT");
}

#[tokio::test]
async fn fills_flow_into_trade_aggregation() {
    let server = MockServer::start().await;

    mount_positions(&server, json!([])).await;
    mount_history(&server, json!({})).await;
    let recent = chrono::Utc::now() - chrono::Duration::days(3);
    mount_orders(
        &server,
        json!([
            {
                "id": "1",
                "symbol": "NVDA",
                "side": "buy",
                "status": "filled",
                "filled_qty": "2",
                "filled_avg_price": "120.50",
                "filled_at": recent.to_rfc3339()
            },
            {
                "id": "2",
                "symbol": "NVDA",
                "side": "buy",
                "status": "canceled"
            }
        ]),
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let service = DashboardService::new(client_for(&server), FileStore::new(dir.path()), 90);
    let response = service.assemble().await;

    assert!(response.error.is_none());
    // Only the filled order survives; it counts toward the total but is
    // neither a win nor a loss.
    assert_eq!(response.trades.len(), 1);
    assert_eq!(response.summary.total, 1);
    assert_eq!(response.summary.win_count, 0);
    assert_eq!(response.summary.win_rate.to_string(), "0.0");
}

#[tokio::test]
async fn service_is_shareable_across_handlers() {
    let server = MockServer::start().await;
    mount_positions(&server, json!([])).await;
    mount_history(&server, json!({})).await;
    mount_orders(&server, json!([])).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let service = Arc::new(DashboardService::new(
        client_for(&server),
        FileStore::new(dir.path()),
        90,
    ));

    let (first, second) = tokio::join!(service.assemble(), service.assemble());
    assert!(first.error.is_none());
    assert!(second.error.is_none());
}
