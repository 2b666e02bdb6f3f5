//! Deribit adapter tests against a mock HTTP server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use risk_monitor::infrastructure::exchange::deribit::RetryConfig;
use risk_monitor::{
    AccessToken, ClientCredentials, Currency, DeribitConfig, DeribitEnvironment,
    DeribitExchangeAdapter, ExchangeError, ExchangePort, InstrumentKind,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer) -> DeribitExchangeAdapter {
    adapter_with_retry(server, RetryConfig::single_attempt())
}

fn adapter_with_retry(server: &MockServer, retry: RetryConfig) -> DeribitExchangeAdapter {
    DeribitExchangeAdapter::new(
        DeribitConfig::new(DeribitEnvironment::Testnet)
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(5))
            .with_retry(retry),
    )
    .unwrap()
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_backoff: Duration::from_millis(5),
        max_backoff: Duration::from_millis(20),
        multiplier: 2.0,
    }
}

fn token() -> AccessToken {
    AccessToken::new("test-token", Some(900))
}

fn rpc_result(result: serde_json::Value) -> serde_json::Value {
    json!({ "jsonrpc": "2.0", "result": result, "usIn": 1, "usOut": 2, "usDiff": 1, "testnet": true })
}

fn rpc_error(code: i64, message: &str) -> serde_json::Value {
    json!({ "jsonrpc": "2.0", "error": { "code": code, "message": message }, "testnet": true })
}

#[tokio::test]
async fn authenticate_with_client_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/auth"))
        .and(query_param("grant_type", "client_credentials"))
        .and(query_param("client_id", "my-id"))
        .and(query_param("client_secret", "my-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "access_token": "abc123",
            "expires_in": 900,
            "refresh_token": "def456",
            "scope": "connection mainaccount",
            "token_type": "bearer"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let token = adapter(&server)
        .authenticate(&ClientCredentials::new("my-id", "my-secret"))
        .await
        .unwrap();

    assert_eq!(token.secret(), "abc123");
    assert_eq!(token.expires_in_secs(), Some(900));
}

#[tokio::test]
async fn rejected_credentials_are_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(400).set_body_json(rpc_error(13004, "invalid_credentials")))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter(&server)
        .authenticate(&ClientCredentials::new("bad", "creds"))
        .await
        .unwrap_err();

    match err {
        ExchangeError::Authentication { message } => {
            assert!(message.contains("13004"));
            assert!(!message.contains("creds"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn authentication_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter_with_retry(&server, fast_retry(3))
        .authenticate(&ClientCredentials::new("id", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::Authentication { .. }));
}

#[tokio::test]
async fn account_summary_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_account_summary"))
        .and(query_param("currency", "BTC"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "currency": "BTC",
            "equity": 10.0,
            "balance": 9.5,
            "maintenance_margin": 1.0,
            "initial_margin": 1.5,
            "margin_model": "segregated_sm"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let summary = adapter(&server)
        .get_account_summary(&token(), &Currency::new("BTC").unwrap())
        .await
        .unwrap();

    assert_eq!(summary.equity, dec!(10));
    assert_eq!(summary.maintenance_margin, dec!(1));
    assert!(summary.needs_index_price());
}

#[tokio::test]
async fn account_summary_keeps_usd_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_account_summary"))
        .and(query_param("currency", "USDC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "currency": "USDC",
            "equity": 25000.0,
            "maintenance_margin": 1200.5,
            "equity_usd": 24995.0,
            "maintenance_margin_usd": 1200.26
        }))))
        .mount(&server)
        .await;

    let summary = adapter(&server)
        .get_account_summary(&token(), &Currency::new("usdc").unwrap())
        .await
        .unwrap();

    assert_eq!(summary.equity_usd, Some(dec!(24995)));
    assert_eq!(summary.maintenance_margin_usd, Some(dec!(1200.26)));
}

#[tokio::test]
async fn index_price_uses_usd_index_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/get_index_price"))
        .and(query_param("index_name", "usdc_usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "index_price": 0.9998,
            "estimated_delivery_price": 0.9998
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let price = adapter(&server)
        .get_index_price(&Currency::new("USDC").unwrap())
        .await
        .unwrap();

    assert_eq!(price.price_usd, dec!(0.9998));
}

#[tokio::test]
async fn positions_filtered_by_currency_and_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_positions"))
        .and(query_param("currency", "BTC"))
        .and(query_param("kind", "option"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!([
            {
                "instrument_name": "BTC-27DEC24-100000-C",
                "size": -5.0,
                "mark_price": 0.01,
                "kind": "option",
                "direction": "sell",
                "average_price": 0.02
            },
            {
                "instrument_name": "BTC-27DEC24-80000-P",
                "size": 3.0,
                "mark_price": 0.02,
                "kind": "option",
                "direction": "buy",
                "average_price": 0.015
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let positions = adapter(&server)
        .get_positions(&token(), &Currency::new("BTC").unwrap(), InstrumentKind::Option)
        .await
        .unwrap();

    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].instrument_name, "BTC-27DEC24-100000-C");
    assert_eq!(positions[0].size, dec!(-5));
    assert!(positions[1].option_right().is_some());
}

#[tokio::test]
async fn server_error_without_retry_is_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/get_index_price"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter(&server)
        .get_index_price(&Currency::new("BTC").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ExchangeError::Request {
            message: "HTTP error: 502 - bad gateway".to_string()
        }
    );
}

#[tokio::test]
async fn server_error_retried_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/get_index_price"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/get_index_price"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(rpc_result(json!({ "index_price": 50000.0 }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let price = adapter_with_retry(&server, fast_retry(3))
        .get_index_price(&Currency::new("BTC").unwrap())
        .await
        .unwrap();

    assert_eq!(price.price_usd, dec!(50000));
}

#[tokio::test]
async fn retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_positions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let err = adapter_with_retry(&server, fast_retry(2))
        .get_positions(&token(), &Currency::new("ETH").unwrap(), InstrumentKind::Option)
        .await
        .unwrap_err();

    match err {
        ExchangeError::Request { message } => assert!(message.contains("Max retries exceeded")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rpc_error_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_account_summary"))
        .respond_with(ResponseTemplate::new(400).set_body_json(rpc_error(10004, "order_not_found")))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .get_account_summary(&token(), &Currency::new("BTC").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ExchangeError::Request {
            message: "API error: 10004 - order_not_found".to_string()
        }
    );
}

#[tokio::test]
async fn expired_token_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_account_summary"))
        .respond_with(ResponseTemplate::new(400).set_body_json(rpc_error(13009, "unauthorized")))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .get_account_summary(&token(), &Currency::new("BTC").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::Authentication { .. }));
}

#[tokio::test]
async fn undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/get_account_summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "currency": "BTC",
            "balance": 1.0
        }))))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .get_account_summary(&token(), &Currency::new("BTC").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidResponse { .. }));
}
