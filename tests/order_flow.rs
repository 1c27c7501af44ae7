//! Order pipeline integration tests.
//!
//! Drives the orchestrator through a recording mock connector to check that
//! validation failures never reach the network, the tradability gate fires
//! before any order POST, and connector outcomes pass through unchanged.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use rustnet::application::order_manager::OrderManager;
use rustnet::domain::errors::{ConnectorError, OrderError, ValidationError};
use rustnet::domain::ports::ExchangeConnector;
use rustnet::domain::trading::types::{OrderRequest, OrderResult, SymbolInfo};

/// Mock connector that records how often each endpoint is hit.
struct MockConnector {
    symbol_info: Option<SymbolInfo>,
    rejection: Option<(u16, i64, String)>,
    info_calls: AtomicUsize,
    place_calls: AtomicUsize,
}

impl MockConnector {
    fn with_status(symbol: &str, status: &str) -> Self {
        let info: SymbolInfo = serde_json::from_value(serde_json::json!({
            "symbol": symbol,
            "status": status,
            "filters": [],
        }))
        .unwrap();

        Self {
            symbol_info: Some(info),
            rejection: None,
            info_calls: AtomicUsize::new(0),
            place_calls: AtomicUsize::new(0),
        }
    }

    fn trading(symbol: &str) -> Self {
        Self::with_status(symbol, "TRADING")
    }

    fn not_found() -> Self {
        Self {
            symbol_info: None,
            rejection: None,
            info_calls: AtomicUsize::new(0),
            place_calls: AtomicUsize::new(0),
        }
    }

    fn rejecting(symbol: &str, status: u16, code: i64, message: &str) -> Self {
        let mut mock = Self::trading(symbol);
        mock.rejection = Some((status, code, message.to_string()));
        mock
    }

    fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    fn place_calls(&self) -> usize {
        self.place_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeConnector for MockConnector {
    async fn test_connection(&self) -> bool {
        true
    }

    async fn get_symbol_info(&self, _symbol: &str) -> Result<Option<SymbolInfo>, ConnectorError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.symbol_info.clone())
    }

    async fn get_current_price(&self, _symbol: &str) -> Result<Option<Decimal>, ConnectorError> {
        Ok(Some(dec!(50000)))
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, ConnectorError> {
        self.place_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((status, code, message)) = &self.rejection {
            return Err(ConnectorError::Api {
                status: *status,
                code: Some(*code),
                message: message.clone(),
            });
        }

        Ok(OrderResult {
            order_id: 22542179,
            client_order_id: "mock".to_string(),
            symbol: request.symbol.clone(),
            status: "NEW".to_string(),
            order_type: request.order_type.to_string(),
            side: request.side.to_string(),
            price: request.price.unwrap_or_default(),
            orig_qty: request.quantity,
            time_in_force: "GTC".to_string(),
            ..OrderResult::default()
        })
    }
}

#[tokio::test]
async fn validation_failure_never_touches_the_connector() {
    let mock = Arc::new(MockConnector::trading("BTCUSDT"));
    let manager = OrderManager::new(mock.clone());

    let cases = [
        ("BTCEUR", "BUY", "MARKET", "0.01", None),
        ("BTCUSDT", "HOLD", "MARKET", "0.01", None),
        ("BTCUSDT", "BUY", "STOP", "0.01", None),
        ("BTCUSDT", "BUY", "MARKET", "abc", None),
        ("BTCUSDT", "BUY", "MARKET", "-0.5", None),
        ("BTCUSDT", "BUY", "LIMIT", "0.01", None),
        ("BTCUSDT", "BUY", "MARKET", "0.01", Some("50000")),
    ];

    for (symbol, side, order_type, quantity, price) in cases {
        let result = manager
            .place_order(symbol, side, order_type, quantity, price)
            .await;
        assert!(
            matches!(result, Err(OrderError::Validation(_))),
            "{symbol}/{side}/{order_type}/{quantity} should fail validation"
        );
    }

    assert_eq!(mock.info_calls(), 0);
    assert_eq!(mock.place_calls(), 0);
}

#[tokio::test]
async fn halted_symbol_aborts_before_any_post() {
    let mock = Arc::new(MockConnector::with_status("BTCUSDT", "BREAK"));
    let manager = OrderManager::new(mock.clone());

    let result = manager
        .place_order("BTCUSDT", "BUY", "MARKET", "0.01", None)
        .await;

    match result {
        Err(OrderError::SymbolNotTrading { symbol, status }) => {
            assert_eq!(symbol, "BTCUSDT");
            assert_eq!(status, "BREAK");
        }
        other => panic!("expected SymbolNotTrading, got {other:?}"),
    }
    assert_eq!(mock.info_calls(), 1);
    assert_eq!(mock.place_calls(), 0);
}

#[tokio::test]
async fn unknown_symbol_is_rejected() {
    let mock = Arc::new(MockConnector::not_found());
    let manager = OrderManager::new(mock.clone());

    let result = manager
        .place_order("XYZUSDT", "SELL", "MARKET", "1", None)
        .await;

    assert!(matches!(
        result,
        Err(OrderError::SymbolNotFound { symbol }) if symbol == "XYZUSDT"
    ));
    assert_eq!(mock.place_calls(), 0);
}

#[tokio::test]
async fn market_order_round_trip() {
    let mock = Arc::new(MockConnector::trading("BTCUSDT"));
    let manager = OrderManager::new(mock.clone());

    let result = manager
        .place_order("btcusdt", "buy", "market", "0.01", None)
        .await
        .unwrap();

    assert_eq!(result.symbol, "BTCUSDT");
    assert_eq!(result.side, "BUY");
    assert_eq!(result.order_type, "MARKET");
    assert_eq!(result.orig_qty, dec!(0.01));
    assert_eq!(mock.info_calls(), 1);
    assert_eq!(mock.place_calls(), 1);
}

#[tokio::test]
async fn limit_order_round_trip() {
    let mock = Arc::new(MockConnector::trading("ETHUSDT"));
    let manager = OrderManager::new(mock.clone());

    let result = manager
        .place_order("ETHUSDT", "SELL", "LIMIT", "0.01", Some("2500.5"))
        .await
        .unwrap();

    assert_eq!(result.order_type, "LIMIT");
    assert_eq!(result.price, dec!(2500.5));
    assert_eq!(result.time_in_force, "GTC");
    assert_eq!(mock.place_calls(), 1);
}

#[tokio::test]
async fn exchange_rejection_surfaces_status_and_message() {
    let mock = Arc::new(MockConnector::rejecting(
        "BTCUSDT",
        400,
        -1121,
        "Invalid symbol.",
    ));
    let manager = OrderManager::new(mock.clone());

    let result = manager
        .place_order("BTCUSDT", "BUY", "MARKET", "0.01", None)
        .await;

    match result {
        Err(OrderError::Connector(ConnectorError::Api {
            status,
            code,
            message,
        })) => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(-1121));
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("expected Api error passthrough, got {other:?}"),
    }
    assert_eq!(mock.place_calls(), 1);
}

#[tokio::test]
async fn validation_error_kind_is_inspectable() {
    let mock = Arc::new(MockConnector::trading("BTCUSDT"));
    let manager = OrderManager::new(mock);

    let result = manager
        .place_order("BTCUSDT", "BUY", "LIMIT", "0.01", None)
        .await;

    assert!(matches!(
        result,
        Err(OrderError::Validation(ValidationError::PriceRequired))
    ));
}
