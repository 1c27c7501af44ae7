//! Binance Futures Testnet connector.
//!
//! Turns validated order intents into authenticated HTTP calls against the
//! testnet REST API and maps responses into data or a typed
//! [`ConnectorError`]. Signed calls carry the `X-MBX-APIKEY` header plus a
//! `timestamp`/`signature` query pair; metadata calls are public.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use super::signer::RequestSigner;
use crate::domain::errors::ConnectorError;
use crate::domain::ports::ExchangeConnector;
use crate::domain::trading::types::{
    OrderRequest, OrderResult, OrderType, SymbolInfo, TimeInForce,
};
use crate::infrastructure::core::http_client_factory::HttpClientFactory;

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Binance error code for an unknown symbol.
const INVALID_SYMBOL_CODE: i64 = -1121;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    #[serde(default)]
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: Decimal,
}

pub struct BinanceTestnetConnector {
    client: Client,
    api_key: String,
    signer: RequestSigner,
    base_url: String,
}

impl BinanceTestnetConnector {
    pub fn new(api_key: String, api_secret: String, base_url: String) -> Self {
        Self {
            client: HttpClientFactory::create_client(),
            api_key,
            signer: RequestSigner::new(api_secret),
            base_url,
        }
    }

    /// Current time in epoch milliseconds, generated at call time. The
    /// exchange rejects requests whose timestamp falls outside its recv
    /// window.
    fn timestamp_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    async fn api_error(response: reqwest::Response) -> ConnectorError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        api_error_from(status, &body)
    }
}

/// Map a non-success response body into the API error taxonomy. Binance
/// rejections come as `{"code": <i64>, "msg": <string>}`; anything else is
/// carried verbatim without a code.
fn api_error_from(status: u16, body: &str) -> ConnectorError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => ConnectorError::Api {
            status,
            code: Some(parsed.code),
            message: parsed.msg,
        },
        Err(_) => ConnectorError::Api {
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}

/// Build the signed parameter list for an order POST. MARKET and LIMIT are
/// the only request shapes; LIMIT additionally carries price and a GTC
/// time-in-force.
fn order_params(request: &OrderRequest, timestamp: i64) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", request.symbol.clone()),
        ("side", request.side.to_string()),
        ("type", request.order_type.to_string()),
        ("quantity", request.quantity.to_string()),
    ];

    if request.order_type == OrderType::Limit
        && let Some(price) = request.price
    {
        params.push(("price", price.to_string()));
        params.push(("timeInForce", TimeInForce::default().to_string()));
    }

    params.push(("timestamp", timestamp.to_string()));
    params
}

#[async_trait]
impl ExchangeConnector for BinanceTestnetConnector {
    async fn test_connection(&self) -> bool {
        info!("Testing API connection...");

        let params = vec![("timestamp", Self::timestamp_ms().to_string())];
        let url = format!(
            "{}/fapi/v2/account?{}",
            self.base_url,
            self.signer.signed_query(&params)
        );

        match self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!("API connection successful");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(%status, body = %body, "API connection failed");
                false
            }
            Err(e) => {
                error!(error = %e, "Connection test failed");
                false
            }
        }
    }

    async fn get_symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, ConnectorError> {
        debug!(symbol, "Fetching symbol info");

        let url = format!("{}/fapi/v1/exchangeInfo", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let info: ExchangeInfo =
            response
                .json()
                .await
                .map_err(|e| ConnectorError::Unexpected {
                    reason: format!("failed to decode exchange info: {e}"),
                })?;

        let found = info.symbols.into_iter().find(|s| s.symbol == symbol);
        match &found {
            Some(s) => debug!(symbol, status = %s.status, "Symbol info retrieved"),
            None => warn!(symbol, "Symbol not found in exchange info"),
        }

        Ok(found)
    }

    async fn get_current_price(&self, symbol: &str) -> Result<Option<Decimal>, ConnectorError> {
        let url = format!("{}/fapi/v1/ticker/price?symbol={}", self.base_url, symbol);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let err = Self::api_error(response).await;
            if let ConnectorError::Api {
                code: Some(INVALID_SYMBOL_CODE),
                ..
            } = err
            {
                warn!(symbol, "Symbol unknown to the ticker endpoint");
                return Ok(None);
            }
            return Err(err);
        }

        let ticker: TickerPrice =
            response
                .json()
                .await
                .map_err(|e| ConnectorError::Unexpected {
                    reason: format!("failed to decode ticker price: {e}"),
                })?;

        debug!(symbol, price = %ticker.price, "Current price fetched");
        Ok(Some(ticker.price))
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, ConnectorError> {
        let params = order_params(request, Self::timestamp_ms());

        info!(
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type,
            quantity = %request.quantity,
            "Placing order"
        );

        let url = format!(
            "{}/fapi/v1/order?{}",
            self.base_url,
            self.signer.signed_query(&params)
        );

        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::api_error(response).await;
            error!(%status, error = %err, "Order placement rejected");
            return Err(err);
        }

        let result: OrderResult =
            response
                .json()
                .await
                .map_err(|e| ConnectorError::Unexpected {
                    reason: format!("failed to decode order response: {e}"),
                })?;

        info!(
            order_id = result.order_id,
            status = %result.status,
            "Order placed successfully"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trading::types::OrderSide;
    use rust_decimal_macros::dec;

    fn market_request() -> OrderRequest {
        OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: dec!(0.001),
            price: None,
        }
    }

    #[test]
    fn test_market_order_params_shape() {
        let params = order_params(&market_request(), 1499827319559);
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["symbol", "side", "type", "quantity", "timestamp"]);
        assert_eq!(params[2].1, "MARKET");
        assert_eq!(params[4].1, "1499827319559");
    }

    #[test]
    fn test_limit_order_params_include_price_and_gtc() {
        let request = OrderRequest {
            symbol: "ETHUSDT".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            quantity: dec!(0.01),
            price: Some(dec!(2500.5)),
        };

        let params = order_params(&request, 1499827319559);
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["symbol", "side", "type", "quantity", "price", "timeInForce", "timestamp"]
        );
        assert_eq!(params[4].1, "2500.5");
        assert_eq!(params[5].1, "GTC");
    }

    #[test]
    fn test_api_error_from_binance_rejection() {
        let err = api_error_from(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        match err {
            ConnectorError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(-1121));
                assert_eq!(message, "Invalid symbol.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_unparseable_body() {
        let err = api_error_from(502, "Bad Gateway\n");
        match err {
            ConnectorError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert_eq!(code, None);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
