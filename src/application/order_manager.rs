//! Order Orchestrator
//!
//! Composes the parameter validator and the exchange connector into a single
//! placement pipeline: validate, gate on tradability, dispatch the matching
//! signed request variant, normalize the response. Single pass, no retries,
//! no interactive prompting; every failure propagates as a typed
//! [`OrderError`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::OrderError;
use crate::domain::ports::ExchangeConnector;
use crate::domain::trading::types::{OrderRequest, OrderResult, OrderType};
use crate::domain::trading::validation::validate_order_params;

pub struct OrderManager {
    connector: Arc<dyn ExchangeConnector>,
}

impl OrderManager {
    pub fn new(connector: Arc<dyn ExchangeConnector>) -> Self {
        Self { connector }
    }

    /// Validate raw order parameters and place the order.
    ///
    /// Validation failures never reach the network. The instrument's
    /// metadata is fetched fresh on every call; a symbol that is absent or
    /// not in `TRADING` status aborts before any signed request is built.
    pub async fn place_order(
        &self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: &str,
        price: Option<&str>,
    ) -> Result<OrderResult, OrderError> {
        let request = validate_order_params(symbol, side, order_type, quantity, price)?;
        info!(
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type,
            quantity = %request.quantity,
            "Order validated"
        );

        let Some(info) = self.connector.get_symbol_info(&request.symbol).await? else {
            return Err(OrderError::SymbolNotFound {
                symbol: request.symbol,
            });
        };
        if !info.is_trading() {
            return Err(OrderError::SymbolNotTrading {
                symbol: info.symbol,
                status: info.status,
            });
        }
        debug!(symbol = %request.symbol, "Symbol is tradable");

        self.dispatch(&request).await
    }

    async fn dispatch(&self, request: &OrderRequest) -> Result<OrderResult, OrderError> {
        match request.order_type {
            OrderType::Market => {
                info!(
                    symbol = %request.symbol,
                    side = %request.side,
                    quantity = %request.quantity,
                    "Dispatching MARKET order"
                );
            }
            OrderType::Limit => {
                info!(
                    symbol = %request.symbol,
                    side = %request.side,
                    quantity = %request.quantity,
                    price = %request.price.unwrap_or_default(),
                    "Dispatching LIMIT order"
                );
            }
        }

        let result = self.connector.place_order(request).await?;

        info!(
            order_id = result.order_id,
            status = %result.status,
            executed_qty = %result.executed_qty,
            "Order response received"
        );

        Ok(result)
    }
}
