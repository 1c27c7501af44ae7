use crate::domain::errors::ConnectorError;
use crate::domain::trading::types::{OrderRequest, OrderResult, SymbolInfo};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// The single seam between order orchestration and the exchange.
///
/// One abstraction backs both signed and unsigned calls so their error
/// handling cannot diverge.
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// Probe the signed account endpoint. Returns true only on HTTP 200;
    /// every other status and all transport failures yield false. Callers
    /// use the boolean as a go/no-go gate, so this never propagates an error.
    async fn test_connection(&self) -> bool;

    /// Fetch instrument metadata for `symbol`. `Ok(None)` means the exchange
    /// does not list the symbol; transport and parse failures are `Err`.
    async fn get_symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, ConnectorError>;

    /// Fetch the current ticker price for `symbol`. `Ok(None)` means the
    /// exchange does not know the symbol.
    async fn get_current_price(&self, symbol: &str) -> Result<Option<Decimal>, ConnectorError>;

    /// Dispatch a validated order as a signed request and return the
    /// exchange's normalized response.
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, ConnectorError>;
}
