use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections produced by the parameter validator. These never reach the
/// network; the operator must correct the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Symbol cannot be empty")]
    EmptySymbol,

    #[error("Symbol '{symbol}' must end with 'USDT' for USDT-M futures")]
    BadQuoteSuffix { symbol: String },

    #[error("Symbol '{symbol}' is too short")]
    SymbolTooShort { symbol: String },

    #[error("Side must be 'BUY' or 'SELL', got '{value}'")]
    InvalidSide { value: String },

    #[error("Order type must be 'MARKET' or 'LIMIT', got '{value}'")]
    InvalidOrderType { value: String },

    #[error("Quantity '{value}' is not a valid number")]
    QuantityNotNumeric { value: String },

    #[error("Quantity must be greater than 0, got {quantity}")]
    QuantityNotPositive { quantity: Decimal },

    #[error("Price '{value}' is not a valid number")]
    PriceNotNumeric { value: String },

    #[error("Price must be greater than 0, got {price}")]
    PriceNotPositive { price: Decimal },

    #[error("Price is required for LIMIT orders")]
    PriceRequired,

    #[error("Price should not be specified for MARKET orders")]
    PriceNotAllowed,
}

/// Failures surfaced by the exchange connector.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The exchange explicitly rejected a well-formed signed request.
    /// `code` carries Binance's numeric error code when the body was parseable.
    #[error("Binance API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected connector failure: {reason}")]
    Unexpected { reason: String },
}

/// Terminal outcomes of the order placement pipeline.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Symbol {symbol} not found on the exchange")]
    SymbolNotFound { symbol: String },

    #[error("Symbol {symbol} is not currently trading (status: {status})")]
    SymbolNotTrading { symbol: String, status: String },

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}
