//! Binance USDT-M Futures testnet adapters.

pub mod connector;
pub mod signer;

pub use connector::BinanceTestnetConnector;
pub use signer::RequestSigner;
