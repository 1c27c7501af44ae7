pub mod binance;
pub mod core;
pub mod logging;
