//! Configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Binance Futures Testnet credentials and endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from the environment. Credentials are required;
    /// the base URL falls back to the public testnet endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("BINANCE_TESTNET_API_KEY").context("BINANCE_TESTNET_API_KEY is not set")?;
        let api_secret = env::var("BINANCE_TESTNET_API_SECRET")
            .context("BINANCE_TESTNET_API_SECRET is not set")?;
        let base_url = env::var("BINANCE_TESTNET_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TESTNET_BASE_URL.to_string());

        Ok(Self {
            api_key,
            api_secret,
            base_url,
        })
    }
}
