//! Binance Futures Testnet order placement CLI.
//!
//! Credentials come from `BINANCE_TESTNET_API_KEY` and
//! `BINANCE_TESTNET_API_SECRET`. The confirmation gate before dispatching an
//! order lives here, not in the orchestrator.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use rustnet::application::order_manager::OrderManager;
use rustnet::config::Config;
use rustnet::domain::ports::ExchangeConnector;
use rustnet::domain::trading::types::OrderResult;
use rustnet::infrastructure::binance::BinanceTestnetConnector;
use rustnet::infrastructure::logging::init_logging;

#[derive(Parser)]
#[command(author, version, about = "Binance Futures Testnet trading tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place an order on the futures testnet
    Order {
        /// Trading pair symbol (e.g., BTCUSDT)
        #[arg(short, long)]
        symbol: String,

        /// Order side: BUY or SELL
        #[arg(short = 'd', long)]
        side: String,

        /// Order type: MARKET or LIMIT
        #[arg(short = 't', long = "type")]
        order_type: String,

        /// Order quantity
        #[arg(short, long)]
        quantity: String,

        /// Order price (required for LIMIT orders)
        #[arg(short, long)]
        price: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Test API connection and credentials
    Test,
    /// Get the current market price for a symbol
    Price {
        /// Trading pair symbol
        #[arg(short, long, default_value = "BTCUSDT")]
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let log_path = init_logging(Path::new("logs"))?;

    let cli = Cli::parse();

    let config = Config::from_env().context(
        "API credentials not found. Set BINANCE_TESTNET_API_KEY and BINANCE_TESTNET_API_SECRET",
    )?;
    let connector = Arc::new(BinanceTestnetConnector::new(
        config.api_key,
        config.api_secret,
        config.base_url,
    ));

    match cli.command {
        Commands::Order {
            symbol,
            side,
            order_type,
            quantity,
            price,
            yes,
        } => {
            run_order(
                connector,
                &symbol,
                &side,
                &order_type,
                &quantity,
                price.as_deref(),
                yes,
            )
            .await?;
            println!("Detailed logs: {}", log_path.display());
        }
        Commands::Test => run_test(connector).await?,
        Commands::Price { symbol } => run_price(connector, &symbol).await?,
    }

    Ok(())
}

async fn run_order(
    connector: Arc<BinanceTestnetConnector>,
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
    yes: bool,
) -> Result<()> {
    println!("Initializing Binance Testnet client...");
    if !connector.test_connection().await {
        anyhow::bail!(
            "Failed to connect to the Binance Testnet API; check your credentials and network"
        );
    }
    println!("Connected to Binance Futures Testnet\n");

    println!("Order Request Summary:");
    println!("  Symbol:      {}", symbol.to_uppercase());
    println!("  Side:        {}", side.to_uppercase());
    println!("  Type:        {}", order_type.to_uppercase());
    println!("  Quantity:    {quantity}");
    if let Some(price) = price {
        println!("  Price:       {price}");
    }
    println!();

    if !yes && !confirm("Do you want to proceed with this order?")? {
        println!("Order cancelled.");
        return Ok(());
    }

    println!("\nPlacing order...\n");

    let manager = OrderManager::new(connector);
    match manager
        .place_order(symbol, side, order_type, quantity, price)
        .await
    {
        Ok(result) => {
            print_order_summary(&result);
            println!("Order placed successfully!");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Order placement failed");
            Err(e.into())
        }
    }
}

async fn run_test(connector: Arc<BinanceTestnetConnector>) -> Result<()> {
    println!("Testing Binance Testnet connection...\n");

    if !connector.test_connection().await {
        anyhow::bail!("API connection failed; check your credentials and network connection");
    }
    println!("API connection successful; your credentials are valid.\n");

    println!("Fetching current BTC price...");
    match connector.get_current_price("BTCUSDT").await? {
        Some(price) => println!("Current BTC price: ${price}"),
        None => println!("BTCUSDT price is unavailable"),
    }

    Ok(())
}

async fn run_price(connector: Arc<BinanceTestnetConnector>, symbol: &str) -> Result<()> {
    let symbol = symbol.to_uppercase();
    println!("Fetching current price for {symbol}...\n");

    match connector.get_current_price(&symbol).await? {
        Some(price) => println!("Current {symbol} price: ${price}"),
        None => anyhow::bail!("Failed to fetch price for {symbol}: symbol not found"),
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_order_summary(result: &OrderResult) {
    println!("{}", "=".repeat(70));
    println!("ORDER PLACED SUCCESSFULLY");
    println!("{}", "=".repeat(70));
    println!("Order ID:        {}", result.order_id);
    println!("Symbol:          {}", result.symbol);
    println!("Side:            {}", result.side);
    println!("Type:            {}", result.order_type);
    println!("Status:          {}", result.status);
    println!("Quantity:        {}", result.orig_qty);
    if result.order_type == "LIMIT" {
        println!("Price:           {}", result.price);
    }
    println!("Executed Qty:    {}", result.executed_qty);
    if let Some(avg) = result.filled_avg_price() {
        println!("Average Price:   {avg}");
    }
    println!("{}", "=".repeat(70));
}
