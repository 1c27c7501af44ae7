//! Pure order parameter validation.
//!
//! Turns raw operator input into a typed [`OrderRequest`] or a
//! [`ValidationError`]. No network access, no logging; the same input always
//! produces the same outcome.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::types::{OrderRequest, OrderSide, OrderType};
use crate::domain::errors::ValidationError;

const QUOTE_SUFFIX: &str = "USDT";
const MIN_SYMBOL_LEN: usize = 5;

/// Normalize and check a trading pair symbol.
pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let symbol = symbol.trim().to_uppercase();

    if !symbol.ends_with(QUOTE_SUFFIX) {
        return Err(ValidationError::BadQuoteSuffix { symbol });
    }
    if symbol.len() < MIN_SYMBOL_LEN {
        return Err(ValidationError::SymbolTooShort { symbol });
    }

    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<OrderSide, ValidationError> {
    match side.trim().to_uppercase().as_str() {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        other => Err(ValidationError::InvalidSide {
            value: other.to_string(),
        }),
    }
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    match order_type.trim().to_uppercase().as_str() {
        "MARKET" => Ok(OrderType::Market),
        "LIMIT" => Ok(OrderType::Limit),
        other => Err(ValidationError::InvalidOrderType {
            value: other.to_string(),
        }),
    }
}

pub fn validate_quantity(quantity: &str) -> Result<Decimal, ValidationError> {
    let qty =
        Decimal::from_str(quantity.trim()).map_err(|_| ValidationError::QuantityNotNumeric {
            value: quantity.to_string(),
        })?;

    if qty <= Decimal::ZERO {
        return Err(ValidationError::QuantityNotPositive { quantity: qty });
    }

    Ok(qty)
}

/// An absent or empty price means "not provided"; cross-field rules decide
/// whether that is acceptable.
pub fn validate_price(price: Option<&str>) -> Result<Option<Decimal>, ValidationError> {
    let Some(raw) = price else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let price = Decimal::from_str(raw.trim()).map_err(|_| ValidationError::PriceNotNumeric {
        value: raw.to_string(),
    })?;

    if price <= Decimal::ZERO {
        return Err(ValidationError::PriceNotPositive { price });
    }

    Ok(Some(price))
}

/// Validate all order parameters in order, first failure wins.
pub fn validate_order_params(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
) -> Result<OrderRequest, ValidationError> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price)?;

    match order_type {
        OrderType::Limit if price.is_none() => Err(ValidationError::PriceRequired),
        OrderType::Market if price.is_some() => Err(ValidationError::PriceNotAllowed),
        _ => Ok(OrderRequest {
            symbol,
            side,
            order_type,
            quantity,
            price,
        }),
    }
}
