use crate::defines::*;
use crate::types::*;

use anyhow::Context;
use std::fmt;

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit { price } => write!(f, "LIMIT @ {}", price),
            OrderType::StopLimit { stop_price, price } => {
                write!(f, "STOP_LIMIT trigger {} @ {}", stop_price, price)
            }
        }
    }
}

impl OrderType {
    /// Order type token as the USDT-M futures API spells it.
    /// Stop-limit is called `STOP` on that wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit { .. } => "LIMIT",
            OrderType::StopLimit { .. } => "STOP",
        }
    }
}

impl OrderRequest {
    /// Map the order onto the exchange's parameter shape. Market orders
    /// carry no price fields at all; limit and stop-limit orders add
    /// their prices plus a GTC time-in-force.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.to_string()),
            ("type", self.order_type.wire_name().to_string()),
            ("quantity", self.quantity.to_string()),
        ];
        match self.order_type {
            OrderType::Market => {}
            OrderType::Limit { price } => {
                params.push(("price", price.to_string()));
                params.push(("timeInForce", TIME_IN_FORCE_GTC.to_string()));
            }
            OrderType::StopLimit { stop_price, price } => {
                params.push(("stopPrice", stop_price.to_string()));
                params.push(("price", price.to_string()));
                params.push(("timeInForce", TIME_IN_FORCE_GTC.to_string()));
            }
        }
        params
    }
}

impl OrderAck {
    /// Fill price to show the user: average price when the exchange
    /// reports one, otherwise the order price, otherwise `N/A`.
    pub fn fill_price(&self) -> &str {
        self.avg_price
            .as_deref()
            .or(self.price.as_deref())
            .unwrap_or("N/A")
    }
}

impl TradingContext {
    /// Build a context for the futures testnet. Credentials come from
    /// the environment when set, otherwise from hidden prompts; either
    /// way they stay out of the log.
    pub fn from_prompts() -> anyhow::Result<TradingContext> {
        let api_key = match std::env::var(ENV_API_KEY) {
            Ok(key) if !key.is_empty() => key,
            _ => rpassword::prompt_password("Enter Binance API Key (input hidden): ")
                .context("reading API key")?,
        };
        let api_secret = match std::env::var(ENV_API_SECRET) {
            Ok(secret) if !secret.is_empty() => secret,
            _ => rpassword::prompt_password("Enter Binance API Secret (input hidden): ")
                .context("reading API secret")?,
        };

        Ok(TradingContext {
            api_key,
            api_secret,
            base_url: TESTNET_BASE_URL.to_string(),
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
        })
    }
}

impl From<isahc::Error> for PlaceError {
    fn from(e: isahc::Error) -> Self {
        PlaceError::Transport(e.to_string())
    }
}

impl From<isahc::http::Error> for PlaceError {
    fn from(e: isahc::http::Error) -> Self {
        PlaceError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for PlaceError {
    fn from(e: serde_json::Error) -> Self {
        PlaceError::Transport(format!("malformed response: {}", e))
    }
}

impl From<std::io::Error> for PlaceError {
    fn from(e: std::io::Error) -> Self {
        PlaceError::Transport(e.to_string())
    }
}
