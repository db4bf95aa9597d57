use thiserror::Error;

/// Which way the order trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type carrying exactly the price fields that type requires.
/// A market order cannot be given a price, a stop-limit order cannot
/// lose its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderType {
    Market,
    Limit { price: f64 },
    StopLimit { stop_price: f64, price: f64 },
}

/// A single order as collected from the user, ready for submission.
/// Built fresh every loop iteration and discarded after one submit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: f64,
}

/// `TradingContext` carries everything an API call needs: credentials
/// and the endpoint the process talks to.
pub struct TradingContext {
    /// API key, sent in the request header. Never logged.
    pub api_key: String,

    /// API secret, used only to sign requests. Never logged.
    pub api_secret: String,

    /// Base URL of the futures testnet REST API.
    pub base_url: String,

    /// `recvWindow` for signed requests, in milliseconds.
    pub recv_window_ms: u64,
}

/// Everything that can go wrong between a collected order and a placed
/// one. Callers branch on the variant, not on message text.
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("invalid order input: {0}")]
    Validation(String),

    #[error("symbol lookup failed: {0}")]
    SymbolLookup(String),

    #[error("order rejected by exchange ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Instrument-listing response from the exchange. Only the symbol
/// records matter here; the filter and rate-limit payloads are skipped.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ExchangeInfoResponse {
    pub symbols: Vec<SymbolInfo>,
}

/// One symbol record out of the instrument listing.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: Option<String>,
}

/// Order-creation acknowledgement from the exchange.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub order_id: u64,
    pub symbol: String,
    pub status: String,
    pub client_order_id: Option<String>,
    pub price: Option<String>,
    pub avg_price: Option<String>,
    pub orig_qty: Option<String>,
    pub executed_qty: Option<String>,
    pub stop_price: Option<String>,
    pub time_in_force: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub side: Option<String>,
    pub update_time: Option<u64>,
}

/// Error body the exchange returns alongside a non-2xx status.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}
