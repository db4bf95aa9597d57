/// Base URL of the Binance USDT-M futures testnet REST API.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Instrument-listing endpoint. Public, no signature required.
pub const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";

/// Order-creation endpoint. Signed, API key header required.
pub const ORDER_PATH: &str = "/fapi/v1/order";

/// Header carrying the API key on signed requests.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// `recvWindow` sent with every signed request, in milliseconds.
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

/// Time-in-force token for limit and stop-limit orders.
pub const TIME_IN_FORCE_GTC: &str = "GTC";

/// A tradable symbol after upper-casing: one or more ASCII alphanumerics.
pub const SYMBOL_PATTERN: &str = "^[A-Z0-9]+$";

/// Append-only log file, next to the working directory.
pub const LOG_FILE: &str = "trading_bot.log";

/// Environment variables consulted before falling back to hidden prompts.
pub const ENV_API_KEY: &str = "BINANCE_TESTNET_API_KEY";
pub const ENV_API_SECRET: &str = "BINANCE_TESTNET_API_SECRET";
