use crate::defines::*;
use crate::types::*;

use chrono::Utc;
use isahc::{ReadResponseExt, Request, RequestExt};
use ring::hmac;
use url::form_urlencoded;

/// Hex HMAC-SHA256 over the request payload, as the exchange expects
/// in the `signature` parameter.
pub fn sign_payload(secret: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hex::encode(hmac::sign(&key, payload.as_bytes()).as_ref())
}

/// Assemble the query string for a signed endpoint: the order
/// parameters, then `recvWindow` and `timestamp`, then the signature
/// computed over everything before it.
fn build_signed_query(ctx: &TradingContext, params: &[(&str, String)], timestamp_ms: i64) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.append_pair("recvWindow", &ctx.recv_window_ms.to_string());
    serializer.append_pair("timestamp", &timestamp_ms.to_string());
    let query = serializer.finish();

    let signature = sign_payload(&ctx.api_secret, &query);
    format!("{}&signature={}", query, signature)
}

fn fetch_exchange_info(ctx: &TradingContext) -> Result<ExchangeInfoResponse, PlaceError> {
    let url = format!("{}{}", ctx.base_url, EXCHANGE_INFO_PATH);
    let mut response = isahc::get(url)?;
    if !response.status().is_success() {
        return Err(PlaceError::SymbolLookup(format!(
            "instrument listing returned HTTP {}",
            response.status()
        )));
    }
    Ok(response.json::<ExchangeInfoResponse>()?)
}

/// Membership test against the instrument listing.
fn symbol_is_listed(info: &ExchangeInfoResponse, symbol: &str) -> bool {
    info.symbols.iter().any(|s| s.symbol == symbol)
}

/// True when the symbol is listed on the futures testnet. Any failure
/// along the way is logged and reads as "not listed"; this call never
/// errors out.
pub fn api_symbol_exists(ctx: &TradingContext, symbol: &str) -> bool {
    match fetch_exchange_info(ctx) {
        Ok(info) => symbol_is_listed(&info, symbol),
        Err(e) => {
            log::error!("Error checking symbol {}: {}", symbol, e);
            false
        }
    }
}

/// Submit one order with a single signed POST. No retry: resubmitting
/// after a transient failure would be a distinct, possibly duplicate
/// order.
pub fn api_place_order(ctx: &TradingContext, order: &OrderRequest) -> Result<OrderAck, PlaceError> {
    let query = build_signed_query(ctx, &order.to_params(), Utc::now().timestamp_millis());
    let url = format!("{}{}?{}", ctx.base_url, ORDER_PATH, query);

    let mut response = Request::post(url)
        .header(API_KEY_HEADER, ctx.api_key.as_str())
        .body(())?
        .send()?;

    let status = response.status();
    let body = response.text()?;
    if status.is_success() {
        Ok(serde_json::from_str::<OrderAck>(&body)?)
    } else {
        Err(rejection_from_body(status.as_u16(), &body))
    }
}

/// Classify a non-2xx order response: a well-formed exchange error
/// body is a rejection; anything else is a transport-level failure.
fn rejection_from_body(status: u16, body: &str) -> PlaceError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => PlaceError::Rejected {
            code: err.code,
            message: err.msg,
        },
        Err(_) => PlaceError::Transport(format!("HTTP {}: {}", status, body)),
    }
}

/// Log and print one submission outcome. Nothing here ends the loop.
pub fn report_order_outcome(order: &OrderRequest, result: &Result<OrderAck, PlaceError>) {
    match result {
        Ok(ack) => {
            log::info!(
                "Order placed: {} {} {} qty {} -> {} (order id {})",
                ack.symbol,
                order.side,
                order.order_type,
                order.quantity,
                ack.status,
                ack.order_id
            );
            println!("Order placed: {} at {}", ack.status, ack.fill_price());
        }
        Err(PlaceError::Rejected { code, message }) => {
            log::error!("Exchange rejected order ({}): {}", code, message);
            println!("Exchange error: {}", message);
        }
        Err(e) => {
            log::error!("Unexpected error placing order: {}", e);
            println!("Unexpected error: {}", e);
        }
    }
}
