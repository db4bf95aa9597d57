use crate::defines::SYMBOL_PATTERN;
use crate::types::{OrderRequest, OrderSide, OrderType, PlaceError};

use regex::Regex;
use std::io::{self, BufRead, Write};

/// Which order type the user picked from the menu, before any price
/// fields are collected.
enum TypeChoice {
    Market,
    Limit,
    StopLimit,
}

/// Write a prompt, flush, and read one trimmed line. EOF on the input
/// is an error so a closed stdin cannot spin a validation loop forever.
fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while waiting for a value",
        ));
    }
    Ok(line.trim().to_string())
}

/// Canonicalize a raw symbol entry: trim, upper-case, require it to be
/// purely alphanumeric.
fn validate_symbol(raw: &str) -> Result<String, PlaceError> {
    let symbol = raw.trim().to_uppercase();
    let pattern = Regex::new(SYMBOL_PATTERN).expect("symbol pattern is a valid regex");
    if pattern.is_match(&symbol) {
        Ok(symbol)
    } else {
        Err(PlaceError::Validation(format!(
            "symbol '{}' must be alphanumeric",
            symbol
        )))
    }
}

/// A strictly positive, finite number, or a validation error.
fn parse_positive(raw: &str) -> Result<f64, PlaceError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| PlaceError::Validation(format!("'{}' is not a positive number", raw)))
}

fn prompt_symbol<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    loop {
        let raw = prompt_line(input, out, "Enter symbol to trade (e.g. BTCUSDT): ")?;
        match validate_symbol(&raw) {
            Ok(symbol) => return Ok(symbol),
            Err(_) => writeln!(out, "Invalid symbol.")?,
        }
    }
}

fn prompt_side<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<OrderSide> {
    loop {
        match prompt_line(input, out, "Order side (BUY/SELL): ")?.to_uppercase().as_str() {
            "BUY" => return Ok(OrderSide::Buy),
            "SELL" => return Ok(OrderSide::Sell),
            _ => writeln!(out, "Side must be BUY or SELL.")?,
        }
    }
}

/// Order-type menu. An unrecognized choice does not re-prompt: it falls
/// back to MARKET, loudly, as the documented default.
fn prompt_type_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<TypeChoice> {
    writeln!(out, "Order type: 1) MARKET  2) LIMIT  3) STOP_LIMIT")?;
    let raw = prompt_line(input, out, "Choose order type [1-3]: ")?.to_uppercase();
    match raw.as_str() {
        "1" | "MARKET" => Ok(TypeChoice::Market),
        "2" | "LIMIT" => Ok(TypeChoice::Limit),
        "3" | "STOP_LIMIT" => Ok(TypeChoice::StopLimit),
        other => {
            writeln!(out, "Unrecognized order type '{}', defaulting to MARKET.", other)?;
            Ok(TypeChoice::Market)
        }
    }
}

fn prompt_positive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    what: &str,
) -> io::Result<f64> {
    loop {
        match parse_positive(&prompt_line(input, out, prompt)?) {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(out, "Enter a positive number for {}.", what)?,
        }
    }
}

/// Solicit one full order from the user, field by field. Every field
/// re-prompts until valid, so the returned request always satisfies
/// the per-type price invariants.
pub fn collect_order<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<OrderRequest> {
    let symbol = prompt_symbol(input, out)?;
    let side = prompt_side(input, out)?;
    let choice = prompt_type_choice(input, out)?;
    let quantity = prompt_positive(input, out, "Enter quantity: ", "quantity")?;

    let order_type = match choice {
        TypeChoice::Market => OrderType::Market,
        TypeChoice::Limit => OrderType::Limit {
            price: prompt_positive(input, out, "Enter limit price: ", "price")?,
        },
        TypeChoice::StopLimit => {
            let stop_price = prompt_positive(input, out, "Enter stop price: ", "price")?;
            let price = prompt_positive(input, out, "Enter limit price: ", "price")?;
            OrderType::StopLimit { stop_price, price }
        }
    };

    Ok(OrderRequest {
        symbol,
        side,
        order_type,
        quantity,
    })
}

/// Ask whether to go around again. Anything but `y` stops the loop.
pub fn confirm_another<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    let answer = prompt_line(input, out, "Place another order? (y/n): ")?;
    Ok(answer.to_lowercase() == "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(script: &str) -> (io::Result<OrderRequest>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = collect_order(&mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn validate_symbol_canonicalizes_and_rejects_punctuation() {
        assert_eq!(validate_symbol(" btcusdt ").unwrap(), "BTCUSDT");
        assert!(validate_symbol("BTC/USDT").is_err());
        assert!(validate_symbol("").is_err());
    }

    #[test]
    fn parse_positive_rejects_non_numbers_and_non_positive() {
        assert_eq!(parse_positive("0.01").unwrap(), 0.01);
        for raw in ["abc", "-1", "0", "inf", "nan", ""] {
            assert!(parse_positive(raw).is_err(), "accepted '{}'", raw);
        }
    }

    #[test]
    fn symbol_with_punctuation_reprompts() {
        let mut input = Cursor::new(b"btc-usd\nbtcusdt\n".to_vec());
        let mut out = Vec::new();
        let symbol = prompt_symbol(&mut input, &mut out).unwrap();
        assert_eq!(symbol, "BTCUSDT");
        assert!(String::from_utf8(out).unwrap().contains("Invalid symbol."));
    }

    #[test]
    fn empty_symbol_reprompts() {
        let mut input = Cursor::new(b"\nETHUSDT\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(prompt_symbol(&mut input, &mut out).unwrap(), "ETHUSDT");
    }

    #[test]
    fn side_loops_until_recognized() {
        let mut input = Cursor::new(b"hold\nsell\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(prompt_side(&mut input, &mut out).unwrap(), OrderSide::Sell);
        assert!(String::from_utf8(out).unwrap().contains("Side must be BUY or SELL."));
    }

    #[test]
    fn quantity_rejects_garbage_and_non_positive() {
        let mut input = Cursor::new(b"abc\n-1\n0\nnan\n0.5\n".to_vec());
        let mut out = Vec::new();
        let qty = prompt_positive(&mut input, &mut out, "Enter quantity: ", "quantity").unwrap();
        assert_eq!(qty, 0.5);
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Enter a positive number for quantity.").count(), 4);
    }

    #[test]
    fn collects_market_order() {
        let (result, _) = collect("BTCUSDT\nBUY\n1\n0.01\n");
        let order = result.unwrap();
        assert_eq!(order.symbol, "BTCUSDT");
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.quantity, 0.01);
    }

    #[test]
    fn collects_limit_order_by_name() {
        let (result, _) = collect("ethusdt\nSELL\nLIMIT\n0.2\n50000\n");
        let order = result.unwrap();
        assert_eq!(order.symbol, "ETHUSDT");
        assert_eq!(order.order_type, OrderType::Limit { price: 50000.0 });
    }

    #[test]
    fn collects_stop_limit_order() {
        let (result, _) = collect("BTCUSDT\nBUY\n3\n0.01\n49000\n50250.5\n");
        let order = result.unwrap();
        assert_eq!(
            order.order_type,
            OrderType::StopLimit {
                stop_price: 49000.0,
                price: 50250.5,
            }
        );
    }

    #[test]
    fn unrecognized_type_defaults_to_market_with_notice() {
        let (result, shown) = collect("BTCUSDT\nBUY\nbanana\n1\n");
        assert_eq!(result.unwrap().order_type, OrderType::Market);
        assert!(shown.contains("defaulting to MARKET"));
    }

    #[test]
    fn limit_price_reprompts_until_positive() {
        let (result, shown) = collect("BTCUSDT\nBUY\n2\n1\n-5\n0\n50000\n");
        assert_eq!(result.unwrap().order_type, OrderType::Limit { price: 50000.0 });
        assert!(shown.contains("Enter a positive number for price."));
    }

    #[test]
    fn eof_is_an_error_not_a_spin() {
        let mut input = Cursor::new(b"".to_vec());
        let mut out = Vec::new();
        assert!(prompt_symbol(&mut input, &mut out).is_err());
    }

    #[test]
    fn confirm_is_true_only_for_y() {
        for (answer, expected) in [("y\n", true), ("Y\n", true), ("n\n", false), ("maybe\n", false)] {
            let mut input = Cursor::new(answer.as_bytes().to_vec());
            let mut out = Vec::new();
            assert_eq!(confirm_another(&mut input, &mut out).unwrap(), expected);
        }
    }
}
