mod defines;
mod impls;
mod input;
mod logging;
mod types;
mod util;

use types::*;
use util::*;

fn main() {
    println!("== Binance Futures Testnet Order Placer ==");

    // logging first, so everything after lands in the file as well
    let _logging = match logging::init(defines::LOG_FILE) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to set up logging: {:#}", e);
            return;
        }
    };

    let ctx = match TradingContext::from_prompts() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to read credentials: {:#}", e);
            return;
        }
    };
    log::info!("Connected to Binance Futures Testnet at {}", ctx.base_url);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    loop {
        let order = match input::collect_order(&mut stdin.lock(), &mut stdout.lock()) {
            Ok(order) => order,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        };

        // an unlisted symbol skips submission and goes straight back
        // to collecting the next order
        if !api_symbol_exists(&ctx, &order.symbol) {
            println!(
                "Symbol '{}' not found on Binance Futures Testnet.",
                order.symbol
            );
            log::warn!("Tried invalid symbol: {}", order.symbol);
            continue;
        }

        let result = api_place_order(&ctx, &order);
        report_order_outcome(&order, &result);

        match input::confirm_another(&mut stdin.lock(), &mut stdout.lock()) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    println!("Done. All logs are in {}.", defines::LOG_FILE);
}
