//! # Order Quote
//!
//! Prices an order file against a topping catalog and prints the resulting
//! cart as JSON.
//!
//! ## Usage
//! ```bash
//! cargo run -p pizzeria-cart --bin quote -- --catalog toppings.json --order order.json
//!
//! # Refuse size labels that match no tier
//! cargo run -p pizzeria-cart --bin quote -- -c toppings.json -o order.json --strict-sizes
//! ```
//!
//! ## Order File
//! ```json
//! {
//!   "lines": [
//!     {
//!       "menuItemId": "supreme", "name": "Supreme", "size": "Large (14\")",
//!       "basePrice": "17.99", "quantity": 2,
//!       "modifications": [
//!         { "type": "replace", "toppingId": "pepperoni", "replacedToppingId": "mushrooms" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Rejected topping changes are logged at WARN on stderr and listed in each
//! line's payload; they do not fail the quote.

use std::env;
use std::error::Error;
use std::fs;
use std::process::ExitCode;

use pizzeria_cart::{
    init_tracing, Cart, CartConfig, CartLine, CartTotals, ModificationRequest, NewLine,
    ToppingCatalog,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct Order {
    lines: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderLine {
    #[serde(flatten)]
    line: NewLine,

    #[serde(default)]
    modifications: Vec<ModificationRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    lines: &'a [CartLine],
    totals: CartTotals,
    /// Subtotal formatted with the configured currency symbol.
    display_subtotal: String,
}

struct Args {
    catalog: String,
    order: String,
    strict_sizes: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Quote failed");
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = env::args().collect();

    let mut catalog = None;
    let mut order = None;
    let mut strict_sizes = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" | "-c" => {
                catalog = args.get(i + 1).cloned();
                i += 1;
            }
            "--order" | "-o" => {
                order = args.get(i + 1).cloned();
                i += 1;
            }
            "--strict-sizes" => strict_sizes = true,
            "--help" | "-h" => {
                println!("Pizzeria Order Quote");
                println!();
                println!("Usage: quote --catalog <PATH> --order <PATH> [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --catalog <PATH>   Topping catalog JSON");
                println!("  -o, --order <PATH>     Order JSON");
                println!("      --strict-sizes     Reject sizes that match no price tier");
                println!("  -h, --help             Show this help message");
                return Ok(None);
            }
            other => return Err(format!("unexpected argument '{}'", other)),
        }
        i += 1;
    }

    Ok(Some(Args {
        catalog: catalog.ok_or("--catalog <PATH> is required")?,
        order: order.ok_or("--order <PATH> is required")?,
        strict_sizes,
    }))
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = CartConfig::from_env();
    if args.strict_sizes {
        config.strict_sizes = true;
    }

    let catalog_json = fs::read_to_string(&args.catalog)
        .map_err(|e| format!("Failed to read catalog {}: {}", args.catalog, e))?;
    let catalog = ToppingCatalog::from_json(&catalog_json)?;
    info!(toppings = catalog.len(), path = %args.catalog, "Catalog loaded");

    let order_json = fs::read_to_string(&args.order)
        .map_err(|e| format!("Failed to read order {}: {}", args.order, e))?;
    let order: Order = serde_json::from_str(&order_json)?;

    let mut cart = Cart::new();
    for order_line in order.lines {
        let line_id = cart.add_line(order_line.line, &config)?.id.clone();
        if !order_line.modifications.is_empty() {
            cart.customize_line(&line_id, &order_line.modifications, &catalog, &config)?;
        }
    }

    let totals = CartTotals::from(&cart);
    info!(
        lines = totals.line_count,
        subtotal = %totals.subtotal,
        rejected = totals.has_rejections,
        "Order priced"
    );

    let quote = Quote {
        lines: &cart.lines,
        display_subtotal: config.format_currency(totals.subtotal),
        totals,
    };
    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
