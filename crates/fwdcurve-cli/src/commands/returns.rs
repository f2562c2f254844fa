//! Returns command implementation.
//!
//! Prices one contract on every curve of its product and reports the daily
//! returns between consecutive settlement dates.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fwdcurve_curves::{PriceSeries, ReturnKind, ReturnSeries, TargetInstrument, ValuationAnchor, ZeroBasePolicy};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context, InputArgs};
use crate::output::{format_opt_percent, format_price, format_years, print_header, print_output, print_warning};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Product identifier
    #[arg(short, long)]
    pub product: String,

    /// Exchange identifier; implies keying curves by exchange
    #[arg(short, long)]
    pub exchange: Option<String>,

    /// Contract maturity (YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long)]
    pub maturity: String,

    /// Measure time to maturity from this date instead of each settlement date
    #[arg(long)]
    pub valuation_date: Option<String>,

    /// Return reported over a zero base price (emit-zero, emit-nan, reject)
    #[arg(long)]
    pub zero_base: Option<ZeroBasePolicy>,
}

#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Settlement")]
    settlement_date: String,
    #[tabled(rename = "T (years)", display_with = "format_years")]
    time_to_maturity: f64,
    #[tabled(rename = "Price", display_with = "format_price")]
    price: f64,
    #[tabled(rename = "Return", display_with = "format_opt_percent")]
    daily_return: Option<f64>,
    #[tabled(rename = "Note")]
    note: String,
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, ctx: &Context) -> Result<()> {
    let repository = ctx.load_repository(&args.input, args.exchange.as_deref())?;

    let mut target = TargetInstrument::new(&args.product, parse_date(&args.maturity)?);
    if let Some(exchange) = &args.exchange {
        target = target.with_exchange(exchange);
    }
    let anchor = match &args.valuation_date {
        Some(s) => ValuationAnchor::Fixed(parse_date(s)?),
        None => ValuationAnchor::SettlementDate,
    };
    let policy = args.zero_base.unwrap_or(ctx.config.zero_base);

    let prices = repository.price_series(&target, anchor);
    let returns = prices.returns(policy)?;

    for skipped in prices.skipped() {
        print_warning(&format!("skipped {}: {}", skipped.key, skipped.error));
    }

    if ctx.format == OutputFormat::Table {
        print_header(&format!("Returns {target}"));
    }
    print_output(&rows(&prices, &returns), ctx.format)
}

fn rows(prices: &PriceSeries, returns: &ReturnSeries) -> Vec<ReturnRow> {
    prices
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            // The i-th return ends at the (i + 1)-th price.
            let ret = i.checked_sub(1).and_then(|j| returns.points().get(j));
            ReturnRow {
                settlement_date: point.settlement_date().to_string(),
                time_to_maturity: point.time_to_maturity,
                price: point.price,
                daily_return: ret.map(|r| r.daily_return),
                note: match ret.map(|r| r.kind) {
                    Some(ReturnKind::ZeroBase) => "zero base".to_string(),
                    _ => String::new(),
                },
            }
        })
        .collect()
}
