//! Price command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fwdcurve_core::Date;

use crate::cli::OutputFormat;
use crate::commands::{find_curve, parse_date, selected_key, Context, CurveSelector, InputArgs};
use crate::output::{format_price, format_years, print_header, print_output, print_single, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub curve: CurveSelector,

    /// Contract maturity (YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long)]
    pub maturity: String,

    /// Valuation date. Defaults to the curve's settlement date.
    #[arg(long)]
    pub valuation_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct PriceQuote {
    settlement_date: Date,
    product: String,
    exchange: Option<String>,
    maturity_date: Date,
    valuation_date: Date,
    time_to_maturity: f64,
    price: f64,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let repository = ctx.load_repository(&args.input, args.curve.exchange.as_deref())?;
    let key = selected_key(&args.curve)?;
    let curve = find_curve(&repository, &key)?;

    let maturity_date = parse_date(&args.maturity)?;
    let valuation_date = match &args.valuation_date {
        Some(s) => parse_date(s)?,
        None => curve.settlement_date(),
    };
    let time_to_maturity = curve.time_to_maturity(maturity_date, valuation_date);
    let price = curve.price_at(time_to_maturity)?;

    let key = curve.key();
    let quote = PriceQuote {
        settlement_date: key.settlement_date,
        product: key.product.clone(),
        exchange: key.exchange.clone(),
        maturity_date,
        valuation_date,
        time_to_maturity,
        price,
    };

    match ctx.format {
        OutputFormat::Table => {
            print_header("Forward Price");
            let rows = vec![
                KeyValue::new("Curve", key.to_string()),
                KeyValue::new("Maturity", maturity_date.to_string()),
                KeyValue::new("Valuation", valuation_date.to_string()),
                KeyValue::new("T (years)", format_years(&time_to_maturity)),
                KeyValue::new("Price", format_price(&price)),
            ];
            print_output(&rows, ctx.format)
        }
        OutputFormat::Json | OutputFormat::Csv => print_single(&quote, ctx.format),
    }
}
