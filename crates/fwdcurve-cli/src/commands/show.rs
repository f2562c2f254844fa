//! Show command implementation.
//!
//! Displays the observed samples of one curve and an evenly spaced fitted
//! grid across its domain, with the curve's slope at each point.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fwdcurve_curves::{CurveKey, CurvePoint, CurveResult, ForwardCurve};

use crate::cli::OutputFormat;
use crate::commands::{find_curve, selected_key, Context, CurveSelector, InputArgs};
use crate::output::{format_price, format_years, print_header, print_output};

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub curve: CurveSelector,

    /// Number of fitted grid points
    #[arg(long, default_value = "20")]
    pub points: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct PointRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Maturity")]
    maturity_date: String,
    #[tabled(rename = "T (years)", display_with = "format_years")]
    time_to_maturity: f64,
    #[tabled(rename = "Price", display_with = "format_price")]
    price: f64,
    #[tabled(rename = "Slope (/yr)", display_with = "format_price")]
    slope: f64,
}

#[derive(Debug, Serialize)]
struct CurveView<'a> {
    key: &'a CurveKey,
    convention: String,
    policy: String,
    samples: &'a [CurvePoint],
    fitted: Vec<FittedPoint>,
}

#[derive(Debug, Serialize)]
struct FittedPoint {
    time_to_maturity: f64,
    price: f64,
    slope: f64,
}

/// Execute the show command.
pub fn execute(args: ShowArgs, ctx: &Context) -> Result<()> {
    let repository = ctx.load_repository(&args.input, args.curve.exchange.as_deref())?;
    let key = selected_key(&args.curve)?;
    let curve = find_curve(&repository, &key)?;
    let fitted = curve.fitted(args.points);

    match ctx.format {
        OutputFormat::Json => {
            let view = CurveView {
                key: curve.key(),
                convention: curve.convention().to_string(),
                policy: curve.policy().to_string(),
                samples: curve.samples(),
                fitted: fitted
                    .into_iter()
                    .map(|(time_to_maturity, price)| -> CurveResult<FittedPoint> {
                        Ok(FittedPoint {
                            time_to_maturity,
                            price,
                            slope: curve.slope_at(time_to_maturity)?,
                        })
                    })
                    .collect::<CurveResult<_>>()?,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        OutputFormat::Table => {
            print_header(&format!("Curve {}", curve.key()));
            println!("Day count: {}", curve.convention());
            println!("Interpolation: {}", curve.policy());
            print_output(&rows(curve, &fitted)?, ctx.format)
        }
        OutputFormat::Csv => print_output(&rows(curve, &fitted)?, ctx.format),
    }
}

fn rows(curve: &ForwardCurve, fitted: &[(f64, f64)]) -> CurveResult<Vec<PointRow>> {
    let observed = curve.samples().iter().map(|p| -> CurveResult<PointRow> {
        Ok(PointRow {
            kind: "observed",
            maturity_date: p.maturity_date.to_string(),
            time_to_maturity: p.time_to_maturity,
            price: p.price,
            slope: curve.slope_at(p.time_to_maturity)?,
        })
    });
    let grid = fitted.iter().map(|&(t, price)| -> CurveResult<PointRow> {
        Ok(PointRow {
            kind: "fitted",
            maturity_date: String::new(),
            time_to_maturity: t,
            price,
            slope: curve.slope_at(t)?,
        })
    });
    observed.chain(grid).collect()
}
