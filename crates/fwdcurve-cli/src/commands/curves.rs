//! Curves command implementation.
//!
//! Lists every curve key found in the inputs, built or not.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fwdcurve_curves::{CurveBuildFailure, CurveKey, ForwardCurve};

use crate::cli::{InterpolationChoice, OutputFormat};
use crate::commands::{Context, InputArgs};
use crate::output::{format_opt_years, print_header, print_output};

/// Arguments for the curves command.
#[derive(Args, Debug)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Rebuild failed curves with this interpolation policy
    #[arg(long, value_enum)]
    pub retry_with: Option<InterpolationChoice>,

    /// Only list curves of this product
    #[arg(short, long)]
    pub product: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Settlement")]
    settlement_date: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Min T", display_with = "format_opt_years")]
    min_ttm: Option<f64>,
    #[tabled(rename = "Max T", display_with = "format_opt_years")]
    max_ttm: Option<f64>,
    #[tabled(rename = "Status")]
    status: String,
}

impl CurveRow {
    fn built(curve: &ForwardCurve) -> Self {
        let (min, max) = curve.domain();
        Self {
            points: curve.len(),
            policy: curve.policy().to_string(),
            min_ttm: Some(min),
            max_ttm: Some(max),
            status: "ok".to_string(),
            ..Self::keyed(curve.key())
        }
    }

    fn failed(failure: &CurveBuildFailure) -> Self {
        Self {
            points: failure.observations.len(),
            status: failure.error.to_string(),
            ..Self::keyed(&failure.key)
        }
    }

    fn keyed(key: &CurveKey) -> Self {
        Self {
            settlement_date: key.settlement_date.to_string(),
            product: key.product.clone(),
            exchange: key.exchange.clone().unwrap_or_default(),
            points: 0,
            policy: String::new(),
            min_ttm: None,
            max_ttm: None,
            status: String::new(),
        }
    }

    fn key(&self) -> (&str, &str, &str) {
        (&self.settlement_date, &self.product, &self.exchange)
    }
}

/// Execute the curves command.
pub fn execute(args: CurvesArgs, ctx: &Context) -> Result<()> {
    let mut repository = ctx.load_repository(&args.input, None)?;
    if let Some(policy) = args.retry_with {
        repository = repository.retry_failed(policy.into());
    }

    let wanted = |key: &CurveKey| args.product.as_deref().map_or(true, |p| key.product == p);

    let mut rows: Vec<CurveRow> = repository
        .curves()
        .iter()
        .filter(|c| wanted(c.key()))
        .map(CurveRow::built)
        .chain(
            repository
                .failures()
                .iter()
                .filter(|f| wanted(&f.key))
                .map(CurveRow::failed),
        )
        .collect();
    rows.sort_by(|a, b| a.key().cmp(&b.key()));

    if ctx.format == OutputFormat::Table {
        print_header("Forward Curves");
    }
    print_output(&rows, ctx.format)
}
