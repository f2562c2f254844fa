//! CLI command implementations.

pub mod curves;
pub mod price;
pub mod returns;
pub mod show;

pub use curves::CurvesArgs;
pub use price::PriceArgs;
pub use returns::ReturnsArgs;
pub use show::ShowArgs;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use fwdcurve_config::EngineConfig;
use fwdcurve_core::Date;
use fwdcurve_curves::{CurveKey, CurveRepository, ForwardCurve, KeyScheme};
use fwdcurve_ext_file::{IngestOptions, SettlementFileReader};

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};

/// Settlement files or directories of settlement files.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Settlement CSV files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Identifies one curve.
#[derive(Args, Debug)]
pub struct CurveSelector {
    /// Settlement date (YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long)]
    pub date: String,

    /// Product identifier
    #[arg(short, long)]
    pub product: String,

    /// Exchange identifier; implies keying curves by exchange
    #[arg(short, long)]
    pub exchange: Option<String>,
}

/// Resolved configuration shared by every command.
pub struct Context {
    /// Engine configuration with command-line overrides applied.
    pub config: EngineConfig,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// Loads the configuration file, if any, and applies the global flags.
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(day_count) = cli.day_count {
            config.day_count = day_count.into();
        }
        if let Some(interpolation) = cli.interpolation {
            config.interpolation = interpolation.into();
        }
        if cli.by_exchange {
            config.group_by_exchange = true;
        }

        Ok(Self {
            config,
            format: cli.format,
        })
    }

    /// Reads the inputs and builds the curve repository.
    pub fn load_repository(&self, inputs: &InputArgs, exchange: Option<&str>) -> Result<CurveRepository> {
        let reader = SettlementFileReader::new(IngestOptions::from(&self.config.ingestion));
        let batch = reader.read_paths(&inputs.inputs)?;

        let mut settings = self.config.build_settings();
        if exchange.is_some() {
            settings.scheme = KeyScheme::ProductExchange;
        }

        let repository = CurveRepository::build(&batch.observations, &settings);
        info!(
            curves = repository.len(),
            failures = repository.failures().len(),
            "built curves"
        );
        Ok(repository)
    }
}

/// Parses a date in ISO or compact form.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse_any(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Key of the selected curve.
pub fn selected_key(selector: &CurveSelector) -> CliResult<CurveKey> {
    let date = parse_date(&selector.date)?;
    Ok(match &selector.exchange {
        Some(exchange) => CurveKey::with_exchange(date, &selector.product, exchange),
        None => CurveKey::new(date, &selector.product),
    })
}

/// Looks up the selected curve, reporting why it is missing.
pub fn find_curve<'a>(repository: &'a CurveRepository, key: &CurveKey) -> CliResult<&'a ForwardCurve> {
    if let Some(curve) = repository.get(key) {
        return Ok(curve);
    }
    match repository.failures().iter().find(|f| &f.key == key) {
        Some(failure) => Err(CliError::CurveFailed {
            key: key.to_string(),
            reason: failure.error.to_string(),
        }),
        None => Err(CliError::CurveNotFound(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-04-01").unwrap(), parse_date("20250401").unwrap());
        assert!(matches!(parse_date("04/01/2025"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_selected_key_with_exchange() {
        let selector = CurveSelector {
            date: "20250101".to_string(),
            product: "CL".to_string(),
            exchange: Some("NYMEX".to_string()),
        };
        assert_eq!(selected_key(&selector).unwrap().to_string(), "2025-01-01 CL@NYMEX");
    }
}
