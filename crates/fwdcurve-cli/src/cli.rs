//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use fwdcurve_core::daycounts::DayCountConvention;
use fwdcurve_curves::InterpolationPolicy;

use crate::commands::{CurvesArgs, PriceArgs, ReturnsArgs, ShowArgs};

/// fwdcurve - Forward curves from futures settlement prices
#[derive(Parser)]
#[command(name = "fwdcurve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = "FWDCURVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Day count convention, overrides the configuration
    #[arg(long, value_enum, global = true)]
    pub day_count: Option<DayCountChoice>,

    /// Interpolation policy, overrides the configuration
    #[arg(short, long, value_enum, global = true)]
    pub interpolation: Option<InterpolationChoice>,

    /// Key curves by exchange as well as product
    #[arg(long, global = true)]
    pub by_exchange: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the curves built from settlement files
    Curves(CurvesArgs),

    /// Show the samples and fitted grid of one curve
    Show(ShowArgs),

    /// Price a contract on one curve
    Price(PriceArgs),

    /// Price and return series of a contract across settlement dates
    Returns(ReturnsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Day count choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayCountChoice {
    /// Actual/365 Fixed
    #[value(name = "act365", alias = "ACT_365")]
    Act365,
    /// Actual/360
    #[value(name = "act360", alias = "ACT_360")]
    Act360,
}

impl From<DayCountChoice> for DayCountConvention {
    fn from(choice: DayCountChoice) -> Self {
        match choice {
            DayCountChoice::Act365 => DayCountConvention::Act365Fixed,
            DayCountChoice::Act360 => DayCountConvention::Act360,
        }
    }
}

/// Interpolation choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterpolationChoice {
    /// Piecewise linear
    #[value(name = "linear")]
    Linear,
    /// Natural cubic spline
    #[value(name = "cubic", alias = "cubic-spline")]
    Cubic,
}

impl From<InterpolationChoice> for InterpolationPolicy {
    fn from(choice: InterpolationChoice) -> Self {
        match choice {
            InterpolationChoice::Linear => InterpolationPolicy::Linear,
            InterpolationChoice::Cubic => InterpolationPolicy::CubicSpline,
        }
    }
}
