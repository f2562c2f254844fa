//! Engine configuration.

use std::path::Path;

use fwdcurve_core::daycounts::DayCountConvention;
use fwdcurve_curves::{BuildSettings, InterpolationPolicy, KeyScheme, ZeroBasePolicy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Settings for the forward curve engine.
///
/// Every field has a default, so an empty file is a valid configuration:
///
/// ```toml
/// day_count = "ACT_365"
/// interpolation = "LINEAR"
/// group_by_exchange = false
/// zero_base = "emit-zero"
/// parallel = false
///
/// [ingestion]
/// product_types = ["FUT"]
/// skip_malformed = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Day count convention for time to maturity.
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Interpolation policy for every curve.
    #[serde(default)]
    pub interpolation: InterpolationPolicy,

    /// Key curves by (settlement date, product, exchange) instead of
    /// (settlement date, product).
    #[serde(default)]
    pub group_by_exchange: bool,

    /// Return reported over a zero base price.
    #[serde(default)]
    pub zero_base: ZeroBasePolicy,

    /// Build curves concurrently when the engine was compiled with it.
    #[serde(default)]
    pub parallel: bool,

    /// Settlement file ingestion.
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            day_count: DayCountConvention::default(),
            interpolation: InterpolationPolicy::default(),
            group_by_exchange: false,
            zero_base: ZeroBasePolicy::default(),
            parallel: false,
            ingestion: IngestionConfig::default(),
        }
    }
}

/// Settlement file ingestion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionConfig {
    /// Product types kept from settlement files.
    #[serde(default = "default_product_types")]
    pub product_types: Vec<String>,

    /// Log and skip malformed rows instead of failing the file.
    #[serde(default)]
    pub skip_malformed: bool,
}

fn default_product_types() -> Vec<String> {
    vec!["FUT".to_string()]
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            product_types: default_product_types(),
            skip_malformed: false,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Curve key scheme selected by `group_by_exchange`.
    pub fn key_scheme(&self) -> KeyScheme {
        if self.group_by_exchange {
            KeyScheme::ProductExchange
        } else {
            KeyScheme::Product
        }
    }

    /// Settings for building a curve repository.
    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            convention: self.day_count,
            policy: self.interpolation,
            scheme: self.key_scheme(),
            parallel: self.parallel,
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        self.ingestion.validate()
    }
}

impl Validate for IngestionConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.product_types.is_empty() {
            errors.push(ValidationError::new(
                "ingestion.product_types",
                "at least one product type is required",
            ));
        }
        if self.product_types.iter().any(|t| t.trim().is_empty()) {
            errors.push(ValidationError::new(
                "ingestion.product_types",
                "product types must not be blank",
            ));
        }

        errors
    }
}
