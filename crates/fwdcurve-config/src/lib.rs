//! # fwdcurve Config
//!
//! Configuration for the forward curve engine, loaded from TOML.
//!
//! - **Curve building**: day count convention, interpolation policy, key scheme
//! - **Analytics**: zero base return policy
//! - **Ingestion**: accepted product types, malformed row handling
//!
//! Unknown values are rejected at load time; nothing silently falls back to a
//! default.
//!
//! # Example
//!
//! ```rust
//! use fwdcurve_config::EngineConfig;
//! use fwdcurve_curves::InterpolationPolicy;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     interpolation = "CUBIC_SPLINE"
//!
//!     [ingestion]
//!     product_types = ["FUT"]
//! "#).unwrap();
//!
//! assert_eq!(config.build_settings().policy, InterpolationPolicy::CubicSpline);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod error;

pub use engine::{EngineConfig, IngestionConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
