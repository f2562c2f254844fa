//! Curve identity.

use std::fmt;

use fwdcurve_core::Date;
use serde::{Deserialize, Serialize};

/// Which fields identify a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyScheme {
    /// (settlement date, product).
    #[default]
    Product,
    /// (settlement date, product, exchange).
    ProductExchange,
}

/// Identity of one forward curve.
///
/// Field order matters: the derived ordering sorts by settlement date, then
/// product, then exchange (`None` before any exchange), which is the order
/// curves are sequenced in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurveKey {
    /// Trading day the settlement prices belong to.
    pub settlement_date: Date,
    /// Product identifier (e.g. "CL").
    pub product: String,
    /// Exchange identifier, only set under [`KeyScheme::ProductExchange`].
    pub exchange: Option<String>,
}

impl CurveKey {
    /// Creates a key without exchange.
    #[must_use]
    pub fn new(settlement_date: Date, product: impl Into<String>) -> Self {
        Self {
            settlement_date,
            product: product.into(),
            exchange: None,
        }
    }

    /// Creates a key qualified by exchange.
    #[must_use]
    pub fn with_exchange(
        settlement_date: Date,
        product: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            settlement_date,
            product: product.into(),
            exchange: Some(exchange.into()),
        }
    }

    /// True when the key belongs to the given product and exchange.
    #[must_use]
    pub fn matches(&self, product: &str, exchange: Option<&str>) -> bool {
        self.product == product && self.exchange.as_deref() == exchange
    }
}

impl fmt::Display for CurveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exchange {
            Some(exchange) => write!(f, "{} {}@{}", self.settlement_date, self.product, exchange),
            None => write!(f, "{} {}", self.settlement_date, self.product),
        }
    }
}
