//! Settlement-price observations.

use fwdcurve_core::Date;
use serde::Serialize;

use crate::error::{CurveError, CurveResult};
use crate::key::{CurveKey, KeyScheme};

/// One settlement price for one futures contract on one trading day.
///
/// Observations can only be created through [`Observation::new`], which
/// enforces the forward point invariants:
///
/// - the product identifier is not empty
/// - the settlement price is finite and non-negative
/// - the maturity date is not before the settlement date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    settlement_date: Date,
    maturity_date: Date,
    product: String,
    exchange: Option<String>,
    currency: Option<String>,
    settlement_price: f64,
    instrument_id: Option<String>,
}

impl Observation {
    /// Creates a validated observation.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::MalformedObservation` when an invariant does not hold.
    pub fn new(
        settlement_date: Date,
        maturity_date: Date,
        product: impl Into<String>,
        settlement_price: f64,
    ) -> CurveResult<Self> {
        let product = product.into().trim().to_string();
        if product.is_empty() {
            return Err(CurveError::malformed("empty product identifier"));
        }
        if !settlement_price.is_finite() {
            return Err(CurveError::malformed(format!(
                "settlement price {settlement_price} is not finite"
            )));
        }
        if settlement_price < 0.0 {
            return Err(CurveError::malformed(format!(
                "negative settlement price {settlement_price}"
            )));
        }
        if maturity_date < settlement_date {
            return Err(CurveError::malformed(format!(
                "maturity {maturity_date} before settlement {settlement_date}"
            )));
        }

        Ok(Self {
            settlement_date,
            maturity_date,
            product,
            exchange: None,
            currency: None,
            settlement_price,
            instrument_id: None,
        })
    }

    /// Sets the exchange. Blank values leave it unset.
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = non_blank(exchange.into());
        self
    }

    /// Sets the settlement currency. Blank values leave it unset.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = non_blank(currency.into());
        self
    }

    /// Sets an explicit instrument identifier. Blank values leave it unset.
    #[must_use]
    pub fn with_instrument_id(mut self, instrument_id: impl Into<String>) -> Self {
        self.instrument_id = non_blank(instrument_id.into());
        self
    }

    /// Trading day of the settlement price.
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// Contract maturity.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Product identifier.
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Exchange identifier, if known.
    pub fn exchange(&self) -> Option<&str> {
        self.exchange.as_deref()
    }

    /// Settlement currency, if known.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Settlement price.
    pub fn settlement_price(&self) -> f64 {
        self.settlement_price
    }

    /// Instrument identifier.
    ///
    /// Uses the explicit identifier when one was supplied, otherwise
    /// `PRODUCT[@EXCHANGE]:YYYYMMDD` built from the maturity.
    pub fn instrument_id(&self) -> String {
        if let Some(id) = &self.instrument_id {
            return id.clone();
        }
        match &self.exchange {
            Some(exchange) => format!(
                "{}@{}:{}",
                self.product,
                exchange,
                self.maturity_date.to_compact_string()
            ),
            None => format!("{}:{}", self.product, self.maturity_date.to_compact_string()),
        }
    }

    /// Key of the curve this observation belongs to.
    pub fn curve_key(&self, scheme: KeyScheme) -> CurveKey {
        CurveKey {
            settlement_date: self.settlement_date,
            product: self.product.clone(),
            exchange: match scheme {
                KeyScheme::Product => None,
                KeyScheme::ProductExchange => self.exchange.clone(),
            },
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> Date {
        Date::from_ymd(2025, m, d).unwrap()
    }

    #[test]
    fn test_valid_observation() {
        let obs = Observation::new(date(1, 1), date(4, 1), " CL ", 70.0)
            .unwrap()
            .with_exchange("NYMEX")
            .with_currency("USD");

        assert_eq!(obs.product(), "CL");
        assert_eq!(obs.exchange(), Some("NYMEX"));
        assert_eq!(obs.currency(), Some("USD"));
        assert_eq!(obs.instrument_id(), "CL@NYMEX:20250401");
    }

    #[test]
    fn test_maturity_on_settlement_is_valid() {
        assert!(Observation::new(date(1, 1), date(1, 1), "CL", 70.0).is_ok());
    }

    #[test]
    fn test_rejects_maturity_before_settlement() {
        let err = Observation::new(date(4, 1), date(1, 1), "CL", 70.0).unwrap_err();
        assert!(matches!(err, CurveError::MalformedObservation { .. }));
        assert!(err.to_string().contains("before settlement"));
    }

    #[test]
    fn test_rejects_bad_prices() {
        assert!(Observation::new(date(1, 1), date(4, 1), "CL", -0.01).is_err());
        assert!(Observation::new(date(1, 1), date(4, 1), "CL", f64::NAN).is_err());
        assert!(Observation::new(date(1, 1), date(4, 1), "CL", f64::INFINITY).is_err());
        assert!(Observation::new(date(1, 1), date(4, 1), "CL", 0.0).is_ok());
    }

    #[test]
    fn test_rejects_empty_product() {
        assert!(Observation::new(date(1, 1), date(4, 1), "  ", 70.0).is_err());
    }

    #[test]
    fn test_blank_optional_fields_are_unset() {
        let obs = Observation::new(date(1, 1), date(4, 1), "CL", 70.0)
            .unwrap()
            .with_exchange("")
            .with_instrument_id(" ");
        assert_eq!(obs.exchange(), None);
        assert_eq!(obs.instrument_id(), "CL:20250401");
    }

    #[test]
    fn test_curve_key_schemes() {
        let obs = Observation::new(date(1, 1), date(4, 1), "CL", 70.0)
            .unwrap()
            .with_exchange("NYMEX");

        assert_eq!(obs.curve_key(KeyScheme::Product), CurveKey::new(date(1, 1), "CL"));
        assert_eq!(
            obs.curve_key(KeyScheme::ProductExchange),
            CurveKey::with_exchange(date(1, 1), "CL", "NYMEX")
        );
    }
}
