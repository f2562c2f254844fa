//! Integration test: crude oil futures strip over three settlement days.
//!
//! | Settle     | 2025-04-01 | 2025-07-01 | 2025-10-01 |
//! |------------|------------|------------|------------|
//! | 2025-01-01 | 70.00      | 72.00      | 73.50      |
//! | 2025-01-02 | 71.00      | 73.00      | 74.00      |
//! | 2025-01-03 | 70.50      |            |            |
//!
//! The third day has a single contract and cannot form a curve.

use approx::assert_relative_eq;
use fwdcurve_core::Date;
use fwdcurve_curves::prelude::*;

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn strip() -> Vec<Observation> {
    let rows = [
        ("2025-01-02", "2025-10-01", 74.00),
        ("2025-01-01", "2025-04-01", 70.00),
        ("2025-01-03", "2025-04-01", 70.50),
        ("2025-01-02", "2025-04-01", 71.00),
        ("2025-01-01", "2025-10-01", 73.50),
        ("2025-01-01", "2025-07-01", 72.00),
        ("2025-01-02", "2025-07-01", 73.00),
    ];
    rows.iter()
        .map(|(settle, maturity, price)| {
            Observation::new(date(settle), date(maturity), "CL", *price)
                .unwrap()
                .with_exchange("NYMEX")
                .with_currency("USD")
        })
        .collect()
}

#[test]
fn test_repository_orders_and_isolates_failures() {
    let repository = CurveRepository::build(&strip(), &BuildSettings::default());

    let settles: Vec<Date> = repository
        .curves()
        .iter()
        .map(ForwardCurve::settlement_date)
        .collect();
    assert_eq!(settles, vec![date("2025-01-01"), date("2025-01-02")]);

    assert_eq!(repository.failures().len(), 1);
    let failure = &repository.failures()[0];
    assert_eq!(failure.key, CurveKey::new(date("2025-01-03"), "CL"));
    assert!(matches!(
        failure.error,
        CurveError::InsufficientCurveData {
            required: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn test_front_contract_return() {
    let repository = CurveRepository::build(&strip(), &BuildSettings::default());
    let target = TargetInstrument::new("CL", date("2025-04-01"));

    let prices = repository.price_series(&target, ValuationAnchor::SettlementDate);
    assert_eq!(prices.len(), 2);
    assert!(prices.skipped().is_empty());

    let returns = prices.returns(ZeroBasePolicy::EmitZero).unwrap();
    assert_eq!(returns.len(), 1);
    assert_eq!(returns.points()[0].date, date("2025-01-02"));
    assert_relative_eq!(returns.points()[0].daily_return, 0.014_285_714, epsilon = 1e-9);
}

#[test]
fn test_spline_curve_between_contracts() {
    let settings = BuildSettings {
        policy: InterpolationPolicy::CubicSpline,
        ..BuildSettings::default()
    };
    let repository = CurveRepository::build(&strip(), &settings);
    let curve = repository
        .get(&CurveKey::new(date("2025-01-01"), "CL"))
        .unwrap();

    for point in curve.samples() {
        assert_relative_eq!(
            curve.price_at(point.time_to_maturity).unwrap(),
            point.price,
            epsilon = 1e-10
        );
    }

    let mid = curve.price_on_settlement(date("2025-05-15")).unwrap();
    assert!(mid > 70.0 && mid < 72.5);
}

#[test]
fn test_query_beyond_last_maturity_fails() {
    let repository = CurveRepository::build(&strip(), &BuildSettings::default());
    let curve = &repository.curves()[0];
    let (_, max) = curve.domain();

    let err = curve.price_at(max * 1.1).unwrap_err();
    assert!(matches!(err, CurveError::OutOfDomainQuery { .. }));

    let target = TargetInstrument::new("CL", date("2026-01-01"));
    let prices = repository.price_series(&target, ValuationAnchor::SettlementDate);
    assert!(prices.is_empty());
    assert_eq!(prices.skipped().len(), 2);
}

#[test]
fn test_exchange_keyed_repository() {
    let settings = BuildSettings {
        scheme: KeyScheme::ProductExchange,
        ..BuildSettings::default()
    };
    let repository = CurveRepository::build(&strip(), &settings);
    assert_eq!(repository.len(), 2);
    assert!(repository.curves().iter().all(|c| c.key().exchange.as_deref() == Some("NYMEX")));

    let target = TargetInstrument::new("CL", date("2025-04-01"));
    assert!(repository
        .price_series(&target, ValuationAnchor::SettlementDate)
        .is_empty());

    let target = target.with_exchange("NYMEX");
    assert_eq!(
        repository
            .price_series(&target, ValuationAnchor::SettlementDate)
            .len(),
        2
    );
}

#[test]
fn test_act360_repository() {
    let settings = BuildSettings {
        convention: DayCountConvention::Act360,
        ..BuildSettings::default()
    };
    let repository = CurveRepository::build(&strip(), &settings);
    let curve = &repository.curves()[0];
    assert_eq!(curve.samples()[0].time_to_maturity, 0.25);
    assert_eq!(curve.convention(), DayCountConvention::Act360);
}
