//! Grouping observations into curves.

use std::collections::HashMap;

use fwdcurve_core::daycounts::DayCountConvention;
use tracing::{debug, warn};

use crate::error::CurveError;
use crate::forward_curve::ForwardCurve;
use crate::interpolation::InterpolationPolicy;
use crate::key::{CurveKey, KeyScheme};
use crate::observation::Observation;
use crate::series::{PriceSeries, TargetInstrument, ValuationAnchor};

/// Settings shared by every curve a repository builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildSettings {
    /// Day count convention for time to maturity.
    pub convention: DayCountConvention,
    /// Interpolation policy.
    pub policy: InterpolationPolicy,
    /// Which fields identify a curve.
    pub scheme: KeyScheme,
    /// Build curves concurrently. Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl BuildSettings {
    /// Returns a copy with another interpolation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: InterpolationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A key whose curve could not be built.
#[derive(Debug, Clone)]
pub struct CurveBuildFailure {
    /// The key of the failed curve.
    pub key: CurveKey,
    /// The observations of the group, kept for a retry.
    pub observations: Vec<Observation>,
    /// Why the build failed.
    pub error: CurveError,
}

/// Partitions observations by curve key.
///
/// Every observation lands in exactly one group. Groups are returned sorted
/// by key, observations keep their input order within a group.
pub fn group_observations(
    observations: &[Observation],
    scheme: KeyScheme,
) -> Vec<(CurveKey, Vec<Observation>)> {
    let mut groups: HashMap<CurveKey, Vec<Observation>> = HashMap::new();
    for obs in observations {
        groups
            .entry(obs.curve_key(scheme))
            .or_default()
            .push(obs.clone());
    }

    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups
}

/// The set of forward curves built from a batch of observations.
///
/// Curves are ordered by key, so iterating yields settlement dates in
/// ascending order (then product, then exchange). A failure on one key never
/// affects the others; failed keys are kept in [`CurveRepository::failures`].
#[derive(Debug, Clone, Default)]
pub struct CurveRepository {
    settings: BuildSettings,
    curves: Vec<ForwardCurve>,
    failures: Vec<CurveBuildFailure>,
}

impl CurveRepository {
    /// Groups observations and builds one curve per key.
    pub fn build(observations: &[Observation], settings: &BuildSettings) -> Self {
        let groups = group_observations(observations, settings.scheme);
        debug!(
            observations = observations.len(),
            groups = groups.len(),
            "building curve repository"
        );
        Self::from_groups(groups, *settings)
    }

    fn from_groups(groups: Vec<(CurveKey, Vec<Observation>)>, settings: BuildSettings) -> Self {
        let outcomes = maybe_parallel_map(groups, settings.parallel, |(key, observations)| {
            match ForwardCurve::build(
                key.clone(),
                &observations,
                settings.convention,
                settings.policy,
            ) {
                Ok(curve) => Ok(curve),
                Err(error) => Err(CurveBuildFailure {
                    key,
                    observations,
                    error,
                }),
            }
        });

        let mut curves = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(curve) => curves.push(curve),
                Err(failure) => {
                    warn!(curve = %failure.key, error = %failure.error, "curve build failed");
                    failures.push(failure);
                }
            }
        }
        curves.sort_by(|a, b| a.key().cmp(b.key()));
        failures.sort_by(|a, b| a.key.cmp(&b.key));

        Self {
            settings,
            curves,
            failures,
        }
    }

    /// Settings the repository was built with.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Curves in key order.
    pub fn curves(&self) -> &[ForwardCurve] {
        &self.curves
    }

    /// Keys that could not be built, in key order.
    pub fn failures(&self) -> &[CurveBuildFailure] {
        &self.failures
    }

    /// Looks up a curve by key.
    pub fn get(&self, key: &CurveKey) -> Option<&ForwardCurve> {
        self.curves
            .binary_search_by(|curve| curve.key().cmp(key))
            .ok()
            .map(|i| &self.curves[i])
    }

    /// Number of curves built.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True if no curve could be built.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Curves of one product and exchange, in settlement date order.
    pub fn for_product<'a>(
        &'a self,
        product: &'a str,
        exchange: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ForwardCurve> + 'a {
        self.curves
            .iter()
            .filter(move |curve| curve.key().matches(product, exchange))
    }

    /// Rebuilds the failed keys with another interpolation policy.
    ///
    /// Curves already built are kept as they are. Keys that still fail stay
    /// in [`CurveRepository::failures`].
    #[must_use]
    pub fn retry_failed(&self, policy: InterpolationPolicy) -> Self {
        let groups = self
            .failures
            .iter()
            .map(|f| (f.key.clone(), f.observations.clone()))
            .collect();
        let retried = Self::from_groups(groups, self.settings.with_policy(policy));

        let mut curves = self.curves.clone();
        curves.extend(retried.curves);
        curves.sort_by(|a, b| a.key().cmp(b.key()));

        Self {
            settings: self.settings,
            curves,
            failures: retried.failures,
        }
    }

    /// Prices a target contract on every matching curve.
    pub fn price_series(&self, target: &TargetInstrument, anchor: ValuationAnchor) -> PriceSeries {
        PriceSeries::from_curves(&self.curves, target, anchor)
    }
}

fn maybe_parallel_map<T, U, F>(items: Vec<T>, parallel: bool, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel && items.len() > 1 {
            return items.into_par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    items.into_iter().map(f).collect()
}
