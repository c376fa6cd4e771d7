//! Moderate-value analytics
//!
//! The core calculation behind the analytics endpoint: count how many
//! hourly samples of a variable fall strictly below its moderate-value
//! threshold, then price the energy those hours would consume against the
//! flat per-kWh rates of the Irish electricity providers.

use std::collections::BTreeMap;

use crate::errors::DomainError;
use crate::value_objects::HourlyVariable;

/// Assumed appliance consumption per favourable hour, in kWh
pub const AVERAGE_CONSUMPTION_KWH_PER_HOUR: f64 = 0.48;

/// Round a value to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count the samples strictly below the threshold
///
/// Missing samples never count, mirroring NaN comparison semantics in the
/// sample data this replaces.
#[must_use]
pub fn crossing_count(samples: &[Option<f64>], threshold: f64) -> u32 {
    let count = samples
        .iter()
        .flatten()
        .filter(|value| **value < threshold)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Estimate the cost of the counted hours for every provider
///
/// cost = round(hours x 0.48 kWh x rate, 2)
#[must_use]
pub fn estimate_costs(hours: u32, rates: &ProviderRates) -> BTreeMap<String, f64> {
    let total_kwh = f64::from(hours) * AVERAGE_CONSUMPTION_KWH_PER_HOUR;
    rates
        .iter()
        .map(|(provider, rate)| (provider.to_string(), round2(total_kwh * rate)))
        .collect()
}

/// The per-variable moderate-value thresholds
///
/// Loaded once at process start; immutable afterwards. Defaults carry the
/// six reference thresholds, and individual thresholds may be overridden at
/// startup within each variable's documented range.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerateValues {
    thresholds: BTreeMap<HourlyVariable, f64>,
}

impl Default for ModerateValues {
    fn default() -> Self {
        let thresholds = [
            (HourlyVariable::Temperature2m, 14.0),
            (HourlyVariable::RelativeHumidity2m, 65.0),
            (HourlyVariable::DewPoint2m, 6.0),
            (HourlyVariable::CloudCover, 50.0),
            (HourlyVariable::WindDirection10m, 180.0),
            (HourlyVariable::WindGusts10m, 80.0),
        ]
        .into_iter()
        .collect();
        Self { thresholds }
    }
}

impl ModerateValues {
    /// Build the table from an explicit threshold map
    ///
    /// Variables absent from the map have no threshold and yield null
    /// statistics downstream.
    #[must_use]
    pub const fn new(thresholds: BTreeMap<HourlyVariable, f64>) -> Self {
        Self { thresholds }
    }

    /// Apply startup overrides on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` when an override falls
    /// outside the variable's accepted range.
    pub fn with_overrides(
        overrides: &BTreeMap<HourlyVariable, f64>,
    ) -> Result<Self, DomainError> {
        let mut values = Self::default();
        for (variable, threshold) in overrides {
            let (min, max) = variable.override_range();
            if !(min..=max).contains(threshold) {
                return Err(DomainError::ValidationError(format!(
                    "moderate value {threshold} for {variable} is outside {min}..={max}"
                )));
            }
            values.thresholds.insert(*variable, *threshold);
        }
        Ok(values)
    }

    /// The threshold for a variable, if one is configured
    #[must_use]
    pub fn threshold(&self, variable: HourlyVariable) -> Option<f64> {
        self.thresholds.get(&variable).copied()
    }
}

/// Flat per-kWh electricity rates by provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRates {
    rates: BTreeMap<String, f64>,
}

impl Default for ProviderRates {
    fn default() -> Self {
        let rates = [
            ("Electric Ireland", 0.42),
            ("Bord Gais Energy", 0.43),
            ("SSE Airtricity", 0.43),
            ("Energia", 0.38),
            ("PrePayPower", 0.46),
            ("Flogas", 0.43),
        ]
        .into_iter()
        .map(|(provider, rate)| (provider.to_string(), rate))
        .collect();
        Self { rates }
    }
}

impl ProviderRates {
    /// Build the table from an explicit rate map
    #[must_use]
    pub const fn new(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Iterate over (provider, rate) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(provider, rate)| (provider.as_str(), *rate))
    }

    /// Number of configured providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether no providers are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
