//! Analytics tables configuration.
//!
//! The moderate-value and provider-rate tables are process-wide constants
//! materialized once at startup. Threshold overrides are validated against
//! the per-variable ranges; rates replace the default table wholesale when
//! configured.

use std::collections::BTreeMap;

use application::ApplicationError;
use domain::analytics::{ModerateValues, ProviderRates};
use domain::value_objects::HourlyVariable;
use serde::{Deserialize, Serialize};

/// Analytics tables configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Moderate-value threshold overrides, keyed by hourly variable name
    #[serde(default)]
    pub moderate_values: BTreeMap<String, f64>,

    /// Electricity provider rates in €/kWh; empty keeps the default table
    #[serde(default)]
    pub provider_rates: BTreeMap<String, f64>,
}

impl AnalyticsConfig {
    /// Materialize the moderate-value table
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown variable names or
    /// thresholds outside the variable's accepted range.
    pub fn moderate_values(&self) -> Result<ModerateValues, ApplicationError> {
        let mut overrides = BTreeMap::new();
        for (name, threshold) in &self.moderate_values {
            let variable: HourlyVariable = name
                .parse()
                .map_err(|e: domain::DomainError| ApplicationError::Configuration(e.to_string()))?;
            overrides.insert(variable, *threshold);
        }
        ModerateValues::with_overrides(&overrides)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Materialize the provider rate table
    #[must_use]
    pub fn provider_rates(&self) -> ProviderRates {
        if self.provider_rates.is_empty() {
            ProviderRates::default()
        } else {
            ProviderRates::new(self.provider_rates.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_default_tables() {
        let config = AnalyticsConfig::default();
        let values = config.moderate_values().expect("defaults are valid");
        assert_eq!(values, ModerateValues::default());
        assert_eq!(config.provider_rates(), ProviderRates::default());
    }

    #[test]
    fn valid_override_is_applied() {
        let config = AnalyticsConfig {
            moderate_values: [("temperature_2m".to_string(), 18.0)].into_iter().collect(),
            provider_rates: BTreeMap::new(),
        };
        let values = config.moderate_values().expect("in range");
        assert_eq!(values.threshold(HourlyVariable::Temperature2m), Some(18.0));
    }

    #[test]
    fn unknown_variable_is_a_configuration_error() {
        let config = AnalyticsConfig {
            moderate_values: [("snow_depth".to_string(), 1.0)].into_iter().collect(),
            provider_rates: BTreeMap::new(),
        };
        let err = config.moderate_values().unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn out_of_range_override_is_a_configuration_error() {
        let config = AnalyticsConfig {
            moderate_values: [("dew_point_2m".to_string(), 50.0)].into_iter().collect(),
            provider_rates: BTreeMap::new(),
        };
        let err = config.moderate_values().unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn configured_rates_replace_the_default_table() {
        let config = AnalyticsConfig {
            moderate_values: BTreeMap::new(),
            provider_rates: [("Night Saver".to_string(), 0.21)].into_iter().collect(),
        };
        let rates = config.provider_rates();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.iter().next(), Some(("Night Saver", 0.21)));
    }
}
