//! Transform configuration.

use serde::Deserialize;

use crate::filter::WaveletFilter;
use crate::strategy::DEFAULT_STRATEGY;

/// Selects the filter bank and strategy for a [`Dwt`](crate::Dwt).
///
/// Build it in code with the builder methods, or deserialize it from a
/// configuration file:
///
/// ```toml
/// filter = "d4"
/// strategy = "symmetric"
/// ```
///
/// # Example
///
/// ```
/// use dyadic_dwt::{DwtConfig, WaveletFilter};
///
/// let config = DwtConfig::new(WaveletFilter::D4).with_strategy("symmetric");
/// assert_eq!(config.strategy(), "symmetric");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DwtConfig {
    #[serde(default)]
    filter: WaveletFilter,
    #[serde(default = "default_strategy")]
    strategy: String,
}

fn default_strategy() -> String {
    DEFAULT_STRATEGY.to_string()
}

impl Default for DwtConfig {
    fn default() -> Self {
        Self::new(WaveletFilter::default())
    }
}

impl DwtConfig {
    /// Creates a configuration for `filter` with the default strategy.
    pub fn new(filter: WaveletFilter) -> Self {
        Self {
            filter,
            strategy: default_strategy(),
        }
    }

    /// Sets the registry name of the strategy.
    pub fn with_strategy(mut self, name: impl Into<String>) -> Self {
        self.strategy = name.into();
        self
    }

    /// Returns the wavelet filter.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Returns the registry name of the strategy.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }
}
