//! Multi-level decomposition and reconstruction driver.

use std::sync::Arc;

use dyadic_extend::{ExtendError, Extension, Schedule, exact_log2, next_power_of_two};
use tracing::{debug, trace};

use crate::config::DwtConfig;
use crate::error::DwtError;
use crate::filter::{self, FilterBank, FilterSet};
use crate::result::{DecompositionBuilder, DecompositionResult};
use crate::strategy::{DEFAULT_STRATEGY, StrategyRegistry, TransformStrategy};

/// Minimum number of samples a decomposition accepts.
const MIN_SIGNAL_LEN: usize = 2;

/// Discrete wavelet transform over a fixed filter set.
///
/// The filter set decides *what* is computed; the [`TransformStrategy`]
/// decides how one level is filtered and how edges are handled. Swapping the
/// strategy does not affect level bookkeeping.
///
/// # Example
///
/// ```
/// use dyadic_dwt::{Dwt, WaveletFilter};
///
/// let dwt = Dwt::new(WaveletFilter::Haar.filter_bank())?;
/// let result = dwt.decompose(&[1.0, 2.0, 3.0, 4.0])?;
/// assert_eq!(result.level(), 2);
///
/// let restored = dwt.reconstruct(&result)?;
/// assert!((restored[3] - 4.0).abs() < 1e-12);
/// # Ok::<(), dyadic_dwt::DwtError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Dwt<F = FilterBank> {
    filters: F,
    bank: FilterBank,
    strategy: Arc<dyn TransformStrategy>,
}

impl Dwt<FilterBank> {
    /// Builds a transform from a configuration, resolving the strategy
    /// against [`StrategyRegistry::default`].
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::StrategyNotFound`] for an unknown strategy name.
    pub fn from_config(config: &DwtConfig) -> Result<Self, DwtError> {
        Self::from_config_with_registry(config, &StrategyRegistry::default())
    }

    /// Builds a transform from a configuration and a custom registry.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::StrategyNotFound`] for an unknown strategy name.
    pub fn from_config_with_registry(
        config: &DwtConfig,
        registry: &StrategyRegistry,
    ) -> Result<Self, DwtError> {
        let strategy = registry.resolve(config.strategy())?;
        let filters = config.filter().filter_bank();
        Ok(Self {
            bank: filters.clone(),
            filters,
            strategy,
        })
    }
}

impl<F: FilterSet> Dwt<F> {
    /// Creates a transform using the `"default"` strategy.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::InvalidFilter`] if a filter vector is empty or
    /// non-finite.
    pub fn new(filters: F) -> Result<Self, DwtError> {
        Self::with_registry(filters, &StrategyRegistry::default())
    }

    /// Creates a transform whose default strategy comes from `registry`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DwtError::InvalidFilter`] | unusable filter vectors |
    /// | [`DwtError::StrategyNotFound`] | `registry` has no `"default"` entry |
    pub fn with_registry(filters: F, registry: &StrategyRegistry) -> Result<Self, DwtError> {
        let bank = filter::align(&filters)?;
        let strategy = registry.resolve(DEFAULT_STRATEGY)?;
        Ok(Self {
            filters,
            bank,
            strategy,
        })
    }

    /// Returns the transform with `strategy` in place of the current one.
    pub fn with_strategy(mut self, strategy: Arc<dyn TransformStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the strategy used by all subsequent calls.
    pub fn set_transform_strategy(&mut self, strategy: Arc<dyn TransformStrategy>) {
        debug!(strategy = strategy.name(), "transform strategy replaced");
        self.strategy = strategy;
    }

    /// Returns the current strategy.
    pub fn strategy(&self) -> &dyn TransformStrategy {
        self.strategy.as_ref()
    }

    /// Returns the filter set.
    pub fn filters(&self) -> &F {
        &self.filters
    }

    /// Decomposes `data` to the maximal level.
    ///
    /// The input is zero-padded to the nearest power of two `2^J` first (no
    /// padding when the length already is one), then decomposed to level
    /// `J`. The result remembers the unpadded length.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::SignalTooShort`] if `data` has fewer than 2
    /// samples.
    #[tracing::instrument(skip_all, fields(len = data.len(), strategy = self.strategy.name()))]
    pub fn decompose(&self, data: &[f64]) -> Result<DecompositionResult, DwtError> {
        check_signal_len(data)?;

        let overflow = ExtendError::LevelOverflow { level: usize::BITS };
        let target = next_power_of_two(data.len()).ok_or(overflow.clone())?;
        let level = exact_log2(target).ok_or(overflow)?;

        let signal = if data.len() < target {
            let pad = Extension::zero_pad_to_pow2(level)?;
            debug!(
                from = data.len(),
                to = pad.target_len(),
                "zero-padding signal to power of two"
            );
            Schedule::new().then(pad).execute(data.to_vec())
        } else {
            data.to_vec()
        };

        Ok(self.run(signal, level as usize, data.len()))
    }

    /// Decomposes `data` to at most `level` levels.
    ///
    /// Stops early once the approximation has a single sample; the result's
    /// level is then the number of levels actually produced. Under the
    /// non-periodic strategies a filter longer than the signal keeps the
    /// approximation at a fixed length, and every requested level is run.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DwtError::InvalidLevel`] | `level < 1` |
    /// | [`DwtError::SignalTooShort`] | `data.len() < 2` |
    #[tracing::instrument(skip_all, fields(len = data.len(), level = level, strategy = self.strategy.name()))]
    pub fn decompose_to_level(
        &self,
        data: &[f64],
        level: usize,
    ) -> Result<DecompositionResult, DwtError> {
        if level < 1 {
            return Err(DwtError::InvalidLevel { level });
        }
        check_signal_len(data)?;
        Ok(self.run(data.to_vec(), level, data.len()))
    }

    fn run(&self, mut signal: Vec<f64>, level: usize, original_len: usize) -> DecompositionResult {
        let low = self.bank.low_decomposition();
        let high = self.bank.high_decomposition();
        let mut result = DecompositionBuilder::new(original_len);

        for i in 1..=level {
            let approximation = self.strategy.decompose_low(&signal, low);
            let details = self.strategy.decompose_high(&signal, high);
            let input_len = signal.len();
            trace!(level = i, input_len, coeffs = approximation.len(), "level decomposed");

            result.push_input_len(input_len);
            result.add_details(details);
            result.set_level(i);
            signal = approximation;

            if signal.len() == 1 {
                if i < level {
                    debug!(
                        requested = level,
                        reached = i,
                        "decomposition stopped early"
                    );
                }
                break;
            }
        }

        result.set_approximation(signal);
        result.build()
    }

    /// Reconstructs the original-resolution signal.
    ///
    /// The output has the caller's original length, padding removed.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::TargetLevelTooHigh`] if the decomposition has no
    /// levels.
    pub fn reconstruct(&self, decomposition: &DecompositionResult) -> Result<Vec<f64>, DwtError> {
        self.reconstruct_to_level(decomposition, 0)
    }

    /// Reconstructs the signal at level `target`.
    ///
    /// Walks from the top level down to `target + 1`, combining the running
    /// signal with that level's details. The output length is
    /// [`DecompositionResult::signal_len(target)`](DecompositionResult::signal_len).
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::TargetLevelTooHigh`] if
    /// `target >= decomposition.level()`.
    #[tracing::instrument(skip_all, fields(level = decomposition.level(), target = target, strategy = self.strategy.name()))]
    pub fn reconstruct_to_level(
        &self,
        decomposition: &DecompositionResult,
        target: usize,
    ) -> Result<Vec<f64>, DwtError> {
        let level = decomposition.level();
        if target >= level {
            return Err(DwtError::TargetLevelTooHigh { target, level });
        }

        let low = self.bank.low_reconstruction();
        let high = self.bank.high_reconstruction();
        let mut reconstructed = decomposition.approximation().to_vec();

        for (i, details) in decomposition
            .details()
            .iter()
            .enumerate()
            .skip(target)
            .rev()
        {
            let mut next = self.strategy.reconstruct(&reconstructed, details, low, high);
            if let Some(len) = decomposition.input_len(i + 1) {
                next.truncate(len);
            }
            trace!(level = i + 1, len = next.len(), "level reconstructed");
            reconstructed = next;
        }

        if target == 0 {
            reconstructed.truncate(decomposition.original_len());
        }
        Ok(reconstructed)
    }
}

fn check_signal_len(data: &[f64]) -> Result<(), DwtError> {
    if data.len() < MIN_SIGNAL_LEN {
        return Err(DwtError::SignalTooShort {
            len: data.len(),
            min: MIN_SIGNAL_LEN,
        });
    }
    Ok(())
}
