//! One-level filtering strategies and the registry that names them.
//!
//! Every strategy shares one filter convention. Analysis correlates the
//! signal with the decomposition filter at even offsets,
//! `c[k] = Σ_m f[m] · x(2k − o + m)`, and synthesis spreads each
//! coefficient back through the reconstruction filter,
//! `y(2k − o + m) += r[m] · c[k]`. Strategies differ in how `x(i)` is read
//! outside `0..N` and in the offset `o`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dyadic_extend::{Extension, Schedule};
use tracing::debug;

use crate::error::DwtError;

/// Registry name of the strategy used when none is set explicitly.
pub const DEFAULT_STRATEGY: &str = "default";

/// One level of a two-channel filter bank.
///
/// Implementations are stateless; the filter vectors are passed in on
/// every call. [`Dwt`](crate::Dwt) always passes filters placed on the
/// bank's common support, so all four share one length.
///
/// For a given input, `decompose_low` and `decompose_high` must return
/// vectors of the same length, and `reconstruct` must return at
/// least as many samples as the signal that was decomposed (callers trim
/// the surplus).
pub trait TransformStrategy: fmt::Debug + Send + Sync {
    /// Returns the name the strategy is registered under by default.
    fn name(&self) -> &str;

    /// Returns the number of coefficients produced for a signal of
    /// `signal_len` samples and a bank whose common support is `filter_len`
    /// taps.
    fn coeff_len(&self, signal_len: usize, filter_len: usize) -> usize;

    /// Low-pass filters and downsamples `signal` into the next approximation.
    fn decompose_low(&self, signal: &[f64], low_filter: &[f64]) -> Vec<f64>;

    /// High-pass filters and downsamples `signal` into the detail vector.
    fn decompose_high(&self, signal: &[f64], high_filter: &[f64]) -> Vec<f64>;

    /// Upsamples both channels, filters them and sums the result.
    fn reconstruct(
        &self,
        approximation: &[f64],
        details: &[f64],
        low_filter: &[f64],
        high_filter: &[f64],
    ) -> Vec<f64>;
}

/// Periodic wraparound at both edges.
///
/// Odd-length input is first extended by one half-sample symmetric sample
/// (the last sample repeated), so `N` samples produce `⌈N/2⌉` coefficients
/// regardless of the filter length. Reconstruction returns `2·K` samples
/// for `K` coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Periodic;

impl Periodic {
    fn analyze(signal: &[f64], filter: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }
        let even = n + n % 2;
        let x = Schedule::new()
            .then(Extension::SymmetricTo { len: even })
            .execute(signal.to_vec());
        (0..even / 2)
            .map(|k| {
                filter
                    .iter()
                    .enumerate()
                    .map(|(m, &f)| f * x[(2 * k + m) % even])
                    .sum()
            })
            .collect()
    }
}

impl TransformStrategy for Periodic {
    fn name(&self) -> &str {
        "periodic"
    }

    fn coeff_len(&self, signal_len: usize, _filter_len: usize) -> usize {
        signal_len.div_ceil(2)
    }

    fn decompose_low(&self, signal: &[f64], low_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, low_filter)
    }

    fn decompose_high(&self, signal: &[f64], high_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, high_filter)
    }

    fn reconstruct(
        &self,
        approximation: &[f64],
        details: &[f64],
        low_filter: &[f64],
        high_filter: &[f64],
    ) -> Vec<f64> {
        let k_len = approximation.len().min(details.len());
        let len = 2 * k_len;
        let mut out = vec![0.0; len];
        for k in 0..k_len {
            for (m, &f) in low_filter.iter().enumerate() {
                out[(2 * k + m) % len] += f * approximation[k];
            }
            for (m, &f) in high_filter.iter().enumerate() {
                out[(2 * k + m) % len] += f * details[k];
            }
        }
        out
    }
}

/// Offset of the first analysis window, `2⌊(L−1)/2⌋`.
///
/// Windows start at every even position that still overlaps the signal.
fn window_offset(filter_len: usize) -> usize {
    2 * (filter_len.saturating_sub(1) / 2)
}

fn extended_coeff_len(signal_len: usize, filter_len: usize) -> usize {
    if signal_len == 0 {
        return 0;
    }
    (signal_len - 1 + window_offset(filter_len)) / 2 + 1
}

fn analyze_extended(signal: &[f64], filter: &[f64], sample: impl Fn(isize) -> f64) -> Vec<f64> {
    let offset = window_offset(filter.len()) as isize;
    (0..extended_coeff_len(signal.len(), filter.len()))
        .map(|k| {
            let start = 2 * k as isize - offset;
            filter
                .iter()
                .enumerate()
                .map(|(m, &f)| f * sample(start + m as isize))
                .sum()
        })
        .collect()
}

/// Synthesis for the non-periodic strategies.
///
/// Only samples inside the reconstructed range are accumulated; the
/// coefficients that straddle the edges already carry the boundary data.
fn synthesize_extended(
    approximation: &[f64],
    details: &[f64],
    low_filter: &[f64],
    high_filter: &[f64],
) -> Vec<f64> {
    let k_len = approximation.len().min(details.len());
    let offset = window_offset(low_filter.len().max(high_filter.len()));
    let len = (2 * k_len).saturating_sub(offset);
    let mut out = vec![0.0; len];
    let mut spread = |filter: &[f64], coeffs: &[f64]| {
        for (k, &c) in coeffs.iter().take(k_len).enumerate() {
            let start = 2 * k as isize - offset as isize;
            for (m, &f) in filter.iter().enumerate() {
                let n = start + m as isize;
                if n >= 0 && (n as usize) < len {
                    out[n as usize] += f * c;
                }
            }
        }
    };
    spread(low_filter, approximation);
    spread(high_filter, details);
    out
}

/// Zeros outside the signal.
///
/// `N` samples and an `L`-tap filter produce `⌊(N − 1 + o)/2⌋ + 1`
/// coefficients with `o = 2⌊(L − 1)/2⌋`, so every window touching the
/// signal is kept. For the Haar filter this is `⌈N/2⌉`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroPadding;

impl ZeroPadding {
    fn analyze(signal: &[f64], filter: &[f64]) -> Vec<f64> {
        let n = signal.len() as isize;
        analyze_extended(signal, filter, |i| {
            if (0..n).contains(&i) {
                signal[i as usize]
            } else {
                0.0
            }
        })
    }
}

impl TransformStrategy for ZeroPadding {
    fn name(&self) -> &str {
        "zero"
    }

    fn coeff_len(&self, signal_len: usize, filter_len: usize) -> usize {
        extended_coeff_len(signal_len, filter_len)
    }

    fn decompose_low(&self, signal: &[f64], low_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, low_filter)
    }

    fn decompose_high(&self, signal: &[f64], high_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, high_filter)
    }

    fn reconstruct(
        &self,
        approximation: &[f64],
        details: &[f64],
        low_filter: &[f64],
        high_filter: &[f64],
    ) -> Vec<f64> {
        synthesize_extended(approximation, details, low_filter, high_filter)
    }
}

/// Half-sample symmetric reflection at both edges (`x(−1) = x(0)`).
///
/// Same coefficient count as [`ZeroPadding`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Symmetric;

impl Symmetric {
    fn analyze(signal: &[f64], filter: &[f64]) -> Vec<f64> {
        let n = signal.len() as isize;
        analyze_extended(signal, filter, |i| {
            let j = i.rem_euclid(2 * n);
            let j = if j < n { j } else { 2 * n - 1 - j };
            signal[j as usize]
        })
    }
}

impl TransformStrategy for Symmetric {
    fn name(&self) -> &str {
        "symmetric"
    }

    fn coeff_len(&self, signal_len: usize, filter_len: usize) -> usize {
        extended_coeff_len(signal_len, filter_len)
    }

    fn decompose_low(&self, signal: &[f64], low_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, low_filter)
    }

    fn decompose_high(&self, signal: &[f64], high_filter: &[f64]) -> Vec<f64> {
        Self::analyze(signal, high_filter)
    }

    fn reconstruct(
        &self,
        approximation: &[f64],
        details: &[f64],
        low_filter: &[f64],
        high_filter: &[f64],
    ) -> Vec<f64> {
        synthesize_extended(approximation, details, low_filter, high_filter)
    }
}

/// Name-to-strategy lookup.
///
/// Names are case-insensitive. [`StrategyRegistry::default`] registers
///
/// | Name | Strategy |
/// |------|----------|
/// | `"default"` | [`Periodic`] |
/// | `"periodic"` | [`Periodic`] |
/// | `"zero"` | [`ZeroPadding`] |
/// | `"symmetric"` | [`Symmetric`] |
///
/// # Example
///
/// ```
/// use dyadic_dwt::StrategyRegistry;
///
/// let registry = StrategyRegistry::default();
/// let strategy = registry.resolve("symmetric")?;
/// assert_eq!(strategy.name(), "symmetric");
/// assert!(registry.resolve("lifting").is_err());
/// # Ok::<(), dyadic_dwt::DwtError>(())
/// ```
#[derive(Clone, Debug)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn TransformStrategy>>,
}

impl StrategyRegistry {
    /// Creates a registry with no entries.
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Registers `strategy` under `name`, returning any strategy it replaces.
    pub fn register(
        &mut self,
        name: &str,
        strategy: Arc<dyn TransformStrategy>,
    ) -> Option<Arc<dyn TransformStrategy>> {
        debug!(name, strategy = strategy.name(), "registering transform strategy");
        self.strategies.insert(name.to_lowercase(), strategy)
    }

    /// Looks up the strategy registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::StrategyNotFound`] if nothing is registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn TransformStrategy>, DwtError> {
        self.strategies
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| DwtError::StrategyNotFound(name.to_string()))
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        let periodic: Arc<dyn TransformStrategy> = Arc::new(Periodic);
        registry.register(DEFAULT_STRATEGY, Arc::clone(&periodic));
        registry.register("periodic", periodic);
        registry.register("zero", Arc::new(ZeroPadding));
        registry.register("symmetric", Arc::new(Symmetric));
        registry
    }
}

/// Resolves `name` against [`StrategyRegistry::default`].
///
/// # Errors
///
/// Returns [`DwtError::StrategyNotFound`] for unknown names.
pub fn strategy_by_name(name: &str) -> Result<Arc<dyn TransformStrategy>, DwtError> {
    StrategyRegistry::default().resolve(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterSet, WaveletFilter};
    use approx::assert_abs_diff_eq;

    fn strategies() -> Vec<Arc<dyn TransformStrategy>> {
        vec![Arc::new(Periodic), Arc::new(ZeroPadding), Arc::new(Symmetric)]
    }

    fn one_level_round_trip(strategy: &dyn TransformStrategy, filter: WaveletFilter, x: &[f64]) {
        let bank = filter.filter_bank();
        let a = strategy.decompose_low(x, bank.low_decomposition());
        let d = strategy.decompose_high(x, bank.high_decomposition());
        assert_eq!(a.len(), d.len());
        assert_eq!(a.len(), strategy.coeff_len(x.len(), filter.length()));

        let y = strategy.reconstruct(&a, &d, bank.low_reconstruction(), bank.high_reconstruction());
        assert!(y.len() >= x.len());
        for (&orig, &rec) in x.iter().zip(&y) {
            assert_abs_diff_eq!(orig, rec, epsilon = 1e-10);
        }
    }

    #[test]
    fn haar_periodic_one_level() {
        let bank = WaveletFilter::Haar.filter_bank();
        let x = [1.0, 2.0, 3.0, 4.0];
        let a = Periodic.decompose_low(&x, bank.low_decomposition());
        let d = Periodic.decompose_high(&x, bank.high_decomposition());
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(a[0], 3.0 * s, epsilon = 1e-12);
        assert_abs_diff_eq!(a[1], 7.0 * s, epsilon = 1e-12);
        assert_abs_diff_eq!(d[0], -s, epsilon = 1e-12);
        assert_abs_diff_eq!(d[1], -s, epsilon = 1e-12);
    }

    #[test]
    fn every_strategy_inverts_one_level() {
        let x = [3.0, -1.0, 4.0, 1.0, -5.0, 9.0, 2.0, -6.0, 5.0, 3.0];
        for strategy in strategies() {
            for filter in WaveletFilter::ALL {
                one_level_round_trip(strategy.as_ref(), filter, &x);
                one_level_round_trip(strategy.as_ref(), filter, &x[..7]);
                one_level_round_trip(strategy.as_ref(), filter, &x[..2]);
            }
        }
    }

    #[test]
    fn periodic_odd_length_repeats_last_sample() {
        let x = [1.0, 2.0, 3.0];
        let a = Periodic.decompose_low(&x, &[1.0, 1.0]);
        assert_eq!(a, vec![3.0, 6.0]);
    }

    #[test]
    fn periodic_filter_longer_than_signal_wraps() {
        let a = Periodic.decompose_low(&[1.0, 2.0], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(a, vec![6.0]);
    }

    #[test]
    fn zero_padding_reads_zeros_outside() {
        // 4-tap filter: the first window starts two samples before the signal.
        let a = ZeroPadding.decompose_low(&[1.0, 2.0], &[1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(a, vec![2100.0, 21.0]);
    }

    #[test]
    fn symmetric_reflects_edges() {
        let a = Symmetric.decompose_low(&[1.0, 2.0], &[1.0, 10.0, 100.0, 1000.0]);
        // x(-2) = 2, x(-1) = 1, x(2) = 2, x(3) = 1
        assert_eq!(a, vec![2112.0, 1221.0]);
    }

    #[test]
    fn coeff_len_rules() {
        assert_eq!(Periodic.coeff_len(8, 8), 4);
        assert_eq!(Periodic.coeff_len(7, 2), 4);
        assert_eq!(ZeroPadding.coeff_len(8, 2), 4);
        assert_eq!(ZeroPadding.coeff_len(8, 4), 5);
        assert_eq!(Symmetric.coeff_len(3, 2), 2);
        assert_eq!(Symmetric.coeff_len(0, 4), 0);
    }

    #[test]
    fn empty_signal_yields_empty_output() {
        for strategy in strategies() {
            assert!(strategy.decompose_low(&[], &[1.0, 1.0]).is_empty());
            assert!(strategy.reconstruct(&[], &[], &[1.0, 1.0], &[1.0, -1.0]).is_empty());
        }
    }

    #[test]
    fn default_registry_names() {
        let registry = StrategyRegistry::default();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["default", "periodic", "symmetric", "zero"]);
        assert_eq!(registry.resolve("default").unwrap().name(), "periodic");
        assert_eq!(registry.resolve("ZERO").unwrap().name(), "zero");
    }

    #[test]
    fn resolve_unknown_is_not_found() {
        let err = strategy_by_name("lifting").unwrap_err();
        assert_eq!(err, DwtError::StrategyNotFound("lifting".into()));
    }

    #[test]
    fn register_replaces_entry() {
        let mut registry = StrategyRegistry::empty();
        assert!(registry.resolve(DEFAULT_STRATEGY).is_err());
        assert!(registry.register(DEFAULT_STRATEGY, Arc::new(Symmetric)).is_none());
        let old = registry.register(DEFAULT_STRATEGY, Arc::new(ZeroPadding));
        assert_eq!(old.unwrap().name(), "symmetric");
        assert_eq!(registry.resolve(DEFAULT_STRATEGY).unwrap().name(), "zero");
    }

    #[test]
    fn strategies_are_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Periodic>();
        assert_impl::<ZeroPadding>();
        assert_impl::<Symmetric>();
        assert_impl::<StrategyRegistry>();
    }
}
