//! Filter sets: the four filter vectors a transform consumes.

use crate::error::DwtError;
use serde::Deserialize;

/// Provider of the four filter vectors of a two-channel filter bank.
///
/// The vectors are read-only to the transform. Decomposition filters are
/// given in correlation order: coefficient `m` multiplies sample `2k + m`
/// of the window for output `k`. Filters stored in convolution order (as
/// most tables list them) must be reversed first. Under this convention an
/// orthogonal bank uses the decomposition filters for reconstruction too.
///
/// The four vectors may differ in length, as in the biorthogonal CDF 5/3
/// bank (5/3/3/5 taps). A bank whose lengths differ is placed on a common
/// support before filtering:
///
/// - the support is the longest filter, rounded up to an even length;
/// - every shorter filter is centred on it;
/// - when centring leaves an odd number of zeros, low-pass filters take the
///   extra zero after their taps and high-pass filters take it before.
///
/// A bank whose four vectors share one length is used as given.
pub trait FilterSet {
    /// Low-pass decomposition (analysis) filter.
    fn low_decomposition(&self) -> &[f64];
    /// High-pass decomposition (analysis) filter.
    fn high_decomposition(&self) -> &[f64];
    /// Low-pass reconstruction (synthesis) filter.
    fn low_reconstruction(&self) -> &[f64];
    /// High-pass reconstruction (synthesis) filter.
    fn high_reconstruction(&self) -> &[f64];
}

/// Checks that a filter set can drive a transform.
///
/// All four vectors must be non-empty and finite.
pub(crate) fn validate(filters: &impl FilterSet) -> Result<(), DwtError> {
    for (role, coeffs) in roles(filters) {
        if coeffs.is_empty() {
            return Err(DwtError::InvalidFilter {
                reason: format!("empty {role} filter"),
            });
        }
        if !coeffs.iter().all(|c| c.is_finite()) {
            return Err(DwtError::InvalidFilter {
                reason: format!("{role} filter contains non-finite coefficients"),
            });
        }
    }
    Ok(())
}

fn roles(filters: &impl FilterSet) -> [(&'static str, &[f64]); 4] {
    [
        ("low decomposition", filters.low_decomposition()),
        ("high decomposition", filters.high_decomposition()),
        ("low reconstruction", filters.low_reconstruction()),
        ("high reconstruction", filters.high_reconstruction()),
    ]
}

/// Validates `filters` and places them on one common support.
///
/// The returned bank has four vectors of equal length; see [`FilterSet`]
/// for the placement rule.
pub(crate) fn align(filters: &impl FilterSet) -> Result<FilterBank, DwtError> {
    validate(filters)?;
    let lens = roles(filters).map(|(_, coeffs)| coeffs.len());
    if lens.iter().all(|&len| len == lens[0]) {
        return Ok(FilterBank {
            low_decomposition: filters.low_decomposition().to_vec(),
            high_decomposition: filters.high_decomposition().to_vec(),
            low_reconstruction: filters.low_reconstruction().to_vec(),
            high_reconstruction: filters.high_reconstruction().to_vec(),
        });
    }

    let longest = lens.iter().copied().max().unwrap_or_default();
    let support = longest + longest % 2;
    Ok(FilterBank {
        low_decomposition: place(filters.low_decomposition(), support, false),
        high_decomposition: place(filters.high_decomposition(), support, true),
        low_reconstruction: place(filters.low_reconstruction(), support, false),
        high_reconstruction: place(filters.high_reconstruction(), support, true),
    })
}

fn place(coeffs: &[f64], support: usize, lean_right: bool) -> Vec<f64> {
    let spare = support - coeffs.len();
    let lead = if lean_right { spare.div_ceil(2) } else { spare / 2 };
    let mut out = vec![0.0; support];
    out[lead..lead + coeffs.len()].copy_from_slice(coeffs);
    out
}

/// An owned filter bank.
///
/// # Example
///
/// ```
/// use dyadic_dwt::{FilterBank, FilterSet};
///
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let bank = FilterBank::orthogonal(vec![s, s])?;
/// assert_eq!(bank.high_decomposition(), &[s, -s]);
/// # Ok::<(), dyadic_dwt::DwtError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBank {
    low_decomposition: Vec<f64>,
    high_decomposition: Vec<f64>,
    low_reconstruction: Vec<f64>,
    high_reconstruction: Vec<f64>,
}

impl FilterBank {
    /// Creates a filter bank from four explicit vectors.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::InvalidFilter`] if a vector is empty or holds a
    /// non-finite value.
    pub fn new(
        low_decomposition: Vec<f64>,
        high_decomposition: Vec<f64>,
        low_reconstruction: Vec<f64>,
        high_reconstruction: Vec<f64>,
    ) -> Result<Self, DwtError> {
        let bank = Self {
            low_decomposition,
            high_decomposition,
            low_reconstruction,
            high_reconstruction,
        };
        validate(&bank)?;
        Ok(bank)
    }

    /// Builds an orthogonal bank from scaling coefficients.
    ///
    /// The wavelet filter follows the quadrature mirror relation
    /// `g[m] = (-1)^m h[L-1-m]`; reconstruction reuses both analysis filters.
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::InvalidFilter`] if `scaling` is empty or
    /// non-finite.
    pub fn orthogonal(scaling: Vec<f64>) -> Result<Self, DwtError> {
        let wavelet = quadrature_mirror(&scaling);
        Self::new(scaling.clone(), wavelet.clone(), scaling, wavelet)
    }

    /// Returns the length of the longest of the four filters.
    pub fn len(&self) -> usize {
        [
            &self.low_decomposition,
            &self.high_decomposition,
            &self.low_reconstruction,
            &self.high_reconstruction,
        ]
        .iter()
        .map(|f| f.len())
        .max()
        .unwrap_or_default()
    }

    /// Returns `true` if the bank holds no coefficients.
    ///
    /// Note: a validated bank is never empty.
    pub fn is_empty(&self) -> bool {
        self.low_decomposition.is_empty()
    }
}

impl FilterSet for FilterBank {
    fn low_decomposition(&self) -> &[f64] {
        &self.low_decomposition
    }

    fn high_decomposition(&self) -> &[f64] {
        &self.high_decomposition
    }

    fn low_reconstruction(&self) -> &[f64] {
        &self.low_reconstruction
    }

    fn high_reconstruction(&self) -> &[f64] {
        &self.high_reconstruction
    }
}

fn quadrature_mirror(scaling: &[f64]) -> Vec<f64> {
    scaling
        .iter()
        .rev()
        .enumerate()
        .map(|(m, &h)| if m % 2 == 0 { h } else { -h })
        .collect()
}

/// Built-in orthogonal wavelet families.
///
/// # Example
///
/// ```
/// use dyadic_dwt::WaveletFilter;
///
/// let filter = WaveletFilter::from_name("D4")?;
/// assert_eq!(filter.length(), 4);
/// # Ok::<(), dyadic_dwt::DwtError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum WaveletFilter {
    /// Haar wavelet (length 2).
    #[default]
    Haar,
    /// Daubechies D4 wavelet (length 4).
    D4,
    /// Daubechies D6 wavelet (length 6).
    D6,
    /// Daubechies D8 wavelet (length 8).
    D8,
    /// Symlet with 4 vanishing moments (length 8).
    Sym4,
}

const HAAR: [f64; 2] = [std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2];

const D4: [f64; 4] = [
    0.482_962_913_144_534_1,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_4,
    -0.129_409_522_551_260_4,
];

const D6: [f64; 6] = [
    0.332_670_552_950_082_63,
    0.806_891_509_311_092_7,
    0.459_877_502_118_491_5,
    -0.135_011_020_010_254_6,
    -0.085_441_273_882_026_66,
    0.035_226_291_885_709_554,
];

const D8: [f64; 8] = [
    0.230_377_813_308_896_5,
    0.714_846_570_552_915_7,
    0.630_880_767_929_858_9,
    -0.027_983_769_416_859_854,
    -0.187_034_811_719_093_09,
    0.030_841_381_835_560_764,
    0.032_883_011_666_885_2,
    -0.010_597_401_785_069_032,
];

const SYM4: [f64; 8] = [
    -0.075_765_714_789_273_33,
    -0.029_635_527_645_998_51,
    0.497_618_667_632_015_45,
    0.803_738_751_805_916_1,
    0.297_857_795_605_277_36,
    -0.099_219_543_576_847_22,
    -0.012_603_967_262_037_833,
    0.032_223_100_604_042_7,
];

impl WaveletFilter {
    /// Every built-in filter, shortest first.
    pub const ALL: [WaveletFilter; 5] = [Self::Haar, Self::D4, Self::D6, Self::D8, Self::Sym4];

    /// Returns the filter length (number of coefficients).
    pub fn length(&self) -> usize {
        self.scaling_coeffs().len()
    }

    /// Returns the scaling (father wavelet) coefficients.
    pub fn scaling_coeffs(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR,
            Self::D4 => &D4,
            Self::D6 => &D6,
            Self::D8 => &D8,
            Self::Sym4 => &SYM4,
        }
    }

    /// Returns the wavelet (mother wavelet) coefficients.
    ///
    /// Derived from the scaling coefficients via the quadrature mirror
    /// filter relationship.
    pub fn wavelet_coeffs(&self) -> Vec<f64> {
        quadrature_mirror(self.scaling_coeffs())
    }

    /// Returns the orthogonal filter bank for this wavelet.
    pub fn filter_bank(&self) -> FilterBank {
        let scaling = self.scaling_coeffs().to_vec();
        let wavelet = self.wavelet_coeffs();
        FilterBank {
            low_decomposition: scaling.clone(),
            high_decomposition: wavelet.clone(),
            low_reconstruction: scaling,
            high_reconstruction: wavelet,
        }
    }

    /// Returns the canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::D4 => "d4",
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::Sym4 => "sym4",
        }
    }

    /// Parses a wavelet filter from a case-insensitive name string.
    ///
    /// # Supported Names
    ///
    /// | Input | Filter |
    /// |-------|--------|
    /// | `"haar"` | [`WaveletFilter::Haar`] |
    /// | `"d4"`, `"db2"` | [`WaveletFilter::D4`] |
    /// | `"d6"`, `"db3"` | [`WaveletFilter::D6`] |
    /// | `"d8"`, `"db4"` | [`WaveletFilter::D8`] |
    /// | `"sym4"` | [`WaveletFilter::Sym4`] |
    ///
    /// # Errors
    ///
    /// Returns [`DwtError::UnsupportedFilter`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, DwtError> {
        match name.to_lowercase().as_str() {
            "haar" => Ok(Self::Haar),
            "d4" | "db2" => Ok(Self::D4),
            "d6" | "db3" => Ok(Self::D6),
            "d8" | "db4" => Ok(Self::D8),
            "sym4" => Ok(Self::Sym4),
            _ => Err(DwtError::UnsupportedFilter(name.to_string())),
        }
    }
}

impl TryFrom<String> for WaveletFilter {
    type Error = DwtError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn filter_lengths() {
        assert_eq!(WaveletFilter::Haar.length(), 2);
        assert_eq!(WaveletFilter::D4.length(), 4);
        assert_eq!(WaveletFilter::D6.length(), 6);
        assert_eq!(WaveletFilter::D8.length(), 8);
        assert_eq!(WaveletFilter::Sym4.length(), 8);
    }

    #[test]
    fn filter_default_is_haar() {
        assert_eq!(WaveletFilter::default(), WaveletFilter::Haar);
    }

    #[test]
    fn scaling_coeffs_are_orthonormal() {
        for filter in WaveletFilter::ALL {
            let h = filter.scaling_coeffs();
            let sum: f64 = h.iter().sum();
            assert_abs_diff_eq!(sum, std::f64::consts::SQRT_2, epsilon = 1e-10);
            for shift in (0..h.len()).step_by(2) {
                let dot: f64 = h.iter().zip(&h[shift..]).map(|(a, b)| a * b).sum();
                let expected = if shift == 0 { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(dot, expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn wavelet_coeffs_sum_to_zero() {
        for filter in WaveletFilter::ALL {
            let sum: f64 = filter.wavelet_coeffs().iter().sum();
            assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn haar_wavelet_signs() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(WaveletFilter::Haar.wavelet_coeffs(), vec![s, -s]);
    }

    #[test]
    fn from_name_valid() {
        assert_eq!(
            WaveletFilter::from_name("HAAR").unwrap(),
            WaveletFilter::Haar
        );
        assert_eq!(WaveletFilter::from_name("d4").unwrap(), WaveletFilter::D4);
        assert_eq!(WaveletFilter::from_name("db3").unwrap(), WaveletFilter::D6);
        assert_eq!(WaveletFilter::from_name("D8").unwrap(), WaveletFilter::D8);
        assert_eq!(
            WaveletFilter::from_name("Sym4").unwrap(),
            WaveletFilter::Sym4
        );
    }

    #[test]
    fn from_name_round_trips_canonical_name() {
        for filter in WaveletFilter::ALL {
            assert_eq!(WaveletFilter::from_name(filter.name()).unwrap(), filter);
        }
    }

    #[test]
    fn from_name_invalid() {
        let err = WaveletFilter::from_name("coif4").unwrap_err();
        assert!(matches!(err, DwtError::UnsupportedFilter(ref s) if s == "coif4"));
    }

    #[test]
    fn bank_rejects_empty_filter() {
        let err = FilterBank::new(vec![], vec![1.0], vec![1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, DwtError::InvalidFilter { .. }));
    }

    fn cdf53() -> FilterBank {
        FilterBank::new(
            vec![-0.125, 0.25, 0.75, 0.25, -0.125],
            vec![-0.5, 1.0, -0.5],
            vec![0.5, 1.0, 0.5],
            vec![-0.125, -0.25, 0.75, -0.25, -0.125],
        )
        .unwrap()
    }

    #[test]
    fn bank_accepts_unequal_lengths() {
        let bank = cdf53();
        assert_eq!(bank.len(), 5);
        assert_eq!(bank.high_decomposition().len(), 3);
    }

    #[test]
    fn align_centres_on_even_support() {
        let aligned = align(&cdf53()).unwrap();
        assert_eq!(
            aligned.low_decomposition(),
            &[-0.125, 0.25, 0.75, 0.25, -0.125, 0.0]
        );
        assert_eq!(aligned.high_decomposition(), &[0.0, 0.0, -0.5, 1.0, -0.5, 0.0]);
        assert_eq!(aligned.low_reconstruction(), &[0.0, 0.5, 1.0, 0.5, 0.0, 0.0]);
        assert_eq!(
            aligned.high_reconstruction(),
            &[0.0, -0.125, -0.25, 0.75, -0.25, -0.125]
        );
    }

    #[test]
    fn align_keeps_equal_length_bank() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let bank = FilterBank::new(
            vec![s, s, 0.0],
            vec![s, -s, 0.0],
            vec![s, s, 0.0],
            vec![s, -s, 0.0],
        )
        .unwrap();
        assert_eq!(align(&bank).unwrap(), bank);
        let d4 = WaveletFilter::D4.filter_bank();
        assert_eq!(align(&d4).unwrap(), d4);
    }

    #[test]
    fn bank_rejects_non_finite() {
        let err = FilterBank::orthogonal(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, DwtError::InvalidFilter { .. }));
    }

    #[test]
    fn orthogonal_bank_matches_builtin() {
        let bank = FilterBank::orthogonal(WaveletFilter::D4.scaling_coeffs().to_vec()).unwrap();
        assert_eq!(bank, WaveletFilter::D4.filter_bank());
        assert_eq!(bank.len(), 4);
        assert!(!bank.is_empty());
    }

    #[test]
    fn filter_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<WaveletFilter>();
        assert_impl::<FilterBank>();
    }
}
