//! # dyadic-dwt
//!
//! Multi-level discrete wavelet decomposition of one-dimensional signals and
//! its exact inverse.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["&[f64]"] -->|"zero-pad to 2^J"| B["padded signal"]
//!     B -->|"decompose_low / decompose_high × J"| C["DecompositionResult"]
//!     C -->|"reconstruct_to_level(t)"| D["signal at level t"]
//! ```
//!
//! [`Dwt`] drives the levels and keeps the bookkeeping; a
//! [`TransformStrategy`] computes one level. Strategies are looked up by
//! name in a [`StrategyRegistry`].
//!
//! ## Strategies
//!
//! | Name | Type | Edges | Coefficients for `N` samples |
//! |------|------|-------|------------------------------|
//! | `"default"`, `"periodic"` | [`Periodic`] | wraparound | `⌈N/2⌉` |
//! | `"zero"` | [`ZeroPadding`] | zeros | `⌊(N − 1 + o)/2⌋ + 1` |
//! | `"symmetric"` | [`Symmetric`] | mirror | `⌊(N − 1 + o)/2⌋ + 1` |
//!
//! with `o = 2⌊(L − 1)/2⌋` for an `L`-tap filter.
//!
//! ## Supported Filters
//!
//! | Filter | Length | Family |
//! |--------|--------|--------|
//! | [`WaveletFilter::Haar`] | 2 | Haar |
//! | [`WaveletFilter::D4`] | 4 | Daubechies |
//! | [`WaveletFilter::D6`] | 6 | Daubechies |
//! | [`WaveletFilter::D8`] | 8 | Daubechies |
//! | [`WaveletFilter::Sym4`] | 8 | Symlet |
//!
//! Any other bank can be supplied through [`FilterBank::new`] or a custom
//! [`FilterSet`] implementation.
//!
//! ## Quick Start
//!
//! ```
//! use dyadic_dwt::{Dwt, DwtConfig, WaveletFilter};
//!
//! let config = DwtConfig::new(WaveletFilter::D4).with_strategy("symmetric");
//! let dwt = Dwt::from_config(&config)?;
//!
//! let signal: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
//! let result = dwt.decompose(&signal)?;
//! let restored = dwt.reconstruct(&result)?;
//!
//! assert_eq!(restored.len(), signal.len());
//! # Ok::<(), dyadic_dwt::DwtError>(())
//! ```

mod config;
mod dwt;
mod error;
mod filter;
mod result;
mod strategy;

pub use config::DwtConfig;
pub use dwt::Dwt;
pub use error::{DwtError, ErrorKind};
pub use filter::{FilterBank, FilterSet, WaveletFilter};
pub use result::DecompositionResult;
pub use strategy::{
    DEFAULT_STRATEGY, Periodic, StrategyRegistry, Symmetric, TransformStrategy, ZeroPadding,
    strategy_by_name,
};
