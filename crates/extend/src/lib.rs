//! # dyadic-extend
//!
//! Boundary extension for signals whose length does not meet a
//! transform's precondition (typically a power-of-two length).
//!
//! Extensions are scheduled as an ordered list of [`Extension`] actions and
//! then executed. Every action only appends samples, so the extended length
//! is never shorter than the input.
//!
//! ## Quick Start
//!
//! ```
//! use dyadic_extend::{Extension, Schedule, exact_log2, next_power_of_two};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let target = next_power_of_two(data.len()).unwrap();
//! let level = exact_log2(target).unwrap();
//!
//! let padded = Schedule::new()
//!     .then(Extension::zero_pad_to_pow2(level)?)
//!     .execute(data);
//! assert_eq!(padded.len(), 8);
//! # Ok::<(), dyadic_extend::ExtendError>(())
//! ```

mod error;
mod extension;
mod pow2;

pub use error::ExtendError;
pub use extension::{Extension, Schedule};
pub use pow2::{exact_log2, next_power_of_two};
