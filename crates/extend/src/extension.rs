//! Scheduled boundary extensions.

use crate::error::ExtendError;
use crate::pow2::pow2;
use tracing::trace;

/// A single extension action.
///
/// Every action only appends samples: a target length shorter than the
/// input leaves the input untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
    /// Appends trailing zeros until the length equals `len`.
    ZeroPadTo {
        /// Target length.
        len: usize,
    },
    /// Appends a half-sample symmetric mirror of the tail until the
    /// length equals `len`.
    ///
    /// For `[a, b, c]` extended to 5 this yields `[a, b, c, c, b]`. Targets
    /// longer than twice the input keep reflecting back and forth.
    SymmetricTo {
        /// Target length.
        len: usize,
    },
}

impl Extension {
    /// Zero padding to `2^level` samples.
    ///
    /// # Errors
    ///
    /// Returns [`ExtendError::LevelOverflow`] if `2^level` does not fit in
    /// `usize`.
    pub fn zero_pad_to_pow2(level: u32) -> Result<Self, ExtendError> {
        let len = pow2(level).ok_or(ExtendError::LevelOverflow { level })?;
        Ok(Self::ZeroPadTo { len })
    }

    /// Returns the target length of the action.
    pub fn target_len(&self) -> usize {
        match *self {
            Self::ZeroPadTo { len } | Self::SymmetricTo { len } => len,
        }
    }

    /// Applies the action to `data`, consuming it.
    pub fn apply(&self, mut data: Vec<f64>) -> Vec<f64> {
        let n = data.len();
        match *self {
            Self::ZeroPadTo { len } => {
                if n < len {
                    data.resize(len, 0.0);
                }
                data
            }
            Self::SymmetricTo { len } => {
                if n == 0 || n >= len {
                    return data;
                }
                data.reserve(len - n);
                for i in n..len {
                    data.push(data[reflect(i, n)]);
                }
                data
            }
        }
    }
}

/// Maps index `i >= n` into `0..n` by half-sample symmetric reflection.
fn reflect(i: usize, n: usize) -> usize {
    let j = i % (2 * n);
    if j < n { j } else { 2 * n - 1 - j }
}

/// An ordered list of extension actions, executed front to back.
///
/// # Example
///
/// ```
/// use dyadic_extend::{Extension, Schedule};
///
/// let extended = Schedule::new()
///     .then(Extension::zero_pad_to_pow2(3)?)
///     .execute(vec![1.0, 2.0, 3.0]);
/// assert_eq!(extended, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
/// # Ok::<(), dyadic_extend::ExtendError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    actions: Vec<Extension>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schedule with `action` appended.
    pub fn then(mut self, action: Extension) -> Self {
        self.actions.push(action);
        self
    }

    /// Returns the scheduled actions in execution order.
    pub fn actions(&self) -> &[Extension] {
        &self.actions
    }

    /// Returns `true` if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs every scheduled action on `data` in order.
    ///
    /// An empty schedule returns `data` unchanged.
    pub fn execute(&self, data: Vec<f64>) -> Vec<f64> {
        let input_len = data.len();
        let out = self
            .actions
            .iter()
            .fold(data, |acc, action| action.apply(acc));
        trace!(
            input_len,
            output_len = out.len(),
            steps = self.actions().len(),
            "extension executed"
        );
        out
    }
}
