//! Decomposition result container.

/// Output of a multi-level decomposition.
///
/// Holds the coarsest approximation, one detail vector per level (finest
/// first) and the length of the signal each level consumed. Only
/// [`Dwt`](crate::Dwt) builds values of this type, so the invariants below
/// hold for every instance:
///
/// - `details().len() == level()`
/// - `approximation().len() >= 1`
/// - the detail at level `i` has the length of the approximation produced
///   at level `i`
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionResult {
    approximation: Vec<f64>,
    details: Vec<Vec<f64>>,
    input_lens: Vec<usize>,
    original_len: usize,
    level: usize,
}

impl DecompositionResult {
    /// Returns the approximation at the highest level.
    pub fn approximation(&self) -> &[f64] {
        &self.approximation
    }

    /// Returns all detail vectors, finest level first.
    pub fn details(&self) -> &[Vec<f64>] {
        &self.details
    }

    /// Returns the detail vector of `level` (1-based).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        level
            .checked_sub(1)
            .and_then(|i| self.details.get(i))
            .map(|v| v.as_slice())
    }

    /// Returns the highest level produced.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the length of the signal that `level` (1-based) decomposed.
    ///
    /// Level 1 consumed the padded input; level `i > 1` consumed the
    /// approximation of level `i - 1`.
    pub fn input_len(&self, level: usize) -> Option<usize> {
        level
            .checked_sub(1)
            .and_then(|i| self.input_lens.get(i))
            .copied()
    }

    /// Returns the length of the signal at `level`.
    ///
    /// Level 0 is the caller's input before any padding. This is the length
    /// [`Dwt::reconstruct_to_level`](crate::Dwt::reconstruct_to_level)
    /// returns for the same level.
    pub fn signal_len(&self, level: usize) -> Option<usize> {
        match level {
            0 => Some(self.original_len),
            l if l < self.level => self.input_len(l + 1),
            l if l == self.level => Some(self.approximation.len()),
            _ => None,
        }
    }

    /// Returns the input length before power-of-two padding.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Returns `true` if the input was zero-padded before decomposition.
    pub fn is_padded(&self) -> bool {
        self.input_len(1)
            .is_some_and(|padded| padded > self.original_len)
    }
}

/// Accumulates a [`DecompositionResult`] inside one decomposition call.
#[derive(Debug)]
pub(crate) struct DecompositionBuilder {
    approximation: Vec<f64>,
    details: Vec<Vec<f64>>,
    input_lens: Vec<usize>,
    original_len: usize,
    level: usize,
}

impl DecompositionBuilder {
    pub(crate) fn new(original_len: usize) -> Self {
        Self {
            approximation: Vec::new(),
            details: Vec::new(),
            input_lens: Vec::new(),
            original_len,
            level: 0,
        }
    }

    pub(crate) fn set_approximation(&mut self, approximation: Vec<f64>) {
        self.approximation = approximation;
    }

    pub(crate) fn add_details(&mut self, details: Vec<f64>) {
        self.details.push(details);
    }

    pub(crate) fn push_input_len(&mut self, len: usize) {
        self.input_lens.push(len);
    }

    pub(crate) fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    pub(crate) fn build(self) -> DecompositionResult {
        debug_assert_eq!(self.details.len(), self.level);
        debug_assert_eq!(self.input_lens.len(), self.level);
        DecompositionResult {
            approximation: self.approximation,
            details: self.details,
            input_lens: self.input_lens,
            original_len: self.original_len,
            level: self.level,
        }
    }
}
