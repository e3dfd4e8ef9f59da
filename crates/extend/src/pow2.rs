//! Power-of-two length helpers.

/// Returns the nearest power of two that is `>= n`.
///
/// `0` and `1` both map to `1`. Returns `None` when the result does not
/// fit in `usize`.
///
/// # Example
///
/// ```
/// use dyadic_extend::next_power_of_two;
///
/// assert_eq!(next_power_of_two(5), Some(8));
/// assert_eq!(next_power_of_two(8), Some(8));
/// ```
pub fn next_power_of_two(n: usize) -> Option<usize> {
    n.checked_next_power_of_two()
}

/// Returns `k` such that `n == 2^k`, or `None` if `n` is not a power of two.
pub fn exact_log2(n: usize) -> Option<u32> {
    if n.is_power_of_two() {
        Some(n.trailing_zeros())
    } else {
        None
    }
}

/// Returns `2^level`, or `None` on overflow.
pub(crate) fn pow2(level: u32) -> Option<usize> {
    1usize.checked_shl(level)
}
