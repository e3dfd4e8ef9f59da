//! Error types for the dyadic-extend crate.

/// Error type for all fallible operations in the dyadic-extend crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendError {
    /// Returned when `2^level` does not fit in `usize`.
    #[error("power-of-two level {level} overflows usize")]
    LevelOverflow {
        /// Level that was requested.
        level: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_level_overflow() {
        let err = ExtendError::LevelOverflow { level: 64 };
        assert_eq!(err.to_string(), "power-of-two level 64 overflows usize");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ExtendError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ExtendError>();
    }
}
