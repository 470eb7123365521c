//! Error types for the vswap library.
//!
//! All fallible operations return `Result<T, VswapError>` rather than panicking.
//! Failures are deterministic: the same inputs always fail the same way, so
//! there is nothing to retry.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, VswapError>;

/// Errors raised by realized-variance, hedge and replication computations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VswapError {
    /// A numeric precondition is violated (e.g., non-positive price, zero
    /// separator, non-finite scalar).
    #[error("domain error: {message}")]
    DomainError { message: String },

    /// A structural precondition on the input arrays is violated (e.g., strike
    /// grid not strictly ascending, fewer than 3 nodes, mismatched lengths,
    /// separator outside `[k[0], k[n-1])`).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_message_accessible() {
        let err = VswapError::DomainError {
            message: "price must be positive".into(),
        };
        match &err {
            VswapError::DomainError { message } => assert!(message.contains("positive")),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = VswapError::DomainError {
            message: "separator is zero".into(),
        };
        assert!(format!("{err}").contains("separator is zero"));

        let err2 = VswapError::InvalidArgument {
            message: "strikes not ascending".into(),
        };
        let display = format!("{err2}");
        assert!(display.starts_with("invalid argument"));
        assert!(display.contains("strikes not ascending"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VswapError>();
    }
}
