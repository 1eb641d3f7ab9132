//! Errors raised while configuring a ride.
//!
//! A running ride has no recoverable failure modes. Anything that goes wrong once the controller
//! is running is a bug, and is caught by assertions rather than reported here.

use thiserror::Error;

/// The ride configuration was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// There must be at least one attraction to choose from.
    #[error("The number of attractions must be positive")]
    NoAttractions,

    /// A session must be able to hold at least one visitor.
    #[error("The ride capacity must be positive")]
    ZeroCapacity,

    /// Visitors must occupy the ride for some amount of time.
    #[error("The dwell duration must be positive")]
    ZeroDwell,

    /// A parameter was outside its allowed range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result alias for configuration steps.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
