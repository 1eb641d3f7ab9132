use std::{
    fmt::{self, Display},
    time::Duration,
};

use bon::bon;

use crate::error::{ConfigError, ConfigResult};

/// The shape of a ride: how many attractions it offers, how many visitors a session can hold at
/// once, and how long each visitor stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RideConfig {
    pub(crate) attractions: u32,
    pub(crate) capacity: usize,
    pub(crate) dwell: Duration,
}

#[bon]
impl RideConfig {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// The number of attractions, numbered `AT-1` to `AT-<n>`.
        #[builder(default = 1)]
        attractions: u32,
        /// The maximum number of visitors inside the ride at once.
        #[builder(default = 1)]
        capacity: usize,
        /// How long each admitted visitor occupies the ride.
        dwell: Duration,
    ) -> ConfigResult<Self> {
        if attractions == 0 {
            return Err(ConfigError::NoAttractions);
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if dwell.is_zero() {
            return Err(ConfigError::ZeroDwell);
        }

        Ok(Self {
            attractions,
            capacity,
            dwell,
        })
    }

    /// The number of attractions.
    pub fn attractions(&self) -> u32 {
        self.attractions
    }

    /// The maximum number of visitors inside the ride at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How long each admitted visitor occupies the ride.
    pub fn dwell(&self) -> Duration {
        self.dwell
    }
}

impl Display for RideConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attractions: {}, capacity: {}, dwell: {:?}",
            self.attractions, self.capacity, self.dwell
        )
    }
}
