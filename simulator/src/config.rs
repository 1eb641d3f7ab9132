//! Command line parameters and the validated simulation configuration built from them.

use std::{fmt, time::Duration};

use clap::Parser;
use ride_admission::{error::ConfigResult, ConfigError, RideConfig};

/// Simulate visitors queueing for a shared ride.
///
/// Durations are given in abstract time units. `TIME_UNIT` sets how many milliseconds one unit
/// lasts.
#[derive(Parser, Debug, Clone)]
#[command(name = "ride-sim")]
pub struct Args {
    /// Number of attractions, named AT-1 to AT-<n>.
    #[arg(allow_negative_numbers = true)]
    pub attractions: i64,

    /// Number of visitors over the whole simulation.
    #[arg(allow_negative_numbers = true)]
    pub visitors: i64,

    /// Maximum number of visitors inside the ride at once.
    #[arg(allow_negative_numbers = true)]
    pub capacity: i64,

    /// How long each visitor stays inside, in time units.
    #[arg(allow_negative_numbers = true)]
    pub dwell: i64,

    /// Maximum gap between two arrivals, in time units.
    #[arg(allow_negative_numbers = true)]
    pub max_interval: i64,

    /// Random seed. The same seed gives the same arrivals.
    #[arg(allow_negative_numbers = true)]
    pub seed: i64,

    /// Length of one time unit, in milliseconds.
    #[arg(allow_negative_numbers = true)]
    pub time_unit: i64,

    /// Log every visitor as they come and go.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything needed to run one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Shape of the ride itself.
    pub ride: RideConfig,
    /// Number of visitors over the whole simulation.
    pub visitors: u64,
    /// Maximum gap between two arrivals, in time units.
    pub max_interval_units: u32,
    /// Seed for attraction choice and arrival gaps.
    pub seed: u64,
    /// Length of one time unit.
    pub time_unit: Duration,
}

impl SimulationConfig {
    /// The real duration of `units` time units.
    pub fn units(&self, units: u32) -> Duration {
        self.time_unit * units
    }
}

impl TryFrom<&Args> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> ConfigResult<Self> {
        let attractions = positive("attractions", args.attractions)?;
        let visitors = positive("visitors", args.visitors)?;
        let capacity = positive("capacity", args.capacity)?;
        let dwell = positive("dwell", args.dwell)?;
        let max_interval_units = non_negative("max_interval", args.max_interval)?;
        let seed = non_negative("seed", args.seed)?;
        let time_unit_ms = positive("time_unit", args.time_unit)?;

        let attractions = u32::try_from(attractions).map_err(|_| too_large("attractions"))?;
        let capacity = usize::try_from(capacity).map_err(|_| too_large("capacity"))?;
        let dwell_ms = dwell
            .checked_mul(time_unit_ms)
            .ok_or_else(|| too_large("dwell"))?;
        let max_interval_units =
            u32::try_from(max_interval_units).map_err(|_| too_large("max_interval"))?;
        if u64::from(max_interval_units)
            .checked_mul(time_unit_ms)
            .is_none()
        {
            return Err(too_large("max_interval"));
        }

        let ride = RideConfig::builder()
            .attractions(attractions)
            .capacity(capacity)
            .dwell(Duration::from_millis(dwell_ms))
            .build()?;

        Ok(Self {
            ride,
            visitors,
            max_interval_units,
            seed,
            time_unit: Duration::from_millis(time_unit_ms),
        })
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, visitors: {}, max interval: {:?}, seed: {}",
            self.ride,
            self.visitors,
            self.units(self.max_interval_units),
            self.seed
        )
    }
}

fn positive(name: &'static str, value: i64) -> ConfigResult<u64> {
    if value <= 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(value as u64)
}

fn non_negative(name: &'static str, value: i64) -> ConfigResult<u64> {
    if value < 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(value as u64)
}

fn too_large(name: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: "too large".to_string(),
    }
}
