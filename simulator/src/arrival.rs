//! Randomly arriving visitors.

use rand::{rngs::StdRng, Rng, SeedableRng};
use ride_admission::{AttractionId, Ride, VisitorId};
use tokio::time::Duration;
use tracing::{debug, info};

use crate::config::SimulationConfig;

/// Generates visitors one after another, each wanting a random attraction, with a random gap
/// before the next one.
///
/// Seeded, so the same seed always produces the same attractions and gaps.
pub struct ArrivalGenerator {
    rng: StdRng,
    attractions: u32,
    visitors: u64,
    max_interval_units: u32,
    time_unit: Duration,
}

/// One visitor's arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// The attraction they want.
    pub attraction: AttractionId,
    /// How long until the next visitor arrives.
    pub gap: Duration,
}

impl ArrivalGenerator {
    /// Create a new generator for the given simulation.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            attractions: config.ride.attractions(),
            visitors: config.visitors,
            max_interval_units: config.max_interval_units,
            time_unit: config.time_unit,
        }
    }

    /// Sample the next arrival.
    pub fn next_arrival(&mut self) -> Arrival {
        let attraction = AttractionId(self.rng.random_range(1..=self.attractions));
        let units = self.rng.random_range(0..=self.max_interval_units);

        Arrival {
            attraction,
            gap: self.time_unit * units,
        }
    }

    /// Send every visitor to the ride, sleeping between arrivals.
    pub async fn run(mut self, ride: Ride) {
        info!(visitors = self.visitors, "Visitors are arriving");

        for visitor in (1..=self.visitors).map(VisitorId) {
            let arrival = self.next_arrival();

            ride.arrive(visitor, arrival.attraction);
            debug!(%visitor, attraction = %arrival.attraction, gap = ?arrival.gap, "Arrived");

            tokio::time::sleep(arrival.gap).await;
        }

        info!("Every visitor has arrived");
    }
}
