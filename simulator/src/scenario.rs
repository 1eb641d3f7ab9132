//! Scenario runner for orchestrating simulations

use ride_admission::{Ride, Statistics};
use tracing::info;

use crate::{arrival::ArrivalGenerator, config::SimulationConfig, error::SimulationError};

/// Runs one simulation: a ride, its controller, and a stream of visitors.
pub struct ScenarioRunner {
    name: String,
    config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create a new scenario runner
    pub fn new(name: impl Into<String>, config: SimulationConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Run until every visitor has ridden and left, and return the statistics.
    pub async fn run(self) -> Result<Statistics, SimulationError> {
        info!(scenario = %self.name, config = %self.config, "Starting simulation");

        let ride = Ride::builder()
            .name(&self.name)
            .config(self.config.ride)
            .total_visitors(self.config.visitors)
            .build();

        let controller = ride.spawn_controller();
        let arrivals = tokio::spawn(ArrivalGenerator::new(&self.config).run(ride.clone()));

        arrivals
            .await
            .map_err(|source| SimulationError::TaskFailed {
                task: "arrival",
                source,
            })?;

        let stats = controller
            .await
            .map_err(|source| SimulationError::TaskFailed {
                task: "controller",
                source,
            })?;

        info!(
            scenario = ride.name(),
            duration = ?stats.simulated_duration(),
            "Simulation finished"
        );

        Ok(stats)
    }
}
