//! Reporting of simulation results

use std::fmt;

use ride_admission::Statistics;

use crate::config::SimulationConfig;

/// Summary statistics for a finished simulation.
///
/// Printed with `Display`.
pub struct SimulationReporter<'a> {
    stats: &'a Statistics,
    config: &'a SimulationConfig,
}

impl<'a> SimulationReporter<'a> {
    /// Create a new simulation reporter
    pub fn new(stats: &'a Statistics, config: &'a SimulationConfig) -> Self {
        Self { stats, config }
    }

    /// Print summary statistics to stdout
    pub fn print_summary(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimulationReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        let report = self.stats.report();

        writeln!(f, "=== Scenario Configuration ===")?;
        writeln!(f, "Attractions:        {}", config.ride.attractions())?;
        writeln!(f, "Visitors:           {}", config.visitors)?;
        writeln!(f, "Capacity:           {}", config.ride.capacity())?;
        writeln!(
            f,
            "Dwell:              {:.2} ms",
            config.ride.dwell().as_secs_f64() * 1000.0
        )?;
        writeln!(
            f,
            "Max interval:       {:.2} ms",
            config.units(config.max_interval_units).as_secs_f64() * 1000.0
        )?;
        writeln!(f, "Seed:               {}", config.seed)?;

        writeln!(f, "\n=== Simulation Results ===")?;
        writeln!(f, "Visitors served:    {}", report.visitors_served)?;
        writeln!(f, "Sessions:           {}", report.sessions)?;
        writeln!(
            f,
            "Simulated duration: {:.2}s",
            report.simulated_duration.as_secs_f64()
        )?;

        writeln!(f, "\nAverage wait:")?;
        for attraction in &report.attractions {
            writeln!(
                f,
                "  {}: {:.2} ms ({} visitors)",
                attraction.attraction,
                attraction.average_wait_ms(),
                attraction.visitors
            )?;
        }

        writeln!(f, "\nOccupancy rate:     {:.2}", report.utilization)
    }
}
