use std::process::ExitCode;

use clap::Parser;
use simulator::{
    config::{Args, SimulationConfig},
    error::SimulationError,
    logging,
    reporter::SimulationReporter,
    scenario::ScenarioRunner,
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    logging::init(args.verbose);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(SimulationError::Config(e)) => {
            eprintln!("Invalid parameters: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Simulation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), SimulationError> {
    let config = SimulationConfig::try_from(args)?;

    let stats = ScenarioRunner::new("ride", config).run().await?;

    SimulationReporter::new(&stats, &config).print_summary();

    Ok(())
}
