use ride_admission::ConfigError;
use thiserror::Error;
use tokio::task::JoinError;

/// Why a simulation could not run to completion.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SimulationError {
    /// The parameters were rejected before anything started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A simulation task panicked or was cancelled.
    #[error("The {task} task failed")]
    TaskFailed {
        /// Which task.
        task: &'static str,
        /// The underlying failure.
        #[source]
        source: JoinError,
    },
}
