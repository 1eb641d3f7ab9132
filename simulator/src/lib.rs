//! Simulation of visitors queueing for a ride-admission controlled ride.

pub mod arrival;
pub mod config;
pub mod error;
pub mod logging;
pub mod reporter;
pub mod scenario;
