//! Admission control for a shared, capacity-limited ride.
//!
//! Visitors arrive over time, each wanting one of several attractions, and wait in a single FIFO
//! queue. The ride runs one session at a time. A session is for a single attraction, and is opened
//! for whichever attraction the visitor at the head of the queue wants. It admits visitors from
//! the head of the queue while they want the same attraction and there is room. Each admitted
//! visitor stays for a fixed dwell time and then leaves. Once the session has emptied and the next
//! visitor wants something else, the session pauses and the next one opens.
//!
//! A controller task makes all of these decisions. Arrivals and departures happen on other tasks
//! and wake the controller through a shared condition. When every expected visitor has ridden and
//! left, the controller returns wait time and utilization [`Statistics`].
//!
//! See the README for an example.

#![deny(missing_docs)]

#[cfg(doctest)]
use doc_comment::doctest;
#[cfg(doctest)]
doctest!("../README.md");

mod config;
mod controller;
mod departure;
pub mod error;
mod ids;
mod queue;
mod ride;
mod state;
mod stats;

pub use config::RideConfig;
pub use error::ConfigError;
pub use ids::{AttractionId, VisitorId};
pub use queue::ArrivalRecord;
pub use ride::Ride;
pub use state::{Phase, RideSnapshot};
pub use stats::{Admission, AttractionSummary, Report, SessionRecord, Statistics};
