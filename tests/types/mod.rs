use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use ride_admission::{AttractionId, Ride, RideConfig, Statistics, VisitorId};
use tokio::task::JoinHandle;

pub fn ride(
    name: &str,
    attractions: u32,
    capacity: usize,
    dwell: Duration,
    total_visitors: u64,
) -> Ride {
    Ride::builder()
        .name(name)
        .config(
            RideConfig::builder()
                .attractions(attractions)
                .capacity(capacity)
                .dwell(dwell)
                .build()
                .unwrap(),
        )
        .total_visitors(total_visitors)
        .build()
}

/// Visitors `1..=wanting.len()` arrive all at once, each wanting the given attraction.
pub fn arrive_all(ride: &Ride, wanting: &[u32]) {
    for (i, &attraction) in wanting.iter().enumerate() {
        ride.arrive(VisitorId(i as u64 + 1), AttractionId(attraction));
    }
}

/// Visitors `1..=visitors` arrive with random attractions and random gaps between them.
pub fn spawn_visitors(
    ride: &Ride,
    attractions: u32,
    visitors: u64,
    max_gap: Duration,
    seed: u64,
) -> JoinHandle<()> {
    let ride = ride.clone();
    let mut rng = StdRng::seed_from_u64(seed);
    let max_gap_ms = max_gap.as_millis() as u64;

    tokio::spawn(async move {
        for visitor in 1..=visitors {
            let attraction = rng.random_range(1..=attractions);
            ride.arrive(VisitorId(visitor), AttractionId(attraction));

            let gap = rng.random_range(0..=max_gap_ms);
            tokio::time::sleep(Duration::from_millis(gap)).await;
        }
    })
}

/// Visitor ids in the order they were let in.
pub fn admission_order(stats: &Statistics) -> Vec<u64> {
    stats
        .admissions()
        .iter()
        .map(|admission| admission.visitor.0)
        .collect()
}

/// The most visitors inside the ride at any one moment, reconstructed from the admission log.
pub fn peak_occupancy(stats: &Statistics, dwell: Duration) -> usize {
    let admissions = stats.admissions();
    admissions
        .iter()
        .map(|a| {
            admissions
                .iter()
                .filter(|b| b.admitted_at <= a.admitted_at && a.admitted_at < b.admitted_at + dwell)
                .count()
        })
        .max()
        .unwrap_or(0)
}
