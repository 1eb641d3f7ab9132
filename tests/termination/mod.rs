use std::time::Duration;

use ride_admission::{AttractionId, Phase, VisitorId};
use rstest::rstest;

use crate::types::{admission_order, peak_occupancy, ride, spawn_visitors};

/// Given visitors arriving at random
/// When the controller runs to completion
/// Then everyone is let in exactly once, in arrival order, and nobody is left behind
#[tokio::test]
#[rstest]
#[timeout(Duration::from_secs(5))]
async fn everyone_rides_exactly_once(
    #[values(1, 3)] attractions: u32,
    #[values(1, 4)] capacity: usize,
    #[values(0, 30)] max_gap_ms: u64,
) {
    tokio::time::pause();

    let visitors = 25;
    let dwell = Duration::from_millis(20);
    let ride = ride("everyone_rides_exactly_once", attractions, capacity, dwell, visitors);

    let controller = ride.spawn_controller();
    let generator = spawn_visitors(
        &ride,
        attractions,
        visitors,
        Duration::from_millis(max_gap_ms),
        7,
    );

    generator.await.unwrap();
    let stats = controller.await.unwrap();

    assert_eq!(
        admission_order(&stats),
        (1..=visitors).collect::<Vec<_>>(),
        "one queue, so admission order is arrival order"
    );
    for admission in stats.admissions() {
        assert!(admission.admitted_at >= admission.arrived_at);
    }

    let snapshot = ride.snapshot();
    assert!(snapshot.is_quiescent());
    assert_eq!(snapshot.served, visitors);
    assert_eq!(snapshot.phase, Phase::Done);

    let sessions = stats.sessions();
    assert_eq!(
        sessions.iter().map(|s| s.admitted as u64).sum::<u64>(),
        visitors
    );
    for pair in sessions.windows(2) {
        assert!(
            pair[0].ended_at <= pair[1].started_at,
            "sessions should never overlap"
        );
    }

    assert!(peak_occupancy(&stats, dwell) <= capacity);

    let utilization = stats.utilization();
    assert!((0.0..=1.0).contains(&utilization), "{utilization}");
}

/// Given visitors arriving at random
/// When we watch the ride while it runs
/// Then occupancy stays within capacity and the served count only goes up
#[tokio::test]
#[rstest]
#[timeout(Duration::from_secs(5))]
async fn invariants_hold_throughout(#[values(1, 2, 5)] capacity: usize) {
    tokio::time::pause();

    let visitors = 40;
    let ride = ride(
        "invariants_hold_throughout",
        3,
        capacity,
        Duration::from_millis(15),
        visitors,
    );

    let controller = ride.spawn_controller();
    let generator = spawn_visitors(&ride, 3, visitors, Duration::from_millis(10), 99);

    let mut last_served = 0;
    loop {
        let snapshot = ride.snapshot();

        assert!(snapshot.occupied <= snapshot.capacity);
        assert!(snapshot.served >= last_served, "served count went down");
        assert!(snapshot.served <= snapshot.total);
        if snapshot.phase == Phase::Idle {
            assert_eq!(snapshot.occupied, 0, "nobody inside without a session");
        }
        last_served = snapshot.served;

        if snapshot.phase == Phase::Done {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    generator.await.unwrap();
    let stats = controller.await.unwrap();
    assert_eq!(stats.admissions().len() as u64, visitors);
}

#[tokio::test]
async fn no_visitors_finishes_immediately() {
    let ride = ride("no_visitors", 2, 2, Duration::from_millis(10), 0);

    let stats = ride.run_control_loop().await;

    assert!(stats.sessions().is_empty());
    assert_eq!(ride.snapshot().phase, Phase::Done);
}

#[tokio::test(start_paused = true)]
async fn second_controller_panics() {
    let ride = ride("second_controller_panics", 1, 1, Duration::from_millis(10), 1);

    let first = ride.spawn_controller();
    tokio::task::yield_now().await;

    let second = ride.spawn_controller();
    let err = second.await.unwrap_err();
    assert!(err.is_panic(), "only one controller may run at a time");

    first.abort();
}

/// Given a controller that is cancelled part way through
/// When a new controller is started on the same ride
/// Then it takes over and finishes the simulation
#[tokio::test(start_paused = true)]
async fn controller_restarts_after_timeout() {
    let ride = ride("controller_restarts_after_timeout", 1, 1, Duration::from_millis(10), 2);
    ride.arrive(VisitorId(1), AttractionId(1));

    let result = tokio::time::timeout(Duration::from_millis(5), ride.run_control_loop()).await;
    assert!(result.is_err(), "visitor 1 is still riding");
    assert_eq!(ride.snapshot().occupied, 1);

    ride.arrive(VisitorId(2), AttractionId(1));
    let stats = ride.run_control_loop().await;

    assert_eq!(admission_order(&stats), vec![2]);
    assert_eq!(ride.snapshot().phase, Phase::Done);
}

#[tokio::test(start_paused = true)]
async fn controller_restarts_after_abort() {
    let ride = ride("controller_restarts_after_abort", 1, 1, Duration::from_millis(10), 1);

    let first = ride.spawn_controller();
    tokio::task::yield_now().await;
    first.abort();
    assert!(first.await.unwrap_err().is_cancelled());

    let second = ride.spawn_controller();
    ride.arrive(VisitorId(1), AttractionId(1));

    let stats = second.await.unwrap();
    assert_eq!(stats.admissions().len(), 1);
}
