use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bon::bon;
use tokio::{
    sync::{futures::Notified, Notify},
    task::JoinHandle,
    time::Instant,
};
use tracing::debug;

use crate::{
    config::RideConfig,
    controller::Controller,
    ids::{AttractionId, VisitorId},
    queue::ArrivalRecord,
    state::{RideSnapshot, RideState},
    stats::Statistics,
};

/// A shared ride with a queue of visitors in front of it.
///
/// Visitors are added with [`Ride::enqueue`] (or [`Ride::arrive`]). A single controller task,
/// started with [`Ride::run_control_loop`] or [`Ride::spawn_controller`], lets them in one
/// session at a time and finishes once every expected visitor has ridden and left.
///
/// Cheap to clone. Cloned instances share the same queue and occupancy.
#[derive(Debug, Clone)]
pub struct Ride {
    name: String,
    config: RideConfig,
    shared: Arc<Shared>,
}

/// The single lock-protected state block, plus the condition used to signal changes to it.
#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<RideState>,
    /// Notified whenever the queue, occupancy or session changes.
    changed: Notify,
}

/// Marks the ride as having a running controller until dropped.
///
/// Dropping the controller future part way through releases the ride, so a new controller can
/// take over.
#[derive(Debug)]
pub(crate) struct ControllerClaim {
    shared: Arc<Shared>,
}

impl ControllerClaim {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let claimed = shared.lock().claim_controller();
        assert!(claimed, "only one controller may run a ride at a time");
        Self { shared }
    }
}

impl Drop for ControllerClaim {
    fn drop(&mut self) {
        // May run while unwinding.
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .release_controller();
    }
}

impl Shared {
    pub(crate) fn from_parts(state: RideState, changed: Notify) -> Self {
        Self {
            state: Mutex::new(state),
            changed,
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RideState> {
        self.state
            .lock()
            .expect("should not panic while holding the ride lock")
    }

    /// Wake every task currently waiting for a change.
    pub(crate) fn notify_changed(&self) {
        self.changed.notify_waiters();
    }

    /// A future that completes on the next change.
    ///
    /// Only changes made after the future is enabled (or first polled) will wake it.
    pub(crate) fn changed(&self) -> Notified<'_> {
        self.changed.notified()
    }
}

#[bon]
impl Ride {
    /// Create a new ride.
    ///
    /// `total_visitors` is the number of visitors that will arrive over the whole simulation. The
    /// controller finishes once that many have been admitted and have left.
    #[builder]
    pub fn new(name: impl Into<String>, config: RideConfig, total_visitors: u64) -> Self {
        Self {
            name: name.into(),
            config,
            shared: Arc::new(Shared::from_parts(
                RideState::new(config.capacity, total_visitors),
                Notify::new(),
            )),
        }
    }

    /// Add a visitor to the back of the queue and wake the controller.
    ///
    /// Never blocks.
    pub fn enqueue(&self, visitor: VisitorId, attraction: AttractionId, arrived_at: Instant) {
        self.shared.lock().push(ArrivalRecord {
            visitor,
            attraction,
            arrived_at,
        });

        debug!(ride = %self.name, %visitor, %attraction, "Waiting in the queue");

        self.shared.notify_changed();
    }

    /// Add a visitor who has just arrived.
    pub fn arrive(&self, visitor: VisitorId, attraction: AttractionId) {
        self.enqueue(visitor, attraction, Instant::now());
    }

    /// Run the controller until every expected visitor has ridden and left.
    ///
    /// Only one controller may run for a ride at a time.
    pub async fn run_control_loop(&self) -> Statistics {
        Controller::new(self.name.clone(), self.config, Arc::clone(&self.shared))
            .run()
            .await
    }

    /// Run the controller in a background task.
    pub fn spawn_controller(&self) -> JoinHandle<Statistics> {
        let ride = self.clone();
        tokio::spawn(async move { ride.run_control_loop().await })
    }

    /// The current state of the ride.
    pub fn snapshot(&self) -> RideSnapshot {
        self.shared.lock().snapshot()
    }

    /// The ride's name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ride's configuration.
    pub fn config(&self) -> RideConfig {
        self.config
    }
}
