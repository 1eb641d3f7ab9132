use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{queue::ArrivalRecord, ride::Shared};

/// Let an admitted visitor out of the ride once they have been inside for `dwell`.
///
/// One of these runs per admitted visitor, so up to `capacity` run at once. They all go through
/// the ride lock to update the occupancy, then wake the controller.
pub(crate) fn spawn_departure(
    shared: Arc<Shared>,
    record: ArrivalRecord,
    dwell: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(dwell).await;

        let occupied = shared.lock().mark_departed();

        debug!(
            visitor = %record.visitor,
            attraction = %record.attraction,
            occupied,
            "Left the ride"
        );

        shared.notify_changed();
    })
}
