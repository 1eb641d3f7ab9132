use std::collections::VecDeque;

use tokio::time::Instant;

use crate::ids::{AttractionId, VisitorId};

/// A visitor who has arrived and is waiting to be admitted.
///
/// Immutable once created. Each record is taken off the queue exactly once, when the visitor is
/// admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalRecord {
    /// Who arrived.
    pub visitor: VisitorId,
    /// Which attraction they want to ride.
    pub attraction: AttractionId,
    /// When they joined the queue.
    pub arrived_at: Instant,
}

/// An unbounded FIFO of visitors waiting for admission.
///
/// Only ever touched while holding the ride state lock, so peeking at the front and then popping
/// it is atomic with respect to other users of the queue.
#[derive(Debug, Default)]
pub(crate) struct AdmissionQueue {
    queue: VecDeque<ArrivalRecord>,
}

impl AdmissionQueue {
    pub(crate) fn push_back(&mut self, record: ArrivalRecord) {
        self.queue.push_back(record);
    }

    pub(crate) fn peek_front(&self) -> Option<&ArrivalRecord> {
        self.queue.front()
    }

    pub(crate) fn pop_front(&mut self) -> Option<ArrivalRecord> {
        self.queue.pop_front()
    }

    /// The attraction wanted by the visitor at the front of the queue.
    pub(crate) fn front_attraction(&self) -> Option<AttractionId> {
        self.peek_front().map(|record| record.attraction)
    }

    /// Pop the front record, but only if it is for the given attraction.
    pub(crate) fn pop_front_for(&mut self, attraction: AttractionId) -> Option<ArrivalRecord> {
        if self.front_attraction() == Some(attraction) {
            self.pop_front()
        } else {
            None
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
