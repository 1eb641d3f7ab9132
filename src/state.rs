use tokio::time::Instant;
use tracing::Span;

use crate::{
    ids::AttractionId,
    queue::{AdmissionQueue, ArrivalRecord},
};

/// Everything shared between the controller, the arrival source and the departure timers.
///
/// Always accessed through the single ride lock.
#[derive(Debug)]
pub(crate) struct RideState {
    queue: AdmissionQueue,

    capacity: usize,
    /// Visitors currently inside the ride.
    occupied: usize,

    /// The open session, if any.
    session: Option<ActiveSession>,

    /// Total admissions so far.
    served: u64,
    /// The number of visitors expected over the whole simulation.
    total: u64,

    finished_at: Option<Instant>,
    controller_running: bool,
}

/// A session that has been opened and not yet paused.
#[derive(Debug)]
pub(crate) struct ActiveSession {
    pub attraction: AttractionId,
    pub started_at: Instant,
    /// How many visitors this session has admitted.
    pub admitted: usize,
    pub span: Span,
}

/// Which stage of its lifecycle the ride is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session is open. Waiting for visitors.
    Idle,
    /// A session is open and visitors for it are at the head of the queue.
    Active(AttractionId),
    /// A session is open but no more visitors for it are at the head of the queue. It will pause
    /// once the remaining occupants leave.
    Draining(AttractionId),
    /// Every visitor has been served and has left.
    Done,
}

/// A consistent view of the ride state at a single moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideSnapshot {
    /// Visitors waiting to be admitted.
    pub queued: usize,
    /// Visitors currently inside the ride.
    pub occupied: usize,
    /// The maximum number of visitors inside the ride at once.
    pub capacity: usize,
    /// Total admissions so far.
    pub served: u64,
    /// The number of visitors expected over the whole simulation.
    pub total: u64,
    /// Lifecycle stage.
    pub phase: Phase,
}

impl RideState {
    pub(crate) fn new(capacity: usize, total: u64) -> Self {
        Self {
            queue: AdmissionQueue::default(),
            capacity,
            occupied: 0,
            session: None,
            served: 0,
            total,
            finished_at: None,
            controller_running: false,
        }
    }

    pub(crate) fn push(&mut self, record: ArrivalRecord) {
        debug_assert!(
            self.served + (self.queue.len() as u64) < self.total,
            "more visitors arrived than the ride was told to expect"
        );
        self.queue.push_back(record);
    }

    /// Returns false if another controller already holds the ride.
    pub(crate) fn claim_controller(&mut self) -> bool {
        if self.controller_running {
            return false;
        }
        self.controller_running = true;
        true
    }

    pub(crate) fn release_controller(&mut self) {
        self.controller_running = false;
    }

    /// Open a session for the visitor at the head of the queue, if no session is open.
    ///
    /// Returns the attraction the new session is for.
    pub(crate) fn open_session(
        &mut self,
        now: Instant,
        span_for: impl FnOnce(AttractionId) -> Span,
    ) -> Option<AttractionId> {
        if self.session.is_some() {
            return None;
        }

        let attraction = self.queue.front_attraction()?;
        self.session = Some(ActiveSession {
            attraction,
            started_at: now,
            admitted: 0,
            span: span_for(attraction),
        });

        Some(attraction)
    }

    pub(crate) fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    /// Admit the visitor at the head of the queue into the open session, if there is room and
    /// they want the session's attraction.
    pub(crate) fn admit_next(&mut self) -> Option<ArrivalRecord> {
        if self.occupied >= self.capacity {
            return None;
        }

        let session = self.session.as_mut()?;
        let record = self.queue.pop_front_for(session.attraction)?;

        self.occupied += 1;
        self.served += 1;
        session.admitted += 1;

        assert!(
            self.served <= self.total,
            "served {} visitors but only {} were expected",
            self.served,
            self.total
        );
        debug_assert!(
            self.occupied <= self.capacity,
            "occupancy should never exceed capacity"
        );

        Some(record)
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    /// Record that a visitor left the ride. Returns how many remain inside.
    pub(crate) fn mark_departed(&mut self) -> usize {
        debug_assert!(self.occupied > 0, "occupancy should never go below zero");
        self.occupied = self.occupied.saturating_sub(1);
        self.occupied
    }

    /// Has the open session emptied out, with nobody for the same attraction next in line?
    pub(crate) fn is_session_drained(&self) -> bool {
        match &self.session {
            Some(session) => {
                self.occupied == 0 && self.queue.front_attraction() != Some(session.attraction)
            }
            None => false,
        }
    }

    pub(crate) fn close_session(&mut self) -> Option<ActiveSession> {
        self.session.take()
    }

    /// Has every expected visitor been served and left, with nothing left open?
    pub(crate) fn is_complete(&self) -> bool {
        self.queue.is_empty()
            && self.occupied == 0
            && self.served == self.total
            && self.session.is_none()
    }

    pub(crate) fn finish(&mut self, now: Instant) {
        debug_assert!(self.is_complete(), "finishing an incomplete ride");
        self.finished_at = Some(now);
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.finished_at.is_some() {
            return Phase::Done;
        }

        match &self.session {
            None => Phase::Idle,
            Some(session) if self.queue.front_attraction() == Some(session.attraction) => {
                Phase::Active(session.attraction)
            }
            Some(session) => Phase::Draining(session.attraction),
        }
    }

    pub(crate) fn snapshot(&self) -> RideSnapshot {
        RideSnapshot {
            queued: self.queue.len(),
            occupied: self.occupied,
            capacity: self.capacity,
            served: self.served,
            total: self.total,
            phase: self.phase(),
        }
    }
}

impl RideSnapshot {
    /// Nobody waiting and nobody inside.
    pub fn is_quiescent(&self) -> bool {
        self.queued == 0 && self.occupied == 0
    }
}
