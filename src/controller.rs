use std::{sync::Arc, time::Duration};

use tokio::time::Instant;
use tracing::{debug, info, info_span, Span};

use crate::{
    config::RideConfig,
    departure::spawn_departure,
    queue::ArrivalRecord,
    ride::{ControllerClaim, Shared},
    state::{ActiveSession, RideState},
    stats::{Admission, SessionRecord, Statistics},
};

/// Decides when sessions open, who gets in, and when the ride is finished.
///
/// Only one session runs at a time. A session is opened for whichever attraction the visitor at
/// the head of the queue wants, and admits visitors from the head of the queue in order for as
/// long as they want the same attraction and there is room. Once the session has emptied out and
/// the next visitor (if any) wants something else, the session pauses and the next one can open.
pub(crate) struct Controller {
    ride_name: String,
    dwell: Duration,
    shared: Arc<Shared>,
    statistics: Statistics,
}

/// The outcome of one pass over the ride state.
enum Pass {
    /// Something changed. Look again before waiting.
    Progressed,
    /// Nothing can change until another task acts.
    Idle,
    /// Everyone has been served and has left.
    Finished,
}

impl Controller {
    pub(crate) fn new(ride_name: String, config: RideConfig, shared: Arc<Shared>) -> Self {
        Self {
            ride_name,
            dwell: config.dwell,
            shared,
            statistics: Statistics::new(config.attractions, Instant::now()),
        }
    }

    /// Run until the simulation is complete, then hand back the statistics.
    pub(crate) async fn run(mut self) -> Statistics {
        let shared = Arc::clone(&self.shared);
        let claim = ControllerClaim::new(Arc::clone(&shared));

        info!("Ride '{}' is open", self.ride_name);

        loop {
            let changed = shared.changed();
            tokio::pin!(changed);
            // Register for wakeups before inspecting the state, so a change made between the
            // inspection and the await below is not missed.
            changed.as_mut().enable();

            match self.pass(&shared) {
                Pass::Progressed => continue,
                Pass::Idle => changed.await,
                Pass::Finished => break,
            }
        }

        drop(claim);

        info!(
            "Ride '{}' is finished after {:?}",
            self.ride_name,
            self.statistics.simulated_duration()
        );

        self.statistics
    }

    /// Inspect the state once: open a session, admit visitors, pause a drained session, and check
    /// whether the simulation is complete.
    fn pass(&mut self, shared: &Shared) -> Pass {
        let mut state = shared.lock();
        let now = Instant::now();
        let mut progressed = false;

        if let Some(attraction) = state.open_session(now, |attraction| {
            info_span!("ride session", ride = %self.ride_name, %attraction)
        }) {
            progressed = true;
            if let Some(session) = state.session() {
                info!(parent: &session.span, "Starting attraction {}", attraction);
            }
        }

        let session_span = state
            .session()
            .map(|session| session.span.clone())
            .unwrap_or_else(Span::none);

        while let Some(record) = state.admit_next() {
            progressed = true;
            self.admit(record, now, &state, &session_span);
        }

        if state.is_session_drained() {
            progressed = true;
            if let Some(session) = state.close_session() {
                self.pause(session, now);
            }
            shared.notify_changed();
        }

        if state.is_complete() {
            state.finish(now);
            self.statistics.finish(now);
            return Pass::Finished;
        }

        if progressed {
            Pass::Progressed
        } else {
            Pass::Idle
        }
    }

    fn admit(&mut self, record: ArrivalRecord, now: Instant, state: &RideState, span: &Span) {
        let admission = Admission {
            visitor: record.visitor,
            attraction: record.attraction,
            arrived_at: record.arrived_at,
            admitted_at: now,
        };

        debug!(
            parent: span,
            visitor = %record.visitor,
            wait_ms = admission.wait().as_secs_f64() * 1000.0,
            occupied = state.occupied(),
            "Entered the ride"
        );

        self.statistics.record_admission(admission);

        spawn_departure(Arc::clone(&self.shared), record, self.dwell);
    }

    fn pause(&mut self, session: ActiveSession, now: Instant) {
        let record = SessionRecord {
            attraction: session.attraction,
            started_at: session.started_at,
            ended_at: now,
            admitted: session.admitted,
        };

        info!(
            parent: &session.span,
            admitted = session.admitted,
            busy_ms = record.duration().as_secs_f64() * 1000.0,
            "Pausing attraction {}",
            session.attraction
        );

        self.statistics.record_session(record);
    }
}
