//! Wait time and utilization statistics.
//!
//! Populated by the controller while it runs and handed back to the caller when it finishes, so
//! nothing can read a half-written set of statistics.

use std::collections::BTreeMap;

use tokio::time::{Duration, Instant};

use crate::ids::{AttractionId, VisitorId};

/// One visitor being let into the ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Who was admitted.
    pub visitor: VisitorId,
    /// The attraction they rode.
    pub attraction: AttractionId,
    /// When they joined the queue.
    pub arrived_at: Instant,
    /// When they were let in.
    pub admitted_at: Instant,
}

impl Admission {
    /// Time spent in the queue.
    pub fn wait(&self) -> Duration {
        self.admitted_at - self.arrived_at
    }
}

/// A session from the moment it opened to the moment it paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    /// The attraction the session ran.
    pub attraction: AttractionId,
    /// When the session opened.
    pub started_at: Instant,
    /// When the last occupant left and the session paused.
    pub ended_at: Instant,
    /// How many visitors the session admitted.
    pub admitted: usize,
}

impl SessionRecord {
    /// How long the attraction was busy for this session.
    pub fn duration(&self) -> Duration {
        self.ended_at - self.started_at
    }
}

#[derive(Debug, Clone, Default)]
struct AttractionStats {
    wait_samples: Vec<Duration>,
    busy: Duration,
}

/// Statistics gathered over a whole simulation.
#[derive(Debug, Clone)]
pub struct Statistics {
    started_at: Instant,
    finished_at: Option<Instant>,
    attractions: BTreeMap<AttractionId, AttractionStats>,
    admissions: Vec<Admission>,
    sessions: Vec<SessionRecord>,
}

impl Statistics {
    pub(crate) fn new(attractions: u32, started_at: Instant) -> Self {
        Self {
            started_at,
            finished_at: None,
            attractions: AttractionId::all(attractions)
                .map(|id| (id, AttractionStats::default()))
                .collect(),
            admissions: Vec::new(),
            sessions: Vec::new(),
        }
    }

    pub(crate) fn record_admission(&mut self, admission: Admission) {
        self.attractions
            .entry(admission.attraction)
            .or_default()
            .wait_samples
            .push(admission.wait());
        self.admissions.push(admission);
    }

    pub(crate) fn record_session(&mut self, session: SessionRecord) {
        self.attractions
            .entry(session.attraction)
            .or_default()
            .busy += session.duration();
        self.sessions.push(session);
    }

    pub(crate) fn finish(&mut self, finished_at: Instant) {
        self.finished_at = Some(finished_at);
    }

    /// When the controller started.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// When the controller decided the simulation was over, if it has.
    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Total simulated time, from the controller starting to every visitor having left.
    ///
    /// Zero if the simulation never finished.
    pub fn simulated_duration(&self) -> Duration {
        self.finished_at
            .map(|finished_at| finished_at - self.started_at)
            .unwrap_or(Duration::ZERO)
    }

    /// The attractions with recorded statistics, in order.
    pub fn attractions(&self) -> impl Iterator<Item = AttractionId> + '_ {
        self.attractions.keys().copied()
    }

    /// Every admission, in the order visitors were let in.
    pub fn admissions(&self) -> &[Admission] {
        &self.admissions
    }

    /// Every session, in the order they paused.
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Wait times for one attraction, in admission order.
    pub fn wait_samples(&self, attraction: AttractionId) -> &[Duration] {
        self.attractions
            .get(&attraction)
            .map(|stats| stats.wait_samples.as_slice())
            .unwrap_or(&[])
    }

    /// Mean wait time for one attraction.
    ///
    /// Returns `Duration::ZERO` if nobody rode it.
    pub fn average_wait(&self, attraction: AttractionId) -> Duration {
        duration_mean(self.wait_samples(attraction))
    }

    /// Total time sessions for this attraction were open.
    pub fn busy_time(&self, attraction: AttractionId) -> Duration {
        self.attractions
            .get(&attraction)
            .map(|stats| stats.busy)
            .unwrap_or(Duration::ZERO)
    }

    /// The fraction of the simulated duration the ride spent running a session.
    ///
    /// Each attraction's busy time is clamped to the simulated duration before summing. Sessions
    /// never overlap, so the sum itself stays within the simulated duration. Returns `0.0` for a
    /// simulation with no duration.
    pub fn utilization(&self) -> f64 {
        let total = self.simulated_duration();
        if total.is_zero() {
            return 0.0;
        }

        let busy: Duration = self
            .attractions
            .values()
            .map(|stats| stats.busy.min(total))
            .sum();

        busy.as_secs_f64() / total.as_secs_f64()
    }

    /// Summarise the statistics.
    pub fn report(&self) -> Report {
        let attractions = self
            .attractions
            .iter()
            .map(|(&attraction, stats)| AttractionSummary {
                attraction,
                visitors: stats.wait_samples.len(),
                average_wait: duration_mean(&stats.wait_samples),
                busy_time: stats.busy,
            })
            .collect();

        Report {
            attractions,
            visitors_served: self.admissions.len(),
            sessions: self.sessions.len(),
            simulated_duration: self.simulated_duration(),
            utilization: self.utilization(),
        }
    }
}

/// Per-attraction summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionSummary {
    /// The attraction.
    pub attraction: AttractionId,
    /// How many visitors rode it.
    pub visitors: usize,
    /// Mean time those visitors spent queueing.
    pub average_wait: Duration,
    /// Total time sessions for this attraction were open.
    pub busy_time: Duration,
}

impl AttractionSummary {
    /// Mean wait in milliseconds.
    pub fn average_wait_ms(&self) -> f64 {
        self.average_wait.as_secs_f64() * 1000.0
    }
}

/// The final report for a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// One entry per attraction, in order.
    pub attractions: Vec<AttractionSummary>,
    /// Total admissions.
    pub visitors_served: usize,
    /// Total sessions run.
    pub sessions: usize,
    /// From the controller starting to the last visitor leaving.
    pub simulated_duration: Duration,
    /// Fraction of the simulated duration spent running sessions.
    pub utilization: f64,
}

fn duration_mean(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = durations.iter().copied().sum();
    match u32::try_from(durations.len()) {
        Ok(count) => total / count,
        Err(_) => total.div_f64(durations.len() as f64),
    }
}
