use chrono::{DateTime, Local, TimeDelta};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic instants (for elapsed arithmetic) and wall-clock time
/// (for session records).
pub trait Clock {
    fn now(&self) -> Instant;
    fn wall(&self) -> DateTime<Local>;
}

/// Production clock backed by the OS
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Hand-driven clock for tests. Clones share the same offset, so a test can keep
/// one copy and advance time under a stopwatch that owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    wall_origin: DateTime<Local>,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            wall_origin: Local::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs_f64(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    pub fn wall_origin(&self) -> DateTime<Local> {
        self.wall_origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn wall(&self) -> DateTime<Local> {
        let delta = TimeDelta::from_std(self.offset.get()).unwrap_or_default();
        self.wall_origin + delta
    }
}
