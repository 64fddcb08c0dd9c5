use std::time::{Duration, Instant};

/// Accumulates running time across start/stop cycles.
///
/// While running, elapsed is `accumulated + (now - run_start)`, which is the same
/// as measuring from an anchor placed `accumulated` before the run started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElapsedCounter {
    accumulated: Duration,
    run_start: Option<Instant>,
}

impl ElapsedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.run_start.is_some()
    }

    /// Time accumulated by completed runs
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn start(&mut self, now: Instant) {
        if self.run_start.is_none() {
            self.run_start = Some(now);
        }
    }

    pub fn stop(&mut self, now: Instant) -> Duration {
        if self.run_start.is_some() {
            self.accumulated = self.elapsed(now);
            self.run_start = None;
        }
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.run_start = None;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.run_start {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }

    /// Position within the current minute, rounded to a tenth of a second
    pub fn seconds_within_minute(&self, now: Instant) -> f64 {
        seconds_within_minute(self.elapsed(now))
    }

    /// Samples the elapsed time once and derives every display value from it
    pub fn readout(&self, now: Instant) -> Readout {
        Readout::from_elapsed(self.elapsed(now))
    }
}

/// Display values derived from a single elapsed sample
#[derive(Clone, Debug, PartialEq)]
pub struct Readout {
    pub elapsed: Duration,
    pub main_text: String,
    pub fraction_text: String,
    pub seconds_within_minute: f64,
}

impl Readout {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            elapsed,
            main_text: format_hms(elapsed),
            fraction_text: format_tenths(elapsed),
            seconds_within_minute: seconds_within_minute(elapsed),
        }
    }

    pub fn zero() -> Self {
        Self::from_elapsed(Duration::ZERO)
    }
}

/// `HH:MM:SS` with whole seconds truncated; hours grow past two digits
pub fn format_hms(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// `.D` where D is the tenths digit, truncated toward zero
pub fn format_tenths(elapsed: Duration) -> String {
    format!(".{}", elapsed.subsec_millis() / 100)
}

pub fn seconds_within_minute(elapsed: Duration) -> f64 {
    let secs = (elapsed.as_secs() % 60) as f64 + f64::from(elapsed.subsec_nanos()) / 1e9;
    (secs * 10.0).round() / 10.0
}
