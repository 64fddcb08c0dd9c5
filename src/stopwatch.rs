use chrono::{DateTime, Local, TimeDelta};
use log::{debug, info, warn};
use std::time::Duration;

use crate::clock::Clock;
use crate::counter::{ElapsedCounter, Readout};
use crate::gate::{ConfirmChoice, ResetDecision, ResetGate};
use crate::scheduler::{Scheduler, TaskHandle};

/// Re-render cadence while running
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Delay before the start hint appears on a never-started timer
pub const START_HINT_DELAY: Duration = Duration::from_millis(500);
/// Delay before the "tap again to stop" pulse appears on a running timer
pub const STOP_HINT_DELAY: Duration = Duration::from_secs(5);
/// Delay before the shake-to-reset hint appears after the first stop
pub const SHAKE_HINT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

/// A completed timing session, handed to the [`SessionSink`] on reset
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub started_at: DateTime<Local>,
    pub duration: Duration,
}

/// Receives completed sessions. Failures are logged by the caller and never
/// stop the reset.
pub trait SessionSink {
    fn save_session(&mut self, record: &SessionRecord) -> crate::error::Result<()>;
}

/// A missing store drops sessions; the timer keeps working without history.
impl<S: SessionSink> SessionSink for Option<S> {
    fn save_session(&mut self, record: &SessionRecord) -> crate::error::Result<()> {
        match self {
            Some(store) => store.save_session(record),
            None => {
                debug!("no session store, dropping {:?}", record.duration);
                Ok(())
            }
        }
    }
}

pub trait DisplaySink {
    fn render(&mut self, main_text: &str, fraction_text: &str);
}

/// Discrete cosmetic events. Consumers never feed back into timer state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationEvent {
    Started,
    StoppedFirstTime,
    StoppedAgain,
    ResetConfirmed,
    PulseHint,
    ShakeHint,
    ClockHand { seconds: f64 },
}

pub trait AnimationSink {
    fn animate(&mut self, event: AnimationEvent);
}

/// Outcome of a reset gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetRequest {
    /// Not stopped; the gesture does nothing
    Ignored,
    /// The caller must ask the user and report back via `answer_confirmation`
    AwaitingConfirmation,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Tick,
    StartHint,
    StopHint,
    ShakeHint,
}

/// The single timer of the screen: run/stop/reset states on top of an
/// [`ElapsedCounter`], with the confirmation-gated reset and the hint timers.
pub struct Stopwatch<C, V, P>
where
    C: Clock,
    V: DisplaySink + AnimationSink,
    P: SessionSink,
{
    clock: C,
    view: V,
    store: P,
    counter: ElapsedCounter,
    state: TimerState,
    gate: ResetGate,
    hints: bool,
    /// Whether this instance has seen a stop yet; the gate's flag spans launches
    stopped_before: bool,
    session_start: Option<DateTime<Local>>,
    confirmation_pending: bool,
    scheduler: Scheduler<Task>,
    tick_task: Option<TaskHandle>,
    pulse_task: Option<TaskHandle>,
    shake_task: Option<TaskHandle>,
}

impl<C, V, P> Stopwatch<C, V, P>
where
    C: Clock,
    V: DisplaySink + AnimationSink,
    P: SessionSink,
{
    pub fn new(clock: C, view: V, store: P, gate: ResetGate, hints: bool) -> Self {
        let mut stopwatch = Self {
            clock,
            view,
            store,
            counter: ElapsedCounter::new(),
            state: TimerState::Idle,
            gate,
            hints,
            stopped_before: false,
            session_start: None,
            confirmation_pending: false,
            scheduler: Scheduler::new(),
            tick_task: None,
            pulse_task: None,
            shake_task: None,
        };

        let zero = Readout::zero();
        stopwatch.view.render(&zero.main_text, &zero.fraction_text);

        if hints && !gate.has_started {
            let now = stopwatch.clock.now();
            stopwatch.pulse_task =
                Some(stopwatch.scheduler.after(now, START_HINT_DELAY, Task::StartHint));
        }

        stopwatch
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn gate(&self) -> ResetGate {
        self.gate
    }

    pub fn is_confirmation_pending(&self) -> bool {
        self.confirmation_pending
    }

    pub fn elapsed(&self) -> Duration {
        self.counter.elapsed(self.clock.now())
    }

    pub fn readout(&self) -> Readout {
        self.counter.readout(self.clock.now())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Number of scheduled callbacks still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Time left until the next scheduled callback, if any
    pub fn next_due_in(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_duration_since(self.clock.now()))
    }

    /// Start when idle or stopped, stop when running. Always valid.
    pub fn toggle(&mut self) -> TimerState {
        let now = self.clock.now();
        // a tap while the confirmation is up means "do nothing"
        self.confirmation_pending = false;

        match self.state {
            TimerState::Running => {
                let total = self.counter.stop(now);
                self.state = TimerState::Stopped;
                self.scheduler.cancel_slot(&mut self.tick_task);
                self.scheduler.cancel_slot(&mut self.pulse_task);

                let first_stop = !self.stopped_before;
                self.stopped_before = true;
                self.gate.has_stopped = true;

                let readout = Readout::from_elapsed(total);
                self.view.render(&readout.main_text, &readout.fraction_text);
                self.view.animate(if first_stop {
                    AnimationEvent::StoppedFirstTime
                } else {
                    AnimationEvent::StoppedAgain
                });

                if first_stop && self.hints && !self.gate.has_reset {
                    self.shake_task =
                        Some(self.scheduler.after(now, SHAKE_HINT_DELAY, Task::ShakeHint));
                }
                debug!("stopped at {}{}", readout.main_text, readout.fraction_text);
            }
            TimerState::Idle | TimerState::Stopped => {
                self.scheduler.cancel_slot(&mut self.shake_task);
                self.scheduler.cancel_slot(&mut self.pulse_task);
                self.scheduler.cancel_slot(&mut self.tick_task);

                let accumulated =
                    TimeDelta::from_std(self.counter.accumulated()).unwrap_or_default();
                self.session_start = Some(self.clock.wall() - accumulated);
                self.counter.start(now);
                self.state = TimerState::Running;
                self.gate.has_started = true;

                self.view.animate(AnimationEvent::Started);
                let readout = self.counter.readout(now);
                self.view.render(&readout.main_text, &readout.fraction_text);

                self.tick_task = Some(self.scheduler.every(now, TICK_INTERVAL, Task::Tick));
                if self.hints && !self.gate.has_stopped {
                    self.pulse_task =
                        Some(self.scheduler.after(now, STOP_HINT_DELAY, Task::StopHint));
                }
                debug!("started from {}", readout.main_text);
            }
        }

        self.state
    }

    /// Re-render from one clock sample. Ignored unless running.
    pub fn tick(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        let readout = self.counter.readout(self.clock.now());
        self.view.render(&readout.main_text, &readout.fraction_text);
        self.view.animate(AnimationEvent::ClockHand {
            seconds: readout.seconds_within_minute,
        });
    }

    /// The reset gesture. Only a stopped timer can be reset.
    pub fn request_reset(&mut self) -> ResetRequest {
        if self.state != TimerState::Stopped {
            return ResetRequest::Ignored;
        }
        if self.confirmation_pending {
            return ResetRequest::AwaitingConfirmation;
        }

        match self.gate.confirm() {
            ResetDecision::Proceed => {
                self.reset();
                ResetRequest::Reset
            }
            ResetDecision::Ask => {
                self.confirmation_pending = true;
                ResetRequest::AwaitingConfirmation
            }
        }
    }

    /// Resolves a pending confirmation. Returns whether the timer was reset.
    pub fn answer_confirmation(&mut self, choice: ConfirmChoice) -> bool {
        if !self.confirmation_pending {
            return false;
        }
        self.confirmation_pending = false;

        match choice {
            ConfirmChoice::DoNothing => false,
            ConfirmChoice::Reset if self.state == TimerState::Stopped => {
                self.gate.has_reset = true;
                self.reset();
                true
            }
            ConfirmChoice::Reset => false,
        }
    }

    /// Fires every scheduled callback that is due
    pub fn poll(&mut self) {
        let now = self.clock.now();
        while let Some((handle, task)) = self.scheduler.pop_due(now) {
            self.run_task(handle, task);
        }
    }

    fn run_task(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::Tick => self.tick(),
            Task::StartHint => {
                clear_if(&mut self.pulse_task, handle);
                if self.state != TimerState::Running {
                    self.view.animate(AnimationEvent::PulseHint);
                }
            }
            Task::StopHint => {
                clear_if(&mut self.pulse_task, handle);
                if self.state == TimerState::Running {
                    self.view.animate(AnimationEvent::PulseHint);
                }
            }
            Task::ShakeHint => {
                clear_if(&mut self.shake_task, handle);
                if self.state == TimerState::Stopped {
                    self.view.animate(AnimationEvent::ShakeHint);
                }
            }
        }
    }

    fn reset(&mut self) {
        let duration = self.counter.elapsed(self.clock.now());
        let started_at = self.session_start.take().unwrap_or_else(|| {
            self.clock.wall() - TimeDelta::from_std(duration).unwrap_or_default()
        });
        let record = SessionRecord {
            started_at,
            duration,
        };

        match self.store.save_session(&record) {
            Ok(()) => info!("saved session of {:.1}s", duration.as_secs_f64()),
            Err(e) => warn!("failed to save session, resetting anyway: {}", e),
        }

        self.counter.reset();
        self.state = TimerState::Idle;
        self.scheduler.cancel_all();
        self.tick_task = None;
        self.pulse_task = None;
        self.shake_task = None;

        self.view.animate(AnimationEvent::ResetConfirmed);
        let zero = Readout::zero();
        self.view.render(&zero.main_text, &zero.fraction_text);
    }
}

fn clear_if(slot: &mut Option<TaskHandle>, handle: TaskHandle) {
    if *slot == Some(handle) {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::Error;
    use assert_matches::assert_matches;

    #[derive(Debug, Default)]
    struct RecordingView {
        renders: Vec<(String, String)>,
        events: Vec<AnimationEvent>,
    }

    impl RecordingView {
        fn last_render(&self) -> (&str, &str) {
            let (main, fraction) = self.renders.last().expect("nothing rendered");
            (main.as_str(), fraction.as_str())
        }

        fn count(&self, event: AnimationEvent) -> usize {
            self.events.iter().filter(|e| **e == event).count()
        }
    }

    impl DisplaySink for RecordingView {
        fn render(&mut self, main_text: &str, fraction_text: &str) {
            self.renders
                .push((main_text.to_string(), fraction_text.to_string()));
        }
    }

    impl AnimationSink for RecordingView {
        fn animate(&mut self, event: AnimationEvent) {
            self.events.push(event);
        }
    }

    #[derive(Debug, Default)]
    struct MemoryStore {
        sessions: Vec<SessionRecord>,
        fail: bool,
    }

    impl SessionSink for MemoryStore {
        fn save_session(&mut self, record: &SessionRecord) -> crate::error::Result<()> {
            if self.fail {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            self.sessions.push(record.clone());
            Ok(())
        }
    }

    type TestStopwatch = Stopwatch<ManualClock, RecordingView, MemoryStore>;

    fn stopwatch_with(gate: ResetGate) -> (TestStopwatch, ManualClock) {
        let clock = ManualClock::new();
        let sw = Stopwatch::new(
            clock.clone(),
            RecordingView::default(),
            MemoryStore::default(),
            gate,
            true,
        );
        (sw, clock)
    }

    fn stopwatch() -> (TestStopwatch, ManualClock) {
        stopwatch_with(ResetGate::default())
    }

    fn run_for(sw: &mut TestStopwatch, clock: &ManualClock, total: Duration) {
        let steps = (total.as_millis() / 10) as u32;
        for _ in 0..steps {
            clock.advance(Duration::from_millis(10));
            sw.poll();
        }
    }

    #[test]
    fn starts_idle_with_zero_readout() {
        let (sw, _) = stopwatch();
        assert_eq!(sw.state(), TimerState::Idle);
        assert_eq!(sw.view().last_render(), ("00:00:00", ".0"));
    }

    #[test]
    fn toggle_cycles_running_and_stopped() {
        let (mut sw, clock) = stopwatch();
        assert_eq!(sw.toggle(), TimerState::Running);
        clock.advance_secs_f64(2.0);
        assert_eq!(sw.toggle(), TimerState::Stopped);
        assert_eq!(sw.toggle(), TimerState::Running);
        assert!(sw.gate().has_started);
        assert!(sw.gate().has_stopped);
    }

    #[test]
    fn stop_after_five_point_three_seconds() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance(Duration::from_millis(5300));
        sw.toggle();

        assert_eq!(sw.view().last_render(), ("00:00:05", ".3"));
    }

    #[test]
    fn long_run_formats_hours() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance(Duration::from_secs(3661));
        sw.poll();

        assert_eq!(sw.view().last_render(), ("01:01:01", ".0"));
    }

    #[test]
    fn elapsed_sums_running_intervals_only() {
        let (mut sw, clock) = stopwatch();
        let runs = [1.2, 0.7, 3.1];
        for run in runs {
            sw.toggle();
            clock.advance_secs_f64(run);
            sw.toggle();
            clock.advance_secs_f64(10.0);
        }
        let expected: f64 = runs.iter().sum();
        assert!((sw.elapsed().as_secs_f64() - expected).abs() < 1e-6);
    }

    #[test]
    fn ticks_render_every_interval_while_running() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        let before = sw.view().renders.len();

        run_for(&mut sw, &clock, Duration::from_secs(1));

        assert_eq!(sw.view().renders.len() - before, 10);
        assert_eq!(sw.view().last_render(), ("00:00:01", ".0"));
        assert_matches!(
            sw.view().events.last(),
            Some(AnimationEvent::ClockHand { seconds }) if *seconds == 1.0
        );
    }

    #[test]
    fn tick_is_ignored_unless_running() {
        let (mut sw, clock) = stopwatch();
        sw.tick();
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        let renders = sw.view().renders.len();

        sw.tick();
        run_for(&mut sw, &clock, Duration::from_secs(2));

        assert_eq!(sw.view().renders.len(), renders);
    }

    #[test]
    fn reset_while_running_is_ignored() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(1.0);

        assert_eq!(sw.request_reset(), ResetRequest::Ignored);
        assert_eq!(sw.state(), TimerState::Running);
        assert!(!sw.is_confirmation_pending());
    }

    #[test]
    fn reset_while_idle_is_ignored() {
        let (mut sw, _) = stopwatch();
        assert_eq!(sw.request_reset(), ResetRequest::Ignored);
        assert!(sw.store().sessions.is_empty());
    }

    #[test]
    fn first_reset_asks_and_decline_keeps_state() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(4.0);
        sw.toggle();

        for _ in 0..2 {
            assert_eq!(sw.request_reset(), ResetRequest::AwaitingConfirmation);
            assert!(!sw.answer_confirmation(ConfirmChoice::DoNothing));
        }

        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed(), Duration::from_secs(4));
        assert!(sw.store().sessions.is_empty());
        assert!(!sw.gate().has_reset);
    }

    #[test]
    fn confirmed_reset_saves_once_and_opens_gate() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(4.0);
        sw.toggle();

        assert_eq!(sw.request_reset(), ResetRequest::AwaitingConfirmation);
        assert!(sw.answer_confirmation(ConfirmChoice::Reset));

        assert_eq!(sw.state(), TimerState::Idle);
        assert_eq!(sw.elapsed(), Duration::ZERO);
        assert!(sw.gate().has_reset);
        assert_eq!(sw.store().sessions.len(), 1);
        assert_eq!(sw.store().sessions[0].duration, Duration::from_secs(4));
        assert_eq!(sw.store().sessions[0].started_at, clock.wall_origin());
        assert_eq!(sw.view().last_render(), ("00:00:00", ".0"));
        assert_eq!(sw.view().count(AnimationEvent::ResetConfirmed), 1);
    }

    #[test]
    fn later_resets_proceed_without_asking() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        sw.request_reset();
        sw.answer_confirmation(ConfirmChoice::Reset);

        sw.toggle();
        clock.advance_secs_f64(2.0);
        sw.toggle();

        assert_eq!(sw.request_reset(), ResetRequest::Reset);
        assert!(!sw.is_confirmation_pending());
        assert_eq!(sw.store().sessions.len(), 2);
        assert_eq!(sw.store().sessions[1].duration, Duration::from_secs(2));
    }

    #[test]
    fn open_gate_from_config_skips_prompt() {
        let (mut sw, clock) = stopwatch_with(ResetGate {
            has_reset: true,
            has_started: true,
            has_stopped: true,
        });
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        assert_eq!(sw.request_reset(), ResetRequest::Reset);
    }

    #[test]
    fn reset_proceeds_when_store_fails() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new(
            clock.clone(),
            RecordingView::default(),
            MemoryStore {
                sessions: Vec::new(),
                fail: true,
            },
            ResetGate {
                has_reset: true,
                ..ResetGate::default()
            },
            true,
        );
        sw.toggle();
        clock.advance_secs_f64(3.0);
        sw.toggle();

        assert_eq!(sw.request_reset(), ResetRequest::Reset);
        assert_eq!(sw.state(), TimerState::Idle);
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn toggle_dismisses_pending_confirmation() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        sw.request_reset();

        sw.toggle();
        assert!(!sw.is_confirmation_pending());
        assert!(!sw.answer_confirmation(ConfirmChoice::Reset));
        assert_eq!(sw.state(), TimerState::Running);
        assert!(sw.store().sessions.is_empty());
    }

    #[test]
    fn no_stale_tick_after_stop_and_reset() {
        let (mut sw, clock) = stopwatch_with(ResetGate {
            has_reset: true,
            ..ResetGate::default()
        });
        sw.toggle();
        clock.advance(Duration::from_millis(50));
        sw.toggle();
        sw.request_reset();
        let renders = sw.view().renders.len();

        // the tick that would have fired at 100ms must not show up
        run_for(&mut sw, &clock, Duration::from_secs(1));
        sw.tick();

        assert_eq!(sw.view().renders.len(), renders);
        assert_eq!(sw.view().last_render(), ("00:00:00", ".0"));
        assert_eq!(sw.pending_tasks(), 0);
    }

    #[test]
    fn start_hint_shows_only_while_idle() {
        let (mut sw, clock) = stopwatch();
        run_for(&mut sw, &clock, Duration::from_millis(600));
        assert_eq!(sw.view().count(AnimationEvent::PulseHint), 1);

        let (mut sw, clock) = stopwatch();
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_millis(600));
        assert_eq!(sw.view().count(AnimationEvent::PulseHint), 0);
    }

    #[test]
    fn start_hint_skipped_after_first_launch() {
        let (mut sw, clock) = stopwatch_with(ResetGate {
            has_started: true,
            ..ResetGate::default()
        });
        run_for(&mut sw, &clock, Duration::from_secs(1));
        assert_eq!(sw.view().count(AnimationEvent::PulseHint), 0);
    }

    #[test]
    fn stop_hint_pulses_on_long_first_run() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_millis(5100));
        assert_eq!(sw.view().count(AnimationEvent::PulseHint), 1);
    }

    #[test]
    fn stop_hint_cancelled_by_stop() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_secs(2));
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_secs(6));
        assert_eq!(sw.view().count(AnimationEvent::PulseHint), 0);
    }

    #[test]
    fn shake_hint_after_first_stop_only() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_millis(1100));
        assert_eq!(sw.view().count(AnimationEvent::ShakeHint), 1);
        assert_eq!(sw.view().count(AnimationEvent::StoppedFirstTime), 1);

        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_secs(2));
        assert_eq!(sw.view().count(AnimationEvent::ShakeHint), 1);
        assert_eq!(sw.view().count(AnimationEvent::StoppedAgain), 1);
    }

    #[test]
    fn shake_hint_returns_on_next_launch_until_reset_confirmed() {
        // stopped during an earlier launch, never reset
        let (mut sw, clock) = stopwatch_with(ResetGate {
            has_started: true,
            has_stopped: true,
            has_reset: false,
        });
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_millis(1100));

        assert_eq!(sw.view().count(AnimationEvent::StoppedFirstTime), 1);
        assert_eq!(sw.view().count(AnimationEvent::ShakeHint), 1);
        assert_eq!(sw.request_reset(), ResetRequest::AwaitingConfirmation);
    }

    #[test]
    fn shake_hint_cancelled_by_restart() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_secs_f64(1.0);
        sw.toggle();
        clock.advance(Duration::from_millis(500));
        sw.toggle();
        run_for(&mut sw, &clock, Duration::from_secs(2));
        assert_eq!(sw.view().count(AnimationEvent::ShakeHint), 0);
    }

    #[test]
    fn hints_disabled_schedule_nothing_but_ticks() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new(
            clock.clone(),
            RecordingView::default(),
            MemoryStore::default(),
            ResetGate::default(),
            false,
        );
        assert_eq!(sw.pending_tasks(), 0);
        sw.toggle();
        assert_eq!(sw.pending_tasks(), 1);
        clock.advance_secs_f64(1.0);
        sw.toggle();
        assert_eq!(sw.pending_tasks(), 0);
    }

    #[test]
    fn resumed_session_keeps_original_start() {
        let (mut sw, clock) = stopwatch_with(ResetGate {
            has_reset: true,
            ..ResetGate::default()
        });
        sw.toggle();
        clock.advance_secs_f64(2.0);
        sw.toggle();
        clock.advance_secs_f64(30.0);
        sw.toggle();
        clock.advance_secs_f64(3.0);
        sw.toggle();
        sw.request_reset();

        let record = &sw.store().sessions[0];
        assert_eq!(record.duration, Duration::from_secs(5));
        // back-dated by the time accumulated before the resume
        assert_eq!(
            record.started_at,
            clock.wall_origin() + TimeDelta::seconds(30)
        );
    }
}
