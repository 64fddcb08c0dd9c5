use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Redraw cadence while something on screen is moving
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);
/// Longest the loop sleeps when nothing moves and nothing is scheduled
pub const IDLE_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived before the wait expired; time to poll and redraw
    Frame,
    /// The input source is gone and nothing more will arrive
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source: a reader thread forwarding crossterm events
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // key releases and repeats would double-toggle on some terminals
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed source for headless runs and tests
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }

    pub fn pair() -> (Sender<AppEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event or frame at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    frame: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, frame: Duration) -> Self {
        Self {
            event_source,
            frame,
        }
    }

    /// Waits for the next event, at most one frame or until `wake_in`
    /// (the time left before the next scheduled callback), whichever is sooner.
    pub fn step(&self, wake_in: Option<Duration>) -> AppEvent {
        let timeout = wake_in.map_or(self.frame, |w| w.min(self.frame));
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Frame,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
        }
    }
}
