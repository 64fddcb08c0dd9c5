use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::clock::Clock;
use crate::config::Config;
use crate::face::Face;
use crate::gate::ConfirmChoice;
use crate::runtime::{AppEvent, FRAME_INTERVAL};
use crate::stopwatch::{ResetRequest, SessionSink, Stopwatch, TimerState};
use crate::theme::Theme;

/// What a key press means on the stopwatch screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The tap gesture: start or stop
    Toggle,
    /// The shake gesture
    Reset,
    Confirm(ConfirmChoice),
    Quit,
}

/// Maps a key to a command. While the reset dialog is open only its answers,
/// the toggle and quit keys mean anything.
pub fn command_for(key: KeyEvent, confirming: bool) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    if confirming {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Command::Confirm(ConfirmChoice::Reset))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Command::Confirm(ConfirmChoice::DoNothing))
            }
            KeyCode::Char(' ') => Some(Command::Toggle),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Toggle),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Backspace => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// The one screen of the app: a stopwatch rendering into a [`Face`]
pub struct App<C: Clock, P: SessionSink> {
    pub stopwatch: Stopwatch<C, Face, P>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl<C: Clock, P: SessionSink> App<C, P> {
    pub fn new(clock: C, store: P, config: &Config) -> Self {
        Self {
            stopwatch: Stopwatch::new(clock, Face::new(), store, config.gate, config.hints),
            theme: config.theme,
            should_quit: false,
        }
    }

    pub fn face(&self) -> &Face {
        self.stopwatch.view()
    }

    pub fn state(&self) -> TimerState {
        self.stopwatch.state()
    }

    pub fn is_confirming(&self) -> bool {
        self.stopwatch.is_confirmation_pending()
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if let Some(command) = command_for(key, self.is_confirming()) {
                    self.apply(command);
                }
            }
            AppEvent::Resize => {}
            AppEvent::Frame => {
                self.stopwatch.poll();
                self.stopwatch.view_mut().advance();
            }
            AppEvent::Closed => {
                log::warn!("terminal input closed, quitting");
                self.should_quit = true;
            }
        }
    }

    /// How long the loop may sleep: one frame while the face moves, otherwise
    /// until the next scheduled callback.
    pub fn wake_in(&self) -> Option<Duration> {
        let due = self.stopwatch.next_due_in();
        if self.face().is_animating() {
            Some(due.map_or(FRAME_INTERVAL, |d| d.min(FRAME_INTERVAL)))
        } else {
            due
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Toggle => {
                self.stopwatch.toggle();
            }
            Command::Reset => {
                if self.stopwatch.request_reset() == ResetRequest::AwaitingConfirmation {
                    log::debug!("asking before first reset");
                }
            }
            Command::Confirm(choice) => {
                self.stopwatch.answer_confirmation(choice);
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// `base` with the gate flags learned during this run
    pub fn config_to_save(&self, base: &Config) -> Config {
        Config {
            gate: self.stopwatch.gate(),
            ..base.clone()
        }
    }
}
