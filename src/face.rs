//! Everything the screen shows, as plain state. The stopwatch pushes readouts
//! and animation events in; the UI reads it back out every frame.

use std::f64::consts::TAU;

use crate::stopwatch::{AnimationEvent, AnimationSink, DisplaySink};

/// Frames a full slide between the resting and running layout takes
const SLIDE_FRAMES: f64 = 6.0;
/// Frames per pulse half-cycle
const PULSE_HALF_PERIOD: u64 = 5;
/// Horizontal jitter of the shake hint, replayed every `SHAKE_PERIOD` frames
const SHAKE_PATTERN: [i16; 8] = [0, -2, 2, -2, 2, -1, 1, 0];
const SHAKE_PERIOD: u64 = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub main_text: String,
    pub fraction_text: String,
    pub fraction_visible: bool,
    pub clock_visible: bool,
    pub hand_seconds: f64,
    pub pulse_visible: bool,
    pub shake_visible: bool,
    slide: f64,
    slide_target: f64,
    frame: u64,
    hint_since: u64,
}

impl Default for Face {
    fn default() -> Self {
        Self {
            main_text: "00:00:00".to_string(),
            fraction_text: ".0".to_string(),
            fraction_visible: false,
            clock_visible: false,
            hand_seconds: 0.0,
            pulse_visible: false,
            shake_visible: false,
            slide: 0.0,
            slide_target: 0.0,
            frame: 0,
            hint_since: 0,
        }
    }
}

impl Face {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance cosmetic animations by one UI frame
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        let step = 1.0 / SLIDE_FRAMES;
        if self.slide < self.slide_target {
            self.slide = (self.slide + step).min(self.slide_target);
        } else if self.slide > self.slide_target {
            self.slide = (self.slide - step).max(self.slide_target);
        }
    }

    /// 0.0 while resting, 1.0 once fully slid into the running layout
    pub fn slide(&self) -> f64 {
        self.slide
    }

    pub fn is_animating(&self) -> bool {
        self.slide != self.slide_target || self.pulse_visible || self.shake_visible
    }

    /// Whether the pulsing hint is in its bright half-cycle
    pub fn pulse_bright(&self) -> bool {
        let since = self.frame.wrapping_sub(self.hint_since);
        (since / PULSE_HALF_PERIOD) % 2 == 0
    }

    /// Column offset of the shake hint for the current frame
    pub fn shake_offset(&self) -> i16 {
        let since = self.frame.wrapping_sub(self.hint_since) % SHAKE_PERIOD;
        SHAKE_PATTERN
            .get(since as usize)
            .copied()
            .unwrap_or_default()
    }

    /// (sin, cos) of the clock hand, clockwise from twelve o'clock
    pub fn hand_direction(&self) -> (f64, f64) {
        let angle = self.hand_seconds / 60.0 * TAU;
        (angle.sin(), angle.cos())
    }
}

impl DisplaySink for Face {
    fn render(&mut self, main_text: &str, fraction_text: &str) {
        main_text.clone_into(&mut self.main_text);
        fraction_text.clone_into(&mut self.fraction_text);
    }
}

impl AnimationSink for Face {
    fn animate(&mut self, event: AnimationEvent) {
        match event {
            AnimationEvent::Started => {
                self.pulse_visible = false;
                self.shake_visible = false;
                self.fraction_visible = true;
                self.clock_visible = true;
                self.slide_target = 1.0;
            }
            AnimationEvent::StoppedFirstTime | AnimationEvent::StoppedAgain => {
                self.pulse_visible = false;
            }
            AnimationEvent::ResetConfirmed => {
                self.pulse_visible = false;
                self.shake_visible = false;
                self.fraction_visible = false;
                self.clock_visible = false;
                self.hand_seconds = 0.0;
                self.slide_target = 0.0;
            }
            AnimationEvent::PulseHint => {
                self.pulse_visible = true;
                self.hint_since = self.frame;
            }
            AnimationEvent::ShakeHint => {
                self.shake_visible = true;
                self.hint_since = self.frame;
            }
            AnimationEvent::ClockHand { seconds } => {
                self.hand_seconds = seconds;
            }
        }
    }
}
