use chrono::{Local, Timelike};
use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color scheme selection
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// day colors between 09:00 and 19:59, night colors otherwise
    #[default]
    Auto,
    Day,
    Night,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorMode {
    Day,
    Night,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
}

const SUNFLOWER: Color = Color::Rgb(241, 207, 99);
const MIDNIGHT: Color = Color::Rgb(31, 30, 69);

impl Theme {
    pub fn mode_at_hour(self, hour: u32) -> ColorMode {
        match self {
            Theme::Day => ColorMode::Day,
            Theme::Night => ColorMode::Night,
            Theme::Auto if hour > 8 && hour < 20 => ColorMode::Day,
            Theme::Auto => ColorMode::Night,
        }
    }

    pub fn mode_now(self) -> ColorMode {
        self.mode_at_hour(Local::now().hour())
    }
}

impl ColorMode {
    /// Day is dark ink on sunflower, night inverts it
    pub fn palette(self) -> Palette {
        match self {
            ColorMode::Day => Palette {
                background: SUNFLOWER,
                foreground: MIDNIGHT,
            },
            ColorMode::Night => Palette {
                background: MIDNIGHT,
                foreground: SUNFLOWER,
            },
        }
    }
}
