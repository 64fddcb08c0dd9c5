// Library surface for the binary, headless runs and integration tests.
// Terminal drawing stays in the binary.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod counter;
pub mod error;
pub mod face;
pub mod gate;
pub mod history;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod stopwatch;
pub mod theme;

pub use error::{Error, Result};
