// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod browser;
pub mod calculator;
pub mod calendar;
pub mod config;
pub mod launcher;
pub mod logging;
pub mod runtime;
pub mod theme;
pub mod timer;
pub mod todo;
