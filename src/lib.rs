//! skycast library
//!
//! Terminal weather dashboard: current conditions and a 5-day forecast from
//! OpenWeatherMap, with optional AI summaries from Gemini. The binary wires these
//! modules to a crossterm terminal; integration tests drive them directly.

pub mod app;
pub mod cli;
pub mod contact;
pub mod data;
pub mod history;
pub mod logging;
pub mod ui;
pub mod worker;
