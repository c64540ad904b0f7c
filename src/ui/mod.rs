//! UI rendering module for skycast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Rendering only reads the
//! [`App`]; it never mutates state.

pub mod backdrop;
pub mod contact;
pub mod dashboard;
pub mod help_overlay;
pub mod widgets;

use ratatui::Frame;

use crate::app::{App, AppState};

pub use contact::render as render_contact;
pub use dashboard::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    match app.state {
        AppState::Dashboard | AppState::Search => render_dashboard(frame, app),
        AppState::Contact => render_contact(frame, app),
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}
