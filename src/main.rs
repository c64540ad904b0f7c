//! skycast - current weather, forecasts and AI insights in your terminal
//!
//! A terminal UI application that displays current conditions and a 5-day
//! forecast for any city, with an optional AI-generated summary.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use skycast::app::{run_fetch, App};
use skycast::cli::{Cli, StartupConfig};
use skycast::worker::Worker;
use skycast::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments first, before terminal setup
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    // Logging is optional; the app runs without it
    let log_status = logging::init(cli.log_file.as_deref(), &cli.log_level);
    match &log_status {
        Ok(path) => info!(path = %path.display(), city = %config.default_city, "skycast starting"),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let mut worker = Worker::new();

    // Initial load: show the loading view, then fetch in place
    if let Some(ticket) = app.start_fetch(&config.default_city) {
        terminal.draw(|f| ui::render(f, &app))?;
        let outcome = run_fetch(app.weather_client(), ticket).await;
        app.apply_fetch(outcome);
    }

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Hand queued network work to the background worker
        for task in app.take_tasks() {
            worker.dispatch(task, app.weather_client(), app.insight_client());
        }

        // Apply finished results
        while let Some(message) = worker.try_recv() {
            app.apply_message(message);
        }

        app.on_tick();

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    if worker.in_flight() > 0 {
        warn!(tasks = worker.in_flight(), "Aborting unfinished requests");
    }
    worker.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!("skycast exiting");
    Ok(())
}
