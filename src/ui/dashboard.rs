//! Dashboard screen rendering
//!
//! Renders the main view: header with live clock, search box, recent searches,
//! error banner, and either the loading view or the weather cards (main card,
//! metrics grid, forecast strip, AI insight and sun position).

use chrono::{DateTime, FixedOffset, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, ViewState};
use crate::data::{ForecastSnapshot, WeatherSnapshot};
use crate::ui::backdrop::{treatment, Backdrop};
use crate::ui::widgets::{SunArc, TemperatureSparkline};

/// Braille spinner frames, advanced by the animation tick
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Color for temperature (warmer = more red, cooler = more blue)
fn temperature_color(temp: f64) -> Color {
    if temp >= 30.0 {
        Color::Red
    } else if temp >= 25.0 {
        Color::LightRed
    } else if temp >= 20.0 {
        Color::Yellow
    } else if temp >= 15.0 {
        Color::Green
    } else if temp >= 5.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Uppercases the first letter ("scattered clouds" -> "Scattered clouds")
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Main render function for the dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let view = app.view();
    let area = frame.area();

    let error_height = if view.error.is_empty() { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Search box
            Constraint::Length(1),            // Recent searches
            Constraint::Length(error_height), // Error banner
            Constraint::Min(0),               // Body
            Constraint::Length(1),            // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_search(frame, chunks[1], app);
    render_history(frame, chunks[2], view);
    if !view.error.is_empty() {
        render_error(frame, chunks[3], &view.error);
    }

    match (&view.weather, view.is_loading()) {
        (Some(weather), _) => render_weather(frame, chunks[4], app, weather),
        (None, true) => render_loading(frame, chunks[4], &view.city, app.tick),
        (None, false) => render_empty(frame, chunks[4]),
    }

    render_footer(frame, chunks[5], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let clock = Local::now().format("%a %d %b  %H:%M:%S").to_string();

    let mut spans = vec![Span::styled(
        view.city.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if view.is_loading() {
        spans.push(Span::styled(
            format!("  {} Updating...", spinner(app.tick)),
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .title(" skycast ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(spans)), halves[0]);
    frame.render_widget(
        Paragraph::new(clock)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.state == AppState::Search;

    let (text, style) = if active {
        (
            format!("{}█", app.search_input),
            Style::default().fg(Color::White),
        )
    } else {
        (
            "Press / to search for a city".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let border = if active { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_history(frame: &mut Frame, area: Rect, view: &ViewState) {
    if view.history.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled(" Recent: ", Style::default().fg(Color::DarkGray))];
    for (i, name) in view.history.names().enumerate() {
        let style = if name == view.city {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(format!("{}  ", name), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(format!(" \u{26A0} {}", error)).style(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(banner, area);
}

/// Renders a loading message while the first fetch is in flight
fn render_loading(frame: &mut Frame, area: Rect, city: &str, tick: u64) {
    let chunks = centered_row(area);

    let loading_text = Paragraph::new(format!(
        "{} Fetching weather for {}...",
        spinner(tick),
        city
    ))
    .style(Style::default().fg(Color::Cyan))
    .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("No weather data yet. Press / to search for a city.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(text, centered_row(area));
}

fn centered_row(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area)[1]
}

fn render_weather(frame: &mut Frame, area: Rect, app: &App, weather: &WeatherSnapshot) {
    let view = app.view();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Main card + metrics
            Constraint::Length(8), // Forecast
            Constraint::Min(5),    // Insight + sun
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);
    render_main_card(frame, top[0], weather, app.tick);
    render_metrics(frame, top[1], weather);

    match &view.forecast {
        Some(forecast) => render_forecast(frame, rows[1], forecast),
        None => frame.render_widget(
            Block::default().title(" 5-Day Forecast ").borders(Borders::ALL),
            rows[1],
        ),
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    render_insight(frame, bottom[0], app);
    render_sun(frame, bottom[1], weather);
}

fn render_main_card(frame: &mut Frame, area: Rect, weather: &WeatherSnapshot, tick: u64) {
    let category = weather.category();
    let look = treatment(category);

    let block = Block::default()
        .title(format!(" {} ", category.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(look.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Backdrop::new(category, tick), inner);

    let place = if weather.sys.country.is_empty() {
        weather.name.clone()
    } else {
        format!("{}, {}", weather.name, weather.sys.country)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            place,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{}  ", look.glyph)),
            Span::styled(
                format!("{:.1}°C", weather.main.temp),
                Style::default()
                    .fg(temperature_color(weather.main.temp))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            capitalize(weather.description()),
            Style::default().fg(look.accent),
        )),
        Line::from(format!(
            "H: {:.0}°  L: {:.0}°",
            weather.main.temp_max, weather.main.temp_min
        )),
    ];

    if let Some(observed) = local_time(weather.dt, weather.timezone) {
        lines.push(Line::from(Span::styled(
            format!("Observed {}", observed),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn local_time(epoch: i64, offset_secs: i32) -> Option<String> {
    if epoch == 0 {
        return None;
    }
    let offset = FixedOffset::east_opt(offset_secs)?;
    let time = DateTime::from_timestamp(epoch, 0)?.with_timezone(&offset);
    Some(time.format("%H:%M").to_string())
}

fn render_metrics(frame: &mut Frame, area: Rect, weather: &WeatherSnapshot) {
    let metrics = [
        ("Feels like", format!("{:.1}°C", weather.main.feels_like)),
        ("Humidity", format!("{}%", weather.main.humidity)),
        ("Wind", format!("{:.1} m/s", weather.wind.speed)),
        ("Visibility", format!("{:.1} km", weather.visibility_km())),
        ("Pressure", format!("{} hPa", weather.main.pressure)),
        ("Cloudiness", format!("{}%", weather.clouds.all)),
    ];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(*row);

        for (col_index, cell) in cells.iter().enumerate() {
            let (label, value) = &metrics[row_index * 2 + col_index];
            let line = Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]);
            frame.render_widget(
                Paragraph::new(line).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                *cell,
            );
        }
    }
}

fn render_forecast(frame: &mut Frame, area: Rect, forecast: &ForecastSnapshot) {
    let block = Block::default()
        .title(" 5-Day Forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Day columns
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Sparkline
        ])
        .split(inner);

    let days = forecast.daily();
    if days.is_empty() {
        frame.render_widget(
            Paragraph::new("No forecast available").style(Style::default().fg(Color::DarkGray)),
            parts[0],
        );
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, days.len() as u32); days.len()])
            .split(parts[0]);

        for (entry, column) in days.iter().zip(columns.iter()) {
            let look = treatment(entry.category());
            // Shifted into the city's local day
            let day = DateTime::from_timestamp(entry.dt + i64::from(forecast.city.timezone), 0)
                .map(|t| t.format("%a %d").to_string())
                .unwrap_or_default();

            let lines = vec![
                Line::from(Span::styled(day, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(look.glyph),
                Line::from(Span::styled(
                    format!("{:.0}°C", entry.main.temp),
                    Style::default().fg(temperature_color(entry.main.temp)),
                )),
                Line::from(Span::styled(
                    capitalize(entry.description()),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                *column,
            );
        }
    }

    let temperatures = forecast.temperatures();
    let mut sparkline = TemperatureSparkline::new(&temperatures);
    if let Some(warmest) = TemperatureSparkline::warmest(&temperatures) {
        sparkline = sparkline.highlight(warmest);
    }
    let spark_area = centered_columns(parts[2], temperatures.len() as u16);
    frame.render_widget(sparkline, spark_area);
}

/// Horizontally centres a strip of `width` cells inside `area`
fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn render_insight(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let (text, style) = if view.is_ai_loading() {
        (
            format!("{} Asking the AI...", spinner(app.tick)),
            Style::default().fg(Color::Yellow),
        )
    } else if view.ai_insight.is_empty() {
        (
            "Press a for a summary and outfit tip.".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (view.ai_insight.clone(), Style::default())
    };

    let block = Block::default()
        .title(" AI Insight ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_sun(frame: &mut Frame, area: Rect, weather: &WeatherSnapshot) {
    let block = Block::default()
        .title(" Sun ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let fmt = |time: Option<DateTime<FixedOffset>>| {
        time.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    };
    let times = Line::from(vec![
        Span::styled("↑ ", Style::default().fg(Color::Yellow)),
        Span::raw(fmt(weather.sunrise_local())),
        Span::raw("   "),
        Span::styled("↓ ", Style::default().fg(Color::LightRed)),
        Span::raw(fmt(weather.sunset_local())),
    ]);
    frame.render_widget(Paragraph::new(times).alignment(Alignment::Center), parts[0]);

    let progress = weather.sun_progress(Utc::now().timestamp());
    frame.render_widget(SunArc::new(progress), parts[1]);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match app.state {
        AppState::Search => "Enter: Search | Esc: Cancel",
        _ => "/: Search | a: AI insight | 1-5: Recent | r: Reload | c: Contact | ?: Help | q: Quit",
    };
    frame.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}
