//! Contact form screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::contact::ContactField;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Min(5),    // Message
            Constraint::Length(4), // Notice
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Contact us",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  (to {})", app.contact_email()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_field(frame, chunks[1], app, ContactField::Name, "Name");
    render_field(frame, chunks[2], app, ContactField::Email, "Email");
    render_field(frame, chunks[3], app, ContactField::Message, "Message");

    if let Some(notice) = &app.contact_notice {
        let (title, color) = if notice.starts_with("mailto:") {
            (" Open this link to send ", Color::Green)
        } else {
            (" Missing information ", Color::Red)
        };
        let paragraph = Paragraph::new(notice.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(paragraph, chunks[4]);
    }

    let footer = Paragraph::new("Tab: Next field | Enter: Next / New line | Ctrl-S: Send | Esc: Back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[5]);
}

fn render_field(frame: &mut Frame, area: Rect, app: &App, field: ContactField, title: &str) {
    let focused = app.contact.focus == field;
    let mut text = app.contact.field(field).to_string();
    if focused {
        text.push('█');
    }

    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
