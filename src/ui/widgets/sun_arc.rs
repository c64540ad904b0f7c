//! Sun-position arc for the sunrise/sunset card

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const SUN: char = '☀';
const MOON: char = '☾';
const TRACK: char = '·';

/// Half-ellipse from the bottom-left to the bottom-right corner, with the sun
/// placed at `progress` (0.0 = sunrise, 1.0 = sunset).
///
/// Without progress (night), the moon sits at the middle of the horizon.
pub struct SunArc {
    progress: Option<f64>,
    track_style: Style,
    sun_style: Style,
}

impl SunArc {
    pub fn new(progress: Option<f64>) -> Self {
        Self {
            progress,
            track_style: Style::default().fg(Color::DarkGray),
            sun_style: Style::default().fg(Color::Yellow),
        }
    }

    /// Cell on the arc for a position along it, relative to the area
    pub fn point(width: u16, height: u16, t: f64) -> (u16, u16) {
        let t = t.clamp(0.0, 1.0);
        let angle = std::f64::consts::PI * t;
        let max_x = f64::from(width.saturating_sub(1));
        let max_y = f64::from(height.saturating_sub(1));

        let x = (1.0 - angle.cos()) / 2.0 * max_x;
        let y = max_y - angle.sin() * max_y;
        (x.round() as u16, y.round() as u16)
    }
}

impl Widget for SunArc {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }

        let steps = area.width * 2;
        for step in 0..=steps {
            let (x, y) = Self::point(area.width, area.height, f64::from(step) / f64::from(steps));
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_char(TRACK).set_style(self.track_style);
            }
        }

        let (marker, (x, y)) = match self.progress {
            Some(t) => (SUN, Self::point(area.width, area.height, t)),
            None => (
                MOON,
                (area.width / 2, area.height.saturating_sub(1)),
            ),
        };
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(marker).set_style(self.sun_style);
        }
    }
}
