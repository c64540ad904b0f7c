//! Temperature sparkline widget for the forecast strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing forecast temperatures over time
///
/// Values are normalised between the lowest and highest temperature of the
/// series, so small swings still use the full height range.
pub struct TemperatureSparkline<'a> {
    /// Temperature for each 3-hour step
    temperatures: &'a [f64],
    /// Index to draw with the marker style
    highlight: Option<usize>,
    style: Style,
    marker_style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(temperatures: &'a [f64]) -> Self {
        Self {
            temperatures,
            highlight: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn highlight(mut self, pos: usize) -> Self {
        self.highlight = Some(pos);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Index of the warmest step, if any
    pub fn warmest(temperatures: &[f64]) -> Option<usize> {
        temperatures
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    fn bounds(&self) -> (f64, f64) {
        let min = self.temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    fn temperature_to_block(&self, temp: f64, min: f64, max: f64) -> char {
        let range = max - min;
        // A flat series sits mid-height
        if !range.is_finite() || range <= f64::EPSILON {
            return BLOCKS[3];
        }
        let normalized = ((temp - min) / range).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let (min, max) = self.bounds();

        for (i, temp) in self.temperatures.iter().take(width).enumerate() {
            let block = self.temperature_to_block(*temp, min, max);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if self.highlight == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
