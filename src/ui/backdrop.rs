//! Weather-driven decorative layer
//!
//! Every [`WeatherCategory`] maps to a [`Treatment`]: the glyph shown next to the
//! condition, an accent colour, and the particle [`Effect`] drawn behind the main
//! card. Particle positions are a pure function of the area, the effect and the
//! animation tick, so the same frame always renders the same way.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::data::WeatherCategory;

/// Animated particle layer behind the main card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RainStreaks,
    Snowfall,
    DriftingClouds,
    SunSparkles,
    None,
}

/// How a weather category is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treatment {
    pub glyph: &'static str,
    pub accent: Color,
    pub effect: Effect,
}

/// Presentation treatment for `category`
pub fn treatment(category: WeatherCategory) -> Treatment {
    match category {
        WeatherCategory::Thunderstorm => Treatment {
            glyph: "\u{26C8}", // ⛈
            accent: Color::Magenta,
            effect: Effect::RainStreaks,
        },
        WeatherCategory::Drizzle => Treatment {
            glyph: "\u{1F326}", // 🌦
            accent: Color::LightBlue,
            effect: Effect::RainStreaks,
        },
        WeatherCategory::Rain => Treatment {
            glyph: "\u{1F327}", // 🌧
            accent: Color::Blue,
            effect: Effect::RainStreaks,
        },
        WeatherCategory::Snow => Treatment {
            glyph: "\u{2744}", // ❄
            accent: Color::White,
            effect: Effect::Snowfall,
        },
        WeatherCategory::Atmosphere => Treatment {
            glyph: "\u{1F32B}", // 🌫
            accent: Color::Gray,
            effect: Effect::DriftingClouds,
        },
        WeatherCategory::Clear => Treatment {
            glyph: "\u{2600}", // ☀
            accent: Color::Yellow,
            effect: Effect::SunSparkles,
        },
        WeatherCategory::Clouds => Treatment {
            glyph: "\u{2601}", // ☁
            accent: Color::Cyan,
            effect: Effect::DriftingClouds,
        },
        WeatherCategory::Unknown => Treatment {
            glyph: "?",
            accent: Color::DarkGray,
            effect: Effect::None,
        },
    }
}

impl Effect {
    fn particle(&self) -> char {
        match self {
            Effect::RainStreaks => '╎',
            Effect::Snowfall => '*',
            Effect::DriftingClouds => '░',
            Effect::SunSparkles => '✦',
            Effect::None => ' ',
        }
    }

    /// Roughly one particle per this many cells
    fn sparsity(&self) -> usize {
        match self {
            Effect::RainStreaks => 12,
            Effect::Snowfall => 18,
            Effect::DriftingClouds => 10,
            Effect::SunSparkles => 40,
            Effect::None => usize::MAX,
        }
    }
}

/// splitmix64 step, used to scatter particles deterministically
fn scatter(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Particle layer widget
pub struct Backdrop {
    effect: Effect,
    tick: u64,
    style: Style,
}

impl Backdrop {
    pub fn new(category: WeatherCategory, tick: u64) -> Self {
        let treatment = treatment(category);
        Self {
            effect: treatment.effect,
            tick,
            style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Cell positions (relative to the area) of every visible particle
    pub fn particles(&self, width: u16, height: u16) -> Vec<(u16, u16)> {
        if width == 0 || height == 0 || self.effect == Effect::None {
            return Vec::new();
        }

        let w = u64::from(width);
        let h = u64::from(height);
        let count = (width as usize * height as usize) / self.effect.sparsity();

        (0..count as u64)
            .filter_map(|i| {
                let seed = scatter(i);
                let x0 = seed % w;
                let y0 = (seed >> 16) % h;
                match self.effect {
                    // Falls one row per tick
                    Effect::RainStreaks => Some((x0, y0.wrapping_add(self.tick) % h)),
                    Effect::Snowfall => {
                        let y = (y0 + self.tick / 2) % h;
                        let x = (x0 + (self.tick / 6 + i) % 3) % w;
                        Some((x, y))
                    }
                    Effect::DriftingClouds => Some(((x0 + self.tick / 4) % w, y0)),
                    // Each sparkle is lit for two ticks out of eight
                    Effect::SunSparkles => {
                        (self.tick.wrapping_add(seed >> 32) % 8 < 2).then_some((x0, y0))
                    }
                    Effect::None => None,
                }
            })
            .map(|(x, y)| (x as u16, y as u16))
            .collect()
    }
}

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let particle = self.effect.particle();
        for (dx, dy) in self.particles(area.width, area.height) {
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                cell.set_char(particle).set_style(self.style);
            }
        }
    }
}
