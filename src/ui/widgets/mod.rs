//! Custom widgets

pub mod sparkline;
pub mod sun_arc;

pub use sparkline::TemperatureSparkline;
pub use sun_arc::SunArc;
