//! weather-chart: headless engine behind a weather dashboard card.
//!
//! The crate keeps one forecast subscription, one chart instance and the
//! clock/autoscroll timers of a card in sync with its configuration, and
//! derives the current-conditions and forecast-column values a presentation
//! layer renders.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{CardConfig, WeatherCard};
pub use error::{CardError, CardResult};
