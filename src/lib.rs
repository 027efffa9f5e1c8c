//! # Adaptive lighting
//!
//! Sun event timing and color temperature logic for lights that follow the sun.
//!
//! The crate computes sunrise, solar noon, sunset and solar midnight for a
//! location, optionally pinned or clamped to configured wall-clock times, and
//! derives a continuous sun position in [-1, 1]. A separate dim-to-warm
//! adjuster pulls a light's color temperature toward a warm target as it dims.
//!
//! ## Architecture
//!
//! - **sun_events**: Sun event timing, previous/next/closest events and sun position
//! - **color_temp**: Dim-to-warm color temperature adjustment in mired
//! - **lighting**: Brightness and color temperature curves driven by the sun
//! - **geo**: Astronomical collaborator (`sunrise` crate) and timezone detection
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **logger**: Structured logging with visual formatting
//! - **utils**: Interpolation, unit conversion and timestamp helpers
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use adaptive_lighting::{SolarLocation, SunEvents, SunTimeOverrides};
//!
//! # fn main() -> anyhow::Result<()> {
//! let location = SolarLocation::from_coordinates(52.379189, 4.899431, 0.0)?;
//! let timezone = location.timezone;
//! let events = SunEvents::new("home", Arc::new(location), SunTimeOverrides::default(), timezone);
//!
//! let position = events.sun_position(&chrono::Utc::now())?;
//! println!("sun position: {position:.2}");
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod color_temp;
pub mod config;
pub mod constants;
pub mod geo;
pub mod lighting;
pub mod logger;
pub mod sun_events;
pub mod utils;

// Re-export important types for easier access
pub use color_temp::{DimToWarmSettings, LightCapabilities, adjust_color_temp_for_brightness};
pub use config::Config;
pub use geo::{AstralLocation, SolarLocation};
pub use lighting::{BrightnessMode, LightTarget, SunLightSettings};
pub use logger::{Log, LogLevel};
pub use sun_events::{EventTime, SunEvent, SunEvents, SunTimeOverrides};
