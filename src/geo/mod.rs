//! Geographic location and astronomical event sources.
//!
//! - [`location`]: the [`AstralLocation`] collaborator trait and the
//!   `sunrise`-crate backed [`SolarLocation`], with polar fallbacks
//! - [`timezone`]: timezone detection from coordinates

pub mod location;
pub mod timezone;

pub use location::{AstralLocation, SolarLocation};
pub use timezone::determine_timezone_from_coordinates;
