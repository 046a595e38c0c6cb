//! Weather service for Cityscope
//!
//! Fetches current conditions by location name and converts them to
//! display units.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::{WeatherError, WeatherSnapshot};
