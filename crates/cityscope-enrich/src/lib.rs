//! Location enrichment for Cityscope.
//!
//! Resolves a query to a place, then gathers weather and nearby places for it
//! into a single view state.

pub mod error;
mod error_mapping;
pub mod orchestrator;
pub mod service;
pub mod sources;
pub mod state;

pub use error::EnrichError;
pub use orchestrator::{Applied, Orchestrator};
pub use service::{EnrichmentMessage, EnrichmentUpdate};
pub use sources::{CategorySource, LocationSource, Sources, WeatherSource};
pub use state::{Categories, CategoryResult, EnrichmentState, Phase, Snapshot};
