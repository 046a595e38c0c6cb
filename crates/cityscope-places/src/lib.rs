//! Places integration for Cityscope.
//!
//! Resolves free-text queries to a location and searches categories of
//! places around it.

pub mod client;
pub mod error;
pub mod resolver;
pub mod search;
pub mod types;

pub use client::PlacesClient;
pub use error::{PlacesError, ResolutionError};
pub use resolver::PlaceResolver;
pub use search::CategorySearch;
pub use types::{Category, Coordinates, Location, PlaceSummary, Suggestion};
