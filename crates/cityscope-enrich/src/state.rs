//! The enrichment view state and its lifecycle phases.

use cityscope_places::{Category, Location, PlaceSummary};
use cityscope_weather::WeatherSnapshot;

/// Outcome of one category search for the current location.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryResult {
    /// No location is selected.
    #[default]
    NotRequested,
    Pending,
    /// Provider order is preserved. An empty list is a successful search.
    Ready(Vec<PlaceSummary>),
    Failed,
}

impl CategoryResult {
    /// True once the search has completed, successfully or not.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed)
    }

    /// Places to show; a failed or unfinished search has none.
    pub fn places(&self) -> &[PlaceSummary] {
        match self {
            Self::Ready(places) => places,
            _ => &[],
        }
    }
}

/// One result slot per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categories {
    restaurants: CategoryResult,
    historical_sites: CategoryResult,
    places_of_interest: CategoryResult,
}

impl Categories {
    fn all_pending() -> Self {
        Self {
            restaurants: CategoryResult::Pending,
            historical_sites: CategoryResult::Pending,
            places_of_interest: CategoryResult::Pending,
        }
    }

    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Restaurants => &self.restaurants,
            Category::HistoricalSites => &self.historical_sites,
            Category::PlacesOfInterest => &self.places_of_interest,
        }
    }

    pub fn set(&mut self, category: Category, result: CategoryResult) {
        let slot = match category {
            Category::Restaurants => &mut self.restaurants,
            Category::HistoricalSites => &mut self.historical_sites,
            Category::PlacesOfInterest => &mut self.places_of_interest,
        };
        *slot = result;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Everything the presentation layer shows for the current query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentState {
    pub location: Option<Location>,
    pub weather: Option<WeatherSnapshot>,
    pub categories: Categories,
}

impl EnrichmentState {
    /// State right after a successful resolution: weather unknown, every
    /// category pending.
    pub(crate) fn for_location(location: Location) -> Self {
        Self {
            location: Some(location),
            weather: None,
            categories: Categories::all_pending(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Without a location there is no weather and nothing has been requested.
    pub fn is_consistent(&self) -> bool {
        self.location.is_some()
            || (self.weather.is_none()
                && self
                    .categories
                    .iter()
                    .all(|(_, r)| *r == CategoryResult::NotRequested))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
    Enriching,
    Settled,
}

impl Phase {
    /// Idle and Settled have nothing in flight for the current query.
    pub fn is_at_rest(self) -> bool {
        matches!(self, Self::Idle | Self::Settled)
    }
}

/// Read-only view published to observers after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub phase: Phase,
    pub state: EnrichmentState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscope_places::Coordinates;

    fn berlin() -> Location {
        Location {
            name: "Berlin".into(),
            formatted_address: "Berlin, Germany".into(),
            coordinates: Coordinates { lat: 52.52, lng: 13.405 },
        }
    }

    #[test]
    fn test_default_state_is_empty_and_consistent() {
        let state = EnrichmentState::default();
        assert!(state.is_empty());
        assert!(state.is_consistent());
        assert!(state
            .categories
            .iter()
            .all(|(_, r)| *r == CategoryResult::NotRequested));
    }

    #[test]
    fn test_for_location_marks_categories_pending() {
        let state = EnrichmentState::for_location(berlin());
        assert!(!state.is_empty());
        assert!(state.is_consistent());
        assert!(state.weather.is_none());
        for (_, result) in state.categories.iter() {
            assert_eq!(*result, CategoryResult::Pending);
            assert!(!result.is_complete());
        }
    }

    #[test]
    fn test_inconsistent_state_detected() {
        let mut state = EnrichmentState::default();
        state
            .categories
            .set(Category::Restaurants, CategoryResult::Ready(vec![]));
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_set_touches_only_one_category() {
        let mut categories = Categories::all_pending();
        categories.set(Category::HistoricalSites, CategoryResult::Failed);

        assert_eq!(*categories.get(Category::HistoricalSites), CategoryResult::Failed);
        assert_eq!(*categories.get(Category::Restaurants), CategoryResult::Pending);
        assert_eq!(*categories.get(Category::PlacesOfInterest), CategoryResult::Pending);
    }

    #[test]
    fn test_failed_and_empty_are_distinct() {
        let empty = CategoryResult::Ready(vec![]);
        let failed = CategoryResult::Failed;

        assert!(empty.is_complete() && failed.is_complete());
        assert!(empty.places().is_empty() && failed.places().is_empty());
        assert_ne!(empty, failed);
    }

    #[test]
    fn test_phase_at_rest() {
        assert!(Phase::Idle.is_at_rest());
        assert!(Phase::Settled.is_at_rest());
        assert!(!Phase::Resolving.is_at_rest());
        assert!(!Phase::Enriching.is_at_rest());
    }
}
