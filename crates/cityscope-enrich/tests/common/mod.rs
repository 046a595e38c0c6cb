//! Scripted in-memory providers for orchestrator tests.
//!
//! Every call is recorded. A call can be held back with [`FakeProviders::gate`]
//! until the test releases it with `notify_one()`.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use cityscope_enrich::{CategorySource, LocationSource, Sources, WeatherSource};
use cityscope_places::{
    Category, Coordinates, Location, PlaceSummary, PlacesError, ResolutionError,
};
use cityscope_weather::{WeatherError, WeatherSnapshot};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Resolve(String),
    Weather(String),
    Category(String, Category),
}

#[derive(Default)]
pub struct FakeProviders {
    locations: Mutex<HashMap<String, Location>>,
    weather: Mutex<HashMap<String, WeatherSnapshot>>,
    categories: Mutex<HashMap<(String, Category), Vec<PlaceSummary>>>,
    gates: Mutex<HashMap<Call, Arc<Notify>>>,
    panics: Mutex<HashSet<Call>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProviders {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sources(self: &Arc<Self>) -> Sources {
        Sources {
            location: self.clone(),
            weather: self.clone(),
            categories: self.clone(),
        }
    }

    pub fn add_location(&self, query: &str, location: Location) {
        self.locations.lock().insert(query.to_string(), location);
    }

    pub fn add_weather(&self, name: &str, snapshot: WeatherSnapshot) {
        self.weather.lock().insert(name.to_string(), snapshot);
    }

    pub fn add_category(&self, name: &str, category: Category, places: Vec<PlaceSummary>) {
        self.categories
            .lock()
            .insert((name.to_string(), category), places);
    }

    /// Script a place that resolves to itself and succeeds everywhere.
    pub fn add_city(&self, name: &str, temperature_c: f64) {
        self.add_location(name, location(name));
        self.add_weather(name, weather(name, temperature_c));
        for category in Category::ALL {
            self.add_category(
                name,
                category,
                vec![place(&format!("{} {}", name, category.label()))],
            );
        }
    }

    /// Hold `call` until the returned gate is notified.
    pub fn gate(&self, call: Call) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(call, notify.clone());
        notify
    }

    /// Make `call` panic instead of returning.
    pub fn panic_on(&self, call: Call) {
        self.panics.lock().insert(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().push(call.clone());
        let gate = self.gates.lock().get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let should_panic = self.panics.lock().contains(&call);
        if should_panic {
            panic!("scripted panic in {:?}", call);
        }
    }
}

#[async_trait]
impl LocationSource for FakeProviders {
    async fn resolve(&self, query: &str) -> Result<Location, ResolutionError> {
        self.enter(Call::Resolve(query.to_string())).await;
        self.locations
            .lock()
            .get(query)
            .cloned()
            .ok_or(ResolutionError::NoCandidates)
    }
}

#[async_trait]
impl WeatherSource for FakeProviders {
    async fn current_weather(&self, location_name: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.enter(Call::Weather(location_name.to_string())).await;
        self.weather
            .lock()
            .get(location_name)
            .cloned()
            .ok_or_else(|| WeatherError::Parse(format!("no weather for {}", location_name)))
    }
}

#[async_trait]
impl CategorySource for FakeProviders {
    async fn search(
        &self,
        location_name: &str,
        category: Category,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        self.enter(Call::Category(location_name.to_string(), category))
            .await;
        self.categories
            .lock()
            .get(&(location_name.to_string(), category))
            .cloned()
            .ok_or_else(|| PlacesError::InvalidResponse(format!("no {} scripted", category)))
    }
}

pub fn location(name: &str) -> Location {
    Location {
        name: name.to_string(),
        formatted_address: format!("{}, Somewhere", name),
        coordinates: Coordinates { lat: 1.0, lng: 2.0 },
    }
}

pub fn weather(station: &str, temperature_c: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        observed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        temperature_c,
        feels_like_c: temperature_c - 1.0,
        description: "Clear sky".to_string(),
        wind_kmh: 10.0,
        pressure_hpa: 1012,
        humidity_pct: 50,
        visibility_km: 10.0,
        icon_id: "01d".to_string(),
        station_name: station.to_string(),
        country_code: "XX".to_string(),
    }
}

pub fn place(name: &str) -> PlaceSummary {
    PlaceSummary {
        name: name.to_string(),
        formatted_address: format!("1 {} Street", name),
    }
}
