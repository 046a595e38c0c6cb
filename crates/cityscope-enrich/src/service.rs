//! Async fetches spawned on the shared runtime; results come back over mpsc
//! tagged with the generation that started them.
//!
//! Each provider call runs in its own task and a second task awaits its
//! handle, so a call that panics or is cancelled still reports back as a
//! failed update.

use std::future::Future;
use std::sync::Arc;

use cityscope_places::{Category, Location, PlaceSummary, PlacesError, ResolutionError};
use cityscope_weather::{WeatherError, WeatherSnapshot};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinError;

use crate::sources::{CategorySource, LocationSource, WeatherSource};

/// Completion of one provider call.
#[derive(Debug)]
pub enum EnrichmentUpdate {
    ResolveDone(Result<Location, ResolutionError>),
    WeatherDone(Result<WeatherSnapshot, WeatherError>),
    CategoryDone(Category, Result<Vec<PlaceSummary>, PlacesError>),
}

#[derive(Debug)]
pub struct EnrichmentMessage {
    pub generation: u64,
    pub update: EnrichmentUpdate,
}

/// Request resolution of a query.
pub(crate) fn request_resolve(
    runtime: &Handle,
    tx: &UnboundedSender<EnrichmentMessage>,
    source: Arc<dyn LocationSource>,
    generation: u64,
    query: String,
) {
    spawn_reporting(
        runtime,
        tx,
        generation,
        async move { source.resolve(&query).await },
        |joined| {
            EnrichmentUpdate::ResolveDone(joined.unwrap_or_else(|e| {
                Err(ResolutionError::Provider(PlacesError::Interrupted(
                    join_failure(&e),
                )))
            }))
        },
    );
}

/// Request current weather for a resolved location name.
pub(crate) fn request_weather(
    runtime: &Handle,
    tx: &UnboundedSender<EnrichmentMessage>,
    source: Arc<dyn WeatherSource>,
    generation: u64,
    location_name: String,
) {
    spawn_reporting(
        runtime,
        tx,
        generation,
        async move { source.current_weather(&location_name).await },
        |joined| {
            EnrichmentUpdate::WeatherDone(
                joined.unwrap_or_else(|e| Err(WeatherError::Interrupted(join_failure(&e)))),
            )
        },
    );
}

/// Request one category search for a resolved location name.
pub(crate) fn request_category(
    runtime: &Handle,
    tx: &UnboundedSender<EnrichmentMessage>,
    source: Arc<dyn CategorySource>,
    generation: u64,
    location_name: String,
    category: Category,
) {
    spawn_reporting(
        runtime,
        tx,
        generation,
        async move { source.search(&location_name, category).await },
        move |joined| {
            EnrichmentUpdate::CategoryDone(
                category,
                joined.unwrap_or_else(|e| Err(PlacesError::Interrupted(join_failure(&e)))),
            )
        },
    );
}

/// Run `fetch` on the runtime and always send exactly one update for it.
fn spawn_reporting<T, F, U>(
    runtime: &Handle,
    tx: &UnboundedSender<EnrichmentMessage>,
    generation: u64,
    fetch: F,
    into_update: U,
) where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
    U: FnOnce(Result<T, JoinError>) -> EnrichmentUpdate + Send + 'static,
{
    let tx = tx.clone();
    let task = runtime.spawn(fetch);
    runtime.spawn(async move {
        let update = into_update(task.await);
        send(&tx, generation, update);
    });
}

fn join_failure(e: &JoinError) -> String {
    if e.is_panic() {
        tracing::error!("Fetch task panicked: {}", e);
        "task panicked".to_string()
    } else {
        "task cancelled".to_string()
    }
}

fn send(tx: &UnboundedSender<EnrichmentMessage>, generation: u64, update: EnrichmentUpdate) {
    // The orchestrator may already be gone.
    if tx.send(EnrichmentMessage { generation, update }).is_err() {
        tracing::debug!("Dropping result for generation {}: receiver closed", generation);
    }
}
