//! Enrichment orchestrator.
//!
//! A submitted query is resolved first; only once the location is set are the
//! weather fetch and the three category searches launched, concurrently. Each
//! completion is applied on its own as it arrives.
//!
//! Every submit starts a new generation. Spawned fetches carry the generation
//! that started them and [`Orchestrator::apply`] drops any message from an
//! older one, so a superseded query can never write into the current view.
//! The orchestrator is the only writer of the state; observers get copies
//! through [`Orchestrator::subscribe`].

use cityscope_places::Category;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use crate::error::EnrichError;
use crate::service::{self, EnrichmentMessage, EnrichmentUpdate};
use crate::sources::Sources;
use crate::state::{CategoryResult, EnrichmentState, Phase, Snapshot};

/// Number of dependent fetches launched per resolved location.
const DEPENDENT_FETCHES: usize = 1 + Category::ALL.len();

/// What applying one completion did.
#[derive(Debug)]
pub enum Applied {
    /// The message belonged to a superseded query and was dropped.
    Stale,
    /// Location set; dependent fetches launched.
    Resolved,
    Weather,
    Category(Category),
    /// A fetch failed. Resolution failures also cleared the state.
    Failed(EnrichError),
}

pub struct Orchestrator {
    sources: Sources,
    runtime: Handle,
    tx: mpsc::UnboundedSender<EnrichmentMessage>,
    rx: mpsc::UnboundedReceiver<EnrichmentMessage>,
    snapshot: Snapshot,
    publisher: watch::Sender<Snapshot>,
    query: String,
    outstanding: usize,
}

impl Orchestrator {
    pub fn new(sources: Sources, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(Snapshot::default());

        Self {
            sources,
            runtime,
            tx,
            rx,
            snapshot: Snapshot::default(),
            publisher,
            query: String::new(),
            outstanding: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Receive a copy of the snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Start a new query, superseding whatever is in flight.
    ///
    /// The state is cleared immediately. A blank query stays Idle and makes
    /// no provider call; anything else goes to the resolver as typed.
    pub fn submit(&mut self, query: &str) {
        self.snapshot.generation += 1;
        self.snapshot.state = EnrichmentState::default();
        self.outstanding = 0;
        self.query = query.to_string();

        if self.query.trim().is_empty() {
            tracing::info!("Empty query; enrichment cleared");
            self.snapshot.phase = Phase::Idle;
            self.publish();
            return;
        }

        tracing::info!(
            "Resolving '{}' (generation {})",
            self.query,
            self.snapshot.generation
        );
        self.snapshot.phase = Phase::Resolving;
        self.publish();

        service::request_resolve(
            &self.runtime,
            &self.tx,
            self.sources.location.clone(),
            self.snapshot.generation,
            self.query.clone(),
        );
    }

    /// Apply every completion already waiting, without blocking.
    /// Returns how many messages were taken off the channel.
    pub fn poll_channel(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next completion and apply it.
    pub async fn next_update(&mut self) -> Applied {
        match self.rx.recv().await {
            Some(msg) => self.apply(msg),
            // Unreachable: `self.tx` keeps the channel open.
            None => Applied::Stale,
        }
    }

    /// Drive the current query until nothing is in flight for it.
    /// Returns the failures seen along the way.
    pub async fn settle(&mut self) -> Vec<EnrichError> {
        let mut failures = Vec::new();
        while !self.snapshot.phase.is_at_rest() {
            if let Applied::Failed(e) = self.next_update().await {
                failures.push(e);
            }
        }
        failures
    }

    /// Apply one completion through the generation fence.
    pub fn apply(&mut self, msg: EnrichmentMessage) -> Applied {
        if msg.generation != self.snapshot.generation {
            tracing::debug!(
                "Discarding result from generation {} (current {})",
                msg.generation,
                self.snapshot.generation
            );
            return Applied::Stale;
        }

        match msg.update {
            EnrichmentUpdate::ResolveDone(result) => {
                if self.snapshot.phase != Phase::Resolving {
                    return Applied::Stale;
                }
                match result {
                    Ok(location) => {
                        let name = location.name.clone();
                        tracing::info!("Enriching {}", name);
                        self.snapshot.state = EnrichmentState::for_location(location);
                        self.snapshot.phase = Phase::Enriching;
                        self.outstanding = DEPENDENT_FETCHES;
                        self.publish();
                        self.launch_dependents(name);
                        Applied::Resolved
                    }
                    Err(source) => {
                        tracing::warn!(
                            "Resolution of '{}' failed ({}): {}",
                            self.query,
                            source.reason_code(),
                            source
                        );
                        self.snapshot.state = EnrichmentState::default();
                        self.snapshot.phase = Phase::Idle;
                        self.publish();
                        Applied::Failed(EnrichError::ResolutionFailed {
                            query: self.query.clone(),
                            source,
                        })
                    }
                }
            }
            EnrichmentUpdate::WeatherDone(result) => {
                if self.snapshot.phase != Phase::Enriching {
                    return Applied::Stale;
                }
                let applied = match result {
                    Ok(weather) => {
                        self.snapshot.state.weather = Some(weather);
                        Applied::Weather
                    }
                    Err(source) => {
                        tracing::warn!("Weather unavailable: {}", source);
                        self.snapshot.state.weather = None;
                        Applied::Failed(EnrichError::WeatherFailed {
                            location: self.location_name(),
                            source,
                        })
                    }
                };
                self.complete_fetch();
                applied
            }
            EnrichmentUpdate::CategoryDone(category, result) => {
                if self.snapshot.phase != Phase::Enriching {
                    return Applied::Stale;
                }
                let applied = match result {
                    Ok(places) => {
                        tracing::debug!("{} {} found", places.len(), category);
                        self.snapshot
                            .state
                            .categories
                            .set(category, CategoryResult::Ready(places));
                        Applied::Category(category)
                    }
                    Err(source) => {
                        tracing::warn!("Search for {} failed: {}", category, source);
                        self.snapshot
                            .state
                            .categories
                            .set(category, CategoryResult::Failed);
                        Applied::Failed(EnrichError::CategoryFailed {
                            category,
                            location: self.location_name(),
                            source,
                        })
                    }
                };
                self.complete_fetch();
                applied
            }
        }
    }

    fn launch_dependents(&self, location_name: String) {
        let generation = self.snapshot.generation;

        service::request_weather(
            &self.runtime,
            &self.tx,
            self.sources.weather.clone(),
            generation,
            location_name.clone(),
        );
        for category in Category::ALL {
            service::request_category(
                &self.runtime,
                &self.tx,
                self.sources.categories.clone(),
                generation,
                location_name.clone(),
                category,
            );
        }
    }

    fn complete_fetch(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            tracing::info!("Enrichment of {} settled", self.location_name());
            self.snapshot.phase = Phase::Settled;
        }
        self.publish();
    }

    fn location_name(&self) -> String {
        self.snapshot
            .state
            .location
            .as_ref()
            .map(|l| l.name.clone())
            .unwrap_or_default()
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot.clone());
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("snapshot", &self.snapshot)
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}
