//! Coalescing registry for concurrent identical requests.

use std::future::Future;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use serde::{Deserialize, Serialize};
use tracing::debug;

use roam_core::error::{Result, RoamError};

/// Shared handle to the eventual outcome of one in-flight producer.
type FlightHandle<T> = Shared<oneshot::Receiver<Result<T>>>;

/// Registry configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Whether register/join/complete events are logged.
    pub log_events: bool,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self { log_events: true }
    }
}

/// Coalesces concurrent operations that share a key.
///
/// The first caller for a key registers a flight and the producer runs in a
/// detached task; callers arriving while the flight is active join it and
/// await the same shared handle instead of invoking their own producer.
/// Every caller, original or joiner, receives the one outcome: the same
/// success value or the same error.
///
/// The flight deregisters itself when the producer completes, before the
/// outcome is delivered, so a caller arriving after completion always starts
/// a fresh flight and no caller can observe "no flight registered" while a
/// result is still pending for it. Distinct keys never serialize against
/// each other: the registry's map is only locked for entry bookkeeping, and
/// producers execute outside it.
///
/// Cancelling a caller's task only stops that caller from waiting; the
/// producer keeps running for the remaining joiners. The registry does not
/// track joiner counts, so an abandoned producer simply completes and its
/// result is dropped.
///
/// One registry instance per payload type is constructed at the composition
/// root and handed to repositories; keys are namespaced per endpoint so
/// separate registries never contend.
pub struct SingleFlight<T> {
    inflight: Arc<DashMap<String, FlightHandle<T>>>,
    config: FlightConfig,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(FlightConfig::default())
    }

    /// Creates a registry with custom configuration.
    pub fn with_config(config: FlightConfig) -> Self {
        Self {
            inflight: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Runs `producer` under `key`, coalescing concurrent callers.
    ///
    /// If a flight for `key` is already active the producer is not invoked
    /// and the call awaits the active flight's outcome. Errors propagate
    /// verbatim to every caller; a failed flight still deregisters, so the
    /// next call is a fresh attempt rather than a replayed failure.
    ///
    /// Must be called within a Tokio runtime.
    pub async fn run<F, Fut>(&self, key: &str, producer: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let flight = match self.inflight.entry(key.to_owned()) {
            Entry::Occupied(occupied) => {
                let flight = occupied.get().clone();
                if self.config.log_events {
                    debug!(key, "joined in-flight request");
                }
                flight
            }
            Entry::Vacant(vacant) => {
                let (sender, receiver) = oneshot::channel();
                let flight = receiver.shared();
                // Insert before releasing the shard lock so a concurrent
                // caller either joins this flight or waits for the entry.
                vacant.insert(flight.clone());
                if self.config.log_events {
                    debug!(key, "registered request");
                }
                self.launch(key.to_owned(), producer(), sender, flight.clone());
                flight
            }
        };

        let guard = flight.clone();
        match flight.await {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => {
                // The producer task died without delivering. Drop the dead
                // entry (only if it is still ours) so the key recovers.
                self.inflight.remove_if(key, |_, entry| entry.ptr_eq(&guard));
                Err(RoamError::Internal(
                    "coalesced request dropped before completing".into(),
                ))
            }
        }
    }

    /// Spawns the producer detached from every caller, so cancelling any
    /// caller's task cannot abort the shared work.
    fn launch(
        &self,
        key: String,
        producer: impl Future<Output = Result<T>> + Send + 'static,
        sender: oneshot::Sender<Result<T>>,
        flight: FlightHandle<T>,
    ) {
        let inflight = Arc::clone(&self.inflight);
        let log_events = self.config.log_events;
        tokio::spawn(async move {
            let outcome = producer.await;
            // Deregister before delivering: a caller arriving from here on
            // starts a fresh flight instead of joining a finished one.
            inflight.remove_if(&key, |_, entry| entry.ptr_eq(&flight));
            if log_events {
                debug!(key, ok = outcome.is_ok(), "request completed");
            }
            // Send fails only when every interested caller has gone away.
            let _ = sender.send(outcome);
        });
    }

    /// Returns the number of keys currently in flight.
    pub fn len(&self) -> usize {
        self.inflight.len()
    }

    /// Returns true if no flight is active.
    pub fn is_empty(&self) -> bool {
        self.inflight.is_empty()
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
