// Stale-while-revalidate flow shared by every data screen.
// Shows cached data at once, fetches fresh data, writes it back on success.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::{FALLBACK_LOAD_MESSAGE, JournalError, Result};
use crate::state::{DataSink, LoadStatus};
use crate::storage::lock;

/// How a flow ended.
#[derive(Debug)]
pub enum FlowOutcome {
    /// Fresh data was published and cached.
    Refreshed,
    /// The fetch failed; previously shown data was left alone.
    Failed(JournalError),
    /// The flow was discarded before the fetch settled; nothing was touched.
    Discarded,
}

/// Discard flag shared between a running flow and its owner.
///
/// The flow applies its result while holding the flag's lock, so once
/// `discard` returns the flow can no longer touch its sink or the cache.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    discarded: Arc<Mutex<bool>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the flow from touching its sink or the cache.
    ///
    /// Blocks while the flow is applying a result it already received.
    pub fn discard(&self) {
        *lock(&self.discarded) = true;
    }

    #[cfg(test)]
    pub fn is_discarded(&self) -> bool {
        *lock(&self.discarded)
    }

    /// Run `apply` unless discarded, holding the flag for the whole call.
    fn apply<R>(&self, apply: impl FnOnce() -> R) -> Option<R> {
        let discarded = lock(&self.discarded);
        if *discarded {
            return None;
        }
        Some(apply())
    }
}

/// Publish the stale cached value (if any), then mark the sink as loading.
///
/// Returns whether stale data was shown.
pub fn prime<T, S>(store: &CacheStore, key: &str, sink: &S) -> bool
where
    T: DeserializeOwned,
    S: DataSink<T> + ?Sized,
{
    let stale = store.get_stale::<T>(key);
    let had_stale = stale.is_some();
    if let Some(data) = stale {
        sink.publish(data);
    }
    sink.set_status(LoadStatus::Loading);
    had_stale
}

/// Await the fetch and apply its result to the cache and the sink.
pub async fn settle<T, S, Fut>(
    store: &CacheStore,
    key: &str,
    ttl: Duration,
    sink: &S,
    lifecycle: &Lifecycle,
    fetch: Fut,
) -> FlowOutcome
where
    T: Serialize + Clone,
    S: DataSink<T> + ?Sized,
    Fut: Future<Output = Result<T>>,
{
    let result = fetch.await;

    let applied = lifecycle.apply(|| match result {
        Ok(data) => {
            sink.publish(data.clone());
            store.set(key, &data, ttl);
            sink.set_status(LoadStatus::Success);
            debug!(key, "flow refreshed");
            FlowOutcome::Refreshed
        }
        Err(err) => {
            sink.set_error(err.user_message(FALLBACK_LOAD_MESSAGE));
            sink.set_status(LoadStatus::Error);
            warn!(key, error = %err, "flow refresh failed");
            FlowOutcome::Failed(err)
        }
    });

    applied.unwrap_or_else(|| {
        debug!(key, "flow discarded, dropping result");
        FlowOutcome::Discarded
    })
}

/// Run the whole flow inline.
pub async fn revalidate<T, S, Fut>(
    store: &CacheStore,
    key: &str,
    ttl: Duration,
    sink: &S,
    fetch: Fut,
) -> FlowOutcome
where
    T: Serialize + DeserializeOwned + Clone,
    S: DataSink<T> + ?Sized,
    Fut: Future<Output = Result<T>>,
{
    prime::<T, S>(store, key, sink);
    settle(store, key, ttl, sink, &Lifecycle::new(), fetch).await
}

/// A flow running on the tokio runtime.
///
/// Discarding does not cancel the request; it only guarantees the result
/// is dropped.
#[derive(Debug)]
pub struct FlowHandle {
    lifecycle: Lifecycle,
    // Only awaited by tests; the app lets flows run detached.
    #[cfg_attr(not(test), allow(dead_code))]
    task: JoinHandle<FlowOutcome>,
}

impl FlowHandle {
    /// Start a flow. The stale value is published before this returns,
    /// and before `fetch` is first polled.
    pub fn spawn<T, S, Fut>(
        store: CacheStore,
        key: impl Into<String>,
        ttl: Duration,
        sink: S,
        fetch: Fut,
    ) -> Self
    where
        T: Serialize + DeserializeOwned + Clone + Send + 'static,
        S: DataSink<T> + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let key = key.into();
        prime::<T, S>(&store, &key, &sink);

        let lifecycle = Lifecycle::new();
        let flow_lifecycle = lifecycle.clone();
        let task = tokio::spawn(async move {
            settle(&store, &key, ttl, &sink, &flow_lifecycle, fetch).await
        });

        Self { lifecycle, task }
    }

    pub fn discard(&self) {
        self.lifecycle.discard();
    }

    #[cfg(test)]
    pub fn is_discarded(&self) -> bool {
        self.lifecycle.is_discarded()
    }

    /// Wait for the flow to settle.
    #[cfg(test)]
    pub async fn outcome(self) -> FlowOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "flow task did not complete");
                FlowOutcome::Discarded
            }
        }
    }
}
