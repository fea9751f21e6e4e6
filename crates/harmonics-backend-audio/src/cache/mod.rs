//! Instrument resource cache.
//!
//! Each key moves through `Unloaded -> Loading -> Loaded`, or
//! `Loading -> Failed` when its loader errors. A failed key is retried by the
//! next [`InstrumentCache::acquire`]. Loaded resources are never evicted.
//!
//! Concurrent acquires of one key share a single in-flight load: the first
//! caller stores a shared future in the slot table and later callers await a
//! clone of it. The table lock is only held while inspecting or updating a
//! slot, never across an await.

mod instrument;
mod loader;

#[cfg(test)]
mod tests;

pub use instrument::{Instrument, InstrumentKey, SamplerHandle, SynthVoice, SAMPLER_PREFIX};
pub use loader::{InstrumentLoader, SynthLoader};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::error::LoadError;

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<Instrument>, LoadError>>>;

enum Slot {
    Loading(LoadFuture),
    Loaded(Arc<Instrument>),
    Failed(LoadError),
}

/// Observable state of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Never requested.
    Unloaded,
    /// A load is in flight.
    Loading,
    /// Resource available.
    Loaded,
    /// The last load failed.
    Failed(LoadError),
}

/// Result of [`InstrumentCache::acquire_or_placeholder`].
#[derive(Debug, Clone)]
pub enum Acquired {
    /// The cached resource.
    Ready(Arc<Instrument>),
    /// A stand-in voice; the real resource is still loading or failed.
    Placeholder(Instrument),
}

impl Acquired {
    /// The instrument to use right now.
    pub fn instrument(&self) -> &Instrument {
        match self {
            Acquired::Ready(instrument) => instrument,
            Acquired::Placeholder(instrument) => instrument,
        }
    }

    /// Returns true for a stand-in voice.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Acquired::Placeholder(_))
    }
}

/// Outcome of [`InstrumentCache::preload_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Keys that ended up loaded.
    pub loaded: usize,
    /// Load failures, in key order.
    pub failures: Vec<LoadError>,
}

struct Inner {
    loader: Box<dyn InstrumentLoader>,
    slots: Mutex<HashMap<InstrumentKey, Slot>>,
}

impl Inner {
    fn slots(&self) -> MutexGuard<'_, HashMap<InstrumentKey, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, key: &InstrumentKey, outcome: &Result<Arc<Instrument>, LoadError>) {
        let slot = match outcome {
            Ok(instrument) => {
                tracing::info!(key = %key, "instrument loaded");
                Slot::Loaded(Arc::clone(instrument))
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "instrument load failed");
                Slot::Failed(err.clone())
            }
        };
        self.slots().insert(key.clone(), slot);
    }
}

/// Shared handle to the instrument table. Clones refer to the same table.
#[derive(Clone)]
pub struct InstrumentCache {
    inner: Arc<Inner>,
}

impl Default for InstrumentCache {
    fn default() -> Self {
        Self::new(SynthLoader)
    }
}

impl std::fmt::Debug for InstrumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentCache")
            .field("keys", &self.inner.slots().len())
            .finish()
    }
}

impl InstrumentCache {
    /// Creates an empty cache backed by `loader`.
    pub fn new(loader: impl InstrumentLoader) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader: Box::new(loader),
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current state of `key`.
    pub fn state(&self, key: &InstrumentKey) -> SlotState {
        match self.inner.slots().get(key) {
            None => SlotState::Unloaded,
            Some(Slot::Loading(_)) => SlotState::Loading,
            Some(Slot::Loaded(_)) => SlotState::Loaded,
            Some(Slot::Failed(err)) => SlotState::Failed(err.clone()),
        }
    }

    /// Returns the resource for `key`, loading it if needed.
    ///
    /// Callers racing on the same key share one load and receive the same
    /// `Arc`.
    ///
    /// # Errors
    /// The loader's [`LoadError`]; the key is left `Failed` and the next
    /// call retries.
    pub async fn acquire(&self, key: &InstrumentKey) -> Result<Arc<Instrument>, LoadError> {
        let pending = {
            let mut slots = self.inner.slots();
            match slots.get(key) {
                Some(Slot::Loaded(instrument)) => return Ok(Arc::clone(instrument)),
                Some(Slot::Loading(pending)) => {
                    tracing::debug!(key = %key, "joining in-flight load");
                    pending.clone()
                }
                Some(Slot::Failed(_)) | None => self.start_load(&mut slots, key),
            }
        };
        pending.await
    }

    /// Returns the resource if loaded, otherwise a placeholder voice.
    ///
    /// A missing or failed key starts loading in the background on the
    /// current tokio runtime. Outside a runtime the load is left pending and
    /// driven by the next [`acquire`](Self::acquire).
    pub fn acquire_or_placeholder(&self, key: &InstrumentKey) -> Acquired {
        let started = {
            let mut slots = self.inner.slots();
            match slots.get(key) {
                Some(Slot::Loaded(instrument)) => return Acquired::Ready(Arc::clone(instrument)),
                Some(Slot::Loading(_)) => None,
                Some(Slot::Failed(_)) | None => Some(self.start_load(&mut slots, key)),
            }
        };

        if let Some(pending) = started {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(pending);
                }
                Err(_) => tracing::debug!(key = %key, "no runtime; load deferred"),
            }
        }
        tracing::warn!(key = %key, "instrument not ready, using placeholder voice");
        Acquired::Placeholder(Instrument::placeholder())
    }

    /// Loads `keys` one after another.
    ///
    /// `progress` receives `completed / total` after each key resolves,
    /// whether it loaded or failed. Failures do not stop the remaining keys.
    pub async fn preload_all(
        &self,
        keys: &[InstrumentKey],
        mut progress: impl FnMut(f64),
    ) -> PreloadReport {
        let mut report = PreloadReport::default();
        let total = keys.len();
        for (i, key) in keys.iter().enumerate() {
            match self.acquire(key).await {
                Ok(_) => report.loaded += 1,
                Err(err) => report.failures.push(err),
            }
            progress((i + 1) as f64 / total as f64);
        }
        tracing::info!(
            loaded = report.loaded,
            failed = report.failures.len(),
            "preload finished"
        );
        report
    }

    fn start_load(
        &self,
        slots: &mut HashMap<InstrumentKey, Slot>,
        key: &InstrumentKey,
    ) -> LoadFuture {
        tracing::debug!(key = %key, "starting load");
        let load = self.inner.loader.load(key);
        let owner: Weak<Inner> = Arc::downgrade(&self.inner);
        let key_owned = key.clone();

        let pending = async move {
            let outcome = load.await.map(Arc::new);
            if let Some(inner) = owner.upgrade() {
                inner.settle(&key_owned, &outcome);
            }
            outcome
        }
        .boxed()
        .shared();

        slots.insert(key.clone(), Slot::Loading(pending.clone()));
        pending
    }
}
