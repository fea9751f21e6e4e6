//! Tests for the instrument cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use pretty_assertions::assert_eq;

use crate::error::LoadError;
use crate::synthesis::InstrumentFamily;

use super::*;

/// Loader that counts calls, yields once before resolving, and fails for
/// the sampler named "broken".
#[derive(Clone, Default)]
struct CountingLoader {
    calls: Arc<AtomicUsize>,
}

impl CountingLoader {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InstrumentLoader for CountingLoader {
    fn load(&self, key: &InstrumentKey) -> BoxFuture<'static, Result<Instrument, LoadError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = key.clone();
        async move {
            tokio::task::yield_now().await;
            match &key {
                InstrumentKey::Sampler(name) if name == "broken" => {
                    Err(LoadError::new(key.to_string(), "sample library unreachable"))
                }
                InstrumentKey::Sampler(name) => Ok(Instrument::Sampler(SamplerHandle::new(name.clone()))),
                InstrumentKey::Synth(family) => Ok(Instrument::Synth(SynthVoice::new(*family))),
            }
        }
        .boxed()
    }
}

/// Loader whose first call fails and later calls succeed.
#[derive(Clone, Default)]
struct FlakyLoader {
    calls: Arc<AtomicUsize>,
}

impl InstrumentLoader for FlakyLoader {
    fn load(&self, key: &InstrumentKey) -> BoxFuture<'static, Result<Instrument, LoadError>> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        let key = key.clone();
        async move {
            if attempt == 0 {
                Err(LoadError::new(key.to_string(), "timed out"))
            } else {
                Ok(Instrument::Sampler(SamplerHandle::new("violin")))
            }
        }
        .boxed()
    }
}

// ============================================================================
// Acquire
// ============================================================================

#[tokio::test]
async fn test_concurrent_acquires_share_one_load() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::sampler("violin");

    let (a, b) = tokio::join!(cache.acquire(&key), cache.acquire(&key));
    let a = a.unwrap();
    let b = b.unwrap();

    assert_eq!(loader.calls(), 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.state(&key), SlotState::Loaded);
}

#[tokio::test]
async fn test_loaded_key_is_not_reloaded() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::Synth(InstrumentFamily::Piano);

    let first = cache.acquire(&key).await.unwrap();
    let second = cache.acquire(&key).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.calls(), 1);
    assert_eq!(*first, Instrument::Synth(SynthVoice::new(InstrumentFamily::Piano)));
}

#[tokio::test]
async fn test_clones_share_the_table() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let other = cache.clone();
    let key = InstrumentKey::sampler("cello");

    let a = cache.acquire(&key).await.unwrap();
    let b = other.acquire(&key).await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.calls(), 1);
}

#[tokio::test]
async fn test_failed_key_is_retried() {
    let loader = FlakyLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::sampler("violin");

    let err = cache.acquire(&key).await.unwrap_err();
    assert_eq!(err.key, "sampler:violin");
    assert!(matches!(cache.state(&key), SlotState::Failed(_)));

    let instrument = cache.acquire(&key).await.unwrap();
    assert_eq!(*instrument, Instrument::Sampler(SamplerHandle::new("violin")));
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.state(&key), SlotState::Loaded);
}

#[tokio::test]
async fn test_synth_loader_rejects_samplers() {
    let cache = InstrumentCache::default();
    let err = cache.acquire(&InstrumentKey::sampler("violin")).await.unwrap_err();
    assert!(err.message.contains("no sample library"));

    let fm = cache.acquire(&InstrumentKey::Synth(InstrumentFamily::Fm)).await.unwrap();
    assert_eq!(fm.voice().family(), InstrumentFamily::Fm);
}

// ============================================================================
// Placeholder
// ============================================================================

#[tokio::test]
async fn test_placeholder_while_loading() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::sampler("violin");

    let first = cache.acquire_or_placeholder(&key);
    assert!(first.is_placeholder());
    assert_eq!(*first.instrument(), Instrument::placeholder());
    assert_eq!(cache.state(&key), SlotState::Loading);

    // A second request while loading neither blocks nor starts another load.
    assert!(cache.acquire_or_placeholder(&key).is_placeholder());
    assert_eq!(loader.calls(), 1);

    let loaded = cache.acquire(&key).await.unwrap();
    assert_eq!(loader.calls(), 1);
    assert_eq!(*loaded, Instrument::Sampler(SamplerHandle::new("violin")));

    let ready = cache.acquire_or_placeholder(&key);
    assert!(!ready.is_placeholder());
}

#[tokio::test]
async fn test_background_load_settles_on_its_own() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::Synth(InstrumentFamily::Metal);

    assert!(cache.acquire_or_placeholder(&key).is_placeholder());
    for _ in 0..10 {
        if cache.state(&key) == SlotState::Loaded {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(cache.state(&key), SlotState::Loaded);
    assert_eq!(loader.calls(), 1);
}

#[test]
fn test_placeholder_without_runtime_defers_load() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let key = InstrumentKey::sampler("harp");

    assert!(cache.acquire_or_placeholder(&key).is_placeholder());
    assert_eq!(cache.state(&key), SlotState::Loading);
    assert_eq!(loader.calls(), 1);
}

// ============================================================================
// Preload
// ============================================================================

#[tokio::test]
async fn test_preload_reports_progress_and_continues_past_failures() {
    let loader = CountingLoader::default();
    let cache = InstrumentCache::new(loader.clone());
    let keys = vec![
        InstrumentKey::Synth(InstrumentFamily::Fm),
        InstrumentKey::sampler("broken"),
        InstrumentKey::sampler("violin"),
        InstrumentKey::Synth(InstrumentFamily::Fm),
    ];

    let mut progress = Vec::new();
    let report = cache.preload_all(&keys, |p| progress.push(p)).await;

    assert_eq!(progress, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(report.loaded, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].key, "sampler:broken");
    assert_eq!(cache.state(&keys[2]), SlotState::Loaded);
    // The duplicate key was already cached.
    assert_eq!(loader.calls(), 3);
}

#[tokio::test]
async fn test_preload_empty_list() {
    let cache = InstrumentCache::default();
    let mut calls = 0;
    let report = cache.preload_all(&[], |_| calls += 1).await;
    assert_eq!(report, PreloadReport::default());
    assert_eq!(calls, 0);
}
