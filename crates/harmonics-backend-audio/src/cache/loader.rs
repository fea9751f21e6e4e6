//! Instrument loading interface.

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::error::LoadError;

use super::instrument::{Instrument, InstrumentKey, SynthVoice};

/// Produces the resource for one key.
///
/// Implementations for sample libraries live outside this crate; the cache
/// only drives the returned future and records its outcome.
pub trait InstrumentLoader: Send + Sync + 'static {
    /// Starts loading `key`.
    fn load(&self, key: &InstrumentKey) -> BoxFuture<'static, Result<Instrument, LoadError>>;
}

/// Loader for synthesized voices. Sampler keys fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthLoader;

impl InstrumentLoader for SynthLoader {
    fn load(&self, key: &InstrumentKey) -> BoxFuture<'static, Result<Instrument, LoadError>> {
        let outcome = match key {
            InstrumentKey::Synth(family) => Ok(Instrument::Synth(SynthVoice::new(*family))),
            InstrumentKey::Sampler(_) => Err(LoadError::new(
                key.to_string(),
                "no sample library loader configured",
            )),
        };
        future::ready(outcome).boxed()
    }
}
