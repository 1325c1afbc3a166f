//! Audio capability collector.

use log::{debug, warn};

use crate::catalog::{AUDIO_CODECS, AUDIO_CONTEXT_CONSTRUCTORS};
use crate::error::{Feature, FingerprintError};
use crate::host::{AudioContext, AudioHost};
use crate::record::{AudioRecord, CodecSupport};

/// Collects an [`AudioRecord`] from the host.
///
/// The audio context is closed before this returns, on success and on every
/// error path.
///
/// # Errors
/// * `UnsupportedFeature(AudioContext)` if no constructor in
///   [`AUDIO_CONTEXT_CONSTRUCTORS`] exists
/// * `Query` if the host fails to construct the context
pub async fn collect_audio<H: AudioHost>(host: &H) -> Result<AudioRecord, FingerprintError> {
    let constructor = AUDIO_CONTEXT_CONSTRUCTORS
        .iter()
        .copied()
        .find(|name| host.has_constructor(name))
        .ok_or(FingerprintError::UnsupportedFeature(Feature::AudioContext))?;

    let context = host
        .construct(constructor)
        .await
        .map_err(|err| FingerprintError::query(format!("{} construction failed", constructor), err))?;
    debug!("opened audio context via {}", constructor);

    let (sample_rate, destination) = {
        let scoped = ScopedContext::new(context);
        (scoped.get().sample_rate(), scoped.get().destination())
    };

    let mut codecs = CodecSupport::default();
    for codec in AUDIO_CODECS {
        let response = host.can_play_type(codec.mime);
        codecs.set(codec.name, is_playable(&response));
    }

    Ok(AudioRecord {
        sample_rate,
        max_channel_count: destination.max_channel_count,
        channel_count: destination.channel_count,
        codecs,
    })
}

/// Interprets a `canPlayType` answer.
///
/// Strips the first `"no"` and treats any remaining text as supported, so
/// both `"maybe"` and `"probably"` count as playable.
pub fn is_playable(response: &str) -> bool {
    !response.replacen("no", "", 1).is_empty()
}

/// Closes the wrapped context when dropped.
struct ScopedContext<C: AudioContext> {
    context: C,
}

impl<C: AudioContext> ScopedContext<C> {
    fn new(context: C) -> Self {
        Self { context }
    }

    fn get(&self) -> &C {
        &self.context
    }
}

impl<C: AudioContext> Drop for ScopedContext<C> {
    fn drop(&mut self) {
        match self.context.close() {
            Ok(()) => debug!("closed audio context"),
            Err(err) => warn!("failed to close audio context: {}", err),
        }
    }
}
