//! Traits the host environment implements.
//!
//! A host is whatever provides the graphics and audio subsystems: a browser
//! binding, a [`crate::profile::ProfileHost`] replaying recorded data, or a
//! test double. Collection is single-threaded and cooperative, so none of
//! these traits require `Send`.

use crate::catalog::GlEnum;
use crate::error::QueryError;
use crate::record::ParameterValue;

/// A host able to create graphics rendering contexts.
pub trait GraphicsHost {
    /// The rendering context type.
    type Context: GraphicsContext;

    /// Creates a context for `context_id` (e.g. `"webgl"`).
    ///
    /// Returns `None` when the host cannot provide that kind of context.
    fn create_context(&self, context_id: &str) -> Option<Self::Context>;
}

/// A graphics rendering context.
pub trait GraphicsContext {
    /// Queries a single parameter.
    fn get_parameter(&self, key: GlEnum) -> Result<ParameterValue, QueryError>;

    /// Enables an extension, returning whether the host provides it.
    fn get_extension(&self, name: &str) -> bool;

    /// Lists every extension the context supports.
    fn supported_extensions(&self) -> Vec<String>;
}

/// Channel limits of an audio context's destination node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioDestination {
    /// Maximum number of channels the destination accepts.
    pub max_channel_count: u32,
    /// Channels currently in use.
    pub channel_count: u32,
}

/// A host able to open audio contexts and answer codec queries.
#[allow(async_fn_in_trait)]
pub trait AudioHost {
    /// The audio context type.
    type Context: AudioContext;

    /// Returns true if an audio context constructor named `name` exists.
    fn has_constructor(&self, name: &str) -> bool;

    /// Opens a new audio context with the named constructor.
    async fn construct(&self, name: &str) -> Result<Self::Context, QueryError>;

    /// Asks a transient media element whether it can play `mime`.
    ///
    /// Browsers answer `""`, `"maybe"` or `"probably"`.
    fn can_play_type(&self, mime: &str) -> String;
}

/// An open audio context.
pub trait AudioContext {
    /// Sample rate in Hz.
    fn sample_rate(&self) -> f64;

    /// The destination node's channel limits.
    fn destination(&self) -> AudioDestination;

    /// Releases the context. Called exactly once per opened context.
    fn close(&mut self) -> Result<(), QueryError>;
}
