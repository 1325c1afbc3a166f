//! Scripted host used by the integration tests.
//!
//! A [`ScriptedHost`] answers graphics and audio queries from in-memory data
//! and records every host interaction as a [`HostEvent`], so tests can assert
//! both the resulting record and the order in which the host was driven.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use envprint_core::catalog::{
    parameter_key, GlEnum, DEBUG_RENDERER_INFO, RENDERER, UNMASKED_RENDERER_WEBGL,
    UNMASKED_VENDOR_WEBGL, VENDOR,
};
use envprint_core::{
    AudioContext, AudioDestination, AudioHost, GraphicsContext, GraphicsHost, ParameterValue,
    QueryError,
};

/// A host interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A graphics context was requested with this id.
    CreateContext(String),
    /// An audio context was constructed with this constructor.
    Construct(String),
    /// An audio context was closed.
    Close,
    /// A media element was asked about this MIME type.
    CanPlayType(String),
}

#[derive(Debug, Clone)]
struct GraphicsScript {
    context_ids: Vec<String>,
    debug_info: bool,
    values: HashMap<GlEnum, Result<ParameterValue, String>>,
    extensions: Vec<String>,
}

#[derive(Debug, Clone)]
struct AudioScript {
    constructor: String,
    sample_rate: f64,
    destination: AudioDestination,
    can_play: HashMap<String, String>,
    construct_error: Option<String>,
    close_error: Option<String>,
    yield_on_construct: bool,
}

/// In-memory host with builder-style configuration.
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    graphics: Option<GraphicsScript>,
    audio: Option<AudioScript>,
    events: Rc<RefCell<Vec<HostEvent>>>,
    open: Rc<Cell<usize>>,
}

impl ScriptedHost {
    /// A desktop host with WebGL, the debug renderer extension and an
    /// `AudioContext` at 48 kHz that plays every probed codec.
    pub fn desktop() -> Self {
        let mut values = HashMap::new();
        values.insert(VENDOR, Ok(ParameterValue::from("WebKit")));
        values.insert(RENDERER, Ok(ParameterValue::from("WebKit WebGL")));
        values.insert(UNMASKED_VENDOR_WEBGL, Ok(ParameterValue::from("Acme GPU Co.")));
        values.insert(
            UNMASKED_RENDERER_WEBGL,
            Ok(ParameterValue::from("Acme Graphics 9000")),
        );
        let parameters = [
            ("VERSION", ParameterValue::from("WebGL 1.0")),
            ("SHADING_LANGUAGE_VERSION", ParameterValue::from("WebGL GLSL ES 1.0")),
            ("MAX_TEXTURE_SIZE", ParameterValue::Integer(16384)),
            ("MAX_VIEWPORT_DIMS", ParameterValue::IntArray(vec![16384, 16384])),
            ("MAX_TEXTURE_IMAGE_UNITS", ParameterValue::Integer(16)),
            ("MAX_COMBINED_TEXTURE_IMAGE_UNITS", ParameterValue::Integer(32)),
            ("MAX_VERTEX_TEXTURE_IMAGE_UNITS", ParameterValue::Integer(16)),
            ("MAX_RENDERBUFFER_SIZE", ParameterValue::Integer(16384)),
        ];
        for (name, value) in parameters {
            if let Some(key) = parameter_key(name) {
                values.insert(key, Ok(value));
            }
        }

        let can_play = [
            ("audio/mpeg", "probably"),
            ("audio/ogg", "maybe"),
            ("audio/wav", "probably"),
        ]
        .into_iter()
        .map(|(mime, answer)| (mime.to_string(), answer.to_string()))
        .collect();

        Self {
            graphics: Some(GraphicsScript {
                context_ids: vec!["webgl".to_string(), "experimental-webgl".to_string()],
                debug_info: true,
                values,
                extensions: vec![
                    "WEBGL_depth_texture".to_string(),
                    "OES_texture_float".to_string(),
                    DEBUG_RENDERER_INFO.to_string(),
                ],
            }),
            audio: Some(AudioScript {
                constructor: "AudioContext".to_string(),
                sample_rate: 48000.0,
                destination: AudioDestination {
                    max_channel_count: 2,
                    channel_count: 2,
                },
                can_play,
                construct_error: None,
                close_error: None,
                yield_on_construct: false,
            }),
            events: Rc::new(RefCell::new(Vec::new())),
            open: Rc::new(Cell::new(0)),
        }
    }

    /// Removes graphics support entirely.
    pub fn without_graphics(mut self) -> Self {
        self.graphics = None;
        self
    }

    /// Removes every audio context constructor.
    pub fn without_audio(mut self) -> Self {
        self.audio = None;
        self
    }

    /// Restricts the context ids the host accepts.
    pub fn with_context_ids(mut self, ids: &[&str]) -> Self {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.context_ids = ids.iter().map(|id| id.to_string()).collect();
        }
        self
    }

    /// Hides the debug renderer extension.
    pub fn without_debug_info(mut self) -> Self {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.debug_info = false;
            graphics.extensions.retain(|ext| ext != DEBUG_RENDERER_INFO);
        }
        self
    }

    /// Sets the answer for a named parameter.
    pub fn with_parameter(mut self, name: &str, value: ParameterValue) -> Self {
        if let (Some(graphics), Some(key)) = (self.graphics.as_mut(), parameter_key(name)) {
            graphics.values.insert(key, Ok(value));
        }
        self
    }

    /// Makes the query for a named parameter fail.
    pub fn failing_parameter(mut self, name: &str) -> Self {
        if let (Some(graphics), Some(key)) = (self.graphics.as_mut(), parameter_key(name)) {
            graphics
                .values
                .insert(key, Err(format!("{} lost context", name)));
        }
        self
    }

    /// Makes both vendor queries fail.
    pub fn failing_vendor(mut self) -> Self {
        if let Some(graphics) = self.graphics.as_mut() {
            for key in [VENDOR, UNMASKED_VENDOR_WEBGL] {
                graphics
                    .values
                    .insert(key, Err("vendor unavailable".to_string()));
            }
        }
        self
    }

    /// Sets the extensions the context reports.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.extensions = extensions.iter().map(|e| e.to_string()).collect();
        }
        self
    }

    /// Renames the audio constructor (e.g. `webkitAudioContext`).
    pub fn with_constructor(mut self, name: &str) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.constructor = name.to_string();
        }
        self
    }

    /// Sets the audio context sample rate.
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.sample_rate = sample_rate;
        }
        self
    }

    /// Sets the destination channel limits.
    pub fn with_channels(mut self, max_channel_count: u32, channel_count: u32) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.destination = AudioDestination {
                max_channel_count,
                channel_count,
            };
        }
        self
    }

    /// Sets the `canPlayType` answer for a MIME type.
    pub fn with_can_play(mut self, mime: &str, answer: &str) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.can_play.insert(mime.to_string(), answer.to_string());
        }
        self
    }

    /// Makes audio context construction fail.
    pub fn failing_construct(mut self, message: &str) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.construct_error = Some(message.to_string());
        }
        self
    }

    /// Makes closing an audio context fail.
    pub fn failing_close(mut self, message: &str) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.close_error = Some(message.to_string());
        }
        self
    }

    /// Yields to the runtime once while constructing an audio context.
    pub fn yielding(mut self) -> Self {
        if let Some(audio) = self.audio.as_mut() {
            audio.yield_on_construct = true;
        }
        self
    }

    /// Interactions so far, in call order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Audio contexts opened and not yet closed.
    pub fn open_audio_contexts(&self) -> usize {
        self.open.get()
    }

    fn record(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Graphics context handed out by a [`ScriptedHost`].
#[derive(Debug, Clone)]
pub struct ScriptedGraphicsContext {
    script: GraphicsScript,
}

impl GraphicsHost for ScriptedHost {
    type Context = ScriptedGraphicsContext;

    fn create_context(&self, context_id: &str) -> Option<ScriptedGraphicsContext> {
        self.record(HostEvent::CreateContext(context_id.to_string()));
        let graphics = self.graphics.as_ref()?;
        graphics
            .context_ids
            .iter()
            .any(|id| id == context_id)
            .then(|| ScriptedGraphicsContext {
                script: graphics.clone(),
            })
    }
}

impl GraphicsContext for ScriptedGraphicsContext {
    fn get_parameter(&self, key: GlEnum) -> Result<ParameterValue, QueryError> {
        match self.script.values.get(&key) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(QueryError::new(message.clone())),
            None => Ok(ParameterValue::Null),
        }
    }

    fn get_extension(&self, name: &str) -> bool {
        if name == DEBUG_RENDERER_INFO {
            return self.script.debug_info;
        }
        self.script.extensions.iter().any(|ext| ext == name)
    }

    fn supported_extensions(&self) -> Vec<String> {
        self.script.extensions.clone()
    }
}

/// Audio context handed out by a [`ScriptedHost`].
#[derive(Debug)]
pub struct ScriptedAudioContext {
    sample_rate: f64,
    destination: AudioDestination,
    events: Rc<RefCell<Vec<HostEvent>>>,
    open: Rc<Cell<usize>>,
    close_error: Option<String>,
    closed: bool,
}

impl AudioHost for ScriptedHost {
    type Context = ScriptedAudioContext;

    fn has_constructor(&self, name: &str) -> bool {
        self.audio
            .as_ref()
            .is_some_and(|audio| audio.constructor == name)
    }

    async fn construct(&self, name: &str) -> Result<ScriptedAudioContext, QueryError> {
        let audio = self
            .audio
            .as_ref()
            .filter(|audio| audio.constructor == name)
            .ok_or_else(|| QueryError::new(format!("{} is not a constructor", name)))?;
        self.record(HostEvent::Construct(name.to_string()));
        if audio.yield_on_construct {
            tokio::task::yield_now().await;
        }
        if let Some(message) = &audio.construct_error {
            return Err(QueryError::new(message.clone()));
        }

        self.open.set(self.open.get() + 1);
        Ok(ScriptedAudioContext {
            sample_rate: audio.sample_rate,
            destination: audio.destination,
            events: Rc::clone(&self.events),
            open: Rc::clone(&self.open),
            close_error: audio.close_error.clone(),
            closed: false,
        })
    }

    fn can_play_type(&self, mime: &str) -> String {
        self.record(HostEvent::CanPlayType(mime.to_string()));
        self.audio
            .as_ref()
            .and_then(|audio| audio.can_play.get(mime).cloned())
            .unwrap_or_default()
    }
}

impl AudioContext for ScriptedAudioContext {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn destination(&self) -> AudioDestination {
        self.destination
    }

    fn close(&mut self) -> Result<(), QueryError> {
        if self.closed {
            return Err(QueryError::new("context already closed"));
        }
        self.closed = true;
        self.events.borrow_mut().push(HostEvent::Close);
        if let Some(message) = &self.close_error {
            return Err(QueryError::new(message.clone()));
        }
        self.open.set(self.open.get().saturating_sub(1));
        Ok(())
    }
}
