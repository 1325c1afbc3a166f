//! Host backed by profile data.
//!
//! A [`HostProfile`] describes what a host environment answers to every query
//! the collectors make. [`ProfileHost`] replays it through the [`crate::host`]
//! traits, which lets recorded environments be fingerprinted outside a browser.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    parameter_name, GlEnum, DEBUG_RENDERER_INFO, GRAPHICS_CONTEXT_IDS, RENDERER,
    UNMASKED_RENDERER_WEBGL, UNMASKED_VENDOR_WEBGL, VENDOR,
};
use crate::error::{ProfileError, QueryError};
use crate::host::{AudioContext, AudioDestination, AudioHost, GraphicsContext, GraphicsHost};
use crate::record::ParameterValue;

/// Built-in profiles as `(name, JSON source)`.
const BUILTIN_PROFILES: &[(&str, &str)] = &[
    (
        "windows-nvidia",
        include_str!("../profiles/windows-nvidia.json"),
    ),
    (
        "macos-apple-m1",
        include_str!("../profiles/macos-apple-m1.json"),
    ),
    (
        "linux-mesa-masked",
        include_str!("../profiles/linux-mesa-masked.json"),
    ),
    ("headless", include_str!("../profiles/headless.json")),
];

/// A recorded host environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostProfile {
    /// Profile name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Graphics subsystem; absent when the host has no graphics context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<GraphicsProfile>,
    /// Audio subsystem; absent when the host has no audio context constructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioProfile>,
}

/// Recorded graphics answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphicsProfile {
    /// Context ids the host can create.
    #[serde(default = "default_context_ids")]
    pub context_ids: Vec<String>,
    /// Generic `VENDOR` answer.
    pub vendor: String,
    /// Generic `RENDERER` answer.
    pub renderer: String,
    /// Unmasked identity; absent when `WEBGL_debug_renderer_info` is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmasked: Option<UnmaskedIdentity>,
    /// Parameter answers by catalog name. Missing entries fail when queried.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterValue>,
    /// Supported extension ids.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Vendor/renderer exposed by `WEBGL_debug_renderer_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnmaskedIdentity {
    /// `UNMASKED_VENDOR_WEBGL`
    pub vendor: String,
    /// `UNMASKED_RENDERER_WEBGL`
    pub renderer: String,
}

/// Recorded audio answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioProfile {
    /// Name of the constructor the host exposes.
    #[serde(default = "default_constructor")]
    pub constructor: String,
    /// Context sample rate in Hz.
    pub sample_rate: f64,
    /// Destination maximum channel count.
    pub max_channel_count: u32,
    /// Destination channel count.
    pub channel_count: u32,
    /// `canPlayType` answers by MIME type; missing entries answer `""`.
    #[serde(default)]
    pub can_play_type: IndexMap<String, String>,
}

fn default_context_ids() -> Vec<String> {
    GRAPHICS_CONTEXT_IDS.iter().map(|s| s.to_string()).collect()
}

fn default_constructor() -> String {
    "AudioContext".to_string()
}

impl HostProfile {
    /// Parses a profile from JSON text.
    pub fn from_json(source: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a profile from YAML text.
    pub fn from_yaml(source: &str) -> Result<Self, ProfileError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Loads a profile file, choosing the format by extension.
pub fn load_profile(path: &Path) -> Result<HostProfile, ProfileError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let read = |path: &Path| {
        std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_deref() {
        Some("json") => HostProfile::from_json(&read(path)?),
        Some("yaml") | Some("yml") => HostProfile::from_yaml(&read(path)?),
        _ => Err(ProfileError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Names of the built-in profiles.
pub fn builtin_profile_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_PROFILES.iter().map(|(name, _)| *name)
}

/// Returns a built-in profile by name.
pub fn builtin_profile(name: &str) -> Result<HostProfile, ProfileError> {
    let (_, source) = BUILTIN_PROFILES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .ok_or_else(|| ProfileError::UnknownBuiltin(name.to_string()))?;
    HostProfile::from_json(source)
}

/// Returns every built-in profile.
pub fn builtin_profiles() -> Result<Vec<HostProfile>, ProfileError> {
    BUILTIN_PROFILES
        .iter()
        .map(|(_, source)| HostProfile::from_json(source))
        .collect()
}

/// A host that answers from a [`HostProfile`].
#[derive(Debug)]
pub struct ProfileHost {
    profile: HostProfile,
    open_audio: Rc<Cell<usize>>,
}

impl ProfileHost {
    /// Creates a host replaying `profile`.
    pub fn new(profile: HostProfile) -> Self {
        Self {
            profile,
            open_audio: Rc::new(Cell::new(0)),
        }
    }

    /// The replayed profile.
    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    /// Number of audio contexts opened and not yet closed.
    pub fn open_audio_contexts(&self) -> usize {
        self.open_audio.get()
    }
}

/// Graphics context created by a [`ProfileHost`].
#[derive(Debug, Clone)]
pub struct ProfileGraphicsContext {
    graphics: GraphicsProfile,
}

impl GraphicsHost for ProfileHost {
    type Context = ProfileGraphicsContext;

    fn create_context(&self, context_id: &str) -> Option<ProfileGraphicsContext> {
        let graphics = self.profile.graphics.as_ref()?;
        graphics
            .context_ids
            .iter()
            .any(|id| id == context_id)
            .then(|| ProfileGraphicsContext {
                graphics: graphics.clone(),
            })
    }
}

impl GraphicsContext for ProfileGraphicsContext {
    fn get_parameter(&self, key: GlEnum) -> Result<ParameterValue, QueryError> {
        let unmasked = || {
            self.graphics
                .unmasked
                .as_ref()
                .ok_or_else(|| QueryError::new(format!("invalid enum {:#06x}", key)))
        };
        match key {
            VENDOR => Ok(ParameterValue::from(self.graphics.vendor.as_str())),
            RENDERER => Ok(ParameterValue::from(self.graphics.renderer.as_str())),
            UNMASKED_VENDOR_WEBGL => Ok(ParameterValue::from(unmasked()?.vendor.as_str())),
            UNMASKED_RENDERER_WEBGL => Ok(ParameterValue::from(unmasked()?.renderer.as_str())),
            _ => {
                let name = parameter_name(key)
                    .ok_or_else(|| QueryError::new(format!("invalid enum {:#06x}", key)))?;
                self.graphics
                    .parameters
                    .get(name)
                    .cloned()
                    .ok_or_else(|| QueryError::new(format!("{} is not available", name)))
            }
        }
    }

    fn get_extension(&self, name: &str) -> bool {
        if name == DEBUG_RENDERER_INFO {
            return self.graphics.unmasked.is_some();
        }
        self.graphics.extensions.iter().any(|ext| ext == name)
    }

    fn supported_extensions(&self) -> Vec<String> {
        let mut extensions = self.graphics.extensions.clone();
        if self.graphics.unmasked.is_some() && !extensions.iter().any(|e| e == DEBUG_RENDERER_INFO)
        {
            extensions.push(DEBUG_RENDERER_INFO.to_string());
        }
        extensions
    }
}

/// Audio context opened by a [`ProfileHost`].
#[derive(Debug)]
pub struct ProfileAudioContext {
    sample_rate: f64,
    destination: AudioDestination,
    open: Rc<Cell<usize>>,
    closed: bool,
}

impl AudioHost for ProfileHost {
    type Context = ProfileAudioContext;

    fn has_constructor(&self, name: &str) -> bool {
        self.profile
            .audio
            .as_ref()
            .is_some_and(|audio| audio.constructor == name)
    }

    async fn construct(&self, name: &str) -> Result<ProfileAudioContext, QueryError> {
        let audio = self
            .profile
            .audio
            .as_ref()
            .filter(|audio| audio.constructor == name)
            .ok_or_else(|| QueryError::new(format!("{} is not a constructor", name)))?;

        self.open_audio.set(self.open_audio.get() + 1);
        debug!(
            "profile '{}' opened audio context ({} open)",
            self.profile.name,
            self.open_audio.get()
        );
        Ok(ProfileAudioContext {
            sample_rate: audio.sample_rate,
            destination: AudioDestination {
                max_channel_count: audio.max_channel_count,
                channel_count: audio.channel_count,
            },
            open: Rc::clone(&self.open_audio),
            closed: false,
        })
    }

    fn can_play_type(&self, mime: &str) -> String {
        self.profile
            .audio
            .as_ref()
            .and_then(|audio| audio.can_play_type.get(mime).cloned())
            .unwrap_or_default()
    }
}

impl AudioContext for ProfileAudioContext {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn destination(&self) -> AudioDestination {
        self.destination
    }

    fn close(&mut self) -> Result<(), QueryError> {
        if self.closed {
            return Err(QueryError::new("cannot close a closed AudioContext"));
        }
        self.closed = true;
        self.open.set(self.open.get().saturating_sub(1));
        Ok(())
    }
}
