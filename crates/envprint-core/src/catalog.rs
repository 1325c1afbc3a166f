//! Static query tables for the collectors.
//!
//! The enumerated parameter, extension and codec lists live here as data so
//! hosts (real or mocked) can be driven by name or by query key.

/// A WebGL enum value passed to `getParameter`.
pub type GlEnum = u32;

/// Context ids tried in order when creating a graphics context.
pub const GRAPHICS_CONTEXT_IDS: &[&str] = &["webgl", "experimental-webgl"];

/// Extension exposing the unmasked vendor/renderer strings.
pub const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

/// `UNMASKED_VENDOR_WEBGL` from `WEBGL_debug_renderer_info`.
pub const UNMASKED_VENDOR_WEBGL: GlEnum = 0x9245;

/// `UNMASKED_RENDERER_WEBGL` from `WEBGL_debug_renderer_info`.
pub const UNMASKED_RENDERER_WEBGL: GlEnum = 0x9246;

/// Generic `VENDOR` parameter.
pub const VENDOR: GlEnum = 0x1F00;

/// Generic `RENDERER` parameter.
pub const RENDERER: GlEnum = 0x1F01;

/// A named capability parameter and its query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Name used as the record key.
    pub name: &'static str,
    /// Query key passed to the context.
    pub key: GlEnum,
}

/// Capability parameters recorded for every graphics fingerprint, in record order.
pub const GRAPHICS_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        name: "VERSION",
        key: 0x1F02,
    },
    ParameterSpec {
        name: "SHADING_LANGUAGE_VERSION",
        key: 0x8B8C,
    },
    ParameterSpec {
        name: "MAX_TEXTURE_SIZE",
        key: 0x0D33,
    },
    ParameterSpec {
        name: "MAX_VIEWPORT_DIMS",
        key: 0x0D3A,
    },
    ParameterSpec {
        name: "MAX_TEXTURE_IMAGE_UNITS",
        key: 0x8872,
    },
    ParameterSpec {
        name: "MAX_COMBINED_TEXTURE_IMAGE_UNITS",
        key: 0x8B4D,
    },
    ParameterSpec {
        name: "MAX_VERTEX_TEXTURE_IMAGE_UNITS",
        key: 0x8B4C,
    },
    ParameterSpec {
        name: "MAX_RENDERBUFFER_SIZE",
        key: 0x84E8,
    },
];

/// Optional extensions whose presence is recorded, in record order.
pub const GRAPHICS_EXTENSIONS: &[&str] = &[
    "WEBGL_compressed_texture_s3tc",
    "WEBGL_depth_texture",
    "OES_texture_float",
    "OES_texture_half_float",
    "EXT_texture_filter_anisotropic",
];

/// Audio context constructor names, first one present wins.
pub const AUDIO_CONTEXT_CONSTRUCTORS: &[&str] = &["AudioContext", "webkitAudioContext"];

/// A codec probed through a media element's `canPlayType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSpec {
    /// Record key.
    pub name: &'static str,
    /// MIME type passed to `canPlayType`.
    pub mime: &'static str,
}

/// Codecs probed for every audio fingerprint, in record order.
pub const AUDIO_CODECS: &[CodecSpec] = &[
    CodecSpec {
        name: "mp3",
        mime: "audio/mpeg",
    },
    CodecSpec {
        name: "ogg",
        mime: "audio/ogg",
    },
    CodecSpec {
        name: "wav",
        mime: "audio/wav",
    },
];

/// Looks up the query key of a named parameter.
///
/// Covers the catalog parameters plus the vendor/renderer keys.
pub fn parameter_key(name: &str) -> Option<GlEnum> {
    match name {
        "VENDOR" => Some(VENDOR),
        "RENDERER" => Some(RENDERER),
        "UNMASKED_VENDOR_WEBGL" => Some(UNMASKED_VENDOR_WEBGL),
        "UNMASKED_RENDERER_WEBGL" => Some(UNMASKED_RENDERER_WEBGL),
        _ => GRAPHICS_PARAMETERS
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.key),
    }
}

/// Looks up the name of a query key. Inverse of [`parameter_key`].
pub fn parameter_name(key: GlEnum) -> Option<&'static str> {
    match key {
        VENDOR => Some("VENDOR"),
        RENDERER => Some("RENDERER"),
        UNMASKED_VENDOR_WEBGL => Some("UNMASKED_VENDOR_WEBGL"),
        UNMASKED_RENDERER_WEBGL => Some("UNMASKED_RENDERER_WEBGL"),
        _ => GRAPHICS_PARAMETERS
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.name),
    }
}
