//! Graphics capability collector.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::catalog::{
    GlEnum, DEBUG_RENDERER_INFO, GRAPHICS_CONTEXT_IDS, GRAPHICS_EXTENSIONS, GRAPHICS_PARAMETERS,
    RENDERER, UNMASKED_RENDERER_WEBGL, UNMASKED_VENDOR_WEBGL, VENDOR,
};
use crate::error::{Feature, FingerprintError};
use crate::host::{GraphicsContext, GraphicsHost};
use crate::record::{GraphicsRecord, ParameterValue};

/// Collects a [`GraphicsRecord`] from the host.
///
/// # Errors
/// * `UnsupportedFeature(GraphicsContext)` if no context id in
///   [`GRAPHICS_CONTEXT_IDS`] yields a context
/// * `Query` if the vendor or renderer query fails
///
/// Failures of individual catalog parameters are recorded as `"error"` and
/// do not fail the collection.
pub fn collect_graphics<H: GraphicsHost>(host: &H) -> Result<GraphicsRecord, FingerprintError> {
    let context = GRAPHICS_CONTEXT_IDS
        .iter()
        .find_map(|id| {
            let context = host.create_context(id);
            if context.is_some() {
                debug!("created graphics context '{}'", id);
            }
            context
        })
        .ok_or(FingerprintError::UnsupportedFeature(Feature::GraphicsContext))?;

    let (vendor_key, renderer_key) = if context.get_extension(DEBUG_RENDERER_INFO) {
        (UNMASKED_VENDOR_WEBGL, UNMASKED_RENDERER_WEBGL)
    } else {
        debug!("{} unavailable, using generic identity", DEBUG_RENDERER_INFO);
        (VENDOR, RENDERER)
    };
    let vendor = query_identity(&context, vendor_key, "vendor")?;
    let renderer = query_identity(&context, renderer_key, "renderer")?;

    let mut parameters = IndexMap::with_capacity(GRAPHICS_PARAMETERS.len());
    for spec in GRAPHICS_PARAMETERS {
        let value = match context.get_parameter(spec.key) {
            Ok(value) => value,
            Err(err) => {
                warn!("parameter {} query failed: {}", spec.name, err);
                ParameterValue::query_error()
            }
        };
        parameters.insert(spec.name.to_string(), value);
    }

    let supported = context.supported_extensions();
    let extensions = GRAPHICS_EXTENSIONS
        .iter()
        .map(|ext| (ext.to_string(), supported.iter().any(|s| s == ext)))
        .collect();

    Ok(GraphicsRecord {
        vendor,
        renderer,
        parameters,
        extensions,
    })
}

fn query_identity<C: GraphicsContext>(
    context: &C,
    key: GlEnum,
    what: &str,
) -> Result<ParameterValue, FingerprintError> {
    context
        .get_parameter(key)
        .map_err(|err| FingerprintError::query(format!("{} query failed", what), err))
}
