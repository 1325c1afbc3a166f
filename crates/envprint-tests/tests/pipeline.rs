//! Collect-then-hash pipeline tests against scripted hosts.
//!
//! These tests drive the graphics and audio collectors through
//! [`ScriptedHost`] and check records, digests, error propagation and the
//! order in which the host is queried.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p envprint-tests --test pipeline
//! ```

use pretty_assertions::assert_eq;

use envprint_core::{
    canonical_json, collect_and_hash_audio, collect_and_hash_graphics, digest_text, run_probe,
    Feature, FingerprintError, ParameterValue, Probe, Report,
};
use envprint_tests::{HostEvent, ScriptedHost};

fn creates(ids: &[&str]) -> Vec<HostEvent> {
    ids.iter()
        .map(|id| HostEvent::CreateContext(id.to_string()))
        .collect()
}

// ============================================================================
// Graphics
// ============================================================================

#[test]
fn graphics_prefers_unmasked_identity() {
    let host = ScriptedHost::desktop();
    let fp = collect_and_hash_graphics(&host).unwrap();

    assert_eq!(fp.record.vendor, "Acme GPU Co.");
    assert_eq!(fp.record.renderer, "Acme Graphics 9000");
    assert_eq!(fp.digest, digest_text(&canonical_json(&fp.record).unwrap()));
}

#[test]
fn graphics_falls_back_to_generic_identity() {
    let host = ScriptedHost::desktop().without_debug_info();
    let fp = collect_and_hash_graphics(&host).unwrap();

    assert_eq!(fp.record.vendor, "WebKit");
    assert_eq!(fp.record.renderer, "WebKit WebGL");
}

#[test]
fn graphics_record_layout_is_stable() {
    let host = ScriptedHost::desktop();
    let fp = collect_and_hash_graphics(&host).unwrap();

    let expected = concat!(
        r#"{"vendor":"Acme GPU Co.","renderer":"Acme Graphics 9000","parameters":{"#,
        r#""VERSION":"WebGL 1.0","SHADING_LANGUAGE_VERSION":"WebGL GLSL ES 1.0","#,
        r#""MAX_TEXTURE_SIZE":16384,"MAX_VIEWPORT_DIMS":{"0":16384,"1":16384},"#,
        r#""MAX_TEXTURE_IMAGE_UNITS":16,"MAX_COMBINED_TEXTURE_IMAGE_UNITS":32,"#,
        r#""MAX_VERTEX_TEXTURE_IMAGE_UNITS":16,"MAX_RENDERBUFFER_SIZE":16384},"#,
        r#""extensions":{"WEBGL_compressed_texture_s3tc":false,"WEBGL_depth_texture":true,"#,
        r#""OES_texture_float":true,"OES_texture_half_float":false,"#,
        r#""EXT_texture_filter_anisotropic":false}}"#,
    );
    assert_eq!(canonical_json(&fp.record).unwrap(), expected);
}

#[test]
fn graphics_without_context_is_unsupported() {
    let host = ScriptedHost::desktop().without_graphics();
    let err = collect_and_hash_graphics(&host).unwrap_err();

    assert!(matches!(
        err,
        FingerprintError::UnsupportedFeature(Feature::GraphicsContext)
    ));
    assert_eq!(err.to_string(), "WebGL not supported");
    assert_eq!(host.events(), creates(&["webgl", "experimental-webgl"]));
}

#[test]
fn graphics_tries_experimental_context_id() {
    let host = ScriptedHost::desktop().with_context_ids(&["experimental-webgl"]);
    let fp = collect_and_hash_graphics(&host).unwrap();

    assert_eq!(fp.record.vendor, "Acme GPU Co.");
    assert_eq!(host.events(), creates(&["webgl", "experimental-webgl"]));
}

#[test]
fn graphics_stops_at_first_context_id() {
    let host = ScriptedHost::desktop();
    collect_and_hash_graphics(&host).unwrap();
    assert_eq!(host.events(), creates(&["webgl"]));
}

#[test]
fn graphics_failed_parameter_records_sentinel() {
    let host = ScriptedHost::desktop().failing_parameter("MAX_TEXTURE_SIZE");
    let fp = collect_and_hash_graphics(&host).unwrap();

    assert_eq!(fp.record.parameters["MAX_TEXTURE_SIZE"], ParameterValue::query_error());
    assert_eq!(fp.record.failed_parameters(), vec!["MAX_TEXTURE_SIZE"]);
    assert_eq!(fp.record.parameters.len(), 8);

    let clean = collect_and_hash_graphics(&ScriptedHost::desktop()).unwrap();
    assert_ne!(fp.digest, clean.digest);
}

#[test]
fn graphics_vendor_failure_propagates() {
    let host = ScriptedHost::desktop().failing_vendor();
    let err = collect_and_hash_graphics(&host).unwrap_err();

    assert!(matches!(err, FingerprintError::Query { .. }));
    assert!(err.to_string().contains("vendor"));
}

#[test]
fn graphics_parameter_values_change_digest() {
    let base = collect_and_hash_graphics(&ScriptedHost::desktop()).unwrap();
    let host =
        ScriptedHost::desktop().with_parameter("MAX_TEXTURE_SIZE", ParameterValue::Integer(8192));
    let changed = collect_and_hash_graphics(&host).unwrap();

    assert_ne!(base.digest, changed.digest);
    assert_eq!(
        changed.record.parameters["MAX_TEXTURE_SIZE"],
        ParameterValue::Integer(8192)
    );
}

#[test]
fn graphics_extension_flags_follow_supported_list() {
    let host = ScriptedHost::desktop()
        .with_extensions(&["EXT_texture_filter_anisotropic", "WEBGL_lose_context"]);
    let fp = collect_and_hash_graphics(&host).unwrap();

    let present: Vec<&str> = fp
        .record
        .extensions
        .iter()
        .filter(|(_, present)| **present)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(present, vec!["EXT_texture_filter_anisotropic"]);
    assert_eq!(fp.record.extensions.len(), 5);
}

// ============================================================================
// Audio
// ============================================================================

#[tokio::test]
async fn audio_record_and_digest() {
    let host = ScriptedHost::desktop();
    let fp = collect_and_hash_audio(&host).await.unwrap();

    let text = r#"{"sampleRate":48000,"maxChannelCount":2,"channelCount":2,"codecs":{"mp3":true,"ogg":true,"wav":true}}"#;
    assert_eq!(canonical_json(&fp.record).unwrap(), text);
    assert_eq!(
        fp.digest.as_str(),
        "5bc8febcbd487844758d33a61b672a26d136260a7901342d24ef4d008e42ee0d"
    );
}

#[tokio::test]
async fn audio_context_closed_before_codec_probes() {
    let host = ScriptedHost::desktop();
    collect_and_hash_audio(&host).await.unwrap();

    assert_eq!(
        host.events(),
        vec![
            HostEvent::Construct("AudioContext".to_string()),
            HostEvent::Close,
            HostEvent::CanPlayType("audio/mpeg".to_string()),
            HostEvent::CanPlayType("audio/ogg".to_string()),
            HostEvent::CanPlayType("audio/wav".to_string()),
        ]
    );
    assert_eq!(host.open_audio_contexts(), 0);
}

#[tokio::test]
async fn audio_uses_prefixed_constructor() {
    let host = ScriptedHost::desktop().with_constructor("webkitAudioContext");
    let fp = collect_and_hash_audio(&host).await.unwrap();

    assert_eq!(fp.record.sample_rate, 48000.0);
    assert_eq!(
        host.events()[0],
        HostEvent::Construct("webkitAudioContext".to_string())
    );
}

#[tokio::test]
async fn audio_without_constructor_is_unsupported() {
    let host = ScriptedHost::desktop().without_audio();
    let err = collect_and_hash_audio(&host).await.unwrap_err();

    assert!(err.is_unsupported());
    assert_eq!(err.to_string(), "AudioContext not supported");
    assert!(host.events().is_empty());
}

#[tokio::test]
async fn audio_construct_failure_leaves_nothing_open() {
    let host = ScriptedHost::desktop().failing_construct("autoplay policy");
    let err = collect_and_hash_audio(&host).await.unwrap_err();

    assert!(matches!(err, FingerprintError::Query { .. }));
    assert!(err.to_string().contains("autoplay policy"));
    assert_eq!(host.open_audio_contexts(), 0);
    assert!(!host.events().contains(&HostEvent::Close));
}

#[tokio::test]
async fn audio_close_failure_is_not_propagated() {
    let clean = collect_and_hash_audio(&ScriptedHost::desktop()).await.unwrap();

    let host = ScriptedHost::desktop().failing_close("InvalidStateError");
    let fp = collect_and_hash_audio(&host).await.unwrap();

    assert_eq!(fp.digest, clean.digest);
    assert_eq!(fp.record, clean.record);
    let events = host.events();
    assert_eq!(
        events.iter().filter(|e| **e == HostEvent::Close).count(),
        1
    );
    // Codecs are still probed after the failed release.
    assert_eq!(
        events.last(),
        Some(&HostEvent::CanPlayType("audio/wav".to_string()))
    );
}

#[tokio::test]
async fn audio_close_failure_during_concurrent_runs() {
    let failing = ScriptedHost::desktop().yielding().failing_close("closed twice");
    let healthy = ScriptedHost::desktop().yielding();

    let (a, b) = tokio::join!(
        collect_and_hash_audio(&failing),
        collect_and_hash_audio(&healthy)
    );
    assert_eq!(a.unwrap().digest, b.unwrap().digest);
    assert!(failing.events().contains(&HostEvent::Close));
    assert_eq!(healthy.open_audio_contexts(), 0);
}

#[tokio::test]
async fn audio_codec_answers() {
    let host = ScriptedHost::desktop()
        .with_can_play("audio/mpeg", "no")
        .with_can_play("audio/ogg", "")
        .with_can_play("audio/wav", "maybe");
    let fp = collect_and_hash_audio(&host).await.unwrap();

    assert!(!fp.record.codecs.mp3);
    assert!(!fp.record.codecs.ogg);
    assert!(fp.record.codecs.wav);
}

#[tokio::test]
async fn audio_fractional_sample_rate_keeps_fraction() {
    let host = ScriptedHost::desktop()
        .with_sample_rate(22050.5)
        .with_channels(6, 2);
    let fp = collect_and_hash_audio(&host).await.unwrap();

    let text = canonical_json(&fp.record).unwrap();
    assert!(text.starts_with(r#"{"sampleRate":22050.5,"maxChannelCount":6,"channelCount":2,"#));
}

#[tokio::test]
async fn concurrent_collections_are_independent() {
    let first = ScriptedHost::desktop().yielding();
    let second = ScriptedHost::desktop().yielding().with_sample_rate(44100.0);

    let (a, b) = tokio::join!(
        collect_and_hash_audio(&first),
        collect_and_hash_audio(&second)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.record.sample_rate, 48000.0);
    assert_eq!(b.record.sample_rate, 44100.0);
    assert_ne!(a.digest, b.digest);
    assert_eq!(first.open_audio_contexts(), 0);
    assert_eq!(second.open_audio_contexts(), 0);
}

#[tokio::test]
async fn concurrent_collections_on_one_host_close_each_context() {
    let host = ScriptedHost::desktop().yielding();

    let (a, b) = tokio::join!(collect_and_hash_audio(&host), collect_and_hash_audio(&host));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.digest, b.digest);
    assert_eq!(host.open_audio_contexts(), 0);
    let closes = host
        .events()
        .iter()
        .filter(|event| **event == HostEvent::Close)
        .count();
    assert_eq!(closes, 2);
}

// ============================================================================
// Probe dispatch
// ============================================================================

#[tokio::test]
async fn run_probe_dispatches_by_kind() {
    let host = ScriptedHost::desktop();

    let graphics = run_probe(Probe::Graphics, &host).await.unwrap();
    assert!(matches!(graphics, Report::Graphics(_)));
    assert_eq!(graphics.probe(), Probe::Graphics);

    let audio = run_probe(Probe::Audio, &host).await.unwrap();
    assert!(matches!(audio, Report::Audio(_)));
    assert_ne!(graphics.digest(), audio.digest());
}

#[tokio::test]
async fn run_probe_reports_unsupported_audio() {
    let host = ScriptedHost::desktop().without_audio();
    let err = run_probe(Probe::Audio, &host).await.unwrap_err();
    assert!(err.is_unsupported());

    let graphics = run_probe(Probe::Graphics, &host).await;
    assert!(graphics.is_ok());
}
