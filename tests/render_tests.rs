use std::sync::atomic::AtomicBool;
use std::time::Duration;

use rustpadsynth::synth::padsynth::{render, RENDER_FRAMES};
use rustpadsynth::synth::{ChannelMode, RenderConfig, RenderJobParams, RenderOrchestrator};

const WAIT: Duration = Duration::from_secs(30);

fn params(seed: u64) -> RenderJobParams {
    RenderJobParams {
        sample_rate: 44100,
        over_sampling: 1,
        base_freq: 220.0,
        band_width: 50.0,
        seed,
        overtone: vec![1.0, 0.5, 0.25, 0.0],
    }
}

fn config(mode: ChannelMode) -> RenderConfig {
    RenderConfig {
        channel_mode: mode,
        normalize: false,
        ..RenderConfig::default()
    }
}

fn not_cancelled() -> AtomicBool {
    AtomicBool::new(false)
}

#[test]
fn render_is_deterministic_in_its_params() {
    let a = render(&params(7), &not_cancelled()).unwrap();
    let b = render(&params(7), &not_cancelled()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn render_output_has_fixed_length_and_unit_peak() {
    let samples = render(&params(3), &not_cancelled()).unwrap();
    assert_eq!(samples.len(), RENDER_FRAMES);
    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    assert!((peak - 1.0).abs() < 1e-6, "peak {}", peak);
}

#[test]
fn different_seeds_produce_different_noise() {
    let a = render(&params(1), &not_cancelled()).unwrap();
    let b = render(&params(2), &not_cancelled()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn per_channel_params_draw_disjoint_seeds() {
    let base = params(9);
    assert_eq!(base.for_channel(0).seed, 9);
    assert_ne!(base.for_channel(1).seed, base.for_channel(0).seed);
}

#[test]
fn cancelled_render_yields_nothing() {
    let cancel = AtomicBool::new(true);
    assert!(render(&params(0), &cancel).is_none());
}

#[test]
fn silent_envelope_renders_silence() {
    let mut silent = params(5);
    silent.overtone = vec![0.0; 4];
    let samples = render(&silent, &not_cancelled()).unwrap();
    assert_eq!(samples.len(), RENDER_FRAMES);
    assert!(samples.iter().all(|&s| s == 0.0));
}

#[test]
fn finalize_fires_exactly_once_after_all_channels_join() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(11), &config(ChannelMode::Stereo));

    // Workers have barely started; nothing can have joined yet.
    assert!(orchestrator.is_rendering());
    assert!(orchestrator.poll().is_none());

    let buffer = orchestrator.wait(WAIT).expect("render should finish");
    assert_eq!(buffer.channels(), 2);
    assert_eq!(buffer.frames(), RENDER_FRAMES);
    assert!(!orchestrator.is_rendering());

    // No second finalize for the same request.
    assert!(orchestrator.poll().is_none());
    assert!(orchestrator.wait(Duration::from_millis(100)).is_none());
}

#[test]
fn stereo_channels_are_decorrelated() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(21), &config(ChannelMode::Stereo));
    let buffer = orchestrator.wait(WAIT).expect("render should finish");
    assert_ne!(buffer.channel(0), buffer.channel(1));
}

#[test]
fn mono_render_duplicates_channel_zero() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(13), &config(ChannelMode::Mono));
    let buffer = orchestrator.wait(WAIT).expect("render should finish");
    assert_eq!(buffer.channel(0), buffer.channel(1));

    // The single pass matches a direct render of the same job.
    let expected = render(&params(13), &not_cancelled()).unwrap();
    assert_eq!(buffer.channel(0), expected.as_slice());
}

#[test]
fn phase_render_rotates_the_duplicate_by_half_a_buffer() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(17), &config(ChannelMode::Phase));
    let buffer = orchestrator.wait(WAIT).expect("render should finish");

    let frames = buffer.frames();
    let half = frames / 2;
    let left = buffer.channel(0);
    let right = buffer.channel(1);
    for i in 0..frames {
        assert_eq!(right[(i + half) % frames], left[i], "frame {}", i);
    }
}

#[test]
fn newer_request_supersedes_in_flight_render() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(1), &config(ChannelMode::Mono));
    orchestrator.request(&params(2), &config(ChannelMode::Mono));

    let buffer = orchestrator.wait(WAIT).expect("render should finish");
    let expected = render(&params(2), &not_cancelled()).unwrap();
    assert_eq!(buffer.channel(0), expected.as_slice());

    // The superseded job never produces a second finalize.
    assert!(orchestrator.wait(Duration::from_millis(200)).is_none());
    assert!(orchestrator.poll().is_none());
}

#[test]
fn request_reinitializes_slots_across_channel_mode_changes() {
    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(1), &config(ChannelMode::Stereo));
    orchestrator.request(&params(2), &config(ChannelMode::Mono));

    let buffer = orchestrator.wait(WAIT).expect("render should finish");
    assert_eq!(buffer.channel(0), buffer.channel(1));
    let expected = render(&params(2), &not_cancelled()).unwrap();
    assert_eq!(buffer.channel(0), expected.as_slice());
}

#[test]
fn normalize_option_scales_the_joined_buffer() {
    let mut with_normalize = config(ChannelMode::Mono);
    with_normalize.normalize = true;

    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(23), &with_normalize);
    let buffer = orchestrator.wait(WAIT).expect("render should finish");

    let peak = (0..buffer.channels())
        .flat_map(|ch| buffer.channel(ch).iter().copied())
        .map(f32::abs)
        .fold(0.0f32, f32::max);
    assert!((peak - 1.0).abs() < 1e-6, "peak {}", peak);
}

#[test]
fn zero_head_option_silences_the_attack() {
    let mut cfg = config(ChannelMode::Mono);
    cfg.zero_head = true;

    let mut orchestrator = RenderOrchestrator::new(2);
    orchestrator.request(&params(29), &cfg);
    let buffer = orchestrator.wait(WAIT).expect("render should finish");

    let head = (0.002 * 44100.0) as usize;
    for ch in 0..buffer.channels() {
        assert!(buffer.channel(ch)[..head].iter().all(|&s| s == 0.0));
    }
}

#[test]
fn oversampled_render_keeps_the_output_length() {
    let mut oversampled = params(31);
    oversampled.over_sampling = 16;
    let samples = render(&oversampled, &not_cancelled()).unwrap();
    assert_eq!(samples.len(), RENDER_FRAMES);
}
