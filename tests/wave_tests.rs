use rustpadsynth::synth::WaveBuffer;

fn buffer_from(channels: Vec<Vec<f32>>) -> WaveBuffer {
    let count = channels.len();
    WaveBuffer::from_lanes(count, channels.into_iter().map(Some).collect())
}

#[test]
fn from_lanes_zero_fills_missing_channels() {
    let buffer = WaveBuffer::from_lanes(2, vec![Some(vec![1.0, 2.0, 3.0]), None]);
    assert_eq!(buffer.channels(), 2);
    assert_eq!(buffer.frames(), 3);
    assert_eq!(buffer.channel(0), &[1.0, 2.0, 3.0]);
    assert_eq!(buffer.channel(1), &[0.0, 0.0, 0.0]);
}

#[test]
fn copy_channel_makes_all_channels_equal() {
    let mut buffer = buffer_from(vec![
        vec![0.1, 0.2, 0.3],
        vec![1.0, 1.0, 1.0],
        vec![-1.0, 0.0, 1.0],
    ]);
    buffer.copy_channel(0);
    for ch in 0..buffer.channels() {
        assert_eq!(buffer.channel(ch), &[0.1, 0.2, 0.3]);
    }
}

#[test]
fn copy_channel_from_later_source() {
    let mut buffer = buffer_from(vec![vec![0.0, 0.0], vec![0.5, -0.5]]);
    buffer.copy_channel(1);
    assert_eq!(buffer.channel(0), &[0.5, -0.5]);
    assert_eq!(buffer.channel(1), &[0.5, -0.5]);
}

#[test]
fn rotate_shifts_circularly() {
    let mut buffer = buffer_from(vec![vec![1.0, 2.0, 3.0, 4.0]]);
    buffer.rotate(0, 1);
    assert_eq!(buffer.channel(0), &[4.0, 1.0, 2.0, 3.0]);
}

#[test]
fn rotate_wraps_shift_by_frame_count() {
    let mut buffer = buffer_from(vec![vec![1.0, 2.0, 3.0, 4.0]]);
    buffer.rotate(0, 5);
    assert_eq!(buffer.channel(0), &[4.0, 1.0, 2.0, 3.0]);
    buffer.rotate(0, 4);
    assert_eq!(buffer.channel(0), &[4.0, 1.0, 2.0, 3.0]);
}

#[test]
fn rotate_forward_and_back_is_identity() {
    let original = vec![0.5, -0.25, 0.75, 0.0, -1.0];
    let mut buffer = buffer_from(vec![original.clone()]);
    let frames = buffer.frames();
    for shift in 0..frames {
        buffer.rotate(0, shift);
        buffer.rotate(0, frames - shift);
        assert_eq!(buffer.channel(0), original.as_slice(), "shift {}", shift);
    }
}

#[test]
fn normalize_scales_global_peak_to_one() {
    let mut buffer = buffer_from(vec![vec![0.1, -0.2], vec![0.4, 0.0]]);
    buffer.normalize();
    assert_eq!(buffer.channel(0), &[0.25, -0.5]);
    assert_eq!(buffer.channel(1), &[1.0, 0.0]);
}

#[test]
fn normalize_is_idempotent() {
    let mut buffer = buffer_from(vec![vec![0.3, -0.6], vec![0.1, 0.2]]);
    buffer.normalize();
    let once = buffer.clone();
    buffer.normalize();
    assert_eq!(buffer, once);
}

#[test]
fn normalize_leaves_silence_alone() {
    let mut buffer = buffer_from(vec![vec![0.0, 0.0, 0.0]]);
    buffer.normalize();
    assert_eq!(buffer.channel(0), &[0.0, 0.0, 0.0]);
}

#[test]
fn zero_out_silences_the_head_of_every_channel() {
    let mut buffer = buffer_from(vec![vec![1.0, 1.0, 1.0], vec![-1.0, -1.0, -1.0]]);
    buffer.zero_out(2);
    assert_eq!(buffer.channel(0), &[0.0, 0.0, 1.0]);
    assert_eq!(buffer.channel(1), &[0.0, 0.0, -1.0]);
}

#[test]
fn zero_out_clamps_to_frame_count() {
    let mut buffer = buffer_from(vec![vec![1.0, 1.0]]);
    buffer.zero_out(100);
    assert_eq!(buffer.channel(0), &[0.0, 0.0]);
}
