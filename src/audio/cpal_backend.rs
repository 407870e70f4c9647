use crate::audio::AudioBackend;
use crate::synth::wave::WaveBuffer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Plays a rendered buffer through the default output device. Holds at most
/// one live stream; starting a new one always drops (and thereby stops) the
/// previous one first.
pub struct CpalBackend {
    stream: Option<Stream>,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self { stream: None }
    }

    /// Sample rate of the default output device, if one is available.
    pub fn default_sample_rate() -> Option<u32> {
        let device = cpal::default_host().default_output_device()?;
        let config = device.default_output_config().ok()?;
        Some(config.sample_rate().0)
    }

    fn build_stream(&self, buffer: &WaveBuffer) -> Result<Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device available")?;

        let supported_config = device.default_output_config()?;
        let stream_config: cpal::StreamConfig = supported_config.clone().into();
        let device_channels = stream_config.channels as usize;

        // Snapshot the buffer so the stream owns its data outright; the
        // caller's buffer may be replaced by the next render mid-playback.
        let snapshot: Arc<Vec<Vec<f32>>> = Arc::new(
            (0..buffer.channels())
                .map(|ch| buffer.channel(ch).to_vec())
                .collect(),
        );
        let position = AtomicUsize::new(0);

        let stream = match supported_config.sample_format() {
            SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / device_channels;
                    let start = position.fetch_add(frames, Ordering::Relaxed);
                    for (i, frame) in data.chunks_mut(device_channels).enumerate() {
                        let index = start + i;
                        for (ch, sample) in frame.iter_mut().enumerate() {
                            let lane = &snapshot[ch % snapshot.len()];
                            *sample = if index < lane.len() { lane[index] } else { 0.0 };
                        }
                    }
                },
                |err| eprintln!("Stream error: {}", err),
                None,
            )?,
            _ => return Err("Unsupported sample format".into()),
        };

        Ok(stream)
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn play(&mut self, buffer: &WaveBuffer) -> Result<(), Box<dyn std::error::Error>> {
        self.stop();
        let stream = self.build_stream(buffer)?;
        stream.play()?;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) {
        // Dropping the stream stops it.
        self.stream = None;
    }
}
