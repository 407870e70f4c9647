/// Multi-channel sample storage for one rendered sound. All channels share
/// the same frame count; post-processing operations mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveBuffer {
    data: Vec<Vec<f32>>,
}

impl WaveBuffer {
    pub fn new(channels: usize, frames: usize) -> Self {
        let channels = channels.max(1);
        Self {
            data: vec![vec![0.0; frames]; channels],
        }
    }

    /// Assembles a buffer from per-channel render outputs. Missing lanes are
    /// zero-filled to the frame count of the first rendered lane.
    pub fn from_lanes(channels: usize, lanes: Vec<Option<Vec<f32>>>) -> Self {
        let channels = channels.max(1);
        let frames = lanes
            .iter()
            .flatten()
            .map(|samples| samples.len())
            .next()
            .unwrap_or(0);

        let mut data = Vec::with_capacity(channels);
        let mut lanes = lanes.into_iter();
        for _ in 0..channels {
            match lanes.next().flatten() {
                Some(mut samples) => {
                    samples.resize(frames, 0.0);
                    data.push(samples);
                }
                None => data.push(vec![0.0; frames]),
            }
        }
        Self { data }
    }

    pub fn channels(&self) -> usize {
        self.data.len()
    }

    pub fn frames(&self) -> usize {
        self.data[0].len()
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.data[index]
    }

    /// Overwrites every other channel with a copy of `source`'s samples.
    pub fn copy_channel(&mut self, source: usize) {
        let samples = self.data[source].clone();
        for (ch, lane) in self.data.iter_mut().enumerate() {
            if ch != source {
                lane.copy_from_slice(&samples);
            }
        }
    }

    /// Circularly shifts one channel's samples by `shift` positions, taken
    /// modulo the frame count.
    pub fn rotate(&mut self, channel: usize, shift: usize) {
        let lane = &mut self.data[channel];
        if lane.is_empty() {
            return;
        }
        let shift = shift % lane.len();
        lane.rotate_right(shift);
    }

    /// Scales every channel so the global peak magnitude becomes 1.0.
    /// A silent buffer is left untouched.
    pub fn normalize(&mut self) {
        let peak = self
            .data
            .iter()
            .flatten()
            .map(|sample| sample.abs())
            .fold(0.0f32, f32::max);
        if peak == 0.0 {
            return;
        }
        for lane in self.data.iter_mut() {
            for sample in lane.iter_mut() {
                *sample /= peak;
            }
        }
    }

    /// Forces the first `count` samples of every channel to zero. Used to
    /// suppress the click at playback start; off by default in the render
    /// pipeline.
    pub fn zero_out(&mut self, count: usize) {
        for lane in self.data.iter_mut() {
            let count = count.min(lane.len());
            lane[..count].fill(0.0);
        }
    }
}
