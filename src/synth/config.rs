use serde::{Deserialize, Serialize};

use crate::synth::envelope::{EnvelopeError, SpectralEnvelope};

/// Output channel layout of a render. `Phase` and `Mono` run a single
/// synthesis pass; `Phase` additionally decorrelates the duplicated channel
/// with a half-buffer rotation after the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelMode {
    Phase,
    Mono,
    Stereo,
}

impl ChannelMode {
    /// Number of independent synthesis passes this mode requests.
    pub fn render_channels(self) -> usize {
        match self {
            ChannelMode::Phase | ChannelMode::Mono => 1,
            ChannelMode::Stereo => 2,
        }
    }
}

/// What the Random command re-rolls. `Choir` keeps the tuning and only
/// re-rolls seed and envelope; `All` also re-rolls base frequency and
/// band width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomMode {
    Choir,
    All,
}

/// Recognized render options.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub channel_mode: ChannelMode,
    pub over_sampling: bool,
    pub normalize: bool,
    pub quick_save: bool,
    pub random_mode: RandomMode,
    /// Zero the first 2 ms of every channel after the join to suppress the
    /// playback click. Off by default.
    pub zero_head: bool,
}

impl RenderConfig {
    pub fn over_sampling_factor(&self) -> u32 {
        if self.over_sampling {
            16
        } else {
            1
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            channel_mode: ChannelMode::Phase,
            over_sampling: false,
            normalize: true,
            quick_save: false,
            random_mode: RandomMode::Choir,
            zero_head: false,
        }
    }
}

/// A saved sound: the scalar tuning parameters plus the overtone envelope.
/// Serialized as JSON next to exported WAV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub base_freq: f32,
    pub band_width: f32,
    pub seed: u64,
    pub overtone: Vec<f32>,
}

impl Patch {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Applies the overtone vector to `envelope` through the normalizing
    /// bulk assignment, so a patch edited by hand still lands in [0, 1].
    pub fn apply_overtone(&self, envelope: &mut SpectralEnvelope) -> Result<(), EnvelopeError> {
        envelope.bulk_set(&self.overtone)
    }
}
