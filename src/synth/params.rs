use crate::synth::prelude::random_range;

/// Upper bound of the seed range. Channel seeds are offset by whole
/// multiples of this so every channel draws from a disjoint seed region.
pub const MAX_SEED: u64 = 4_503_599_627_370_495;

/// A bounded scalar control value. Setting clamps to [min, max] and snaps
/// to the step grid.
#[derive(Debug, Clone, Copy)]
pub struct NumberParameter {
    value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumberParameter {
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        let mut param = Self {
            value,
            min,
            max,
            step,
        };
        param.set(value);
        param
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set(&mut self, raw: f32) {
        let clamped = raw.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        self.value = (steps * self.step + self.min).clamp(self.min, self.max);
    }

    pub fn randomize(&mut self) {
        self.set(random_range(self.min, self.max));
    }
}

/// The render seed control. Kept apart from `NumberParameter` because its
/// range exceeds what f32 can index exactly.
#[derive(Debug, Clone, Copy)]
pub struct SeedParameter {
    value: u64,
}

impl SeedParameter {
    pub fn new(value: u64) -> Self {
        Self {
            value: value.min(MAX_SEED),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set(&mut self, value: u64) {
        self.value = value.min(MAX_SEED);
    }

    pub fn randomize(&mut self) {
        use rand::Rng;
        self.value = rand::rng().random_range(0..=MAX_SEED);
    }
}

/// Immutable snapshot of one render request. Each worker receives its own
/// copy with the channel seed offset applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJobParams {
    pub sample_rate: u32,
    pub over_sampling: u32,
    pub base_freq: f32,
    pub band_width: f32,
    pub seed: u64,
    pub overtone: Vec<f32>,
}

impl RenderJobParams {
    /// The job for channel `channel`, decorrelated from the other channels
    /// by a disjoint seed offset.
    pub fn for_channel(&self, channel: usize) -> Self {
        let mut params = self.clone();
        params.seed = self
            .seed
            .wrapping_add(MAX_SEED.wrapping_mul(channel as u64));
        params
    }
}
