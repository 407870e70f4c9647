use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustfft::{num_complex::Complex, FftPlanner};

use crate::synth::params::RenderJobParams;
use crate::synth::prelude::PI;

/// Output length of one render, in frames. Oversampling enlarges the
/// synthesis table, never the output.
pub const RENDER_FRAMES: usize = 1 << 17;

/// Renders one channel of band-limited noise from the job parameters.
///
/// One Gaussian band is laid into the spectrum per overtone slot (center at
/// `base_freq * (slot + 1)`, width derived from `band_width` in cents), every
/// bin gets a random phase from a generator seeded with the job seed, and an
/// inverse FFT produces the waveform. The result is deterministic in the
/// parameters and peak-normalized.
///
/// Returns `None` when `cancel` is raised; the checkpoints sit between bands
/// and before the transform, so a superseded job exits without a result.
pub fn render(params: &RenderJobParams, cancel: &AtomicBool) -> Option<Vec<f32>> {
    let over = params.over_sampling.max(1) as usize;
    let table_size = RENDER_FRAMES * over;
    let rate = params.sample_rate as f32 * over as f32;
    let bin_width = rate / table_size as f32;
    let half = table_size / 2;

    // Accumulate band magnitudes, one Gaussian per overtone slot.
    let mut magnitude = vec![0.0f32; half];
    for (slot, &amp) in params.overtone.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if amp <= 0.0 {
            continue;
        }
        let center = params.base_freq * (slot + 1) as f32;
        if center >= rate / 2.0 {
            continue;
        }
        // band_width is in cents of the partial's frequency; keep at least
        // one bin wide so narrow settings don't vanish between bins.
        let width = ((2.0f32.powf(params.band_width / 1200.0) - 1.0) * center).max(bin_width);

        let lo = (((center - 4.0 * width) / bin_width).floor() as isize).max(1) as usize;
        let hi = ((((center + 4.0 * width) / bin_width).ceil() as usize) + 1).min(half);
        for bin in lo..hi {
            let offset = (bin as f32 * bin_width - center) / width;
            magnitude[bin] += amp * (-offset * offset).exp();
        }
    }

    if cancel.load(Ordering::Relaxed) {
        return None;
    }

    // Random phase per bin, conjugate-symmetric spectrum so the inverse
    // transform is real.
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut spectrum = vec![Complex::new(0.0f32, 0.0); table_size];
    for bin in 1..half {
        let phase = rng.random_range(0.0..2.0 * PI);
        let value = Complex::from_polar(magnitude[bin], phase);
        spectrum[bin] = value;
        spectrum[table_size - bin] = value.conj();
    }

    let mut planner = FftPlanner::<f32>::new();
    planner.plan_fft_inverse(table_size).process(&mut spectrum);

    // Back to the base rate by averaging each block of oversampled frames.
    let scale = 1.0 / table_size as f32;
    let mut samples = Vec::with_capacity(RENDER_FRAMES);
    for frame in 0..RENDER_FRAMES {
        let block = &spectrum[frame * over..(frame + 1) * over];
        let sum: f32 = block.iter().map(|bin| bin.re).sum();
        samples.push(sum * scale / over as f32);
    }

    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= peak;
        }
    }

    Some(samples)
}
