// Shared imports for the synth modules.

pub use std::f32::consts::PI;
pub use std::fmt;

pub fn random_range(min: f32, max: f32) -> f32 {
    use rand::Rng;
    let mut rng = rand::rng();
    rng.random_range(min..max)
}
