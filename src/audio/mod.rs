#[cfg(feature = "native")]
mod cpal_backend;
#[cfg(feature = "native")]
pub use self::cpal_backend::CpalBackend;

pub mod wav;

use crate::synth::wave::WaveBuffer;

pub trait AudioBackend {
    /// Starts playing `buffer`, replacing any source already playing.
    fn play(&mut self, buffer: &WaveBuffer) -> Result<(), Box<dyn std::error::Error>>;
    fn stop(&mut self);
}
