pub mod config;
pub mod envelope;
pub mod orchestrator;
pub mod padsynth;
pub mod params;
pub mod prelude;
pub mod wave;

pub use config::{ChannelMode, Patch, RandomMode, RenderConfig};
pub use envelope::{EnvelopeError, SpectralEnvelope};
pub use orchestrator::RenderOrchestrator;
pub use params::{NumberParameter, RenderJobParams, SeedParameter, MAX_SEED};
pub use wave::WaveBuffer;
