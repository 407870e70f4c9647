use crate::audio::{wav, AudioBackend, CpalBackend};
use crate::input::{Command, EnvelopeEditor, KeyboardHandler};
use crate::synth::config::{Patch, RandomMode, RenderConfig};
use crate::synth::orchestrator::RenderOrchestrator;
use crate::synth::params::{NumberParameter, RenderJobParams, SeedParameter};
use crate::synth::prelude::random_range;
use crate::synth::wave::WaveBuffer;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

const TITLE: &str = "rustpadsynth";
const NUM_BANDS: usize = 32;
const EDITOR_WIDTH: f32 = 448.0;
const EDITOR_HEIGHT: f32 = 256.0;
const OUTPUT_CHANNELS: usize = 2;
const FALLBACK_SAMPLE_RATE: u32 = 44100;

/// The application context: every piece of shared state lives here with one
/// writer each, instead of in globals referenced from callbacks.
pub struct App {
    pub config: RenderConfig,
    pub base_freq: NumberParameter,
    pub band_width: NumberParameter,
    pub seed: SeedParameter,
    pub editor: EnvelopeEditor,
    orchestrator: RenderOrchestrator,
    current: WaveBuffer,
    sample_rate: u32,
}

impl App {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            config: RenderConfig::default(),
            base_freq: NumberParameter::new(220.0, 1.0, 1000.0, 0.01),
            band_width: NumberParameter::new(50.0, 0.01, 200.0, 0.01),
            seed: SeedParameter::new(0),
            editor: EnvelopeEditor::new(EDITOR_WIDTH, EDITOR_HEIGHT, NUM_BANDS),
            orchestrator: RenderOrchestrator::new(OUTPUT_CHANNELS),
            current: WaveBuffer::new(OUTPUT_CHANNELS, 0),
            sample_rate,
        }
    }

    pub fn current(&self) -> &WaveBuffer {
        &self.current
    }

    pub fn job_params(&self) -> RenderJobParams {
        RenderJobParams {
            sample_rate: self.sample_rate,
            over_sampling: self.config.over_sampling_factor(),
            base_freq: self.base_freq.value(),
            band_width: self.band_width.value(),
            seed: self.seed.value(),
            overtone: self.editor.envelope().bands().to_vec(),
        }
    }

    pub fn patch(&self) -> Patch {
        Patch {
            base_freq: self.base_freq.value(),
            band_width: self.band_width.value(),
            seed: self.seed.value(),
            overtone: self.editor.envelope().bands().to_vec(),
        }
    }

    /// Kicks off a render of the current parameters, superseding any render
    /// still in flight.
    pub fn refresh(&mut self) {
        println!("Rendering...");
        let params = self.job_params();
        self.orchestrator.request(&params, &self.config);
    }

    /// Collects finished work from the orchestrator. Returns true when a
    /// render completed and the current buffer was replaced.
    pub fn poll(&mut self) -> bool {
        match self.orchestrator.poll() {
            Some(buffer) => {
                self.finalize(buffer);
                true
            }
            None => false,
        }
    }

    fn finalize(&mut self, buffer: WaveBuffer) {
        self.current = buffer;
        println!("Rendering finished.");
        if self.config.quick_save {
            self.save();
        }
    }

    /// Re-rolls the sound per the configured random mode and re-renders.
    pub fn randomize(&mut self) {
        if self.config.random_mode == RandomMode::All {
            self.base_freq.randomize();
            self.band_width.randomize();
        }
        self.seed.randomize();

        let values: Vec<f32> = (0..self.editor.envelope().len())
            .map(|_| random_range(0.0, 1.0))
            .collect();
        if let Err(e) = self.editor.set_overtone(&values) {
            eprintln!("Randomize failed: {}", e);
        }

        self.refresh();
    }

    /// Exports the current buffer next to the executable, with the patch
    /// JSON alongside so the sound can be reconstructed.
    pub fn save(&self) {
        if self.current.frames() == 0 {
            eprintln!("Nothing rendered yet, not saving");
            return;
        }
        match wav::save_wave(Path::new("."), TITLE, self.sample_rate, &self.current) {
            Ok(path) => {
                println!("Saved {}", path.display());
                let patch_path = path.with_extension("json");
                match self.patch().to_json() {
                    Ok(json) => {
                        if let Err(e) = std::fs::write(&patch_path, json) {
                            eprintln!("Failed to write {}: {}", patch_path.display(), e);
                        }
                    }
                    Err(e) => eprintln!("Failed to serialize patch: {}", e),
                }
            }
            Err(e) => eprintln!("Save failed: {}", e),
        }
    }
}

pub fn start() {
    let sample_rate = CpalBackend::default_sample_rate().unwrap_or(FALLBACK_SAMPLE_RATE);
    let mut app = App::new(sample_rate);
    let mut playback = CpalBackend::new();

    let (command_tx, command_rx) = channel();
    let mut keyboard = KeyboardHandler::new(command_tx);

    app.refresh();

    loop {
        keyboard.update();

        while let Ok(command) = command_rx.try_recv() {
            match command {
                Command::Play => {
                    if let Err(e) = playback.play(app.current()) {
                        eprintln!("Playback failed: {}", e);
                    }
                }
                Command::Stop => playback.stop(),
                Command::Random => {
                    playback.stop();
                    app.randomize();
                }
                Command::Save => app.save(),
            }
        }

        app.poll();

        std::thread::sleep(Duration::from_millis(10));
    }
}
