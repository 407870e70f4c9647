use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::synth::config::{ChannelMode, RenderConfig};
use crate::synth::padsynth;
use crate::synth::params::RenderJobParams;
use crate::synth::wave::WaveBuffer;

/// Completion message from one worker thread.
struct RenderResult {
    channel: usize,
    generation: u64,
    samples: Vec<f32>,
}

/// One rendering lane. Results are tagged with the generation that spawned
/// them; a tag older than the slot's current generation is never honored,
/// so a superseded worker cannot leak its output into a newer render.
struct ChannelSlot {
    running: bool,
    generation: u64,
    cancel: Arc<AtomicBool>,
}

impl ChannelSlot {
    fn new() -> Self {
        Self {
            running: false,
            generation: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// State of the request currently being filled, owned exclusively by the
/// orchestrator until the barrier fires.
struct ActiveRender {
    config: RenderConfig,
    sample_rate: u32,
    lanes: Vec<Option<Vec<f32>>>,
}

/// Fans a render request out to one worker thread per logical channel,
/// supersedes in-flight jobs when a new request arrives, joins completions
/// at an all-idle barrier and applies the post-processing chain. The newest
/// request always wins; there is no queue.
pub struct RenderOrchestrator {
    slots: Vec<ChannelSlot>,
    result_tx: Sender<RenderResult>,
    result_rx: Receiver<RenderResult>,
    active: Option<ActiveRender>,
}

impl RenderOrchestrator {
    pub fn new(channels: usize) -> Self {
        let (result_tx, result_rx) = channel();
        Self {
            slots: (0..channels.max(1)).map(|_| ChannelSlot::new()).collect(),
            result_tx,
            result_rx,
            active: None,
        }
    }

    pub fn channels(&self) -> usize {
        self.slots.len()
    }

    pub fn is_rendering(&self) -> bool {
        self.slots.iter().any(|slot| slot.running)
    }

    /// Dispatches one job per logical channel of `config.channel_mode`.
    /// Every slot is reinitialized: running workers are cancelled and their
    /// pending results invalidated, whether or not the slot gets a new job.
    pub fn request(&mut self, params: &RenderJobParams, config: &RenderConfig) {
        for slot in self.slots.iter_mut() {
            slot.generation += 1;
            if slot.running {
                slot.cancel.store(true, Ordering::Relaxed);
                slot.running = false;
            }
        }

        self.active = Some(ActiveRender {
            config: *config,
            sample_rate: params.sample_rate,
            lanes: vec![None; self.slots.len()],
        });

        let render_channels = config.channel_mode.render_channels().min(self.slots.len());
        for ch in 0..render_channels {
            let slot = &mut self.slots[ch];
            slot.cancel = Arc::new(AtomicBool::new(false));
            slot.running = true;

            let job = params.for_channel(ch);
            let cancel = slot.cancel.clone();
            let generation = slot.generation;
            let tx = self.result_tx.clone();
            thread::spawn(move || {
                // A cancelled worker never sends; a worker whose cancel flag
                // was raised after its last checkpoint sends a result that is
                // dropped by the generation check on the other side.
                if let Some(samples) = padsynth::render(&job, &cancel) {
                    let _ = tx.send(RenderResult {
                        channel: ch,
                        generation,
                        samples,
                    });
                }
            });
        }
    }

    /// Drains completion messages without blocking. Returns the finished,
    /// post-processed buffer once per request, after every slot has gone
    /// idle.
    pub fn poll(&mut self) -> Option<WaveBuffer> {
        let mut finished = None;
        while let Ok(result) = self.result_rx.try_recv() {
            if let Some(buffer) = self.accept(result) {
                finished = Some(buffer);
            }
        }
        finished
    }

    /// Blocking variant of `poll` for callers that want the result of the
    /// request they just issued. Returns `None` on timeout or when nothing
    /// is in flight.
    pub fn wait(&mut self, timeout: Duration) -> Option<WaveBuffer> {
        let deadline = Instant::now() + timeout;
        while self.active.is_some() && self.is_rendering() {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => {
                    if let Some(buffer) = self.accept(result) {
                        return Some(buffer);
                    }
                }
                Err(_) => return None,
            }
        }
        None
    }

    fn accept(&mut self, result: RenderResult) -> Option<WaveBuffer> {
        let slot = &mut self.slots[result.channel];
        if result.generation != slot.generation || !slot.running {
            return None; // superseded worker, result discarded
        }
        slot.running = false;

        let active = self.active.as_mut()?;
        active.lanes[result.channel] = Some(result.samples);

        if self.slots.iter().any(|slot| slot.running) {
            return None;
        }
        let active = self.active.take()?;
        Some(Self::join(self.slots.len(), active))
    }

    /// The barrier join: assemble the buffer, duplicate a single-pass render
    /// across channels, phase-rotate, then the configured post-processing.
    fn join(channels: usize, active: ActiveRender) -> WaveBuffer {
        let config = active.config;
        let mut buffer = WaveBuffer::from_lanes(channels, active.lanes);

        if config.channel_mode.render_channels() == 1 {
            buffer.copy_channel(0);
            if config.channel_mode == ChannelMode::Phase && buffer.channels() > 1 {
                let half = buffer.frames() / 2;
                buffer.rotate(1, half);
            }
        }

        if config.normalize {
            buffer.normalize();
        }
        if config.zero_head {
            buffer.zero_out((0.002 * active.sample_rate as f64) as usize);
        }

        buffer
    }
}
