use crate::synth::envelope::{EnvelopeError, SpectralEnvelope};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Keyboard modifiers observed alongside a pointer event. During a drag,
/// Ctrl pins the edited band to 0 and Alt pins it to 1; on the wheel, Ctrl
/// selects the fine sensitivity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// The closed set of input events the envelope editor understands,
/// independent of any platform event names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { position: Point, modifiers: Modifiers },
    Move { position: Point, modifiers: Modifiers },
    Release,
    Leave,
    Scroll { x: f32, delta: f32, modifiers: Modifiers },
}

/// What an event did, and what the owner should do about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditResponse {
    /// Nothing changed.
    Unchanged,
    /// The envelope changed; redraw but keep the current sound.
    Changed,
    /// An edit was finished; re-render.
    Committed,
}

const WHEEL_FINE: f32 = 0.001;
const WHEEL_COARSE: f32 = 0.003;

/// Maps pointer and wheel input onto the spectral envelope it owns.
///
/// Horizontal position selects the band (`floor(x / band_width)`), vertical
/// position its value (`1 - y / height`, top = 1). A drag runs from press to
/// release, updating on every move, and commits exactly once when it ends,
/// whether by release or by leaving the control while held. Wheel steps
/// commit immediately.
pub struct EnvelopeEditor {
    envelope: SpectralEnvelope,
    height: f32,
    band_width: f32,
    dragging: bool,
}

impl EnvelopeEditor {
    pub fn new(width: f32, height: f32, num_bands: usize) -> Self {
        let num_bands = num_bands.max(1);
        Self {
            envelope: SpectralEnvelope::new(num_bands),
            height,
            band_width: width / num_bands as f32,
            dragging: false,
        }
    }

    pub fn envelope(&self) -> &SpectralEnvelope {
        &self.envelope
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Bulk-assigns the envelope through the normalizing setter. Does not
    /// commit; callers decide when to re-render.
    pub fn set_overtone(&mut self, values: &[f32]) -> Result<(), EnvelopeError> {
        self.envelope.bulk_set(values)
    }

    pub fn handle(&mut self, event: PointerEvent) -> EditResponse {
        match event {
            PointerEvent::Press {
                position,
                modifiers,
            } => {
                self.dragging = true;
                self.apply_position(position, modifiers)
            }
            PointerEvent::Move {
                position,
                modifiers,
            } => {
                if self.dragging {
                    self.apply_position(position, modifiers)
                } else {
                    EditResponse::Unchanged
                }
            }
            PointerEvent::Release => {
                if self.dragging {
                    self.dragging = false;
                    EditResponse::Committed
                } else {
                    EditResponse::Unchanged
                }
            }
            PointerEvent::Leave => {
                if self.dragging {
                    self.dragging = false;
                    EditResponse::Committed
                } else {
                    EditResponse::Unchanged
                }
            }
            PointerEvent::Scroll {
                x,
                delta,
                modifiers,
            } => self.apply_scroll(x, delta, modifiers),
        }
    }

    /// Band under the horizontal position, or None when the position falls
    /// outside the control.
    fn band_at(&self, x: f32) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let index = (x / self.band_width).floor() as usize;
        if index >= self.envelope.len() {
            return None;
        }
        Some(index)
    }

    fn apply_position(&mut self, position: Point, modifiers: Modifiers) -> EditResponse {
        let Some(index) = self.band_at(position.x) else {
            eprintln!("Pointer x {} outside control, edit ignored", position.x);
            return EditResponse::Unchanged;
        };
        let y = if modifiers.ctrl {
            self.height
        } else if modifiers.alt {
            0.0
        } else {
            position.y
        };
        let value = 1.0 - y / self.height;
        match self.envelope.set_value(index, value) {
            Ok(()) => EditResponse::Changed,
            Err(err) => {
                eprintln!("Envelope edit ignored: {}", err);
                EditResponse::Unchanged
            }
        }
    }

    fn apply_scroll(&mut self, x: f32, delta: f32, modifiers: Modifiers) -> EditResponse {
        let Some(index) = self.band_at(x) else {
            eprintln!("Pointer x {} outside control, edit ignored", x);
            return EditResponse::Unchanged;
        };
        let sensitivity = if modifiers.ctrl {
            WHEEL_FINE
        } else {
            WHEEL_COARSE
        };
        let current = self.envelope.band(index).unwrap_or(0.0);
        match self.envelope.set_value(index, current - sensitivity * delta) {
            Ok(()) => EditResponse::Committed,
            Err(err) => {
                eprintln!("Envelope edit ignored: {}", err);
                EditResponse::Unchanged
            }
        }
    }
}
