#[cfg(feature = "native")]
mod keyboard;
#[cfg(feature = "native")]
pub use self::keyboard::KeyboardHandler;

mod pointer;
pub use self::pointer::{EditResponse, EnvelopeEditor, Modifiers, Point, PointerEvent};

/// Application-level commands triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Stop,
    Random,
    Save,
}
