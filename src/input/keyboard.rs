use crate::input::Command;
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::collections::HashMap;
use std::sync::mpsc::Sender;

pub struct KeyboardHandler {
    device_state: DeviceState,
    key_states: HashMap<Keycode, bool>,
    key_to_command: HashMap<Keycode, Command>,
    command_sender: Sender<Command>,
}

impl KeyboardHandler {
    pub fn new(command_sender: Sender<Command>) -> Self {
        let device_state = DeviceState::new();
        let mut key_states: HashMap<Keycode, bool> = HashMap::new();

        // Space previews the current sound; the rest cover stop, re-roll
        // and export.
        let key_to_command: HashMap<Keycode, Command> = [
            (Keycode::Space, Command::Play),
            (Keycode::Escape, Command::Stop),
            (Keycode::R, Command::Random),
            (Keycode::S, Command::Save),
        ]
        .iter()
        .cloned()
        .collect();

        // Initialize all keys as not pressed
        for key in key_to_command.keys() {
            key_states.insert(*key, false);
        }

        Self {
            device_state,
            key_states,
            key_to_command,
            command_sender,
        }
    }

    pub fn update(&mut self) {
        let keys: Vec<Keycode> = self.device_state.get_keys();

        for (key, command) in &self.key_to_command {
            let is_pressed = keys.contains(key);
            let was_pressed = self.key_states.get(key).cloned().unwrap_or(false);

            if is_pressed && !was_pressed {
                if let Err(e) = self.command_sender.send(*command) {
                    eprintln!("Error sending {:?} command: {}", command, e);
                }
            }
            self.key_states.insert(*key, is_pressed);
        }
    }
}
