//! Keyboard and mouse input collection for one rendered frame.

use app::app_loop::key_for_char;
use macroquad::prelude::{KeyCode, get_char_pressed, is_key_pressed, mouse_position};

/// Keys that type no character; they follow the typed keys of the frame.
const EDIT_KEYS: [KeyCode; 2] = [KeyCode::Backspace, KeyCode::Escape];

pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub mouse: (f32, f32),
}

pub fn capture_frame_input() -> FrameInput {
    let mut keys_pressed = Vec::new();

    // Typed characters keep their order, and `:` arrives this way whatever
    // the keyboard layout.
    while let Some(typed) = get_char_pressed() {
        keys_pressed.extend(key_for_char(typed));
    }
    for key in EDIT_KEYS {
        if is_key_pressed(key) {
            keys_pressed.push(key);
        }
    }

    FrameInput { keys_pressed, mouse: mouse_position() }
}
