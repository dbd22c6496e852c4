use raylib::prelude::*;

use thurs::core::player::FrameInput;

fn axis(window: &RaylibHandle, neg: &[KeyboardKey], pos: &[KeyboardKey]) -> f32 {
    let down = |keys: &[KeyboardKey]| keys.iter().any(|k| window.is_key_down(*k));
    let mut v = 0.0;
    if down(pos) {
        v += 1.0;
    }
    if down(neg) {
        v -= 1.0;
    }
    v
}

/// Samples keyboard and mouse into this frame's input, plus the frame time.
pub fn process_events(window: &RaylibHandle) -> (FrameInput, f32) {
    let input = FrameInput {
        forward: axis(
            window,
            &[KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN],
            &[KeyboardKey::KEY_W, KeyboardKey::KEY_UP],
        ),
        strafe: axis(window, &[KeyboardKey::KEY_A], &[KeyboardKey::KEY_D]),
        turn: axis(window, &[KeyboardKey::KEY_LEFT], &[KeyboardKey::KEY_RIGHT]),
        mouse_dx: window.get_mouse_delta().x,
        fire: window.is_key_down(KeyboardKey::KEY_SPACE)
            || window.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
    };
    // clamp so a stalled frame does not tunnel the player through walls
    let dt = window.get_frame_time().min(0.1);
    (input, dt)
}
