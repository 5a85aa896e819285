use raylib::prelude::*;

use crate::render3d::Renderer;

const MOVE_STEP: f32 = 0.5;
const TURN_STEP: f32 = 0.02;

/// Entrada por teclado, una vez por frame: flechas para avanzar y girar,
/// CTRL+flechas para desplazamiento lateral y vertical.
pub fn process_events(window: &mut RaylibHandle, renderer: &mut Renderer) {
    let f = MOVE_STEP;
    if window.is_key_down(KeyboardKey::KEY_LEFT_CONTROL) {
        if window.is_key_down(KeyboardKey::KEY_LEFT) {
            renderer.move_by(f, 0.0, 0.0);
        }
        if window.is_key_down(KeyboardKey::KEY_RIGHT) {
            renderer.move_by(-f, 0.0, 0.0);
        }
        if window.is_key_down(KeyboardKey::KEY_UP) {
            renderer.move_by(0.0, 0.0, -f);
        }
        if window.is_key_down(KeyboardKey::KEY_DOWN) {
            renderer.move_by(0.0, 0.0, f);
        }
    } else {
        if window.is_key_down(KeyboardKey::KEY_UP) {
            renderer.move_by(0.0, f, 0.0);
        }
        if window.is_key_down(KeyboardKey::KEY_DOWN) {
            renderer.move_by(0.0, -f, 0.0);
        }
        if window.is_key_down(KeyboardKey::KEY_LEFT) {
            renderer.turn(-TURN_STEP);
        }
        if window.is_key_down(KeyboardKey::KEY_RIGHT) {
            renderer.turn(TURN_STEP);
        }
    }
}
