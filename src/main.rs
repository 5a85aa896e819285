// main.rs
#![allow(dead_code)]

mod camera;
mod casters;
mod framebuffer;
mod process_events;
mod render3d;
mod voxels;

use raylib::prelude::*;
use std::thread;
use std::time::Duration;

use process_events::process_events;
use render3d::Renderer;

/// Paleta de 256 entradas: 6 tonos por material a partir del índice
/// (i+1)*6, con rampas RGB separadas por bits del id. El índice 0 queda
/// en negro (fondo).
fn build_palette() -> [Color; 256] {
    let mut colors = [Color::BLACK; 256];
    for i in 0..32u32 {
        let idx = ((i + 1) * 6) as usize;
        for j in 0..6u32 {
            colors[idx + j as usize] = Color::new(
                (16 + (i & 3) * 64 + j * 8) as u8,
                (16 + ((i & 4) >> 2) * 112 + j * 8) as u8,
                (16 + ((i & 24) >> 3) * 64 + j * 8) as u8,
                255,
            );
        }
    }
    colors
}

fn main() {
    let window_width = 800;
    let window_height = 480;

    let (mut window, raylib_thread) = raylib::init()
        .size(window_width, window_height)
        .title("Voxel demo 64x64x64")
        .build();

    let palette = build_palette();
    let mut renderer = Renderer::new(window_width as u32, window_height as u32);
    let mut scene = 4;
    renderer.set_scene(scene);

    let scene_keys = [
        (KeyboardKey::KEY_ONE, 1),
        (KeyboardKey::KEY_TWO, 2),
        (KeyboardKey::KEY_THREE, 3),
        (KeyboardKey::KEY_FOUR, 4),
        (KeyboardKey::KEY_FIVE, 5),
    ];

    while !window.window_should_close() {
        for (key, id) in scene_keys.iter().copied() {
            if window.is_key_pressed(key) {
                scene = id;
                renderer.set_scene(id);
            }
        }

        process_events(&mut window, &mut renderer);

        renderer.render();

        let fps_now = window.get_fps();

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);

            // volcar el framebuffer resolviendo índices contra la paleta
            let fb = renderer.frame_buffer();
            for y in 0..renderer.height() {
                for x in 0..renderer.width() {
                    let idx = fb[(y * renderer.width() + x) as usize];
                    if idx != 0 {
                        d.draw_pixel(x as i32, y as i32, palette[idx as usize]);
                    }
                }
            }

            d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
            d.draw_text(
                &format!("Escena {} (1-5) | flechas y CTRL para moverse", scene),
                10,
                window_height - 30,
                20,
                Color::GRAY,
            );
        }

        // ~60 FPS (16 ms)
        thread::sleep(Duration::from_millis(16));
    }
}
