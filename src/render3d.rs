use crate::camera::Camera;
use crate::casters::ColumnCaster;
use crate::framebuffer::Framebuffer;
use crate::voxels::VoxelGrid;

/// Motor de render: es dueño de la rejilla, la cámara y el framebuffer.
/// Todas las operaciones pasan por aquí; no hay estado global, así que
/// pueden convivir varias instancias independientes.
pub struct Renderer {
    grid: VoxelGrid,
    camera: Camera,
    fb: Framebuffer,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: VoxelGrid::new(),
            camera: Camera::new(height),
            fb: Framebuffer::new(width, height),
        }
    }

    /// Reconstruye el contenido de la rejilla. No debe solaparse con un
    /// render en curso; el préstamo exclusivo ya lo garantiza.
    pub fn set_scene(&mut self, id: i32) {
        self.grid.set_scene(id);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.camera.move_by(dx, dy, dz);
    }

    pub fn turn(&mut self, da: f32) {
        self.camera.turn(da);
    }

    /// Barrido del frame completo, columna a columna de izquierda a
    /// derecha. La dirección del rayo avanza sumando el incremento cacheado
    /// de la cámara; no hay trigonometría por columna.
    pub fn render(&mut self) {
        let cam = &self.camera;

        // columna más a la izquierda: frontal + lateral + medio incremento,
        // desplazada para centrar el abanico en el ancho de pantalla
        let mut vx = cam.cosang + cam.sinang + cam.incvx * 0.5;
        let mut vy = cam.sinang - cam.cosang + cam.incvy * 0.5;
        let off = (self.fb.height as i32 - self.fb.width as i32 / 2) as f32;
        vx += off * cam.incvx;
        vy += off * cam.incvy;

        for sx in 0..self.fb.width {
            let caster = ColumnCaster {
                grid: &self.grid,
                cam,
                vx,
                vy,
                incx: vx.abs(),
                incy: vy.abs(),
                xdir: if vx > 0.0 { 1 } else { -1 },
                ydir: if vy > 0.0 { 1 } else { -1 },
                sx,
            };
            caster.scan(&mut self.fb);
            vx += cam.incvx;
            vy += cam.incvy;
        }
    }

    /// Instantánea de solo lectura; válida hasta el siguiente render.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.fb.color_buffer
    }

    pub fn frame_buffer_size(&self) -> usize {
        (self.fb.width * self.fb.height) as usize
    }

    pub fn width(&self) -> u32 {
        self.fb.width
    }

    pub fn height(&self) -> u32 {
        self.fb.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // filas con algún pixel no-fondo en una columna, de arriba a abajo
    fn lit_rows(r: &Renderer, col: u32) -> Vec<(u32, u8)> {
        (0..r.height())
            .filter_map(|y| {
                let p = r.frame_buffer()[(y * r.width() + col) as usize];
                (p != 0).then_some((y, p))
            })
            .collect()
    }

    fn contiguous(rows: &[(u32, u8)]) -> bool {
        rows.windows(2).all(|w| w[1].0 == w[0].0 + 1)
    }

    #[test]
    fn test_empty_grid_renders_all_background() {
        let mut r = Renderer::new(8, 8);
        r.camera.x = 32.5;
        r.camera.y = 32.5;
        r.camera.z = 32.5;
        r.render();
        assert!(r.frame_buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_single_voxel_ahead_lights_center_columns() {
        let mut r = Renderer::new(8, 8);
        // celda lógica (33,32,32) justo delante de la cámara mirando +X
        r.grid.set(32, 31, 31, 1);
        r.camera.x = 30.5;
        r.camera.y = 32.5;
        r.camera.z = 32.5;
        r.render();

        for col in [2u32, 3, 4, 5] {
            let rows = lit_rows(&r, col);
            assert!(!rows.is_empty(), "columna {col} apagada");
            assert!(contiguous(&rows), "columna {col} no contigua: {rows:?}");
            // material 1: base 12 más sombreado de cara
            for &(_, p) in &rows {
                assert!((12..=17).contains(&p), "color inesperado {p}");
            }
        }
        for col in [0u32, 1, 6, 7] {
            assert!(lit_rows(&r, col).is_empty(), "columna {col} no vacía");
        }
    }

    #[test]
    fn test_gap_between_voxels_stays_background() {
        let mut r = Renderer::new(16, 16);
        // dos celdas en la misma vertical con cuatro celdas de aire entre
        // ellas: lógicas (33,32,32) material 2 y (33,32,37) material 1
        r.grid.set(32, 31, 31, 2);
        r.grid.set(32, 31, 36, 1);
        r.camera.x = 27.5;
        r.camera.y = 32.5;
        r.camera.z = 34.5;
        r.render();

        let rows = lit_rows(&r, 7);
        assert!(!rows.is_empty());
        let upper: Vec<_> = rows.iter().filter(|&&(_, p)| (18..=23).contains(&p)).collect();
        let lower: Vec<_> = rows.iter().filter(|&&(_, p)| (12..=17).contains(&p)).collect();
        assert!(!upper.is_empty(), "falta el tramo del material 2: {rows:?}");
        assert!(!lower.is_empty(), "falta el tramo del material 1: {rows:?}");
        assert_eq!(upper.len() + lower.len(), rows.len(), "colores ajenos: {rows:?}");
        let top_end = upper.iter().map(|&&(y, _)| y).max().unwrap();
        let bottom_start = lower.iter().map(|&&(y, _)| y).min().unwrap();
        // el hueco entre ambos tramos queda en fondo, no extendido
        assert!(bottom_start > top_end + 1, "sin hueco: {rows:?}");
        for y in (top_end + 1)..bottom_start {
            assert_eq!(r.frame_buffer()[(y * 16 + 7) as usize], 0);
        }
    }

    #[test]
    fn test_solid_grid_fills_frame() {
        let mut r = Renderer::new(16, 16);
        for x in 0..crate::voxels::GRID {
            for y in 0..crate::voxels::GRID {
                for z in 0..crate::voxels::GRID {
                    r.grid.set(x, y, z, 3);
                }
            }
        }
        r.camera.x = 32.5;
        r.camera.y = 32.5;
        r.camera.z = 32.5;
        r.render();
        // rodeada de sólido no queda ni un pixel de fondo
        assert!(r.frame_buffer().iter().all(|&p| p != 0));
    }

    #[test]
    fn test_render_terminates_for_any_pose() {
        let mut r = Renderer::new(16, 16);
        r.set_scene(2);
        for (x, y, z, ang) in [
            (32.5, 32.5, 32.5, 0.0),
            (32.5, 32.5, 32.5, std::f32::consts::FRAC_PI_2),
            (32.0, 32.0, 32.0, std::f32::consts::PI),
            (-80.0, 32.5, 32.5, 0.0),
            (32.5, 32.5, -40.0, 1.234),
            (500.0, 500.0, 500.0, 0.7),
        ] {
            r.camera.x = x;
            r.camera.y = y;
            r.camera.z = z;
            r.camera.ang = 0.0;
            r.camera.turn(ang);
            r.render();
            // ningún índice fuera del rango de la paleta de materiales
            assert!(r.frame_buffer().iter().all(|&p| p <= 197));
        }
    }

    #[test]
    fn test_accessors_match_dimensions() {
        let r = Renderer::new(320, 200);
        assert_eq!(r.width(), 320);
        assert_eq!(r.height(), 200);
        assert_eq!(r.frame_buffer_size(), 320 * 200);
        assert_eq!(r.frame_buffer().len(), 320 * 200);
    }
}
