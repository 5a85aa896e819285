use crate::voxels::GRID;

/// Estado de cámara: posición continua en unidades de celda, rumbo y los
/// valores derivados que el barrido por columnas reutiliza todo el frame.
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub ang: f32, // rumbo (yaw)
    pub cosang: f32,
    pub sinang: f32,
    // incremento de dirección por columna, escala 1/alto
    pub incvx: f32,
    pub incvy: f32,
    // constantes de proyección: alto de pantalla y media altura
    pub xd: f32,
    pub yd: f32,
}

impl Camera {
    /// Pose inicial: fuera de la rejilla, mirando +X hacia su interior.
    pub fn new(height: u32) -> Self {
        let mut cam = Self {
            x: -(GRID as f32) / 2.0,
            y: GRID as f32 / 2.0,
            z: GRID as f32 / 2.0,
            ang: 0.0,
            cosang: 0.0,
            sinang: 0.0,
            incvx: 0.0,
            incvy: 0.0,
            xd: height as f32,
            yd: (height / 2) as f32,
        };
        cam.turn(0.0);
        cam
    }

    /// Traslación relativa a la vista: dx lateral, dy hacia delante, dz
    /// vertical. Sin límites: el borde vacío de la rejilla mantiene seguro
    /// el recorrido desde cualquier posición.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += self.sinang * dx + self.cosang * dy;
        self.y += -self.cosang * dx + self.sinang * dy;
        self.z += dz;
    }

    /// Gira y regenera coseno/seno y el incremento por columna.
    /// El incremento queda válido para todo el siguiente frame.
    pub fn turn(&mut self, da: f32) {
        self.ang += da;
        self.cosang = self.ang.cos();
        self.sinang = self.ang.sin();

        let f = 1.0 / self.xd;
        self.incvx = -self.sinang * f;
        self.incvy = self.cosang * f;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_refreshes_cached_values() {
        let mut cam = Camera::new(480);
        cam.turn(0.5);
        assert!((cam.ang - 0.5).abs() < 1e-6);
        assert!((cam.cosang - 0.5f32.cos()).abs() < 1e-6);
        assert!((cam.sinang - 0.5f32.sin()).abs() < 1e-6);
        assert!((cam.incvx + 0.5f32.sin() / 480.0).abs() < 1e-9);
        assert!((cam.incvy - 0.5f32.cos() / 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_is_view_relative() {
        let mut cam = Camera::new(480);
        let (x0, y0, z0) = (cam.x, cam.y, cam.z);
        // con rumbo 0, avanzar es +X y el lateral es -Y
        cam.move_by(0.0, 2.0, 0.0);
        assert!((cam.x - (x0 + 2.0)).abs() < 1e-6);
        assert!((cam.y - y0).abs() < 1e-6);
        cam.move_by(2.0, 0.0, 0.0);
        assert!((cam.y - (y0 - 2.0)).abs() < 1e-6);
        cam.move_by(0.0, 0.0, 1.5);
        assert!((cam.z - (z0 + 1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_projection_constants_follow_height() {
        let cam = Camera::new(480);
        assert_eq!(cam.xd, 480.0);
        assert_eq!(cam.yd, 240.0);
        // altura impar: media altura entera
        let cam = Camera::new(9);
        assert_eq!(cam.yd, 4.0);
    }
}
