/// Framebuffer de índices de paleta: un byte por pixel, row-major.
/// La paleta de 256 colores vive fuera (el shell la instala al presentar).
pub struct Framebuffer {
    pub color_buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub background_color: u8,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![0; size],
            width,
            height,
            background_color: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    /// Pinta la franja vertical [y0, y1) de la columna x.
    /// Los extremos se recortan al alto; fuera de rango no escribe nada.
    #[inline]
    pub fn draw_segment(&mut self, x: u32, y0: i32, y1: i32, color: u8) {
        if x >= self.width {
            return;
        }
        let h = self.height as i32;
        let y0 = y0.clamp(0, h) as u32;
        let y1 = y1.clamp(0, h) as u32;
        for y in y0..y1 {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> u8 {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }
}
