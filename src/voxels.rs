use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lado del cubo de voxeles.
pub const GRID: usize = 64;

/// Rejilla 64x64x64 de ids de material (0 = aire).
///
/// Coordenadas lógicas 1..=GRID; 0 y GRID+1 son un borde virtual siempre
/// vacío, así el recorrido termina saliendo de la rejilla sin chequear
/// índices en el camino caliente.
pub struct VoxelGrid {
    data: Vec<u8>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self {
            data: vec![0; GRID * GRID * GRID],
        }
    }

    #[inline]
    fn idx(x: usize, y: usize, z: usize) -> usize {
        (x * GRID + y) * GRID + z
    }

    /// Escribe un material en coordenadas de almacenamiento (0..GRID).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: u8) {
        self.data[Self::idx(x, y, z)] = v;
    }

    /// ¿Sigue (x,y,z) dentro del rango extendido con borde?
    #[inline]
    pub fn inside(&self, x: i32, y: i32, z: i32) -> bool {
        let n = GRID as i32;
        x >= 0 && x <= n + 1 && y >= 0 && y <= n + 1 && z >= 0 && z <= n + 1
    }

    /// Color base de paleta de la celda lógica (x,y,z): 0 si vacía o fuera,
    /// (v+1)*6 si contiene el material v. El sombreado por cara se suma aparte.
    #[inline]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> u8 {
        let n = GRID as i32;
        if x < 1 || x > n || y < 1 || y > n || z < 1 || z > n {
            return 0;
        }
        let v = self.data[Self::idx((x - 1) as usize, (y - 1) as usize, (z - 1) as usize)];
        if v != 0 {
            ((v as u32 + 1) * 6) as u8
        } else {
            0
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Vacía la rejilla y la rellena según la escena pedida.
    /// Un id desconocido la deja vacía.
    pub fn set_scene(&mut self, id: i32) {
        self.clear();
        match id {
            1 => self.build_beams(),
            2 => self.build_checker(),
            3 => self.build_shell(),
            4 => self.build_scatter(),
            5 => self.build_dots(),
            _ => {}
        }
    }

    // Vigas alineadas a los ejes: dos de las tres coordenadas múltiplos de 8.
    fn build_beams(&mut self) {
        let mut rng = StdRng::seed_from_u64(1);
        for x in 0..GRID {
            for y in 0..GRID {
                for z in 0..GRID {
                    if ((x & 7 == 0) && (y & 7 == 0))
                        || ((x & 7 == 0) && (z & 7 == 0))
                        || ((z & 7 == 0) && (y & 7 == 0))
                    {
                        self.set(x, y, z, rand_color(&mut rng));
                    }
                }
            }
        }
    }

    // Tablero 3D: celdas con las tres coordenadas impares.
    fn build_checker(&mut self) {
        let mut rng = StdRng::seed_from_u64(2);
        for x in 0..GRID {
            for y in 0..GRID {
                for z in 0..GRID {
                    if x & y & z & 1 != 0 {
                        self.set(x, y, z, rand_color(&mut rng));
                    }
                }
            }
        }
    }

    // Caja hueca: ambas caras Z, ambas caras Y y solo la cara X lejana.
    // La cara X cercana queda abierta hacia la cámara inicial.
    fn build_shell(&mut self) {
        let mut rng = StdRng::seed_from_u64(3);
        for x in 0..GRID {
            for y in 0..GRID {
                self.set(x, y, GRID - 1, rand_color(&mut rng));
                self.set(x, y, 0, rand_color(&mut rng));
            }
        }
        for x in 0..GRID {
            for z in 0..GRID {
                self.set(x, 0, z, rand_color(&mut rng));
                self.set(x, GRID - 1, z, rand_color(&mut rng));
            }
        }
        for y in 0..GRID {
            for z in 0..GRID {
                self.set(GRID - 1, y, z, rand_color(&mut rng));
            }
        }
    }

    // Dispersión aleatoria: 1/16 de las celdas. Sin semilla fija para que
    // re-seleccionar la escena genere una nube nueva.
    fn build_scatter(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..(GRID * GRID * GRID >> 4) {
            let x = rng.gen_range(0..GRID);
            let y = rng.gen_range(0..GRID);
            let z = rng.gen_range(0..GRID);
            self.set(x, y, z, rand_color(&mut rng));
        }
    }

    // Puntos en retícula: las tres coordenadas múltiplos de 4.
    fn build_dots(&mut self) {
        let mut rng = StdRng::seed_from_u64(5);
        for x in 0..GRID {
            for y in 0..GRID {
                for z in 0..GRID {
                    if (x & 3 == 0) && (y & 3 == 0) && (z & 3 == 0) {
                        self.set(x, y, z, rand_color(&mut rng));
                    }
                }
            }
        }
    }
}

#[inline]
fn rand_color(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..32)
}
