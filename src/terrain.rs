//! Fills a [Grid] with a smooth elevation field so that searches have varied costs
//! to work with.
use crate::cell::clamp_elevation;
use crate::error::TerrainError;
use crate::grid::Grid;
use itertools::iproduct;
use log::debug;
use noise::{NoiseFn, Perlin};

pub const DEFAULT_SEED: u32 = 15;
pub const DEFAULT_SCALE: f64 = 25.0;

/// Elevation halfway between the minimum and maximum, which is where noise value 0 lands.
const BASE_ELEVATION: f64 = 20.0;

/// Deterministic terrain from seeded [Perlin] noise. The same seed, scale and grid
/// dimensions always produce the same elevations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainGenerator {
    seed: u32,
    scale: f64,
}

impl Default for TerrainGenerator {
    fn default() -> TerrainGenerator {
        TerrainGenerator {
            seed: DEFAULT_SEED,
            scale: DEFAULT_SCALE,
        }
    }
}

impl TerrainGenerator {
    /// Larger scales give broader hills, and a negative scale mirrors the field. The
    /// scale must be finite and non-zero.
    pub fn new(seed: u32, scale: f64) -> Result<TerrainGenerator, TerrainError> {
        if !scale.is_finite() || scale == 0.0 {
            return Err(TerrainError::InvalidScale(scale));
        }
        Ok(TerrainGenerator { seed, scale })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Elevation of cell `(x, y)` on a `width` by `height` grid. Coordinates are taken
    /// relative to the grid centre.
    pub fn sample(&self, x: i32, y: i32, width: usize, height: usize) -> f64 {
        self.sample_with(&Perlin::new(self.seed), x, y, width, height)
    }

    fn sample_with(&self, noise: &Perlin, x: i32, y: i32, width: usize, height: usize) -> f64 {
        let nx = (x as f64 - width as f64 / 2.0) / self.scale;
        let ny = (y as f64 - height as f64 / 2.0) / self.scale;
        clamp_elevation(BASE_ELEVATION * (1.0 + noise.get([nx, ny])))
    }

    /// Assigns an elevation to every cell of `grid`.
    pub fn apply(&self, grid: &mut Grid) {
        debug!(
            "Generating terrain with seed {} and scale {} on a {}x{} grid",
            self.seed,
            self.scale,
            grid.width(),
            grid.height()
        );
        let noise = Perlin::new(self.seed);
        let (width, height) = (grid.width(), grid.height());
        for (x, y) in iproduct!(0..width as i32, 0..height as i32) {
            let elevation = self.sample_with(&noise, x, y, width, height);
            if let Some(mut cell) = grid.cell_mut(x, y) {
                cell.set_elevation(elevation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_ELEVATION, MIN_ELEVATION};

    fn elevations(grid: &Grid) -> Vec<f64> {
        grid.cells().map(|c| c.elevation()).collect()
    }

    #[test]
    fn deterministic() {
        let generator = TerrainGenerator::new(42, 10.0).unwrap();
        let mut a = Grid::new(30, 20);
        let mut b = Grid::new(30, 20);
        generator.apply(&mut a);
        generator.apply(&mut b);
        let (ea, eb) = (elevations(&a), elevations(&b));
        assert!(ea.iter().zip(&eb).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn within_bounds_and_varied() {
        let mut grid = Grid::new(40, 40);
        TerrainGenerator::new(7, 6.0).unwrap().apply(&mut grid);
        let e = elevations(&grid);
        assert!(e.iter().all(|v| (MIN_ELEVATION..=MAX_ELEVATION).contains(v)));
        assert!(e.iter().any(|v| (v - e[0]).abs() > 1e-9));
    }

    #[test]
    fn sample_matches_apply() {
        let generator = TerrainGenerator::default();
        let mut grid = Grid::new(12, 9);
        generator.apply(&mut grid);
        for cell in grid.cells() {
            assert_eq!(cell.elevation(), generator.sample(cell.x(), cell.y(), 12, 9));
        }
    }

    #[test]
    fn grid_centre_sits_at_base_elevation() {
        // Perlin noise vanishes on integer lattice points, and the centre maps to (0, 0).
        let generator = TerrainGenerator::new(3, 5.0).unwrap();
        assert_eq!(generator.sample(10, 10, 20, 20), BASE_ELEVATION);
    }

    #[test]
    fn invalid_scale() {
        assert_eq!(
            TerrainGenerator::new(1, 0.0),
            Err(TerrainError::InvalidScale(0.0))
        );
        assert!(TerrainGenerator::new(1, -0.0).is_err());
        assert!(TerrainGenerator::new(1, f64::INFINITY).is_err());
        assert!(TerrainGenerator::new(1, f64::NAN).is_err());
    }

    #[test]
    fn negative_scale_mirrors_the_field() {
        let (w, h) = (16, 12);
        let forward = TerrainGenerator::new(9, 4.0).unwrap();
        let mirrored = TerrainGenerator::new(9, -4.0).unwrap();
        assert_eq!(mirrored.scale(), -4.0);
        for (x, y) in iproduct!(0..w as i32, 0..h as i32) {
            // Negating the scale negates both offsets from the centre.
            let (mx, my) = (w as i32 - x, h as i32 - y);
            assert_eq!(mirrored.sample(x, y, w, h), forward.sample(mx, my, w, h));
        }
        let mut grid = Grid::new(w, h);
        mirrored.apply(&mut grid);
        assert!(elevations(&grid)
            .iter()
            .all(|v| (MIN_ELEVATION..=MAX_ELEVATION).contains(v)));
    }
}
