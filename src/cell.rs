use crate::{MAX_ELEVATION, MIN_ELEVATION, UNVISITED};
use grid_util::point::Point;

/// The role a cell plays in a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Normal,
    Source,
    Target,
    Wall,
}

/// A single square of a [Grid](crate::grid::Grid). Cells are only ever created by
/// the grid that owns them and are mutated through [CellMut](crate::grid::CellMut),
/// so every change reaches the grid's listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    point: Point,
    state: CellState,
    elevation: f64,
    score: f64,
    frontier: bool,
    path: bool,
}

impl Cell {
    pub(crate) fn new(point: Point) -> Cell {
        Cell {
            point,
            state: CellState::Normal,
            elevation: MIN_ELEVATION,
            score: UNVISITED,
            frontier: false,
            path: false,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }
    pub fn x(&self) -> i32 {
        self.point.x
    }
    pub fn y(&self) -> i32 {
        self.point.y
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn is_normal(&self) -> bool {
        self.state == CellState::Normal
    }
    pub fn is_source(&self) -> bool {
        self.state == CellState::Source
    }
    pub fn is_target(&self) -> bool {
        self.state == CellState::Target
    }
    pub fn is_wall(&self) -> bool {
        self.state == CellState::Wall
    }
    /// Traversal cost of entering this cell, always within
    /// [MIN_ELEVATION]..=[MAX_ELEVATION].
    pub fn elevation(&self) -> f64 {
        self.elevation
    }
    /// Best score the current search assigned to this cell, or [UNVISITED].
    pub fn score(&self) -> f64 {
        self.score
    }
    pub fn is_visited(&self) -> bool {
        self.score != UNVISITED
    }
    pub fn is_frontier(&self) -> bool {
        self.frontier
    }
    pub fn is_path(&self) -> bool {
        self.path
    }

    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to `other`.
    pub fn grid_distance(&self, other: Point) -> i32 {
        (other.x - self.point.x).abs() + (other.y - self.point.y).abs()
    }

    /// Straight-line distance to `other`.
    pub fn line_distance(&self, other: Point) -> f64 {
        let dx = (other.x - self.point.x) as f64;
        let dy = (other.y - self.point.y) as f64;
        dx.hypot(dy)
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
    pub(crate) fn set_elevation(&mut self, elevation: f64) {
        self.elevation = clamp_elevation(elevation);
    }
    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
    }
    pub(crate) fn set_frontier(&mut self, frontier: bool) {
        self.frontier = frontier;
    }
    pub(crate) fn set_path(&mut self, path: bool) {
        self.path = path;
    }
}

/// Clamps a requested elevation into the valid range. NaN is treated as the minimum.
pub fn clamp_elevation(elevation: f64) -> f64 {
    if elevation.is_nan() {
        MIN_ELEVATION
    } else {
        num_traits::clamp(elevation, MIN_ELEVATION, MAX_ELEVATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_defaults() {
        let cell = Cell::new(Point::new(2, 3));
        assert_eq!((cell.x(), cell.y()), (2, 3));
        assert!(cell.is_normal());
        assert_eq!(cell.elevation(), 1.0);
        assert_eq!(cell.score(), UNVISITED);
        assert!(!cell.is_visited());
        assert!(!cell.is_frontier() && !cell.is_path());
    }

    #[test]
    fn elevation_is_clamped() {
        let mut cell = Cell::new(Point::new(0, 0));
        cell.set_elevation(100.0);
        assert_eq!(cell.elevation(), MAX_ELEVATION);
        cell.set_elevation(-3.0);
        assert_eq!(cell.elevation(), MIN_ELEVATION);
        cell.set_elevation(f64::NAN);
        assert_eq!(cell.elevation(), MIN_ELEVATION);
        cell.set_elevation(12.5);
        assert_eq!(cell.elevation(), 12.5);
    }

    #[test]
    fn distances() {
        let cell = Cell::new(Point::new(1, 1));
        assert_eq!(cell.grid_distance(Point::new(4, 5)), 7);
        assert_eq!(cell.line_distance(Point::new(4, 5)), 5.0);
        assert_eq!(cell.grid_distance(Point::new(1, 1)), 0);
        assert_eq!(cell.line_distance(Point::new(1, 1)), 0.0);
    }
}
