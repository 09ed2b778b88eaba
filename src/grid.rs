use crate::cell::{Cell, CellState};
use crate::observable::{ListenerId, Observable};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// An adjacent cell as returned by [Grid::neighbours].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbour {
    pub point: Point,
    pub diagonal: bool,
}

pub type Neighbours = SmallVec<[Neighbour; N_SMALLVEC_SIZE]>;

/// [Grid] owns a fixed-size matrix of [Cell]s stored row by row. It keeps track of
/// the unique source cell and forwards every cell mutation to its listeners.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    source: Option<usize>,
    listeners: Observable<Cell>,
}

impl Grid {
    /// Creates a grid of normal cells with minimal elevation.
    pub fn new(width: usize, height: usize) -> Grid {
        let cells = iproduct!(0..height as i32, 0..width as i32)
            .map(|(y, x)| Cell::new(Point::new(x, y)))
            .collect();
        Grid {
            width,
            height,
            cells,
            source: None,
            listeners: Observable::new(),
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| y as usize * self.width + x as usize)
    }
    fn index_point(&self, point: Point) -> Option<usize> {
        self.index(point.x, point.y)
    }

    /// Returns [None] if the coordinates lie outside the grid.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|ix| &self.cells[ix])
    }
    pub fn get_cell_point(&self, point: Point) -> Option<&Cell> {
        self.get_cell(point.x, point.y)
    }
    /// Mutable access to a cell. All changes made through the returned handle notify
    /// the grid's listeners.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<CellMut<'_>> {
        let ix = self.index(x, y)?;
        Some(CellMut { grid: self, ix })
    }
    pub fn cell_mut_point(&mut self, point: Point) -> Option<CellMut<'_>> {
        self.cell_mut(point.x, point.y)
    }
    /// Iterates all cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn source(&self) -> Option<Point> {
        self.source.map(|ix| self.cells[ix].point())
    }
    pub fn targets(&self) -> Vec<Point> {
        self.cells
            .iter()
            .filter(|c| c.is_target())
            .map(Cell::point)
            .collect()
    }

    /// Subscribes to every cell mutation on this grid.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Cell) + 'static,
    {
        self.listeners.add_listener(listener)
    }
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    fn update<F: FnOnce(&mut Cell)>(&mut self, ix: usize, f: F) {
        f(&mut self.cells[ix]);
        self.listeners.notify(&self.cells[ix]);
    }

    /// Keeps at most one source around: a new source demotes the previous one, and a
    /// source that changes state is forgotten.
    fn on_state_change(&mut self, ix: usize) {
        let is_source = self.cells[ix].is_source();
        if is_source && self.source != Some(ix) {
            if let Some(previous) = self.source {
                self.update(previous, |c| c.set_state(CellState::Normal));
                self.on_state_change(previous);
            }
            self.source = Some(ix);
        }
        if self.source == Some(ix) && !is_source {
            self.source = None;
        }
    }

    /// The four orthogonal and, if requested, four diagonal cells around `point`,
    /// leaving out positions beyond the border.
    pub fn neighbours(&self, point: Point, include_diagonal: bool) -> Neighbours {
        let diagonal: &[(i32, i32)] = if include_diagonal { &DIAGONAL } else { &[] };
        ORTHOGONAL
            .iter()
            .map(|d| (d, false))
            .chain(diagonal.iter().map(|d| (d, true)))
            .map(|(&(dx, dy), diagonal)| Neighbour {
                point: Point::new(point.x + dx, point.y + dy),
                diagonal,
            })
            .filter(|n| self.in_bounds(n.point.x, n.point.y))
            .collect()
    }

    /// Like [neighbours](Self::neighbours) but without walls. A diagonal step is also
    /// refused if either cell it would cut past is a wall.
    pub fn non_wall_neighbours(&self, point: Point, include_diagonal: bool) -> Neighbours {
        self.neighbours(point, include_diagonal)
            .into_iter()
            .filter(|n| self.can_move_to(n.point, point))
            .collect()
    }

    /// Whether a single step from `start` to the adjacent `pos` is allowed.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        self.is_walkable(pos) && !self.is_wall(pos.x, start.y) && !self.is_wall(start.x, pos.y)
    }
    fn is_walkable(&self, pos: Point) -> bool {
        self.get_cell_point(pos).is_some_and(|c| !c.is_wall())
    }
    fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get_cell(x, y).is_some_and(Cell::is_wall)
    }

    /// Groups walkable cells into connected components under the same movement rules
    /// as [non_wall_neighbours](Self::non_wall_neighbours).
    pub fn components(&self, include_diagonal: bool) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if cell.is_wall() {
                continue;
            }
            for n in self.non_wall_neighbours(cell.point(), include_diagonal) {
                if let Some(n_ix) = self.index_point(n.point) {
                    components.union(ix, n_ix);
                }
            }
        }
        components
    }

    /// Checks if `start` and `goal` are walkable and on the same connected component.
    pub fn reachable(&self, start: Point, goal: Point, include_diagonal: bool) -> bool {
        self.reachable_with(&self.components(include_diagonal), start, goal)
    }

    /// Same as [reachable](Self::reachable) with components computed beforehand.
    pub fn reachable_with(&self, components: &UnionFind<usize>, start: Point, goal: Point) -> bool {
        match (self.index_point(start), self.index_point(goal)) {
            (Some(s), Some(g)) => {
                !self.cells[s].is_wall() && !self.cells[g].is_wall() && components.equiv(s, g)
            }
            _ => false,
        }
    }

    pub fn mark_path<I: IntoIterator<Item = Point>>(&mut self, points: I) {
        for p in points {
            if let Some(ix) = self.index_point(p) {
                self.update(ix, |c| c.set_path(true));
            }
        }
    }
    pub fn reset_paths(&mut self) {
        self.update_all(|c| c.set_path(false));
    }
    pub fn reset_scores(&mut self) {
        self.update_all(|c| c.set_score(crate::UNVISITED));
    }
    pub fn reset_frontier(&mut self) {
        self.update_all(|c| c.set_frontier(false));
    }
    fn update_all<F: Fn(&mut Cell)>(&mut self, f: F) {
        for ix in 0..self.cells.len() {
            self.update(ix, &f);
        }
    }
}

/// Mutation handle for one cell of a [Grid], obtained from [Grid::cell_mut].
pub struct CellMut<'a> {
    grid: &'a mut Grid,
    ix: usize,
}

impl CellMut<'_> {
    pub fn cell(&self) -> &Cell {
        &self.grid.cells[self.ix]
    }
    pub fn set_state(&mut self, state: CellState) {
        self.grid.update(self.ix, |c| c.set_state(state));
        self.grid.on_state_change(self.ix);
    }
    pub fn set_normal(&mut self) {
        self.set_state(CellState::Normal);
    }
    pub fn set_source(&mut self) {
        self.set_state(CellState::Source);
    }
    pub fn set_target(&mut self) {
        self.set_state(CellState::Target);
    }
    pub fn set_wall(&mut self) {
        self.set_state(CellState::Wall);
    }
    /// Values outside the valid elevation range are clamped.
    pub fn set_elevation(&mut self, elevation: f64) {
        self.grid.update(self.ix, |c| c.set_elevation(elevation));
    }
    pub fn set_score(&mut self, score: f64) {
        self.grid.update(self.ix, |c| c.set_score(score));
    }
    pub fn set_frontier(&mut self, frontier: bool) {
        self.grid.update(self.ix, |c| c.set_frontier(frontier));
    }
    pub fn set_path(&mut self, path: bool) {
        self.grid.update(self.ix, |c| c.set_path(path));
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("source", &self.source())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row
                .iter()
                .map(|c| match c.state() {
                    CellState::Source => 'S',
                    CellState::Target => 'T',
                    CellState::Wall => '#',
                    CellState::Normal if c.is_path() => '*',
                    CellState::Normal if c.is_frontier() => '+',
                    CellState::Normal => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
