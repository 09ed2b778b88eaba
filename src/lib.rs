//! # terrain_pathfinding
//!
//! Cost-aware pathfinding on a fixed-size grid whose cells carry an elevation (the cost
//! of entering them) and a role: source, target, wall or normal. The search is a
//! best-first search that is driven one step at a time, so a front-end can show the
//! frontier growing. It stops as soon as it touches any of the targets.
//!
//! The pieces, from the bottom up:
//! - [heap::Heap], a binary heap ordered by a predicate,
//! - [grid::Grid] and [cell::Cell], the cells and their invariants, with
//!   [observable::Observable] change notification,
//! - [terrain::TerrainGenerator], which fills a grid with seeded noise,
//! - [search::SearchEngine], the stepwise search itself.
//!
//! ```
//! use terrain_pathfinding::{Grid, SearchEngine, SearchOutcome};
//!
//! let mut grid = Grid::new(3, 1);
//! grid.cell_mut(0, 0).unwrap().set_source();
//! grid.cell_mut(2, 0).unwrap().set_target();
//! let mut engine = SearchEngine::new();
//! engine.start(&mut grid);
//! engine.run_to_completion(&mut grid);
//! assert!(matches!(engine.outcome(), Some(SearchOutcome::Success { .. })));
//! assert!(grid.get_cell(1, 0).unwrap().is_path());
//! ```
pub mod cell;
pub mod error;
pub mod grid;
pub mod heap;
pub mod observable;
pub mod score_range;
pub mod search;
pub mod terrain;

pub use cell::{Cell, CellState};
pub use error::{HeapError, SearchError, TerrainError};
pub use grid::{CellMut, Grid, Neighbour};
pub use heap::Heap;
pub use observable::{ListenerId, Observable};
pub use score_range::{ScoreBounds, ScoreRange};
pub use search::{
    CostModel, DistanceMetric, PathNode, SearchConfig, SearchEngine, SearchOutcome,
    SearchState, SearchStats,
};
pub use terrain::TerrainGenerator;

pub const MIN_ELEVATION: f64 = 1.0;
pub const MAX_ELEVATION: f64 = 40.0;
/// Score of a cell the current search has not reached.
pub const UNVISITED: f64 = -1.0;
pub const N_SMALLVEC_SIZE: usize = 8;
