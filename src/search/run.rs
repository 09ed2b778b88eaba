use super::config::{CostModel, DistanceMetric, SearchConfig};
use crate::cell::Cell;
use crate::error::HeapError;
use crate::grid::Grid;
use crate::heap::Heap;
use crate::UNVISITED;
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexSet;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A node of the search tree. Parents are indices into the run's node arena, the
/// source node has none.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub point: Point,
    /// Sum of the elevations entered on the way here from the source.
    pub cumulative_cost: f64,
    pub score: f64,
    pub parent: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FrontierEntry {
    score: f64,
    node: usize,
}

fn lower_score(a: &FrontierEntry, b: &FrontierEntry) -> bool {
    a.score < b.score
}

type Frontier = Heap<FrontierEntry, fn(&FrontierEntry, &FrontierEntry) -> bool>;

/// What happened to a cell offered to the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Visit {
    /// The cell was already reached through this parent.
    Skipped,
    /// The cell got a better score and was pushed.
    Queued,
    /// The cell already had an equal or better score.
    Ignored,
    /// The cell is a target; holds the index of its node.
    Reached(usize),
}

/// State owned by a single search from start to finish.
#[derive(Debug)]
pub(crate) struct SearchRun {
    targets: FxIndexSet<Point>,
    frontier: Frontier,
    nodes: Vec<PathNode>,
    // Cell -> cells it has been reached from or has reached, so an edge is only
    // walked once in either direction.
    visited: FxHashMap<Point, FxHashSet<Point>>,
    last_expanded: Option<usize>,
}

impl SearchRun {
    pub fn new<I: IntoIterator<Item = Point>>(targets: I) -> SearchRun {
        let better: fn(&FrontierEntry, &FrontierEntry) -> bool = lower_score;
        SearchRun {
            targets: targets.into_iter().collect(),
            frontier: Heap::new(better),
            nodes: Vec::new(),
            visited: FxHashMap::default(),
            last_expanded: None,
        }
    }

    pub fn targets(&self) -> &FxIndexSet<Point> {
        &self.targets
    }
    pub fn node(&self, ix: usize) -> &PathNode {
        &self.nodes[ix]
    }
    pub fn last_expanded(&self) -> Option<&PathNode> {
        self.last_expanded.map(|ix| &self.nodes[ix])
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Takes the node with the lowest score off the frontier.
    pub fn pop(&mut self) -> Result<usize, HeapError> {
        let entry = self.frontier.extract()?;
        self.last_expanded = Some(entry.node);
        Ok(entry.node)
    }

    /// 0 if `cell` sits on a target under `metric`, 1 otherwise.
    fn target_distance(&self, cell: &Cell, metric: DistanceMetric) -> f64 {
        if self.targets.iter().any(|t| metric.measure(cell, *t) == 0.0) {
            0.0
        } else {
            1.0
        }
    }

    /// Offers `point` to the frontier as a child of `parent`, or as the root if there
    /// is no parent. Improved scores are written back to the grid.
    pub fn visit(
        &mut self,
        grid: &mut Grid,
        config: &SearchConfig,
        point: Point,
        parent: Option<usize>,
    ) -> Visit {
        let parent_cost = match parent {
            Some(ix) => {
                let parent_point = self.nodes[ix].point;
                if !self.visited.entry(point).or_default().insert(parent_point) {
                    return Visit::Skipped;
                }
                self.visited.entry(parent_point).or_default().insert(point);
                Some(self.nodes[ix].cumulative_cost)
            }
            None => None,
        };
        let Some(cell) = grid.get_cell_point(point) else {
            return Visit::Ignored;
        };
        let (cumulative_cost, cost) = match parent_cost {
            None => (0.0, 0.0),
            Some(c) => {
                let cumulative = c + cell.elevation();
                match config.cost_model {
                    CostModel::Step => (cumulative, cell.elevation()),
                    CostModel::Accumulated => (cumulative, cumulative),
                }
            }
        };
        let distance = self.target_distance(cell, config.distance_metric);
        let score = cost + config.heuristic_weight * distance;
        let current = cell.score();
        let node = PathNode {
            point,
            cumulative_cost,
            score,
            parent,
        };
        if distance == 0.0 {
            self.nodes.push(node);
            return Visit::Reached(self.nodes.len() - 1);
        }
        if current != UNVISITED && score >= current {
            return Visit::Ignored;
        }
        self.nodes.push(node);
        self.frontier.insert(FrontierEntry {
            score,
            node: self.nodes.len() - 1,
        });
        if let Some(mut cell) = grid.cell_mut_point(point) {
            cell.set_frontier(true);
            cell.set_score(score);
        }
        Visit::Queued
    }

    /// Cells between the source and the node `ix`, both excluded, starting next to the
    /// source.
    pub fn path_to(&self, ix: usize) -> Vec<Point> {
        let mut path: Vec<Point> = std::iter::successors(Some(ix), |&i| self.nodes[i].parent)
            .map(|i| self.nodes[i].point)
            .collect();
        path.pop();
        path.reverse();
        path.pop();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig {
            heuristic_weight: 2.0,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn edges_are_walked_once_per_direction() {
        let mut grid = Grid::new(3, 1);
        let config = config();
        let mut run = SearchRun::new([Point::new(2, 0)]);
        let root = Point::new(0, 0);
        assert_eq!(run.visit(&mut grid, &config, root, None), Visit::Queued);
        assert_eq!(run.visit(&mut grid, &config, Point::new(1, 0), Some(0)), Visit::Queued);
        assert_eq!(run.visit(&mut grid, &config, Point::new(1, 0), Some(0)), Visit::Skipped);
        // Walking back from the child to the root reuses the same edge.
        assert_eq!(run.visit(&mut grid, &config, root, Some(1)), Visit::Skipped);
        assert_eq!(run.frontier_len(), 2);
    }

    /// Entries held on the frontier for `point`.
    fn queued(run: &SearchRun, point: Point) -> usize {
        run.frontier
            .iter()
            .filter(|e| run.node(e.node).point == point)
            .count()
    }

    #[test]
    fn cells_stay_open_to_new_parents() {
        //  ___
        // |b..|
        // |rX.|
        // |c..|
        //  ___
        let mut grid = Grid::new(3, 3);
        let middle = Point::new(1, 1);
        grid.cell_mut_point(middle).unwrap().set_elevation(5.0);
        let config = config();
        let mut run = SearchRun::new([]);
        assert_eq!(run.visit(&mut grid, &config, Point::new(0, 1), None), Visit::Queued);
        assert_eq!(run.visit(&mut grid, &config, middle, Some(0)), Visit::Queued);
        assert_eq!(run.visit(&mut grid, &config, Point::new(0, 0), Some(0)), Visit::Queued);
        assert_eq!(run.visit(&mut grid, &config, Point::new(0, 2), Some(0)), Visit::Queued);
        assert_eq!(grid.get_cell_point(middle).unwrap().score(), 7.0);

        // A second parent passes the edge check but cannot beat the score.
        assert_eq!(run.visit(&mut grid, &config, middle, Some(2)), Visit::Ignored);
        assert_eq!(queued(&run, middle), 1);

        // Cheaper terrain mid-run lets a third parent queue the cell again, leaving the
        // older entry on the frontier.
        grid.cell_mut_point(middle).unwrap().set_elevation(2.0);
        assert_eq!(run.visit(&mut grid, &config, middle, Some(3)), Visit::Queued);
        assert_eq!(queued(&run, middle), 2);
        assert_eq!(run.frontier_len(), 5);
        assert_eq!(grid.get_cell_point(middle).unwrap().score(), 4.0);

        // Both entries are expanded, cheapest first.
        let mut expanded = Vec::new();
        while let Ok(ix) = run.pop() {
            if run.node(ix).point == middle {
                expanded.push(run.node(ix).score);
            }
        }
        assert_eq!(expanded, vec![4.0, 7.0]);
    }

    #[test]
    fn scores_and_targets() {
        let mut grid = Grid::new(3, 1);
        grid.cell_mut(1, 0).unwrap().set_elevation(5.0);
        let config = config();
        let mut run = SearchRun::new([Point::new(2, 0)]);
        run.visit(&mut grid, &config, Point::new(0, 0), None);
        assert_eq!(run.node(0).score, 2.0);
        assert_eq!(run.node(0).cumulative_cost, 0.0);
        run.visit(&mut grid, &config, Point::new(1, 0), Some(0));
        let cell = grid.get_cell(1, 0).unwrap();
        assert_eq!(cell.score(), 7.0);
        assert!(cell.is_frontier());
        let reached = run.visit(&mut grid, &config, Point::new(2, 0), Some(1));
        assert_eq!(reached, Visit::Reached(2));
        assert_eq!(run.node(2).cumulative_cost, 6.0);
        assert_eq!(run.path_to(2), vec![Point::new(1, 0)]);
        // Reaching a target does not put it on the frontier.
        assert!(!grid.get_cell(2, 0).unwrap().is_frontier());
    }

    #[test]
    fn pops_lowest_score_first() {
        let mut grid = Grid::new(3, 3);
        grid.cell_mut(1, 0).unwrap().set_elevation(9.0);
        grid.cell_mut(0, 1).unwrap().set_elevation(3.0);
        let config = config();
        let mut run = SearchRun::new([]);
        run.visit(&mut grid, &config, Point::new(0, 0), None);
        assert_eq!(run.pop(), Ok(0));
        run.visit(&mut grid, &config, Point::new(1, 0), Some(0));
        run.visit(&mut grid, &config, Point::new(0, 1), Some(0));
        let ix = run.pop().unwrap();
        assert_eq!(run.node(ix).point, Point::new(0, 1));
        assert_eq!(run.last_expanded().map(|n| n.point), Some(Point::new(0, 1)));
        run.pop().unwrap();
        assert_eq!(run.pop(), Err(HeapError::EmptyHeap));
    }
}
