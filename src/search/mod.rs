//! Stepwise best-first search from the grid's source to the nearest of its targets.
//!
//! A [SearchEngine] keeps no reference to the [Grid]; every call that touches cells
//! takes it as an argument, so the engine annotates whichever grid the caller passes in.
//! Searches either run to completion in one go or are paced by calling
//! [tick](SearchEngine::tick) from the host's event loop.
use crate::cell::Cell;
use crate::error::{HeapError, SearchError};
use crate::grid::Grid;
use crate::score_range::ScoreRange;
use grid_util::point::Point;
use log::{debug, info, log_enabled, trace, warn, Level};
use std::time::{Duration, Instant};

pub mod config;
mod pacing;
mod run;

pub use config::{CostModel, DistanceMetric, SearchConfig, DEFAULT_INTERVAL};
pub use run::PathNode;

use config::validate_heuristic_weight;
use pacing::PacingTimer;
use run::{SearchRun, Visit};

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Success {
        /// The target that was reached.
        target: Point,
        /// Cells strictly between the source and the target, starting next to the source.
        path: Vec<Point>,
        /// Sum of elevations entered from the source up to and including the target.
        cost: f64,
    },
    /// The frontier ran out before any target was reached.
    Failure,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Finished(SearchOutcome),
}

/// Counters for the current or last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to [step](SearchEngine::step) that did work, including the one that found
    /// the frontier empty.
    pub steps: usize,
    /// Nodes put on the frontier.
    pub pushed: usize,
    /// Nodes taken off the frontier.
    pub expanded: usize,
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    state: SearchState,
    run: Option<SearchRun>,
    timer: Option<PacingTimer>,
    stats: SearchStats,
    score_range: ScoreRange,
}

impl SearchEngine {
    pub fn new() -> SearchEngine {
        SearchEngine::default()
    }

    /// Fails if `config` carries a negative or non-finite heuristic weight.
    pub fn with_config(config: SearchConfig) -> Result<SearchEngine, SearchError> {
        config.validate()?;
        Ok(SearchEngine {
            config,
            ..SearchEngine::default()
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
    pub fn state(&self) -> &SearchState {
        &self.state
    }
    pub fn is_running(&self) -> bool {
        self.state == SearchState::Running
    }
    /// The outcome of the last search, until the engine is reset or restarted.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match &self.state {
            SearchState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
    /// The node most recently taken off the frontier by the running search.
    pub fn last_expanded(&self) -> Option<&PathNode> {
        self.run.as_ref().and_then(SearchRun::last_expanded)
    }
    pub fn frontier_len(&self) -> usize {
        self.run.as_ref().map_or(0, SearchRun::frontier_len)
    }
    pub fn score_range(&self) -> &ScoreRange {
        &self.score_range
    }
    /// Mutable access, mainly to subscribe to score bound changes.
    pub fn score_range_mut(&mut self) -> &mut ScoreRange {
        &mut self.score_range
    }

    /// Sets the pacing interval in milliseconds, 0 meaning as fast as possible. A
    /// running search restarts its pacing from the next tick.
    pub fn set_interval(&mut self, millis: u64) {
        self.config.interval = Duration::from_millis(millis);
        if self.timer.take().is_some() {
            debug!("Pacing interval changed to {}ms, timer re-armed", millis);
        }
    }
    pub fn set_heuristic_weight(&mut self, weight: f64) -> Result<(), SearchError> {
        validate_heuristic_weight(weight)?;
        self.config.heuristic_weight = weight;
        Ok(())
    }
    pub fn set_allow_diagonal(&mut self, allow_diagonal: bool) {
        self.config.allow_diagonal = allow_diagonal;
    }
    pub fn set_distance_metric(&mut self, metric: DistanceMetric) {
        self.config.distance_metric = metric;
    }
    pub fn set_cost_model(&mut self, cost_model: CostModel) {
        self.config.cost_model = cost_model;
    }

    /// Starts a new search from the grid's source. Returns [false] without doing
    /// anything if a search is already running or the grid has no source.
    pub fn start(&mut self, grid: &mut Grid) -> bool {
        if self.is_running() {
            debug!("Search already running, start ignored");
            return false;
        }
        let Some(source) = grid.source() else {
            info!("Grid has no source, search not started");
            return false;
        };
        self.reset(grid);

        let mut run = SearchRun::new(grid.targets());
        if run.targets().is_empty() {
            warn!("Search started without targets, it can only fail");
        } else {
            debug!("Searching for {} target(s)", run.targets().len());
            if log_enabled!(Level::Info) {
                let components = grid.components(self.config.allow_diagonal);
                let reachable = run
                    .targets()
                    .iter()
                    .any(|t| grid.reachable_with(&components, source, *t));
                info!("A target is reachable from {}: {}", source, reachable);
            }
        }
        if run.visit(grid, &self.config, source, None) == Visit::Queued {
            self.stats.pushed += 1;
        }
        self.run = Some(run);
        self.state = SearchState::Running;
        info!("Search started from {}", source);
        true
    }

    /// Expands the best node on the frontier. Returns [true] while the search is still
    /// running afterwards.
    pub fn step(&mut self, grid: &mut Grid) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        self.stats.steps += 1;
        let node = match run.pop() {
            Ok(node) => node,
            Err(HeapError::EmptyHeap) => {
                self.finish(grid, None);
                return false;
            }
        };
        self.stats.expanded += 1;
        let point = run.node(node).point;
        trace!("Expanding {} with score {}", point, run.node(node).score);
        if let Some(mut cell) = grid.cell_mut_point(point) {
            cell.set_frontier(false);
        }
        for neighbour in grid.non_wall_neighbours(point, self.config.allow_diagonal) {
            match run.visit(grid, &self.config, neighbour.point, Some(node)) {
                Visit::Reached(ix) => {
                    self.finish(grid, Some(ix));
                    return false;
                }
                Visit::Queued => self.stats.pushed += 1,
                Visit::Skipped | Visit::Ignored => {}
            }
        }
        true
    }

    /// Steps until the search finishes, returning the number of steps taken.
    pub fn run_to_completion(&mut self, grid: &mut Grid) -> usize {
        let mut steps = 0;
        while self.is_running() {
            self.step(grid);
            steps += 1;
        }
        steps
    }

    /// Performs the steps that are due at `now` and returns how many were taken.
    ///
    /// Without an interval the search runs to completion. Otherwise the first tick
    /// after starting arms the pacing timer, and later ticks take one step per whole
    /// interval elapsed since then.
    pub fn tick(&mut self, grid: &mut Grid, now: Instant) -> usize {
        if !self.is_running() {
            return 0;
        }
        let interval = self.config.interval;
        if interval.is_zero() {
            return self.run_to_completion(grid);
        }
        let timer = self.timer.get_or_insert_with(|| PacingTimer::new(now));
        let due = timer.due_steps(now, interval);
        let mut steps = 0;
        while steps < due && self.is_running() {
            self.step(grid);
            steps += 1;
        }
        steps
    }

    /// When the next paced step is due, if a paced search is running and that instant
    /// can be represented.
    pub fn next_tick(&self) -> Option<Instant> {
        if !self.is_running() {
            return None;
        }
        self.timer.and_then(|t| t.next_tick(self.config.interval))
    }

    /// Cancels any search and clears the path, frontier and score of every cell.
    pub fn reset(&mut self, grid: &mut Grid) {
        if self.is_running() {
            info!("Search cancelled");
        }
        self.timer = None;
        self.run = None;
        self.state = SearchState::Idle;
        self.stats = SearchStats::default();
        grid.reset_paths();
        grid.reset_scores();
        grid.reset_frontier();
        self.score_range.reset();
    }

    /// Same as [reset](Self::reset).
    pub fn stop(&mut self, grid: &mut Grid) {
        self.reset(grid);
    }

    fn finish(&mut self, grid: &mut Grid, result: Option<usize>) {
        self.timer = None;
        let outcome = match (self.run.take(), result) {
            (Some(run), Some(ix)) => {
                let node = run.node(ix);
                let path = run.path_to(ix);
                grid.mark_path(path.iter().copied());
                SearchOutcome::Success {
                    target: node.point,
                    path,
                    cost: node.cumulative_cost,
                }
            }
            _ => SearchOutcome::Failure,
        };
        self.score_range
            .fit(grid.cells().filter(|c| c.is_visited()).map(Cell::score));
        self.score_range.release_bulk();
        match &outcome {
            SearchOutcome::Success { target, path, cost } => info!(
                "Search finished: reached {} over {} cells with cost {} after {} steps",
                target,
                path.len(),
                cost,
                self.stats.steps
            ),
            SearchOutcome::Failure => info!(
                "Search finished: no target reachable after {} steps",
                self.stats.steps
            ),
        }
        self.state = SearchState::Finished(outcome);
    }
}
