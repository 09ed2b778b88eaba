use crate::cell::Cell;
use crate::error::SearchError;
use grid_util::point::Point;
use std::time::Duration;

/// Default time between two search steps when pacing is enabled.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(20);
pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.0;

/// Metric used to decide whether a cell has reached a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    /// Manhattan distance.
    Grid,
    #[default]
    Euclidean,
}

impl DistanceMetric {
    pub fn measure(&self, cell: &Cell, target: Point) -> f64 {
        match self {
            DistanceMetric::Grid => cell.grid_distance(target) as f64,
            DistanceMetric::Euclidean => cell.line_distance(target),
        }
    }
}

/// What the cost part of a node's score is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CostModel {
    /// Only the elevation of the cell being entered.
    #[default]
    Step,
    /// Elevations summed along the path from the source, giving uniform-cost search
    /// when the heuristic weight is 0.
    Accumulated,
}

/// Tunables of a [SearchEngine](super::SearchEngine). All of them may be changed
/// while a search runs and take effect from the next step on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Time between steps, [Duration::ZERO] runs the search without pacing.
    pub interval: Duration,
    pub heuristic_weight: f64,
    pub allow_diagonal: bool,
    pub distance_metric: DistanceMetric,
    pub cost_model: CostModel,
}

impl SearchConfig {
    /// Rejects settings a search cannot order its frontier with.
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_heuristic_weight(self.heuristic_weight)
    }
}

pub(crate) fn validate_heuristic_weight(weight: f64) -> Result<(), SearchError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(SearchError::InvalidHeuristicWeight(weight));
    }
    Ok(())
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            interval: DEFAULT_INTERVAL,
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            allow_diagonal: true,
            distance_metric: DistanceMetric::default(),
            cost_model: CostModel::default(),
        }
    }
}
