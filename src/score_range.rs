use crate::observable::{ListenerId, Observable};
use itertools::{Itertools, MinMaxResult};

/// Lowest and highest score assigned during a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl ScoreBounds {
    const UNSET: ScoreBounds = ScoreBounds {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub fn is_set(&self) -> bool {
        self.min <= self.max
    }
}

/// Score bounds used to normalise cell scores for display. Listeners are notified in
/// bulk: updates only mark the range dirty and [release_bulk](Self::release_bulk)
/// sends a single notification.
#[derive(Debug)]
pub struct ScoreRange {
    bounds: ScoreBounds,
    listeners: Observable<ScoreBounds>,
}

impl Default for ScoreRange {
    fn default() -> ScoreRange {
        ScoreRange {
            bounds: ScoreBounds::UNSET,
            listeners: Observable::bulk(),
        }
    }
}

impl ScoreRange {
    pub fn new() -> ScoreRange {
        ScoreRange::default()
    }
    pub fn bounds(&self) -> ScoreBounds {
        self.bounds
    }
    pub fn min_score(&self) -> f64 {
        self.bounds.min
    }
    pub fn max_score(&self) -> f64 {
        self.bounds.max
    }
    pub fn set_min_score(&mut self, score: f64) {
        self.bounds.min = score;
        self.listeners.notify(&self.bounds);
    }
    pub fn set_max_score(&mut self, score: f64) {
        self.bounds.max = score;
        self.listeners.notify(&self.bounds);
    }
    pub fn reset(&mut self) {
        self.set_min_score(ScoreBounds::UNSET.min);
        self.set_max_score(ScoreBounds::UNSET.max);
    }

    /// Sets the bounds to the extremes of `scores`. An empty iterator leaves the
    /// range unset.
    pub fn fit<I: IntoIterator<Item = f64>>(&mut self, scores: I) {
        match scores.into_iter().minmax() {
            MinMaxResult::NoElements => self.reset(),
            MinMaxResult::OneElement(s) => {
                self.set_min_score(s);
                self.set_max_score(s);
            }
            MinMaxResult::MinMax(min, max) => {
                self.set_min_score(min);
                self.set_max_score(max);
            }
        }
    }

    /// Maps `score` onto (0, 1], giving 0 while the range is unset.
    pub fn normalise(&self, score: f64) -> f64 {
        if !self.bounds.is_set() {
            return 0.0;
        }
        let ScoreBounds { min, max } = self.bounds;
        (score - min + 1.0) / (max - min + 1.0)
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScoreBounds) + 'static,
    {
        self.listeners.add_listener(listener)
    }
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }
    /// Notifies listeners once if the bounds changed since the last release.
    pub fn release_bulk(&mut self) {
        self.listeners.release_bulk(&self.bounds);
    }
}
