//! Error types for the heap, the search engine and the terrain generator.

use std::error::Error;
use std::fmt;

/// Errors from [Heap](crate::heap::Heap) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// [extract](crate::heap::Heap::extract) was called on a heap without elements.
    EmptyHeap,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeap => write!(f, "cannot extract from an empty heap"),
        }
    }
}

impl Error for HeapError {}

/// Errors from configuring a [SearchEngine](crate::search::SearchEngine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchError {
    /// The heuristic weight was negative or not finite.
    InvalidHeuristicWeight(f64),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeuristicWeight(w) => {
                write!(f, "heuristic weight must be finite and non-negative, got {w}")
            }
        }
    }
}

impl Error for SearchError {}

/// Errors from configuring a [TerrainGenerator](crate::terrain::TerrainGenerator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TerrainError {
    /// The noise scale was zero or not finite.
    InvalidScale(f64),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale(s) => write!(f, "terrain scale must be finite and non-zero, got {s}"),
        }
    }
}

impl Error for TerrainError {}
