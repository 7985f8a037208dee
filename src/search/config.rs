//! Search configuration for the route searcher.

use std::fmt;

use clap::ValueEnum;

/// Minutes per degree of straight-line coordinate distance used by the
/// A* estimate.
pub const HEURISTIC_MINUTES_PER_DEGREE: f64 = 2.0;

/// Which best-first search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchMode {
    /// Uniform-cost search, ordered by accumulated time only.
    Dijkstra,
    /// Accumulated time plus a coordinate-based estimate to the goal.
    #[default]
    #[value(name = "astar")]
    AStar,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Dijkstra => f.write_str("dijkstra"),
            SearchMode::AStar => f.write_str("astar"),
        }
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minutes added each time the route changes line.
    pub transfer_penalty: f64,

    /// Whether A* may use station coordinates at all.
    pub use_heuristic: bool,

    pub mode: SearchMode,

    /// Partial paths longer than this are not expanded.
    pub max_stops: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_penalty: f64, use_heuristic: bool, mode: SearchMode) -> Self {
        Self {
            transfer_penalty,
            use_heuristic,
            mode,
            ..Self::default()
        }
    }

    pub fn with_transfer_penalty(mut self, transfer_penalty: f64) -> Self {
        self.transfer_penalty = transfer_penalty;
        self
    }

    pub fn with_heuristic(mut self, use_heuristic: bool) -> Self {
        self.use_heuristic = use_heuristic;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = max_stops;
        self
    }

    /// True when the queue should be ordered with the coordinate estimate.
    pub fn heuristic_active(&self) -> bool {
        self.use_heuristic && self.mode == SearchMode::AStar
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: 4.0,
            use_heuristic: true,
            mode: SearchMode::AStar,
            max_stops: 1000,
        }
    }
}
