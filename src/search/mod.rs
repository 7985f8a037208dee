//! Lowest-cost route search over (station, line) states.
//!
//! The cost of a route is its travel time plus a fixed penalty for every
//! change of line. Because that penalty depends on the line a station was
//! reached by, the search tracks the best time per (station, arrival line)
//! pair rather than per station. With `SearchMode::AStar` the queue is
//! additionally ordered by a straight-line estimate to the goal.

mod config;
mod route;
mod state;

use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

pub use config::{SearchConfig, SearchMode, HEURISTIC_MINUTES_PER_DEGREE};
pub use route::{Route, RouteStop};
pub use state::{StateKey, Totals};

use crate::network::{connection::StationId, Network};
use state::{QueueEntry, Trail};

/// Error from a strict route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },
}

/// Work done by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub pushed: usize,
    pub popped: usize,
}

/// Route and statistics from one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub route: Option<Route>,
    pub stats: SearchStats,
}

/// Best-first route search over a borrowed network.
///
/// Each query builds its own queue and cost table, so a searcher (and the
/// network behind it) can be shared between queries.
pub struct RouteSearcher<'a> {
    network: &'a Network,
    config: SearchConfig,
}

impl<'a> RouteSearcher<'a> {
    pub fn new(network: &'a Network, config: SearchConfig) -> Self {
        Self { network, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Estimated minutes from `current` to `goal`.
    ///
    /// Zero unless the A* estimate is active and both stations have a
    /// coordinate. Otherwise the straight-line coordinate distance times
    /// [`HEURISTIC_MINUTES_PER_DEGREE`].
    pub fn heuristic(&self, current: &StationId, goal: &StationId) -> f64 {
        if !self.config.heuristic_active() {
            return 0.0;
        }

        match (self.network.coordinate(current), self.network.coordinate(goal)) {
            (Some(a), Some(b)) => {
                let delta = b - a;
                delta.x().hypot(delta.y()) * HEURISTIC_MINUTES_PER_DEGREE
            }
            _ => 0.0,
        }
    }

    /// Lowest-cost route from `start` to `goal`, or `None` if the goal is
    /// unreachable.
    pub fn find_best_route(&self, start: &StationId, goal: &StationId) -> Option<Route> {
        self.find_best_route_within(start, goal, self.config.max_stops)
    }

    /// As [`RouteSearcher::find_best_route`], with partial routes of more than
    /// `max_stops` stations left unexpanded.
    pub fn find_best_route_within(
        &self,
        start: &StationId,
        goal: &StationId,
        max_stops: usize,
    ) -> Option<Route> {
        self.search(start, goal, max_stops).route
    }

    /// Like [`RouteSearcher::find_best_route`], but an endpoint missing from
    /// the network and an unreachable goal are reported as errors.
    pub fn try_find_route(
        &self,
        start: &StationId,
        goal: &StationId,
    ) -> Result<Route, SearchError> {
        for station in [start, goal] {
            if !self.network.contains_station(station) {
                return Err(SearchError::UnknownStation(station.clone()));
            }
        }

        self.find_best_route(start, goal)
            .ok_or_else(|| SearchError::NoRoute {
                from: start.clone(),
                to: goal.clone(),
            })
    }

    pub fn search(&self, start: &StationId, goal: &StationId, max_stops: usize) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let mut queue = BinaryHeap::new();
        let mut trail = Trail::new();
        let mut best_time: HashMap<StateKey, f64> = HashMap::new();

        let first = trail.push(start.clone(), None, None);
        best_time.insert((start.clone(), None), 0.0);
        queue.push(QueueEntry {
            estimate: self.heuristic(start, goal),
            totals: Totals::default(),
            station: start.clone(),
            line: None,
            stops: 1,
            step: first,
        });
        stats.pushed += 1;

        while let Some(entry) = queue.pop() {
            stats.popped += 1;

            if &entry.station == goal {
                let route = Route::new(trail.path_to(entry.step), entry.totals);
                debug!(
                    mode = %self.config.mode,
                    %start,
                    %goal,
                    total_time = route.total_time,
                    transfers = route.transfers,
                    pushed = stats.pushed,
                    popped = stats.popped,
                    steps = trail.len(),
                    "Route found"
                );
                return SearchOutcome {
                    route: Some(route),
                    stats,
                };
            }

            // A cheaper way to this state was queued after this entry
            let key = (entry.station.clone(), entry.line.clone());
            if best_time
                .get(&key)
                .is_some_and(|&best| entry.totals.time > best)
            {
                continue;
            }

            if entry.stops > max_stops {
                trace!(station = %entry.station, stops = entry.stops, "Stop limit reached");
                continue;
            }

            for connection in self.network.neighbors(&entry.station) {
                let transfer = entry
                    .line
                    .as_ref()
                    .is_some_and(|line| line != &connection.line);
                let penalty = if transfer {
                    self.config.transfer_penalty
                } else {
                    0.0
                };

                let totals = Totals {
                    time: entry.totals.time + connection.time + penalty,
                    transfers: entry.totals.transfers + usize::from(transfer),
                    distance: entry.totals.distance + connection.distance,
                    cost: entry.totals.cost + connection.cost,
                };

                let next = (connection.dest.clone(), Some(connection.line.clone()));
                let improves = best_time
                    .get(&next)
                    .map_or(true, |&best| totals.time < best);
                if !improves {
                    continue;
                }

                best_time.insert(next, totals.time);
                let step = trail.push(
                    connection.dest.clone(),
                    Some(connection.line.clone()),
                    Some(entry.step),
                );

                queue.push(QueueEntry {
                    estimate: totals.time + self.heuristic(&connection.dest, goal),
                    totals,
                    station: connection.dest.clone(),
                    line: Some(connection.line.clone()),
                    stops: entry.stops + 1,
                    step,
                });
                stats.pushed += 1;
            }
        }

        debug!(
            mode = %self.config.mode,
            %start,
            %goal,
            pushed = stats.pushed,
            popped = stats.popped,
            "No route found"
        );

        SearchOutcome { route: None, stats }
    }
}
