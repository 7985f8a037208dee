use std::cmp::Ordering;

use crate::network::connection::{LineId, StationId};

/// A station together with the line used to reach it. `None` only for the
/// start of a route.
pub type StateKey = (StationId, Option<LineId>);

/// Running totals of a partial route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Travel time including transfer penalties, in minutes.
    pub time: f64,
    pub transfers: usize,
    pub distance: f64,
    pub cost: f64,
}

/// One step of a partial route, linked back to the step before it.
#[derive(Debug, Clone)]
pub struct Step {
    pub station: StationId,
    pub line: Option<LineId>,
    pub previous: Option<usize>,
}

/// Every step pushed during one search. Queue entries refer to their last
/// step by index so partial routes share their common prefix.
#[derive(Debug, Default)]
pub struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        station: StationId,
        line: Option<LineId>,
        previous: Option<usize>,
    ) -> usize {
        self.steps.push(Step {
            station,
            line,
            previous,
        });
        self.steps.len() - 1
    }

    /// Steps from the start up to and including `last`.
    pub fn path_to(&self, last: usize) -> Vec<StateKey> {
        let mut path = Vec::new();
        let mut cursor = Some(last);

        while let Some(idx) = cursor {
            let step = &self.steps[idx];
            path.push((step.station.clone(), step.line.clone()));
            cursor = step.previous;
        }

        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Priority queue entry.
///
/// Ordered so that `BinaryHeap` pops the lowest `estimate` first. Equal
/// estimates fall back to time, transfers, distance, cost, station and line.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    /// Accumulated time plus the estimate to the goal.
    pub estimate: f64,
    pub totals: Totals,
    pub station: StationId,
    pub line: Option<LineId>,
    /// Number of stations on the route so far, start included.
    pub stops: usize,
    /// Last step of this route in the search's [`Trail`].
    pub step: usize,
}

impl QueueEntry {
    fn ordering_key(&self, other: &Self) -> Ordering {
        self.estimate
            .total_cmp(&other.estimate)
            .then_with(|| self.totals.time.total_cmp(&other.totals.time))
            .then_with(|| self.totals.transfers.cmp(&other.totals.transfers))
            .then_with(|| self.totals.distance.total_cmp(&other.totals.distance))
            .then_with(|| self.totals.cost.total_cmp(&other.totals.cost))
            .then_with(|| self.station.cmp(&other.station))
            .then_with(|| self.line.cmp(&other.line))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.ordering_key(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other.ordering_key(self)
    }
}
