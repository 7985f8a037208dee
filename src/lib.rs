//! Lowest-cost routes through a multi-line transit network.
//!
//! Cost is travel time plus a penalty for every change of line. Routes are
//! found with Dijkstra or A* over (station, arrival line) states.

pub mod interactive;
pub mod network;
pub mod report;
pub mod search;
