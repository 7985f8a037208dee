pub mod connection;
pub mod io;
pub mod sample;

use std::collections::{BTreeSet, HashMap};

use geo_types::Point;

use crate::network::connection::{Connection, LineId, StationId};

/// Rejected connection data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("connection {origin} -> {dest} on {line} must take a positive time, got {time}")]
    NonPositiveTime {
        origin: StationId,
        dest: StationId,
        line: LineId,
        time: f64,
    },

    #[error("connection {origin} -> {dest} on {line} has invalid distance {distance}")]
    InvalidDistance {
        origin: StationId,
        dest: StationId,
        line: LineId,
        distance: f64,
    },

    #[error("connection {origin} -> {dest} on {line} has invalid cost {cost}")]
    InvalidCost {
        origin: StationId,
        dest: StationId,
        line: LineId,
        cost: f64,
    },
}

/// Directed multigraph of connections plus optional station coordinates.
///
/// Connections are kept in insertion order and indexed by origin, so
/// `neighbors` yields them in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Network {
    connections: Vec<Connection>,
    outgoing: HashMap<StationId, Vec<usize>>,
    coords: HashMap<StationId, Point<f64>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `origin -> dest`, and `dest -> origin` when `bidirectional`.
    ///
    /// Values are taken as given. Use [`Network::try_add_connection`] for
    /// data that has not been checked.
    #[allow(clippy::too_many_arguments)]
    pub fn add_connection(
        &mut self,
        origin: &str,
        dest: &str,
        line: &str,
        time: f64,
        distance: f64,
        cost: f64,
        bidirectional: bool,
    ) {
        let connection = Connection::new(
            StationId::new(origin),
            StationId::new(dest),
            LineId::new(line),
            time,
            distance,
            cost,
        );

        if bidirectional {
            let reverse = connection.reversed();
            self.push(connection);
            self.push(reverse);
        } else {
            self.push(connection);
        }
    }

    /// Like [`Network::add_connection`] but rejects non-positive times and
    /// negative or non-finite distances and costs.
    #[allow(clippy::too_many_arguments)]
    pub fn try_add_connection(
        &mut self,
        origin: &str,
        dest: &str,
        line: &str,
        time: f64,
        distance: f64,
        cost: f64,
        bidirectional: bool,
    ) -> Result<(), NetworkError> {
        let ids = || (StationId::new(origin), StationId::new(dest), LineId::new(line));

        if !(time.is_finite() && time > 0.0) {
            let (origin, dest, line) = ids();
            return Err(NetworkError::NonPositiveTime {
                origin,
                dest,
                line,
                time,
            });
        }

        if !(distance.is_finite() && distance >= 0.0) {
            let (origin, dest, line) = ids();
            return Err(NetworkError::InvalidDistance {
                origin,
                dest,
                line,
                distance,
            });
        }

        if !(cost.is_finite() && cost >= 0.0) {
            let (origin, dest, line) = ids();
            return Err(NetworkError::InvalidCost {
                origin,
                dest,
                line,
                cost,
            });
        }

        self.add_connection(origin, dest, line, time, distance, cost, bidirectional);
        Ok(())
    }

    /// Inserts or overwrites the coordinate of `station`.
    pub fn add_station_coordinate(&mut self, station: &str, lat: f64, lon: f64) {
        self.coords
            .insert(StationId::new(station), Point::new(lon, lat));
    }

    /// Outgoing connections of `station` in insertion order.
    pub fn neighbors(&self, station: &StationId) -> impl Iterator<Item = &Connection> {
        let indices = match self.outgoing.get(station) {
            Some(indices) => indices.as_slice(),
            None => &[],
        };

        indices.iter().map(|&i| &self.connections[i])
    }

    /// Coordinate of `station` as a point with `x = lon` and `y = lat`.
    pub fn coordinate(&self, station: &StationId) -> Option<Point<f64>> {
        self.coords.get(station).copied()
    }

    /// Every station that appears as an origin or destination.
    pub fn all_stations(&self) -> BTreeSet<StationId> {
        self.connections
            .iter()
            .flat_map(|c| [c.origin.clone(), c.dest.clone()])
            .collect()
    }

    pub fn contains_station(&self, station: &StationId) -> bool {
        self.outgoing.contains_key(station) || self.connections.iter().any(|c| &c.dest == station)
    }

    pub fn lines(&self) -> BTreeSet<LineId> {
        self.connections.iter().map(|c| c.line.clone()).collect()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn station_count(&self) -> usize {
        self.all_stations().len()
    }

    fn push(&mut self, connection: Connection) {
        let idx = self.connections.len();
        self.outgoing
            .entry(connection.origin.clone())
            .or_default()
            .push(idx);
        self.connections.push(connection);
    }
}
