use std::fmt;

use serde::Serialize;

/// Station name, as written in the network data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(str: &str) -> Self {
        Self(str.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a transit line or of a walking link between stations.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(str: &str) -> Self {
        Self(str.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A directed arc between two stations on a named line.
///
/// `time` is in minutes, `distance` in kilometres and `cost` in the
/// network's currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub origin: StationId,
    pub dest: StationId,
    pub line: LineId,
    pub time: f64,
    pub distance: f64,
    pub cost: f64,
}

impl Connection {
    pub fn new(
        origin: StationId,
        dest: StationId,
        line: LineId,
        time: f64,
        distance: f64,
        cost: f64,
    ) -> Self {
        Self {
            origin,
            dest,
            line,
            time,
            distance,
            cost,
        }
    }

    /// The same connection travelled in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.dest.clone(),
            dest: self.origin.clone(),
            line: self.line.clone(),
            time: self.time,
            distance: self.distance,
            cost: self.cost,
        }
    }
}
