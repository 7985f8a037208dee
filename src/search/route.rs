use anyhow::Context;
use geo_types::Point;
use itertools::Itertools;
use serde::Serialize;

use crate::network::{
    connection::{LineId, StationId},
    Network,
};
use crate::search::state::{StateKey, Totals};

/// A station on a route and the line used to arrive there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStop {
    pub station: StationId,
    /// `None` for the first stop.
    pub line: Option<LineId>,
}

/// Lowest-cost route found by one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<RouteStop>,
    /// Minutes, transfer penalties included.
    pub total_time: f64,
    pub transfers: usize,
    pub total_distance: f64,
    pub total_cost: f64,
    /// Distinct lines in order of first use. Walking links count as lines.
    pub lines_used: Vec<LineId>,
}

#[derive(Serialize)]
struct StopFeature {
    seq: usize,
    station: StationId,
    line: Option<LineId>,
    #[serde(serialize_with = "geojson::ser::serialize_geometry")]
    geometry: Point,
}

impl Route {
    pub(crate) fn new(path: Vec<StateKey>, totals: Totals) -> Self {
        let lines_used = path
            .iter()
            .filter_map(|(_, line)| line.clone())
            .unique()
            .collect();

        let path = path
            .into_iter()
            .map(|(station, line)| RouteStop { station, line })
            .collect();

        Self {
            path,
            total_time: totals.time,
            transfers: totals.transfers,
            total_distance: totals.distance,
            total_cost: totals.cost,
            lines_used,
        }
    }

    /// First station, or `None` for a route built with an empty path.
    pub fn origin(&self) -> Option<&StationId> {
        self.path.first().map(|s| &s.station)
    }

    pub fn destination(&self) -> Option<&StationId> {
        self.path.last().map(|s| &s.station)
    }

    pub fn stops(&self) -> impl Iterator<Item = &StationId> {
        self.path.iter().map(|s| &s.station)
    }

    /// Number of line changes along the path, counted from the stops.
    pub fn line_changes(&self) -> usize {
        self.path
            .iter()
            .filter_map(|s| s.line.as_ref())
            .tuple_windows()
            .filter(|(a, b)| a != b)
            .count()
    }

    /// A GeoJSON feature collection with one point per stop that has a
    /// coordinate in `network`.
    pub fn to_geojson(&self, network: &Network) -> anyhow::Result<String> {
        let features: Vec<StopFeature> = self
            .path
            .iter()
            .enumerate()
            .filter_map(|(seq, stop)| {
                network.coordinate(&stop.station).map(|geometry| StopFeature {
                    seq,
                    station: stop.station.clone(),
                    line: stop.line.clone(),
                    geometry,
                })
            })
            .collect();

        geojson::ser::to_feature_collection_string(&features).context("Failed to serialize")
    }
}
