//! Text rendering of routes, network statistics and algorithm comparisons.

use std::{
    fmt,
    time::{Duration, Instant},
};

use itertools::Itertools;

use crate::network::{
    connection::{LineId, StationId},
    Network,
};
use crate::search::{Route, RouteSearcher, SearchConfig, SearchMode};

/// Numbered stops followed by the route totals.
pub fn render_route(route: Option<&Route>) -> String {
    match route {
        Some(route) => route.to_string(),
        None => "No route found.\n".to_owned(),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);

        writeln!(f, "{rule}")?;
        writeln!(f, "ROUTE FOUND")?;
        writeln!(f, "{rule}")?;

        for (i, stop) in self.path.iter().enumerate() {
            match &stop.line {
                None => writeln!(f, "{}. {} (start)", i + 1, stop.station)?,
                Some(line) => writeln!(f, "{}. {} [arrived on {line}]", i + 1, stop.station)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Total time:     {:.1} min", self.total_time)?;
        writeln!(f, "Transfers:      {}", self.transfers)?;
        writeln!(f, "Total distance: {:.1} km", self.total_distance)?;
        writeln!(f, "Total cost:     ${:.2}", self.total_cost)?;
        writeln!(f, "Lines used:     {}", self.lines_used.iter().join(", "))?;
        writeln!(f, "{rule}")
    }
}

/// Size and shape of a network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub stations: usize,
    pub connections: usize,
    /// Connection count per line, sorted by line.
    pub connections_per_line: Vec<(LineId, usize)>,
    /// Stations with the most outgoing connections, busiest first.
    pub busiest_stations: Vec<(StationId, usize)>,
}

impl NetworkSummary {
    const BUSIEST: usize = 5;

    pub fn from_network(network: &Network) -> Self {
        let connections_per_line = network
            .connections()
            .iter()
            .map(|c| c.line.clone())
            .counts()
            .into_iter()
            .sorted()
            .collect();

        let busiest_stations = network
            .connections()
            .iter()
            .map(|c| c.origin.clone())
            .counts()
            .into_iter()
            .sorted_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
            .take(Self::BUSIEST)
            .collect();

        Self {
            stations: network.station_count(),
            connections: network.connection_count(),
            connections_per_line,
            busiest_stations,
        }
    }

    pub fn lines(&self) -> usize {
        self.connections_per_line.len()
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stations:    {}", self.stations)?;
        writeln!(f, "Lines:       {}", self.lines())?;
        writeln!(f, "Connections: {}", self.connections)?;

        writeln!(f)?;
        writeln!(f, "Connections per line:")?;
        for (line, count) in &self.connections_per_line {
            writeln!(f, "  - {line}: {count} connections")?;
        }

        writeln!(f)?;
        writeln!(f, "Busiest stations:")?;
        for (station, count) in &self.busiest_stations {
            writeln!(f, "  - {station}: {count} connections")?;
        }

        Ok(())
    }
}

/// One mode's result for a query.
#[derive(Debug, Clone)]
pub struct ModeResult {
    pub total_time: Option<f64>,
    pub states_expanded: usize,
    pub elapsed: Duration,
}

/// A* and Dijkstra on the same query.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub start: StationId,
    pub goal: StationId,
    pub astar: ModeResult,
    pub dijkstra: ModeResult,
}

impl Comparison {
    /// Whether both modes found routes of the same time (within 0.1 min), or
    /// both found none.
    pub fn agrees(&self) -> bool {
        match (self.astar.total_time, self.dijkstra.total_time) {
            (Some(a), Some(d)) => (a - d).abs() <= 0.1,
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} -> {}", self.start, self.goal)?;
        for (name, result) in [("A*", &self.astar), ("Dijkstra", &self.dijkstra)] {
            match result.total_time {
                Some(time) => writeln!(
                    f,
                    "  {name:<9} {time:.1} min, {} states, {:?}",
                    result.states_expanded, result.elapsed
                )?,
                None => writeln!(f, "  {name:<9} no route, {:?}", result.elapsed)?,
            }
        }
        Ok(())
    }
}

fn run_mode(
    network: &Network,
    config: SearchConfig,
    start: &StationId,
    goal: &StationId,
) -> ModeResult {
    let searcher = RouteSearcher::new(network, config);
    let max_stops = searcher.config().max_stops;

    let now = Instant::now();
    let outcome = searcher.search(start, goal, max_stops);
    let elapsed = now.elapsed();

    ModeResult {
        total_time: outcome.route.map(|r| r.total_time),
        states_expanded: outcome.stats.popped,
        elapsed,
    }
}

/// Runs every query with both search modes.
pub fn compare_algorithms(
    network: &Network,
    queries: &[(StationId, StationId)],
    transfer_penalty: f64,
) -> Vec<Comparison> {
    queries
        .iter()
        .map(|(start, goal)| {
            let astar = run_mode(
                network,
                SearchConfig::new(transfer_penalty, true, SearchMode::AStar),
                start,
                goal,
            );
            let dijkstra = run_mode(
                network,
                SearchConfig::new(transfer_penalty, false, SearchMode::Dijkstra),
                start,
                goal,
            );

            Comparison {
                start: start.clone(),
                goal: goal.clone(),
                astar,
                dijkstra,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::sample::sample_network;

    fn id(s: &str) -> StationId {
        StationId::new(s)
    }

    #[test]
    fn renders_route() {
        let network = sample_network();
        let route = RouteSearcher::new(&network, SearchConfig::default())
            .find_best_route(&id("Estacion_A"), &id("Estacion_C"));

        let text = render_route(route.as_ref());

        assert!(text.contains("1. Estacion_A (start)"));
        assert!(text.contains("3. Estacion_C [arrived on Línea_A]"));
        assert!(text.contains("Total time:     7.0 min"));
        assert!(text.contains("Transfers:      0"));
        assert!(text.contains("Total distance: 4.3 km"));
        assert!(text.contains("Total cost:     $4.00"));
        assert!(text.contains("Lines used:     Línea_A"));
    }

    #[test]
    fn renders_missing_route() {
        assert_eq!(render_route(None), "No route found.\n");
    }

    #[test]
    fn summarises_sample_network() {
        let summary = NetworkSummary::from_network(&sample_network());

        assert_eq!(summary.stations, 11);
        assert_eq!(summary.connections, 32);
        assert_eq!(summary.lines(), 7);
        assert_eq!(
            summary.connections_per_line[0],
            (LineId::new("Línea_A"), 8)
        );
        assert_eq!(summary.busiest_stations.len(), 5);

        // B, C and D each have four outgoing connections
        let top: Vec<_> = summary
            .busiest_stations
            .iter()
            .take(3)
            .map(|(s, n)| (s.as_str(), *n))
            .collect();
        assert_eq!(
            top,
            vec![("Estacion_B", 4), ("Estacion_C", 4), ("Estacion_D", 4)]
        );

        let text = summary.to_string();
        assert!(text.contains("Stations:    11"));
        assert!(text.contains("  - Línea_B: 8 connections"));
    }

    #[test]
    fn comparison_agrees_on_sample_queries() {
        let network = sample_network();
        let queries = vec![
            (id("Estacion_A"), id("Estacion_E")),
            (id("Estacion_I"), id("Estacion_K")),
            (id("Estacion_A"), id("Estacion_Z")),
        ];

        let results = compare_algorithms(&network, &queries, 4.0);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(Comparison::agrees));
        assert_eq!(results[1].astar.total_time, Some(15.0));
        assert_eq!(results[2].dijkstra.total_time, None);
        assert!(results[0].to_string().starts_with("Estacion_A -> Estacion_E"));
    }
}
