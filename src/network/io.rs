use std::path::Path;

use anyhow::{bail, Context};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::network::Network;

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    origin: String,
    dest: String,
    line: String,
    time: f64,
    distance: Option<f64>,
    cost: Option<f64>,
    /// Only a missing column means both ways; an empty cell does not.
    #[serde(default = "both_ways")]
    bidirectional: String,
}

fn both_ways() -> String {
    "true".to_owned()
}

#[derive(Debug, Deserialize)]
struct StationRow {
    station: String,
    lat: f64,
    lon: f64,
}

/// Deserializes every record of a headed CSV file and hands it to `load`.
/// Errors name the file and the line the record starts on.
fn read_rows<T, F>(path: &Path, mut load: F) -> anyhow::Result<usize>
where
    T: DeserializeOwned,
    F: FnMut(T) -> anyhow::Result<()>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    if headers.is_empty() {
        bail!("{} is empty", path.display());
    }

    let mut rows = 0;
    for record in rdr.records() {
        let record = record.with_context(|| format!("Failed to read {}", path.display()))?;
        let line_no = record.position().map_or(0, |p| p.line());

        let row: T = record
            .deserialize(Some(&headers))
            .with_context(|| format!("{}:{line_no}", path.display()))?;
        load(row).with_context(|| format!("{}:{line_no}", path.display()))?;
        rows += 1;
    }

    Ok(rows)
}

/// Reads connections from a comma-separated file with an
/// `origin,dest,line,time[,distance][,cost][,bidirectional]` header.
///
/// Returns the number of rows loaded.
pub fn read_connections<P: AsRef<Path>>(path: P, network: &mut Network) -> anyhow::Result<usize> {
    let path = path.as_ref();

    let rows = read_rows(path, |row: ConnectionRow| {
        network.try_add_connection(
            &row.origin,
            &row.dest,
            &row.line,
            row.time,
            row.distance.unwrap_or(0.0),
            row.cost.unwrap_or(0.0),
            row.bidirectional.eq_ignore_ascii_case("true"),
        )?;
        Ok(())
    })?;

    debug!(path = %path.display(), rows, "Loaded connections");
    Ok(rows)
}

/// Reads station coordinates from a comma-separated file with a
/// `station,lat,lon` header.
///
/// Returns the number of rows loaded.
pub fn read_stations<P: AsRef<Path>>(path: P, network: &mut Network) -> anyhow::Result<usize> {
    let path = path.as_ref();

    let rows = read_rows(path, |row: StationRow| {
        network.add_station_coordinate(&row.station, row.lat, row.lon);
        Ok(())
    })?;

    debug!(path = %path.display(), rows, "Loaded station coordinates");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::network::connection::StationId;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_connections_with_defaults() {
        let f = write_file(
            "origin,dest,line,time,distance,cost,bidirectional\n\
             A,B,L1,4,2.5,2.0,true\n\
             B,C,L1,3,,,FALSE\n\
             \n\
             C,D,L2,5,1,1,\n",
        );

        let mut network = Network::new();
        let rows = read_connections(f.path(), &mut network).unwrap();

        assert_eq!(rows, 3);
        // A-B both ways, B->C and C->D one way
        assert_eq!(network.connection_count(), 4);

        let bc: Vec<_> = network.neighbors(&StationId::new("B")).collect();
        assert_eq!(bc.len(), 2);
        let to_c = bc.iter().find(|c| c.dest.as_str() == "C").unwrap();
        assert_eq!(to_c.distance, 0.0);
        assert_eq!(to_c.cost, 0.0);
        assert_eq!(network.neighbors(&StationId::new("C")).count(), 1);
        assert_eq!(network.neighbors(&StationId::new("D")).count(), 0);
    }

    #[test]
    fn empty_bidirectional_cell_means_one_way() {
        let f = write_file("origin,dest,line,time,bidirectional\nA,B,L1,4,\n");

        let mut network = Network::new();
        read_connections(f.path(), &mut network).unwrap();

        assert_eq!(network.connection_count(), 1);
        assert_eq!(network.neighbors(&StationId::new("B")).count(), 0);
    }

    #[test]
    fn reads_connections_without_optional_columns() {
        let f = write_file("origin,dest,line,time\nA,B,L1,4\n");

        let mut network = Network::new();
        read_connections(f.path(), &mut network).unwrap();

        assert_eq!(network.connection_count(), 2);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let f = write_file("origin,dest,line,time\n\"Plaza, Mayor\",B,L1,4\n");

        let mut network = Network::new();
        read_connections(f.path(), &mut network).unwrap();

        let from_plaza: Vec<_> = network.neighbors(&StationId::new("Plaza, Mayor")).collect();
        assert_eq!(from_plaza.len(), 1);
        assert_eq!(from_plaza[0].dest.as_str(), "B");
        assert_eq!(from_plaza[0].time, 4.0);
    }

    #[test]
    fn header_order_does_not_matter() {
        let f = write_file("line, time, dest, origin\nL1, 4, B, A\n");

        let mut network = Network::new();
        read_connections(f.path(), &mut network).unwrap();

        let from_a: Vec<_> = network.neighbors(&StationId::new("A")).collect();
        assert_eq!(from_a[0].dest.as_str(), "B");
        assert_eq!(from_a[0].line.as_str(), "L1");
    }

    #[test]
    fn rejects_non_positive_time_with_location() {
        let f = write_file("origin,dest,line,time\nA,B,L1,4\nB,C,L1,0\n");

        let mut network = Network::new();
        let err = read_connections(f.path(), &mut network).unwrap_err();

        assert!(format!("{err:#}").contains(":3"));
        assert!(format!("{err:#}").contains("positive time"));
    }

    #[test]
    fn rejects_missing_column() {
        let f = write_file("origin,dest,time\nA,B,4\n");

        let mut network = Network::new();
        let err = read_connections(f.path(), &mut network).unwrap_err();

        assert!(format!("{err:#}").contains("missing field `line`"));
    }

    #[test]
    fn rejects_unparsable_number() {
        let f = write_file("origin,dest,line,time\nA,B,L1,soon\n");

        let mut network = Network::new();
        let err = read_connections(f.path(), &mut network).unwrap_err();

        assert!(format!("{err:#}").contains(":2"));
        assert_eq!(network.connection_count(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut network = Network::new();
        let err = read_connections("/nonexistent/connections.csv", &mut network).unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn reads_station_coordinates() {
        let f = write_file("station,lat,lon\nA,40.4168,-3.7038\nB,40.42,-3.7\n");

        let mut network = Network::new();
        let rows = read_stations(f.path(), &mut network).unwrap();

        assert_eq!(rows, 2);
        let a = network.coordinate(&StationId::new("A")).unwrap();
        assert_eq!(a.y(), 40.4168);
        assert_eq!(a.x(), -3.7038);
    }

    #[test]
    fn empty_station_file_is_an_error() {
        let f = write_file("");

        let mut network = Network::new();
        assert!(read_stations(f.path(), &mut network).is_err());
    }
}
