use crate::network::Network;

/// Three lines plus four walking links across eleven stations.
///
/// Every connection is bidirectional and every station has a coordinate.
pub fn sample_network() -> Network {
    let mut network = Network::new();

    // (origin, dest, line, minutes, km, fare)
    let connections = [
        // Metro
        ("Estacion_A", "Estacion_B", "Línea_A", 4.0, 2.5, 2.0),
        ("Estacion_B", "Estacion_C", "Línea_A", 3.0, 1.8, 2.0),
        ("Estacion_C", "Estacion_D", "Línea_A", 5.0, 3.2, 2.0),
        ("Estacion_D", "Estacion_E", "Línea_A", 4.0, 2.1, 2.0),
        // Rapid bus
        ("Estacion_F", "Estacion_B", "Línea_B", 6.0, 4.5, 1.5),
        ("Estacion_F", "Estacion_G", "Línea_B", 7.0, 5.2, 1.5),
        ("Estacion_G", "Estacion_H", "Línea_B", 4.0, 3.1, 1.5),
        ("Estacion_H", "Estacion_D", "Línea_B", 8.0, 6.0, 1.5),
        // Light rail
        ("Estacion_I", "Estacion_C", "Línea_C", 12.0, 8.5, 3.0),
        ("Estacion_I", "Estacion_J", "Línea_C", 6.0, 4.2, 3.0),
        ("Estacion_J", "Estacion_K", "Línea_C", 9.0, 6.8, 3.0),
        ("Estacion_K", "Estacion_E", "Línea_C", 7.0, 5.1, 3.0),
        // Walking
        ("Estacion_B", "Estacion_F", "Transferencia_1", 10.0, 0.8, 0.0),
        ("Estacion_C", "Estacion_G", "Transferencia_2", 6.0, 0.5, 0.0),
        ("Estacion_D", "Estacion_H", "Transferencia_3", 8.0, 0.6, 0.0),
        ("Estacion_E", "Estacion_K", "Transferencia_4", 5.0, 0.4, 0.0),
    ];

    for (origin, dest, line, time, distance, cost) in connections {
        network.add_connection(origin, dest, line, time, distance, cost, true);
    }

    let coords = [
        ("Estacion_A", 40.4168, -3.7038),
        ("Estacion_B", 40.4200, -3.7000),
        ("Estacion_C", 40.4150, -3.6950),
        ("Estacion_D", 40.4100, -3.6900),
        ("Estacion_E", 40.4050, -3.6850),
        ("Estacion_F", 40.4250, -3.7050),
        ("Estacion_G", 40.4180, -3.6920),
        ("Estacion_H", 40.4080, -3.6880),
        ("Estacion_I", 40.4300, -3.7100),
        ("Estacion_J", 40.4350, -3.7150),
        ("Estacion_K", 40.4000, -3.6800),
    ];

    for (station, lat, lon) in coords {
        network.add_station_coordinate(station, lat, lon);
    }

    network
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_network_shape() {
        let network = sample_network();

        assert_eq!(network.station_count(), 11);
        assert_eq!(network.lines().len(), 7);
        assert_eq!(network.connection_count(), 32);
    }

    #[test]
    fn every_station_has_a_coordinate() {
        let network = sample_network();

        for station in network.all_stations() {
            assert!(network.coordinate(&station).is_some(), "{station}");
        }
    }
}
