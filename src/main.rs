use std::{io, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_routing::{
    interactive,
    network::{
        connection::StationId,
        io::{read_connections, read_stations},
        sample::sample_network,
        Network,
    },
    report::{compare_algorithms, render_route, NetworkSummary},
    search::{RouteSearcher, SearchConfig, SearchMode},
};

#[derive(Parser)]
#[command(name = "transit-routing", version, about)]
struct Args {
    /// Connections CSV (origin,dest,line,time[,distance][,cost][,bidirectional]).
    /// The built-in sample network is used when omitted.
    #[arg(long, global = true)]
    connections: Option<PathBuf>,

    /// Station coordinates CSV (station,lat,lon)
    #[arg(long, global = true)]
    stations: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Find the best route between two stations
    Route(RouteArgs),
    /// Run a few example queries
    Demo,
    /// Print network statistics
    Analyze,
    /// Compare A* and Dijkstra on example queries
    Performance {
        /// Minutes charged per change of line
        #[arg(long, default_value_t = 4.0)]
        transfer_penalty: f64,
    },
    /// Ask for origin and destination on standard input
    Interactive {
        #[arg(long, value_enum, default_value_t = SearchMode::AStar)]
        mode: SearchMode,
    },
}

#[derive(clap::Args)]
struct RouteArgs {
    /// Origin station
    from: String,
    /// Destination station
    to: String,
    #[arg(long, value_enum, default_value_t = SearchMode::AStar)]
    mode: SearchMode,
    /// Minutes charged per change of line
    #[arg(long, default_value_t = 4.0)]
    transfer_penalty: f64,
    /// Order A* by accumulated time only
    #[arg(long)]
    no_heuristic: bool,
    /// Do not expand partial routes with more stations than this
    #[arg(long, default_value_t = 1000)]
    max_stops: usize,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Geojson,
}

fn load_network(args: &Args) -> anyhow::Result<Network> {
    let Some(connections) = &args.connections else {
        info!("Using sample network");
        return Ok(sample_network());
    };

    let now = Instant::now();
    let mut network = Network::new();
    read_connections(connections, &mut network)?;
    if let Some(stations) = &args.stations {
        read_stations(stations, &mut network)?;
    }
    info!(
        stations = network.station_count(),
        connections = network.connection_count(),
        elapsed = ?now.elapsed(),
        "Read network"
    );

    Ok(network)
}

fn route(network: &Network, args: &RouteArgs) -> anyhow::Result<()> {
    let config = SearchConfig::new(args.transfer_penalty, !args.no_heuristic, args.mode)
        .with_max_stops(args.max_stops);
    let searcher = RouteSearcher::new(network, config);

    let route = searcher.try_find_route(&StationId::new(&args.from), &StationId::new(&args.to))?;

    match args.format {
        Format::Text => print!("{}", render_route(Some(&route))),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&route).context("Failed to serialize")?
        ),
        Format::Geojson => println!("{}", route.to_geojson(network)?),
    }

    Ok(())
}

fn demo(network: &Network) {
    let astar = RouteSearcher::new(network, SearchConfig::default());
    let dijkstra = RouteSearcher::new(
        network,
        SearchConfig::new(4.0, false, SearchMode::Dijkstra),
    );

    println!("Stations:");
    for (i, station) in network.all_stations().iter().enumerate() {
        println!("{:>3}. {station}", i + 1);
    }

    let queries = [
        ("Direct route", "Estacion_A", "Estacion_E"),
        ("Route with transfers", "Estacion_A", "Estacion_J"),
        ("Unknown station", "Estacion_A", "Estacion_Z"),
    ];

    for (title, from, to) in queries {
        println!();
        println!("{title}: {from} -> {to} (A*)");
        let route = astar.find_best_route(&StationId::new(from), &StationId::new(to));
        print!("{}", render_route(route.as_ref()));
    }

    let (from, to) = (StationId::new("Estacion_I"), StationId::new("Estacion_K"));
    for searcher in [&astar, &dijkstra] {
        println!();
        println!("{from} -> {to} ({})", searcher.config().mode);
        print!("{}", render_route(searcher.find_best_route(&from, &to).as_ref()));
    }
}

fn performance(network: &Network, transfer_penalty: f64) {
    let queries = [
        ("Estacion_A", "Estacion_E"),
        ("Estacion_I", "Estacion_K"),
        ("Estacion_A", "Estacion_J"),
        ("Estacion_F", "Estacion_H"),
    ]
    .map(|(from, to)| (StationId::new(from), StationId::new(to)));

    for comparison in compare_algorithms(network, &queries, transfer_penalty) {
        print!("{comparison}");
        if !comparison.agrees() {
            println!("  WARNING: modes disagree on total time");
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let network = load_network(&args)?;

    match args.command.as_ref().unwrap_or(&Command::Demo) {
        Command::Route(route_args) => route(&network, route_args)?,
        Command::Demo => demo(&network),
        Command::Analyze => print!("{}", NetworkSummary::from_network(&network)),
        Command::Performance { transfer_penalty } => performance(&network, *transfer_penalty),
        Command::Interactive { mode } => {
            let searcher = RouteSearcher::new(&network, SearchConfig::default().with_mode(*mode));
            interactive::run(&searcher, io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}
