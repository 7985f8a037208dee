//! Line-oriented prompt for point-to-point queries.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::network::connection::StationId;
use crate::report::render_route;
use crate::search::RouteSearcher;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "salir"];

/// Reads one trimmed line, or `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_owned()))
}

fn is_quit(answer: &str) -> bool {
    QUIT_WORDS.iter().any(|w| answer.eq_ignore_ascii_case(w))
}

/// Lists the stations, then answers origin/destination queries until the
/// user quits or input ends. Returns the number of routes searched.
pub fn run<R: BufRead, W: Write>(
    searcher: &RouteSearcher<'_>,
    mut input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let stations = searcher.network().all_stations();

    writeln!(output, "Stations:")?;
    for (i, station) in stations.iter().enumerate() {
        writeln!(output, "{:>3}. {station}", i + 1)?;
    }

    let mut searched = 0;
    loop {
        writeln!(output)?;
        writeln!(output, "{}", "-".repeat(30))?;

        let Some(start) = prompt(&mut input, &mut output, "Origin station (or 'quit'): ")? else {
            break;
        };
        if is_quit(&start) {
            break;
        }
        let start = StationId::new(&start);
        if !stations.contains(&start) {
            writeln!(output, "Unknown station {start}")?;
            continue;
        }

        let Some(goal) = prompt(&mut input, &mut output, "Destination station: ")? else {
            break;
        };
        let goal = StationId::new(&goal);
        if !stations.contains(&goal) {
            writeln!(output, "Unknown station {goal}")?;
            continue;
        }

        if start == goal {
            writeln!(output, "Origin and destination are the same")?;
            continue;
        }

        writeln!(output, "Searching for a route from {start} to {goal}...")?;
        debug!(%start, %goal, "Interactive query");
        let route = searcher.find_best_route(&start, &goal);
        write!(output, "{}", render_route(route.as_ref()))?;
        searched += 1;
    }

    writeln!(output, "Goodbye!")?;
    Ok(searched)
}
