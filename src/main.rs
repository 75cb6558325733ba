use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use road_router::{
    sdk::config::{parse_coordinate, RouterConfig},
    sdk::planner::{Endpoint, LocationTarget, Session},
    sdk::routing::{cities::city_names, ConfiguredGeolocator, RemoteProvider},
    sdk::util::{log::init_logging, rate_limit::limiter_per_minute},
    sdk::view::{ControlPanel, MapView},
};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

type RemoteSession = Session<RemoteProvider, ConfiguredGeolocator>;

/// Plan a driving route between two places and estimate the travel time
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start place: a city from the list or any free-text address
    #[arg(short, long)]
    from: Option<String>,

    /// Destination place: a city from the list or any free-text address
    #[arg(short, long)]
    to: Option<String>,

    /// Use the device location for the start or the destination
    #[arg(long, value_enum)]
    locate: Option<TargetArg>,

    /// [Optional] Device location as "lat,lon", overrides ROAD_ROUTER_DEVICE_LOCATION
    #[arg(long)]
    device_location: Option<String>,

    /// [Optional] Write the map view as GeoJSON to this file
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Keep reading commands from stdin after the initial plan
    #[arg(short, long)]
    interactive: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TargetArg {
    Start,
    End,
    None,
}

impl From<TargetArg> for LocationTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Start => LocationTarget::Start,
            TargetArg::End => LocationTarget::End,
            TargetArg::None => LocationTarget::None,
        }
    }
}

/// One line of interactive input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the start by city name or address
    Start {
        #[arg(required = true, num_args = 1..)]
        place: Vec<String>,
    },
    /// Set the destination by city name or address
    End {
        #[arg(required = true, num_args = 1..)]
        place: Vec<String>,
    },
    /// Exchange start and destination
    Swap,
    /// Use the device location for start, end, or stop using it
    Locate {
        #[arg(value_enum)]
        target: TargetArg,
    },
    /// Recompute distance, time and route
    Find,
    /// Print the control panel
    Show,
    /// Write the map view as GeoJSON
    Map { path: PathBuf },
    /// List the cities that resolve without a network call
    Cities,
    /// Leave
    Quit,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let mut config = RouterConfig::from_env().context("Invalid ROAD_ROUTER_* environment")?;
    if let Some(value) = &cli.device_location {
        config.device_location = Some(parse_coordinate(value).context("Invalid --device-location")?);
    }
    log::info!(
        "Geocoding with {}, routing with {}",
        config.geocode_base_url,
        config.route_base_url
    );

    let limiter = limiter_per_minute(config.requests_per_minute);
    let provider = RemoteProvider::new(&config, limiter).context("Failed to build HTTP client")?;
    let geolocator = ConfiguredGeolocator::new(config.device_location);

    let mut session = Session::new(provider, geolocator);
    session.mount();

    if let Some(place) = &cli.from {
        enter_place(&mut session, Endpoint::Start, place);
    }
    if let Some(place) = &cli.to {
        enter_place(&mut session, Endpoint::End, place);
    }
    if let Some(target) = cli.locate {
        session.locate(target.into());
    }

    println!("{}", ControlPanel::new(session.state()));

    if let Some(path) = &cli.geojson {
        write_map(&session, &config, path)?;
    }

    if cli.interactive {
        run_interactive(&mut session, &config)?;
    }

    Ok(())
}

fn enter_place(session: &mut RemoteSession, endpoint: Endpoint, place: &str) {
    session.set_text(endpoint, place);
    session.lookup(endpoint, place);
}

fn write_map(session: &RemoteSession, config: &RouterConfig, path: &Path) -> Result<()> {
    let view = MapView::from_state(session.state(), &config.tile_url);
    let json_output = serde_json::to_string_pretty(&view.to_geojson())?;
    fs::write(path, json_output)
        .with_context(|| format!("Failed to write map view to {}", path.display()))?;
    log::info!("Map view written to {}", path.display());
    Ok(())
}

fn run_interactive(session: &mut RemoteSession, config: &RouterConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match CommandLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Start { place } => enter_place(session, Endpoint::Start, &place.join(" ")),
            Command::End { place } => enter_place(session, Endpoint::End, &place.join(" ")),
            Command::Swap => session.swap(),
            Command::Locate { target } => session.locate(target.into()),
            Command::Find => session.find_route(),
            Command::Show => {}
            Command::Map { path } => {
                // A failed write shouldn't end the session
                if let Err(e) = write_map(session, config, &path) {
                    log::error!("{:#}", e);
                }
                continue;
            }
            Command::Cities => {
                println!("{}", city_names().collect::<Vec<_>>().join("\n"));
                continue;
            }
            Command::Quit => break,
        }

        println!("{}", ControlPanel::new(session.state()));
    }

    Ok(())
}
