use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Bicycle routing on velo road network graphs
#[derive(Parser)]
#[command(name = "velo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the graph files
    #[arg(short, long, env = "VELO_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Maximum route legs in cache
    #[arg(
        short,
        long,
        env = "VELO_CACHE_SIZE",
        default_value = "100",
        global = true
    )]
    cache_size: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about the graph
    Info,

    /// Find the graph node closest to a point
    Nearest {
        /// East coordinate (CH1903+ / LV95, metres)
        #[arg(long)]
        e: f64,

        /// North coordinate (CH1903+ / LV95, metres)
        #[arg(long)]
        n: f64,

        /// Search radius in metres
        #[arg(long, default_value = "500")]
        distance: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Plan a route through two or more waypoints
    Route {
        /// Waypoints as E,N pairs (CH1903+ / LV95, metres)
        #[arg(required = true, num_args = 2.., value_parser = commands::route::parse_point)]
        waypoints: Vec<(f64, f64)>,

        /// Maximum spacing of elevation profile samples, in metres
        #[arg(long, env = "VELO_MAX_STEP", default_value = "5.0")]
        max_step: f64,

        /// Radius in which waypoints are snapped to the road network, in metres
        #[arg(long, env = "VELO_SEARCH_DISTANCE", default_value = "500.0")]
        search_distance: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,

        /// Write the elevation profile to a CSV file
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info => commands::info::run(cli.data_dir),
        Commands::Nearest {
            e,
            n,
            distance,
            json,
        } => commands::nearest::run(cli.data_dir, e, n, distance, json),
        Commands::Route {
            waypoints,
            max_step,
            search_distance,
            json,
            profile,
        } => commands::route::run(
            cli.data_dir,
            cli.cache_size,
            waypoints,
            max_step,
            search_distance,
            json,
            profile,
        ),
    }
}
