#![warn(non_snake_case)]
//! # city_streets Entry Point
//!
//! Generates a city layout (streets, blocks, lots, traffic and street lights)
//! and writes it to stdout as JSON for a scene builder to consume.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use city_streets::{CityConfig, CityLayout};

#[derive(Parser)]
#[command(name = "city_streets", about = "Generate a procedural city street layout")]
struct Cli {
    /// JSON city configuration; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// City extent along x
    #[arg(long)]
    width: Option<f64>,
    /// City extent along z
    #[arg(long)]
    depth: Option<f64>,
    /// Seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
    /// Print only the layout counts
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            CityConfig::from_path(path)?
        }
        None => CityConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let layout = CityLayout::generate(&config)?;
    let json = match (cli.summary, cli.pretty) {
        (true, true) => serde_json::to_string_pretty(&layout.summary())?,
        (true, false) => serde_json::to_string(&layout.summary())?,
        (false, true) => serde_json::to_string_pretty(&layout)?,
        (false, false) => serde_json::to_string(&layout)?,
    };
    println!("{json}");
    Ok(())
}
