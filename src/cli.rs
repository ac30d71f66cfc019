use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sprinklerd",
    version,
    about = "Weather-driven rain barrel sprinkler decision service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate config and test the OpenWeatherMap connection
    Check {
        /// Latitude used for the test request
        #[arg(long, default_value_t = 39.83)]
        lat: f64,
        /// Longitude used for the test request
        #[arg(long, default_value_t = -75.87)]
        lon: f64,
    },
}
