use crate::error::{AdvisorError, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agroadvisor",
    version,
    about = "Crop yield, fertilizer, irrigation, health and price advisories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate yield from soil and climate features
    Yield(RequestArgs),
    /// Build a fertilizer plan within a budget
    Fertilizer(RequestArgs),
    /// Build a seven-day irrigation schedule
    Irrigation {
        #[command(flatten)]
        request: RequestArgs,

        /// Fill in missing weatherData from the configured forecast provider
        #[arg(long)]
        fetch_weather: bool,
    },
    /// Score a sensor reading and flag anomalies
    Health(RequestArgs),
    /// Forecast market prices for the next 30 days
    Price(RequestArgs),
    /// List known crops, their water needs and market profiles
    Crops,
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[derive(Args)]
pub struct RequestArgs {
    /// JSON request file; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,
}

impl RequestArgs {
    pub fn read_json(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// Deserialize a request body. Malformed or missing fields are the caller's
/// fault, so they surface as `InvalidInput` rather than `Json`.
pub fn parse_request<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| AdvisorError::InvalidInput(e.to_string()))
}

/// Map `-v` count to a default filter directive when `RUST_LOG` is unset.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
