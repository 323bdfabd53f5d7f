use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fuel-cost", version, about = "Road transport fuel cost estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Start,

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Run a single estimate and print it as JSON
    Estimate {
        /// Start place name
        #[arg(long)]
        from: String,

        /// Destination place name
        #[arg(long)]
        to: String,

        /// Vehicle profile: driving-hgv or driving-car
        #[arg(long, default_value = "driving-hgv")]
        profile: String,

        /// Fuel type: diesel or gasoline
        #[arg(long, default_value = "diesel")]
        fuel: String,

        /// Include the decoded route geometry in the output
        #[arg(long)]
        geometry: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}
