//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Integration test harness for real-time shipping backends
#[derive(Parser, Debug)]
#[command(name = "ws-harness")]
#[command(version = "0.1.0")]
#[command(about = "Drive a real-time backend and a reactive UI, collect pass/fail outcomes")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run integration scenarios
    Run(RunArgs),

    /// List available scenarios
    List(ListArgs),

    /// View stored run records
    Results(ResultsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Real-time endpoint (overrides config)
    #[arg(long)]
    pub ws_url: Option<String>,

    /// Token endpoint base URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Specific scenario number to run (1-6)
    #[arg(short, long)]
    pub scenario: Option<u8>,

    /// Run all scenarios, including UI ones
    #[arg(short, long)]
    pub all: bool,

    /// Attach the scripted UI surface and run UI scenarios against it
    #[arg(long)]
    pub simulate_ui: bool,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Response wait bound in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// UI settle delay in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Skip specific scenarios (comma-separated numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Write the report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Persist the run record to the results store
    #[arg(long)]
    pub save: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show scenario descriptions
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for results command
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Show counters only, not individual outcomes
    #[arg(short, long)]
    pub summary: bool,

    /// Show a single run by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Export all stored outcomes to a CSV file
    #[arg(short, long)]
    pub export: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}
