//! ws-harness - Real-time backend and UI integration test harness
//!
//! A CLI tool that drives a WebSocket backend and a reactive UI
//! surface through scripted scenarios, collects pass/fail outcomes,
//! and reports results deterministically.
//!
//! ## Features
//!
//! - 6 scenarios covering connectivity, rate quotes, session
//!   continuity, and sound-effect hooks
//! - Matcher-based response waits with explicit timeouts
//! - Multiple output formats (Table, JSON, CSV)
//! - Persistent run records with CSV export
//!
//! ## Usage
//!
//! ```bash
//! # Run the transport scenarios against a local backend
//! ws-harness run --ws-url ws://localhost:8001/ws --api-url http://localhost:8001
//!
//! # Run a specific scenario
//! ws-harness run --scenario 2
//!
//! # Include the UI scenarios against the scripted surface
//! ws-harness run --simulate-ui
//!
//! # List available scenarios
//! ws-harness list --detailed
//! ```

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod models;
mod output;
mod probe;
mod results;
mod runner;
mod scenarios;
mod ui;

use cli::Args;
use config::{AppConfig, EnvConfig};
use models::Scenario;
use output::{write_report_to_file, OutputFormat, ReportFormatter};
use results::{ResultStore, RunSettings, StoredRun};
use runner::{ScenarioContext, ScenarioRunner};
use ui::{RecordingSoundBridge, ScriptedSurface, SoundBridge, UiSurface};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env_config = EnvConfig::load();

    // Initialize logging
    let level = if args.verbose || env_config.verbose.unwrap_or(false) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("ws_harness={level}")))
        .with_target(false)
        .compact()
        .init();

    match args.command {
        cli::Command::Run(run_args) => {
            run_scenarios(run_args, env_config).await?;
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
        }
        cli::Command::Results(results_args) => {
            show_results(results_args)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args)?;
        }
    }

    Ok(())
}

async fn run_scenarios(args: cli::RunArgs, env_config: EnvConfig) -> Result<()> {
    let mut config = AppConfig::load_default();
    env_config.apply(&mut config);

    if let Some(ws_url) = &args.ws_url {
        config.ws_url = ws_url.clone();
    }
    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(settle_ms) = args.settle_ms {
        config.settle_ms = settle_ms;
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }

    let format = OutputFormat::from_str(&config.format).unwrap_or(OutputFormat::Table);
    let formatter = ReportFormatter::new(format);

    let mut selected: Vec<Scenario> = if let Some(n) = args.scenario {
        let scenario = Scenario::from_number(n)
            .ok_or_else(|| anyhow::anyhow!("Invalid scenario number: {n}"))?;
        vec![scenario]
    } else if args.all || args.simulate_ui {
        Scenario::all()
    } else {
        Scenario::transport()
    };

    if let Some(skip) = &args.skip {
        let skipped: Vec<u8> = skip.split(',').filter_map(|s| s.trim().parse().ok()).collect();
        selected.retain(|s| !skipped.contains(&s.number()));
    }

    info!(
        "Probing {} ({} scenarios)",
        config.ws_url,
        selected.len()
    );

    let mut ctx = ScenarioContext::new(config.api_url.as_str(), config.ws_url.as_str())
        .with_timeout(Duration::from_millis(config.timeout_ms))
        .with_settle(Duration::from_millis(config.settle_ms));

    if args.simulate_ui {
        // The scripted surface commits well inside the settle window
        let latency = Duration::from_millis((config.settle_ms / 4).max(1));
        let sounds = Arc::new(RecordingSoundBridge::new());
        let surface = Arc::new(ScriptedSurface::with_default_controls(
            latency,
            sounds.clone() as Arc<dyn SoundBridge>,
        ));
        ctx = ctx
            .with_surface(surface as Arc<dyn UiSurface>)
            .with_sounds(sounds as Arc<dyn SoundBridge>);
    }

    let runner = ScenarioRunner::new(ctx);
    let report = runner.run(&selected).await;

    println!("{}", formatter.format_report(&report));

    if let Some(path) = &args.output {
        write_report_to_file(path, &report, format)?;
        info!("Wrote report to {path}");
    }

    if args.save {
        let settings = RunSettings {
            timeout_ms: config.timeout_ms,
            settle_ms: config.settle_ms,
            simulated_ui: args.simulate_ui,
        };
        let store = ResultStore::open_default();
        let run = StoredRun::from_report(config.ws_url.as_str(), settings, &report);
        let path = store.save(&run)?;
        println!("Saved run {} to {}", run.id, path.display());
    }

    if report.summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nIntegration Scenarios (6 total)\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_category = "";

    for scenario in Scenario::all() {
        let category = scenario.category();
        if category != current_category {
            println!("\n{category} Scenarios:");
            println!("──────────────────────────────────────────────────────────────────────");
            current_category = category;
        }

        if args.detailed {
            println!(
                "  {:2}. {:20} {}",
                scenario.number(),
                scenario.name(),
                scenario.description()
            );
        } else {
            println!("  {:2}. {}", scenario.number(), scenario.name());
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("UI scenarios need a surface; run them with --simulate-ui.\n");
}

fn show_results(args: cli::ResultsArgs) -> Result<()> {
    let store = ResultStore::open_default();

    if let Some(path) = &args.export {
        let rows = store.export_csv(path)?;
        println!("Exported {rows} outcome rows to {path}");
        return Ok(());
    }

    if let Some(id) = &args.id {
        let run = store.load(id)?;
        println!(
            "Run {} against {} at {}",
            run.id,
            run.ws_url,
            run.started_at.format("%Y-%m-%d %H:%M:%S")
        );
        for outcome in &run.outcomes {
            println!("  {outcome}");
        }
        println!("{}", run.summary);
        return Ok(());
    }

    let runs = store.list()?;
    if runs.is_empty() {
        println!("No stored runs in {}", store.dir().display());
        return Ok(());
    }

    for run in &runs {
        println!(
            "{}  {}  {}/{} passed  {}",
            run.id,
            run.started_at.format("%Y-%m-%d %H:%M:%S"),
            run.summary.passed,
            run.summary.total,
            run.ws_url
        );
        if !args.summary {
            for outcome in &run.outcomes {
                println!("    {outcome}");
            }
        }
    }

    Ok(())
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show => {
            let config = AppConfig::load_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        cli::ConfigAction::Init { force } => {
            let path = AppConfig::default_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
        cli::ConfigAction::Path => {
            println!("{}", AppConfig::default_path().display());
        }
    }

    Ok(())
}
