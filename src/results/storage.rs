//! Results storage and retrieval
//!
//! Provides persistent storage for run records in JSON format, with
//! CSV export for downstream consumption.

#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Summary, TestOutcome};
use crate::runner::RunReport;

/// Stored harness run containing all outcomes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredRun {
    /// Unique run ID
    pub id: String,

    /// Real-time endpoint that was probed
    pub ws_url: String,

    /// Timestamp when the run started
    pub started_at: DateTime<Utc>,

    /// Timestamp when the record was written
    pub completed_at: DateTime<Utc>,

    /// Run settings
    pub settings: RunSettings,

    /// Environment info
    pub environment: EnvironmentInfo,

    /// Counter summary
    pub summary: Summary,

    /// Ordered outcomes
    pub outcomes: Vec<TestOutcome>,
}

impl StoredRun {
    pub fn from_report(ws_url: impl Into<String>, settings: RunSettings, report: &RunReport) -> Self {
        Self {
            id: generate_run_id(),
            ws_url: ws_url.into(),
            started_at: report.started_at,
            completed_at: Utc::now(),
            settings,
            environment: EnvironmentInfo::default(),
            summary: report.summary,
            outcomes: report.outcomes.clone(),
        }
    }
}

/// Settings a run executed under
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSettings {
    /// Response wait bound in milliseconds
    pub timeout_ms: u64,

    /// UI settle delay in milliseconds
    pub settle_ms: u64,

    /// Whether the scripted surface stood in for a real UI
    pub simulated_ui: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            settle_ms: 100,
            simulated_ui: false,
        }
    }
}

/// Environment information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Operating system
    pub os: String,

    /// Architecture
    pub arch: String,

    /// Tool version
    pub tool_version: String,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// File-backed store for run records
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for run records
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("ws-harness").join("results"))
            .unwrap_or_else(|| PathBuf::from("results"))
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a run record, returning the file path
    pub fn save(&self, run: &StoredRun) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).context("Failed to create results directory")?;

        let path = self.dir.join(format!("run-{}.json", run.id));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), run)
            .context("Failed to serialize run record")?;

        info!("Saved run {} to {}", run.id, path.display());
        Ok(path)
    }

    /// Load all stored runs, oldest first
    pub fn list(&self) -> Result<Vec<StoredRun>> {
        let mut runs = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(runs),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match self.read_record(&path) {
                    Ok(run) => runs.push(run),
                    Err(e) => debug!("Skipping {}: {e}", path.display()),
                }
            }
        }

        runs.sort_by_key(|r| r.started_at);
        Ok(runs)
    }

    /// Load one run by ID
    pub fn load(&self, id: &str) -> Result<StoredRun> {
        let path = self.dir.join(format!("run-{id}.json"));
        self.read_record(&path)
    }

    fn read_record(&self, path: &Path) -> Result<StoredRun> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Export all stored outcomes as CSV, returning the row count
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<usize> {
        let runs = self.list()?;

        let mut writer = csv::Writer::from_path(path.as_ref())
            .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
        writer.write_record(["run_id", "started_at", "name", "passed", "message"])?;

        let mut rows = 0;
        for run in &runs {
            let started_at = run.started_at.to_rfc3339();
            for outcome in &run.outcomes {
                writer.write_record([
                    run.id.as_str(),
                    started_at.as_str(),
                    outcome.name.as_str(),
                    if outcome.passed { "true" } else { "false" },
                    outcome.message.as_str(),
                ])?;
                rows += 1;
            }
        }

        writer.flush()?;
        Ok(rows)
    }
}

fn generate_run_id() -> String {
    let suffix: String = Uuid::new_v4().to_string().chars().take(8).collect();
    format!("{}-{suffix}", Utc::now().format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report() -> RunReport {
        RunReport {
            started_at: Utc::now(),
            duration_ms: 120,
            summary: Summary {
                passed: 2,
                failed: 0,
                total: 2,
            },
            outcomes: vec![
                TestOutcome::pass("WebSocket Connection", "connected").unwrap(),
                TestOutcome::pass("WebSocket Message", "pong received").unwrap(),
            ],
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        let run = StoredRun::from_report("ws://localhost:8001/ws", RunSettings::default(), &report());
        let path = store.save(&run).unwrap();
        assert!(path.exists());

        let loaded = store.load(&run.id).unwrap();
        assert_eq!(loaded.id, run.id);
        assert_eq!(loaded.summary.total, 2);
        assert_eq!(loaded.outcomes.len(), 2);
    }

    #[test]
    fn list_is_empty_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("missing"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_sorts_by_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        let mut first = StoredRun::from_report("ws://a", RunSettings::default(), &report());
        first.id = "first".to_string();
        first.started_at = Utc::now() - chrono::Duration::minutes(5);
        let mut second = StoredRun::from_report("ws://b", RunSettings::default(), &report());
        second.id = "second".to_string();

        store.save(&second).unwrap();
        store.save(&first).unwrap();

        let runs = store.list().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, "first");
        assert_eq!(runs[1].id, "second");
    }

    #[test]
    fn csv_export_counts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        let run = StoredRun::from_report("ws://a", RunSettings::default(), &report());
        store.save(&run).unwrap();

        let out = dir.path().join("export.csv");
        let rows = store.export_csv(&out).unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("run_id,started_at,name,passed,message"));
        assert!(content.contains("WebSocket Connection"));
    }
}
