//! Scenario execution
//!
//! Runs scenarios strictly in order: each one's asynchronous work
//! fully resolves before the next starts. Scenarios share one backend
//! and one UI surface, so ordering is part of the contract.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::models::{ResultLedger, Scenario, Summary, TestOutcome};
use crate::probe::Probe;
use crate::ui::{SoundBridge, UiSurface};

/// Everything a scenario needs to reach its collaborators
pub struct ScenarioContext {
    pub api_url: String,
    pub ws_url: String,
    pub timeout: Duration,
    pub settle: Duration,
    pub surface: Option<Arc<dyn UiSurface>>,
    pub sounds: Option<Arc<dyn SoundBridge>>,
}

impl ScenarioContext {
    pub fn new(api_url: impl Into<String>, ws_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ws_url: ws_url.into(),
            timeout: Duration::from_secs(5),
            settle: Duration::from_millis(100),
            surface: None,
            sounds: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_surface(mut self, surface: Arc<dyn UiSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_sounds(mut self, sounds: Arc<dyn SoundBridge>) -> Self {
        self.sounds = Some(sounds);
        self
    }

    /// Fresh probe against this context's endpoint pair
    pub fn probe(&self) -> anyhow::Result<Probe> {
        Probe::new(self.api_url.as_str(), self.ws_url.as_str())
    }
}

/// Runner lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running(Scenario),
    Completed,
}

/// Immutable result of one harness run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: Summary,
    pub outcomes: Vec<TestOutcome>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "{}", self.summary)?;
        write!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.summary.pass_rate(),
            self.duration_ms
        )
    }
}

/// Sequential scenario runner owning one ledger
///
/// `run` consumes the runner: a completed run cannot be restarted in
/// place, so stale counts never bleed into a new run. Build a fresh
/// runner/ledger pair per run.
pub struct ScenarioRunner {
    ctx: ScenarioContext,
    ledger: ResultLedger,
    state: RunnerState,
}

impl ScenarioRunner {
    pub fn new(ctx: ScenarioContext) -> Self {
        Self {
            ctx,
            ledger: ResultLedger::new(),
            state: RunnerState::Idle,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Execute each scenario in order and aggregate into the ledger
    ///
    /// A scenario's error becomes one failed outcome; it never aborts
    /// the run. Every scenario ends with at least one recorded
    /// outcome.
    pub async fn run(mut self, scenarios: &[Scenario]) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();

        for &scenario in scenarios {
            self.state = RunnerState::Running(scenario);
            let before = self.ledger.len();
            info!("Running {scenario}");

            if let Err(e) =
                crate::scenarios::run_scenario(scenario, &self.ctx, &mut self.ledger).await
            {
                error!("{scenario} failed with error: {e:#}");
                if let Ok(outcome) = TestOutcome::fail(scenario.name(), format!("{e:#}")) {
                    self.ledger.record(outcome);
                }
            }

            // Silence is never a terminal state for a scenario
            if self.ledger.len() == before {
                if let Ok(outcome) = TestOutcome::fail(
                    scenario.name(),
                    "scenario completed without recording an outcome",
                ) {
                    self.ledger.record(outcome);
                }
            }

            for outcome in &self.ledger.outcomes()[before..] {
                info!("  {outcome}");
            }
        }

        self.state = RunnerState::Completed;
        let summary = self.ledger.summary();

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        RunReport {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            summary,
            outcomes: self.ledger.into_outcomes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{RecordingSoundBridge, ScriptedSurface};

    fn ui_context() -> (ScenarioContext, Arc<RecordingSoundBridge>) {
        let sounds = Arc::new(RecordingSoundBridge::new());
        let surface = Arc::new(ScriptedSurface::with_default_controls(
            Duration::from_millis(5),
            sounds.clone() as Arc<dyn SoundBridge>,
        ));
        let ctx = ScenarioContext::new("http://127.0.0.1:1", "ws://127.0.0.1:1/ws")
            .with_timeout(Duration::from_millis(200))
            .with_settle(Duration::from_millis(50))
            .with_surface(surface as Arc<dyn UiSurface>)
            .with_sounds(sounds.clone() as Arc<dyn SoundBridge>);
        (ctx, sounds)
    }

    #[test]
    fn runner_starts_idle() {
        let runner = ScenarioRunner::new(ScenarioContext::new("http://x", "ws://x"));
        assert_eq!(runner.state(), RunnerState::Idle);
    }

    #[tokio::test]
    async fn failing_scenario_does_not_abort_the_run() {
        let (ctx, _) = ui_context();
        let runner = ScenarioRunner::new(ctx);

        // The unreachable backend fails ConnectionCheck; SoundHooks
        // still runs against the recording bridge afterwards.
        let report = runner
            .run(&[Scenario::ConnectionCheck, Scenario::SoundHooks])
            .await;

        assert!(report.summary.failed >= 1);
        assert!(report.summary.passed >= 1);
        assert_eq!(
            report.summary.total,
            report.summary.passed + report.summary.failed
        );

        let first = &report.outcomes[0];
        assert_eq!(first.name, "WebSocket Connection");
        assert!(!first.passed);
    }

    #[tokio::test]
    async fn outcomes_follow_execution_order() {
        let (ctx, _) = ui_context();
        let runner = ScenarioRunner::new(ctx);

        let report = runner
            .run(&[Scenario::SoundHooks, Scenario::SoundToggle])
            .await;

        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        let hook_last = names
            .iter()
            .rposition(|n| n.starts_with("Sound Hook"))
            .unwrap();
        let toggle_first = names
            .iter()
            .position(|n| n.starts_with("Sound Toggle"))
            .unwrap();
        assert!(hook_last < toggle_first);
    }

    #[tokio::test]
    async fn ui_scenario_without_surface_records_a_failure() {
        let ctx = ScenarioContext::new("http://127.0.0.1:1", "ws://127.0.0.1:1/ws");
        let runner = ScenarioRunner::new(ctx);

        let report = runner.run(&[Scenario::SoundToggle]).await;

        assert_eq!(report.summary.passed, 0);
        assert!(report.summary.failed >= 1);
    }

    #[tokio::test]
    async fn every_scenario_yields_an_outcome() {
        let (ctx, _) = ui_context();
        let runner = ScenarioRunner::new(ctx);

        let report = runner.run(&Scenario::all()).await;

        // 6 scenarios, each at least one outcome, counters consistent
        assert!(report.summary.total >= 6);
        assert_eq!(report.summary.total, report.outcomes.len());
    }
}
