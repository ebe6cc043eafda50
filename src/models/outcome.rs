//! Outcome and ledger models
//!
//! Defines test outcomes and the result ledger for a harness run.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error for a malformed outcome at the construction site
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid outcome: {0}")]
pub struct InvalidOutcome(pub String);

/// A single pass/fail verdict with a human-readable message
///
/// Immutable once recorded; ordering inside the ledger reflects
/// execution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl TestOutcome {
    /// Create an outcome; an empty name is rejected
    pub fn new(
        name: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
    ) -> Result<Self, InvalidOutcome> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidOutcome("outcome name must not be empty".to_string()));
        }
        Ok(Self {
            name,
            passed,
            message: message.into(),
        })
    }

    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Result<Self, InvalidOutcome> {
        Self::new(name, true, message)
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Result<Self, InvalidOutcome> {
        Self::new(name, false, message)
    }

    pub fn symbol(&self) -> &'static str {
        if self.passed {
            "✓"
        } else {
            "✗"
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.symbol(), self.name, self.message)
    }
}

/// Counters-only view of a ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl Summary {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Pass: {} | Fail: {}",
            self.total, self.passed, self.failed
        )
    }
}

/// Ordered outcome sequence plus counters for one harness run
///
/// Owned by exactly one runner; `total == passed + failed ==
/// outcomes.len()` holds after every `record`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResultLedger {
    passed: usize,
    failed: usize,
    outcomes: Vec<TestOutcome>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome in arrival order and bump the counters
    ///
    /// Recording never fails; malformed outcomes are rejected earlier
    /// by the `TestOutcome` constructor.
    pub fn record(&mut self, outcome: TestOutcome) {
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Pure read of the counters
    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed,
            failed: self.failed,
            total: self.passed + self.failed,
        }
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<TestOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for ResultLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_rejects_empty_name() {
        assert!(TestOutcome::new("", true, "msg").is_err());
        assert!(TestOutcome::new("   ", true, "msg").is_err());
        assert!(TestOutcome::new("WebSocket Connection", true, "msg").is_ok());
    }

    #[test]
    fn ledger_invariant_after_every_record() {
        let mut ledger = ResultLedger::new();
        let outcomes = [
            TestOutcome::pass("a", "first").unwrap(),
            TestOutcome::fail("b", "second").unwrap(),
            TestOutcome::pass("c", "third").unwrap(),
        ];

        for outcome in outcomes {
            ledger.record(outcome);
            let summary = ledger.summary();
            assert_eq!(summary.total, summary.passed + summary.failed);
            assert_eq!(summary.total, ledger.outcomes().len());
        }

        let summary = ledger.summary();
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn ledger_preserves_insertion_order() {
        let mut ledger = ResultLedger::new();
        ledger.record(TestOutcome::pass("first", "1").unwrap());
        ledger.record(TestOutcome::fail("second", "2").unwrap());

        let names: Vec<_> = ledger.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn summary_pass_rate() {
        let summary = Summary {
            passed: 3,
            failed: 1,
            total: 4,
        };
        assert_eq!(summary.pass_rate(), 75.0);
        assert!(!summary.is_all_passed());

        let empty = Summary {
            passed: 0,
            failed: 0,
            total: 0,
        };
        assert_eq!(empty.pass_rate(), 0.0);
    }
}
