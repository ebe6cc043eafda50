//! Scenario catalog
//!
//! Names the integration checks the harness can run.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// All 6 scenarios
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Transport scenarios (1-3)
    ConnectionCheck,
    RateQuote,
    SessionContinuity,

    // UI scenarios (4-6)
    SoundHooks,
    SoundToggle,
    AccordionSound,
}

impl Scenario {
    /// Get scenario number (1-6)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::ConnectionCheck => 1,
            Scenario::RateQuote => 2,
            Scenario::SessionContinuity => 3,
            Scenario::SoundHooks => 4,
            Scenario::SoundToggle => 5,
            Scenario::AccordionSound => 6,
        }
    }

    /// Get scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ConnectionCheck => "Connection Check",
            Scenario::RateQuote => "Rate Quote",
            Scenario::SessionContinuity => "Session Continuity",
            Scenario::SoundHooks => "Sound Hooks",
            Scenario::SoundToggle => "Sound Toggle",
            Scenario::AccordionSound => "Accordion Sound",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Scenario::ConnectionCheck => "Connect with a fresh token, ping, await any reply",
            Scenario::RateQuote => "Request shipping rates and check the quote options",
            Scenario::SessionContinuity => "Replay a captured session ID across reconnects",
            Scenario::SoundHooks => "Exercise the host's play/toggle/preload hooks",
            Scenario::SoundToggle => "Activate the mute control and observe its label",
            Scenario::AccordionSound => "Open a collapsed section and expect a sound",
        }
    }

    /// Get scenario category
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::ConnectionCheck | Scenario::RateQuote | Scenario::SessionContinuity => {
                "Transport"
            }
            _ => "UI",
        }
    }

    /// Whether the scenario needs a UI surface to run
    pub fn needs_surface(&self) -> bool {
        self.category() == "UI"
    }

    /// Get all scenarios
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::ConnectionCheck,
            Scenario::RateQuote,
            Scenario::SessionContinuity,
            Scenario::SoundHooks,
            Scenario::SoundToggle,
            Scenario::AccordionSound,
        ]
    }

    /// Transport-only scenarios, the default set
    pub fn transport() -> Vec<Scenario> {
        Scenario::all()
            .into_iter()
            .filter(|s| !s.needs_surface())
            .collect()
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        match n {
            1 => Some(Scenario::ConnectionCheck),
            2 => Some(Scenario::RateQuote),
            3 => Some(Scenario::SessionContinuity),
            4 => Some(Scenario::SoundHooks),
            5 => Some(Scenario::SoundToggle),
            6 => Some(Scenario::AccordionSound),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_numbers() {
        assert_eq!(Scenario::ConnectionCheck.number(), 1);
        assert_eq!(Scenario::AccordionSound.number(), 6);
    }

    #[test]
    fn scenario_from_number() {
        assert_eq!(Scenario::from_number(1), Some(Scenario::ConnectionCheck));
        assert_eq!(Scenario::from_number(6), Some(Scenario::AccordionSound));
        assert_eq!(Scenario::from_number(7), None);
    }

    #[test]
    fn all_scenarios() {
        let all = Scenario::all();
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn transport_set_excludes_ui() {
        let transport = Scenario::transport();
        assert_eq!(transport.len(), 3);
        assert!(transport.iter().all(|s| s.category() == "Transport"));
    }

    #[test]
    fn ui_scenarios_need_surface() {
        assert!(!Scenario::RateQuote.needs_surface());
        assert!(Scenario::SoundToggle.needs_surface());
    }
}
