//! UI observation adapter
//!
//! Bridges scenario code to an interactive surface without depending
//! on any specific component implementation. Real surfaces implement
//! the traits here; a scripted in-memory surface ships for simulation
//! and tests.

#![allow(dead_code)]

mod scripted;

pub use scripted::{RecordingSoundBridge, ScriptedSurface};

use std::sync::Arc;
use std::time::Duration;

/// How a control is located on the surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Accessible label matching any of the given values
    AriaLabel(Vec<String>),
    /// An attribute with an exact value, e.g. `data-state="closed"`
    Attribute { name: String, value: String },
}

impl Selector {
    pub fn aria_label(labels: &[&str]) -> Self {
        Selector::AriaLabel(labels.iter().map(|l| (*l).to_string()).collect())
    }

    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The sound toggle control, by its two accessible labels
    pub fn sound_toggle() -> Self {
        Selector::aria_label(&["Mute sound effects", "Enable sound effects"])
    }

    /// A collapsed accordion trigger
    pub fn closed_accordion() -> Self {
        Selector::attribute("data-state", "closed")
    }
}

/// Opaque handle to one located control
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControlHandle(String);

impl ControlHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// An interactive surface the harness can observe and drive
///
/// Absence of a control is a value, not an error: "component not
/// rendered" is an expected, testable outcome.
pub trait UiSurface: Send + Sync {
    /// Locate one matching interactive element
    fn find_control(&self, selector: &Selector) -> Option<ControlHandle>;

    /// Read an attribute off a located control
    fn read_attribute(&self, handle: &ControlHandle, name: &str) -> Option<String>;

    /// Simulate user activation
    fn trigger(&self, handle: &ControlHandle);

    /// Replace the surface's sound bridge, returning the previous one
    ///
    /// Lets a scenario install a recording bridge, exercise the
    /// surface, and restore the original, without the surface knowing
    /// it is being observed.
    fn swap_sound_bridge(&self, bridge: Arc<dyn SoundBridge>) -> Arc<dyn SoundBridge>;
}

/// Black-box sound-effect capabilities exposed by the host
///
/// The harness asserts these were invoked or changed; it never plays
/// audio itself.
pub trait SoundBridge: Send + Sync {
    /// Play a named effect at a volume
    fn play(&self, effect: &str, volume: f64);

    /// Flip the enabled state and return the new value
    fn toggle_enabled(&self) -> bool;

    fn is_enabled(&self) -> bool;

    /// Warm the effect cache
    fn preload(&self);
}

/// Trigger a control and re-read an attribute after a fixed settle
/// delay
///
/// The surface exposes no commit event for its asynchronous
/// re-render, so a coarse fixed delay stands in for a completion
/// signal. The delay is awaited here, inside the calling scenario's
/// window.
pub async fn observe_after(
    surface: &dyn UiSurface,
    handle: &ControlHandle,
    attribute: &str,
    settle: Duration,
) -> Option<String> {
    surface.trigger(handle);
    tokio::time::sleep(settle).await;
    surface.read_attribute(handle, attribute)
}
