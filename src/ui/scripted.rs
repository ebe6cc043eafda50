//! Scripted in-memory surface
//!
//! Simulates a reactive host UI: triggered controls commit their
//! attribute changes after a configurable latency, the way a real
//! surface re-renders asynchronously. Used by `run --simulate-ui` and
//! by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{ControlHandle, Selector, SoundBridge, UiSurface};

/// What a control does when activated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TriggerBehavior {
    /// Flip the accessible label between the mute/enable pair and
    /// toggle the sound bridge
    SoundToggle,
    /// Open a collapsed section and play the step-advance effect
    AccordionOpen,
    Inert,
}

#[derive(Clone, Debug)]
struct ControlState {
    id: String,
    attributes: HashMap<String, String>,
    behavior: TriggerBehavior,
}

impl ControlState {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::AriaLabel(labels) => self
                .attributes
                .get("aria-label")
                .map(|l| labels.contains(l))
                .unwrap_or(false),
            Selector::Attribute { name, value } => {
                self.attributes.get(name).map(|v| v == value).unwrap_or(false)
            }
        }
    }
}

/// In-memory surface with latency-delayed attribute commits
pub struct ScriptedSurface {
    controls: Arc<Mutex<Vec<ControlState>>>,
    sounds: Mutex<Arc<dyn SoundBridge>>,
    latency: Duration,
}

impl ScriptedSurface {
    /// Surface with the default control set: a sound toggle button
    /// and two collapsed accordion sections
    pub fn with_default_controls(latency: Duration, sounds: Arc<dyn SoundBridge>) -> Self {
        let controls = vec![
            ControlState {
                id: "sound-toggle".to_string(),
                attributes: HashMap::from([(
                    "aria-label".to_string(),
                    "Mute sound effects".to_string(),
                )]),
                behavior: TriggerBehavior::SoundToggle,
            },
            accordion_section("stepper-details"),
            accordion_section("stepper-payment"),
        ];

        Self {
            controls: Arc::new(Mutex::new(controls)),
            sounds: Mutex::new(sounds),
            latency,
        }
    }

    /// Surface with nothing rendered
    pub fn empty(latency: Duration, sounds: Arc<dyn SoundBridge>) -> Self {
        Self {
            controls: Arc::new(Mutex::new(Vec::new())),
            sounds: Mutex::new(sounds),
            latency,
        }
    }

    fn current_bridge(&self) -> Arc<dyn SoundBridge> {
        self.sounds.lock().expect("sound bridge lock poisoned").clone()
    }
}

fn accordion_section(id: &str) -> ControlState {
    ControlState {
        id: id.to_string(),
        attributes: HashMap::from([
            ("data-state".to_string(), "closed".to_string()),
            ("data-orientation".to_string(), "vertical".to_string()),
        ]),
        behavior: TriggerBehavior::AccordionOpen,
    }
}

impl UiSurface for ScriptedSurface {
    fn find_control(&self, selector: &Selector) -> Option<ControlHandle> {
        self.controls
            .lock()
            .expect("controls lock poisoned")
            .iter()
            .find(|c| c.matches(selector))
            .map(|c| ControlHandle::new(c.id.clone()))
    }

    fn read_attribute(&self, handle: &ControlHandle, name: &str) -> Option<String> {
        self.controls
            .lock()
            .expect("controls lock poisoned")
            .iter()
            .find(|c| c.id == handle.id())
            .and_then(|c| c.attributes.get(name).cloned())
    }

    fn trigger(&self, handle: &ControlHandle) {
        let behavior = {
            let controls = self.controls.lock().expect("controls lock poisoned");
            match controls.iter().find(|c| c.id == handle.id()) {
                Some(control) => control.behavior,
                None => return,
            }
        };

        let controls = Arc::clone(&self.controls);
        let sounds = self.current_bridge();
        let id = handle.id().to_string();
        let latency = self.latency;

        // Commit after the render latency, like a reactive host
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let mut controls = controls.lock().expect("controls lock poisoned");
            let Some(control) = controls.iter_mut().find(|c| c.id == id) else {
                return;
            };

            match behavior {
                TriggerBehavior::SoundToggle => {
                    let label = control
                        .attributes
                        .get("aria-label")
                        .map(String::as_str)
                        .unwrap_or("");
                    let next = if label == "Mute sound effects" {
                        "Enable sound effects"
                    } else {
                        "Mute sound effects"
                    };
                    control
                        .attributes
                        .insert("aria-label".to_string(), next.to_string());
                    sounds.toggle_enabled();
                }
                TriggerBehavior::AccordionOpen => {
                    if control.attributes.get("data-state").map(String::as_str) == Some("closed") {
                        control
                            .attributes
                            .insert("data-state".to_string(), "open".to_string());
                        sounds.play("step-advance", 0.3);
                    }
                }
                TriggerBehavior::Inert => {}
            }
        });
    }

    fn swap_sound_bridge(&self, bridge: Arc<dyn SoundBridge>) -> Arc<dyn SoundBridge> {
        let mut sounds = self.sounds.lock().expect("sound bridge lock poisoned");
        std::mem::replace(&mut *sounds, bridge)
    }
}

/// Sound bridge that records every invocation
#[derive(Debug, Default)]
pub struct RecordingSoundBridge {
    enabled: Mutex<bool>,
    plays: Mutex<Vec<(String, f64)>>,
    preloads: AtomicUsize,
}

impl RecordingSoundBridge {
    pub fn new() -> Self {
        Self {
            enabled: Mutex::new(true),
            plays: Mutex::new(Vec::new()),
            preloads: AtomicUsize::new(0),
        }
    }

    pub fn plays(&self) -> Vec<(String, f64)> {
        self.plays.lock().expect("plays lock poisoned").clone()
    }

    pub fn play_count(&self) -> usize {
        self.plays.lock().expect("plays lock poisoned").len()
    }

    pub fn preload_count(&self) -> usize {
        self.preloads.load(Ordering::SeqCst)
    }
}

impl SoundBridge for RecordingSoundBridge {
    fn play(&self, effect: &str, volume: f64) {
        self.plays
            .lock()
            .expect("plays lock poisoned")
            .push((effect.to_string(), volume));
    }

    fn toggle_enabled(&self) -> bool {
        let mut enabled = self.enabled.lock().expect("enabled lock poisoned");
        *enabled = !*enabled;
        *enabled
    }

    fn is_enabled(&self) -> bool {
        *self.enabled.lock().expect("enabled lock poisoned")
    }

    fn preload(&self) {
        self.preloads.fetch_add(1, Ordering::SeqCst);
    }
}
