//! Inspector input events

use serde::{Deserialize, Serialize};

use crate::LocatorReport;

/// Keyboard/mouse modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Event delivered to an attached document, in that document's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InspectorEvent {
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    Click {
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InspectorEvent {
    pub fn click() -> Self {
        InspectorEvent::Click { modifiers: Modifiers::default() }
    }

    pub fn shift_click() -> Self {
        InspectorEvent::Click { modifiers: Modifiers::shift() }
    }
}

/// What should happen to the event after the inspector saw it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventDisposition {
    /// Let the page handle the event as usual
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Keep the page from seeing the event
    pub fn suppressed() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Default)]
pub struct EventOutcome {
    pub disposition: EventDisposition,
    /// Report produced by a click
    pub report: Option<LocatorReport>,
    /// Whether an attached controller received the event
    pub handled: bool,
}

impl EventOutcome {
    /// No controller is attached to the target document
    pub fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn handled(disposition: EventDisposition, report: Option<LocatorReport>) -> Self {
        Self {
            disposition,
            report,
            handled: true,
        }
    }
}
