//! Event script replay
//!
//! Pointer coordinates in a script are in root document space. Each move is
//! routed into the innermost accessible frame under the pointer, and a click
//! goes to the document the pointer was last over.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use xpick_dom::{Document, FramePath};
use xpick_inspector::{Inspector, InspectorConfig, InspectorEvent, frame_at_point};

/// A replay script: either a bare list of events or `{ "events": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Script {
    Events(Vec<InspectorEvent>),
    Object { events: Vec<InspectorEvent> },
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid replay script {}", path.display()))
    }

    pub fn events(&self) -> &[InspectorEvent] {
        match self {
            Script::Events(events) | Script::Object { events } => events,
        }
    }
}

/// Replay `script` against `doc` and return one line per report
pub fn run(doc: &mut Document, config: InspectorConfig, script: &Script) -> Vec<String> {
    let mut inspector = Inspector::new(config);
    inspector.attach(doc);

    let mut current = FramePath::root();
    let mut lines = Vec::new();
    for (step, &event) in script.events().iter().enumerate() {
        match event {
            InspectorEvent::PointerMove { x, y } => {
                let (path, x, y) = frame_at_point(doc, x, y);
                if path != current {
                    inspector.dispatch(doc, &current, InspectorEvent::PointerLeave);
                    current = path;
                }
                inspector.dispatch(doc, &current, InspectorEvent::PointerMove { x, y });
            }
            InspectorEvent::PointerLeave => {
                inspector.dispatch(doc, &current, event);
            }
            InspectorEvent::Click { .. } => {
                let outcome = inspector.dispatch(doc, &current, event);
                if let Some(report) = outcome.report {
                    let prefix = if current.is_root() {
                        String::new()
                    } else {
                        format!("[{current}] ")
                    };
                    lines.push(format!("{prefix}{report}"));
                    if let Some(rows) = report.list_path() {
                        lines.push(format!("{prefix}rows: {rows}"));
                    }
                } else {
                    tracing::debug!(step, "click produced no report");
                }
            }
        }
    }

    inspector.detach(doc);
    lines
}
