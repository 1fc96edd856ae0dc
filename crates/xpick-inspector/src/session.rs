//! Inspector sessions
//!
//! Attaches a [`SelectionController`] to the root document and to every
//! nested frame document it may script, and routes events to them by
//! [`FramePath`].

use std::collections::{HashMap, HashSet};

use xpick_dom::{Document, FrameAccess, FramePath};

use crate::{EventDisposition, EventOutcome, InspectorConfig, InspectorEvent, SelectionController};

/// Element picker over a document and its frames
#[derive(Debug, Default)]
pub struct Inspector {
    config: InspectorConfig,
    sessions: HashMap<FramePath, SelectionController>,
    /// Frames discovered during attachment, whose later loads are handled
    watched: HashSet<FramePath>,
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            watched: HashSet::new(),
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Attach to `root` and every loaded, accessible frame below it.
    /// Documents that already have a controller keep it. Returns the number
    /// of controllers created.
    pub fn attach(&mut self, root: &Document) -> usize {
        let created = self.attach_at(root, FramePath::root());
        tracing::info!(
            created,
            documents = self.sessions.len(),
            url = root.url(),
            "inspector attached"
        );
        created
    }

    fn attach_at(&mut self, doc: &Document, path: FramePath) -> usize {
        let mut created = 0;
        if !self.sessions.contains_key(&path) {
            tracing::debug!(frame = %path, url = doc.url(), "attaching controller");
            self.sessions
                .insert(path.clone(), SelectionController::new(self.config.clone()));
            created += 1;
        }

        for iframe in doc.iframes() {
            let child = path.child(iframe);
            self.watched.insert(child.clone());
            match doc.frame_access(iframe) {
                FrameAccess::Accessible(inner) => created += self.attach_at(inner, child),
                FrameAccess::Denied { src } => {
                    tracing::warn!(
                        frame = %child,
                        src = %src,
                        "cannot access cross-origin frame, skipping"
                    );
                }
                FrameAccess::NotLoaded => tracing::debug!(frame = %child, "frame not loaded yet"),
                FrameAccess::NotAFrame => {}
            }
        }
        created
    }

    /// A frame discovered during attachment finished loading. Controllers of
    /// its previous document are dropped and the new document is attached if
    /// it is accessible. Returns the number of controllers created.
    pub fn frame_loaded(&mut self, root: &Document, path: &FramePath) -> usize {
        if !self.watched.contains(path) {
            tracing::debug!(frame = %path, "load of unwatched frame ignored");
            return 0;
        }
        let (Some(parent), Some(&iframe)) = (path.parent(), path.frames().last()) else {
            return 0;
        };

        let prefix = path.frames();
        self.sessions.retain(|p, _| !p.frames().starts_with(prefix));
        self.watched
            .retain(|p| p == path || !p.frames().starts_with(prefix));

        let Some(parent_doc) = root.frame_document_at(&parent) else {
            tracing::warn!(frame = %path, "embedding document is no longer reachable");
            return 0;
        };
        match parent_doc.frame_access(iframe) {
            FrameAccess::Accessible(inner) => {
                let created = self.attach_at(inner, path.clone());
                tracing::info!(
                    frame = %path,
                    url = inner.url(),
                    created,
                    "frame attached after load"
                );
                created
            }
            FrameAccess::Denied { src } => {
                tracing::warn!(
                    frame = %path,
                    src = %src,
                    "cannot access cross-origin frame, skipping"
                );
                0
            }
            FrameAccess::NotLoaded | FrameAccess::NotAFrame => 0,
        }
    }

    pub fn is_attached(&self, path: &FramePath) -> bool {
        self.sessions.contains_key(path)
    }

    /// Attached documents, root first
    pub fn attached(&self) -> Vec<FramePath> {
        let mut paths: Vec<FramePath> = self.sessions.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn controller(&self, path: &FramePath) -> Option<&SelectionController> {
        self.sessions.get(path)
    }

    pub fn controller_mut(&mut self, path: &FramePath) -> Option<&mut SelectionController> {
        self.sessions.get_mut(path)
    }

    /// Deliver an event to the controller of the document at `path`.
    /// Coordinates are in that document's space. Clicks seen by a controller
    /// never reach the page.
    pub fn dispatch(
        &mut self,
        root: &mut Document,
        path: &FramePath,
        event: InspectorEvent,
    ) -> EventOutcome {
        let Some(controller) = self.sessions.get_mut(path) else {
            return EventOutcome::ignored();
        };
        let Some(doc) = root.frame_document_at_mut(path) else {
            tracing::warn!(frame = %path, "attached document is no longer reachable");
            return EventOutcome::ignored();
        };

        match event {
            InspectorEvent::PointerMove { x, y } => {
                controller.pointer_move(doc, x, y);
                EventOutcome::handled(EventDisposition::passthrough(), None)
            }
            InspectorEvent::PointerLeave => {
                controller.pointer_leave(doc);
                EventOutcome::handled(EventDisposition::passthrough(), None)
            }
            InspectorEvent::Click { modifiers } => {
                let report = controller.click(doc, modifiers).unwrap_or_else(|err| {
                    tracing::warn!(frame = %path, error = %err, "could not build locator");
                    None
                });
                EventOutcome::handled(EventDisposition::suppressed(), report)
            }
        }
    }

    /// Restore every highlight and drop all controllers
    pub fn detach(&mut self, root: &mut Document) {
        for (path, mut controller) in self.sessions.drain() {
            if let Some(doc) = root.frame_document_at_mut(&path) {
                controller.detach(doc);
            }
        }
        self.watched.clear();
        tracing::info!("inspector detached");
    }
}

/// Find the innermost accessible document under the point `(x, y)` of the
/// root document, with the point translated into that document's space.
pub fn frame_at_point(root: &Document, x: f64, y: f64) -> (FramePath, f64, f64) {
    let (mut doc, mut path, mut x, mut y) = (root, FramePath::root(), x, y);
    while let Some(hit) = doc.element_from_point(x, y) {
        let FrameAccess::Accessible(inner) = doc.frame_access(hit) else {
            break;
        };
        let Some(rect) = doc.tree().rect(hit) else {
            break;
        };
        x -= rect.x;
        y -= rect.y;
        path = path.child(hit);
        doc = inner;
    }
    (path, x, y)
}
