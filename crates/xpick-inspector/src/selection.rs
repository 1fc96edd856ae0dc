//! Selection controller
//!
//! One controller per attached document. It owns the hover reference, the
//! selection set and the last-selected reference, and turns pointer input
//! into highlight changes and locator reports.

use xpick_dom::{Document, NodeId};

use crate::{
    Highlighter, HoverTracker, InspectorConfig, LocatorError, LocatorReport, Modifiers, ReportKind,
    absolute_path, bounded_path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Hovering,
    Selected,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    config: InspectorConfig,
    highlighter: Highlighter,
    hover: HoverTracker,
    selection: Vec<NodeId>,
    last_selected: Option<NodeId>,
}

impl SelectionController {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            highlighter: Highlighter::new(config.highlight.clone()),
            config,
            hover: HoverTracker::new(),
            selection: Vec::new(),
            last_selected: None,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        if !self.selection.is_empty() {
            ControllerState::Selected
        } else if self.hover.current().is_some() {
            ControllerState::Hovering
        } else {
            ControllerState::Idle
        }
    }

    /// Selected elements in selection order
    pub fn selected(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.current()
    }

    pub fn last_selected(&self) -> Option<NodeId> {
        self.last_selected
    }

    pub fn is_selected(&self, el: NodeId) -> bool {
        self.selection.contains(&el)
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn pointer_move(&mut self, doc: &mut Document, x: f64, y: f64) -> Option<NodeId> {
        self.hover
            .track_pointer(doc, &mut self.highlighter, &self.selection, x, y)
    }

    pub fn pointer_leave(&mut self, doc: &mut Document) {
        self.hover.leave(doc, &mut self.highlighter, &self.selection);
    }

    /// Handle a click on the current hover target. Returns `Ok(None)` when
    /// nothing is hovered.
    pub fn click(
        &mut self,
        doc: &mut Document,
        modifiers: Modifiers,
    ) -> Result<Option<LocatorReport>, LocatorError> {
        let Some(target) = self.hover.current() else {
            tracing::debug!("click without hover target");
            return Ok(None);
        };

        let last = if modifiers.shift { self.last_selected } else { None };
        let report = match last {
            Some(last) => {
                let resolver = self.config.ancestor.resolver();
                match resolver.common_ancestor(doc.tree(), target, last) {
                    Some(ancestor) => self.shift_click(doc, target, last, ancestor)?,
                    None => {
                        tracing::debug!(
                            element = %target,
                            last = %last,
                            "no common ancestor, plain click"
                        );
                        self.plain_click(doc, target)?
                    }
                }
            }
            None => self.plain_click(doc, target)?,
        };

        tracing::info!(
            element = %report.target,
            path = %report.path,
            selected = report.selected.len(),
            "{report}"
        );
        Ok(Some(report))
    }

    fn plain_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
    ) -> Result<LocatorReport, LocatorError> {
        let path = absolute_path(doc, target)?;

        self.clear_selection(doc);
        self.select(doc, target);
        self.last_selected = Some(target);

        Ok(LocatorReport {
            kind: ReportKind::Absolute,
            target,
            ancestor: None,
            ancestor_path: None,
            path,
            selected: self.selection.clone(),
        })
    }

    fn shift_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        last: NodeId,
        ancestor: NodeId,
    ) -> Result<LocatorReport, LocatorError> {
        let tree = doc.tree();
        let path = bounded_path(tree, ancestor, target, self.config.bounded_path)?;
        let ancestor_path = absolute_path(doc, ancestor).ok();
        let batch = self.config.shift_click.candidates(tree, last, target, ancestor);

        match batch {
            Some(batch) => {
                tracing::debug!(
                    strategy = ?self.config.shift_click,
                    count = batch.len(),
                    "batch selection"
                );
                self.clear_selection(doc);
                for el in batch {
                    self.select(doc, el);
                }
            }
            None => tracing::trace!(strategy = ?self.config.shift_click, "selection unchanged"),
        }

        Ok(LocatorReport {
            kind: ReportKind::Bounded,
            target,
            ancestor: Some(ancestor),
            ancestor_path,
            path,
            selected: self.selection.clone(),
        })
    }

    /// Add an element to the selection and highlight it
    pub fn select(&mut self, doc: &mut Document, el: NodeId) {
        if !doc.tree().is_element(el) || self.selection.contains(&el) {
            return;
        }
        self.highlighter.highlight(doc.tree_mut(), el);
        self.hover.release(el);
        self.selection.push(el);
    }

    /// De-highlight every selected element and empty the selection
    pub fn clear_selection(&mut self, doc: &mut Document) {
        for el in self.selection.drain(..) {
            self.highlighter.de_highlight(doc.tree_mut(), el);
        }
    }

    /// Restore every highlight this controller painted and drop all state
    pub fn detach(&mut self, doc: &mut Document) {
        self.pointer_leave(doc);
        self.clear_selection(doc);
        self.highlighter.clear();
        self.last_selected = None;
    }
}
