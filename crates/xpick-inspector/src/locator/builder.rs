//! Path construction

use serde::{Deserialize, Serialize};
use xpick_dom::{Document, DomTree, NodeId};

use super::{LocatorError, PathExpr, Step};

/// How the segment directly below the bounding ancestor is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundedPathMode {
    /// No index on the ancestor's direct child, so the path addresses every
    /// same-tag row under the ancestor. Picking `li[2]` then `li[1]` of one
    /// `ul` reports `li`.
    #[default]
    List,
    /// Keep the index, addressing exactly one element. The same picks report
    /// `li[1]`.
    Exact,
}

fn indexed_step(tree: &DomTree, el: NodeId, with_index: bool) -> Result<Step, LocatorError> {
    let tag = tree.tag_name(el).ok_or(LocatorError::NotAnElement(el))?;
    let index = if with_index { tree.same_tag_index(el) } else { None };
    Ok(Step::child(tag, index))
}

/// Path of `el` from the document root. `<body>` is always written as the
/// fixed prefix `/html/body` and `<html>` as `/html`; every other element
/// gets a `tag[n]` segment counted among its same-tag siblings.
pub fn absolute_path(doc: &Document, el: NodeId) -> Result<PathExpr, LocatorError> {
    let tree = doc.tree();
    if !tree.is_element(el) {
        return Err(LocatorError::NotAnElement(el));
    }

    let mut steps = Vec::new();
    let mut current = el;
    loop {
        if current == doc.body() {
            steps.push(Step::child("body", None));
            steps.push(Step::child("html", None));
            break;
        }
        if current == doc.document_element() {
            steps.push(Step::child("html", None));
            break;
        }
        steps.push(indexed_step(tree, current, true)?);
        current = tree.parent_element(current).ok_or(LocatorError::Detached(el))?;
    }

    steps.reverse();
    Ok(PathExpr::absolute(steps))
}

/// Path of `el` relative to `ancestor`. Segments at and above the ancestor
/// are left out. `el == ancestor` yields the empty relative path `.`.
pub fn bounded_path(
    tree: &DomTree,
    ancestor: NodeId,
    el: NodeId,
    mode: BoundedPathMode,
) -> Result<PathExpr, LocatorError> {
    if !tree.is_element(el) {
        return Err(LocatorError::NotAnElement(el));
    }
    if el == ancestor {
        return Ok(PathExpr::relative(Vec::new()));
    }
    let not_ancestor = LocatorError::NotAnAncestor { ancestor, target: el };
    if !tree.contains(ancestor, el) {
        return Err(not_ancestor);
    }

    let mut steps = Vec::new();
    let mut current = el;
    loop {
        let Some(parent) = tree.parent(current) else {
            return Err(not_ancestor);
        };
        if parent == ancestor {
            steps.push(indexed_step(tree, current, mode == BoundedPathMode::Exact)?);
            break;
        }
        steps.push(indexed_step(tree, current, true)?);
        current = parent;
    }

    steps.reverse();
    Ok(PathExpr::relative(steps))
}
