//! Path evaluation

use std::collections::{HashMap, HashSet};

use xpick_dom::{Document, DomTree, NodeId};

use super::{Axis, PathExpr, PathParseError};

/// Evaluate a path against a document. Relative paths are evaluated from
/// the document node. The result is in document order without duplicates
/// and may be empty or hold several elements.
pub fn resolve_path(doc: &Document, expr: &PathExpr) -> Vec<NodeId> {
    let tree = doc.tree();
    evaluate(tree, tree.root(), expr)
}

/// Evaluate a path from a context element. Absolute paths ignore the context.
pub fn resolve_path_from(tree: &DomTree, context: NodeId, expr: &PathExpr) -> Vec<NodeId> {
    let start = if expr.is_absolute() { tree.root() } else { context };
    evaluate(tree, start, expr)
}

/// Parse and evaluate in one go
pub fn resolve_str(doc: &Document, expr: &str) -> Result<Vec<NodeId>, PathParseError> {
    let expr: PathExpr = expr.parse()?;
    Ok(resolve_path(doc, &expr))
}

fn evaluate(tree: &DomTree, start: NodeId, expr: &PathExpr) -> Vec<NodeId> {
    if tree.get(start).is_none() {
        return Vec::new();
    }

    let mut current = vec![start];
    for step in expr.steps() {
        let mut next = Vec::new();
        let mut seen = HashSet::new();

        for &context in &current {
            let parents: Vec<NodeId> = match step.axis {
                Axis::Child => vec![context],
                Axis::Descendant => std::iter::once(context)
                    .chain(tree.descendants(context).filter(|&d| tree.is_element(d)))
                    .collect(),
            };

            for parent in parents {
                let mut matches = tree
                    .element_children(parent)
                    .filter(|&child| step.test.matches(tree, child));
                match step.index {
                    Some(n) => {
                        if let Some(hit) = n.checked_sub(1).and_then(|i| matches.nth(i)) {
                            if seen.insert(hit) {
                                next.push(hit);
                            }
                        }
                    }
                    None => {
                        for hit in matches {
                            if seen.insert(hit) {
                                next.push(hit);
                            }
                        }
                    }
                }
            }
        }

        if next.is_empty() {
            tracing::trace!(%expr, %step, "path step matched nothing");
            return next;
        }
        current = next;
    }

    if current.len() > 1 {
        let order: HashMap<NodeId, usize> = tree
            .descendants(tree.root())
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect();
        current.sort_by_key(|node| order.get(node).copied().unwrap_or(usize::MAX));
    }
    current
}
