//! Shift-click batch selection

use serde::{Deserialize, Serialize};
use xpick_dom::{DomTree, NodeId};

/// What a shift click selects once a common ancestor is found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftClickStrategy {
    /// Report the bounded path and leave the selection alone
    #[default]
    ReportOnly,
    /// Every element child of the shared parent
    Siblings,
    /// Every descendant of the ancestor with the clicked tag
    SameTag,
    /// The children of every grandparent child shaped like the last
    /// selected element's parent
    CousinChildren,
    /// `Siblings`, then `SameTag`, then `CousinChildren`
    Cascade,
}

impl ShiftClickStrategy {
    /// Elements that should replace the selection, or `None` when the
    /// strategy does not apply to this pair
    pub fn candidates(
        self,
        tree: &DomTree,
        last: NodeId,
        clicked: NodeId,
        ancestor: NodeId,
    ) -> Option<Vec<NodeId>> {
        match self {
            ShiftClickStrategy::ReportOnly => None,
            ShiftClickStrategy::Siblings => siblings(tree, last, clicked),
            ShiftClickStrategy::SameTag => same_tag(tree, last, clicked, ancestor),
            ShiftClickStrategy::CousinChildren => cousin_children(tree, last, clicked),
            ShiftClickStrategy::Cascade => siblings(tree, last, clicked)
                .or_else(|| same_tag(tree, last, clicked, ancestor))
                .or_else(|| cousin_children(tree, last, clicked)),
        }
    }
}

fn non_empty(nodes: Vec<NodeId>) -> Option<Vec<NodeId>> {
    (!nodes.is_empty()).then_some(nodes)
}

fn siblings(tree: &DomTree, last: NodeId, clicked: NodeId) -> Option<Vec<NodeId>> {
    let parent = tree.parent_element(last)?;
    if tree.parent_element(clicked) != Some(parent) {
        return None;
    }
    non_empty(tree.element_children(parent).collect())
}

fn same_tag(
    tree: &DomTree,
    last: NodeId,
    clicked: NodeId,
    ancestor: NodeId,
) -> Option<Vec<NodeId>> {
    let tag = tree.tag(clicked)?;
    if tree.tag(last) != Some(tag) {
        return None;
    }
    non_empty(
        tree.descendants(ancestor)
            .filter(|&d| tree.tag(d) == Some(tag))
            .collect(),
    )
}

fn cousin_children(tree: &DomTree, last: NodeId, clicked: NodeId) -> Option<Vec<NodeId>> {
    let last_parent = tree.parent_element(last)?;
    let clicked_parent = tree.parent_element(clicked)?;
    let grandparent = tree.parent_element(last_parent)?;
    if tree.parent_element(clicked_parent) != Some(grandparent) {
        return None;
    }

    let row_tag = tree.tag(last_parent);
    non_empty(
        tree.element_children(grandparent)
            .filter(|&row| tree.tag(row) == row_tag)
            .flat_map(|row| tree.element_children(row))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// table > [tr > td*2, tr > td*2, caption > span]
    fn table() -> (DomTree, NodeId, Vec<NodeId>, NodeId) {
        let mut tree = DomTree::new();
        let table = tree.append_element(tree.root(), "table").unwrap();
        let mut cells = Vec::new();
        for _ in 0..2 {
            let tr = tree.append_element(table, "tr").unwrap();
            cells.push(tree.append_element(tr, "td").unwrap());
            cells.push(tree.append_element(tr, "td").unwrap());
        }
        let caption = tree.append_element(table, "caption").unwrap();
        let span = tree.append_element(caption, "span").unwrap();
        (tree, table, cells, span)
    }

    #[test]
    fn test_report_only_never_applies() {
        let (tree, table, cells, _) = table();
        let report_only = ShiftClickStrategy::ReportOnly;
        assert_eq!(report_only.candidates(&tree, cells[0], cells[1], table), None);
    }

    #[test]
    fn test_siblings() {
        let (tree, table, cells, _) = table();
        let tr = tree.parent(cells[0]).unwrap();
        assert_eq!(
            ShiftClickStrategy::Siblings.candidates(&tree, cells[0], cells[1], tr),
            Some(vec![cells[0], cells[1]])
        );
        assert_eq!(ShiftClickStrategy::Siblings.candidates(&tree, cells[0], cells[2], table), None);
    }

    #[test]
    fn test_same_tag() {
        let (tree, table, cells, span) = table();
        assert_eq!(
            ShiftClickStrategy::SameTag.candidates(&tree, cells[0], cells[3], table),
            Some(cells.clone())
        );
        assert_eq!(ShiftClickStrategy::SameTag.candidates(&tree, cells[0], span, table), None);
    }

    #[test]
    fn test_cousin_children() {
        let (tree, table, cells, span) = table();
        assert_eq!(
            ShiftClickStrategy::CousinChildren.candidates(&tree, cells[1], cells[2], table),
            Some(cells.clone())
        );
        // the caption row is skipped: its tag differs from the last parent's
        assert!(
            !ShiftClickStrategy::CousinChildren
                .candidates(&tree, cells[0], span, table)
                .unwrap()
                .contains(&span)
        );
    }

    #[test]
    fn test_cascade_order() {
        let (tree, table, cells, _) = table();
        let tr = tree.parent(cells[0]).unwrap();
        // siblings win when they apply
        assert_eq!(
            ShiftClickStrategy::Cascade.candidates(&tree, cells[0], cells[1], tr),
            Some(vec![cells[0], cells[1]])
        );
        assert_eq!(
            ShiftClickStrategy::Cascade.candidates(&tree, cells[0], cells[3], table),
            Some(cells)
        );
    }
}
