//! Common-ancestor search
//!
//! Two strategies behind one trait. `TagConstrained` climbs both elements
//! in lockstep and gives up at the first level where the parents' tags
//! differ, which matches "rows of the same kind of list". `NearestCommon`
//! is the plain lowest common ancestor.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use xpick_dom::{DomTree, NodeId};

/// Finds an ancestor shared by two elements
pub trait AncestorResolver {
    fn common_ancestor(&self, tree: &DomTree, a: NodeId, b: NodeId) -> Option<NodeId>;
}

/// Lockstep climb requiring equal parent tags at every level
#[derive(Debug, Clone, Copy, Default)]
pub struct TagConstrained;

impl AncestorResolver for TagConstrained {
    fn common_ancestor(&self, tree: &DomTree, a: NodeId, b: NodeId) -> Option<NodeId> {
        let (mut a, mut b) = (a, b);
        loop {
            let parent_a = tree.parent_element(a)?;
            let parent_b = tree.parent_element(b)?;
            if tree.tag(parent_a) != tree.tag(parent_b) {
                return None;
            }
            if parent_a == parent_b {
                return Some(parent_a);
            }
            a = parent_a;
            b = parent_b;
        }
    }
}

/// Lowest common ancestor; either element counts as its own ancestor
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCommon;

impl AncestorResolver for NearestCommon {
    fn common_ancestor(&self, tree: &DomTree, a: NodeId, b: NodeId) -> Option<NodeId> {
        if !tree.is_element(a) || !tree.is_element(b) {
            return None;
        }
        let chain: HashSet<NodeId> = std::iter::once(a).chain(tree.ancestors(a)).collect();
        std::iter::once(b)
            .chain(tree.ancestors(b))
            .find(|candidate| chain.contains(candidate))
    }
}

/// Configured ancestor search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AncestorStrategy {
    #[default]
    TagConstrained,
    NearestCommon,
}

impl AncestorStrategy {
    pub fn resolver(self) -> &'static dyn AncestorResolver {
        match self {
            AncestorStrategy::TagConstrained => &TagConstrained,
            AncestorStrategy::NearestCommon => &NearestCommon,
        }
    }
}

/// Tag-constrained common ancestor of `a` and `b`
pub fn find_common_ancestor(tree: &DomTree, a: NodeId, b: NodeId) -> Option<NodeId> {
    TagConstrained.common_ancestor(tree, a, b)
}
