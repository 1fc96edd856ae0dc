//! xpick DOM - Document Object Model
//!
//! Arena-based document tree used by the element picker: tree traversal,
//! a mutable inline style surface, computed style lookup, geometry for hit
//! testing and nested frame documents.

mod document;
mod frame;
mod geometry;
mod interner;
pub mod layout;
mod node;
mod style;
mod tree;

pub use document::Document;
pub use frame::{Frame, FrameAccess, FrameContent, FramePath};
pub use geometry::DOMRect;
pub use interner::{InternedString, StringInterner};
pub use layout::{BlockLayout, LayoutConfig};
pub use node::{ElementData, Node, NodeData};
pub use style::{InlineStyle, initial_value};
pub use tree::{Ancestors, Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node of every tree
    pub const ROOT: NodeId = NodeId(0);

    /// Absent node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert to `Option`, mapping `NONE` to `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Raw arena index
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}

/// DOM error
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Element {0} is not an iframe")]
    NotAFrame(NodeId),

    #[error("Cannot append {child} to {parent}: {reason}")]
    InvalidAppend {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },
}
