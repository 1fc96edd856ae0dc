//! Structural path locators
//!
//! Builds XPath-style path expressions for elements (`/html/body/ul[1]/li[2]`
//! from the document root, or `tr/td[2]` below a shared ancestor) and
//! evaluates them back to elements.

mod builder;
mod expr;
mod resolve;

pub use builder::{BoundedPathMode, absolute_path, bounded_path};
pub use expr::{Axis, NodeTest, PathExpr, PathParseError, Step};
pub use resolve::{resolve_path, resolve_path_from, resolve_str};

use xpick_dom::NodeId;

/// Locator error
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Element {0} is not connected to the document element")]
    Detached(NodeId),

    #[error("Element {ancestor} is not an ancestor of {target}")]
    NotAnAncestor { ancestor: NodeId, target: NodeId },

    #[error(transparent)]
    Parse(#[from] PathParseError),
}
