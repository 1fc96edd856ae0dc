//! Selection reports

use std::fmt;

use xpick_dom::NodeId;

use crate::PathExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Path from the document root
    Absolute,
    /// Path below a common ancestor
    Bounded,
}

/// Locator emitted by a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorReport {
    pub kind: ReportKind,
    /// Clicked element
    pub target: NodeId,
    /// Common ancestor for bounded reports
    pub ancestor: Option<NodeId>,
    /// Absolute path of the ancestor, when it has one
    pub ancestor_path: Option<PathExpr>,
    pub path: PathExpr,
    /// Selection after the click
    pub selected: Vec<NodeId>,
}

impl LocatorReport {
    /// The bounded path prefixed with its ancestor's absolute path, which
    /// addresses the rows from the document root
    pub fn list_path(&self) -> Option<PathExpr> {
        self.ancestor_path.as_ref().map(|prefix| prefix.join(&self.path))
    }
}

impl fmt::Display for LocatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReportKind::Absolute => write!(f, "absolute: {}", self.path),
            ReportKind::Bounded => {
                write!(f, "bounded: {}", self.path)?;
                if let Some(ancestor) = &self.ancestor_path {
                    write!(f, " (under {ancestor})")?;
                }
                Ok(())
            }
        }
    }
}
