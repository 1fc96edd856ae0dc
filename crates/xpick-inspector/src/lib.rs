//! xpick Inspector
//!
//! Interactive element picker for xpick documents.
//!
//! Features:
//! - Hover highlighting that restores each element's original look
//! - Plain and shift click selection with configurable batch strategies
//! - Tag-constrained and nearest common-ancestor search
//! - Absolute and bounded path locators, and their resolution
//! - Per-frame sessions with origin-checked frame attachment

pub mod ancestor;
pub mod batch;
pub mod config;
pub mod event;
pub mod highlight;
pub mod hover;
pub mod locator;
pub mod report;
pub mod selection;
pub mod session;

pub use ancestor::{
    AncestorResolver, AncestorStrategy, NearestCommon, TagConstrained, find_common_ancestor,
};
pub use batch::ShiftClickStrategy;
pub use config::{ConfigError, HighlightStyle, InspectorConfig};
pub use event::{EventDisposition, EventOutcome, InspectorEvent, Modifiers};
pub use highlight::{Highlighter, SavedStyle};
pub use hover::HoverTracker;
pub use locator::{
    Axis, BoundedPathMode, LocatorError, NodeTest, PathExpr, PathParseError, Step, absolute_path,
    bounded_path, resolve_path, resolve_path_from, resolve_str,
};
pub use report::{LocatorReport, ReportKind};
pub use selection::{ControllerState, SelectionController};
pub use session::{Inspector, frame_at_point};
