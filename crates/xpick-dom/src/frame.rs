//! Nested frames
//!
//! `iframe` elements own their content document. Whether the embedding
//! document may reach into it is decided by origin, the same way a browser
//! guards `contentDocument`.

use std::fmt;

use url::Url;

use crate::{Document, NodeId};

/// Content of an iframe
#[derive(Debug, Clone)]
pub enum FrameContent {
    /// Navigation started but no document yet
    Pending,
    Loaded(Box<Document>),
}

/// An embedded frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// The `src` the frame was created with (`about:srcdoc` for inline frames)
    pub src: String,
    pub content: FrameContent,
}

impl Frame {
    pub fn pending(src: &str) -> Self {
        Self {
            src: src.to_string(),
            content: FrameContent::Pending,
        }
    }

    pub fn loaded(src: &str, document: Document) -> Self {
        Self {
            src: src.to_string(),
            content: FrameContent::Loaded(Box::new(document)),
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.content {
            FrameContent::Loaded(doc) => Some(&**doc),
            FrameContent::Pending => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.content {
            FrameContent::Loaded(doc) => Some(&mut **doc),
            FrameContent::Pending => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.content, FrameContent::Loaded(_))
    }
}

/// Outcome of trying to reach a frame's document
#[derive(Debug)]
pub enum FrameAccess<'a> {
    Accessible(&'a Document),
    /// Loaded, but on another origin
    Denied { src: String },
    NotLoaded,
    NotAFrame,
}

impl FrameAccess<'_> {
    pub fn is_accessible(&self) -> bool {
        matches!(self, FrameAccess::Accessible(_))
    }
}

/// `about:blank` and `about:srcdoc` documents run under their embedder's origin
pub(crate) fn inherits_origin(url: &str) -> bool {
    url == "about:blank" || url == "about:srcdoc"
}

/// Check whether a document whose origin is `parent_url` may script one whose
/// origin is `child_url`
pub(crate) fn same_origin(parent_url: &str, child_url: &str) -> bool {
    if inherits_origin(child_url) {
        return true;
    }
    let (Ok(parent), Ok(child)) = (Url::parse(parent_url), Url::parse(child_url)) else {
        return false;
    };
    let (parent, child) = (parent.origin(), child.origin());
    parent.is_tuple() && parent == child
}

/// Address of a (possibly nested) document: the chain of iframe elements
/// leading to it from the root document. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FramePath(Vec<NodeId>);

impl FramePath {
    /// The root document
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the document inside `iframe`, an element of this path's document
    pub fn child(&self, iframe: NodeId) -> Self {
        let mut chain = self.0.clone();
        chain.push(iframe);
        Self(chain)
    }

    /// Path of the embedding document
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Iframe elements from the root down
    pub fn frames(&self) -> &[NodeId] {
        &self.0
    }

    /// Nesting depth (0 for the root)
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<NodeId>> for FramePath {
    fn from(chain: Vec<NodeId>) -> Self {
        Self(chain)
    }
}

impl fmt::Display for FramePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("top")?;
        for frame in &self.0 {
            write!(f, " > iframe{frame}")?;
        }
        Ok(())
    }
}
