//! HTML5 Parser implementation
//!
//! Parses into html5ever's RcDom and converts the result into our arena DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use xpick_dom::{Document, DomTree, NodeId};

use crate::ParseError;

/// Maximum `srcdoc` nesting followed while parsing
const MAX_FRAME_DEPTH: usize = 8;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document at `about:blank`
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL (used for frame origin checks)
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        self.parse_nested(html, url, 0)
    }

    fn parse_nested(&self, html: &str, url: &str, depth: usize) -> Result<Document, ParseError> {
        tracing::debug!(url, depth, "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        for error in dom.errors.borrow().iter() {
            tracing::debug!(url, %error, "HTML parse recovery");
        }

        let mut document = Document::empty(url);
        let mut frames = Vec::new();
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root, &mut frames)?;
        document.finalize();

        for frame in frames {
            match frame.source {
                FrameSource::Inline(_) if depth >= MAX_FRAME_DEPTH => {
                    tracing::warn!(
                        url,
                        limit = MAX_FRAME_DEPTH,
                        "srcdoc frame nested too deep, left unloaded"
                    );
                    document.attach_frame(frame.element, "about:srcdoc")?;
                }
                FrameSource::Inline(srcdoc) => {
                    let content = self.parse_nested(&srcdoc, "about:srcdoc", depth + 1)?;
                    document.attach_frame(frame.element, "about:srcdoc")?;
                    document.load_frame(frame.element, content)?;
                }
                FrameSource::Remote(src) => document.attach_frame(frame.element, &src)?,
            }
        }

        tracing::debug!(url, nodes = document.tree().len(), "parsed document");
        Ok(document)
    }

    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
        frames: &mut Vec<PendingFrame>,
    ) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent, frames)?;
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    tree.append_text(parent, &text)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);

                let mut srcdoc = None;
                let mut src = None;
                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        let attr_name: &str = &attr.name.local;
                        let value: &str = &attr.value;
                        match attr_name {
                            "srcdoc" => srcdoc = Some(value.to_string()),
                            "src" => src = Some(value.to_string()),
                            _ => {}
                        }
                        elem.set_attr(attr_name, value);
                    }
                }
                tree.append_child(parent, id)?;

                if &*name.local == "iframe" {
                    let source = match (srcdoc, src) {
                        (Some(doc), _) => Some(FrameSource::Inline(doc)),
                        (None, Some(src)) => Some(FrameSource::Remote(src)),
                        (None, None) => None,
                    };
                    if let Some(source) = source {
                        frames.push(PendingFrame { element: id, source });
                    }
                }

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id, frames)?;
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}

/// Iframe found during conversion, wired up once the tree is complete
struct PendingFrame {
    element: NodeId,
    source: FrameSource,
}

enum FrameSource {
    Inline(String),
    Remote(String),
}
