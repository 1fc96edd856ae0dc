//! Comprehensive tests for xpick-html

use xpick_dom::{FrameAccess, FramePath, NodeData};
use xpick_html::{HtmlParser, parse};

#[test]
fn test_whitespace_text_dropped() {
    let doc = parse("<ul>\n  <li>A</li>\n  <li>B</li>\n</ul>").unwrap();
    let tree = doc.tree();
    let ul = tree.find_child(doc.body(), "ul").unwrap();

    assert_eq!(tree.children(ul).count(), 2);
    assert_eq!(tree.element_children(ul).count(), 2);
    assert_eq!(tree.text_content(ul), "AB");
}

#[test]
fn test_doctype_and_comments_kept() {
    let doc = parse("<!DOCTYPE html><html><body><!-- note --><p>x</p></body></html>").unwrap();
    let tree = doc.tree();

    let first = tree.children(tree.root()).next().map(|(_, node)| &node.data);
    assert!(matches!(first, Some(NodeData::Doctype { .. })));
    let body_children: Vec<_> = tree.children(doc.body()).map(|(_, node)| &node.data).collect();
    assert!(matches!(body_children[0], NodeData::Comment(text) if text == " note "));
}

#[test]
fn test_tags_and_attributes_normalized() {
    let doc = parse(r#"<DIV ID="Main" Class="a b"><SPAN>t</SPAN></DIV>"#).unwrap();
    let tree = doc.tree();
    let div = tree.find_child(doc.body(), "div").unwrap();

    assert_eq!(tree.tag_name(div), Some("div"));
    assert_eq!(tree.get_attr(div, "id"), Some("Main"));
    assert_eq!(tree.get_attr(div, "class"), Some("a b"));
    assert_eq!(doc.get_element_by_id("Main"), Some(div));
}

#[test]
fn test_malformed_markup_recovers() {
    let doc = parse("<table><tr><td>1<td>2</table><p>after").unwrap();
    let tree = doc.tree();

    // the parser inserts the implied tbody
    let cells = tree.elements_by_tag(doc.body(), "td");
    assert_eq!(cells.len(), 2);
    let tr = tree.parent_element(cells[0]).unwrap();
    assert_eq!(tree.tag_name(tree.parent_element(tr).unwrap()), Some("tbody"));
    assert!(tree.find_child(doc.body(), "p").is_some());
}

#[test]
fn test_srcdoc_frame_loaded_and_accessible() {
    let doc = HtmlParser::new()
        .parse_with_url(
            r#"<iframe srcdoc="<ul><li>one</li><li>two</li></ul>"></iframe>"#,
            "https://example.com/",
        )
        .unwrap();
    let iframe = doc.iframes()[0];

    let FrameAccess::Accessible(inner) = doc.frame_access(iframe) else {
        panic!("srcdoc frame should be accessible");
    };
    assert_eq!(inner.url(), "about:srcdoc");
    assert_eq!(inner.tree().elements_by_tag(inner.body(), "li").len(), 2);

    let path = FramePath::root().child(iframe);
    assert!(doc.frame_document_at(&path).is_some());
}

#[test]
fn test_src_frame_pending() {
    let doc = HtmlParser::new()
        .parse_with_url(
            r#"<iframe src="https://other.example.org/widget"></iframe><iframe></iframe>"#,
            "https://example.com/",
        )
        .unwrap();
    let frames = doc.iframes();

    assert_eq!(frames.len(), 2);
    assert!(matches!(doc.frame_access(frames[0]), FrameAccess::NotLoaded));
    let src = doc.frame(frames[0]).map(|f| f.src.as_str());
    assert_eq!(src, Some("https://other.example.org/widget"));
    assert!(doc.frame(frames[1]).is_none());
}

#[test]
fn test_nested_srcdoc_frames() {
    let inner = r#"<p>inner</p><iframe srcdoc='<b>deep</b>'></iframe>"#;
    let html = format!(r#"<iframe srcdoc="{}"></iframe>"#, inner.replace('"', "&quot;"));
    let doc = parse(&html).unwrap();

    let outer = doc.iframes()[0];
    let middle = doc.frame_document_at(&FramePath::root().child(outer)).unwrap();
    let deep_frame = middle.iframes()[0];
    let deep = doc
        .frame_document_at(&FramePath::root().child(outer).child(deep_frame))
        .unwrap();
    assert_eq!(deep.tree().text_content(deep.body()), "deep");
}

#[test]
fn test_frame_nesting_limit() {
    let mut html = String::from("<p>bottom</p>");
    for _ in 0..12 {
        let escaped = html.replace('&', "&amp;").replace('"', "&quot;");
        html = format!(r#"<iframe srcdoc="{escaped}"></iframe>"#);
    }

    let doc = parse(&html).unwrap();
    let mut path = FramePath::root();
    let mut current = &doc;
    for _ in 0..8 {
        path = path.child(current.iframes()[0]);
        current = doc.frame_document_at(&path).unwrap();
    }

    let too_deep = current.iframes()[0];
    assert!(matches!(current.frame_access(too_deep), FrameAccess::NotLoaded));
    assert!(doc.frame_document_at(&path.child(too_deep)).is_none());
}

#[test]
fn test_frame_inside_srcdoc_uses_embedder_origin() {
    let html = r#"<iframe srcdoc="<iframe src='https://example.com/inner'></iframe>"></iframe>"#;
    let mut doc = HtmlParser::new().parse_with_url(html, "https://example.com/").unwrap();
    let outer = FramePath::root().child(doc.iframes()[0]);

    let inline = doc.frame_document_at_mut(&outer).unwrap();
    let inner_frame = inline.iframes()[0];
    let inner = HtmlParser::new()
        .parse_with_url("<p>inner</p>", "https://example.com/inner")
        .unwrap();
    inline.load_frame(inner_frame, inner).unwrap();

    let inner = doc.frame_document_at(&outer.child(inner_frame)).unwrap();
    assert_eq!(inner.tree().text_content(inner.body()), "inner");
}
