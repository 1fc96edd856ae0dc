//! Comprehensive tests for xpick-dom
//!
//! Tree construction, traversal, style surface, hit testing and frames.

use xpick_dom::{
    BlockLayout, DOMRect, Document, DomError, DomTree, FrameAccess, FramePath, InlineStyle,
    LayoutConfig, NodeId, StringInterner,
};

#[test]
fn test_interner_lowercases_and_deduplicates() {
    let mut interner = StringInterner::new();

    let a = interner.intern("DIV");
    let b = interner.intern("div");
    assert_eq!(a, b);
    assert_eq!(interner.get(a), "div");
    assert_eq!(interner.lookup("Div"), Some(a));
    assert_eq!(interner.lookup("x-gadget"), None);

    let before = interner.len();
    for _ in 0..1000 {
        interner.intern("li");
        interner.intern("x-widget");
    }
    assert_eq!(interner.len(), before + 1);
}

#[test]
fn test_tree_links() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let p1 = tree.create_element("p");
    let p2 = tree.create_element("p");
    let root = tree.root();

    tree.append_child(root, div).unwrap();
    tree.append_child(div, p1).unwrap();
    tree.append_child(div, p2).unwrap();

    assert_eq!(tree.len(), 4);
    let node = tree.get(div).unwrap();
    assert_eq!(node.parent, root);
    assert_eq!(node.first_child, p1);
    assert_eq!(node.last_child, p2);
    assert_eq!(tree.get(p1).unwrap().next_sibling, p2);
    assert!(!tree.get(p1).unwrap().prev_sibling.is_valid());
}

#[test]
fn test_append_rejects_bad_moves() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = tree.append_element(root, "div").unwrap();
    let span = tree.append_element(div, "span").unwrap();

    assert!(matches!(tree.append_child(span, div), Err(DomError::InvalidAppend { .. })));
    assert!(matches!(tree.append_child(root, span), Err(DomError::InvalidAppend { .. })));
    assert!(matches!(tree.append_child(div, root), Err(DomError::InvalidAppend { .. })));
    assert!(matches!(tree.append_child(div, NodeId::NONE), Err(DomError::NodeNotFound(_))));
}

#[test]
fn test_traversal_skips_non_elements() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let ul = tree.append_element(root, "ul").unwrap();
    tree.append_text(ul, "  ").unwrap();
    let li1 = tree.append_element(ul, "li").unwrap();
    let comment = tree.create_comment("separator");
    tree.append_child(ul, comment).unwrap();
    let li2 = tree.append_element(ul, "li").unwrap();
    let a = tree.append_element(li2, "a").unwrap();
    tree.append_text(a, "link").unwrap();

    assert_eq!(tree.children(ul).count(), 4);
    assert_eq!(tree.element_children(ul).collect::<Vec<_>>(), vec![li1, li2]);
    assert_eq!(tree.ancestors(a).collect::<Vec<_>>(), vec![li2, ul]);
    assert_eq!(tree.parent_element(ul), None);
    assert_eq!(tree.same_tag_index(li2), Some(2));
    assert_eq!(tree.elements_by_tag(root, "li"), vec![li1, li2]);
    assert!(tree.contains(ul, a));
    assert!(!tree.contains(li1, a));
    assert_eq!(tree.text_content(ul), "  link");
}

#[test]
fn test_inline_style_and_computed_values() {
    let mut style =
        InlineStyle::parse("color: red; BACKGROUND-COLOR : blue ;; box-shadow: 0 0 1px black");
    assert_eq!(style.get("background-color"), Some("blue"));
    assert_eq!(style.len(), 3);

    style.set("color", "");
    assert_eq!(style.get("color"), None);
    assert_eq!(style.to_css_text(), "background-color: blue; box-shadow: 0 0 1px black;");

    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let div = doc.tree_mut().append_element(body, "div").unwrap();
    assert_eq!(doc.tree().computed_style(div, "background-color"), Some("rgba(0, 0, 0, 0)"));
    assert_eq!(doc.tree().computed_style(div, "box-shadow"), Some("none"));

    doc.tree_mut().set_style(div, "box-shadow", "inset 0 0 2px red");
    assert_eq!(doc.tree().computed_style(div, "box-shadow"), Some("inset 0 0 2px red"));
    assert_eq!(
        doc.tree().style(div).map(InlineStyle::to_css_text).as_deref(),
        Some("box-shadow: inset 0 0 2px red;")
    );
}

#[test]
fn test_hit_testing_prefers_deepest_and_last() {
    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let tree = doc.tree_mut();
    let back = tree.append_element(body, "div").unwrap();
    let front = tree.append_element(body, "div").unwrap();
    let inner = tree.append_element(front, "span").unwrap();
    tree.set_rect(body, Some(DOMRect::from_xywh(0.0, 0.0, 200.0, 200.0)));
    tree.set_rect(back, Some(DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    tree.set_rect(front, Some(DOMRect::from_xywh(50.0, 50.0, 100.0, 100.0)));
    tree.set_rect(inner, Some(DOMRect::from_xywh(60.0, 60.0, 10.0, 10.0)));

    assert_eq!(doc.element_from_point(10.0, 10.0), Some(back));
    assert_eq!(doc.element_from_point(75.0, 75.0), Some(front));
    assert_eq!(doc.element_from_point(65.0, 65.0), Some(inner));
    assert_eq!(doc.element_from_point(180.0, 180.0), Some(body));
    // right and bottom edges are exclusive
    assert_eq!(doc.element_from_point(200.0, 10.0), None);
}

#[test]
fn test_layout_then_hit_test() {
    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let tree = doc.tree_mut();
    let rows: Vec<NodeId> = (0..3)
        .map(|i| {
            let p = tree.append_element(body, "p").unwrap();
            tree.append_text(p, &format!("row {i}")).unwrap();
            p
        })
        .collect();

    let layout = BlockLayout::new(LayoutConfig { line_height: 10.0, ..LayoutConfig::default() });
    assert_eq!(layout.run(&mut doc), 30.0);
    for (i, &row) in rows.iter().enumerate() {
        assert_eq!(doc.element_from_point(1.0, i as f64 * 10.0 + 5.0), Some(row));
    }
}

#[test]
fn test_frame_access_by_origin() {
    let mut doc = Document::new("https://example.com/page");
    let body = doc.body();
    let same = doc.tree_mut().append_element(body, "iframe").unwrap();
    let cross = doc.tree_mut().append_element(body, "iframe").unwrap();
    let pending = doc.tree_mut().append_element(body, "iframe").unwrap();
    let div = doc.tree_mut().append_element(body, "div").unwrap();

    doc.load_frame(same, Document::new("https://example.com/frame")).unwrap();
    doc.load_frame(cross, Document::new("https://evil.example.org/")).unwrap();
    doc.attach_frame(pending, "https://example.com/slow").unwrap();

    assert!(doc.frame_access(same).is_accessible());
    assert!(matches!(doc.frame_access(cross), FrameAccess::Denied { .. }));
    assert!(matches!(doc.frame_access(pending), FrameAccess::NotLoaded));
    assert!(matches!(doc.frame_access(div), FrameAccess::NotAFrame));
    assert!(matches!(doc.attach_frame(div, "x"), Err(DomError::NotAFrame(_))));
    assert_eq!(doc.iframes(), vec![same, cross, pending]);
}

#[test]
fn test_nested_frame_paths() {
    let mut inner = Document::new("https://example.com/inner");
    let inner_body = inner.body();
    let deep_frame = inner.tree_mut().append_element(inner_body, "iframe").unwrap();
    let mut deep = Document::new("about:blank");
    let deep_body = deep.body();
    let marker = deep.tree_mut().append_element(deep_body, "mark").unwrap();
    inner.load_frame(deep_frame, deep).unwrap();

    let mut root = Document::new("https://example.com/");
    let body = root.body();
    let frame = root.tree_mut().append_element(body, "iframe").unwrap();
    root.load_frame(frame, inner).unwrap();

    let path = FramePath::root().child(frame).child(deep_frame);
    let doc = root.frame_document_at(&path).unwrap();
    assert_eq!(doc.tree().tag_name(marker), Some("mark"));

    let doc = root.frame_document_at_mut(&path).unwrap();
    doc.tree_mut().set_style(marker, "background-color", "yellow");
    assert_eq!(
        root.frame_document_at(&path).unwrap().tree().computed_style(marker, "background-color"),
        Some("yellow")
    );

    assert!(root.frame_document_at(&FramePath::root().child(body)).is_none());
}
