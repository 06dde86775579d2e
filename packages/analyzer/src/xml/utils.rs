//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webpart_analyzer::xml::get_tag_name;
///
/// let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3"/></webParts>"#;
/// let doc = Document::parse(xml).unwrap();
/// let web_part = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(web_part), "webPart");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webpart_analyzer::xml::find_child;
///
/// let xml = r#"<root><child1/><child2/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "child1").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given local name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find the first descendant element (in document order) with the given
/// namespace URI and local name.
///
/// The node itself is not a candidate, only elements below it.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webpart_analyzer::xml::find_descendant_ns;
///
/// let xml = r#"<WebPart xmlns="urn:a"><Title>x</Title><Title xmlns="urn:b">y</Title></WebPart>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let title = find_descendant_ns(doc.root_element(), "urn:b", "Title").unwrap();
/// assert_eq!(title.text(), Some("y"));
/// assert!(find_descendant_ns(doc.root_element(), "urn:c", "Title").is_none());
/// ```
pub fn find_descendant_ns<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| {
        n.is_element()
            && get_tag_name(*n) == tag
            && n.tag_name().namespace() == Some(namespace)
    })
}

/// Get the concatenated text of all descendant text nodes, untrimmed.
///
/// CDATA sections are included, so HTML stored in a v2 `Content` element
/// comes back verbatim.
pub fn deep_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}
