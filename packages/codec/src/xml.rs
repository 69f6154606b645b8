//! XML utility functions for navigating and serializing DOM subtrees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use reqif_codec::xml::get_tag_name;
///
/// let xml = r#"<REQ-IF xmlns="http://www.omg.org/spec/ReqIF/20110401/reqif.xsd"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "REQ-IF");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use reqif_codec::xml::find_child;
///
/// let xml = r#"<DEFAULT-VALUE><ATTRIBUTE-VALUE-REAL/></DEFAULT-VALUE>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "ATTRIBUTE-VALUE-REAL").is_some());
/// assert!(find_child(root, "ATTRIBUTE-VALUE-INTEGER").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a descendant element matching a slash-separated path of tag names.
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for part in path.split('/') {
        current = find_child(current, part)?;
    }
    Some(current)
}

/// Get the text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Serialize the *contents* of a node (not the node itself) back to
/// namespace-qualified markup.
///
/// Element and attribute names keep the prefix that is in scope for their
/// namespace, so an XHTML fragment round-trips as `<xhtml:div>...` when the
/// document declares `xmlns:xhtml`. An element bound through a *default*
/// declaration has no prefix to keep, so its `xmlns="..."` is re-declared
/// on the outermost element that needs it. Comments and processing
/// instructions are dropped; text is re-escaped.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use reqif_codec::xml::inner_markup;
///
/// let xml = r#"<THE-VALUE xmlns:xhtml="http://www.w3.org/1999/xhtml"><xhtml:div>Hi &amp; bye</xhtml:div></THE-VALUE>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(inner_markup(doc.root_element()), "<xhtml:div>Hi &amp; bye</xhtml:div>");
/// ```
pub fn inner_markup(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    for child in node.children() {
        // The fragment is detached from its document, so no default
        // namespace is in scope yet.
        write_node(child, &mut out, None);
    }
    out.trim().to_string()
}

fn write_node(node: Node<'_, '_>, out: &mut String, default_ns: Option<&str>) {
    if node.is_text() {
        out.push_str(&escape_text(node.text().unwrap_or_default()));
        return;
    }
    if !node.is_element() {
        return;
    }

    let namespace = node.tag_name().namespace();
    let prefix = namespace
        .and_then(|uri| node.lookup_prefix(uri))
        .filter(|p| !p.is_empty());

    let name = match prefix {
        Some(prefix) => format!("{prefix}:{}", node.tag_name().name()),
        None => node.tag_name().name().to_string(),
    };
    out.push('<');
    out.push_str(&name);

    // An unprefixed element whose namespace (or lack of one) differs from
    // the inherited default must re-declare the binding, or the fragment
    // loses it once detached from the document.
    let child_default = if prefix.is_some() { default_ns } else { namespace };
    if prefix.is_none() && namespace != default_ns {
        out.push_str(" xmlns=\"");
        out.push_str(&escape_attr(namespace.unwrap_or_default()));
        out.push('"');
    }

    for attr in node.attributes() {
        out.push(' ');
        match attr.namespace().and_then(|ns| node.lookup_prefix(ns)) {
            Some(prefix) if !prefix.is_empty() => {
                out.push_str(prefix);
                out.push(':');
            }
            _ => {}
        }
        out.push_str(attr.name());
        out.push_str("=\"");
        out.push_str(&escape_attr(attr.value()));
        out.push('"');
    }

    if node.first_child().is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        write_node(child, out, child_default);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
