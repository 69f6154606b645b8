//! The single normalization point for `THE-VALUE` payloads.
//!
//! Producing tools disagree about how `THE-VALUE` is encoded: some emit it
//! as a child element (text content for scalars, nested markup for XHTML),
//! others inline the whole value as an XML attribute on the value element.
//! Every component that reads a payload goes through [`extract_the_value`]
//! instead of assuming one encoding.

use roxmltree::Node;

use crate::types::AttributeKind;
use crate::xml::{find_child, get_text, inner_markup};

/// Name of the semantic payload field.
pub const THE_VALUE: &str = "THE-VALUE";

/// Resolved payload of a value-bearing element.
///
/// `Absent` is data, not an error: callers decide whether absence is legal
/// (an optional DEFAULT-VALUE) or a policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Scalar text payload, trimmed.
    Text(String),
    /// Serialized XHTML markup payload.
    Markup(String),
    /// Neither a child element nor an attribute `THE-VALUE` is present.
    Absent,
}

impl RawValue {
    /// Consume the raw value, returning its text if one is present.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) | Self::Markup(s) => Some(s),
            Self::Absent => None,
        }
    }
}

/// Resolve `THE-VALUE` on a value-bearing element.
///
/// Resolution order:
/// 1. A child element named `THE-VALUE`: scalar kinds take its trimmed
///    text content; XHTML takes the namespace-qualified serialization of
///    the child's *contents* (not the wrapper element itself).
/// 2. An XML attribute named `THE-VALUE`: its string verbatim. XHTML
///    delivered this way is treated as a literal markup string and is not
///    re-parsed.
/// 3. Otherwise [`RawValue::Absent`].
///
/// Never fails for a structurally valid element.
pub fn extract_the_value(node: Node<'_, '_>, kind: AttributeKind) -> RawValue {
    if let Some(child) = find_child(node, THE_VALUE) {
        return match kind {
            AttributeKind::Xhtml => RawValue::Markup(inner_markup(child)),
            _ => RawValue::Text(get_text(child)),
        };
    }

    if let Some(value) = node.attribute(THE_VALUE) {
        return match kind {
            AttributeKind::Xhtml => RawValue::Markup(value.to_string()),
            _ => RawValue::Text(value.to_string()),
        };
    }

    RawValue::Absent
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn parse(xml: &str) -> Document<'_> {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn test_scalar_from_child_element() {
        let doc = parse("<ATTRIBUTE-VALUE-REAL><THE-VALUE>3.14</THE-VALUE></ATTRIBUTE-VALUE-REAL>");
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Real),
            RawValue::Text("3.14".to_string())
        );
    }

    #[test]
    fn test_scalar_from_attribute() {
        let doc = parse(r#"<ATTRIBUTE-VALUE-REAL THE-VALUE="3.14"/>"#);
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Real),
            RawValue::Text("3.14".to_string())
        );
    }

    #[test]
    fn test_both_shapes_extract_identically() {
        let child = parse("<ATTRIBUTE-VALUE-DATE><THE-VALUE>2002-05-30</THE-VALUE></ATTRIBUTE-VALUE-DATE>");
        let attr = parse(r#"<ATTRIBUTE-VALUE-DATE THE-VALUE="2002-05-30"/>"#);
        assert_eq!(
            extract_the_value(child.root_element(), AttributeKind::Date),
            extract_the_value(attr.root_element(), AttributeKind::Date)
        );
    }

    #[test]
    fn test_child_element_wins_over_attribute() {
        let doc = parse(r#"<ATTRIBUTE-VALUE-STRING THE-VALUE="inline"><THE-VALUE>nested</THE-VALUE></ATTRIBUTE-VALUE-STRING>"#);
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::String),
            RawValue::Text("nested".to_string())
        );
    }

    #[test]
    fn test_xhtml_from_child_contents() {
        let doc = parse(
            r#"<ATTRIBUTE-VALUE-XHTML xmlns:xhtml="http://www.w3.org/1999/xhtml"><THE-VALUE><xhtml:div>body</xhtml:div></THE-VALUE></ATTRIBUTE-VALUE-XHTML>"#,
        );
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Xhtml),
            RawValue::Markup("<xhtml:div>body</xhtml:div>".to_string())
        );
    }

    #[test]
    fn test_xhtml_default_namespace_keeps_binding() {
        let doc = parse(
            r#"<ATTRIBUTE-VALUE-XHTML><THE-VALUE><div xmlns="http://www.w3.org/1999/xhtml">body</div></THE-VALUE></ATTRIBUTE-VALUE-XHTML>"#,
        );
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Xhtml),
            RawValue::Markup(
                r#"<div xmlns="http://www.w3.org/1999/xhtml">body</div>"#.to_string()
            )
        );
    }

    #[test]
    fn test_xhtml_from_attribute_is_literal() {
        let doc = parse(r#"<ATTRIBUTE-VALUE-XHTML THE-VALUE="xhtml string"/>"#);
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Xhtml),
            RawValue::Markup("xhtml string".to_string())
        );
    }

    #[test]
    fn test_absent() {
        let doc = parse("<ATTRIBUTE-VALUE-XHTML/>");
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::Xhtml),
            RawValue::Absent
        );
    }

    #[test]
    fn test_empty_child_is_empty_text_not_absent() {
        let doc = parse("<ATTRIBUTE-VALUE-STRING><THE-VALUE/></ATTRIBUTE-VALUE-STRING>");
        assert_eq!(
            extract_the_value(doc.root_element(), AttributeKind::String),
            RawValue::Text(String::new())
        );
    }
}
