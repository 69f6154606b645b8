//! `DATATYPE-DEFINITION-*` parsing.
//!
//! Datatype declarations must be in the table before any attribute
//! definition is parsed, because definitions resolve their `TYPE`
//! reference against it.

use roxmltree::Node;

use crate::error::{CodecError, Result};
use crate::types::{AttributeKind, DatatypeDefinition, DatatypeTable, EnumValue};
use crate::xml::{element_children, find_by_path, find_child, find_children, get_tag_name};

/// Parse a single `DATATYPE-DEFINITION-*` element.
///
/// # Errors
/// Returns `UnsupportedAttributeKind` for an unrecognized tag and
/// `MissingElement` if the `IDENTIFIER` attribute is absent.
pub fn parse_datatype(node: Node<'_, '_>) -> Result<DatatypeDefinition> {
    let tag = get_tag_name(node);
    let kind = AttributeKind::from_datatype_tag(tag).ok_or_else(|| {
        CodecError::UnsupportedAttributeKind {
            tag_name: tag.to_string(),
            context: parent_context(node),
        }
    })?;

    let identifier = required_identifier(node)?;
    let long_name = node.attribute("LONG-NAME").map(str::to_string);

    let specified_values = if kind == AttributeKind::Enumeration {
        parse_specified_values(node)?
    } else {
        Vec::new()
    };

    Ok(DatatypeDefinition {
        identifier,
        long_name,
        kind,
        specified_values,
    })
}

/// Parse the ordered `SPECIFIED-VALUES` list of an enumeration datatype.
///
/// Document order is significant and preserved. A missing
/// `SPECIFIED-VALUES` wrapper yields an empty list.
fn parse_specified_values(node: Node<'_, '_>) -> Result<Vec<EnumValue>> {
    let Some(values_node) = find_child(node, "SPECIFIED-VALUES") else {
        return Ok(Vec::new());
    };

    find_children(values_node, "ENUM-VALUE")
        .map(parse_enum_value)
        .collect()
}

fn parse_enum_value(node: Node<'_, '_>) -> Result<EnumValue> {
    let identifier = required_identifier(node)?;
    let long_name = node.attribute("LONG-NAME").map(str::to_string);
    let key = find_by_path(node, "PROPERTIES/EMBEDDED-VALUE")
        .and_then(|n| n.attribute("KEY"))
        .map(str::to_string);

    Ok(EnumValue {
        identifier,
        long_name,
        key,
    })
}

impl DatatypeTable {
    /// Populate a table from a `DATATYPES` container node.
    ///
    /// Each failing child aborts only that datatype; the error is
    /// collected and the remaining children are still parsed, so one
    /// malformed declaration never discards the rest.
    #[must_use]
    pub fn from_datatypes(node: Node<'_, '_>) -> (Self, Vec<CodecError>) {
        let mut table = Self::new();
        let mut errors = Vec::new();

        for child in element_children(node) {
            match parse_datatype(child) {
                Ok(datatype) => {
                    table.insert(datatype);
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        tag = %get_tag_name(child),
                        "Skipping malformed datatype declaration"
                    );
                    errors.push(err);
                }
            }
        }

        (table, errors)
    }
}

/// Read the mandatory `IDENTIFIER` attribute.
pub(crate) fn required_identifier(node: Node<'_, '_>) -> Result<String> {
    node.attribute("IDENTIFIER")
        .map(str::to_string)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CodecError::MissingElement {
            element: "IDENTIFIER".to_string(),
            context: format!("<{}>", get_tag_name(node)),
        })
}

/// Format the parent element as error context, the way log readers expect.
pub(crate) fn parent_context(node: Node<'_, '_>) -> Option<String> {
    node.parent_element()
        .map(|p| format!("<{}>", get_tag_name(p)))
}
