//! `ATTRIBUTE-DEFINITION-*` parsing.
//!
//! Dispatch is strictly on the element's tag suffix, and the suffix alone
//! decides which `ATTRIBUTE-VALUE-<KIND>` tag is legal beneath
//! `DEFAULT-VALUE`. Both lookups go through the same mapping on
//! [`AttributeKind`], so a REAL definition can never end up searching for
//! INTEGER's value tag.

use roxmltree::Node;

use crate::datatype::{parent_context, required_identifier};
use crate::error::{CodecError, Result};
use crate::extract::{extract_the_value, RawValue, THE_VALUE};
use crate::types::{
    AttributeDefinition, AttributeKind, AttributePayload, DatatypeTable, DefinitionTable,
};
use crate::xml::{element_children, find_child, find_children, get_tag_name, get_text};

/// Parse a single `ATTRIBUTE-DEFINITION-*` element.
///
/// # Errors
/// - `UnsupportedAttributeKind` for an unrecognized tag.
/// - `MissingElement` if `IDENTIFIER` or the `TYPE` reference is absent.
/// - `UnresolvedDatatype` if the datatype reference does not resolve to a
///   declaration of the definition's own kind (fatal for this definition).
/// - `MalformedDefaultValue` if `DEFAULT-VALUE` is present but its
///   kind-matched value child is missing.
/// - `MalformedValue` if a scalar default carries no `THE-VALUE`.
pub fn parse_definition(
    node: Node<'_, '_>,
    datatypes: &DatatypeTable,
) -> Result<AttributeDefinition> {
    let tag = get_tag_name(node);
    let kind = AttributeKind::from_definition_tag(tag).ok_or_else(|| {
        CodecError::UnsupportedAttributeKind {
            tag_name: tag.to_string(),
            context: parent_context(node),
        }
    })?;

    let identifier = required_identifier(node)?;
    let long_name = node.attribute("LONG-NAME").map(str::to_string);

    let (datatype_ref, permitted_values) = resolve_datatype(node, kind, &identifier, datatypes)?;

    let default_value = match find_child(node, "DEFAULT-VALUE") {
        None => None,
        Some(default_node) => parse_default_value(default_node, kind, &identifier)?,
    };

    Ok(AttributeDefinition {
        identifier,
        long_name,
        kind,
        datatype_ref,
        permitted_values,
        default_value,
    })
}

/// Resolve the `TYPE` reference against the datatype table.
///
/// The reference element's tag is kind-driven (`DATATYPE-DEFINITION-
/// <KIND>-REF`), and the resolved datatype must itself be of that kind; a
/// kind mismatch is as unresolved as an unknown identifier. For
/// ENUMERATION this also yields the permitted value ids in datatype order.
fn resolve_datatype(
    node: Node<'_, '_>,
    kind: AttributeKind,
    identifier: &str,
    datatypes: &DatatypeTable,
) -> Result<(String, Vec<String>)> {
    let type_node = find_child(node, "TYPE").ok_or_else(|| CodecError::MissingElement {
        element: "TYPE".to_string(),
        context: format!("<{}> '{identifier}'", kind.definition_tag()),
    })?;

    let ref_node =
        find_child(type_node, kind.datatype_ref_tag()).ok_or_else(|| CodecError::MissingElement {
            element: kind.datatype_ref_tag().to_string(),
            context: format!("<{}> '{identifier}'", kind.definition_tag()),
        })?;

    let datatype_ref = get_text(ref_node);
    let datatype = datatypes
        .get(&datatype_ref)
        .filter(|datatype| datatype.kind == kind)
        .ok_or_else(|| CodecError::UnresolvedDatatype {
            definition: identifier.to_string(),
            datatype: datatype_ref.clone(),
        })?;

    let permitted_values = datatype
        .specified_values
        .iter()
        .map(|value| value.identifier.clone())
        .collect();

    Ok((datatype_ref, permitted_values))
}

/// Parse a `DEFAULT-VALUE` wrapper for a definition of the given kind.
///
/// The single `ATTRIBUTE-VALUE-<KIND>` child matching the definition's own
/// kind must be present; any other kind's tag in its place is
/// `MalformedDefaultValue`, never a silent fallback. XHTML tolerates an
/// absent `THE-VALUE` (vendor tools emit empty wrappers) and yields no
/// default; scalar kinds do not.
fn parse_default_value(
    default_node: Node<'_, '_>,
    kind: AttributeKind,
    identifier: &str,
) -> Result<Option<AttributePayload>> {
    let value_node = find_child(default_node, kind.value_tag()).ok_or_else(|| {
        CodecError::MalformedDefaultValue {
            definition: identifier.to_string(),
            expected_tag: kind.value_tag(),
        }
    })?;

    if kind == AttributeKind::Enumeration {
        return Ok(Some(AttributePayload::Enumeration(enum_value_refs(
            value_node,
        ))));
    }

    match extract_the_value(value_node, kind) {
        RawValue::Absent if kind == AttributeKind::Xhtml => Ok(None),
        RawValue::Absent => Err(CodecError::MalformedValue {
            context: format!("<{}> of definition '{identifier}'", kind.value_tag()),
            reason: format!("required {THE_VALUE} is missing"),
        }),
        raw => match raw.into_text().and_then(|text| AttributePayload::from_text(kind, text)) {
            Some(payload) => Ok(Some(payload)),
            // from_text only refuses Enumeration, which is handled above
            None => Err(CodecError::MalformedValue {
                context: format!("<{}> of definition '{identifier}'", kind.value_tag()),
                reason: format!("required {THE_VALUE} is missing"),
            }),
        },
    }
}

/// Collect the ordered `VALUES`/`ENUM-VALUE-REF` ids of an enumeration
/// value element. A missing or empty `VALUES` wrapper is a legal empty
/// list.
pub(crate) fn enum_value_refs(value_node: Node<'_, '_>) -> Vec<String> {
    find_child(value_node, "VALUES")
        .map(|values| {
            find_children(values, "ENUM-VALUE-REF")
                .map(get_text)
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Populate `table` with every definition under a `SPEC-ATTRIBUTES` node.
///
/// A failing child aborts only that definition; its error is collected
/// and parsing continues, so the caller can choose to skip or abort.
pub fn collect_definitions(
    node: Node<'_, '_>,
    datatypes: &DatatypeTable,
    table: &mut DefinitionTable,
) -> Vec<CodecError> {
    let mut errors = Vec::new();

    for child in element_children(node) {
        match parse_definition(child, datatypes) {
            Ok(definition) => {
                table.insert(definition);
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    tag = %get_tag_name(child),
                    "Skipping malformed attribute definition"
                );
                errors.push(err);
            }
        }
    }

    errors
}
