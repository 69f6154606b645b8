//! `ATTRIBUTE-VALUE-*` parsing for spec objects and spec relations.
//!
//! One dispatch table serves both contexts. The context parameter only
//! feeds log and error strings; it never restricts the supported kind
//! set, so a relation carries BOOLEAN, DATE, and REAL values exactly like
//! an object does.

use roxmltree::Node;

use crate::datatype::parent_context;
use crate::definition::enum_value_refs;
use crate::error::{CodecError, Result};
use crate::extract::{extract_the_value, THE_VALUE};
use crate::types::{AttributeKind, AttributePayload, AttributeValue, DefinitionTable};
use crate::xml::{element_children, find_child, get_tag_name, get_text};

/// What to do when a required scalar or XHTML payload is absent on an
/// actual (non-default) value.
///
/// Vendor files omit `THE-VALUE` for legitimately empty fields, so the
/// convenience wrappers default to [`MissingValuePolicy::EmptyString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingValuePolicy {
    /// Substitute an empty payload and keep the value.
    #[default]
    EmptyString,
    /// Record the error, drop the value, keep parsing the list.
    Skip,
    /// Record the error and stop parsing the list.
    Abort,
}

/// The element a value list belongs to. Affects diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueContext {
    /// Values inside a `SPEC-OBJECT`.
    SpecObject,
    /// Values inside a `SPEC-RELATION`.
    SpecRelation,
}

impl ValueContext {
    /// Name of the enclosing element, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpecObject => "SPEC-OBJECT",
            Self::SpecRelation => "SPEC-RELATION",
        }
    }
}

/// Partial result of parsing one `VALUES` list.
///
/// One malformed value never discards the rest of the list (unless the
/// caller asked for [`MissingValuePolicy::Abort`]); every failure is
/// reported, none is swallowed.
#[derive(Debug, Default)]
pub struct ParsedValues {
    /// Successfully parsed values, in document order.
    pub values: Vec<AttributeValue>,
    /// Per-element errors, in document order.
    pub errors: Vec<CodecError>,
}

impl ParsedValues {
    /// Whether every child element parsed cleanly.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a `VALUES` list inside a `SPEC-OBJECT`.
#[must_use]
pub fn parse_spec_object_values(
    list_node: Node<'_, '_>,
    definitions: &DefinitionTable,
) -> ParsedValues {
    parse_values(
        list_node,
        definitions,
        ValueContext::SpecObject,
        MissingValuePolicy::default(),
    )
}

/// Parse a `VALUES` list inside a `SPEC-RELATION`.
#[must_use]
pub fn parse_spec_relation_values(
    list_node: Node<'_, '_>,
    definitions: &DefinitionTable,
) -> ParsedValues {
    parse_values(
        list_node,
        definitions,
        ValueContext::SpecRelation,
        MissingValuePolicy::default(),
    )
}

/// Parse the child value elements of a `VALUES` list.
///
/// The definition table must be fully populated before this runs; there
/// is no forward-reference retry.
#[must_use]
pub fn parse_values(
    list_node: Node<'_, '_>,
    definitions: &DefinitionTable,
    context: ValueContext,
    policy: MissingValuePolicy,
) -> ParsedValues {
    let mut result = ParsedValues::default();

    for child in element_children(list_node) {
        match parse_value(child, definitions, context, policy) {
            Ok(value) => result.values.push(value),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    tag = %get_tag_name(child),
                    context = context.as_str(),
                    "Failed to parse attribute value"
                );
                result.errors.push(err);
                if policy == MissingValuePolicy::Abort {
                    break;
                }
            }
        }
    }

    result
}

/// Parse a single `ATTRIBUTE-VALUE-*` element against the definition
/// table.
pub fn parse_value(
    node: Node<'_, '_>,
    definitions: &DefinitionTable,
    context: ValueContext,
    policy: MissingValuePolicy,
) -> Result<AttributeValue> {
    let tag = get_tag_name(node);
    let kind = AttributeKind::from_value_tag(tag).ok_or_else(|| {
        CodecError::UnsupportedAttributeKind {
            tag_name: tag.to_string(),
            context: Some(context.as_str().to_string()),
        }
    })?;

    let definition_ref = read_definition_ref(node, kind)?;
    let definition = definitions.get(&definition_ref).ok_or_else(|| {
        CodecError::DanglingDefinitionRef {
            definition: definition_ref.clone(),
            context: Some(context.as_str().to_string()),
        }
    })?;
    if definition.kind != kind {
        return Err(CodecError::MalformedValue {
            context: format!("<{tag}> in {}", context.as_str()),
            reason: format!(
                "definition '{}' has kind {}, value element has kind {kind}",
                definition.identifier, definition.kind
            ),
        });
    }

    let payload = match kind {
        AttributeKind::Enumeration => AttributePayload::Enumeration(enum_value_refs(node)),
        _ => {
            let text = match extract_the_value(node, kind).into_text() {
                Some(text) => text,
                None => match policy {
                    MissingValuePolicy::EmptyString => String::new(),
                    MissingValuePolicy::Skip | MissingValuePolicy::Abort => {
                        return Err(CodecError::MalformedValue {
                            context: format!("<{tag}> in {}", context.as_str()),
                            reason: format!("required {THE_VALUE} is missing"),
                        })
                    }
                },
            };
            // from_text only refuses Enumeration, which is dispatched above
            AttributePayload::from_text(kind, text).ok_or_else(|| CodecError::MalformedValue {
                context: format!("<{tag}> in {}", context.as_str()),
                reason: format!("{kind} payload is not textual"),
            })?
        }
    };

    Ok(AttributeValue {
        definition_ref,
        kind,
        payload,
    })
}

/// Read the nested `DEFINITION`/`ATTRIBUTE-DEFINITION-<KIND>-REF` id.
fn read_definition_ref(node: Node<'_, '_>, kind: AttributeKind) -> Result<String> {
    let tag = get_tag_name(node);
    let definition_node =
        find_child(node, "DEFINITION").ok_or_else(|| CodecError::MissingElement {
            element: "DEFINITION".to_string(),
            context: format!("<{tag}>"),
        })?;

    let ref_node = find_child(definition_node, kind.definition_ref_tag()).ok_or_else(|| {
        CodecError::MissingElement {
            element: kind.definition_ref_tag().to_string(),
            context: format!("<{tag}>"),
        }
    })?;

    let id = get_text(ref_node);
    if id.is_empty() {
        return Err(CodecError::DanglingDefinitionRef {
            definition: id,
            context: parent_context(node).or_else(|| Some(format!("<{tag}>"))),
        });
    }
    Ok(id)
}
