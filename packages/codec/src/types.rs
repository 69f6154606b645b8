//! Core data types for the codec.
//!
//! The model mirrors the ReqIF attribute schema: typed attribute
//! definitions owned by a document-wide table, and attribute values that
//! reference their definition by identifier. All tag names for a kind come
//! from the single mapping on [`AttributeKind`], so the definition parser
//! and the value parser can never disagree about which tag belongs to
//! which kind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The seven attribute kinds of the ReqIF attribute schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    /// Plain string attribute.
    String,
    /// Integer attribute (payload stays canonical text).
    Integer,
    /// Real attribute (payload stays canonical text).
    Real,
    /// Boolean attribute (payload stays canonical text).
    Boolean,
    /// Date attribute (payload stays canonical text).
    Date,
    /// Enumeration attribute (ordered enum-value references).
    Enumeration,
    /// XHTML attribute (namespace-qualified markup fragment).
    Xhtml,
}

/// All kinds, in schema order.
pub const ALL_KINDS: [AttributeKind; 7] = [
    AttributeKind::String,
    AttributeKind::Integer,
    AttributeKind::Real,
    AttributeKind::Boolean,
    AttributeKind::Date,
    AttributeKind::Enumeration,
    AttributeKind::Xhtml,
];

impl AttributeKind {
    /// Get the tag suffix for this kind (e.g., "STRING", "XHTML").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Enumeration => "ENUMERATION",
            Self::Xhtml => "XHTML",
        }
    }

    /// Parse a kind from a tag suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "STRING" => Some(Self::String),
            "INTEGER" => Some(Self::Integer),
            "REAL" => Some(Self::Real),
            "BOOLEAN" => Some(Self::Boolean),
            "DATE" => Some(Self::Date),
            "ENUMERATION" => Some(Self::Enumeration),
            "XHTML" => Some(Self::Xhtml),
            _ => None,
        }
    }

    /// Parse a kind from an `ATTRIBUTE-DEFINITION-*` tag.
    #[must_use]
    pub fn from_definition_tag(tag: &str) -> Option<Self> {
        tag.strip_prefix("ATTRIBUTE-DEFINITION-")
            .and_then(Self::from_suffix)
    }

    /// Parse a kind from an `ATTRIBUTE-VALUE-*` tag.
    #[must_use]
    pub fn from_value_tag(tag: &str) -> Option<Self> {
        tag.strip_prefix("ATTRIBUTE-VALUE-")
            .and_then(Self::from_suffix)
    }

    /// Parse a kind from a `DATATYPE-DEFINITION-*` tag.
    ///
    /// Rejects `*-REF` tags so a reference element is never mistaken for a
    /// declaration.
    #[must_use]
    pub fn from_datatype_tag(tag: &str) -> Option<Self> {
        if tag.ends_with("-REF") {
            return None;
        }
        tag.strip_prefix("DATATYPE-DEFINITION-")
            .and_then(Self::from_suffix)
    }

    /// The `ATTRIBUTE-DEFINITION-<KIND>` tag for this kind.
    #[must_use]
    pub fn definition_tag(&self) -> &'static str {
        match self {
            Self::String => "ATTRIBUTE-DEFINITION-STRING",
            Self::Integer => "ATTRIBUTE-DEFINITION-INTEGER",
            Self::Real => "ATTRIBUTE-DEFINITION-REAL",
            Self::Boolean => "ATTRIBUTE-DEFINITION-BOOLEAN",
            Self::Date => "ATTRIBUTE-DEFINITION-DATE",
            Self::Enumeration => "ATTRIBUTE-DEFINITION-ENUMERATION",
            Self::Xhtml => "ATTRIBUTE-DEFINITION-XHTML",
        }
    }

    /// The `ATTRIBUTE-VALUE-<KIND>` tag for this kind.
    ///
    /// This is the *only* legal shape for a DEFAULT-VALUE child of a
    /// definition of this kind.
    #[must_use]
    pub fn value_tag(&self) -> &'static str {
        match self {
            Self::String => "ATTRIBUTE-VALUE-STRING",
            Self::Integer => "ATTRIBUTE-VALUE-INTEGER",
            Self::Real => "ATTRIBUTE-VALUE-REAL",
            Self::Boolean => "ATTRIBUTE-VALUE-BOOLEAN",
            Self::Date => "ATTRIBUTE-VALUE-DATE",
            Self::Enumeration => "ATTRIBUTE-VALUE-ENUMERATION",
            Self::Xhtml => "ATTRIBUTE-VALUE-XHTML",
        }
    }

    /// The `DATATYPE-DEFINITION-<KIND>-REF` tag nested under `TYPE`.
    #[must_use]
    pub fn datatype_ref_tag(&self) -> &'static str {
        match self {
            Self::String => "DATATYPE-DEFINITION-STRING-REF",
            Self::Integer => "DATATYPE-DEFINITION-INTEGER-REF",
            Self::Real => "DATATYPE-DEFINITION-REAL-REF",
            Self::Boolean => "DATATYPE-DEFINITION-BOOLEAN-REF",
            Self::Date => "DATATYPE-DEFINITION-DATE-REF",
            Self::Enumeration => "DATATYPE-DEFINITION-ENUMERATION-REF",
            Self::Xhtml => "DATATYPE-DEFINITION-XHTML-REF",
        }
    }

    /// The `ATTRIBUTE-DEFINITION-<KIND>-REF` tag nested under `DEFINITION`.
    #[must_use]
    pub fn definition_ref_tag(&self) -> &'static str {
        match self {
            Self::String => "ATTRIBUTE-DEFINITION-STRING-REF",
            Self::Integer => "ATTRIBUTE-DEFINITION-INTEGER-REF",
            Self::Real => "ATTRIBUTE-DEFINITION-REAL-REF",
            Self::Boolean => "ATTRIBUTE-DEFINITION-BOOLEAN-REF",
            Self::Date => "ATTRIBUTE-DEFINITION-DATE-REF",
            Self::Enumeration => "ATTRIBUTE-DEFINITION-ENUMERATION-REF",
            Self::Xhtml => "ATTRIBUTE-DEFINITION-XHTML-REF",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tagged attribute payload.
///
/// Scalar kinds keep their canonical textual form; no numeric or date
/// parsing happens at the codec boundary, so locale and format ambiguity
/// stays with downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributePayload {
    /// STRING payload.
    String(String),
    /// INTEGER payload, canonical text.
    Integer(String),
    /// REAL payload, canonical text.
    Real(String),
    /// BOOLEAN payload, canonical text.
    Boolean(String),
    /// DATE payload, canonical text.
    Date(String),
    /// ENUMERATION payload: enum-value identifiers in document order.
    Enumeration(Vec<String>),
    /// XHTML payload: serialized namespace-qualified inner markup.
    Xhtml(String),
}

impl AttributePayload {
    /// The kind this payload is tagged with.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::String(_) => AttributeKind::String,
            Self::Integer(_) => AttributeKind::Integer,
            Self::Real(_) => AttributeKind::Real,
            Self::Boolean(_) => AttributeKind::Boolean,
            Self::Date(_) => AttributeKind::Date,
            Self::Enumeration(_) => AttributeKind::Enumeration,
            Self::Xhtml(_) => AttributeKind::Xhtml,
        }
    }

    /// Build a textual payload for a non-enumeration kind.
    ///
    /// Returns `None` for [`AttributeKind::Enumeration`], whose payload is
    /// a reference list, not text.
    #[must_use]
    pub fn from_text(kind: AttributeKind, text: String) -> Option<Self> {
        match kind {
            AttributeKind::String => Some(Self::String(text)),
            AttributeKind::Integer => Some(Self::Integer(text)),
            AttributeKind::Real => Some(Self::Real(text)),
            AttributeKind::Boolean => Some(Self::Boolean(text)),
            AttributeKind::Date => Some(Self::Date(text)),
            AttributeKind::Xhtml => Some(Self::Xhtml(text)),
            AttributeKind::Enumeration => None,
        }
    }

    /// Get the textual payload, if this is a textual kind.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s)
            | Self::Integer(s)
            | Self::Real(s)
            | Self::Boolean(s)
            | Self::Date(s)
            | Self::Xhtml(s) => Some(s),
            Self::Enumeration(_) => None,
        }
    }

    /// Get the enum-value references, if this is an ENUMERATION payload.
    #[must_use]
    pub fn as_refs(&self) -> Option<&[String]> {
        match self {
            Self::Enumeration(refs) => Some(refs),
            _ => None,
        }
    }
}

/// A typed attribute definition.
///
/// Immutable after construction; owned by the document's
/// [`DefinitionTable`] and referenced by identifier from every
/// [`AttributeValue`] that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Stable identifier of the definition.
    pub identifier: String,
    /// Human-readable name, if declared.
    pub long_name: Option<String>,
    /// The definition's kind.
    pub kind: AttributeKind,
    /// Identifier of the referenced datatype declaration.
    pub datatype_ref: String,
    /// Permitted enum-value identifiers in datatype order.
    ///
    /// Empty for every kind except ENUMERATION.
    pub permitted_values: Vec<String>,
    /// Optional default value, always of the definition's own kind.
    pub default_value: Option<AttributePayload>,
}

/// A concrete attribute value attached to a spec object or spec relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Identifier of the owning definition (lookup, not ownership).
    pub definition_ref: String,
    /// Kind, mirroring the definition's.
    pub kind: AttributeKind,
    /// The kind-tagged payload.
    pub payload: AttributePayload,
}

/// One permitted value of an enumeration datatype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Stable identifier, referenced by ENUMERATION payloads.
    pub identifier: String,
    /// Human-readable name, if declared.
    pub long_name: Option<String>,
    /// Embedded numeric key, if declared.
    pub key: Option<String>,
}

/// A datatype declaration referenced by attribute definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatypeDefinition {
    /// Stable identifier.
    pub identifier: String,
    /// Human-readable name, if declared.
    pub long_name: Option<String>,
    /// The datatype's kind.
    pub kind: AttributeKind,
    /// Permitted values in document order (ENUMERATION only).
    pub specified_values: Vec<EnumValue>,
}

/// Document-wide table of datatype declarations, keyed by identifier.
///
/// Must be fully populated before attribute definitions are parsed.
#[derive(Debug, Clone, Default)]
pub struct DatatypeTable {
    datatypes: HashMap<String, DatatypeDefinition>,
}

impl DatatypeTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a datatype, returning the previous entry with the same id.
    pub fn insert(&mut self, datatype: DatatypeDefinition) -> Option<DatatypeDefinition> {
        self.datatypes.insert(datatype.identifier.clone(), datatype)
    }

    /// Look up a datatype by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&DatatypeDefinition> {
        self.datatypes.get(identifier)
    }

    /// Number of datatypes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.datatypes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datatypes.is_empty()
    }
}

/// Document-wide table of attribute definitions, keyed by identifier.
///
/// Population is a barrier: the table must be complete and treated as
/// read-only before any value parsing starts, because values reference
/// definitions by id and there is no forward-reference retry.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: HashMap<String, AttributeDefinition>,
}

impl DefinitionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, returning the previous entry with the same id.
    pub fn insert(&mut self, definition: AttributeDefinition) -> Option<AttributeDefinition> {
        self.definitions
            .insert(definition.identifier.clone(), definition)
    }

    /// Look up a definition by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(identifier)
    }

    /// Number of definitions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over the definitions in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.values()
    }
}
