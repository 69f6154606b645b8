//! Error types for the codec.
//!
//! One library-facing error enum with detailed context, plus a `Result`
//! alias. Legal absence (no DEFAULT-VALUE, no THE-VALUE on an optional
//! field) is never represented as an error.

use thiserror::Error;

/// Main error type for the codec library.
#[derive(Debug, Error)]
pub enum CodecError {
    /// XML parsing failed.
    ///
    /// The codec itself never builds a DOM; document parsing belongs to
    /// the caller. The `From` conversion lets callers fold a
    /// `roxmltree::Document::parse` failure into this error type with `?`
    /// when a whole load-normalize-parse pipeline returns [`Result`].
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element or attribute.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// A required payload is structurally absent or inconsistent.
    #[error("Malformed attribute value in {context}: {reason}")]
    MalformedValue { context: String, reason: String },

    /// DEFAULT-VALUE is present but its kind-matched value child is missing.
    #[error("DEFAULT-VALUE of definition '{definition}' must contain a single <{expected_tag}> child")]
    MalformedDefaultValue {
        definition: String,
        expected_tag: &'static str,
    },

    /// A definition's datatype reference does not resolve.
    #[error("Definition '{definition}' references unresolved datatype '{datatype}'")]
    UnresolvedDatatype {
        definition: String,
        datatype: String,
    },

    /// A value references a definition that is not in the definition table.
    #[error("Attribute value references unknown definition '{definition}'{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    DanglingDefinitionRef {
        definition: String,
        context: Option<String>,
    },

    /// Unrecognized attribute element tag.
    #[error("No parser for attribute element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnsupportedAttributeKind {
        tag_name: String,
        context: Option<String>,
    },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
