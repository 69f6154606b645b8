//! Typed attribute codec for ReqIF requirements-interchange documents.
//!
//! ReqIF attaches typed attributes (STRING, INTEGER, REAL, BOOLEAN, DATE,
//! ENUMERATION, XHTML) to requirement objects and relations. This crate
//! converts the `ATTRIBUTE-DEFINITION-*` and `ATTRIBUTE-VALUE-*` XML
//! fragments into a unified in-memory model and resolves each definition's
//! optional `DEFAULT-VALUE`, tolerating the encoding divergence between
//! producing tools (`THE-VALUE` as child element vs as XML attribute).
//!
//! The crate owns no I/O and no document traversal: callers locate the
//! nodes (with `roxmltree`) and hand them in, in dependency order —
//! datatypes first, then definitions, then values.
//!
//! # Example
//!
//! ```
//! use reqif_codec::{parse_definition, DatatypeTable};
//! use roxmltree::Document;
//!
//! let datatypes_xml = r#"<DATATYPES>
//!     <DATATYPE-DEFINITION-REAL IDENTIFIER="dt-real"/>
//! </DATATYPES>"#;
//! let doc = Document::parse(datatypes_xml).unwrap();
//! let (datatypes, errors) = DatatypeTable::from_datatypes(doc.root_element());
//! assert!(errors.is_empty());
//!
//! let definition_xml = r#"<ATTRIBUTE-DEFINITION-REAL IDENTIFIER="ad-weight">
//!     <TYPE><DATATYPE-DEFINITION-REAL-REF>dt-real</DATATYPE-DEFINITION-REAL-REF></TYPE>
//!     <DEFAULT-VALUE><ATTRIBUTE-VALUE-REAL THE-VALUE="3.14"/></DEFAULT-VALUE>
//! </ATTRIBUTE-DEFINITION-REAL>"#;
//! let doc = Document::parse(definition_xml).unwrap();
//! let definition = parse_definition(doc.root_element(), &datatypes).unwrap();
//! assert_eq!(definition.default_value.unwrap().as_text(), Some("3.14"));
//! ```
//!
//! # Architecture
//!
//! - [`types`]: model types, kind→tag mapping, definition/datatype tables
//! - [`error`]: error types and Result alias
//! - [`xml`]: XML navigation helpers and markup serialization
//! - [`extract`]: the single `THE-VALUE` normalization point
//! - [`datatype`]: `DATATYPE-DEFINITION-*` parsing
//! - [`definition`]: `ATTRIBUTE-DEFINITION-*` parsing
//! - [`value`]: `ATTRIBUTE-VALUE-*` parsing for objects and relations
//! - [`preprocess`]: raw-text normalization of vendor quirks

pub mod datatype;
pub mod definition;
pub mod error;
pub mod extract;
pub mod preprocess;
pub mod types;
pub mod value;
pub mod xml;

// Re-export the main entry points
pub use datatype::parse_datatype;
pub use definition::{collect_definitions, parse_definition};
pub use value::{
    parse_spec_object_values, parse_spec_relation_values, parse_value, parse_values,
    MissingValuePolicy, ParsedValues, ValueContext,
};

// Re-export commonly used items
pub use error::{CodecError, Result};
pub use extract::{extract_the_value, RawValue};
pub use preprocess::normalize_reqif;
pub use types::{
    AttributeDefinition, AttributeKind, AttributePayload, AttributeValue, DatatypeDefinition,
    DatatypeTable, DefinitionTable, EnumValue,
};
