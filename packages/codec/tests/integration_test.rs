//! End-to-end tests over realistic ReqIF documents.
//!
//! Exercises the full dependency order on fixture files: datatype table,
//! definition table (a barrier before value parsing), then spec-object and
//! spec-relation value lists.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use roxmltree::Document;

use reqif_codec::xml::{element_children, find_by_path, find_child, find_children};
use reqif_codec::{
    collect_definitions, normalize_reqif, parse_spec_object_values, parse_spec_relation_values,
    AttributeKind, AttributePayload, DatatypeTable, DefinitionTable, ParsedValues,
};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Parsed tables plus the value lists of every object and relation.
struct ParsedDocument {
    definitions: DefinitionTable,
    object_values: Vec<ParsedValues>,
    relation_values: Vec<ParsedValues>,
}

/// Run the codec over a parsed document in dependency order.
fn parse_document(doc: &Document<'_>) -> ParsedDocument {
    let content = find_by_path(doc.root_element(), "CORE-CONTENT/REQ-IF-CONTENT")
        .expect("REQ-IF-CONTENT missing");

    let datatypes_node = find_child(content, "DATATYPES").expect("DATATYPES missing");
    let (datatypes, datatype_errors) = DatatypeTable::from_datatypes(datatypes_node);
    assert!(datatype_errors.is_empty(), "{datatype_errors:?}");

    // Definition table population completes before any value parsing.
    let mut definitions = DefinitionTable::new();
    let spec_types = find_child(content, "SPEC-TYPES").expect("SPEC-TYPES missing");
    for spec_type in element_children(spec_types) {
        if let Some(attributes) = find_child(spec_type, "SPEC-ATTRIBUTES") {
            let errors = collect_definitions(attributes, &datatypes, &mut definitions);
            assert!(errors.is_empty(), "{errors:?}");
        }
    }

    let object_values = find_child(content, "SPEC-OBJECTS")
        .map(|objects| {
            find_children(objects, "SPEC-OBJECT")
                .filter_map(|object| find_child(object, "VALUES"))
                .map(|values| parse_spec_object_values(values, &definitions))
                .collect()
        })
        .unwrap_or_default();

    let relation_values = find_child(content, "SPEC-RELATIONS")
        .map(|relations| {
            find_children(relations, "SPEC-RELATION")
                .filter_map(|relation| find_child(relation, "VALUES"))
                .map(|values| parse_spec_relation_values(values, &definitions))
                .collect()
        })
        .unwrap_or_default();

    ParsedDocument {
        definitions,
        object_values,
        relation_values,
    }
}

#[test]
fn test_definition_table_covers_object_and_relation_types() {
    let xml = load_fixture("sample.reqif");
    let doc = Document::parse(&xml).unwrap();
    let parsed = parse_document(&doc);

    // 7 on the object type + 3 on the relation type
    assert_eq!(parsed.definitions.len(), 10);
    for kind in reqif_codec::types::ALL_KINDS {
        assert!(
            parsed.definitions.iter().any(|d| d.kind == kind),
            "no definition of kind {kind}"
        );
    }
}

#[test]
fn test_default_values_resolve_per_kind() {
    let xml = load_fixture("sample.reqif");
    let doc = Document::parse(&xml).unwrap();
    let parsed = parse_document(&doc);

    let weight = parsed.definitions.get("ad-weight").unwrap();
    assert_eq!(
        weight.default_value,
        Some(AttributePayload::Real("3.14".to_string()))
    );

    let count = parsed.definitions.get("ad-count").unwrap();
    assert_eq!(
        count.default_value,
        Some(AttributePayload::Integer("42".to_string()))
    );

    let priority = parsed.definitions.get("ad-priority").unwrap();
    assert_eq!(
        priority.default_value,
        Some(AttributePayload::Enumeration(vec!["ev-medium".to_string()]))
    );
    assert_eq!(
        priority.permitted_values,
        vec![
            "ev-high".to_string(),
            "ev-medium".to_string(),
            "ev-low".to_string()
        ]
    );

    // Empty XHTML default wrapper is a legal absence, not an error.
    let description = parsed.definitions.get("ad-description").unwrap();
    assert_eq!(description.default_value, None);

    let title = parsed.definitions.get("ad-title").unwrap();
    assert_eq!(title.default_value, None);
}

#[test]
fn test_spec_object_values_cover_all_kinds_and_both_shapes() {
    let xml = load_fixture("sample.reqif");
    let doc = Document::parse(&xml).unwrap();
    let parsed = parse_document(&doc);

    assert_eq!(parsed.object_values.len(), 1);
    let values = &parsed.object_values[0];
    assert!(values.is_complete(), "{:?}", values.errors);
    assert_eq!(values.values.len(), 7);

    let by_ref = |id: &str| {
        values
            .values
            .iter()
            .find(|v| v.definition_ref == id)
            .unwrap_or_else(|| panic!("no value for {id}"))
    };

    // THE-VALUE as attribute
    assert_eq!(
        by_ref("ad-title").payload,
        AttributePayload::String("The system shall log in users".to_string())
    );
    // THE-VALUE as child element
    assert_eq!(
        by_ref("ad-count").payload,
        AttributePayload::Integer("7".to_string())
    );
    assert_eq!(
        by_ref("ad-created").payload,
        AttributePayload::Date("2024-03-18T10:30:00+01:00".to_string())
    );
    // Document order preserved
    assert_eq!(
        by_ref("ad-priority").payload,
        AttributePayload::Enumeration(vec![
            "ev-low".to_string(),
            "ev-high".to_string(),
            "ev-medium".to_string()
        ])
    );
    // Namespace-qualified inner markup, wrapper excluded
    assert_eq!(
        by_ref("ad-description").payload,
        AttributePayload::Xhtml(
            "<xhtml:div>Login shall use <xhtml:b>two-factor</xhtml:b> authentication.</xhtml:div>"
                .to_string()
        )
    );
}

#[test]
fn test_relation_values_support_boolean_date_real() {
    let xml = load_fixture("sample.reqif");
    let doc = Document::parse(&xml).unwrap();
    let parsed = parse_document(&doc);

    assert_eq!(parsed.relation_values.len(), 1);
    let values = &parsed.relation_values[0];
    assert!(values.is_complete(), "{:?}", values.errors);

    let kinds: Vec<AttributeKind> = values.values.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AttributeKind::Boolean,
            AttributeKind::Date,
            AttributeKind::Real
        ]
    );
    assert_eq!(
        values.values[2].payload,
        AttributePayload::Real("0.85".to_string())
    );
}

#[test]
fn test_parsing_is_idempotent() {
    let xml = load_fixture("sample.reqif");
    let doc = Document::parse(&xml).unwrap();

    let first = parse_document(&doc);
    let second = parse_document(&doc);

    assert_eq!(first.definitions.len(), second.definitions.len());
    for definition in first.definitions.iter() {
        assert_eq!(
            Some(definition),
            second.definitions.get(&definition.identifier)
        );
    }
    assert_eq!(first.object_values[0].values, second.object_values[0].values);
    assert_eq!(
        first.relation_values[0].values,
        second.relation_values[0].values
    );
}

#[test]
fn test_vendor_prefixed_export_parses_after_normalization() {
    let raw = load_fixture("vendor_prefixed.reqif");
    // The raw export has junk before the declaration and prefixed elements.
    assert!(Document::parse(&raw).is_err());

    let normalized = normalize_reqif(&raw);
    let doc = Document::parse(&normalized).unwrap();
    let parsed = parse_document(&doc);

    assert_eq!(parsed.definitions.len(), 2);
    assert_eq!(
        parsed.definitions.get("ad-effort").unwrap().default_value,
        Some(AttributePayload::Real("1.0".to_string()))
    );

    let values = &parsed.object_values[0];
    assert!(values.is_complete(), "{:?}", values.errors);
    assert_eq!(
        values.values[0].payload,
        AttributePayload::String("Exported requirement".to_string())
    );
    assert_eq!(
        values.values[1].payload,
        AttributePayload::Real("2.5".to_string())
    );
}
