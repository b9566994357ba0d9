//! Property-based tests for path resolution and fallback substitution

use proptest::prelude::*;
use serde_json::json;
use subrelay_core::{
    decode_value, map_field, resolve_path, Document, FieldMapping, FieldValue, RawFieldValue,
};

fn key_strategy() -> impl Strategy<Value = String> {
    // Dot-free keys; dots are path separators
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    #[test]
    fn resolved_text_values_pass_through_unchanged(
        key in key_strategy(),
        value in ".{0,24}",
        fallback in ".{0,8}",
    ) {
        let mut document = Document::new();
        document.insert(key.clone(), FieldValue::String(value.clone()));

        let mapping = FieldMapping::Text {
            source_path: key,
            target_name: "out".to_string(),
            fallback: Some(fallback),
        };
        prop_assert_eq!(map_field(&document, &mapping), FieldValue::String(value));
    }

    #[test]
    fn declared_fallbacks_substitute_exactly_when_absent(
        present in key_strategy(),
        missing in key_strategy(),
        fallback in ".{0,16}",
    ) {
        prop_assume!(present != missing);
        let mut document = Document::new();
        document.insert(present, FieldValue::Integer(1));

        let mapping = FieldMapping::Text {
            source_path: missing,
            target_name: "out".to_string(),
            fallback: Some(fallback.clone()),
        };
        prop_assert_eq!(map_field(&document, &mapping), FieldValue::String(fallback));
    }

    #[test]
    fn dot_paths_resolve_through_arbitrary_nesting(
        segments in prop::collection::vec(key_strategy(), 1..6),
        leaf in any::<i64>(),
    ) {
        // Build {s0: {s1: {... leaf}}} and resolve "s0.s1..." back to the leaf.
        let mut value = FieldValue::Integer(leaf);
        for segment in segments.iter().skip(1).rev() {
            let mut wrapper = std::collections::HashMap::new();
            wrapper.insert(segment.clone(), value);
            value = FieldValue::Map(wrapper);
        }
        let mut document = Document::new();
        document.insert(segments[0].clone(), value);

        let path = segments.join(".");
        prop_assert_eq!(resolve_path(&document, &path), Some(&FieldValue::Integer(leaf)));
    }

    #[test]
    fn empty_path_never_resolves(key in key_strategy(), n in any::<i64>()) {
        let mut document = Document::new();
        document.insert(key, FieldValue::Integer(n));
        prop_assert_eq!(resolve_path(&document, ""), None);
    }

    #[test]
    fn integer_wire_values_decode_to_numbers(n in any::<i64>()) {
        let raw: RawFieldValue =
            serde_json::from_value(json!({"integerValue": n.to_string()})).unwrap();
        prop_assert_eq!(decode_value(&raw), FieldValue::Integer(n));
    }

    #[test]
    fn array_wire_values_preserve_element_order(items in prop::collection::vec(any::<i64>(), 0..8)) {
        let values: Vec<_> = items
            .iter()
            .map(|n| json!({"integerValue": n.to_string()}))
            .collect();
        let raw: RawFieldValue =
            serde_json::from_value(json!({"arrayValue": {"values": values}})).unwrap();

        let expected = FieldValue::Array(items.into_iter().map(FieldValue::Integer).collect());
        prop_assert_eq!(decode_value(&raw), expected);
    }
}
