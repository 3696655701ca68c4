//! Repair totality: for any input value whatsoever, `repair` returns a
//! document that passes `validate` with zero violations.

use proptest::prelude::*;
use serde_json::{json, Value};

use popdoc_repair::{repair, EnforcedContext};
use popdoc_schema::{validate, Mode, PopupType};

fn ctx() -> EnforcedContext {
    EnforcedContext {
        brand_color: "#2563EB".to_string(),
        mode: Mode::Light,
        popup_type: PopupType::Modal,
    }
}

/// Arbitrary JSON values, including deeply nested junk.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 :/%#._-]{0,24}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::hash_map("[a-zA-Z]{1,12}", inner, 0..6).prop_map(|m| {
                Value::Object(m.into_iter().collect())
            }),
        ]
    })
}

/// Values that look like documents but have schema-shaped fields mangled.
fn arb_document_shaped() -> impl Strategy<Value = Value> {
    let element = prop_oneof![
        Just(json!({"type": "text"})),
        Just(json!({"type": "text", "id": "dup", "fontSize": -5, "fontWeight": 123})),
        Just(json!({"type": "image", "id": "dup", "source": {"kind": "url", "url": "nope"}})),
        Just(json!({"type": "image", "url": "https://ok.example/a.png"})),
        Just(json!({"type": "cta", "action": {"type": "url", "value": ""}})),
        Just(json!({"type": "cta", "actionType": "dismiss"})),
        Just(json!({"type": "sparkles"})),
        Just(json!(17)),
    ];

    (
        proptest::option::of(Just(json!("2.0"))),
        proptest::option::of(prop_oneof![
            Just(json!("modal")),
            Just(json!("toast")),
            Just(json!(9))
        ]),
        proptest::collection::vec(element, 0..8),
        any::<i64>(),
    )
        .prop_map(|(version, popup_type, elements, max_width)| {
            let mut doc = serde_json::Map::new();
            if let Some(v) = version {
                doc.insert("version".to_string(), v);
            }
            if let Some(p) = popup_type {
                doc.insert("popupType".to_string(), p);
            }
            doc.insert("elements".to_string(), Value::Array(elements));
            doc.insert("container".to_string(), json!({"maxWidth": max_width}));
            Value::Object(doc)
        })
}

proptest! {
    #[test]
    fn repair_of_arbitrary_json_validates(candidate in arb_json()) {
        let doc = repair(&candidate, &ctx());
        let encoded = serde_json::to_value(&doc).unwrap();
        prop_assert!(validate(&encoded).is_ok());
    }

    #[test]
    fn repair_of_document_shaped_junk_validates(candidate in arb_document_shaped()) {
        let doc = repair(&candidate, &ctx());
        let encoded = serde_json::to_value(&doc).unwrap();
        prop_assert!(validate(&encoded).is_ok());

        // Enforced context always wins
        prop_assert_eq!(doc.popup_type, PopupType::Modal);
        prop_assert_eq!(doc.theme.mode, Mode::Light);
    }

    #[test]
    fn repair_is_deterministic(candidate in arb_document_shaped()) {
        let first = repair(&candidate, &ctx());
        let second = repair(&candidate, &ctx());
        prop_assert_eq!(first, second);
    }
}
