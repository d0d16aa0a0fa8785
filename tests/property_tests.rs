//! Property-based tests for the parse/serialize round trip.
//!
//! Generated documents stay inside the re-parseable subset of the format:
//! non-negative numbers, non-empty strings without quotes or line breaks,
//! and bare-identifier names. Within that subset every document must
//! survive a full text round trip with order, kinds, values, and comments
//! intact, and serialization must be idempotent.

use proptest::prelude::*;
use scf::{Document, Scalar, ValueKind};
use std::collections::BTreeMap;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn comment() -> impl Strategy<Value = String> {
    // The reader strips the '#' and trims, so keep the edges tight and
    // the body free of newlines.
    "[a-zA-Z0-9][a-zA-Z0-9 _.]{0,30}[a-zA-Z0-9]"
}

fn scalar(kind: ValueKind) -> BoxedStrategy<Scalar> {
    match kind {
        ValueKind::Boolean => any::<bool>().prop_map(Scalar::Bool).boxed(),
        ValueKind::Integer => (0i64..=i64::MAX).prop_map(Scalar::Int).boxed(),
        ValueKind::Float => (0.001f64..1.0e12).prop_map(Scalar::Float).boxed(),
        ValueKind::String | ValueKind::List => "[a-zA-Z0-9 _.,;:!?-]{1,24}"
            .prop_map(Scalar::Str)
            .boxed(),
    }
}

fn scalar_kind() -> impl Strategy<Value = ValueKind> {
    prop_oneof![
        Just(ValueKind::Boolean),
        Just(ValueKind::Integer),
        Just(ValueKind::Float),
        Just(ValueKind::String),
    ]
}

#[derive(Debug, Clone)]
enum GenValue {
    Scalar(Scalar),
    List(ValueKind, Vec<Scalar>),
}

fn gen_value() -> impl Strategy<Value = GenValue> {
    scalar_kind().prop_flat_map(|kind| {
        prop_oneof![
            scalar(kind).prop_map(GenValue::Scalar),
            // Empty lists reparse with a String element kind, so keep
            // generated lists non-empty for model equality.
            prop::collection::vec(scalar(kind), 1..6)
                .prop_map(move |elements| GenValue::List(kind, elements)),
        ]
    })
}

fn gen_entry() -> impl Strategy<Value = (Vec<String>, GenValue)> {
    (prop::collection::vec(comment(), 0..3), gen_value())
}

type GenSections = BTreeMap<String, BTreeMap<String, (Vec<String>, GenValue)>>;

fn gen_document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(
        ident(),
        prop::collection::btree_map(ident(), gen_entry(), 0..5),
        0..4,
    )
    .prop_map(|sections: GenSections| {
        let mut doc = Document::new();
        for (name, entries) in sections {
            for (key, (comments, value)) in entries {
                let dotted = format!("{name}.{key}");
                let borrowed: Vec<&str> = comments.iter().map(String::as_str).collect();
                doc.set_comment(&dotted, &borrowed);
                match value {
                    GenValue::Scalar(scalar) => doc.set(&dotted, scalar).unwrap(),
                    GenValue::List(kind, elements) => {
                        doc.set_scalar_list(&dotted, kind, elements).unwrap()
                    }
                }
            }
        }
        doc
    })
}

proptest! {
    #[test]
    fn prop_text_round_trip(doc in gen_document()) {
        let text = scf::to_string(&doc);
        let reparsed = scf::from_str(&text).unwrap();
        prop_assert_eq!(scf::to_string(&reparsed), text);
    }

    #[test]
    fn prop_serialization_is_idempotent(doc in gen_document()) {
        prop_assert_eq!(scf::to_string(&doc), scf::to_string(&doc));
    }

    #[test]
    fn prop_reparsed_document_matches(doc in gen_document()) {
        let reparsed = scf::from_str(&scf::to_string(&doc)).unwrap();
        let names: Vec<_> = doc.sections().map(|(n, _)| n).collect();
        let reparsed_names: Vec<_> = reparsed.sections().map(|(n, _)| n).collect();
        prop_assert_eq!(names, reparsed_names);
        for (name, section) in doc.sections() {
            let other = reparsed.section(name).unwrap();
            for (key, entry) in section.entries() {
                let back = other.get(key).unwrap();
                prop_assert_eq!(entry.value(), back.value());
                prop_assert_eq!(entry.comments(), back.comments());
            }
        }
    }

    #[test]
    fn prop_known_literals_classify(n in 0i64..=i64::MAX, b in any::<bool>()) {
        let text = format!("[s]\ni = {n}\nb = {b}");
        let mut doc = scf::from_str(&text).unwrap();
        prop_assert_eq!(doc.get_or("s.i", 0i64, &[]).unwrap(), n);
        prop_assert_eq!(doc.get_or("s.b", !b, &[]).unwrap(), b);
    }
}
