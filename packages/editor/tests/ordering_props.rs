//! Property tests for the ordering invariants: after any sequence of
//! append/move/duplicate/delete operations, `order` values are unique and
//! strictly ascending, and reindexing a dense sequence changes nothing.

use proptest::prelude::*;

use popdoc_editor::{ordering, Mutation, Session};
use popdoc_schema::{Element, ElementType, Mode, PopupDocument, PopupType};

#[derive(Debug, Clone)]
enum Op {
    Append(ElementType),
    Move { pick: usize, index: usize },
    Duplicate { pick: usize },
    Delete { pick: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop_oneof![
            Just(ElementType::Text),
            Just(ElementType::Image),
            Just(ElementType::Cta),
        ]
        .prop_map(Op::Append),
        (any::<usize>(), any::<usize>()).prop_map(|(pick, index)| Op::Move {
            pick,
            index: index % 16,
        }),
        any::<usize>().prop_map(|pick| Op::Duplicate { pick }),
        any::<usize>().prop_map(|pick| Op::Delete { pick }),
    ]
}

fn nth_id(doc: &PopupDocument, pick: usize) -> Option<String> {
    if doc.elements.is_empty() {
        // Exercise the unknown-id no-op path instead
        return Some("ghost".to_string());
    }
    doc.elements
        .get(pick % doc.elements.len())
        .map(|e| e.id.clone())
}

fn assert_dense_and_unique(doc: &PopupDocument) {
    let orders: Vec<i64> = doc.elements.iter().map(|e| e.order).collect();
    assert!(
        orders.windows(2).all(|w| w[0] < w[1]),
        "orders not strictly ascending: {orders:?}"
    );

    let mut ids: Vec<&str> = doc.elements.iter().map(|e| e.id.as_str()).collect();
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count, "duplicate element ids");
}

proptest! {
    #[test]
    fn orders_stay_unique_and_ascending(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut session = Session::new(PopupDocument::empty(
            PopupType::Modal,
            Mode::Light,
            "#2563EB",
        ));

        for op in ops {
            let mutation = match op {
                Op::Append(element_type) => Mutation::AppendElement { element_type },
                Op::Move { pick, index } => {
                    let Some(element_id) = nth_id(session.document(), pick) else { continue };
                    Mutation::MoveElement { element_id, index }
                }
                Op::Duplicate { pick } => {
                    let Some(element_id) = nth_id(session.document(), pick) else { continue };
                    Mutation::DuplicateElement { element_id }
                }
                Op::Delete { pick } => {
                    let Some(element_id) = nth_id(session.document(), pick) else { continue };
                    Mutation::RemoveElement { element_id }
                }
            };

            session.apply(mutation).unwrap();
            assert_dense_and_unique(session.document());
        }
    }

    #[test]
    fn reindex_is_idempotent(orders in proptest::collection::vec(-1000i64..1000, 0..16)) {
        let mut elements: Vec<Element> = orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let mut e = Element::new_text(format!("e-{i}"));
                e.order = *order;
                e
            })
            .collect();

        ordering::reindex(&mut elements);
        let once = elements.clone();
        ordering::reindex(&mut elements);
        assert_eq!(elements, once);
        assert!(ordering::is_dense(&elements));
    }

    #[test]
    fn reindex_preserves_relative_position_on_ties(count in 0usize..12) {
        let mut elements: Vec<Element> = (0..count)
            .map(|i| {
                let mut e = Element::new_text(format!("e-{i}"));
                e.order = 5; // all tied
                e
            })
            .collect();

        ordering::reindex(&mut elements);

        let ids: Vec<String> = elements.iter().map(|e| e.id.clone()).collect();
        let expected: Vec<String> = (0..count).map(|i| format!("e-{i}")).collect();
        assert_eq!(ids, expected);
    }
}
