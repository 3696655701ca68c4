//! Ordering engine.
//!
//! Maintains a dense, strictly ordered element sequence under insert,
//! move, duplicate and delete. The canonical reindexing rule: stable-sort
//! by current `order` (preserving prior relative position on ties), then
//! reassign `order := (position + 1) * ORDER_STEP`. The multiplier leaves
//! gaps for manual fine-tuning; it is a convention, not a correctness
//! requirement.
//!
//! Unknown ids and self-drops are no-ops, not errors.

use popdoc_schema::Element;

pub const ORDER_STEP: i64 = 10;

/// Stable-sort by current `order`, then reassign dense keys.
/// Reindexing an already dense, sorted sequence is a no-op.
pub fn reindex(elements: &mut [Element]) {
    elements.sort_by_key(|e| e.order);
    for (position, element) in elements.iter_mut().enumerate() {
        element.order = (position as i64 + 1) * ORDER_STEP;
    }
}

/// The order key a newly appended element receives.
pub fn append_order(elements: &[Element]) -> i64 {
    (elements.len() as i64 + 1) * ORDER_STEP
}

/// True when orders are exactly `(position + 1) * ORDER_STEP` in sequence.
pub fn is_dense(elements: &[Element]) -> bool {
    elements
        .iter()
        .enumerate()
        .all(|(position, e)| e.order == (position as i64 + 1) * ORDER_STEP)
}

/// Index of an element in the stored sequence.
pub fn position_of(elements: &[Element], id: &str) -> Option<usize> {
    elements.iter().position(|e| e.id == id)
}

/// Move an element to a target position in the render sequence, then
/// reindex the whole sequence so repeated moves can never produce
/// duplicate or out-of-range orders. Returns false for unknown ids.
pub fn move_to(elements: &mut Vec<Element>, id: &str, index: usize) -> bool {
    let Some(from) = position_of(elements, id) else {
        return false;
    };

    let to = index.min(elements.len().saturating_sub(1));
    if from != to {
        let moved = elements.remove(from);
        elements.insert(to, moved);
    }
    reindex(elements);
    true
}

/// Clone an element directly after its source with a fresh id and a
/// "(copy)" name suffix, then reindex. Returns false for unknown ids.
pub fn duplicate_after(elements: &mut Vec<Element>, id: &str, new_id: String) -> bool {
    let Some(position) = position_of(elements, id) else {
        return false;
    };

    let mut copy = elements[position].clone();
    copy.id = new_id;
    copy.name = format!("{} (copy)", copy.name);
    // Same order as the source; the stable sort keeps the copy behind it.
    elements.insert(position + 1, copy);
    reindex(elements);
    true
}

/// Remove an element by id, then reindex. Returns false for unknown ids.
pub fn remove(elements: &mut Vec<Element>, id: &str) -> bool {
    let Some(position) = position_of(elements, id) else {
        return false;
    };

    elements.remove(position);
    reindex(elements);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(ids_and_orders: &[(&str, i64)]) -> Vec<Element> {
        ids_and_orders
            .iter()
            .map(|(id, order)| {
                let mut e = Element::new_text(*id);
                e.order = *order;
                e
            })
            .collect()
    }

    fn ids(elements: &[Element]) -> Vec<&str> {
        elements.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn reindex_is_idempotent_on_dense_sequences() {
        let mut list = elements(&[("a", 10), ("b", 20), ("c", 30)]);
        let before = list.clone();
        reindex(&mut list);
        assert_eq!(list, before);
    }

    #[test]
    fn reindex_removes_ties_preserving_relative_position() {
        let mut list = elements(&[("a", 10), ("b", 10), ("c", 5)]);
        reindex(&mut list);
        assert_eq!(ids(&list), vec!["c", "a", "b"]);
        assert_eq!(
            list.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );
    }

    #[test]
    fn move_to_unknown_id_is_a_no_op() {
        let mut list = elements(&[("a", 10), ("b", 20)]);
        let before = list.clone();
        assert!(!move_to(&mut list, "ghost", 0));
        assert_eq!(list, before);
    }

    #[test]
    fn move_onto_self_keeps_sequence() {
        let mut list = elements(&[("a", 10), ("b", 20), ("c", 30)]);
        assert!(move_to(&mut list, "b", 1));
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
        assert!(is_dense(&list));
    }

    #[test]
    fn move_clamps_out_of_range_targets() {
        let mut list = elements(&[("a", 10), ("b", 20), ("c", 30)]);
        assert!(move_to(&mut list, "a", 99));
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
        assert!(is_dense(&list));
    }

    #[test]
    fn duplicate_places_copy_directly_after_source() {
        let mut list = elements(&[("a", 10), ("b", 20)]);
        assert!(duplicate_after(&mut list, "a", "a2".to_string()));
        assert_eq!(ids(&list), vec!["a", "a2", "b"]);
        assert_eq!(list[1].name, "Text (copy)");
        assert!(is_dense(&list));
    }

    #[test]
    fn remove_reindexes_remaining_elements() {
        let mut list = elements(&[("a", 10), ("b", 20), ("c", 30)]);
        assert!(remove(&mut list, "b"));
        assert_eq!(ids(&list), vec!["a", "c"]);
        assert!(is_dense(&list));
        assert!(!remove(&mut list, "b"));
    }
}
