use std::collections::BTreeMap;

use contact_index::{AsciiLowercase, Contact, ContactIndex, Order, UnicodeLowercase};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Builds an index from `(name, phone)` pairs, inserted in the order given.
fn index_of(pairs: &[(&str, &str)]) -> ContactIndex {
    pairs.iter().copied().collect()
}

fn names<'a>(contacts: impl Iterator<Item = &'a Contact>) -> Vec<&'a str> {
    contacts.map(Contact::name).collect()
}

fn scenario() -> ContactIndex {
    index_of(&[("Carlos", "1"), ("Ana", "2"), ("Beto", "3"), ("Diego", "4")])
}

// ─── Worked scenarios ────────────────────────────────────────────────────────

#[test]
fn reinsert_updates_phone_case_insensitively() {
    let index = index_of(&[("Ana", "111"), ("Beto", "222"), ("ana", "999")]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.search("ANA"), Some(&Contact::new("Ana", "999")));
    assert_eq!(index.search("beto").map(Contact::phone), Some("222"));
}

#[test]
fn in_order_is_sorted() {
    let index = scenario();
    assert_eq!(names(index.traverse(Order::InOrder)), ["Ana", "Beto", "Carlos", "Diego"]);
}

#[test]
fn delete_root_with_two_children() {
    let mut index = scenario();

    assert_eq!(index.delete("Carlos"), Some(Contact::new("Carlos", "1")));
    assert_eq!(names(index.iter()), ["Ana", "Beto", "Diego"]);
    assert_eq!(index.search("carlos"), None);

    // Diego, the right subtree's minimum, took the root position.
    assert_eq!(names(index.traverse(Order::PreOrder)), ["Diego", "Ana", "Beto"]);
}

#[test]
fn prefix_search_scenario() {
    let index = scenario();
    assert_eq!(names(index.prefix_search("d")), ["Diego"]);
    assert_eq!(names(index.prefix_search("")), ["Ana", "Beto", "Carlos", "Diego"]);
}

#[test]
fn delete_absent_is_noop() {
    let mut index = scenario();
    let before = index.render_structure();

    assert_eq!(index.delete("Zara"), None);
    assert_eq!(index.len(), 4);
    assert_eq!(index.render_structure(), before);
}

// ─── Insert / search / delete ───────────────────────────────────────────────

#[test]
fn update_keeps_position_and_spelling() {
    let mut index = scenario();
    let shape: Vec<String> = index.traverse(Order::PreOrder).map(|c| c.name().to_string()).collect();

    assert_eq!(index.insert(Contact::new("  BETO ", "333")), Some("3".to_string()));

    let after: Vec<String> = index.traverse(Order::PreOrder).map(|c| c.name().to_string()).collect();
    assert_eq!(after, shape);
    assert_eq!(index.search("beto"), Some(&Contact::new("Beto", "333")));
}

#[test]
fn empty_name_is_a_valid_key() {
    let mut index = ContactIndex::new();
    index.insert(Contact::new("   ", "000"));
    index.insert(Contact::new("Ana", "111"));

    assert_eq!(index.search("").map(Contact::phone), Some("000"));
    assert_eq!(names(index.iter()), ["", "Ana"]);
    assert_eq!(index.delete(""), Some(Contact::new("", "000")));
}

#[test]
fn delete_every_shape() {
    //         m
    //      /     \
    //     f       t
    //    / \     /
    //   c   h   p
    //        \    \
    //         k    r
    let mut index = index_of(&[
        ("m", "1"),
        ("f", "2"),
        ("t", "3"),
        ("c", "4"),
        ("h", "5"),
        ("p", "6"),
        ("k", "7"),
        ("r", "8"),
    ]);

    // Leaf.
    index.delete("c");
    assert_eq!(names(index.traverse(Order::PreOrder)), ["m", "f", "h", "k", "t", "p", "r"]);

    // Single right child splices up.
    index.delete("h");
    assert_eq!(names(index.traverse(Order::PreOrder)), ["m", "f", "k", "t", "p", "r"]);

    // Single left child splices up.
    index.delete("t");
    assert_eq!(names(index.traverse(Order::PreOrder)), ["m", "f", "k", "p", "r"]);

    // Two children: successor "p" moves into the root, its right child "r" moves up.
    index.delete("M");
    assert_eq!(names(index.traverse(Order::PreOrder)), ["p", "f", "k", "r"]);
    assert_eq!(names(index.iter()), ["f", "k", "p", "r"]);
}

#[test]
fn delete_until_empty() {
    let mut index = scenario();
    for name in ["diego", "ANA", "Carlos", "beto"] {
        assert!(index.delete(name).is_some(), "{name}");
    }
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
    assert_eq!(index.iter().count(), 0);
    assert_eq!(index.render_structure(), "<empty>");
}

#[test]
fn clear_then_reuse() {
    let mut index = scenario();
    index.clear();
    assert!(index.is_empty());

    index.insert(Contact::new("Zoe", "9"));
    assert_eq!(names(index.iter()), ["Zoe"]);
}

#[test]
fn load_counts_rows_not_keys() {
    let mut index = ContactIndex::new();
    let rows = index.load([Contact::new("a", "1"), Contact::new("A", "2"), Contact::new("b", "3")]);
    assert_eq!(rows, 3);
    assert_eq!(index.len(), 2);
}

// ─── Traversals ─────────────────────────────────────────────────────────────

#[test]
fn three_orders_on_a_known_shape() {
    //       d
    //     /   \
    //    b     f
    //   / \   /
    //  a   c e
    let index = index_of(&[("d", ""), ("b", ""), ("f", ""), ("a", ""), ("c", ""), ("e", "")]);

    assert_eq!(names(index.traverse(Order::InOrder)), ["a", "b", "c", "d", "e", "f"]);
    assert_eq!(names(index.traverse(Order::PreOrder)), ["d", "b", "a", "c", "f", "e"]);
    assert_eq!(names(index.traverse(Order::PostOrder)), ["a", "c", "b", "e", "f", "d"]);
    assert_eq!(index.height(), 3);
}

#[test]
fn traversal_reports_exact_length() {
    let index = scenario();
    for order in Order::ALL {
        let mut walk = index.traverse(order);
        assert_eq!(walk.order(), order);
        assert_eq!(walk.len(), 4);
        walk.next();
        walk.next();
        assert_eq!(walk.size_hint(), (2, Some(2)));
        assert_eq!(walk.clone().count(), 2);
        assert_eq!(walk.by_ref().count(), 2);
        assert_eq!(walk.next(), None);
    }
}

#[test]
fn to_vec_materializes_owned_contacts() {
    let index = scenario();
    let rows = index.to_vec(Order::PostOrder);
    assert_eq!(
        rows,
        [Contact::new("Beto", "3"), Contact::new("Ana", "2"), Contact::new("Diego", "4"), Contact::new("Carlos", "1")]
    );
}

#[test]
fn into_iterator_is_in_order() {
    let index = scenario();
    let mut seen = Vec::new();
    for contact in &index {
        seen.push(contact.name());
    }
    assert_eq!(seen, ["Ana", "Beto", "Carlos", "Diego"]);
    assert_eq!(format!("{index:?}").matches("Contact").count(), 4);
}

// ─── Prefix search ──────────────────────────────────────────────────────────

#[test]
fn prefix_search_ignores_case_and_stays_sorted() {
    let index = index_of(&[
        ("Marta", "1"),
        ("mario", "2"),
        ("Ana", "3"),
        ("MARCO", "4"),
        ("Mar", "5"),
        ("Maria", "6"),
        ("Zoe", "7"),
        ("Ma", "8"),
    ]);

    assert_eq!(names(index.prefix_search("MAR")), ["Mar", "MARCO", "Maria", "mario", "Marta"]);
    assert_eq!(names(index.prefix_search("mari")), ["Maria", "mario"]);
    assert_eq!(names(index.prefix_search("marta")), ["Marta"]);
    assert_eq!(names(index.prefix_search("martas")), Vec::<&str>::new());
    assert_eq!(names(index.prefix_search("b")), Vec::<&str>::new());
}

#[test]
fn prefix_search_descends_below_non_matching_nodes() {
    // Root "b" sits above the prefix "a"; the matches all hang to its left,
    // partly under the right child "ab" of "a".
    let index = index_of(&[("b", ""), ("a", ""), ("ab", ""), ("aa", ""), ("c", "")]);
    assert_eq!(names(index.prefix_search("a")), ["a", "aa", "ab"]);
    assert_eq!(names(index.prefix_search("ab")), ["ab"]);
}

#[test]
fn prefix_search_with_unicode_folding() {
    let index = index_of(&[("Élodie", "1"), ("élise", "2"), ("Emma", "3")]);
    assert_eq!(names(index.prefix_search("ÉL")), ["élise", "Élodie"]);

    let mut ascii = ContactIndex::with_folding(AsciiLowercase);
    ascii.extend([("Élodie", "1"), ("élise", "2"), ("Emma", "3")]);
    assert_eq!(names(ascii.prefix_search("él")), ["élise"]);
    assert_eq!(names(ascii.prefix_search("e")), ["Emma"]);
}

// ─── Structure rendering ────────────────────────────────────────────────────

#[test]
fn structure_marks_empty_children() {
    let index = scenario();
    let expected = "\
Carlos (1)
    Ana (2)
        <empty>
        Beto (3)
            <empty>
            <empty>
    Diego (4)
        <empty>
        <empty>";
    assert_eq!(index.render_structure(), expected);
    assert_eq!(index.structure().to_string(), expected);
}

#[test]
fn structure_of_empty_index() {
    assert_eq!(ContactIndex::new().render_structure(), "<empty>");
}

#[test]
fn structure_distinguishes_lone_left_and_right_children() {
    let left = index_of(&[("b", "1"), ("a", "2")]);
    let right = index_of(&[("a", "2"), ("b", "1")]);

    assert_eq!(left.render_structure(), "b (1)\n    a (2)\n        <empty>\n        <empty>\n    <empty>");
    assert_eq!(right.render_structure(), "a (2)\n    <empty>\n    b (1)\n        <empty>\n        <empty>");
}

// ─── Degenerate trees ───────────────────────────────────────────────────────

#[test]
fn sorted_insertion_does_not_overflow_the_stack() {
    const N: usize = 10_000;
    let mut index = ContactIndex::with_capacity(N);
    for i in 0..N {
        index.insert(Contact::new(format!("c{i:05}"), i.to_string()));
    }

    assert_eq!(index.len(), N);
    assert_eq!(index.height(), N);
    for order in Order::ALL {
        assert_eq!(index.traverse(order).count(), N);
    }
    assert_eq!(index.prefix_search("c09").count(), 1_000);
    assert_eq!(index.search("C09999").map(Contact::phone), Some("9999"));

    for i in (0..N).rev() {
        assert!(index.delete(&format!("c{i:05}")).is_some());
    }
    assert!(index.is_empty());
}

#[test]
fn deep_structure_renders_every_level() {
    let index: ContactIndex = (0..500).map(|i| (format!("n{i:03}"), String::new())).collect();
    let text = index.render_structure();
    // One line per node, plus a marker for every missing child.
    assert_eq!(text.lines().count(), 500 + 501);
    assert!(text.lines().last().unwrap().starts_with(&" ".repeat(4 * 500)));
}

// ─── Properties ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    Insert(String, String),
    Delete(String),
    Search(String),
    Prefix(String),
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-cA-C]{0,4}"
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (name_strategy(), "[0-9]{1,3}").prop_map(|(name, phone)| Op::Insert(name, phone)),
        3 => name_strategy().prop_map(Op::Delete),
        2 => name_strategy().prop_map(Op::Search),
        1 => "[a-cA-C]{0,2}".prop_map(Op::Prefix),
    ]
}

fn sorted(contacts: impl Iterator<Item = Contact>) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = contacts.collect();
    contacts.sort_by_key(|c| c.name().to_lowercase());
    contacts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Replays random operations against a `BTreeMap` keyed by the lowercased
    /// name and checks every observable result.
    #[test]
    fn index_matches_btreemap(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        let mut index = ContactIndex::new();
        let mut model: BTreeMap<String, Contact> = BTreeMap::new();

        for op in &ops {
            match op {
                Op::Insert(name, phone) => {
                    let previous = index.insert(Contact::new(name, phone));
                    let expected = match model.get_mut(&name.to_lowercase()) {
                        Some(existing) => {
                            let old = existing.phone().to_string();
                            *existing = Contact::new(existing.name(), phone);
                            Some(old)
                        }
                        None => {
                            model.insert(name.to_lowercase(), Contact::new(name, phone));
                            None
                        }
                    };
                    prop_assert_eq!(previous, expected);
                }
                Op::Delete(name) => {
                    let removed = index.delete(name);
                    prop_assert_eq!(removed, model.remove(&name.to_lowercase()));
                    prop_assert!(!index.contains(name));
                }
                Op::Search(name) => {
                    prop_assert_eq!(index.search(name), model.get(&name.to_lowercase()));
                    prop_assert_eq!(index.search(&name.to_uppercase()), model.get(&name.to_lowercase()));
                }
                Op::Prefix(prefix) => {
                    let prefix = prefix.to_lowercase();
                    let found: Vec<&Contact> = index.prefix_search(&prefix).collect();
                    let expected: Vec<&Contact> =
                        model.iter().filter(|(key, _)| key.starts_with(&prefix)).map(|(_, c)| c).collect();
                    prop_assert_eq!(found, expected);
                }
            }
            prop_assert_eq!(index.len(), model.len());
        }

        let in_order: Vec<&Contact> = index.traverse(Order::InOrder).collect();
        let expected: Vec<&Contact> = model.values().collect();
        prop_assert_eq!(&in_order, &expected);

        for order in [Order::PreOrder, Order::PostOrder] {
            let walk = index.traverse(order);
            prop_assert_eq!(walk.len(), model.len());
            prop_assert_eq!(sorted(walk.cloned()), sorted(model.values().cloned()));
        }
    }

    /// Rebuilding from any traversal gives back the same sorted listing, and
    /// rebuilding from pre-order gives back the same shape.
    #[test]
    fn rebuild_from_any_order(names in proptest::collection::vec("[a-z]{1,6}", 0..80)) {
        let original: ContactIndex<UnicodeLowercase> =
            names.iter().map(|name| Contact::new(name, name.len().to_string())).collect();

        for order in Order::ALL {
            let rebuilt: ContactIndex = original.traverse(order).cloned().collect();
            prop_assert_eq!(rebuilt.to_vec(Order::InOrder), original.to_vec(Order::InOrder));
            if order == Order::PreOrder {
                prop_assert_eq!(rebuilt.render_structure(), original.render_structure());
            }
        }
    }

    #[test]
    fn empty_prefix_returns_everything(names in proptest::collection::vec("[a-zA-Z]{0,5}", 0..60)) {
        let index: ContactIndex = names.iter().map(|name| (name.as_str(), "")).collect();
        let all: Vec<&Contact> = index.iter().collect();
        let matched: Vec<&Contact> = index.prefix_search("").collect();
        prop_assert_eq!(matched, all);
    }
}
