//! Tests for the forest builder (flat list -> rooted forest)

use std::collections::HashSet;

use rstest::{fixture, rstest};

use catree::domain::{build_forest, Category};
use catree::util::testing;

#[fixture]
fn electronics() -> Vec<Category> {
    testing::init_test_setup();
    vec![
        Category::new(1, "Electronics"),
        Category::new(2, "Phones").with_parent(1),
        Category::new(3, "Accessories").with_parent(1),
    ]
}

// ============================================================
// Structure Tests
// ============================================================

#[rstest]
fn given_two_level_list_when_building_then_one_root_with_ordered_children(
    electronics: Vec<Category>,
) {
    let forest = build_forest(&electronics);

    assert_eq!(forest.roots().len(), 1);
    let root = forest.get_node(forest.roots()[0]).unwrap();
    assert_eq!(root.category.name, "Electronics");

    let child_names: Vec<&str> = root
        .children
        .iter()
        .map(|&c| forest.get_node(c).unwrap().category.name.as_str())
        .collect();
    assert_eq!(child_names, vec!["Phones", "Accessories"]);
}

#[rstest]
fn given_reparented_list_when_rebuilding_then_depth_becomes_three(electronics: Vec<Category>) {
    // Simulate the persisted result of moving Accessories under Phones
    let mut categories = electronics;
    categories[2] = Category::new(3, "Accessories").with_parent(2);

    let forest = build_forest(&categories);

    assert_eq!(forest.roots().len(), 1);
    assert_eq!(forest.depth(), 3);
    let leaf_names: Vec<&str> = forest
        .leaf_categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(leaf_names, vec!["Accessories"]);
}

#[test]
fn given_empty_list_when_building_then_forest_is_empty() {
    let forest = build_forest(&[]);

    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
    assert_eq!(forest.depth(), 0);
}

#[test]
fn given_list_without_parents_when_building_then_all_roots_at_depth_one() {
    let categories = vec![
        Category::new(1, "Sales"),
        Category::new(2, "Stock"),
        Category::new(3, "Suppliers"),
    ];

    let forest = build_forest(&categories);

    assert_eq!(forest.roots().len(), 3);
    assert_eq!(forest.depth(), 1);
    // Roots keep flat-list order
    let root_ids: Vec<u64> = forest
        .roots()
        .iter()
        .map(|&r| forest.get_node(r).unwrap().category.id)
        .collect();
    assert_eq!(root_ids, vec![1, 2, 3]);
}

// ============================================================
// Completeness Tests
// ============================================================

#[test]
fn given_mixed_list_when_building_then_every_category_appears_exactly_once() {
    let categories = vec![
        Category::new(1, "Electronics"),
        Category::new(2, "Phones").with_parent(1),
        Category::new(3, "Chargers").with_parent(2),
        Category::new(4, "Food"),
        Category::new(5, "Orphan").with_parent(404),
    ];

    let forest = build_forest(&categories);

    let seen: Vec<u64> = forest.iter().map(|(_, n)| n.category.id).collect();
    assert_eq!(seen.len(), categories.len());
    let unique: HashSet<u64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), categories.len());
}

#[test]
fn given_orphaned_parent_when_building_then_category_degrades_to_root() {
    let categories = vec![Category::new(1, "Dangling").with_parent(99)];

    let forest = build_forest(&categories);

    assert_eq!(forest.roots().len(), 1);
    let root = forest.get_node(forest.roots()[0]).unwrap();
    assert_eq!(root.category.id, 1);
    assert!(root.parent.is_none());
}

#[test]
fn given_duplicate_ids_when_building_then_last_record_wins_without_panic() {
    let categories = vec![
        Category::new(1, "Old name"),
        Category::new(2, "Child").with_parent(1),
        Category::new(1, "New name"),
    ];

    let forest = build_forest(&categories);

    assert_eq!(forest.len(), 2);
    assert_eq!(forest.category(1).unwrap().name, "New name");
    // The child still links to the surviving record
    let child_idx = forest.index_of(2).unwrap();
    let parent_idx = forest.get_node(child_idx).unwrap().parent.unwrap();
    assert_eq!(forest.get_node(parent_idx).unwrap().category.id, 1);
}

// ============================================================
// Purity Tests
// ============================================================

#[rstest]
fn given_same_list_when_building_twice_then_forests_are_structurally_equal(
    electronics: Vec<Category>,
) {
    let first = build_forest(&electronics);
    let second = build_forest(&electronics);

    assert_eq!(first, second);
}

#[rstest]
fn given_reordered_children_when_building_then_forests_differ(electronics: Vec<Category>) {
    let mut swapped = electronics.clone();
    swapped.swap(1, 2);

    let original = build_forest(&electronics);
    let reordered = build_forest(&swapped);

    // Sibling order is part of the structure
    assert_ne!(original, reordered);
}

#[rstest]
fn given_builder_call_when_building_then_input_list_is_unchanged(electronics: Vec<Category>) {
    let snapshot = electronics.clone();
    let _ = build_forest(&electronics);

    assert_eq!(electronics, snapshot);
}
