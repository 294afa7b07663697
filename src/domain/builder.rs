//! Forest builder: flat category list to rooted forest.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::Forest;
use crate::domain::category::Category;

/// Build a forest from the flat category list.
///
/// Two passes: the first indexes every category (duplicate ids are a caller
/// error and resolve last-wins), the second links each category under its
/// parent when that parent exists in the index, preserving flat-list order
/// among siblings. Categories with no parent, a self-referencing parent, or
/// a parent id absent from the list become forest roots.
///
/// Pure and total: never errors, and building twice from the same list
/// yields structurally equal forests.
#[instrument(level = "debug", skip(categories), fields(count = categories.len()))]
pub fn build_forest(categories: &[Category]) -> Forest {
    let mut forest = Forest::new();

    // Last occurrence wins for duplicate ids
    let last_occurrence: HashMap<u64, usize> = categories
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();
    let effective: Vec<&Category> = categories
        .iter()
        .enumerate()
        .filter(|(pos, c)| last_occurrence[&c.id] == *pos)
        .map(|(_, c)| c)
        .collect();
    if effective.len() != categories.len() {
        debug!(
            "dropped {} duplicate category records",
            categories.len() - effective.len()
        );
    }

    // Pass 1: index every category as an unlinked node
    let indices: Vec<Index> = effective
        .iter()
        .map(|c| forest.insert((*c).clone()))
        .collect();

    // Pass 2: link to parent where it resolves, otherwise root
    for (category, &idx) in effective.iter().zip(&indices) {
        match category.parent_id().filter(|&pid| pid != category.id) {
            Some(pid) => match forest.index_of(pid) {
                Some(parent_idx) => forest.link(parent_idx, idx),
                None => {
                    debug!(
                        "category {} declares missing parent {}, placing at top level",
                        category.id, pid
                    );
                    forest.promote_root(idx);
                }
            },
            None => forest.promote_root(idx),
        }
    }

    // A parent cycle in the input (invariant violation) leaves its members
    // unreachable from any root; promote a member so no category is lost.
    let reachable: HashSet<u64> = forest.iter().map(|(_, n)| n.category.id).collect();
    if reachable.len() < forest.len() {
        let stranded: Vec<Index> = effective
            .iter()
            .zip(&indices)
            .filter(|(c, _)| !reachable.contains(&c.id))
            .map(|(_, &idx)| idx)
            .collect();
        for idx in stranded {
            let still_unreachable = !forest.iter().any(|(reached_idx, _)| reached_idx == idx);
            if still_unreachable {
                forest.promote_root(idx);
            }
        }
    }

    forest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_input_cycle_when_building_then_no_category_is_lost() {
        // 1 -> 2 -> 1 violates the acyclicity invariant; degrade, don't drop
        let categories = vec![
            Category::new(1, "A").with_parent(2),
            Category::new(2, "B").with_parent(1),
        ];

        let forest = build_forest(&categories);

        assert_eq!(forest.iter().count(), 2);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn given_self_parent_when_building_then_category_becomes_root() {
        let categories = vec![Category::new(5, "Loop").with_parent(5)];

        let forest = build_forest(&categories);

        assert_eq!(forest.roots().len(), 1);
        let root = forest.get_node(forest.roots()[0]).unwrap();
        assert_eq!(root.category.id, 5);
        assert!(root.parent.is_none());
    }
}
