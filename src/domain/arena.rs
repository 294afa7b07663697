use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::category::Category;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Category record wrapped by this node
    pub category: Category,
    /// Index of parent node in the arena, None for forest roots
    pub parent: Option<Index>,
    /// Indices of child nodes, in flat-list insertion order
    pub children: Vec<Index>,
}

/// Arena-based forest of category trees.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// A forest holds zero or more roots; derived from the flat category list and
/// rebuilt from scratch on every change, it carries no identity beyond the
/// wrapped categories' ids.
#[derive(Debug, Default)]
pub struct Forest {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root indices, in flat-list insertion order
    roots: Vec<Index>,
    /// Category id to arena index
    by_id: HashMap<u64, Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category as an unlinked node. Linking happens separately so
    /// the builder can index all nodes before resolving parents.
    #[instrument(level = "trace", skip(self, category))]
    pub fn insert(&mut self, category: Category) -> Index {
        let id = category.id;
        let idx = self.arena.insert(TreeNode {
            category,
            parent: None,
            children: Vec::new(),
        });
        self.by_id.insert(id, idx);
        idx
    }

    /// Attach `child` under `parent`, preserving call order among siblings.
    pub fn link(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Promote a node to forest root, detaching it from its parent if linked.
    pub fn promote_root(&mut self, idx: Index) {
        let old_parent = self.arena.get(idx).and_then(|n| n.parent);
        if let Some(parent_idx) = old_parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.retain(|&c| c != idx);
            }
        }
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = None;
        }
        if !self.roots.contains(&idx) {
            self.roots.push(idx);
        }
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Arena index for a category id.
    pub fn index_of(&self, id: u64) -> Option<Index> {
        self.by_id.get(&id).copied()
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|n| &n.category)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder traversal across all roots, left to right.
    pub fn iter(&self) -> ForestIterator<'_> {
        ForestIterator::new(self)
    }

    /// Postorder traversal across all roots (children before parents).
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Maximum depth over all trees; an empty forest has depth 0, a flat
    /// list (no hierarchy) has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.depth_below(root))
            .max()
            .unwrap_or(0)
    }

    fn depth_below(&self, idx: Index) -> usize {
        match self.get_node(idx) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.depth_below(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Categories with no children, in preorder.
    pub fn leaf_categories(&self) -> Vec<&Category> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.category)
            .collect()
    }

    /// All root-to-leaf paths, one per leaf, in preorder.
    pub fn branches(&self) -> Vec<Vec<&Category>> {
        let mut branches = Vec::new();
        for &root in &self.roots {
            let mut path = Vec::new();
            self.collect_branches(root, &mut path, &mut branches);
        }
        branches
    }

    fn collect_branches<'a>(
        &'a self,
        idx: Index,
        path: &mut Vec<&'a Category>,
        branches: &mut Vec<Vec<&'a Category>>,
    ) {
        let Some(node) = self.get_node(idx) else {
            return;
        };
        path.push(&node.category);
        if node.children.is_empty() {
            branches.push(path.clone());
        } else {
            for &child in &node.children {
                self.collect_branches(child, path, branches);
            }
        }
        path.pop();
    }
}

/// Structural equality: same categories, same parent links, same child order.
/// Arena indices are ignored; two independently built forests from the same
/// flat list compare equal.
impl PartialEq for Forest {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.roots.len() != other.roots.len() {
            return false;
        }
        let shape = |forest: &Self| -> Vec<(Category, Option<u64>)> {
            forest
                .iter()
                .map(|(_, node)| {
                    let parent_id = node
                        .parent
                        .and_then(|p| forest.get_node(p))
                        .map(|p| p.category.id);
                    (node.category.clone(), parent_id)
                })
                .collect()
        };
        shape(self) == shape(other)
    }
}

pub struct ForestIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forest() -> Forest {
        let mut forest = Forest::new();
        let root = forest.insert(Category::new(1, "Electronics"));
        let phones = forest.insert(Category::new(2, "Phones").with_parent(1));
        let acc = forest.insert(Category::new(3, "Accessories").with_parent(1));
        forest.promote_root(root);
        forest.link(root, phones);
        forest.link(root, acc);
        forest
    }

    #[test]
    fn given_linked_forest_when_iterating_preorder_then_parent_comes_first() {
        let forest = sample_forest();
        let ids: Vec<u64> = forest.iter().map(|(_, n)| n.category.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn given_linked_forest_when_iterating_postorder_then_leaves_come_first() {
        let forest = sample_forest();
        let ids: Vec<u64> = forest.iter_postorder().map(|(_, n)| n.category.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn given_two_level_forest_when_measuring_then_depth_is_two() {
        let forest = sample_forest();
        assert_eq!(forest.depth(), 2);
        assert_eq!(forest.len(), 3);
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn given_reparented_root_when_promoting_then_detached_from_old_parent() {
        let mut forest = sample_forest();
        let phones = forest.index_of(2).unwrap();
        forest.promote_root(phones);

        assert_eq!(forest.roots().len(), 2);
        let root = forest.index_of(1).unwrap();
        assert_eq!(forest.get_node(root).unwrap().children.len(), 1);
        assert!(forest.get_node(phones).unwrap().parent.is_none());
    }
}
