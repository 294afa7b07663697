//! Hierarchical tree layout for the category forest.
//!
//! Assigns (x, y) coordinates to every node so the visual renderer can draw
//! boxes and parent-child edges. The forest is treated as children of a
//! single synthetic super-root which is never emitted, so multi-root forests
//! lay out uniformly.
//!
//! Algorithm: two walks. The first walk runs in postorder and assigns each
//! leaf the next free horizontal slot, then centers every parent over the
//! span of its first and last child. The second walk emits nodes and edges
//! in preorder. Positions depend only on the forest shape and the layout
//! options: no randomness, no map-order iteration.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::Forest;

/// Node geometry and spacing for the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Rendered node width
    pub node_width: f64,
    /// Rendered node height
    pub node_height: f64,
    /// Horizontal gap between adjacent leaf slots
    pub h_spacing: f64,
    /// Vertical gap between depth levels
    pub v_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 48.0,
            h_spacing: 24.0,
            v_spacing: 32.0,
        }
    }
}

/// A laid-out category node.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: u64,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A parent-to-child edge between laid-out nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: u64,
    pub target: u64,
}

/// Layout output: one positioned node per forest node, one edge per
/// parent-child pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

/// Compute the layout for a forest.
///
/// Guarantees: sibling subtrees never overlap horizontally, y strictly
/// increases with depth, and a parent is centered over its children's span.
/// An empty forest yields an empty layout; a flat list yields a single row.
#[instrument(level = "debug", skip(forest, options), fields(nodes = forest.len()))]
pub fn layout(forest: &Forest, options: &LayoutOptions) -> Layout {
    let mut xs: HashMap<Index, f64> = HashMap::with_capacity(forest.len());
    let mut cursor = 0.0;
    for &root in forest.roots() {
        place_subtree(forest, root, options, &mut cursor, &mut xs);
    }

    let mut result = Layout {
        nodes: Vec::with_capacity(forest.len()),
        edges: Vec::new(),
    };
    for (idx, node) in forest.iter() {
        let x = xs.get(&idx).copied().unwrap_or(0.0);
        let y = depth_of(forest, idx) as f64 * (options.node_height + options.v_spacing);
        result.nodes.push(PositionedNode {
            id: node.category.id,
            name: node.category.name.clone(),
            x,
            y,
        });
        for &child in &node.children {
            if let Some(child_node) = forest.get_node(child) {
                result.edges.push(Edge {
                    source: node.category.id,
                    target: child_node.category.id,
                });
            }
        }
    }
    result
}

/// First walk: returns the x assigned to `idx`. Leaves consume successive
/// slots from `cursor`; parents center over first and last child.
fn place_subtree(
    forest: &Forest,
    idx: Index,
    options: &LayoutOptions,
    cursor: &mut f64,
    xs: &mut HashMap<Index, f64>,
) -> f64 {
    let Some(node) = forest.get_node(idx) else {
        return *cursor;
    };

    let x = if node.children.is_empty() {
        let slot = *cursor;
        *cursor += options.node_width + options.h_spacing;
        slot
    } else {
        let mut first = f64::MAX;
        let mut last = f64::MIN;
        for &child in &node.children {
            let child_x = place_subtree(forest, child, options, cursor, xs);
            first = first.min(child_x);
            last = last.max(child_x);
        }
        (first + last) / 2.0
    };

    xs.insert(idx, x);
    x
}

/// Depth of a node below its forest root (roots are depth 0).
fn depth_of(forest: &Forest, idx: Index) -> usize {
    let mut depth = 0;
    let mut current = forest.get_node(idx).and_then(|n| n.parent);
    while let Some(parent) = current {
        depth += 1;
        current = forest.get_node(parent).and_then(|n| n.parent);
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build_forest;
    use crate::domain::category::Category;

    #[test]
    fn given_empty_forest_when_laying_out_then_output_is_empty() {
        let forest = build_forest(&[]);
        let result = layout(&forest, &LayoutOptions::default());

        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn given_parent_with_two_children_then_parent_is_centered() {
        let categories = vec![
            Category::new(1, "Electronics"),
            Category::new(2, "Phones").with_parent(1),
            Category::new(3, "Accessories").with_parent(1),
        ];
        let forest = build_forest(&categories);
        let result = layout(&forest, &LayoutOptions::default());

        let x_of = |id: u64| result.nodes.iter().find(|n| n.id == id).unwrap().x;
        assert_eq!(x_of(1), (x_of(2) + x_of(3)) / 2.0);
    }
}
