//! Arena-backed dependency tree.
//!
//! Nodes own nothing but indices into the same arena: `children` is the owning
//! relation, `parent` is a plain back-reference used for upward walks.

use std::fmt;
use std::iter::successors;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Tree node in the arena-based dependency structure.
#[derive(Debug)]
pub struct TreeNode<T> {
    /// Entity wrapped by this node
    pub(crate) element: T,
    /// Index of parent node in the arena, None for the root
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in lookup order
    pub(crate) children: Vec<Index>,
}

impl<T> TreeNode<T> {
    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }
}

/// Fully materialized dependency tree.
///
/// Built once by [`crate::domain::DependencyTreeBuilder`] and read-only afterwards:
/// there is no public mutation API.
#[derive(Debug)]
pub struct DependencyTree<T> {
    arena: Arena<TreeNode<T>>,
    root: Index,
}

impl<T> DependencyTree<T> {
    /// Creates a tree holding only `root`, whose children are not yet assigned.
    pub(crate) fn with_root(root: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            element: root,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Inserts a node below `parent` without linking it into `parent.children`.
    ///
    /// Linking happens once, in [`Self::set_children`], after the whole sibling
    /// sequence has been built.
    pub(crate) fn insert_node(&mut self, element: T, parent: Index) -> Index {
        self.arena.insert(TreeNode {
            element,
            parent: Some(parent),
            children: Vec::new(),
        })
    }

    pub(crate) fn set_children(&mut self, idx: Index, children: Vec<Index>) {
        if let Some(node) = self.arena.get_mut(idx) {
            debug_assert!(node.children.is_empty(), "children assigned twice");
            node.children = children;
        }
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef {
            tree: self,
            index: self.root,
        }
    }

    pub fn node(&self, index: Index) -> Option<NodeRef<'_, T>> {
        self.arena.get(index).map(|_| NodeRef { tree: self, index })
    }

    pub fn get_node(&self, index: Index) -> Option<&TreeNode<T>> {
        self.arena.get(index)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal, root first, children left to right.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    /// Post-order traversal, leaves before their parents.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Number of levels, a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) in pre-order.
    ///
    /// A tree without dependencies yields its root.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<NodeRef<'_, T>> {
        self.iter().filter(|node| node.children().len() == 0).collect()
    }
}

/// Borrowed cursor on a single node.
///
/// Identity is the pair (tree, index), never the wrapped element: two nodes
/// wrapping equal entities on different paths compare unequal.
pub struct NodeRef<'a, T> {
    tree: &'a DependencyTree<T>,
    index: Index,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("element", self.element())
            .finish()
    }
}

impl<'a, T: 'a> NodeRef<'a, T> {
    fn inner(&self) -> &'a TreeNode<T> {
        // Indices handed out by a tree always point into its own arena and
        // nothing is ever removed from it.
        &self.tree.arena[self.index]
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub fn tree(&self) -> &'a DependencyTree<T> {
        self.tree
    }

    pub fn element(&self) -> &'a T {
        &self.inner().element
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.inner().parent.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    pub fn children(
        &self,
    ) -> impl ExactSizeIterator<Item = NodeRef<'a, T>> + DoubleEndedIterator + 'a {
        let tree = self.tree;
        self.inner()
            .children
            .iter()
            .map(move |&index| NodeRef { tree, index })
    }

    pub fn is_root(&self) -> bool {
        self.inner().parent.is_none()
    }

    /// True if this node is the final entry of its parent's children.
    /// The root has no siblings and counts as last.
    pub fn is_last_child(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.inner().children.last() == Some(&self.index),
            None => true,
        }
    }

    /// Ancestors from the parent upward, root last.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a, T>> {
        successors(self.parent(), |node| node.parent())
    }

    /// Distance from the root, the root itself is at depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a DependencyTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a DependencyTree<T>) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.tree.node(self.stack.pop()?)?;
        // Push children in reverse order for left-to-right traversal
        for child in current.children().rev() {
            self.stack.push(child.index());
        }
        Some(current)
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a DependencyTree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a DependencyTree<T>) -> Self {
        Self {
            tree,
            stack: vec![(tree.root, false)],
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if visited {
                    return Some(node);
                }
                self.stack.push((current_idx, true));
                for child in node.children().rev() {
                    self.stack.push((child.index(), false));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //   a
    //   +- b
    //   |  \- d
    //   \- c
    fn sample() -> DependencyTree<&'static str> {
        let mut tree = DependencyTree::with_root("a");
        let root = tree.root().index();
        let b = tree.insert_node("b", root);
        let d = tree.insert_node("d", b);
        tree.set_children(b, vec![d]);
        let c = tree.insert_node("c", root);
        tree.set_children(root, vec![b, c]);
        tree
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_visits_left_to_right() {
        let tree = sample();
        let order: Vec<_> = tree.iter().map(|n| *n.element()).collect();
        assert_eq!(order, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_visits_leaves_first() {
        let tree = sample();
        let order: Vec<_> = tree.iter_postorder().map(|n| *n.element()).collect();
        assert_eq!(order, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.len(), 4);
        let leaves: Vec<_> = tree.leaves().iter().map(|n| *n.element()).collect();
        assert_eq!(leaves, vec!["d", "c"]);
    }

    #[test]
    fn given_nodes_when_checking_position_then_last_child_and_depth_match() {
        let tree = sample();
        let root = tree.root();
        let children: Vec<_> = root.children().collect();
        assert!(root.is_root());
        assert!(!children[0].is_last_child());
        assert!(children[1].is_last_child());

        let d = children[0].children().next().unwrap();
        assert_eq!(d.depth(), 2);
        assert_eq!(d.parent(), Some(children[0]));
        let ancestors: Vec<_> = d.ancestors().map(|n| *n.element()).collect();
        assert_eq!(ancestors, vec!["b", "a"]);
    }

    #[test]
    fn given_equal_elements_when_comparing_nodes_then_identity_is_positional() {
        let mut tree = DependencyTree::with_root("x");
        let root = tree.root().index();
        let first = tree.insert_node("same", root);
        let second = tree.insert_node("same", root);
        tree.set_children(root, vec![first, second]);

        let a = tree.node(first).unwrap();
        let b = tree.node(second).unwrap();
        assert_eq!(a.element(), b.element());
        assert_ne!(a, b);
    }
}
