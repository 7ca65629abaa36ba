//! ASCII tree rendering.
//!
//! A node's line is derived from its ancestor chain alone, so any node can be
//! rendered in isolation:
//!
//! ```text
//! +- 1.1
//! |  +- 2.1
//! |  \- 2.3
//! \- 1.2
//!    \- 2.2
//! ```

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{DependencyTree, NodeRef};
use crate::domain::capabilities::{Filter, Serializer};

/// Marker of a node followed by further siblings.
pub const BRANCH: &str = "+- ";
/// Marker of the last child.
pub const LAST_BRANCH: &str = "\\- ";
/// Segment for an ancestor that has further siblings.
pub const PIPE: &str = "|  ";
/// Segment for an ancestor that is a last child.
pub const BLANK: &str = "   ";

/// Renders single nodes as `prefix + marker + text`.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer<S> {
    serializer: S,
}

impl<S> TreeRenderer<S> {
    pub fn new(serializer: S) -> Self {
        Self { serializer }
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Renders one node.
    ///
    /// The root is the listing's context and carries neither prefix nor
    /// marker: it renders as its bare serialized text.
    pub fn render<T>(&self, node: NodeRef<'_, T>) -> String
    where
        S: Serializer<T>,
    {
        let text = self.serializer.serialize(node);
        if node.is_root() {
            return text;
        }
        let mut line = prefix(node);
        line.push_str(marker(node));
        line.push_str(&text);
        line
    }
}

/// Continuation segments for every ancestor below the root, outermost first.
pub fn prefix<T>(node: NodeRef<'_, T>) -> String {
    let segments: Vec<&str> = node
        .ancestors()
        .take_while(|ancestor| !ancestor.is_root())
        .map(|ancestor| if ancestor.is_last_child() { BLANK } else { PIPE })
        .collect();
    segments.iter().rev().copied().collect()
}

pub fn marker<T>(node: NodeRef<'_, T>) -> &'static str {
    if node.is_last_child() {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

/// Renders every descendant of the root in pre-order.
///
/// A node rejected by `filter` is dropped together with its subtree. Lines
/// keep the prefixes of the unfiltered tree.
#[instrument(level = "debug", skip_all)]
pub fn render_listing<T, S, F>(
    tree: &DependencyTree<T>,
    renderer: &TreeRenderer<S>,
    filter: &F,
) -> Vec<String>
where
    S: Serializer<T>,
    F: Filter<T> + ?Sized,
{
    let mut lines = Vec::new();
    let mut stack: Vec<NodeRef<'_, T>> = tree.root().children().rev().collect();

    while let Some(node) = stack.pop() {
        if !filter.accept(node) {
            continue;
        }
        lines.push(renderer.render(node));
        stack.extend(node.children().rev());
    }
    lines
}

/// Converts the tree into a `termtree::Tree` using the same pruning rules as
/// [`render_listing`]. The root is always kept.
pub fn to_termtree<T, S, F>(tree: &DependencyTree<T>, serializer: &S, filter: &F) -> Tree<String>
where
    S: Serializer<T>,
    F: Filter<T> + ?Sized,
{
    fn convert<T, S, F>(node: NodeRef<'_, T>, serializer: &S, filter: &F) -> Tree<String>
    where
        S: Serializer<T>,
        F: Filter<T> + ?Sized,
    {
        let leaves: Vec<_> = node
            .children()
            .filter(|child| filter.accept(*child))
            .map(|child| convert(child, serializer, filter))
            .collect();
        Tree::new(serializer.serialize(node)).with_leaves(leaves)
    }

    convert(tree.root(), serializer, filter)
}
