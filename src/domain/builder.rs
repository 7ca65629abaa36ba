//! Tree builder expanding an entity into its full dependency tree.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::DependencyTree;
use crate::domain::capabilities::DependencyLookup;
use crate::domain::error::{DomainError, TreeResult};

type BoxFuture<'a, O> = Pin<Box<dyn Future<Output = O> + Send + 'a>>;

/// Guards against runaway expansion. Both are off by default, in which case a
/// lookup that never bottoms out recurses without bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest level a node may be created at, the root is level 0
    pub max_depth: Option<usize>,
    /// Fail when an entity equals one of its own ancestors
    pub detect_cycles: bool,
}

/// Constructs dependency trees by querying a [`DependencyLookup`].
///
/// Expansion is depth-first and strictly sequential: a sibling's subtree is
/// only started after the previous sibling's subtree is complete, so lookups
/// never overlap and happen in pre-order.
pub struct DependencyTreeBuilder<L> {
    lookup: L,
    options: BuildOptions,
}

impl<L> DependencyTreeBuilder<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Builds the complete tree below `root`.
    ///
    /// Calls the lookup exactly once per created node. Any lookup failure
    /// aborts the whole build and the partially built tree is dropped.
    #[instrument(level = "debug", skip(self, root), fields(root = ?root))]
    pub async fn build_dependency_tree<T>(&self, root: T) -> TreeResult<DependencyTree<T>>
    where
        T: fmt::Debug + PartialEq + Send + Sync,
        L: DependencyLookup<T>,
    {
        let mut tree = DependencyTree::with_root(root);
        let root_idx = tree.root().index();
        self.expand(&mut tree, root_idx, 0).await?;
        debug!(nodes = tree.len(), "dependency tree built");
        Ok(tree)
    }

    /// Expands the node at `idx`: lookup, build each child subtree in order,
    /// then assign the children.
    fn expand<'a, T>(
        &'a self,
        tree: &'a mut DependencyTree<T>,
        idx: Index,
        depth: usize,
    ) -> BoxFuture<'a, TreeResult<()>>
    where
        T: fmt::Debug + PartialEq + Send + Sync,
        L: DependencyLookup<T>,
    {
        Box::pin(async move {
            let element = tree
                .get_node(idx)
                .map(|node| node.element())
                .ok_or_else(|| DomainError::Internal(format!("missing node {:?}", idx)))?;

            let dependencies = self
                .lookup
                .dependencies(element)
                .await
                .map_err(|source| DomainError::Lookup {
                    entity: format!("{:?}", element),
                    depth,
                    source,
                })?;
            trace!(entity = ?element, depth, count = dependencies.len(), "looked up dependencies");

            let mut children = Vec::with_capacity(dependencies.len());
            for dependency in dependencies {
                self.check_guards(tree, idx, &dependency, depth + 1)?;
                let child = tree.insert_node(dependency, idx);
                self.expand(tree, child, depth + 1).await?;
                children.push(child);
            }
            tree.set_children(idx, children);
            Ok(())
        })
    }

    fn check_guards<T>(
        &self,
        tree: &DependencyTree<T>,
        parent: Index,
        entity: &T,
        depth: usize,
    ) -> TreeResult<()>
    where
        T: fmt::Debug + PartialEq,
    {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(DomainError::DepthExceeded {
                    entity: format!("{:?}", entity),
                    max_depth,
                });
            }
        }

        if self.options.detect_cycles {
            let parent = tree
                .node(parent)
                .ok_or_else(|| DomainError::Internal(format!("missing node {:?}", parent)))?;
            let on_path = std::iter::once(parent)
                .chain(parent.ancestors())
                .any(|ancestor| ancestor.element() == entity);
            if on_path {
                return Err(DomainError::CycleDetected {
                    entity: format!("{:?}", entity),
                    depth,
                });
            }
        }
        Ok(())
    }
}
