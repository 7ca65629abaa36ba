//! Injected capabilities: dependency lookup, serializer and filter.
//!
//! Each is a single-method trait. Serializers and filters are also
//! implemented for plain closures.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;

use crate::domain::arena::NodeRef;
use crate::domain::error::LookupError;

/// Resolves the direct dependencies of an entity.
///
/// An empty result marks a leaf. The returned order is the order of the
/// node's children.
#[async_trait]
pub trait DependencyLookup<T>: Send + Sync {
    async fn dependencies(&self, entity: &T) -> Result<Vec<T>, LookupError>;
}

/// Turns a node into its display text.
pub trait Serializer<T> {
    fn serialize(&self, node: NodeRef<'_, T>) -> String;
}

impl<T, F> Serializer<T> for F
where
    F: Fn(NodeRef<'_, T>) -> String,
{
    fn serialize(&self, node: NodeRef<'_, T>) -> String {
        self(node)
    }
}

/// Structural dump of the element (`Debug` output).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSerializer;

impl<T: fmt::Debug> Serializer<T> for DefaultSerializer {
    fn serialize(&self, node: NodeRef<'_, T>) -> String {
        format!("{:?}", node.element())
    }
}

/// Uses the element's `Display` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplaySerializer;

impl<T: fmt::Display> Serializer<T> for DisplaySerializer {
    fn serialize(&self, node: NodeRef<'_, T>) -> String {
        node.element().to_string()
    }
}

/// Decides whether a node (and its subtree) appears in a composed listing.
pub trait Filter<T> {
    fn accept(&self, node: NodeRef<'_, T>) -> bool;
}

impl<T, F> Filter<T> for F
where
    F: Fn(NodeRef<'_, T>) -> bool,
{
    fn accept(&self, node: NodeRef<'_, T>) -> bool {
        self(node)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl<T> Filter<T> for IncludeAll {
    fn accept(&self, _node: NodeRef<'_, T>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeAll;

impl<T> Filter<T> for ExcludeAll {
    fn accept(&self, _node: NodeRef<'_, T>) -> bool {
        false
    }
}

/// Rejects nodes whose `Display` text is one of `names`.
#[derive(Debug, Clone, Default)]
pub struct ExcludeNames {
    names: HashSet<String>,
}

impl ExcludeNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<T: fmt::Display> Filter<T> for ExcludeNames {
    fn accept(&self, node: NodeRef<'_, T>) -> bool {
        !self.names.contains(&node.element().to_string())
    }
}
