//! Domain layer: dependency tree, builder, renderer and capabilities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod capabilities;
pub mod error;
pub mod render;

pub use arena::{DependencyTree, NodeRef, TreeNode};
pub use builder::{BuildOptions, DependencyTreeBuilder};
pub use capabilities::{
    DefaultSerializer, DependencyLookup, DisplaySerializer, ExcludeAll, ExcludeNames, Filter,
    IncludeAll, Serializer,
};
pub use error::{DomainError, LookupError, TreeResult};
pub use render::{render_listing, to_termtree, TreeRenderer};
