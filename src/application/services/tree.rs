//! Tree service: builds and renders dependency trees from manifests.

use tracing::{debug, instrument};

use crate::application::manifest::Manifest;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{Settings, Style};
use crate::domain::{
    render_listing, to_termtree, DependencyTree, DependencyTreeBuilder, DisplaySerializer, Filter,
    TreeRenderer,
};

/// Wires settings, the manifest lookup, the builder and the renderers.
#[derive(Debug, Clone, Default)]
pub struct TreeService {
    settings: Settings,
}

impl TreeService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves the root entity and builds its full tree.
    ///
    /// `root` takes precedence over the manifest's own `root` entry.
    #[instrument(level = "debug", skip(self, manifest))]
    pub async fn build(
        &self,
        manifest: Manifest,
        root: Option<&str>,
    ) -> ApplicationResult<DependencyTree<String>> {
        let root = root
            .map(str::to_string)
            .or_else(|| manifest.root.clone())
            .ok_or_else(|| ApplicationError::NoRoot(manifest.path().to_path_buf()))?;
        debug!(%root, "building dependency tree");

        let builder = DependencyTreeBuilder::new(manifest.into_lookup())
            .with_options(self.settings.build_options());
        Ok(builder.build_dependency_tree(root).await?)
    }

    /// Renders the tree in the configured style, one line per entry.
    pub fn render<F>(&self, tree: &DependencyTree<String>, filter: &F) -> String
    where
        F: Filter<String> + ?Sized,
    {
        match self.settings.style {
            Style::Ascii => {
                let renderer = TreeRenderer::new(DisplaySerializer);
                let mut lines = Vec::new();
                if self.settings.show_root {
                    lines.push(renderer.render(tree.root()));
                }
                lines.extend(render_listing(tree, &renderer, filter));
                lines.join("\n")
            }
            Style::Unicode => {
                let full = to_termtree(tree, &DisplaySerializer, filter);
                let rendered = if self.settings.show_root {
                    full.to_string()
                } else {
                    // each first-level entity heads its own box-drawn subtree
                    full.leaves.iter().map(ToString::to_string).collect()
                };
                rendered.trim_end().to_string()
            }
        }
    }

    /// Leaf entities in pre-order, duplicates kept (one per path).
    pub fn leaves(&self, tree: &DependencyTree<String>) -> Vec<String> {
        tree.leaves()
            .into_iter()
            .map(|node| node.element().clone())
            .collect()
    }
}
