//! Tests for TreeRenderer prefix and marker construction

use rstest::{fixture, rstest};

use deptree::application::MapLookup;
use deptree::domain::{
    DefaultSerializer, DependencyTree, DependencyTreeBuilder, NodeRef, TreeRenderer,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Package {
    id: &'static str,
    name: &'static str,
}

const fn package(id: &'static str, name: &'static str) -> Package {
    Package { id, name }
}

const TOP: Package = package("0", "A");
const L1P1: Package = package("1.1", "1st Level Dependency p#1");
const L1P2: Package = package("1.2", "1st Level Dependency p#2");
const L2P1: Package = package("2.1", "2nd Level Dependency p#1");
const L2P2: Package = package("2.2", "2nd Level Dependency p#2");
const L2P3: Package = package("2.3", "2nd Level Dependency p#3");
const L3P1: Package = package("3.1", "3rd Level Dependency p#1");
const L3P2: Package = package("3.2", "3rd Level Dependency p#2");

fn by_name(node: NodeRef<'_, Package>) -> String {
    node.element().name.to_string()
}

// A
// +- 1.1
// |  +- 2.1
// |  +- 2.2
// |  |  +- 3.1
// |  |  \- 3.2
// |  \- 2.3
// \- 1.2
//    \- 2.2
//       +- 3.1
//       \- 3.2
#[fixture]
fn multi_level() -> DependencyTree<Package> {
    let lookup: MapLookup<Package> = [
        (TOP, vec![L1P1, L1P2]),
        (L1P1, vec![L2P1, L2P2, L2P3]),
        (L2P2, vec![L3P1, L3P2]),
        (L1P2, vec![L2P2]),
    ]
    .into_iter()
    .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime
        .block_on(DependencyTreeBuilder::new(lookup).build_dependency_tree(TOP))
        .expect("build tree")
}

/// Follows child positions from the root.
fn at<'a, T>(tree: &'a DependencyTree<T>, path: &[usize]) -> NodeRef<'a, T> {
    path.iter().fold(tree.root(), |node, &i| {
        node.children().nth(i).expect("child position exists")
    })
}

#[rstest]
#[case::first_level_not_last(&[0], "+- 1st Level Dependency p#1")]
#[case::second_level_first(&[0, 0], "|  +- 2nd Level Dependency p#1")]
#[case::second_level_middle(&[0, 1], "|  +- 2nd Level Dependency p#2")]
#[case::third_level_first(&[0, 1, 0], "|  |  +- 3rd Level Dependency p#1")]
#[case::third_level_last(&[0, 1, 1], "|  |  \\- 3rd Level Dependency p#2")]
#[case::second_level_last(&[0, 2], "|  \\- 2nd Level Dependency p#3")]
#[case::first_level_last(&[1], "\\- 1st Level Dependency p#2")]
#[case::only_child_of_last(&[1, 0], "   \\- 2nd Level Dependency p#2")]
#[case::below_last_branch_first(&[1, 0, 0], "      +- 3rd Level Dependency p#1")]
#[case::below_last_branch_last(&[1, 0, 1], "      \\- 3rd Level Dependency p#2")]
fn given_multi_level_tree_when_rendering_node_then_matches_listing(
    multi_level: DependencyTree<Package>,
    #[case] path: &[usize],
    #[case] expected: &str,
) {
    let renderer = TreeRenderer::new(by_name);
    assert_eq!(renderer.render(at(&multi_level, path)), expected);
}

#[rstest]
fn given_root_when_rendering_then_returns_bare_text(multi_level: DependencyTree<Package>) {
    let renderer = TreeRenderer::new(by_name);
    assert_eq!(renderer.render(multi_level.root()), "A");
}

#[rstest]
fn given_same_node_when_rendering_twice_then_output_is_identical(
    multi_level: DependencyTree<Package>,
) {
    let renderer = TreeRenderer::new(by_name);
    let node = at(&multi_level, &[0, 1, 0]);
    let first = renderer.render(node);
    let second = renderer.render(node);
    assert_eq!(first, second);
}

#[rstest]
fn given_nodes_rendered_out_of_order_when_rendering_then_siblings_do_not_matter(
    multi_level: DependencyTree<Package>,
) {
    let renderer = TreeRenderer::new(by_name);
    let deep_first = renderer.render(at(&multi_level, &[1, 0, 1]));
    for node in multi_level.iter() {
        renderer.render(node);
    }
    assert_eq!(renderer.render(at(&multi_level, &[1, 0, 1])), deep_first);
}

#[rstest]
fn given_different_serializers_when_rendering_then_prefix_is_unchanged(
    multi_level: DependencyTree<Package>,
) {
    let by_name = TreeRenderer::new(by_name);
    let by_id = TreeRenderer::new(|node: NodeRef<'_, Package>| node.element().id.to_string());

    for node in multi_level.iter().filter(|n| !n.is_root()) {
        let named = by_name.render(node);
        let numbered = by_id.render(node);
        let named_prefix = named.strip_suffix(node.element().name).unwrap();
        let numbered_prefix = numbered.strip_suffix(node.element().id).unwrap();
        assert_eq!(named_prefix, numbered_prefix);
    }
}

#[rstest]
fn given_default_serializer_when_rendering_then_dumps_element_structure(
    multi_level: DependencyTree<Package>,
) {
    let renderer = TreeRenderer::new(DefaultSerializer);
    let line = renderer.render(at(&multi_level, &[1]));
    assert_eq!(
        line,
        r#"\- Package { id: "1.2", name: "1st Level Dependency p#2" }"#
    );
}

#[rstest]
fn given_different_sibling_subtree_when_rendering_then_prefixes_are_unchanged() {
    // Same shape as the left half of the multi-level tree, with another
    // subtree hanging off a different entity.
    let other = package("9.9", "Other");
    let lookup: MapLookup<Package> = [
        (TOP, vec![L1P1, other.clone()]),
        (L1P1, vec![L2P1, L2P2, L2P3]),
        (L2P2, vec![L3P1, L3P2]),
        (other, vec![L3P1, L3P1, L3P1]),
    ]
    .into_iter()
    .collect();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let tree = runtime
        .block_on(DependencyTreeBuilder::new(lookup).build_dependency_tree(TOP))
        .unwrap();

    let renderer = TreeRenderer::new(by_name);
    assert_eq!(
        renderer.render(at(&tree, &[0, 1, 0])),
        "|  |  +- 3rd Level Dependency p#1"
    );
    assert_eq!(
        renderer.render(at(&tree, &[0, 2])),
        "|  \\- 2nd Level Dependency p#3"
    );
}
