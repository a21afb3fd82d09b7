use proptree_cli::path::PathSegmenter;
use proptree_cli::test_utils::{init_test_logging, reference_ignore, reference_paths};
use proptree_cli::tree::{NodeRef, PropertyTree, TreeBuilder, TreeNode};

fn reference_builder() -> TreeBuilder {
    TreeBuilder::new().with_ignore(reference_ignore())
}

/// Canonical rendering of a subtree with keys left out and siblings sorted.
fn shape(node: NodeRef<'_>) -> String {
    let mut children: Vec<String> = node.children().map(shape).collect();
    children.sort();
    format!("{}[{}]", node.label(), children.join(","))
}

fn assert_keys_are_positional(tree: &PropertyTree) {
    for node in tree.nodes() {
        for (i, child) in node.children().enumerate() {
            assert_eq!(child.key(), format!("{}-{}", node.key(), i));
        }
    }
}

#[test]
fn test_reference_example() {
    init_test_logging(None);
    let (tree, index) = reference_builder().build_from_strings(&reference_paths());

    assert_eq!(tree.root().child_labels(), ["prop5", "prop4", "prop1", "prop2"]);
    assert_eq!(index.get("0-0-0-1"), Some("prop5 --> sub_prop1 --> sub_sub_prop2"));
    assert_eq!(index.get("0-1"), Some("prop4"));
    assert!(tree.find_by_key("0-4").is_none());
    assert_keys_are_positional(&tree);
}

#[test]
fn test_every_key_resolves_to_its_labels() {
    let (tree, index) = reference_builder().build_from_strings(&reference_paths());
    let segmenter = PathSegmenter::default();

    for (key, path) in index.iter() {
        let labels = tree.labels_for_key(key).unwrap();
        assert_eq!(segmenter.split(path).segments(), labels.as_slice(), "key {key}");
    }
}

#[test]
fn test_build_is_idempotent() {
    let builder = reference_builder();
    let (first, first_index) = builder.build_from_strings(&reference_paths());
    let (second, second_index) = builder.build_from_strings(&reference_paths());

    assert_eq!(first.to_node(), second.to_node());
    assert_eq!(first_index, second_index);
}

#[test]
fn test_duplicates_do_not_change_the_tree() {
    let builder = reference_builder();
    let mut doubled = reference_paths();
    doubled.extend(reference_paths());

    let (once, _) = builder.build_from_strings(&reference_paths());
    let (twice, _) = builder.build_from_strings(&doubled);
    assert_eq!(once.to_node(), twice.to_node());
}

#[test]
fn test_permutation_keeps_tree_shape() {
    let builder = reference_builder();
    let mut reversed = reference_paths();
    reversed.reverse();

    let (original, _) = builder.build_from_strings(&reference_paths());
    let (permuted, _) = builder.build_from_strings(&reversed);

    assert_eq!(shape(original.root()), shape(permuted.root()));
    assert_keys_are_positional(&permuted);
}

#[test]
fn test_sibling_labels_are_unique() {
    let (tree, _) = reference_builder().build_from_strings(&reference_paths());
    for node in tree.nodes() {
        let mut labels = node.child_labels();
        let count = labels.len();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), count, "duplicate children under {}", node.key());
    }
}

#[test]
fn test_export_round_trips_through_json() {
    let (tree, _) = reference_builder().build_from_strings(&reference_paths());
    let json = serde_json::to_string(&tree).unwrap();
    let node: TreeNode = serde_json::from_str(&json).unwrap();

    assert_eq!(node, tree.to_node());
    assert_eq!(node.label, "Features");
    assert_eq!(node.children.len(), 4);
}

#[test]
fn test_custom_segmenter_and_title() {
    let builder = TreeBuilder::new()
        .with_segmenter(PathSegmenter::new(".").unwrap())
        .with_root_title("Metadata");
    let (tree, index) = builder.build_from_strings(&["a.b", "a.c", "d"]);

    assert_eq!(tree.root().label(), "Metadata");
    assert_eq!(index.get("0-0-1"), Some("a.c"));
    assert_eq!(index.key_for("d"), Some("0-1"));
}
