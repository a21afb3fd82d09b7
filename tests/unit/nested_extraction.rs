use proptree_cli::core::ProptreeError;
use proptree_cli::nested::{NestedDepthExtractor, PropValue, extract_at_depth, flatten_properties};
use proptree_cli::path::PathSegmenter;
use proptree_cli::properties::{PropertySummary, SummaryOptions};
use proptree_cli::test_utils::reference_annotation;
use proptree_cli::tree::TreeBuilder;
use serde_json::json;

fn values_at(data: &serde_json::Value, depth: usize) -> Vec<serde_json::Value> {
    let data = PropValue::from(data.clone());
    extract_at_depth(&data, depth)
        .unwrap()
        .into_iter()
        .map(PropValue::to_json)
        .collect()
}

#[test]
fn test_documented_depths() {
    let data = json!({"main_prop": {"sub_prop1": 1, "sub_prop2": {"sub_subprop1": 2}}});

    assert_eq!(values_at(&data, 0), [json!({"sub_prop1": 1, "sub_prop2": {"sub_subprop1": 2}})]);
    assert_eq!(values_at(&data, 1), [json!(1), json!({"sub_subprop1": 2})]);
    assert_eq!(values_at(&data, 2), [json!(2)]);
    assert!(values_at(&data, 3).is_empty());
}

#[test]
fn test_shallow_branches_are_skipped() {
    let data = json!({"a": 1, "b": {"c": {"d": "deep"}}, "e": {"f": null}});
    assert_eq!(values_at(&data, 1), [json!({"d": "deep"}), json!(null)]);
    assert_eq!(values_at(&data, 2), [json!("deep")]);
}

#[test]
fn test_source_order_decides_tree_keys() {
    let data = PropValue::from(json!({"meta": {"zeta": 1, "alpha": 2}}));
    assert_eq!(values_at(&data.to_json(), 1), [json!(1), json!(2)]);

    let flat = flatten_properties(data.as_mapping().unwrap(), 4, &PathSegmenter::default());
    let paths: Vec<&str> = flat.iter().map(|(path, _)| path.as_str()).collect();
    let (_, index) = TreeBuilder::new().build_from_strings(&paths);

    assert_eq!(index.get("0-0-0"), Some("meta --> zeta"));
    assert_eq!(index.get("0-0-1"), Some("meta --> alpha"));
}

#[test]
fn test_each_walk_starts_fresh() {
    let data = PropValue::from(json!({"a": {"b": 1}, "c": {"d": 2}}));
    let extractor = NestedDepthExtractor::new(&data).unwrap();

    let first: Vec<_> = extractor.at_depth(1).collect();
    let second: Vec<_> = extractor.at_depth(1).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_leaf_root_is_rejected() {
    let data = PropValue::from(json!([1, 2]));
    assert!(matches!(
        NestedDepthExtractor::new(&data),
        Err(ProptreeError::InvalidInput { .. })
    ));
}

#[test]
fn test_flattened_paths_build_a_tree() {
    let data = PropValue::from(json!({
        "cell_types": {"podocyte": 0.4, "mesangial": 0.6},
        "area": 12
    }));
    let segmenter = PathSegmenter::default();
    let flat = flatten_properties(data.as_mapping().unwrap(), 4, &segmenter);
    let paths: Vec<&str> = flat.iter().map(|(path, _)| path.as_str()).collect();

    let (tree, index) = TreeBuilder::new().build_from_strings(&paths);
    let cell_types = tree.root().child("cell_types").unwrap();
    assert_eq!(cell_types.key(), "0-0");
    assert_eq!(cell_types.child_count(), 2);
    assert_eq!(index.get("0-1"), Some("area"));
}

#[test]
fn test_summary_paths_feed_the_tree_builder() {
    let summary =
        PropertySummary::from_annotations(&[reference_annotation()], &SummaryOptions::default())
            .unwrap();
    let (_, index) = TreeBuilder::new().build_from_strings(&summary.paths);

    assert_eq!(index.resolve("0-0-1").unwrap(), "cell_types --> podocyte");
    assert!(index.resolve("0-9").is_err());
}
